//! Color specifiers and their RGBA resolution.
//!
//! Objects and windows carry colors as textual specifiers (`"#rrggbb"`, `"#rgb"`
//! or a named color). The rasteriser resolves them into [`Color`] values when
//! painting. An empty specifier means "no paint", matching the default fill.

use log::warn;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use easel::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(Color::parse("red"), Some(red));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 0-255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Resolves a color specifier.
    ///
    /// Returns `None` for the empty specifier and for anything that is neither
    /// a hex triple nor a known color name.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex);
        }
        name_to_rgb(spec).map(|(r, g, b)| Self::from_rgb8(r, g, b))
    }

    /// Like [`Color::parse`], but logs and falls back to black for unknown
    /// specifiers. The empty specifier still yields `None`.
    pub fn resolve_or_black(spec: &str) -> Option<Self> {
        if spec.trim().is_empty() {
            return None;
        }
        Some(Self::parse(spec).unwrap_or_else(|| {
            warn!("Unknown color '{}', using black", spec);
            BLACK
        }))
    }
}

/// Returns the `"#rrggbb"` specifier for the given 0-255 channel values.
///
/// ```
/// assert_eq!(easel::color_rgb(220, 20, 60), "#dc143c");
/// ```
pub fn color_rgb(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |s: &str| channel(s).map(|v| v * 17);
            Some(Color::from_rgb8(
                expand(&hex[0..1])?,
                expand(&hex[1..2])?,
                expand(&hex[2..3])?,
            ))
        }
        _ => None,
    }
}

/// Maps common color names (case-insensitive, spaces ignored) to RGB.
fn name_to_rgb(name: &str) -> Option<(u8, u8, u8)> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let rgb = match key.as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "purple" => (160, 32, 240),
        "brown" => (165, 42, 42),
        "gray" | "grey" => (190, 190, 190),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "darkgreen" => (0, 100, 0),
        "darkblue" => (0, 0, 139),
        "darkred" => (139, 0, 0),
        "lightblue" => (173, 216, 230),
        "lightgreen" => (144, 238, 144),
        "navy" => (0, 0, 128),
        "gold" => (255, 215, 0),
        "peachpuff" => (255, 218, 185),
        _ => return None,
    };
    Some(rgb)
}

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_rgb_formats_lowercase_hex() {
        assert_eq!(color_rgb(0, 0, 0), "#000000");
        assert_eq!(color_rgb(255, 128, 1), "#ff8001");
    }

    #[test]
    fn parse_accepts_hex_forms_and_names() {
        assert_eq!(Color::parse("#ff0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(Color::parse("#fff"), Some(WHITE));
        assert_eq!(Color::parse("Light Gray"), Color::parse("lightgray"));
        assert_eq!(Color::parse(&color_rgb(100, 149, 237)), Some(Color::from_rgb8(100, 149, 237)));
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(Color::parse(""), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("no-such-color"), None);
    }

    #[test]
    fn unknown_names_fall_back_to_black() {
        assert_eq!(Color::resolve_or_black("chartreuse-ish"), Some(BLACK));
        assert_eq!(Color::resolve_or_black(""), None);
    }
}
