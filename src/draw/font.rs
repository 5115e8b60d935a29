//! Font descriptor for text rendering.

use crate::error::{GraphicsError, Result};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted point size.
pub const MIN_FONT_SIZE: u32 = 5;
/// Largest accepted point size.
pub const MAX_FONT_SIZE: u32 = 36;

/// Font families available to text objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Helvetica,
    Arial,
    Courier,
    TimesRoman,
}

impl FontFace {
    pub fn as_str(self) -> &'static str {
        match self {
            FontFace::Helvetica => "helvetica",
            FontFace::Arial => "arial",
            FontFace::Courier => "courier",
            FontFace::TimesRoman => "times roman",
        }
    }

    fn pango_family(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::Arial => "Arial",
            FontFace::Courier => "Courier",
            FontFace::TimesRoman => "Times",
        }
    }
}

impl FromStr for FontFace {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "helvetica" => Ok(FontFace::Helvetica),
            "arial" => Ok(FontFace::Arial),
            "courier" => Ok(FontFace::Courier),
            "times roman" => Ok(FontFace::TimesRoman),
            other => Err(GraphicsError::bad_value("font face", other)),
        }
    }
}

/// Font weight/slant combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold italic",
        }
    }
}

impl FromStr for FontStyle {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(FontStyle::Normal),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "bold italic" => Ok(FontStyle::BoldItalic),
            other => Err(GraphicsError::bad_value("font style", other)),
        }
    }
}

/// Font configuration for text rendering: the (family, size, style) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDescriptor {
    pub face: FontFace,
    /// Point size, always within `MIN_FONT_SIZE..=MAX_FONT_SIZE`.
    pub size: u32,
    pub style: FontStyle,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            face: FontFace::Helvetica,
            size: 12,
            style: FontStyle::Normal,
        }
    }
}

impl FontDescriptor {
    /// Returns a copy with a new point size, rejecting sizes outside 5-36.
    pub fn with_size(self, size: u32) -> Result<Self> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return Err(GraphicsError::bad_value("font size", size));
        }
        Ok(Self { size, ..self })
    }

    pub fn with_face(self, face: &str) -> Result<Self> {
        Ok(Self {
            face: face.parse()?,
            ..self
        })
    }

    pub fn with_style(self, style: &str) -> Result<Self> {
        Ok(Self {
            style: style.parse()?,
            ..self
        })
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Helvetica Italic Bold 12"
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.face.pango_family().to_string()];
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Bold => parts.push("Bold".to_string()),
            FontStyle::Italic => parts.push("Italic".to_string()),
            FontStyle::BoldItalic => {
                parts.push("Italic".to_string());
                parts.push("Bold".to_string());
            }
        }
        parts.push(self.size.to_string());
        parts.join(" ")
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}', {}, '{}')",
            self.face.as_str(),
            self.size,
            self.style.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pango_string_default() {
        assert_eq!(FontDescriptor::default().to_pango_string(), "Helvetica 12");
    }

    #[test]
    fn test_pango_string_bold_italic() {
        let font = FontDescriptor::default()
            .with_face("times roman")
            .and_then(|f| f.with_style("bold italic"))
            .and_then(|f| f.with_size(24))
            .unwrap();
        assert_eq!(font.to_pango_string(), "Times Italic Bold 24");
    }

    #[test]
    fn size_outside_range_is_rejected() {
        let font = FontDescriptor::default();
        assert!(matches!(
            font.with_size(4),
            Err(GraphicsError::BadOptionValue { option: "font size", .. })
        ));
        assert!(font.with_size(37).is_err());
        assert_eq!(font.with_size(5).unwrap().size, 5);
        assert_eq!(font.with_size(36).unwrap().size, 36);
    }

    #[test]
    fn unknown_face_and_style_are_rejected() {
        let font = FontDescriptor::default();
        assert!(font.with_face("comic sans").is_err());
        assert!(font.with_style("oblique").is_err());
    }
}
