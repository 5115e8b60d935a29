//! Per-variant configuration options and the capability table that governs them.
//!
//! Every scene object carries an [`Options`] map restricted to the keys its
//! [`Kind`] lists as legal. Generic setters (`set_fill`, `set_outline`, ...)
//! go through [`Kind::resolve`], which either names the option the request
//! lands on (possibly an alias, e.g. `outline` on a line recolors its `fill`)
//! or rejects it as unsupported.

use super::font::FontDescriptor;
use crate::error::{GraphicsError, Result};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Names of configurable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    Fill,
    Outline,
    Width,
    Arrow,
    Text,
    Justify,
    Font,
    /// Foreground color of editable text fields.
    TextColor,
}

impl OptionKey {
    pub fn name(self) -> &'static str {
        match self {
            OptionKey::Fill => "fill",
            OptionKey::Outline => "outline",
            OptionKey::Width => "width",
            OptionKey::Arrow => "arrow",
            OptionKey::Text => "text",
            OptionKey::Justify => "justify",
            OptionKey::Font => "font",
            OptionKey::TextColor => "textcolor",
        }
    }

    /// Value an object starts with for this option.
    pub fn default_value(self) -> OptionValue {
        match self {
            OptionKey::Fill => OptionValue::Color(String::new()),
            OptionKey::Outline | OptionKey::TextColor => OptionValue::Color("black".into()),
            OptionKey::Width => OptionValue::Width(1.0),
            OptionKey::Arrow => OptionValue::Arrow(ArrowMode::None),
            OptionKey::Text => OptionValue::Text(String::new()),
            OptionKey::Justify => OptionValue::Justify(Justify::Center),
            OptionKey::Font => OptionValue::Font(FontDescriptor::default()),
        }
    }
}

/// Arrowhead placement on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowMode {
    First,
    Last,
    Both,
    None,
}

impl ArrowMode {
    pub fn at_first(self) -> bool {
        matches!(self, ArrowMode::First | ArrowMode::Both)
    }

    pub fn at_last(self) -> bool {
        matches!(self, ArrowMode::Last | ArrowMode::Both)
    }
}

impl FromStr for ArrowMode {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(ArrowMode::First),
            "last" => Ok(ArrowMode::Last),
            "both" => Ok(ArrowMode::Both),
            "none" => Ok(ArrowMode::None),
            other => Err(GraphicsError::bad_value("arrow", other)),
        }
    }
}

/// Horizontal alignment of multi-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Center,
    Right,
}

impl FromStr for Justify {
    type Err = GraphicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Justify::Left),
            "center" => Ok(Justify::Center),
            "right" => Ok(Justify::Right),
            other => Err(GraphicsError::bad_value("justify", other)),
        }
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Color(String),
    Width(f64),
    Arrow(ArrowMode),
    Text(String),
    Justify(Justify),
    Font(FontDescriptor),
}

/// Drawable variants, used to look up legal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Point,
    Line,
    Rectangle,
    Oval,
    Circle,
    Polygon,
    Text,
    Entry,
    Image,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Point => "Point",
            Kind::Line => "Line",
            Kind::Rectangle => "Rectangle",
            Kind::Oval => "Oval",
            Kind::Circle => "Circle",
            Kind::Polygon => "Polygon",
            Kind::Text => "Text",
            Kind::Entry => "Entry",
            Kind::Image => "Image",
        }
    }

    /// Options stored in the configuration map of this variant.
    pub fn legal_options(self) -> &'static [OptionKey] {
        use OptionKey::*;
        match self {
            Kind::Point => &[Outline, Fill],
            Kind::Line => &[Arrow, Fill, Width],
            Kind::Rectangle | Kind::Oval | Kind::Circle | Kind::Polygon => {
                &[Outline, Width, Fill]
            }
            Kind::Text => &[Justify, Fill, Text, Font],
            Kind::Entry => &[Fill, TextColor, Font],
            Kind::Image => &[],
        }
    }

    /// Capability table: the option a configure request for `requested`
    /// actually writes, or `None` when the variant does not support it.
    pub fn resolve(self, requested: OptionKey) -> Option<OptionKey> {
        use OptionKey::*;
        let target = match (self, requested) {
            // A point is a single pixel; its fill and outline are the same paint.
            (Kind::Point, Fill | Outline) => Outline,
            // Lines and text are painted with their fill; outline is an alias.
            (Kind::Line | Kind::Text, Outline) => Fill,
            (Kind::Text, TextColor) => Fill,
            (kind, key) if kind.legal_options().contains(&key) => key,
            _ => return None,
        };
        Some(target)
    }
}

/// Configuration map of a scene object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<OptionKey, OptionValue>,
}

impl Options {
    /// Default configuration for a variant: every legal key at its default.
    pub fn for_kind(kind: Kind) -> Self {
        let values = kind
            .legal_options()
            .iter()
            .map(|key| (*key, key.default_value()))
            .collect();
        Self { values }
    }

    /// A single-color configuration, used for plotted pixels.
    pub fn stroke(color: &str) -> Self {
        let mut options = Self::default();
        options.insert(OptionKey::Fill, OptionValue::Color(color.to_string()));
        options
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn get(&self, key: OptionKey) -> Option<&OptionValue> {
        self.values.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &OptionValue)> {
        self.values.iter()
    }

    pub(crate) fn insert(&mut self, key: OptionKey, value: OptionValue) {
        self.values.insert(key, value);
    }

    /// Color specifier stored under `key`, or `""` when absent.
    pub fn color(&self, key: OptionKey) -> &str {
        match self.values.get(&key) {
            Some(OptionValue::Color(spec)) => spec,
            _ => "",
        }
    }

    pub fn width(&self) -> f64 {
        match self.values.get(&OptionKey::Width) {
            Some(OptionValue::Width(w)) => *w,
            _ => 1.0,
        }
    }

    pub fn arrow(&self) -> ArrowMode {
        match self.values.get(&OptionKey::Arrow) {
            Some(OptionValue::Arrow(mode)) => *mode,
            _ => ArrowMode::None,
        }
    }

    pub fn text(&self) -> &str {
        match self.values.get(&OptionKey::Text) {
            Some(OptionValue::Text(text)) => text,
            _ => "",
        }
    }

    pub fn justify(&self) -> Justify {
        match self.values.get(&OptionKey::Justify) {
            Some(OptionValue::Justify(j)) => *j,
            _ => Justify::Center,
        }
    }

    pub fn font(&self) -> FontDescriptor {
        match self.values.get(&OptionKey::Font) {
            Some(OptionValue::Font(font)) => *font,
            _ => FontDescriptor::default(),
        }
    }
}
