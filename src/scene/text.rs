//! Text labels and editable entry fields.

use super::{Figure, Graphic, drawable};
use crate::draw::{FontDescriptor, Justify, Kind, OptionKey, OptionValue, Options};
use crate::error::Result;
use crate::scene::Point;
use crate::transform::Position;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

fn anchor_of(graphic: &Graphic) -> Position {
    graphic.figure(|figure| match figure {
        Figure::Text(p) | Figure::Entry { anchor: p, .. } | Figure::Image { anchor: p, .. } => *p,
        _ => Position::default(),
    })
}

pub(crate) fn anchor_point(graphic: &Graphic) -> Point {
    Point::at(anchor_of(graphic))
}

fn set_font(graphic: &Graphic, font: FontDescriptor) -> Result<()> {
    graphic.configure(OptionKey::Font, OptionValue::Font(font))
}

/// A text label centered on its anchor.
pub struct Text {
    graphic: Graphic,
}

impl Text {
    pub fn new(anchor: &Point, text: impl ToString) -> Self {
        let mut options = Options::for_kind(Kind::Text);
        options.insert(OptionKey::Fill, OptionValue::Color("black".into()));
        options.insert(OptionKey::Text, OptionValue::Text(text.to_string()));
        Self {
            graphic: Graphic::new(Figure::Text(anchor.position()), options),
        }
    }

    pub fn set_text(&self, text: impl ToString) -> Result<()> {
        self.graphic
            .configure(OptionKey::Text, OptionValue::Text(text.to_string()))
    }

    pub fn get_text(&self) -> String {
        self.graphic.options().text().to_string()
    }

    pub fn get_anchor(&self) -> Point {
        anchor_point(&self.graphic)
    }

    /// One of `"helvetica"`, `"arial"`, `"courier"`, `"times roman"`.
    pub fn set_face(&self, face: &str) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_face(face)?)
    }

    /// Point size between 5 and 36.
    pub fn set_size(&self, size: u32) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_size(size)?)
    }

    /// One of `"normal"`, `"bold"`, `"italic"`, `"bold italic"`.
    pub fn set_style(&self, style: &str) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_style(style)?)
    }

    pub fn set_text_color(&self, color: &str) -> Result<()> {
        self.graphic
            .configure(OptionKey::TextColor, OptionValue::Color(color.to_string()))
    }

    /// `"left"`, `"center"` or `"right"`; affects multi-line text.
    pub fn set_justify(&self, justify: &str) -> Result<()> {
        let justify: Justify = justify.parse()?;
        self.graphic
            .configure(OptionKey::Justify, OptionValue::Justify(justify))
    }
}

impl Clone for Text {
    fn clone(&self) -> Self {
        Self {
            graphic: self.graphic.duplicate(),
        }
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({}, '{}')", anchor_of(&self.graphic), self.get_text())
    }
}

/// An editable single-line text field.
///
/// The field's contents live in a buffer shared with the backend widget, so
/// [`Entry::get_text`] sees what the user typed without a round trip.
pub struct Entry {
    graphic: Graphic,
    buffer: Rc<RefCell<String>>,
}

impl Entry {
    /// Creates an empty field `width` characters wide.
    pub fn new(anchor: &Point, width: u32) -> Self {
        Self::with_buffer(anchor.position(), width, String::new())
    }

    fn with_buffer(anchor: Position, chars: u32, text: String) -> Self {
        let buffer = Rc::new(RefCell::new(text));
        let mut options = Options::for_kind(Kind::Entry);
        options.insert(OptionKey::Fill, OptionValue::Color("gray".into()));
        let figure = Figure::Entry {
            anchor,
            chars,
            buffer: Rc::clone(&buffer),
        };
        Self {
            graphic: Graphic::new(figure, options),
            buffer,
        }
    }

    pub fn get_text(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Replaces the field's contents.
    pub fn set_text(&self, text: impl ToString) {
        *self.buffer.borrow_mut() = text.to_string();
    }

    pub fn get_anchor(&self) -> Point {
        anchor_point(&self.graphic)
    }

    /// Width of the field in characters.
    pub fn get_width(&self) -> u32 {
        self.graphic.figure(|figure| match figure {
            Figure::Entry { chars, .. } => *chars,
            _ => 0,
        })
    }

    pub fn set_face(&self, face: &str) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_face(face)?)
    }

    pub fn set_size(&self, size: u32) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_size(size)?)
    }

    pub fn set_style(&self, style: &str) -> Result<()> {
        set_font(&self.graphic, self.graphic.options().font().with_style(style)?)
    }

    pub fn set_text_color(&self, color: &str) -> Result<()> {
        self.graphic
            .configure(OptionKey::TextColor, OptionValue::Color(color.to_string()))
    }
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        let copy = Self::with_buffer(anchor_of(&self.graphic), self.get_width(), self.get_text());
        copy.graphic.copy_options_from(&self.graphic);
        copy
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entry({}, {})", anchor_of(&self.graphic), self.get_width())
    }
}

drawable!(Text, Entry);
