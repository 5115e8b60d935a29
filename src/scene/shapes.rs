//! Geometric scene objects.

use super::{Figure, Graphic, drawable};
use crate::draw::{ArrowMode, Kind, OptionKey, OptionValue, Options};
use crate::error::{GraphicsError, Result};
use crate::transform::Position;
use std::fmt;

/// A single point, drawn as one pixel.
///
/// Also the coordinate type accepted and returned throughout the API.
pub struct Point {
    graphic: Graphic,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self::at(Position::new(x, y))
    }

    pub(crate) fn at(position: Position) -> Self {
        Self {
            graphic: Graphic::new(Figure::Point(position), Options::for_kind(Kind::Point)),
        }
    }

    pub fn position(&self) -> Position {
        self.graphic.figure(|figure| match figure {
            Figure::Point(p) => *p,
            _ => Position::default(),
        })
    }

    pub fn x(&self) -> f64 {
        self.position().x
    }

    pub fn y(&self) -> f64 {
        self.position().y
    }
}

impl Clone for Point {
    fn clone(&self) -> Self {
        Self {
            graphic: self.graphic.duplicate(),
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.position(), f)
    }
}

/// Corner pair of the bounding-box based figures.
fn corners(graphic: &Graphic) -> (Position, Position) {
    graphic.figure(|figure| match figure {
        Figure::Line(a, b)
        | Figure::Rectangle(a, b)
        | Figure::Oval(a, b)
        | Figure::Circle { p1: a, p2: b, .. } => (*a, *b),
        _ => (Position::default(), Position::default()),
    })
}

/// Accessors shared by the figures defined by two corner points.
macro_rules! bbox_accessors {
    ($($ty:ident),+) => {$(
        impl $ty {
            pub fn get_p1(&self) -> Point {
                Point::at(corners(&self.graphic).0)
            }

            pub fn get_p2(&self) -> Point {
                Point::at(corners(&self.graphic).1)
            }

            /// Midpoint of the two corners.
            pub fn get_center(&self) -> Point {
                let (a, b) = corners(&self.graphic);
                Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
            }
        }

        impl Clone for $ty {
            fn clone(&self) -> Self {
                Self {
                    graphic: self.graphic.duplicate(),
                }
            }
        }
    )+};
}

/// A straight segment, optionally with arrowheads.
pub struct Line {
    graphic: Graphic,
}

impl Line {
    pub fn new(p1: &Point, p2: &Point) -> Self {
        let mut options = Options::for_kind(Kind::Line);
        options.insert(OptionKey::Fill, OptionValue::Color("black".into()));
        Self {
            graphic: Graphic::new(Figure::Line(p1.position(), p2.position()), options),
        }
    }

    /// Sets arrowhead placement: `"first"`, `"last"`, `"both"` or `"none"`.
    pub fn set_arrow(&self, mode: &str) -> Result<()> {
        let mode: ArrowMode = mode.parse()?;
        self.graphic
            .configure(OptionKey::Arrow, OptionValue::Arrow(mode))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = corners(&self.graphic);
        write!(f, "Line({a}, {b})")
    }
}

/// An axis-aligned rectangle between two opposite corners.
pub struct Rectangle {
    graphic: Graphic,
}

impl Rectangle {
    pub fn new(p1: &Point, p2: &Point) -> Self {
        Self {
            graphic: Graphic::new(
                Figure::Rectangle(p1.position(), p2.position()),
                Options::for_kind(Kind::Rectangle),
            ),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = corners(&self.graphic);
        write!(f, "Rectangle({a}, {b})")
    }
}

/// An ellipse inscribed in the box between two opposite corners.
pub struct Oval {
    graphic: Graphic,
}

impl Oval {
    pub fn new(p1: &Point, p2: &Point) -> Self {
        Self {
            graphic: Graphic::new(
                Figure::Oval(p1.position(), p2.position()),
                Options::for_kind(Kind::Oval),
            ),
        }
    }
}

impl fmt::Display for Oval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = corners(&self.graphic);
        write!(f, "Oval({a}, {b})")
    }
}

pub struct Circle {
    graphic: Graphic,
}

impl Circle {
    pub fn new(center: &Point, radius: f64) -> Self {
        let c = center.position();
        let figure = Figure::Circle {
            p1: c.offset(-radius, -radius),
            p2: c.offset(radius, radius),
            radius,
        };
        Self {
            graphic: Graphic::new(figure, Options::for_kind(Kind::Circle)),
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.graphic.figure(|figure| match figure {
            Figure::Circle { radius, .. } => *radius,
            _ => 0.0,
        })
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({}, {:?})", self.get_center(), self.get_radius())
    }
}

bbox_accessors!(Line, Rectangle, Oval, Circle);

/// A closed polygon through an ordered list of vertices.
pub struct Polygon {
    graphic: Graphic,
}

impl Polygon {
    /// Builds a polygon from at least one vertex.
    pub fn new(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(GraphicsError::InvalidGeometry(
                "a polygon needs at least one point",
            ));
        }
        let vertices = points.iter().map(Point::position).collect();
        Ok(Self {
            graphic: Graphic::new(Figure::Polygon(vertices), Options::for_kind(Kind::Polygon)),
        })
    }

    fn vertices(&self) -> Vec<Position> {
        self.graphic.figure(|figure| match figure {
            Figure::Polygon(points) => points.clone(),
            _ => Vec::new(),
        })
    }

    /// Copies of the vertices, in order.
    pub fn get_points(&self) -> Vec<Point> {
        self.vertices().into_iter().map(Point::at).collect()
    }
}

impl Clone for Polygon {
    fn clone(&self) -> Self {
        Self {
            graphic: self.graphic.duplicate(),
        }
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertices: Vec<String> = self.vertices().iter().map(ToString::to_string).collect();
        write!(f, "Polygon({})", vertices.join(", "))
    }
}

drawable!(Point, Line, Rectangle, Oval, Circle, Polygon);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Drawable;

    #[test]
    fn circle_corners_follow_radius() {
        let circle = Circle::new(&Point::new(50.0, 50.0), 10.0);
        assert_eq!(circle.get_p1(), Point::new(40.0, 40.0));
        assert_eq!(circle.get_p2(), Point::new(60.0, 60.0));
        assert_eq!(circle.get_center(), Point::new(50.0, 50.0));
        assert_eq!(circle.get_radius(), 10.0);
    }

    #[test]
    fn undrawn_move_updates_geometry() {
        let rect = Rectangle::new(&Point::new(1.0, 2.0), &Point::new(3.0, 4.0));
        rect.move_by(10.0, -2.0);
        assert_eq!(rect.get_p1(), Point::new(11.0, 0.0));
        assert_eq!(rect.get_p2(), Point::new(13.0, 2.0));
    }

    #[test]
    fn clone_copies_geometry_and_options() {
        let line = Line::new(&Point::new(0.0, 0.0), &Point::new(5.0, 5.0));
        line.set_width(3.0).unwrap();
        line.set_arrow("last").unwrap();
        let copy = line.clone();
        copy.move_by(1.0, 1.0);
        assert_eq!(line.get_p1(), Point::new(0.0, 0.0));
        assert_eq!(copy.get_p1(), Point::new(1.0, 1.0));
        assert_eq!(copy.options().width(), 3.0);
        assert_eq!(copy.options().arrow(), ArrowMode::Last);
    }

    #[test]
    fn unsupported_and_bad_options_are_rejected() {
        let point = Point::new(1.0, 1.0);
        assert!(matches!(
            point.set_width(2.0),
            Err(GraphicsError::UnsupportedOption("width"))
        ));
        point.set_fill("red").unwrap();
        assert_eq!(point.options().color(OptionKey::Outline), "red");

        let line = Line::new(&Point::new(0.0, 0.0), &Point::new(1.0, 1.0));
        assert!(matches!(
            line.set_arrow("up"),
            Err(GraphicsError::BadOptionValue { option: "arrow", .. })
        ));
        assert!(line.set_width(-1.0).is_err());
        line.set_outline("blue").unwrap();
        assert_eq!(line.options().color(OptionKey::Fill), "blue");
    }

    #[test]
    fn empty_polygon_is_invalid() {
        assert!(matches!(
            Polygon::new(&[]),
            Err(GraphicsError::InvalidGeometry(_))
        ));
        let tri = Polygon::new(&[
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ])
        .unwrap();
        assert_eq!(tri.get_points().len(), 3);
    }

    #[test]
    fn display_uses_constructor_notation() {
        let rect = Rectangle::new(&Point::new(1.0, 2.0), &Point::new(3.0, 4.0));
        assert_eq!(rect.to_string(), "Rectangle(Point(1.0, 2.0), Point(3.0, 4.0))");
        let circle = Circle::new(&Point::new(0.0, 0.0), 2.5);
        assert_eq!(circle.to_string(), "Circle(Point(0.0, 0.0), 2.5)");
    }
}
