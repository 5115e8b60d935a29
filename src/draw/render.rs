//! Cairo-based rasterisation of display lists.

use super::color::Color;
use super::frame::{CanvasItem, Frame};
use super::options::{Justify, OptionKey, Options};
use super::shape::{EntryWidget, Primitive};
use crate::util;
use image::RgbImage;
use log::warn;

/// Paints a whole surface: background first, then every item bottom to top.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `background` - Background color specifier (empty = leave transparent)
/// * `frame` - Display list of the surface
/// * `antialias` - Whether to smooth edges
pub fn render_frame(ctx: &cairo::Context, background: &str, frame: &Frame, antialias: bool) {
    ctx.set_antialias(if antialias {
        cairo::Antialias::Default
    } else {
        cairo::Antialias::None
    });

    if let Some(bg) = Color::resolve_or_black(background) {
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let _ = ctx.paint();
    }

    for item in frame.items() {
        render_item(ctx, item);
    }
}

/// Renders a single display-list item.
pub fn render_item(ctx: &cairo::Context, item: &CanvasItem) {
    let options = &item.options;
    let _ = ctx.save();
    match &item.primitive {
        Primitive::Rectangle { x1, y1, x2, y2 } => {
            let (x, w) = span(*x1, *x2);
            let (y, h) = span(*y1, *y2);
            ctx.rectangle(x, y, w, h);
            paint_closed(ctx, options);
        }
        Primitive::Oval { x1, y1, x2, y2 } => render_oval(ctx, *x1, *y1, *x2, *y2, options),
        Primitive::Line { x1, y1, x2, y2 } => render_line(ctx, (*x1, *y1), (*x2, *y2), options),
        Primitive::Polygon { points } => render_polygon(ctx, points, options),
        Primitive::Text { x, y } => {
            let color = Color::resolve_or_black(options.color(OptionKey::Fill));
            render_text(ctx, *x, *y, options.text(), color, options);
        }
        Primitive::Entry { x, y, widget } => render_entry(ctx, *x, *y, widget, options),
        Primitive::Image { x, y, pixels } => match pixels.upgrade() {
            Some(pixels) => render_image(ctx, *x, *y, &pixels.borrow()),
            None => warn!("Image item {:?} lost its pixel buffer; skipping", item.id),
        },
    }
    let _ = ctx.restore();
}

/// Normalises an interval to (start, length).
fn span(a: f64, b: f64) -> (f64, f64) {
    (a.min(b), (b - a).abs())
}

/// Fills and outlines the current path according to the fill/outline/width options.
fn paint_closed(ctx: &cairo::Context, options: &Options) {
    if let Some(fill) = Color::resolve_or_black(options.color(OptionKey::Fill)) {
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        let _ = ctx.fill_preserve();
    }
    let width = options.width();
    if let Some(outline) = Color::resolve_or_black(options.color(OptionKey::Outline))
        && width > 0.0
    {
        ctx.set_source_rgba(outline.r, outline.g, outline.b, outline.a);
        ctx.set_line_width(width);
        ctx.set_line_join(cairo::LineJoin::Miter);
        let _ = ctx.stroke_preserve();
    }
    ctx.new_path();
}

/// Render an ellipse inscribed in the given box using Cairo's arc with scaling
fn render_oval(ctx: &cairo::Context, x1: f64, y1: f64, x2: f64, y2: f64, options: &Options) {
    let (x, w) = span(x1, x2);
    let (y, h) = span(y1, y2);
    if w == 0.0 || h == 0.0 {
        return;
    }

    ctx.save().ok();
    ctx.translate(x + w / 2.0, y + h / 2.0);
    ctx.scale(w / 2.0, h / 2.0);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore().ok();

    paint_closed(ctx, options);
}

/// Render a straight line, with optional arrowheads at either end
fn render_line(ctx: &cairo::Context, start: (f64, f64), end: (f64, f64), options: &Options) {
    let Some(color) = Color::resolve_or_black(options.color(OptionKey::Fill)) else {
        return;
    };
    let width = options.width().max(0.0);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Butt);

    ctx.move_to(start.0, start.1);
    ctx.line_to(end.0, end.1);
    let _ = ctx.stroke();

    let arrow = options.arrow();
    let head_length = 8.0 + 2.0 * width;
    if arrow.at_first() {
        render_arrowhead(ctx, start, end, head_length);
    }
    if arrow.at_last() {
        render_arrowhead(ctx, end, start, head_length);
    }
}

/// Filled triangular arrowhead with its tip at `tip`, pointing away from `tail`.
fn render_arrowhead(ctx: &cairo::Context, tip: (f64, f64), tail: (f64, f64), length: f64) {
    let [left, right] = util::calculate_arrowhead(tip, tail, length, 25.0);
    ctx.move_to(tip.0, tip.1);
    ctx.line_to(left.0, left.1);
    ctx.line_to(right.0, right.1);
    ctx.close_path();
    let _ = ctx.fill();
}

fn render_polygon(ctx: &cairo::Context, points: &[(f64, f64)], options: &Options) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    ctx.move_to(x0, y0);
    for &(x, y) in rest {
        ctx.line_to(x, y);
    }
    ctx.close_path();
    paint_closed(ctx, options);
}

/// Renders text centered on (x, y) using Pango.
///
/// Multi-line text is aligned according to the `justify` option; the block as a
/// whole stays centered on the anchor.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Option<Color>,
    options: &Options,
) {
    let Some(color) = color else {
        return;
    };
    if text.is_empty() {
        return;
    }

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&options.font().to_pango_string());
    layout.set_font_description(Some(&font_desc));
    layout.set_alignment(match options.justify() {
        Justify::Left => pango::Alignment::Left,
        Justify::Center => pango::Alignment::Center,
        Justify::Right => pango::Alignment::Right,
    });
    layout.set_text(text);

    let (width, height) = layout.pixel_size();
    ctx.move_to(x - f64::from(width) / 2.0, y - f64::from(height) / 2.0);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    pangocairo::functions::show_layout(ctx, &layout);
}

/// Renders an entry field: a bordered box sized for `widget.chars` characters
/// with the current buffer contents left-aligned inside.
fn render_entry(ctx: &cairo::Context, x: f64, y: f64, widget: &EntryWidget, options: &Options) {
    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&options.font().to_pango_string());
    layout.set_font_description(Some(&font_desc));
    layout.set_text("0");
    let (char_width, line_height) = layout.pixel_size();

    let padding = 2.0;
    let box_width = f64::from(char_width) * f64::from(widget.chars) + padding * 2.0;
    let box_height = f64::from(line_height) + padding * 2.0;
    let left = x - box_width / 2.0;
    let top = y - box_height / 2.0;

    ctx.rectangle(left, top, box_width, box_height);
    if let Some(bg) = Color::resolve_or_black(options.color(OptionKey::Fill)) {
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let _ = ctx.fill_preserve();
    }
    ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();

    let text = widget.buffer.borrow();
    if text.is_empty() {
        return;
    }
    if let Some(fg) = Color::resolve_or_black(options.color(OptionKey::TextColor)) {
        ctx.rectangle(left, top, box_width, box_height);
        ctx.clip();
        layout.set_text(&text);
        ctx.move_to(left + padding, top + padding);
        ctx.set_source_rgba(fg.r, fg.g, fg.b, fg.a);
        pangocairo::functions::show_layout(ctx, &layout);
        ctx.reset_clip();
    }
}

/// Blits an RGB image centered on (x, y).
fn render_image(ctx: &cairo::Context, x: f64, y: f64, pixels: &RgbImage) {
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let surface = match rgb_to_surface(pixels) {
        Ok(surface) => surface,
        Err(e) => {
            warn!("Failed to convert {}x{} image for drawing: {}", width, height, e);
            return;
        }
    };
    let left = x - f64::from(width / 2);
    let top = y - f64::from(height / 2);
    if ctx.set_source_surface(&surface, left, top).is_ok() {
        let _ = ctx.paint();
    }
}

/// Copies RGB pixels into an opaque ARGB32 cairo surface.
pub fn rgb_to_surface(pixels: &RgbImage) -> Result<cairo::ImageSurface, cairo::Error> {
    let (width, height) = pixels.dimensions();
    let format = cairo::Format::ARgb32;
    let stride = format.stride_for_width(width)?;
    let row = stride as usize;
    let mut data = vec![0u8; row * height as usize];

    for (x, y, px) in pixels.enumerate_pixels() {
        let [r, g, b] = px.0;
        let argb = 0xff00_0000u32 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        let offset = y as usize * row + x as usize * 4;
        data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    cairo::ImageSurface::create_for_data(data, format, width as i32, height as i32, stride)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ItemId;
    use crate::draw::options::{Kind, OptionValue};

    fn surface_with_context(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
    }

    #[test]
    fn filled_rectangle_paints_interior() {
        let mut options = Options::for_kind(Kind::Rectangle);
        options.insert(OptionKey::Fill, OptionValue::Color("#ff0000".into()));
        let mut frame = Frame::new();
        frame.push(CanvasItem {
            id: ItemId(1),
            primitive: Primitive::Rectangle {
                x1: 2.0,
                y1: 2.0,
                x2: 18.0,
                y2: 18.0,
            },
            options,
        });

        let (mut surface, ctx) = surface_with_context(20, 20);
        render_frame(&ctx, "white", &frame, false);
        drop(ctx);

        assert_eq!(pixel(&mut surface, 10, 10), 0xffff0000);
        assert_eq!(pixel(&mut surface, 0, 0), 0xffffffff);
    }

    #[test]
    fn rgb_conversion_keeps_channels() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgb([10, 20, 30]));
        let mut surface = rgb_to_surface(&img).unwrap();
        assert_eq!(pixel(&mut surface, 1, 1), 0xff0a141e);
        assert_eq!(pixel(&mut surface, 0, 0), 0xff000000);
    }
}
