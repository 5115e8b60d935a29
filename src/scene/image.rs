//! Pixel-addressable raster images.
//!
//! An [`Image`] owns an RGB pixel grid. The backend item showing a drawn
//! image only holds a weak reference to the grid; drawing pins the grid in
//! the context's live-image registry and undrawing unpins it.

use super::text::anchor_point;
use super::{Figure, Graphic, ImageHandle, drawable};
use crate::Graphics;
use crate::draw::{Kind, Options};
use crate::error::{GraphicsError, Result};
use crate::scene::Point;
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// A raster image centered on its anchor.
pub struct Image {
    graphic: Graphic,
    handle: ImageHandle,
}

impl Image {
    /// Decodes an image file (PNG, JPEG, GIF, PPM/PGM, BMP).
    pub fn load(ctx: &Graphics, anchor: &Point, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let pixels = image::open(path)?.to_rgb8();
        debug!(
            "Loaded {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        Ok(Self::from_pixels(ctx, anchor, pixels))
    }

    /// Allocates a black image of the given size.
    pub fn blank(ctx: &Graphics, anchor: &Point, width: u32, height: u32) -> Self {
        Self::from_pixels(ctx, anchor, RgbImage::new(width, height))
    }

    fn from_pixels(ctx: &Graphics, anchor: &Point, pixels: RgbImage) -> Self {
        let handle = ImageHandle {
            id: ctx.next_image_id(),
            pixels: Rc::new(RefCell::new(pixels)),
            ctx: ctx.clone(),
        };
        let figure = Figure::Image {
            anchor: anchor.position(),
            image: handle.clone(),
        };
        Self {
            graphic: Graphic::new(figure, Options::for_kind(Kind::Image)),
            handle,
        }
    }

    /// Registry key of this image; unique within its context.
    pub fn id(&self) -> u64 {
        self.handle.id
    }

    pub fn get_anchor(&self) -> Point {
        anchor_point(&self.graphic)
    }

    pub fn get_width(&self) -> u32 {
        self.handle.pixels.borrow().width()
    }

    pub fn get_height(&self) -> u32 {
        self.handle.pixels.borrow().height()
    }

    /// Returns the `[r, g, b]` value at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        let pixels = self.handle.pixels.borrow();
        pixels
            .get_pixel_checked(x, y)
            .map(|p| p.0)
            .ok_or(GraphicsError::PixelOutOfBounds { x, y })
    }

    /// Sets the pixel at `(x, y)`; shown on the next flush if drawn.
    pub fn set_pixel(&self, x: u32, y: u32, rgb: [u8; 3]) -> Result<()> {
        let mut pixels = self.handle.pixels.borrow_mut();
        let pixel = pixels
            .get_pixel_mut_checked(x, y)
            .ok_or(GraphicsError::PixelOutOfBounds { x, y })?;
        *pixel = Rgb(rgb);
        Ok(())
    }

    /// Encodes the image in the format implied by the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .map_err(|_| GraphicsError::UnknownImageFormat(path.to_path_buf()))?;
        self.handle.pixels.borrow().save_with_format(path, format)?;
        debug!("Saved image {} to {}", self.handle.id, path.display());
        Ok(())
    }
}

impl Clone for Image {
    /// Deep-copies the pixel grid under a fresh id.
    fn clone(&self) -> Self {
        let pixels = self.handle.pixels.borrow().clone();
        Self::from_pixels(&self.handle.ctx, &self.get_anchor(), pixels)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image({}, {}, {})",
            self.get_anchor(),
            self.get_width(),
            self.get_height()
        )
    }
}

drawable!(Image);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    fn ctx() -> Graphics {
        Graphics::new(HeadlessBackend::new())
    }

    #[test]
    fn blank_image_is_zeroed() {
        let ctx = ctx();
        let img = Image::blank(&ctx, &Point::new(0.0, 0.0), 4, 3);
        assert_eq!(img.get_width(), 4);
        assert_eq!(img.get_height(), 3);
        assert_eq!(img.get_pixel(3, 2).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn pixels_round_trip_and_bounds_are_checked() {
        let ctx = ctx();
        let img = Image::blank(&ctx, &Point::new(0.0, 0.0), 2, 2);
        img.set_pixel(1, 0, [10, 20, 30]).unwrap();
        assert_eq!(img.get_pixel(1, 0).unwrap(), [10, 20, 30]);
        assert!(matches!(
            img.get_pixel(2, 0),
            Err(GraphicsError::PixelOutOfBounds { x: 2, y: 0 })
        ));
        assert!(img.set_pixel(0, 5, [0, 0, 0]).is_err());
    }

    #[test]
    fn clone_copies_pixels_with_new_id() {
        let ctx = ctx();
        let img = Image::blank(&ctx, &Point::new(3.0, 4.0), 2, 2);
        img.set_pixel(0, 0, [255, 0, 0]).unwrap();
        let copy = img.clone();
        copy.set_pixel(0, 0, [0, 255, 0]).unwrap();
        assert_ne!(copy.id(), img.id());
        assert_eq!(img.get_pixel(0, 0).unwrap(), [255, 0, 0]);
        assert_eq!(copy.get_anchor(), Point::new(3.0, 4.0));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let ctx = ctx();
        let dir = tempfile::tempdir().unwrap();
        let img = Image::blank(&ctx, &Point::new(0.0, 0.0), 1, 1);
        let err = img.save(dir.path().join("picture.xyz")).unwrap_err();
        assert!(matches!(err, GraphicsError::UnknownImageFormat(_)));
    }
}
