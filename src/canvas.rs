//! The shared drawing surface.
//!
//! A [`Canvas`] is the single in-memory RGBA raster all assets draw onto
//! during one render. The poster owns it; assets only ever receive
//! `&mut Canvas` for the duration of their render or guide call, so there
//! is exactly one writer at a time by construction.

use std::path::Path;

use image::{DynamicImage, Pixel, Rgba, RgbaImage, imageops::FilterType};

use crate::error::CartelError;

/// An owned RGBA working surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Decode the template at `path` and copy it into a fresh working
    /// buffer. Drawing never touches the decoded original.
    pub fn from_template(path: &Path) -> Result<Self, CartelError> {
        let decoded = image::open(path).map_err(|e| {
            CartelError::InvalidConfiguration(format!(
                "template '{}' could not be decoded: {e}",
                path.display()
            ))
        })?;
        Ok(Self::from_image(decoded))
    }

    /// Wrap an already-decoded image, converting to RGBA.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    /// A solid-color surface (handy for tests and generated templates).
    pub fn blank(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Alpha-blend a single pixel, ignoring coordinates off the surface.
    pub fn put_pixel_clipped(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        px.blend(&color);
    }

    /// Alpha-composite `src` onto the surface with its top-left corner at
    /// `(x, y)`, at native resolution. Off-surface parts clip.
    pub fn blit(&mut self, src: &RgbaImage, x: i64, y: i64) {
        for (sx, sy, px) in src.enumerate_pixels() {
            self.put_pixel_clipped(x + sx as i64, y + sy as i64, *px);
        }
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                self.put_pixel_clipped(x + dx, y + dy, color);
            }
        }
    }

    /// Draw a 1px rectangle outline, clipped to the surface.
    pub fn outline_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgba<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let (w, h) = (width as i64, height as i64);
        for dx in 0..w {
            self.put_pixel_clipped(x + dx, y, color);
            self.put_pixel_clipped(x + dx, y + h - 1, color);
        }
        for dy in 0..h {
            self.put_pixel_clipped(x, y + dy, color);
            self.put_pixel_clipped(x + w - 1, y + dy, color);
        }
    }

    /// Resample to `percent` of the current size.
    ///
    /// New dimensions truncate: `new = floor(dim * percent / 100)`,
    /// clamped to at least one pixel.
    pub fn resize_percent(self, percent: u32) -> Self {
        let new_width = ((self.width() as u64 * percent as u64) / 100).max(1) as u32;
        let new_height = ((self.height() as u64 * percent as u64) / 100).max(1) as u32;
        Self {
            image: image::imageops::resize(&self.image, new_width, new_height, FilterType::Lanczos3),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Hand the finished raster to the caller.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
