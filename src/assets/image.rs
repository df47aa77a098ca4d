//! Raster asset: blits an existing image onto the template.
//!
//! The source is exactly one of a file path, an encoded byte buffer, or an
//! already-decoded raster. Validation rejects anything else.

use std::path::PathBuf;

use image::RgbaImage;

use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::geometry::Position;
use crate::typeface::StyleContext;

/// An image placed on the poster at native resolution.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub position: Position,
    path: Option<PathBuf>,
    bytes: Option<Vec<u8>>,
    raster: Option<RgbaImage>,
}

impl Image {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a diagnostic id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.position.id = id.into();
        self
    }

    /// Where on the template the image should be drawn.
    pub fn top_left(mut self, x: i32, y: i32) -> Self {
        self.position.x = x;
        self.position.y = y;
        self
    }

    /// Source the image from a file on disk.
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Source the image from an encoded byte buffer (a "stream").
    pub fn source_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Source the image from an already-decoded raster. The buffer is
    /// owned by the asset and survives the render.
    pub fn source_raster(mut self, raster: RgbaImage) -> Self {
        self.raster = Some(raster);
        self
    }

    pub fn validate(&self) -> Result<(), CartelError> {
        let sources =
            self.path.is_some() as u8 + self.bytes.is_some() as u8 + self.raster.is_some() as u8;
        match sources {
            0 => Err(CartelError::InvalidConfiguration(
                "no image source set: supply a path, a byte buffer or a raster".into(),
            )),
            1 => Ok(()),
            _ => Err(CartelError::InvalidConfiguration(
                "multiple image sources set, only one of path/bytes/raster is allowed".into(),
            )),
        }
    }

    /// Produce the decoded raster to draw: pass a raster source through
    /// unchanged, decode a path or byte buffer otherwise. This is the sole
    /// integration point with the image codec.
    pub fn resolve_source(&self) -> Result<RgbaImage, CartelError> {
        if let Some(raster) = &self.raster {
            return Ok(raster.clone());
        }
        if let Some(path) = &self.path {
            return Ok(image::open(path)?.to_rgba8());
        }
        if let Some(bytes) = &self.bytes {
            return Ok(image::load_from_memory(bytes)?.to_rgba8());
        }
        Err(CartelError::InvalidConfiguration(
            "no image source set".into(),
        ))
    }

    pub fn render(&self, canvas: &mut Canvas, _style: &StyleContext) -> Result<(), CartelError> {
        let img = self.resolve_source()?;
        canvas.blit(&img, self.position.x as i64, self.position.y as i64);
        Ok(())
    }

    /// Point-based assets draw no guides.
    pub fn draw_guides(&self, _canvas: &mut Canvas, _show_dimensions: bool) {}
}
