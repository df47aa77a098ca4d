//! # Poster Builder
//!
//! Takes an existing designed image and draws details dynamically onto the
//! surface: start with a template image, add captions, images, QR codes and
//! maps configured for one user, and hand back the finished raster.
//!
//! One render walks a fixed pipeline: load the template into a working
//! canvas, let a [`Design`] register its assets, validate everything,
//! draw each asset in registration order (guides interleaved when enabled),
//! then optionally rescale. A validation or render failure aborts the whole
//! render — a partially drawn canvas is never returned as the answer.
//!
//! ```no_run
//! use cartel::builder::{Design, Poster};
//! use cartel::assets::Caption;
//! use cartel::error::CartelError;
//!
//! struct Hello;
//!
//! impl Design for Hello {
//!     fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
//!         poster.add(Caption::new("HELLO").top_left(10, 10));
//!         Ok(())
//!     }
//! }
//!
//! let poster = Poster::from_template("template.jpg")?.percent_size(50);
//! let raster = poster.render(&Hello)?;
//! # Ok::<(), CartelError>(())
//! ```

use std::path::PathBuf;

use image::{DynamicImage, RgbaImage};

use crate::assets::Asset;
use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::typeface::{StyleContext, Typeface};

/// Full-sized output: 100% of the template's dimensions.
pub const FULL_SIZE: u32 = 100;

/// Entry point for defining what and where should be drawn.
///
/// A design is configuration data: given a poster, it registers the
/// ordered asset list for one render. The poster calls it exactly once,
/// before validating.
pub trait Design {
    fn register(&self, poster: &mut Poster) -> Result<(), CartelError>;
}

/// Owns the working canvas and the ordered asset list, and runs the
/// validate → render → guides → resize pipeline.
///
/// Registration order is draw order: the first asset added is drawn first
/// and ends up bottom-most wherever assets overlap.
#[derive(Debug, Clone)]
pub struct Poster {
    template_path: PathBuf,
    canvas: Canvas,
    percent_size: u32,
    show_guides: bool,
    show_dimensions: bool,
    style: StyleContext,
    assets: Vec<Asset>,
}

impl Poster {
    /// Load a template and copy it into a private working canvas.
    ///
    /// Fails with `InvalidConfiguration` when the path is empty or does
    /// not resolve to a decodable image.
    pub fn from_template(path: impl Into<PathBuf>) -> Result<Self, CartelError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(CartelError::InvalidConfiguration(
                "no template filename has been supplied".into(),
            ));
        }
        let canvas = Canvas::from_template(&path)?;
        Ok(Self::with_canvas(path, canvas))
    }

    /// Start from an already-decoded template image.
    pub fn from_image(template: DynamicImage) -> Self {
        Self::with_canvas(PathBuf::new(), Canvas::from_image(template))
    }

    fn with_canvas(template_path: PathBuf, canvas: Canvas) -> Self {
        Self {
            template_path,
            canvas,
            percent_size: FULL_SIZE,
            show_guides: false,
            show_dimensions: false,
            style: StyleContext::default(),
            assets: Vec::new(),
        }
    }

    /// Size of the output relative to the template, as a percentage.
    /// 50 halves the dimensions, 200 doubles them.
    pub fn percent_size(mut self, percent: u32) -> Self {
        self.percent_size = percent;
        self
    }

    /// Draw a border around each area-based asset, useful for working out
    /// where rectangles will land.
    pub fn show_guides(mut self, on: bool) -> Self {
        self.show_guides = on;
        self
    }

    /// With guides on, also print each area's id and dimensions.
    pub fn show_dimensions(mut self, on: bool) -> Self {
        self.show_dimensions = on;
        self
    }

    /// Default typeface for captions that don't carry one. Applies to the
    /// whole render; set it before calling [`Poster::render`].
    pub fn default_typeface(mut self, typeface: Typeface) -> Self {
        self.style.typeface = typeface;
        self
    }

    /// In-place variant of [`Poster::default_typeface`], for designs that
    /// set render-wide defaults from inside their registration hook.
    pub fn set_default_typeface(&mut self, typeface: Typeface) {
        self.style.typeface = typeface;
    }

    /// Register an asset. Called by designs (or directly) — order matters.
    pub fn add(&mut self, asset: impl Into<Asset>) -> &mut Self {
        self.assets.push(asset.into());
        self
    }

    pub fn template_path(&self) -> &std::path::Path {
        &self.template_path
    }

    /// Working canvas width, for designs that lay out against it.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Working canvas height, for designs that lay out against it.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Validate the render parameters and every registered asset, in
    /// order. The first failure aborts: nothing gets drawn if any asset
    /// is invalid.
    pub fn validate(&self) -> Result<(), CartelError> {
        if self.percent_size == 0 {
            return Err(CartelError::InvalidConfiguration(
                "percent size must be at least 1".into(),
            ));
        }
        for asset in &self.assets {
            asset.validate()?;
        }
        Ok(())
    }

    /// Run the full pipeline with a design providing the assets.
    pub fn render(mut self, design: &dyn Design) -> Result<RgbaImage, CartelError> {
        design.register(&mut self)?;
        self.finish()
    }

    /// Run the pipeline over the assets already registered via
    /// [`Poster::add`].
    pub fn finish(mut self) -> Result<RgbaImage, CartelError> {
        self.validate()?;

        for asset in &self.assets {
            asset.render(&mut self.canvas, &self.style)?;
            if self.show_guides {
                // Guides interleave with content so later assets can draw
                // over earlier guides, same as they do over earlier content.
                asset.draw_guides(&mut self.canvas, self.show_dimensions);
            }
        }

        let canvas = if self.percent_size != FULL_SIZE {
            self.canvas.resize_percent(self.percent_size)
        } else {
            self.canvas
        };

        Ok(canvas.into_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Caption, Image};
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

    fn blank_poster(w: u32, h: u32) -> Poster {
        Poster::from_image(DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, WHITE)))
    }

    #[test]
    fn empty_template_path_fails() {
        assert!(matches!(
            Poster::from_template(""),
            Err(CartelError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn missing_template_fails() {
        assert!(Poster::from_template("/no/such/template.png").is_err());
    }

    #[test]
    fn render_order_is_registration_order() {
        let mut poster = blank_poster(10, 10);
        poster.add(Image::new().source_raster(RgbaImage::from_pixel(4, 4, RED)).top_left(0, 0));
        poster.add(Image::new().source_raster(RgbaImage::from_pixel(4, 4, GREEN)).top_left(2, 2));
        let out = poster.finish().unwrap();
        // Overlap region: the later asset's pixels win
        assert_eq!(*out.get_pixel(2, 2), GREEN);
        assert_eq!(*out.get_pixel(3, 3), GREEN);
        // Non-overlapping part of the first asset survives
        assert_eq!(*out.get_pixel(0, 0), RED);
    }

    #[test]
    fn one_invalid_asset_aborts_before_any_draw() {
        let mut poster = blank_poster(10, 10);
        poster.add(Image::new().source_raster(RgbaImage::from_pixel(4, 4, RED)).top_left(0, 0));
        poster.add(Caption::new("")); // invalid: empty text
        let err = poster.finish();
        assert!(matches!(err, Err(CartelError::InvalidConfiguration(_))));
    }

    #[test]
    fn validation_runs_before_any_render() {
        // The first asset would fail at render time (missing file); the
        // second fails validation. Fail-fast validation means the caption
        // error surfaces and the filesystem is never touched.
        let mut poster = blank_poster(4, 4);
        poster.add(Image::new().source_path("/no/such/file.png"));
        poster.add(Caption::new(""));
        match poster.finish() {
            Err(CartelError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("text"), "expected the caption validation error, got: {msg}")
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn percent_size_scales_output() {
        let poster = blank_poster(1000, 500).percent_size(50);
        let out = poster.finish().unwrap();
        assert_eq!(out.dimensions(), (500, 250));
    }

    #[test]
    fn percent_size_floors() {
        let poster = blank_poster(101, 33).percent_size(50);
        let out = poster.finish().unwrap();
        assert_eq!(out.dimensions(), (50, 16));
    }

    #[test]
    fn full_size_leaves_dimensions_unchanged() {
        let poster = blank_poster(123, 77);
        let out = poster.finish().unwrap();
        assert_eq!(out.dimensions(), (123, 77));
    }

    #[test]
    fn zero_percent_fails_validation() {
        let poster = blank_poster(8, 8).percent_size(0);
        assert!(poster.finish().is_err());
    }

    #[test]
    fn design_hook_registers_assets() {
        struct TwoSquares;
        impl Design for TwoSquares {
            fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
                poster.add(Image::new().source_raster(RgbaImage::from_pixel(2, 2, RED)).top_left(0, 0));
                poster.add(Image::new().source_raster(RgbaImage::from_pixel(2, 2, GREEN)).top_left(1, 1));
                Ok(())
            }
        }
        let out = blank_poster(6, 6).render(&TwoSquares).unwrap();
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(1, 1), GREEN);
    }

    #[test]
    fn design_error_aborts_render() {
        struct Broken;
        impl Design for Broken {
            fn register(&self, _poster: &mut Poster) -> Result<(), CartelError> {
                Err(CartelError::InvalidConfiguration("bad design".into()))
            }
        }
        assert!(blank_poster(6, 6).render(&Broken).is_err());
    }

    #[test]
    fn guides_draw_only_when_enabled() {
        let caption = Caption::new("X").rect(2, 2, 20, 10);

        let mut plain = blank_poster(40, 20);
        plain.add(caption.clone());
        let out_plain = plain.finish().unwrap();

        let mut guided = blank_poster(40, 20).show_guides(true);
        guided.add(caption);
        let out_guided = guided.finish().unwrap();

        // The guide border paints the rect corner black only when enabled
        assert_eq!(*out_guided.get_pixel(2, 2), Rgba([0, 0, 0, 255]));
        assert_ne!(*out_plain.get_pixel(21, 2), Rgba([0, 0, 0, 255]));
        assert_eq!(*out_guided.get_pixel(21, 2), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn default_typeface_feeds_plain_captions() {
        use crate::render::text;
        let face = Typeface::new().size(48.0);
        let (w, h) = text::measure(&face, "AB");

        let mut poster = blank_poster(400, 100).default_typeface(face);
        poster.add(Caption::new("AB").top_left(0, 0));
        let style = poster.style.clone();
        match &poster.assets()[0] {
            Asset::Caption(c) => {
                assert_eq!(c.draw_rect(&style), (0, 0, w, h));
            }
            _ => unreachable!(),
        }
    }
}
