//! # Drawable Assets
//!
//! Everything that can be placed on a poster: captions, images, QR codes
//! and maps. Assets share a uniform capability set — validate, render,
//! draw guides — dispatched over the closed [`Asset`] enum so the poster
//! can iterate its ordered list without caring which is which.

pub mod caption;
pub mod image;
pub mod map;
pub mod qrcode;

pub use self::caption::Caption;
pub use self::image::Image;
pub use self::map::Map;
pub use self::qrcode::{Encoding, ErrorCorrection, QrCode};

use ::image::Rgba;

use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::geometry::Area;
use crate::render::text::{self, Align};
use crate::typeface::{StyleContext, Typeface};

/// Define the Asset enum and its dispatch methods from a single list.
///
/// Adding a new asset kind: add one line here and give the struct the
/// uniform method set (validate/render/draw_guides + an id field on its
/// geometry).
macro_rules! define_assets {
    ($($variant:ident($inner:ty)),+ $(,)?) => {
        /// A drawable element placed on the poster.
        #[derive(Debug, Clone)]
        pub enum Asset {
            $($variant($inner),)+
        }

        impl Asset {
            /// Check the asset's declaration is complete and consistent.
            pub fn validate(&self) -> Result<(), CartelError> {
                match self { $(Asset::$variant(a) => a.validate(),)+ }
            }

            /// Draw the asset onto the canvas.
            pub fn render(
                &self,
                canvas: &mut Canvas,
                style: &StyleContext,
            ) -> Result<(), CartelError> {
                match self { $(Asset::$variant(a) => a.render(canvas, style),)+ }
            }

            /// Draw placement guides for the asset (no-op for point-based
            /// assets).
            pub fn draw_guides(&self, canvas: &mut Canvas, show_dimensions: bool) {
                match self { $(Asset::$variant(a) => a.draw_guides(canvas, show_dimensions),)+ }
            }
        }

        $(
            impl From<$inner> for Asset {
                fn from(inner: $inner) -> Self {
                    Asset::$variant(inner)
                }
            }
        )+
    };
}

define_assets! {
    Caption(Caption),
    Image(Image),
    QrCode(QrCode),
    Map(Map),
}

/// Draw placement guides for an area-based asset: a black border where the
/// rectangle is, and optionally its dimensions on a white patch so the
/// label stays readable over arbitrary content.
pub(crate) fn draw_area_guides(canvas: &mut Canvas, area: &Area, show_dimensions: bool) {
    let black = Rgba([0, 0, 0, 255]);
    let white = Rgba([255, 255, 255, 255]);

    canvas.outline_rect(
        area.x as i64,
        area.y as i64,
        area.width,
        area.height,
        black,
    );

    if !show_dimensions {
        return;
    }

    let mut label = String::new();
    if !area.id.is_empty() {
        label.push_str(&area.id);
        label.push_str(": ");
    }
    label.push_str(&format!(
        "x={},y={},w={},h={}",
        area.x, area.y, area.width, area.height
    ));

    let face = Typeface::dimensions();
    let (label_w, label_h) = text::measure(&face, &label);

    // White patch first so the black label is legible, then the label
    // inset by 2px to keep it off the border.
    canvas.fill_rect(area.x as i64, area.y as i64, label_w + 4, label_h + 4, white);
    text::draw_text(
        canvas,
        &label,
        &face,
        (area.x + 2, area.y + 2, label_w, label_h),
        Align::Start,
        Align::Start,
        false,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    #[test]
    fn from_impls_wrap_concrete_assets() {
        let asset: Asset = Caption::new("hi").into();
        assert!(matches!(asset, Asset::Caption(_)));

        let asset: Asset = Image::new().into();
        assert!(matches!(asset, Asset::Image(_)));

        let asset: Asset = QrCode::new("DATA").into();
        assert!(matches!(asset, Asset::QrCode(_)));

        let asset: Asset = Map::new().into();
        assert!(matches!(asset, Asset::Map(_)));
    }

    #[test]
    fn dispatch_reaches_concrete_validate() {
        let bad: Asset = Caption::new("").into();
        assert!(bad.validate().is_err());
        let good: Asset = Caption::new("x").into();
        assert!(good.validate().is_ok());
    }

    #[test]
    fn guides_outline_the_declared_rect() {
        let mut canvas = Canvas::blank(50, 50, BLUE);
        let area = Area::at(5, 5, 20, 10);
        draw_area_guides(&mut canvas, &area, false);
        assert_eq!(canvas.pixel(5, 5), BLACK);
        assert_eq!(canvas.pixel(24, 14), BLACK);
        // interior untouched without dimensions
        assert_eq!(canvas.pixel(10, 10), BLUE);
    }

    #[test]
    fn dimension_label_paints_a_white_patch() {
        let mut canvas = Canvas::blank(400, 100, BLUE);
        let area = Area::at(10, 10, 300, 60).id("#box");
        draw_area_guides(&mut canvas, &area, true);
        // Patch origin is the rect origin
        assert_eq!(canvas.pixel(10, 10), WHITE);
        // Some label ink exists within the patch
        let mut found_black = false;
        for y in 10..30u32 {
            for x in 10..300u32 {
                if canvas.pixel(x, y) == BLACK {
                    found_black = true;
                }
            }
        }
        assert!(found_black, "expected dimension label pixels");
    }

    #[test]
    fn point_assets_draw_no_guides() {
        let mut canvas = Canvas::blank(20, 20, BLUE);
        let asset: Asset = Image::new().top_left(2, 2).into();
        asset.draw_guides(&mut canvas, true);
        for y in 0..20u32 {
            for x in 0..20u32 {
                assert_eq!(canvas.pixel(x, y), BLUE);
            }
        }
    }
}
