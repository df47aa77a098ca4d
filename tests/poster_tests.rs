//! # End-to-End Poster Tests
//!
//! Exercise the full pipeline against real template files on disk:
//! decode → register → validate → draw → resize → encode.

use std::path::PathBuf;

use image::{DynamicImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

use cartel::assets::{Caption, Image, QrCode};
use cartel::builder::{Design, Poster};
use cartel::error::CartelError;
use cartel::format::ImgFormat;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Write a solid-white template PNG to a unique temp path.
fn write_template(width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "cartel-template-{}-{}x{}.png",
        uuid::Uuid::new_v4().simple(),
        width,
        height
    ));
    let img = RgbaImage::from_pixel(width, height, WHITE);
    img.save(&path).expect("failed to write template");
    path
}

/// Count pixels clearly darker than the white template. The tolerance
/// absorbs resampling rounding without masking real ink.
fn ink_in_region(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
    let mut n = 0;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            let px = img.get_pixel(x, y);
            if px.0[..3].iter().any(|&c| c < 247) {
                n += 1;
            }
        }
    }
    n
}

struct HelloCaption;

impl Design for HelloCaption {
    fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
        poster.add(Caption::new("HELLO").top_left(10, 10));
        Ok(())
    }
}

#[test]
fn caption_poster_at_half_size() {
    let template = write_template(1000, 1000);
    let poster = Poster::from_template(&template)
        .unwrap()
        .percent_size(50);
    let out = poster.render(&HelloCaption).unwrap();

    // floor(1000 * 50/100) on both axes
    assert_eq!(out.dimensions(), (500, 500));

    // "HELLO" started at (10, 10) pre-resize, so its ink lands around
    // (5, 5) in the halved output
    assert!(
        ink_in_region(&out, 0, 0, 120, 30) > 0,
        "expected caption ink near the scaled position"
    );
    // Areas far from the caption stay untouched, and no guide borders
    // appear anywhere (show_guides defaults to off)
    assert_eq!(ink_in_region(&out, 250, 250, 500, 500), 0);

    std::fs::remove_file(template).ok();
}

#[test]
fn qr_poster_blits_at_position() {
    let template = write_template(1200, 1200);
    let mut poster = Poster::from_template(&template).unwrap();
    poster.add(QrCode::new("ABC123").top_left(100, 100).scale(20).version(4));
    let out = poster.finish().unwrap();

    // Symbol top-left module (finder pattern) is dark exactly at (100, 100)
    assert_eq!(*out.get_pixel(100, 100), Rgba([0, 0, 0, 255]));
    // Nothing is drawn left of or above the symbol
    assert_eq!(ink_in_region(&out, 0, 0, 100, 1200), 0);
    assert_eq!(ink_in_region(&out, 0, 0, 1200, 100), 0);
    // Version 4 at scale 20: 33 modules * 20px = 660px square
    assert_eq!(*out.get_pixel(100 + 659, 100), Rgba([0, 0, 0, 255]));
    assert_eq!(ink_in_region(&out, 100 + 660, 100, 1200, 760), 0);

    std::fs::remove_file(template).ok();
}

#[test]
fn empty_qr_data_fails_before_any_draw() {
    let template = write_template(200, 200);
    let mut poster = Poster::from_template(&template).unwrap();
    poster.add(QrCode::new("").top_left(10, 10));
    match poster.finish() {
        Err(CartelError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
    std::fs::remove_file(template).ok();
}

#[test]
fn overlapping_assets_draw_in_registration_order() {
    let template = write_template(50, 50);
    let red = RgbaImage::from_pixel(20, 20, Rgba([255, 0, 0, 255]));
    let green = RgbaImage::from_pixel(20, 20, Rgba([0, 255, 0, 255]));

    let mut poster = Poster::from_template(&template).unwrap();
    poster.add(Image::new().source_raster(red).top_left(0, 0));
    poster.add(Image::new().source_raster(green).top_left(10, 10));
    let out = poster.finish().unwrap();

    assert_eq!(*out.get_pixel(15, 15), Rgba([0, 255, 0, 255]));
    assert_eq!(*out.get_pixel(5, 5), Rgba([255, 0, 0, 255]));

    std::fs::remove_file(template).ok();
}

#[test]
fn one_bad_asset_means_nothing_renders() {
    let template = write_template(50, 50);
    let mut poster = Poster::from_template(&template).unwrap();
    poster.add(Image::new().source_raster(RgbaImage::from_pixel(5, 5, Rgba([255, 0, 0, 255]))));
    poster.add(Caption::new("")); // invalid among valid
    assert!(poster.finish().is_err());
    std::fs::remove_file(template).ok();
}

#[test]
fn guide_borders_appear_only_when_requested() {
    let template = write_template(200, 100);
    let caption = Caption::new("X").id("#x").rect(20, 20, 100, 50);

    let mut plain = Poster::from_template(&template).unwrap();
    plain.add(caption.clone());
    let out_plain = plain.finish().unwrap();

    let mut guided = Poster::from_template(&template)
        .unwrap()
        .show_guides(true)
        .show_dimensions(true);
    guided.add(caption);
    let out_guided = guided.finish().unwrap();

    // Bottom-right border corner of the declared rect
    assert_eq!(*out_guided.get_pixel(119, 69), Rgba([0, 0, 0, 255]));
    assert_eq!(*out_plain.get_pixel(119, 69), WHITE);
    // The dimensions patch paints white-over at the rect origin and ink
    // somewhere within it
    assert!(ink_in_region(&out_guided, 22, 22, 119, 40) > 0);

    std::fs::remove_file(template).ok();
}

#[test]
fn rendered_poster_encodes_to_every_format() {
    let template = write_template(40, 30);
    let mut poster = Poster::from_template(&template).unwrap();
    poster.add(Caption::new("ok").top_left(2, 2));
    let out = poster.finish().unwrap();

    for format in [ImgFormat::Png, ImgFormat::Jpeg, ImgFormat::Gif, ImgFormat::Bmp] {
        let bytes = format.encode(&out).unwrap();
        assert!(!bytes.is_empty(), "{format:?} produced no bytes");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 40, "{format:?} lost dimensions");
    }

    std::fs::remove_file(template).ok();
}

#[test]
fn template_decode_failure_is_invalid_configuration() {
    let path = std::env::temp_dir().join(format!(
        "cartel-not-an-image-{}.png",
        uuid::Uuid::new_v4().simple()
    ));
    std::fs::write(&path, b"definitely not a PNG").unwrap();
    match Poster::from_template(&path) {
        Err(CartelError::InvalidConfiguration(_)) => {}
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
    std::fs::remove_file(path).ok();
}

#[test]
fn design_hook_runs_against_the_template_canvas() {
    struct FullBleed;
    impl Design for FullBleed {
        fn register(&self, poster: &mut Poster) -> Result<(), CartelError> {
            // The design can lay out against the canvas dimensions
            let w = poster.width();
            let h = poster.height();
            poster.add(
                Image::new()
                    .source_raster(RgbaImage::from_pixel(w, h, Rgba([0, 0, 255, 255])))
                    .top_left(0, 0),
            );
            Ok(())
        }
    }

    let template = write_template(30, 20);
    let out = Poster::from_template(&template)
        .unwrap()
        .render(&FullBleed)
        .unwrap();
    assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
    assert_eq!(*out.get_pixel(29, 19), Rgba([0, 0, 255, 255]));

    std::fs::remove_file(template).ok();
}

#[test]
fn decoded_template_variant_skips_the_filesystem() {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, WHITE));
    let out = Poster::from_image(img).render(&HelloCaption).unwrap();
    assert_eq!(out.dimensions(), (10, 10));
}
