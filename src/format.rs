//! Output image formats supported when delivering a finished poster,
//! with their MIME types and file extensions.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::CartelError;

/// Set of supported output types when encoding a rendered poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImgFormat {
    Bmp,
    Gif,
    #[default]
    Jpeg,
    Png,
}

impl ImgFormat {
    /// Resolve a format from its name, case-insensitively.
    ///
    /// Unknown names fall back to JPEG rather than failing, so a garbled
    /// `type` request parameter still yields a downloadable poster.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bmp" | "bitmap" => Self::Bmp,
            "gif" => Self::Gif,
            "jpeg" | "jpg" => Self::Jpeg,
            "png" => Self::Png,
            _ => Self::default(),
        }
    }

    /// The codec identifier the `image` crate expects.
    pub fn to_image_format(self) -> ImageFormat {
        match self {
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }

    /// MIME type for an HTTP response carrying this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Bmp => "image/bmp",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extension (ensures the right application opens the download).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Encode a rendered poster into this format.
    pub fn encode(self, image: &RgbaImage) -> Result<Vec<u8>, CartelError> {
        let mut bytes = Cursor::new(Vec::new());
        match self {
            // The JPEG encoder has no alpha channel; flatten to RGB first
            Self::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                rgb.write_to(&mut bytes, ImageFormat::Jpeg)?;
            }
            _ => image.write_to(&mut bytes, self.to_image_format())?,
        }
        Ok(bytes.into_inner())
    }
}

/// Build the filename a user sees when downloading their poster.
///
/// With `avoid_caching` a random suffix is appended so repeated renders
/// of the same poster are not served from the browser cache.
pub fn build_filename(stem: &str, format: ImgFormat, avoid_caching: bool) -> String {
    if avoid_caching {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{stem}-{}.{}", &suffix[..8], format.extension())
    } else {
        format!("{stem}.{}", format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_case_insensitively() {
        assert_eq!(ImgFormat::from_name("PNG"), ImgFormat::Png);
        assert_eq!(ImgFormat::from_name("Gif"), ImgFormat::Gif);
        assert_eq!(ImgFormat::from_name("bitmap"), ImgFormat::Bmp);
        assert_eq!(ImgFormat::from_name("jpg"), ImgFormat::Jpeg);
    }

    #[test]
    fn from_name_falls_back_to_jpeg() {
        assert_eq!(ImgFormat::from_name(""), ImgFormat::Jpeg);
        assert_eq!(ImgFormat::from_name("webp"), ImgFormat::Jpeg);
        assert_eq!(ImgFormat::from_name("nonsense"), ImgFormat::Jpeg);
    }

    #[test]
    fn mime_and_extension_mappings() {
        assert_eq!(ImgFormat::Png.mime_type(), "image/png");
        assert_eq!(ImgFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImgFormat::Bmp.extension(), "bmp");
        assert_eq!(ImgFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn encode_png_roundtrips() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let bytes = ImgFormat::Png.encode(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(*decoded.get_pixel(0, 0), image::Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn encode_jpeg_accepts_rgba_input() {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([200, 100, 50, 255]));
        let bytes = ImgFormat::Jpeg.encode(&img).unwrap();
        assert!(!bytes.is_empty());
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn filename_without_cache_busting() {
        assert_eq!(
            build_filename("my-poster", ImgFormat::Png, false),
            "my-poster.png"
        );
    }

    #[test]
    fn filename_with_cache_busting_varies() {
        let a = build_filename("p", ImgFormat::Jpeg, true);
        let b = build_filename("p", ImgFormat::Jpeg, true);
        assert!(a.starts_with("p-") && a.ends_with(".jpg"));
        assert_ne!(a, b);
    }
}
