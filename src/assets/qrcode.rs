//! QR code asset: encodes data into a symbol and blits it onto the
//! template, one `scale`-sized block per module.

use image::{Rgba, RgbaImage};

use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::geometry::Area;
use crate::typeface::StyleContext;

/// How the QR payload is encoded. Narrower encodings pack more characters
/// into the same symbol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Byte,
    Alphanumeric,
    Numeric,
}

impl Encoding {
    /// Whether `data` is representable in this encoding.
    fn accepts(self, data: &str) -> bool {
        match self {
            Self::Byte => true,
            Self::Numeric => data.chars().all(|c| c.is_ascii_digit()),
            Self::Alphanumeric => data
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || " $%*+-./:".contains(c)),
        }
    }
}

/// Error-correction level: how much of the symbol can be damaged and
/// still scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }
}

/// A QR code placed on the poster.
///
/// The version picks the symbol's capacity tier (and module count,
/// `17 + 4 * version` per side); `scale` magnifies each module to that
/// many pixels.
#[derive(Debug, Clone)]
pub struct QrCode {
    pub area: Area,
    data: String,
    encoding: Encoding,
    error_correction: ErrorCorrection,
    scale: u32,
    version: i16,
}

impl Default for QrCode {
    fn default() -> Self {
        Self {
            area: Area::default(),
            data: String::new(),
            encoding: Encoding::Alphanumeric,
            error_correction: ErrorCorrection::H,
            scale: 15,
            version: 3,
        }
    }
}

impl QrCode {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Attach a diagnostic id, shown in guide labels.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.area.id = id.into();
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Where on the template the symbol should be drawn.
    pub fn top_left(mut self, x: i32, y: i32) -> Self {
        self.area.x = x;
        self.area.y = y;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    /// Pixel magnification per symbol module.
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Symbol version (capacity/size tier), 1..=40.
    pub fn version(mut self, version: i16) -> Self {
        self.version = version;
        self
    }

    pub fn validate(&self) -> Result<(), CartelError> {
        if self.data.is_empty() {
            return Err(CartelError::InvalidConfiguration(
                "no data has been specified to create a QR code from".into(),
            ));
        }
        if !self.encoding.accepts(&self.data) {
            return Err(CartelError::InvalidConfiguration(format!(
                "QR data is not representable in {:?} encoding",
                self.encoding
            )));
        }
        if self.scale == 0 {
            return Err(CartelError::InvalidConfiguration(
                "QR scale must be at least 1".into(),
            ));
        }
        if !(1..=40).contains(&self.version) {
            return Err(CartelError::InvalidConfiguration(format!(
                "QR version {} is outside 1..=40",
                self.version
            )));
        }
        Ok(())
    }

    /// Encode the data into a symbol raster. Capacity violations come back
    /// from the encoder and are propagated unchanged.
    pub fn symbol(&self) -> Result<RgbaImage, CartelError> {
        let code = qrcode::QrCode::with_version(
            self.data.as_bytes(),
            qrcode::Version::Normal(self.version),
            self.error_correction.to_ec_level(),
        )
        .map_err(|e| CartelError::Encoding(format!("QR code generation failed: {e}")))?;

        let modules = code.width();
        let scale = self.scale as usize;
        let side = (modules * scale) as u32;

        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let mut img = RgbaImage::from_pixel(side, side, white);

        for qy in 0..modules {
            for qx in 0..modules {
                if code[(qx, qy)] != qrcode::Color::Dark {
                    continue;
                }
                for cy in 0..scale {
                    for cx in 0..scale {
                        img.put_pixel(
                            (qx * scale + cx) as u32,
                            (qy * scale + cy) as u32,
                            black,
                        );
                    }
                }
            }
        }

        Ok(img)
    }

    pub fn render(&self, canvas: &mut Canvas, _style: &StyleContext) -> Result<(), CartelError> {
        let symbol = self.symbol()?;
        canvas.blit(&symbol, self.area.x as i64, self.area.y as i64);
        Ok(())
    }

    pub fn draw_guides(&self, canvas: &mut Canvas, show_dimensions: bool) {
        super::draw_area_guides(canvas, &self.area, show_dimensions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_fails_validation() {
        assert!(QrCode::new("").validate().is_err());
        assert!(QrCode::new("ABC123").validate().is_ok());
    }

    #[test]
    fn numeric_encoding_rejects_letters() {
        let qr = QrCode::new("12345").encoding(Encoding::Numeric);
        assert!(qr.validate().is_ok());
        let qr = QrCode::new("12A45").encoding(Encoding::Numeric);
        assert!(qr.validate().is_err());
    }

    #[test]
    fn alphanumeric_encoding_rejects_lowercase() {
        let qr = QrCode::new("HELLO-123 $%").encoding(Encoding::Alphanumeric);
        assert!(qr.validate().is_ok());
        let qr = QrCode::new("hello").encoding(Encoding::Alphanumeric);
        assert!(qr.validate().is_err());
    }

    #[test]
    fn byte_encoding_accepts_anything() {
        let qr = QrCode::new("hello, wörld!").encoding(Encoding::Byte);
        assert!(qr.validate().is_ok());
    }

    #[test]
    fn version_and_scale_bounds() {
        assert!(QrCode::new("A").version(0).validate().is_err());
        assert!(QrCode::new("A").version(41).validate().is_err());
        assert!(QrCode::new("A").scale(0).validate().is_err());
    }

    #[test]
    fn symbol_has_expected_size() {
        // Version 4 → 33 modules per side
        let qr = QrCode::new("ABC123").version(4).scale(20);
        let symbol = qr.symbol().unwrap();
        assert_eq!(symbol.dimensions(), (33 * 20, 33 * 20));
    }

    #[test]
    fn symbol_contains_both_colors() {
        let qr = QrCode::new("ABC123").version(4).scale(2);
        let symbol = qr.symbol().unwrap();
        let dark = symbol.pixels().filter(|p| p[0] == 0).count();
        let light = symbol.pixels().filter(|p| p[0] == 255).count();
        assert!(dark > 0 && light > 0);
    }

    #[test]
    fn capacity_overflow_is_an_encoding_error() {
        // Version 1 at EC level H holds very little; this payload cannot fit
        let qr = QrCode::new("A".repeat(200)).version(1).scale(1);
        assert!(qr.validate().is_ok());
        match qr.symbol() {
            Err(CartelError::Encoding(_)) => {}
            other => panic!("expected Encoding error, got {other:?}"),
        }
    }

    #[test]
    fn render_blits_at_top_left() {
        let style = StyleContext::default();
        let white = Rgba([255, 255, 255, 255]);
        let mut canvas = Canvas::blank(300, 300, white);
        let qr = QrCode::new("ABC123").version(4).scale(2).top_left(100, 100);
        qr.render(&mut canvas, &style).unwrap();

        // Finder pattern corner module is dark at the symbol origin
        assert_eq!(canvas.pixel(100, 100), Rgba([0, 0, 0, 255]));
        // Left of the symbol stays untouched
        assert_eq!(canvas.pixel(99, 100), white);
    }
}
