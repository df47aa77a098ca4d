//! Text style descriptor: font family, pixel size, color and decoration
//! flags, plus the render-time defaults a poster hands to captions that
//! carry no explicit style.

use image::Rgba;

use crate::error::CartelError;

/// Decoration flags, independently toggleable.
///
/// Setters take an explicit on/off so turning a flag "off" always clears
/// it, regardless of its current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

/// What rendering attributes to use when drawing a piece of text:
/// font, color, size, bold, underline, and so on.
///
/// Most setters return `self` so styles read fluently:
///
/// ```
/// use cartel::typeface::Typeface;
///
/// let face = Typeface::named("Trebuchet MS")
///     .size(35.0)
///     .bold(true)
///     .color_hex("#a56bdb")
///     .unwrap();
/// assert!(face.flags.bold);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Typeface {
    /// Requested family name. Recorded as given; rasterization maps it
    /// onto the bundled bitmap faces (see `render::text`).
    pub font_name: String,
    /// Glyph height in pixels. Must be positive.
    pub size: f32,
    pub color: Rgba<u8>,
    pub flags: StyleFlags,
}

impl Default for Typeface {
    fn default() -> Self {
        Self {
            font_name: StyleContext::DEFAULT_FONT_NAME.to_string(),
            size: StyleContext::DEFAULT_FONT_SIZE,
            color: Rgba([0, 0, 0, 255]),
            flags: StyleFlags::default(),
        }
    }
}

impl Typeface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default attributes with the given family name.
    pub fn named(font_name: impl Into<String>) -> Self {
        Self {
            font_name: font_name.into(),
            ..Self::default()
        }
    }

    /// The small monospace face used for guide dimension labels.
    pub fn dimensions() -> Self {
        Self::named("monospace").size(12.0)
    }

    pub fn font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Glyph height in pixels.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    /// Set the color from hex notation (`#rgb` or `#rrggbb`).
    pub fn color_hex(self, hex: &str) -> Result<Self, CartelError> {
        let color = parse_hex_color(hex)?;
        Ok(self.color(color))
    }

    pub fn bold(mut self, on: bool) -> Self {
        self.flags.bold = on;
        self
    }

    pub fn italic(mut self, on: bool) -> Self {
        self.flags.italic = on;
        self
    }

    pub fn underline(mut self, on: bool) -> Self {
        self.flags.underline = on;
        self
    }

    pub fn strikeout(mut self, on: bool) -> Self {
        self.flags.strikeout = on;
        self
    }
}

/// Default style values a poster applies to captions without an explicit
/// typeface. Held by the poster as a plain value: set it before rendering
/// and every fallback caption in that render sees the same defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContext {
    pub typeface: Typeface,
}

impl StyleContext {
    pub const DEFAULT_FONT_NAME: &'static str = "Trebuchet MS";
    pub const DEFAULT_FONT_SIZE: f32 = 24.0;

    /// The typeface a caption with no explicit style resolves to.
    pub fn default_typeface(&self) -> Typeface {
        self.typeface.clone()
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            typeface: Typeface::default(),
        }
    }
}

/// Parse a `#rgb` or `#rrggbb` hex color into an opaque RGBA value.
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, CartelError> {
    let digits = hex.strip_prefix('#').ok_or_else(|| {
        CartelError::InvalidConfiguration(format!("color '{hex}' must start with '#'"))
    })?;

    let parse = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| {
            CartelError::InvalidConfiguration(format!("'{hex}' is not a valid hex color"))
        })
    };

    match digits.len() {
        3 => {
            let mut parts = [0u8; 3];
            for (i, ch) in digits.chars().enumerate() {
                let v = parse(&ch.to_string())?;
                parts[i] = v * 16 + v;
            }
            Ok(Rgba([parts[0], parts[1], parts[2], 255]))
        }
        6 => Ok(Rgba([
            parse(&digits[0..2])?,
            parse(&digits[2..4])?,
            parse(&digits[4..6])?,
            255,
        ])),
        _ => Err(CartelError::InvalidConfiguration(format!(
            "'{hex}' is not a valid hex color"
        ))),
    }
}
