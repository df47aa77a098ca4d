//! Text asset: draws a caption in a given font, color and size, either
//! inside an explicit rectangle or in a rectangle computed from the text.

use crate::canvas::Canvas;
use crate::error::CartelError;
use crate::geometry::Area;
use crate::render::text::{self, Align};
use crate::typeface::{StyleContext, Typeface};

/// A piece of text placed on the poster.
///
/// ```
/// use cartel::assets::Caption;
/// use cartel::render::text::Align;
///
/// let caption = Caption::new("WHEN?")
///     .id("#whenTitle")
///     .rect(0, 1200, 2480, 125)
///     .h_align(Align::Center);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Caption {
    pub area: Area,
    text: String,
    typeface: Option<Typeface>,
    h_align: Align,
    v_align: Align,
}

impl Caption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Attach a diagnostic id, shown in guide labels.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.area.id = id.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Place the caption at a point and let the text size the rectangle.
    /// Any previously set width/height is discarded.
    pub fn top_left(mut self, x: i32, y: i32) -> Self {
        self.area.x = x;
        self.area.y = y;
        self.area.width = 0;
        self.area.height = 0;
        self
    }

    /// Place the caption in an explicit rectangle; alignment applies.
    pub fn rect(mut self, x: i32, y: i32, width: u32, height: u32) -> Self {
        self.area = self.area.rect(x, y, width, height);
        self
    }

    /// Place from a 4-element slice `[x, y, width, height]`.
    pub fn rect_slice(mut self, rect: &[i32]) -> Result<Self, CartelError> {
        let id = std::mem::take(&mut self.area.id);
        self.area = Area::from_slice(rect)?.id(id);
        Ok(self)
    }

    /// Use a specific typeface instead of the poster default.
    pub fn typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = Some(typeface);
        self
    }

    pub fn h_align(mut self, align: Align) -> Self {
        self.h_align = align;
        self
    }

    pub fn v_align(mut self, align: Align) -> Self {
        self.v_align = align;
        self
    }

    /// True when no explicit rectangle was given and the drawn rectangle
    /// degenerates to the measured text size. Alignment has no observable
    /// effect in this mode.
    pub fn auto_size(&self) -> bool {
        self.area.width == 0 && self.area.height == 0
    }

    pub fn validate(&self) -> Result<(), CartelError> {
        if self.text.is_empty() {
            return Err(CartelError::InvalidConfiguration(
                "no text has been defined for the caption".into(),
            ));
        }
        Ok(())
    }

    /// The rectangle the caption will draw into under the given defaults.
    pub fn draw_rect(&self, style: &StyleContext) -> (i32, i32, u32, u32) {
        if self.auto_size() {
            let face = self.resolve_typeface(style);
            let (w, h) = text::measure(&face, &self.text);
            (self.area.x, self.area.y, w, h)
        } else {
            self.area.to_rect()
        }
    }

    fn resolve_typeface(&self, style: &StyleContext) -> Typeface {
        self.typeface
            .clone()
            .unwrap_or_else(|| style.default_typeface())
    }

    pub fn render(&self, canvas: &mut Canvas, style: &StyleContext) -> Result<(), CartelError> {
        let face = self.resolve_typeface(style);
        let rect = self.draw_rect(style);
        // Fixed rectangles wrap and align; an auto-sized rectangle equals
        // the content so alignment cannot move anything.
        let wrap = !self.auto_size();
        text::draw_text(canvas, &self.text, &face, rect, self.h_align, self.v_align, wrap);
        Ok(())
    }

    pub fn draw_guides(&self, canvas: &mut Canvas, show_dimensions: bool) {
        super::draw_area_guides(canvas, &self.area, show_dimensions);
    }
}
