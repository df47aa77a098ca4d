//! Bitmap text rendering using the Spleen font family.
//!
//! Glyphs come from the bundled PSF2 fonts (6x12, 8x16, 12x24) and are
//! integer-scaled to the requested pixel size. Decorations are synthetic:
//! bold is a double-strike, italic a row shear, underline and strikeout
//! are drawn rules across the line advance.

use spleen_font::{FONT_6X12, FONT_8X16, FONT_12X24, PSF2Font};

use crate::canvas::Canvas;
use crate::typeface::Typeface;

/// Alignment of text within a fixed rectangle, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// A typeface resolved against the bundled bitmap fonts: a base PSF2 font
/// plus the integer scale that best approximates the requested pixel size.
#[derive(Clone, Copy)]
pub struct ResolvedFont {
    data: &'static [u8],
    base_width: usize,
    base_height: usize,
    scale: usize,
}

impl ResolvedFont {
    /// Pick the base font and scale whose cell height lands closest to the
    /// requested size, preferring the larger base on ties.
    pub fn resolve(face: &Typeface) -> Self {
        let target = face.size.round().max(1.0) as usize;

        let mut best: Option<(usize, Self)> = None;
        for &(data, w, h) in &[
            (FONT_12X24, 12usize, 24usize),
            (FONT_8X16, 8, 16),
            (FONT_6X12, 6, 12),
        ] {
            let scale = ((target as f32 / h as f32).round() as usize).max(1);
            let err = target.abs_diff(h * scale);
            let candidate = Self {
                data,
                base_width: w,
                base_height: h,
                scale,
            };
            // Candidates are ordered largest base first, so strict `<`
            // keeps the larger base on ties.
            if best.as_ref().is_none_or(|(e, _)| err < *e) {
                best = Some((err, candidate));
            }
        }
        best.unwrap().1
    }

    /// Horizontal advance per character, in pixels.
    pub fn char_width(&self) -> u32 {
        (self.base_width * self.scale) as u32
    }

    /// Line height, in pixels.
    pub fn line_height(&self) -> u32 {
        (self.base_height * self.scale) as u32
    }

    /// Extra width the italic shear adds to a line.
    fn italic_slant(&self, italic: bool) -> u32 {
        if italic { self.line_height() / 4 } else { 0 }
    }

    /// Width of a single line (no newlines) under the given flags.
    fn line_width(&self, line: &str, italic: bool) -> u32 {
        let chars = line.chars().count() as u32;
        chars * self.char_width() + self.italic_slant(italic)
    }

    /// Rasterize one character into a base-resolution bitmap
    /// (`base_width * base_height` bytes, 1 = inked).
    fn glyph(&self, ch: char) -> Vec<u8> {
        let mut bitmap = vec![0u8; self.base_width * self.base_height];
        // Static font data; parsing it cannot fail.
        let mut font = PSF2Font::new(self.data).unwrap();
        let utf8 = ch.to_string();

        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    let idx = row_y * self.base_width + col_x;
                    if on && idx < bitmap.len() {
                        bitmap[idx] = 1;
                    }
                }
            }
        } else {
            // Unknown character: draw a box
            draw_box(&mut bitmap, self.base_width, self.base_height);
        }

        bitmap
    }
}

/// Draw a box outline in a glyph buffer (fallback for missing characters).
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

/// Measure `text` under `face` without wrapping: explicit newlines split
/// lines, width is the widest line, height is line count times line height.
pub fn measure(face: &Typeface, text: &str) -> (u32, u32) {
    let font = ResolvedFont::resolve(face);
    let mut width = 0u32;
    let mut lines = 0u32;
    for line in text.split('\n') {
        width = width.max(font.line_width(line, face.flags.italic));
        lines += 1;
    }
    (width, lines.max(1) * font.line_height())
}

/// Greedy word-wrap of one paragraph to `max_chars` characters per line.
/// Words longer than a line are hard-broken.
fn wrap_paragraph(paragraph: &str, max_chars: usize, out: &mut Vec<String>) {
    let max_chars = max_chars.max(1);
    let start_len = out.len();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= max_chars {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        if current_len > 0 {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            // Hard-break an over-long word
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == max_chars {
                    out.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
        }
    }

    // Emit the remainder; an empty paragraph still takes up one line
    if !current.is_empty() || out.len() == start_len {
        out.push(current);
    }
}

/// Draw `text` into `rect` on the canvas.
///
/// When `wrap` is set each paragraph is word-wrapped to the rectangle
/// width and all painting clips to the rectangle; alignment places the
/// wrapped block inside it. Auto-sized callers pass the measured rectangle
/// and `wrap = false`, making alignment a no-op.
pub fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    face: &Typeface,
    rect: (i32, i32, u32, u32),
    h_align: Align,
    v_align: Align,
    wrap: bool,
) {
    let font = ResolvedFont::resolve(face);
    let (rx, ry, rw, rh) = rect;
    let italic = face.flags.italic;

    let lines: Vec<String> = if wrap {
        let slack = font.italic_slant(italic);
        let usable = rw.saturating_sub(slack).max(font.char_width());
        let max_chars = (usable / font.char_width()).max(1) as usize;
        let mut wrapped = Vec::new();
        for paragraph in text.split('\n') {
            wrap_paragraph(paragraph, max_chars, &mut wrapped);
        }
        wrapped
    } else {
        text.split('\n').map(str::to_string).collect()
    };

    let line_height = font.line_height() as i64;
    let block_height = lines.len() as i64 * line_height;
    let y0 = ry as i64
        + match v_align {
            Align::Start => 0,
            Align::Center => (rh as i64 - block_height) / 2,
            Align::End => rh as i64 - block_height,
        };

    let clip = (rx as i64, ry as i64, rw as i64, rh as i64);

    for (i, line) in lines.iter().enumerate() {
        let line_width = font.line_width(line, italic) as i64;
        let x0 = rx as i64
            + match h_align {
                Align::Start => 0,
                Align::Center => (rw as i64 - line_width) / 2,
                Align::End => rw as i64 - line_width,
            };
        let line_y = y0 + i as i64 * line_height;
        draw_line(canvas, line, face, &font, x0, line_y, clip);
    }
}

/// Paint one laid-out line of glyphs plus its decoration rules.
fn draw_line(
    canvas: &mut Canvas,
    line: &str,
    face: &Typeface,
    font: &ResolvedFont,
    x0: i64,
    y0: i64,
    clip: (i64, i64, i64, i64),
) {
    let scale = font.scale as i64;
    let cell_w = font.char_width() as i64;
    let cell_h = font.line_height() as i64;
    let slant_total = font.italic_slant(face.flags.italic) as i64;
    let strike_offset = if face.flags.bold { (scale / 3).max(1) } else { 0 };

    let mut put = |x: i64, y: i64| {
        let (cx, cy, cw, ch) = clip;
        if x < cx || y < cy || x >= cx + cw || y >= cy + ch {
            return;
        }
        canvas.put_pixel_clipped(x, y, face.color);
    };

    for (ci, ch) in line.chars().enumerate() {
        let glyph = font.glyph(ch);
        let glyph_x = x0 + ci as i64 * cell_w;

        for py in 0..cell_h {
            // Shear: upper rows shift right, tapering to zero at the bottom
            let shear = if slant_total > 0 {
                slant_total * (cell_h - 1 - py) / cell_h
            } else {
                0
            };
            let src_y = (py / scale) as usize;
            for px in 0..cell_w {
                let src_x = (px / scale) as usize;
                if glyph[src_y * font.base_width + src_x] == 0 {
                    continue;
                }
                let x = glyph_x + px + shear;
                let y = y0 + py;
                put(x, y);
                if strike_offset > 0 {
                    put(x + strike_offset, y);
                }
            }
        }
    }

    // Decoration rules span the full advance of the line
    let line_width = font.line_width(line, face.flags.italic) as i64;
    let thickness = (scale / 2).max(1);
    if face.flags.underline {
        for y in (y0 + cell_h - thickness)..(y0 + cell_h) {
            for x in x0..(x0 + line_width) {
                put(x, y);
            }
        }
    }
    if face.flags.strikeout {
        let mid = y0 + cell_h / 2 - thickness / 2;
        for y in mid..(mid + thickness) {
            for x in x0..(x0 + line_width) {
                put(x, y);
            }
        }
    }
}
