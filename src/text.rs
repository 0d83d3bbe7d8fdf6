//! Label overlay drawn with the built-in 8x8 bitmap font.

use crate::error::TextError;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use ndarray::{s, Array2};

const GLYPH_SIZE: usize = 8;

/// Label rasterised at 1:1, cropped to its inked pixels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBitmap {
    pub mask: Array2<bool>,
}

impl LabelBitmap {
    pub fn width(&self) -> u32 {
        self.mask.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.mask.nrows() as u32
    }
}

/// Integer scale that brings the 8px font closest to `font_size` without exceeding it
pub fn font_scale(font_size: u32) -> u32 {
    (font_size / GLYPH_SIZE as u32).max(1)
}

/// Lay out `label` glyph by glyph and crop to the inked bounding box.
pub fn layout_label(label: &str) -> Result<LabelBitmap, TextError> {
    let glyphs = label
        .chars()
        .map(|c| BASIC_FONTS.get(c).ok_or(TextError::MissingGlyph(c)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut mask = Array2::from_elem((GLYPH_SIZE, GLYPH_SIZE * glyphs.len()), false);
    for (i, glyph) in glyphs.iter().enumerate() {
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // Bit 0 is the leftmost column
                mask[[row, i * GLYPH_SIZE + col]] = bits & (1u8 << col) != 0;
            }
        }
    }

    let (top, bottom, left, right) = mask
        .indexed_iter()
        .filter(|(_, &on)| on)
        .fold(None::<(usize, usize, usize, usize)>, |bounds, ((r, c), _)| match bounds {
            None => Some((r, r, c, c)),
            Some((top, bottom, left, right)) => {
                Some((top.min(r), bottom.max(r), left.min(c), right.max(c)))
            }
        })
        .ok_or(TextError::Empty)?;

    Ok(LabelBitmap {
        mask: mask.slice(s![top..=bottom, left..=right]).to_owned(),
    })
}

/// Stamp `label` centered on the canvas, shifted down by `vertical_bias`.
///
/// Nothing is drawn unless the whole label fits.
pub fn draw_label(
    canvas: &mut RgbImage,
    label: &str,
    font_size: u32,
    vertical_bias: u32,
    color: Rgb<u8>,
) -> Result<(), TextError> {
    let bitmap = layout_label(label)?;
    let scale = font_scale(font_size);
    let (canvas_width, canvas_height) = canvas.dimensions();

    let text_width = bitmap.width() * scale;
    let text_height = bitmap.height() * scale;
    let does_not_fit = TextError::DoesNotFit {
        width: text_width,
        height: text_height,
        canvas_width,
        canvas_height,
    };
    if text_width > canvas_width || text_height > canvas_height {
        return Err(does_not_fit);
    }

    let x0 = (canvas_width - text_width) / 2;
    let y0 = (canvas_height - text_height) / 2 + vertical_bias;
    if y0 + text_height > canvas_height {
        return Err(does_not_fit);
    }

    log::debug!(
        "label {:?}: scale {}, {}x{} at ({}, {})",
        label,
        scale,
        text_width,
        text_height,
        x0,
        y0
    );

    for ((row, col), _) in bitmap.mask.indexed_iter().filter(|(_, &on)| on) {
        let px = x0 + col as u32 * scale;
        let py = y0 + row as u32 * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                canvas.put_pixel(px + dx, py + dy, color);
            }
        }
    }

    Ok(())
}
