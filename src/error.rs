//! Error types for icon rendering

use thiserror::Error;

/// Errors that abort rendering an icon
#[derive(Error, Debug)]
pub enum IconError {
    /// Canvas cannot be created with this size
    #[error("invalid icon size: {0}")]
    InvalidSize(u32),

    /// Encoding or writing the PNG failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Writing the confirmation line failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the label overlay. These never abort a render.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextError {
    #[error("no glyph for character {0:?}")]
    MissingGlyph(char),

    #[error("label has no visible pixels")]
    Empty,

    #[error("label of {width}x{height} does not fit a {canvas_width}x{canvas_height} canvas")]
    DoesNotFit {
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },
}
