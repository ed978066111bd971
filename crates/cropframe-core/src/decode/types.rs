//! Decode errors and the EXIF orientation tag.

use thiserror::Error;

/// Why a source could not be turned into a surface.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Neither PNG nor JPEG.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The bytes looked like a known format but did not decode.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    #[error("Decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// How the camera was held, per the EXIF `Orientation` tag.
///
/// The discriminants are the tag values. Anything outside 1 to 8 reads as
/// [`Orientation::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Mirrored across the top-left to bottom-right diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirrored across the top-right to bottom-left diagonal.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(tag: u32) -> Self {
        match tag {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}
