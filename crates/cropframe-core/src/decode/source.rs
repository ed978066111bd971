//! Source image decoding with EXIF orientation handling.
//!
//! Browsers display `<img>` sources with their EXIF orientation applied, so
//! crop coordinates picked on screen refer to the oriented image. Decoding
//! applies the same correction so natural dimensions line up with what the
//! crop widget reports.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::surface::Surface;

/// Decode a PNG or JPEG source from bytes into an RGBA surface, applying
/// EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails and
/// `DecodeError::EmptyImage` for zero-sized images.
pub fn decode_image(bytes: &[u8]) -> Result<Surface, DecodeError> {
    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let surface = Surface::from_rgba_image(apply_orientation(img, orientation).into_rgba8());
    if surface.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: surface.width,
            height: surface.height,
        });
    }

    log::debug!(
        "decoded source {}x{} ({:?})",
        surface.width,
        surface.height,
        orientation
    );
    Ok(surface)
}

/// Extract the EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
