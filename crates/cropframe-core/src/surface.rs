//! RGBA pixel surface shared by the decode, render and encode stages.

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An RGBA8 pixel buffer.
///
/// Surfaces play the role of a drawing canvas: rendering writes into one,
/// encoding reads from one. Areas that nothing was drawn into stay fully
/// transparent (`[0, 0, 0, 0]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl Surface {
    /// Create a new Surface with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create a Surface from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Read the pixel at (x, y). Returns `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.pixels[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid surface.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_creation() {
        let surface = Surface::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(surface.width, 100);
        assert_eq!(surface.height, 50);
        assert_eq!(surface.byte_size(), 20000);
        assert!(!surface.is_empty());
    }

    #[test]
    fn test_surface_empty() {
        let surface = Surface::new(0, 0, vec![]);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_transparent_surface() {
        let surface = Surface::transparent(3, 2);
        assert_eq!(surface.byte_size(), 24);
        assert!(surface.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pixel_lookup() {
        let mut surface = Surface::transparent(2, 2);
        surface.pixels[12..16].copy_from_slice(&[1, 2, 3, 4]);

        assert_eq!(surface.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 0), None);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let surface = Surface::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 128]);
        let img = surface.to_rgba_image().unwrap();
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0, 128]);

        let back = Surface::from_rgba_image(img);
        assert_eq!(back, surface);
    }
}
