//! Decoded, uncompressed pixel buffers

use crate::{Error, Result};

/// Number of color components carried by every [`RawImage`]
pub const RGB_COMPONENTS: usize = 3;

/// An uncompressed RGB image, tightly packed, rows top to bottom
///
/// A `RawImage` has exactly one owner. It is handed by value to whatever
/// uploads it to the GPU and is dropped once the upload is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RawImage {
    /// Wrap an RGB buffer, checking its length against the dimensions
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidData(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = Self::buffer_len(width, height);
        if pixels.len() != expected {
            return Err(Error::InvalidData(format!(
                "RGB buffer for {}x{} must hold {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Byte length of a packed RGB buffer with the given dimensions
    pub fn buffer_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * RGB_COMPONENTS
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Always 3
    pub fn components(&self) -> usize {
        RGB_COMPONENTS
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One scanline of packed RGB bytes
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * RGB_COMPONENTS;
        let start = y as usize * stride;
        Some(&self.pixels[start..start + stride])
    }

    /// Expand to RGBA with an opaque alpha channel
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for rgb in self.pixels.chunks_exact(RGB_COMPONENTS) {
            rgba.extend_from_slice(rgb);
            rgba.push(u8::MAX);
        }
        rgba
    }
}
