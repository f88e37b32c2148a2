//! Texture source decoding for attiview
//!
//! Turns compressed raster files into the [`attiview_core::RawImage`]
//! buffers the texture registry uploads.

pub mod error;
pub mod raster;

pub use error::*;
pub use raster::*;

use attiview_core::{RawImage, Result};
use std::path::Path;

/// Decode an image file into packed RGB
pub fn read_rgb<P: AsRef<Path>>(path: P) -> Result<RawImage> {
    Ok(RasterDecoder::new().decode_rgb(path)?)
}
