//! Compressed raster decoding into packed RGB buffers
//!
//! JPEG is the expected source format and PNG is accepted as well; the
//! format is sniffed from the file header. Output is always three
//! components; an alpha channel is dropped, and sources with fewer than
//! three components are refused.
//!
//! The pixel buffer is sized from the header and reserved before any pixel
//! data is read, so an oversized image fails with
//! [`IoError::AllocationFailure`] instead of partially decoding.

use crate::{IoError, IoResult};
use attiview_core::{ImageDecoder, RawImage, RGB_COMPONENTS};
use image::codecs::jpeg::JpegDecoder;
use image::codecs::png::PngDecoder;
use image::io::Reader;
use image::{ColorType, DynamicImage, ImageDecoder as SourceDecoder, ImageError, ImageFormat};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Largest pixel buffer a single decode may reserve unless configured
pub const DEFAULT_MAX_ALLOC: usize = 512 * 1024 * 1024;

/// Decodes image files from disk
#[derive(Debug, Clone, Copy)]
pub struct RasterDecoder {
    max_alloc: usize,
}

impl Default for RasterDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterDecoder {
    pub fn new() -> Self {
        Self {
            max_alloc: DEFAULT_MAX_ALLOC,
        }
    }

    /// Cap the pixel buffer a decode may reserve
    pub fn with_max_alloc(mut self, bytes: usize) -> Self {
        self.max_alloc = bytes;
        self
    }

    pub fn max_alloc(&self) -> usize {
        self.max_alloc
    }

    /// Decode `path` into a tightly packed RGB image
    ///
    /// Any I/O failure before pixel decoding starts, including a path that
    /// names a directory, is reported as [`IoError::FileNotFound`].
    pub fn decode_rgb<P: AsRef<Path>>(&self, path: P) -> IoResult<RawImage> {
        let path = path.as_ref();
        let unreadable = |e: std::io::Error| {
            debug!("cannot read {}: {}", path.display(), e);
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        };

        let file = File::open(path).map_err(unreadable)?;
        let reader = Reader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(unreadable)?;
        let format = reader.format();
        let source = reader.into_inner();

        // the total size is not known until the header has been parsed
        match format {
            Some(ImageFormat::Jpeg) => {
                let decoder = JpegDecoder::new(source).map_err(|e| image_error(path, e, 0))?;
                self.decode_from(path, decoder)
            }
            Some(ImageFormat::Png) => {
                let decoder = PngDecoder::new(source).map_err(|e| image_error(path, e, 0))?;
                self.decode_from(path, decoder)
            }
            other => Err(IoError::DecodeError {
                path: path.to_path_buf(),
                message: format!("unsupported image format {:?}", other),
            }),
        }
    }

    fn decode_from<'a, D: SourceDecoder<'a>>(
        &self,
        path: &Path,
        decoder: D,
    ) -> IoResult<RawImage> {
        let (width, height) = decoder.dimensions();
        let color = decoder.color_type();
        let components = color.channel_count();
        if !(3..=4).contains(&components) {
            return Err(IoError::UnsupportedComponents {
                path: path.to_path_buf(),
                components,
            });
        }
        if width == 0 || height == 0 {
            return Err(IoError::DecodeError {
                path: path.to_path_buf(),
                message: format!("empty image {}x{}", width, height),
            });
        }

        let bytes = usize::try_from(decoder.total_bytes())
            .unwrap_or(usize::MAX)
            .max(RawImage::buffer_len(width, height));
        if bytes > self.max_alloc {
            debug!(
                "{} needs {} bytes, limit is {}",
                path.display(),
                bytes,
                self.max_alloc
            );
            return Err(IoError::AllocationFailure { bytes });
        }

        let pixels = match color {
            ColorType::Rgb8 | ColorType::Rgba8 => {
                let mut pixels = Vec::new();
                pixels
                    .try_reserve_exact(bytes)
                    .map_err(|_| IoError::AllocationFailure { bytes })?;
                pixels.resize(bytes, 0);
                decoder
                    .read_image(&mut pixels)
                    .map_err(|e| image_error(path, e, bytes))?;
                if color == ColorType::Rgba8 {
                    drop_alpha(&mut pixels);
                }
                pixels
            }
            // 16-bit and float samples are narrowed by the image crate
            _ => DynamicImage::from_decoder(decoder)
                .map_err(|e| image_error(path, e, bytes))?
                .into_rgb8()
                .into_raw(),
        };

        debug!(
            "decoded {} as {}x{} ({:?})",
            path.display(),
            width,
            height,
            color
        );

        RawImage::from_rgb(width, height, pixels).map_err(|e| IoError::DecodeError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, path: &Path) -> attiview_core::Result<RawImage> {
        Ok(self.decode_rgb(path)?)
    }
}

fn image_error(path: &Path, err: ImageError, bytes: usize) -> IoError {
    match err {
        ImageError::Limits(_) => IoError::AllocationFailure { bytes },
        other => IoError::DecodeError {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

/// Pack RGBA pixels down to RGB in place
fn drop_alpha(pixels: &mut Vec<u8>) {
    let count = pixels.len() / 4;
    for i in 0..count {
        pixels.copy_within(i * 4..i * 4 + RGB_COMPONENTS, i * RGB_COMPONENTS);
    }
    pixels.truncate(count * RGB_COMPONENTS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn test_grayscale_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(3, 3, Luma([90])).save(&path).unwrap();

        match RasterDecoder::new().decode_rgb(&path) {
            Err(IoError::UnsupportedComponents { components, .. }) => assert_eq!(components, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match RasterDecoder::new().decode_rgb(dir.path()) {
            Err(IoError::FileNotFound { path }) => assert_eq!(path, dir.path()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_buffer_over_limit_fails_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])).save(&path).unwrap();

        let decoder = RasterDecoder::new().with_max_alloc(26);
        assert!(matches!(
            decoder.decode_rgb(&path),
            Err(IoError::AllocationFailure { bytes: 27 })
        ));
        assert!(decoder.with_max_alloc(27).decode_rgb(&path).is_ok());
    }

    #[test]
    fn test_sixteen_bit_samples_are_narrowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let wide: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 1, Rgb([u16::MAX, 0, u16::MAX]));
        wide.save(&path).unwrap();

        let raw = RasterDecoder::new().decode_rgb(&path).unwrap();
        assert_eq!(raw.pixels(), &[255u8, 0, 255, 255, 0, 255][..]);
    }

    #[test]
    fn test_drop_alpha_packs_in_place() {
        let mut pixels = vec![1, 2, 3, 9, 4, 5, 6, 9];
        drop_alpha(&mut pixels);
        assert_eq!(pixels, vec![1, 2, 3, 4, 5, 6]);
    }
}
