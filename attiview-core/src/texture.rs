//! Texture registry: decode once, upload once, hand out cached handles
//!
//! The registry sits between two seams. An [`ImageDecoder`] turns a source
//! path into a [`RawImage`]; a [`TextureUploader`] takes ownership of that
//! image and returns a GPU-resident [`TextureHandle`]. Handles are cached by
//! source path, so each path is decoded and uploaded at most once.

use crate::{Error, RawImage, Result};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaque reference to an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// Minification/magnification filter requested for an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Linear,
    Nearest,
}

/// Decodes a source file into an RGB pixel buffer
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<RawImage>;
}

/// Uploads a decoded image into a newly reserved texture unit
///
/// Implementations consume the image; its pixel buffer is freed once the
/// upload completes. A failed upload must not leave a handle reserved.
pub trait TextureUploader {
    fn upload(&mut self, image: RawImage, filter: FilterMode) -> Result<TextureHandle>;
}

/// Path-keyed cache of uploaded textures
pub struct TextureRegistry<D, U> {
    decoder: D,
    uploader: U,
    filter: FilterMode,
    handles: HashMap<PathBuf, TextureHandle>,
}

impl<D: ImageDecoder, U: TextureUploader> TextureRegistry<D, U> {
    /// Create an empty registry uploading with linear filtering
    pub fn new(decoder: D, uploader: U) -> Self {
        Self {
            decoder,
            uploader,
            filter: FilterMode::Linear,
            handles: HashMap::new(),
        }
    }

    /// Load a texture, reusing the cached handle for a known path
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<TextureHandle> {
        let path = path.as_ref();
        if let Some(&handle) = self.handles.get(path) {
            debug!("texture {} already loaded as {:?}", path.display(), handle);
            return Ok(handle);
        }

        let image = self
            .decoder
            .decode(path)
            .map_err(|cause| Error::texture_load(path, cause))?;
        let (width, height) = (image.width(), image.height());

        let handle = self
            .uploader
            .upload(image, self.filter)
            .map_err(|cause| Error::texture_load(path, cause))?;

        info!(
            "uploaded texture {} ({}x{}) as {:?}",
            path.display(),
            width,
            height,
            handle
        );
        self.handles.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    /// Cached handle for `path`, if it loaded successfully
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<TextureHandle> {
        self.handles.get(path.as_ref()).copied()
    }

    /// Number of textures uploaded
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn uploader(&self) -> &U {
        &self.uploader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct SolidDecoder {
        calls: Cell<usize>,
    }

    impl ImageDecoder for SolidDecoder {
        fn decode(&self, path: &Path) -> Result<RawImage> {
            self.calls.set(self.calls.get() + 1);
            if path.ends_with("broken.jpg") {
                return Err(Error::Decode {
                    path: path.to_path_buf(),
                    message: "truncated stream".to_string(),
                });
            }
            RawImage::from_rgb(2, 1, vec![255, 0, 0, 0, 255, 0])
        }
    }

    #[derive(Default)]
    struct RecordingUploader {
        uploads: Vec<(u32, u32, FilterMode)>,
    }

    impl TextureUploader for RecordingUploader {
        fn upload(&mut self, image: RawImage, filter: FilterMode) -> Result<TextureHandle> {
            self.uploads.push((image.width(), image.height(), filter));
            Ok(TextureHandle::new(self.uploads.len() as u32))
        }
    }

    fn registry() -> TextureRegistry<SolidDecoder, RecordingUploader> {
        TextureRegistry::new(SolidDecoder { calls: Cell::new(0) }, RecordingUploader::default())
    }

    #[test]
    fn test_distinct_paths_get_distinct_handles() {
        let mut registry = registry();
        let sphere = registry.load("sphere.jpg").unwrap();
        let ring = registry.load("ring.jpg").unwrap();

        assert_ne!(sphere, ring);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.uploader().uploads[0], (2, 1, FilterMode::Linear));
    }

    #[test]
    fn test_decode_failure_binds_nothing() {
        let mut registry = registry();
        let err = registry.load("broken.jpg").unwrap_err();

        assert!(matches!(err, Error::TextureLoad { .. }));
        assert!(registry.is_empty());
        assert!(registry.get("broken.jpg").is_none());
        assert!(registry.uploader().uploads.is_empty());
    }

    #[test]
    fn test_failed_path_is_retried() {
        let mut registry = registry();
        assert!(registry.load("broken.jpg").is_err());
        assert!(registry.load("broken.jpg").is_err());
        assert_eq!(registry.decoder().calls.get(), 2);
    }
}
