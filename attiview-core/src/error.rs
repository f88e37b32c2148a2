//! Error types for attiview

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for attiview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Unsupported component count {components} in {}", path.display())]
    UnsupportedComponents { path: PathBuf, components: u8 },

    #[error("Allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },

    #[error("Failed to load texture {}: {source}", path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Wrap a decode-stage failure as a texture-stage failure for `path`
    pub fn texture_load(path: impl Into<PathBuf>, cause: Error) -> Self {
        Error::TextureLoad {
            path: path.into(),
            source: Box::new(cause),
        }
    }

    /// True for the decode-stage kinds a texture load may wrap
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Error::FileNotFound { .. }
                | Error::Decode { .. }
                | Error::UnsupportedComponents { .. }
                | Error::AllocationFailure { .. }
        )
    }
}

/// Result type alias for attiview operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_texture_load_keeps_cause() {
        let cause = Error::FileNotFound { path: PathBuf::from("missing.jpg") };
        let err = Error::texture_load("missing.jpg", cause);

        let source = err.source().expect("texture load error carries its cause");
        assert!(source.to_string().contains("missing.jpg"));
        match err {
            Error::TextureLoad { source, .. } => assert!(source.is_decode_failure()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_gpu_error_is_not_decode_failure() {
        assert!(!Error::Gpu("lost".to_string()).is_decode_failure());
    }
}
