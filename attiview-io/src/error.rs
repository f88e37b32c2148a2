//! Error types for image decoding

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding a texture source
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Decode error in {}: {message}", path.display())]
    DecodeError { path: PathBuf, message: String },

    #[error("Unsupported component count {components} in {}", path.display())]
    UnsupportedComponents { path: PathBuf, components: u8 },

    #[error("Could not allocate {bytes} bytes for decoded pixels")]
    AllocationFailure { bytes: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for decoding operations
pub type IoResult<T> = std::result::Result<T, IoError>;

impl From<IoError> for attiview_core::Error {
    fn from(err: IoError) -> Self {
        use attiview_core::Error;
        match err {
            IoError::FileNotFound { path } => Error::FileNotFound { path },
            IoError::DecodeError { path, message } => Error::Decode { path, message },
            IoError::UnsupportedComponents { path, components } => {
                Error::UnsupportedComponents { path, components }
            }
            IoError::AllocationFailure { bytes } => Error::AllocationFailure { bytes },
            IoError::Io(e) => Error::Io(e),
        }
    }
}
