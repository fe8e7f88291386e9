//! Custom error types for GeoTIFF writing

use std::fmt;
use std::io;

/// Writer-specific error types
#[derive(Debug)]
pub enum TiffError {
    /// I/O error
    IoError(io::Error),
    /// Compression codec failure
    CompressionError(String),
    /// Tile or strip layout cannot be represented
    InvalidLayout(String),
    /// Offsets exceed what the chosen TIFF variant can address
    OffsetOverflow(u64),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::CompressionError(msg) => write!(f, "Compression error: {}", msg),
            TiffError::InvalidLayout(msg) => write!(f, "Invalid raster layout: {}", msg),
            TiffError::OffsetOverflow(offset) => {
                write!(f, "Offset {} does not fit in a classic TIFF", offset)
            }
            TiffError::GenericError(msg) => write!(f, "TIFF error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

/// Result type for TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
