//! Compression handler trait definition

use crate::tiff::errors::TiffResult;

/// Strategy trait for the codecs a strip or tile can be written with
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>>;

    /// Compress the data
    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Value of the TIFF Compression tag
    fn code(&self) -> u16;
}
