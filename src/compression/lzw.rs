//! Handler for LZW compressed data
//!
//! TIFF LZW is MSB-first with 8-bit symbols and the early code size switch,
//! which is what `weezl` calls the TIFF size switch.

use weezl::decode::Decoder;
use weezl::encode::Encoder;
use weezl::BitOrder;
use log::debug;
use crate::tiff::constants::compression;
use crate::tiff::errors::{TiffError, TiffResult};
use super::handler::CompressionHandler;

/// LZW compression handler (compression code 5)
pub struct LzwHandler;

impl CompressionHandler for LzwHandler {
    fn decompress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .decode(data)
            .map_err(|e| TiffError::CompressionError(format!("LZW decode failed: {}", e)))
    }

    fn compress(&self, data: &[u8]) -> TiffResult<Vec<u8>> {
        let encoded = Encoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .encode(data)
            .map_err(|e| TiffError::CompressionError(format!("LZW encode failed: {}", e)))?;
        debug!("LZW compressed {} bytes to {}", data.len(), encoded.len());
        Ok(encoded)
    }

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn code(&self) -> u16 {
        compression::LZW
    }
}
