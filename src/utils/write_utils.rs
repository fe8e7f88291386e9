//! TIFF writing utilities
//!
//! Helper functions for writing TIFF files to disk, handling alignment
//! and other low-level details.

use crate::tiff::errors::TiffResult;
use std::io::Write;

/// Align an offset to a 4-byte boundary
///
/// TIFF specification recommends aligning data on word boundaries.
/// This function returns the next 4-byte aligned position given a current offset.
pub fn align_to_4_bytes(offset: u64) -> u64 {
    offset + calculate_padding(offset as usize) as u64
}

/// Write padding bytes to align to 4-byte boundary
///
/// After writing a block of data, this function adds the necessary
/// padding bytes to ensure the next write will be aligned to a 4-byte boundary.
pub fn write_padding(writer: &mut impl Write, data_len: usize) -> TiffResult<()> {
    let padding = calculate_padding(data_len);
    if padding > 0 {
        writer.write_all(&[0u8; 4][..padding])?;
    }
    Ok(())
}

/// Calculate padding required to align to 4-byte boundary
pub fn calculate_padding(data_len: usize) -> usize {
    (4 - (data_len % 4)) % 4
}

/// Copy a payload into a zeroed inline value field of `field_size` bytes
pub fn pack_inline(payload: &[u8], field_size: usize) -> Vec<u8> {
    let mut field = vec![0u8; field_size];
    let len = payload.len().min(field_size);
    field[..len].copy_from_slice(&payload[..len]);
    field
}
