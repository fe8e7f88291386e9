//! TIFF writing strategies
//!
//! This module handles the low-level layout of the output file. Chunks are
//! streamed right after the header as they are encoded; the directory and the
//! tag payloads follow the last chunk, and the header is patched at the end to
//! point at the directory.

use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::utils::write_utils;
use log::{debug, trace};
use std::io::{Seek, SeekFrom, Write};

/// Streams a single-image TIFF or BigTIFF file to a writer
pub struct WriterBuilder<W: Write + Seek> {
    writer: W,
    position: u64,
    is_big_tiff: bool,
}

impl<W: Write + Seek> WriterBuilder<W> {
    /// Start a file: writes the header with a placeholder IFD offset
    pub fn new(mut writer: W, is_big_tiff: bool) -> TiffResult<Self> {
        let position = Self::write_header(&mut writer, is_big_tiff)?;
        Ok(WriterBuilder {
            writer,
            position,
            is_big_tiff,
        })
    }

    /// Current end of the written data
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Write TIFF header
    ///
    /// The header is the first part of any TIFF file and includes:
    /// - Byte order indicator (always II, little-endian)
    /// - Version number (42 for standard TIFF, 43 for BigTIFF)
    /// - Offset to the first IFD, filled in by [`WriterBuilder::finish`]
    fn write_header(writer: &mut W, is_big_tiff: bool) -> TiffResult<u64> {
        writer.write_all(&header::LITTLE_ENDIAN_MARKER)?;

        if is_big_tiff {
            writer.write_all(&header::BIG_TIFF_VERSION.to_le_bytes())?;
            writer.write_all(&header::BIGTIFF_OFFSET_SIZE.to_le_bytes())?;
            writer.write_all(&[0u8, 0])?;  // Reserved (always 0)
            writer.write_all(&[0u8; 8])?;  // First IFD offset placeholder
            Ok(16)
        } else {
            writer.write_all(&header::TIFF_VERSION.to_le_bytes())?;
            writer.write_all(&[0u8; 4])?;  // First IFD offset placeholder
            Ok(8)
        }
    }

    /// Append one encoded strip or tile, returning its offset
    pub fn write_chunk(&mut self, data: &[u8]) -> TiffResult<u64> {
        let offset = self.position;
        self.check_offset(offset + data.len() as u64)?;

        self.writer.write_all(data)?;
        write_utils::write_padding(&mut self.writer, data.len())?;
        self.position = write_utils::align_to_4_bytes(offset + data.len() as u64);

        trace!("Wrote chunk of {} bytes at {}", data.len(), offset);
        Ok(offset)
    }

    /// Write the directory and its payloads, patch the header and flush
    ///
    /// Returns the underlying writer.
    pub fn finish(mut self, ifd: &IFD) -> TiffResult<W> {
        let ifd_offset = self.position;
        let entries = ifd.sorted_entries();
        let inline_size = if self.is_big_tiff { 8 } else { 4 };

        // Payloads too large for the value field follow the directory, each on
        // a 4-byte boundary
        let ifd_end = ifd_offset + Self::calculate_ifd_size(entries.len(), self.is_big_tiff);
        let mut payload_offset = write_utils::align_to_4_bytes(ifd_end);
        let mut external: Vec<&[u8]> = Vec::new();
        let mut values: Vec<Vec<u8>> = Vec::with_capacity(entries.len());

        for entry in &entries {
            let value = match ifd.get_payload(entry.tag) {
                Some(payload) if payload.len() <= inline_size => {
                    write_utils::pack_inline(payload, inline_size)
                }
                Some(payload) => {
                    let offset = payload_offset;
                    payload_offset = write_utils::align_to_4_bytes(offset + payload.len() as u64);
                    external.push(payload);
                    self.encode_offset(offset)?
                }
                None => self.encode_offset(entry.value_offset)?,
            };
            values.push(value);
        }
        self.check_offset(payload_offset)?;

        debug!("Writing IFD with {} entries at offset {}", entries.len(), ifd_offset);

        match self.is_big_tiff {
            true => self.writer.write_all(&(entries.len() as u64).to_le_bytes())?,
            false => self.writer.write_all(&(entries.len() as u16).to_le_bytes())?,
        }

        for (entry, value) in entries.iter().zip(&values) {
            self.writer.write_all(&entry.tag.to_le_bytes())?;
            self.writer.write_all(&entry.field_type.to_le_bytes())?;
            match self.is_big_tiff {
                true => self.writer.write_all(&entry.count.to_le_bytes())?,
                false => self.writer.write_all(&(entry.count as u32).to_le_bytes())?,
            }
            self.writer.write_all(value)?;
        }

        // No next IFD
        self.writer.write_all(&vec![0u8; inline_size])?;

        if !external.is_empty() {
            write_utils::write_padding(&mut self.writer, ifd_end as usize)?;
        }
        for payload in external {
            self.writer.write_all(payload)?;
            write_utils::write_padding(&mut self.writer, payload.len())?;
        }

        self.write_first_ifd_offset(ifd_offset)?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Calculate size of an IFD
    ///
    /// Standard TIFF: 2 bytes of entry count, 12 bytes per entry, 4 bytes of
    /// next-IFD offset. BigTIFF: 8 + 20 per entry + 8.
    fn calculate_ifd_size(entry_count: usize, is_big_tiff: bool) -> u64 {
        let entry_count = entry_count as u64;
        match is_big_tiff {
            true => 8 + (20 * entry_count) + 8,
            false => 2 + (12 * entry_count) + 4,
        }
    }

    /// Write first IFD offset
    ///
    /// This goes back and updates the placeholder in the header with
    /// the actual offset to the first IFD, now that we know where it is.
    fn write_first_ifd_offset(&mut self, offset: u64) -> TiffResult<()> {
        let position = if self.is_big_tiff { 8 } else { 4 };
        self.writer.seek(SeekFrom::Start(position))?;
        let value = self.encode_offset(offset)?;
        self.writer.write_all(&value)?;
        Ok(())
    }

    fn encode_offset(&self, value: u64) -> TiffResult<Vec<u8>> {
        if self.is_big_tiff {
            Ok(value.to_le_bytes().to_vec())
        } else {
            let value = u32::try_from(value).map_err(|_| TiffError::OffsetOverflow(value))?;
            Ok(value.to_le_bytes().to_vec())
        }
    }

    fn check_offset(&self, end: u64) -> TiffResult<()> {
        if !self.is_big_tiff && end > u32::MAX as u64 {
            return Err(TiffError::OffsetOverflow(end));
        }
        Ok(())
    }
}
