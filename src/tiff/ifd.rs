//! Image File Directory (IFD) structures and methods
//!
//! This module implements the TIFF IFD (Image File Directory) that describes
//! the written raster. Small values live directly in an entry; anything
//! larger is kept as a payload and placed after the directory when the file
//! is written.

use std::collections::HashMap;
use std::fmt;
use crate::tiff::constants::{field_types, tags};
use log::trace;
use crate::utils::tag_utils;

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone, Default)]
pub struct IFD {
    /// Entries in this IFD, one per tag
    pub entries: Vec<IFDEntry>,
    /// Encoded values for entries that carry more than a single number
    payloads: HashMap<u16, Vec<u8>>,
}

/// Represents an entry in an Image File Directory (IFD)
///
/// Each entry describes one aspect of the image (dimensions, compression,
/// georeferencing, ...) using a tag-value pair. The field_type determines
/// how to interpret the value or payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Inline value, used when the entry has no payload
    pub value_offset: u64,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
        }
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!("Tag: {} ({}), Type: {} ({}), Count: {}, Value/Offset: {}",
                self.tag, tag_utils::get_tag_name(self.tag),
                self.field_type, tag_utils::get_field_type_name(self.field_type),
                self.count, self.value_offset)
    }
}

impl IFD {
    /// Creates a new, empty IFD
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, replacing any existing entry for the same tag
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry: {}", entry.description());

        self.payloads.remove(&entry.tag);
        self.entries.retain(|e| e.tag != entry.tag);
        self.entries.push(entry);
    }

    /// Adds an entry whose values are stored as encoded bytes
    fn add_payload_entry(&mut self, tag: u16, field_type: u16, count: u64, payload: Vec<u8>) {
        self.add_entry(IFDEntry::new(tag, field_type, count, 0));
        self.payloads.insert(tag, payload);
    }

    /// Single SHORT value
    pub fn add_short(&mut self, tag: u16, value: u16) {
        self.add_entry(IFDEntry::new(tag, field_types::SHORT, 1, value as u64));
    }

    /// Single LONG value
    pub fn add_long(&mut self, tag: u16, value: u32) {
        self.add_entry(IFDEntry::new(tag, field_types::LONG, 1, value as u64));
    }

    /// Array of SHORT values
    pub fn add_shorts(&mut self, tag: u16, values: &[u16]) {
        let payload = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.add_payload_entry(tag, field_types::SHORT, values.len() as u64, payload);
    }

    /// Array of DOUBLE values
    pub fn add_doubles(&mut self, tag: u16, values: &[f64]) {
        let payload = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.add_payload_entry(tag, field_types::DOUBLE, values.len() as u64, payload);
    }

    /// NUL-terminated ASCII string
    pub fn add_ascii(&mut self, tag: u16, text: &str) {
        let mut payload = text.as_bytes().to_vec();
        payload.push(0);
        self.add_payload_entry(tag, field_types::ASCII, payload.len() as u64, payload);
    }

    /// Offsets or byte counts: LONG in classic TIFF, LONG8 in BigTIFF
    pub fn add_offsets(&mut self, tag: u16, values: &[u64], is_big_tiff: bool) {
        let (field_type, payload): (u16, Vec<u8>) = if is_big_tiff {
            (field_types::LONG8, values.iter().flat_map(|v| v.to_le_bytes()).collect())
        } else {
            (field_types::LONG, values.iter().flat_map(|v| (*v as u32).to_le_bytes()).collect())
        };
        self.add_payload_entry(tag, field_type, values.len() as u64, payload);
    }

    /// Encoded bytes of an entry, if it has any
    pub fn get_payload(&self, tag: u16) -> Option<&[u8]> {
        self.payloads.get(&tag).map(Vec::as_slice)
    }

    /// Gets a tag value (value_offset) directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.get_entry(tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.get_entry(tag).is_some()
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Gets the dimensions of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;
        Some((width, height))
    }

    /// Entries sorted by tag number, as the TIFF spec requires
    pub fn sorted_entries(&self) -> Vec<IFDEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| entry.tag);
        sorted
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD ({} entries)", self.entries.len())?;
        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }
        for entry in self.sorted_entries() {
            let size = tag_utils::get_field_type_size(entry.field_type) as u64 * entry.count;
            writeln!(f, "    {} ({}): count {} [{}], {} bytes",
                     entry.tag, tag_utils::get_tag_name(entry.tag), entry.count,
                     tag_utils::get_field_type_name(entry.field_type), size)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adding_a_tag_twice_replaces_it() {
        let mut ifd = IFD::new();
        ifd.add_doubles(tags::MODEL_PIXEL_SCALE_TAG, &[1.0, 1.0, 0.0]);
        ifd.add_short(tags::MODEL_PIXEL_SCALE_TAG, 7);

        assert_eq!(ifd.entries.len(), 1);
        assert_eq!(ifd.get_tag_value(tags::MODEL_PIXEL_SCALE_TAG), Some(7));
        assert!(ifd.get_payload(tags::MODEL_PIXEL_SCALE_TAG).is_none());
    }

    #[test]
    fn test_display_lists_sorted_entries_with_sizes() {
        let mut ifd = IFD::new();
        ifd.add_ascii(tags::SOFTWARE, "abc");
        ifd.add_long(tags::IMAGE_LENGTH, 4);
        ifd.add_long(tags::IMAGE_WIDTH, 6);

        let text = ifd.to_string();
        assert!(text.contains("Dimensions: 6x4"));
        assert!(text.contains("count 4 [ASCII], 4 bytes"));
        assert!(text.find("256 (").unwrap() < text.find("305 (").unwrap());
    }
}
