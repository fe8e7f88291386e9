use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::raster::ElementType;
use crate::tiff::layout::{SampleSource, Window};
use crate::utils::tag_utils;

/// One directory entry with its values resolved
#[derive(Debug, Clone)]
pub struct ParsedTag {
    pub field_type: u16,
    pub count: u64,
    pub bytes: Vec<u8>,
}

impl ParsedTag {
    pub fn values(&self) -> Vec<u64> {
        let size = tag_utils::get_field_type_size(self.field_type);
        self.bytes
            .chunks(size)
            .map(|chunk| {
                let mut padded = [0u8; 8];
                padded[..chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(padded)
            })
            .collect()
    }

    pub fn doubles(&self) -> Vec<f64> {
        self.bytes
            .chunks(8)
            .map(|chunk| f64::from_le_bytes(chunk.try_into().unwrap()))
            .collect()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone())
            .unwrap()
            .trim_end_matches('\0')
            .to_string()
    }
}

/// Minimal little-endian TIFF/BigTIFF reader for checking written files
#[derive(Debug)]
pub struct ParsedTiff {
    pub is_big_tiff: bool,
    pub tags: BTreeMap<u16, ParsedTag>,
    data: Vec<u8>,
}

impl ParsedTiff {
    pub fn parse(data: Vec<u8>) -> Self {
        let mut cursor = Cursor::new(data.as_slice());
        assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 0x4949);
        let version = cursor.read_u16::<LittleEndian>().unwrap();
        let is_big_tiff = version == 43;

        let ifd_offset = if is_big_tiff {
            assert_eq!(cursor.read_u16::<LittleEndian>().unwrap(), 8);
            cursor.read_u16::<LittleEndian>().unwrap();
            cursor.read_u64::<LittleEndian>().unwrap()
        } else {
            assert_eq!(version, 42);
            cursor.read_u32::<LittleEndian>().unwrap() as u64
        };

        cursor.seek(SeekFrom::Start(ifd_offset)).unwrap();
        let entry_count = if is_big_tiff {
            cursor.read_u64::<LittleEndian>().unwrap()
        } else {
            cursor.read_u16::<LittleEndian>().unwrap() as u64
        };

        let mut tags = BTreeMap::new();
        let mut previous_tag = None;
        for _ in 0..entry_count {
            let tag = cursor.read_u16::<LittleEndian>().unwrap();
            assert!(previous_tag.map_or(true, |p| p < tag), "tags must be sorted");
            previous_tag = Some(tag);

            let field_type = cursor.read_u16::<LittleEndian>().unwrap();
            let (count, field_size) = if is_big_tiff {
                (cursor.read_u64::<LittleEndian>().unwrap(), 8)
            } else {
                (cursor.read_u32::<LittleEndian>().unwrap() as u64, 4)
            };
            let mut field = vec![0u8; field_size];
            cursor.read_exact(&mut field).unwrap();

            let size = tag_utils::get_field_type_size(field_type) * count as usize;
            let bytes = if size <= field_size {
                field[..size].to_vec()
            } else {
                let mut padded = [0u8; 8];
                padded[..field_size].copy_from_slice(&field);
                let offset = u64::from_le_bytes(padded) as usize;
                assert_eq!(offset % 4, 0, "payload of tag {} is not word aligned", tag);
                data[offset..offset + size].to_vec()
            };
            tags.insert(tag, ParsedTag { field_type, count, bytes });
        }

        ParsedTiff { is_big_tiff, tags, data }
    }

    pub fn tag(&self, tag: u16) -> &ParsedTag {
        self.tags.get(&tag).unwrap_or_else(|| panic!("missing tag {}", tag))
    }

    pub fn value(&self, tag: u16) -> u64 {
        self.tag(tag).values()[0]
    }

    /// Raw (still encoded) bytes of each chunk
    pub fn chunks(&self, offsets_tag: u16, counts_tag: u16) -> Vec<Vec<u8>> {
        let offsets = self.tag(offsets_tag).values();
        let counts = self.tag(counts_tag).values();
        offsets
            .iter()
            .zip(counts.iter())
            .map(|(&offset, &count)| self.data[offset as usize..(offset + count) as usize].to_vec())
            .collect()
    }
}

/// Row-major u16 raster whose value encodes its position
pub struct GradientSource {
    pub rows: usize,
    pub cols: usize,
}

impl GradientSource {
    pub fn value(&self, row: usize, col: usize) -> u16 {
        (row * 100 + col) as u16
    }
}

impl SampleSource for GradientSource {
    fn element_type(&self) -> ElementType {
        ElementType::UInt16
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn window_bytes(&self, window: &Window) -> Vec<u8> {
        let mut out = Vec::new();
        for row in 0..window.padded_rows {
            for col in 0..window.padded_cols {
                let (r, c) = (window.rows.start + row, window.cols.start + col);
                let value = if window.rows.contains(&r) && window.cols.contains(&c) {
                    self.value(r, c)
                } else {
                    0
                };
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        out
    }
}
