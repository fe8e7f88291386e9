//! Basic TIFF tag strategies
//!
//! This module provides functionality for adding the image structure tags:
//! dimensions, sample properties and the strip or tile directory.

use crate::raster::ElementType;
use crate::tiff::constants::{tags, photometric, planar_config};
use crate::tiff::ifd::IFD;
use crate::tiff::layout::{ChunkKind, ChunkLayout};
use crate::utils::tag_utils;
use log::debug;

/// Adds basic TIFF tags to an IFD
pub struct BasicTagsBuilder;

impl BasicTagsBuilder {
    /// Add dimensions, sample description and compression for a single band
    pub fn add_image_structure(
        ifd: &mut IFD,
        layout: &ChunkLayout,
        element_type: ElementType,
        compression_code: u16
    ) {
        debug!("Adding image structure: {}x{} {} ({})",
               layout.width, layout.height, element_type,
               tag_utils::get_compression_name(compression_code));

        ifd.add_long(tags::IMAGE_WIDTH, layout.width as u32);
        ifd.add_long(tags::IMAGE_LENGTH, layout.height as u32);
        ifd.add_short(tags::BITS_PER_SAMPLE, element_type.bits_per_sample());
        ifd.add_short(tags::COMPRESSION, compression_code);
        ifd.add_short(tags::PHOTOMETRIC_INTERPRETATION, photometric::BLACK_IS_ZERO);
        ifd.add_short(tags::SAMPLES_PER_PIXEL, 1);
        ifd.add_short(tags::PLANAR_CONFIGURATION, planar_config::CHUNKY);
        ifd.add_short(tags::SAMPLE_FORMAT, element_type.sample_format());
    }

    /// Add the chunk geometry and the offsets and byte counts of written chunks
    ///
    /// Strips get RowsPerStrip with StripOffsets/StripByteCounts, tiles get
    /// TileWidth/TileLength with TileOffsets/TileByteCounts.
    pub fn add_chunk_directory(
        ifd: &mut IFD,
        layout: &ChunkLayout,
        offsets: &[u64],
        byte_counts: &[u64],
        is_big_tiff: bool
    ) {
        debug!("Adding directory for {} chunks", offsets.len());

        match layout.kind {
            ChunkKind::Strips { rows_per_strip } => {
                ifd.add_long(tags::ROWS_PER_STRIP, rows_per_strip as u32);
                ifd.add_offsets(tags::STRIP_OFFSETS, offsets, is_big_tiff);
                ifd.add_offsets(tags::STRIP_BYTE_COUNTS, byte_counts, is_big_tiff);
            }
            ChunkKind::Tiles { tile_width, tile_height } => {
                ifd.add_long(tags::TILE_WIDTH, tile_width as u32);
                ifd.add_long(tags::TILE_LENGTH, tile_height as u32);
                ifd.add_offsets(tags::TILE_OFFSETS, offsets, is_big_tiff);
                ifd.add_offsets(tags::TILE_BYTE_COUNTS, byte_counts, is_big_tiff);
            }
        }
    }

    /// Record the producing program
    pub fn add_software(ifd: &mut IFD) {
        ifd.add_ascii(tags::SOFTWARE, concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")));
    }
}
