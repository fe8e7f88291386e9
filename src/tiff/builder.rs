//! GeoTIFF file construction
//!
//! [`GeoTiffBuilder`] turns a raster profile and a sample source into a
//! single-band GeoTIFF: it lays the raster out in strips or tiles, encodes
//! each chunk with the profile's compression and writes the directory with
//! the georeferencing and GDAL metadata tags.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use log::{debug, info};

use crate::compression::CompressionFactory;
use crate::profile::{Compression, RasterProfile};
use crate::raster::ElementType;
use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::builders::geo_tags::GeoTagsBuilder;
use crate::tiff::builders::metadata_tags::MetadataBuilder;
use crate::tiff::builders::writer::WriterBuilder;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::layout::{ChunkLayout, SampleSource};
use crate::utils::progress::ProgressTracker;

/// Room left in a classic TIFF for the directory and tag payloads
const DIRECTORY_RESERVE: u64 = 16 * 1024 * 1024;

/// Builder for writing one raster as a GeoTIFF
pub struct GeoTiffBuilder<'a> {
    profile: &'a RasterProfile,
    description: Option<&'a str>,
    show_progress: bool,
}

impl<'a> GeoTiffBuilder<'a> {
    pub fn new(profile: &'a RasterProfile) -> Self {
        GeoTiffBuilder {
            profile,
            description: None,
            show_progress: false,
        }
    }

    /// Band description stored in the GDAL metadata
    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }

    /// Draw a progress bar on stderr while encoding
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Write to a file, creating or truncating it
    pub fn write_to_path(&self, source: &dyn SampleSource, path: &Path) -> TiffResult<()> {
        info!("Writing GeoTIFF to {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::with_capacity(1024 * 1024, file);
        let mut writer = self.write(source, writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the GeoTIFF to any seekable writer and hand the writer back
    pub fn write<W: Write + Seek>(&self, source: &dyn SampleSource, writer: W) -> TiffResult<W> {
        let element_type = source.element_type();
        let (rows, cols) = source.dimensions();
        if (rows, cols) != (self.profile.height, self.profile.width) {
            return Err(TiffError::InvalidLayout(format!(
                "data has {} rows and {} columns but the profile describes {}x{}",
                rows, cols, self.profile.height, self.profile.width
            )));
        }

        let layout = ChunkLayout::from_profile(self.profile, element_type)?;
        let compression = self.profile.compress.unwrap_or(Compression::Lzw);
        let is_big_tiff = Self::needs_big_tiff(layout.raw_size(element_type), compression);
        self.write_layout(source, writer, &layout, is_big_tiff)
    }

    /// Write with a fixed layout and TIFF flavour
    pub(crate) fn write_layout<W: Write + Seek>(
        &self,
        source: &dyn SampleSource,
        writer: W,
        layout: &ChunkLayout,
        is_big_tiff: bool,
    ) -> TiffResult<W> {
        let element_type = source.element_type();
        let compression = self.profile.compress.unwrap_or(Compression::Lzw);
        let handler = CompressionFactory::create_handler(compression);

        debug!("Layout {:?}, {} chunks, {} compression, BigTIFF: {}",
               layout.kind, layout.chunk_count(), handler.name(), is_big_tiff);

        let mut tiff = WriterBuilder::new(writer, is_big_tiff)?;
        let chunk_count = layout.chunk_count();
        let progress = if self.show_progress {
            ProgressTracker::new(chunk_count as u64, "Encoding chunks")
        } else {
            ProgressTracker::hidden(chunk_count as u64)
        };

        let mut offsets = Vec::with_capacity(chunk_count);
        let mut byte_counts = Vec::with_capacity(chunk_count);
        for window in layout.windows() {
            let raw = source.window_bytes(&window);
            let encoded = handler.compress(&raw)?;
            offsets.push(tiff.write_chunk(&encoded)?);
            byte_counts.push(encoded.len() as u64);
            progress.increment(1);
        }
        progress.finish();

        let ifd = self.build_ifd(layout, element_type, handler.code(), &offsets, &byte_counts, is_big_tiff)?;
        tiff.finish(&ifd)
    }

    fn build_ifd(
        &self,
        layout: &ChunkLayout,
        element_type: ElementType,
        compression_code: u16,
        offsets: &[u64],
        byte_counts: &[u64],
        is_big_tiff: bool,
    ) -> TiffResult<IFD> {
        let mut ifd = IFD::new();

        BasicTagsBuilder::add_image_structure(&mut ifd, layout, element_type, compression_code);
        BasicTagsBuilder::add_chunk_directory(&mut ifd, layout, offsets, byte_counts, is_big_tiff);
        BasicTagsBuilder::add_software(&mut ifd);

        GeoTagsBuilder::add_georeferencing(&mut ifd, &self.profile.transform, self.profile.crs.as_deref());

        if let Some(nodata) = self.profile.nodata {
            MetadataBuilder::add_nodata_tag(&mut ifd, nodata);
        }
        if let Some(description) = self.description {
            MetadataBuilder::add_band_description(&mut ifd, description)?;
        }

        debug!("{}", ifd);
        Ok(ifd)
    }

    /// Whether the raster may not fit below the 4 GiB limit of classic TIFF
    ///
    /// Compressed chunks are sized as if LZW expanded them by half.
    pub fn needs_big_tiff(raw_size: u64, compression: Compression) -> bool {
        let estimate = match compression {
            Compression::None => raw_size,
            _ => raw_size + raw_size / 2,
        };
        estimate + DIRECTORY_RESERVE > u32::MAX as u64
    }
}
