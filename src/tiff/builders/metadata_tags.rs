//! Metadata tag strategies
//!
//! This module handles the GDAL-specific metadata tags: the no-data marker
//! and the XML metadata block carrying the band description.

use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use log::info;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Handles metadata tags in TIFF files
pub struct MetadataBuilder;

impl MetadataBuilder {
    /// Add a GDAL NoData tag to an IFD
    ///
    /// GDAL stores the value as text. NaN and infinities use the spelling
    /// GDAL itself writes.
    pub fn add_nodata_tag(ifd: &mut IFD, nodata: f64) {
        let text = Self::format_nodata(nodata);
        info!("Adding GDAL NoData tag: {}", text);
        ifd.add_ascii(tags::GDAL_NODATA, &text);
    }

    pub fn format_nodata(nodata: f64) -> String {
        if nodata.is_nan() {
            "nan".to_string()
        } else if nodata.is_infinite() {
            if nodata > 0.0 { "inf".to_string() } else { "-inf".to_string() }
        } else {
            nodata.to_string()
        }
    }

    /// Add GDAL metadata with the description of band 1
    pub fn add_band_description(ifd: &mut IFD, description: &str) -> TiffResult<()> {
        info!("Adding band description to GDAL metadata");
        let xml = Self::band_description_xml(description)?;
        ifd.add_ascii(tags::GDAL_METADATA, &xml);
        Ok(())
    }

    /// `<GDALMetadata><Item name="DESCRIPTION" sample="0" role="description">...</Item></GDALMetadata>`
    pub fn band_description_xml(description: &str) -> TiffResult<String> {
        let mut writer = Writer::new(Vec::new());

        let mut item = BytesStart::new("Item");
        item.push_attribute(("name", "DESCRIPTION"));
        item.push_attribute(("sample", "0"));
        item.push_attribute(("role", "description"));

        let events = [
            Event::Start(BytesStart::new("GDALMetadata")),
            Event::Start(item),
            Event::Text(BytesText::new(description)),
            Event::End(BytesEnd::new("Item")),
            Event::End(BytesEnd::new("GDALMetadata")),
        ];
        for event in events {
            writer
                .write_event(event)
                .map_err(|e| TiffError::GenericError(format!("Failed to build GDAL metadata: {}", e)))?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| TiffError::GenericError(format!("GDAL metadata is not UTF-8: {}", e)))
    }
}
