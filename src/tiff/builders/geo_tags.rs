//! GeoTIFF tag strategies
//!
//! This module handles the specialized tags that turn a regular TIFF into a GeoTIFF -
//! a georeferenced image that can be accurately placed on a map: the raster-to-model
//! transformation and the GeoKey directory describing the coordinate system.

use crate::coordinate::{CrsDescription, CrsKind};
use crate::profile::GeoTransform;
use crate::tiff::constants::{geo_keys, model_type, raster_type, tags, LINEAR_UNIT_METRE, USER_DEFINED};
use crate::tiff::ifd::IFD;
use log::{debug, info, warn};

/// Terminator of a value in GeoAsciiParams
const ASCII_PARAM_TERMINATOR: char = '|';

/// One key of the GeoKey directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKey {
    pub id: u16,
    /// 0 for inline values, otherwise the tag holding the value
    pub location: u16,
    pub count: u16,
    /// The value itself, or the index into the referenced tag
    pub value: u16,
}

impl GeoKey {
    fn short(id: u16, value: u16) -> Self {
        GeoKey { id, location: 0, count: 1, value }
    }
}

/// Handles GeoTIFF tags and transformations
pub struct GeoTagsBuilder;

impl GeoTagsBuilder {
    /// Add the transformation and, when a CRS is known, the GeoKey directory
    pub fn add_georeferencing(ifd: &mut IFD, transform: &GeoTransform, crs: Option<&str>) {
        Self::add_transform(ifd, transform);

        match crs {
            Some(text) => {
                let description = CrsDescription::parse(text);
                info!("Georeferencing with {}", description);
                Self::add_geo_keys(ifd, &description);
            }
            None => info!("Profile has no CRS, writing transformation only"),
        }
    }

    /// Add the raster-to-model transformation
    ///
    /// North-up transforms are written as a pixel scale plus a tiepoint linking
    /// pixel (0, 0) to the upper-left corner. Anything rotated, sheared or flipped
    /// needs the full ModelTransformation matrix.
    pub fn add_transform(ifd: &mut IFD, transform: &GeoTransform) {
        let north_up = transform.is_rectilinear() && transform.a > 0.0 && transform.e < 0.0;

        if north_up {
            debug!("Writing pixel scale ({}, {}) and tiepoint ({}, {})",
                   transform.a, -transform.e, transform.c, transform.f);
            ifd.add_doubles(tags::MODEL_PIXEL_SCALE_TAG, &[transform.a, -transform.e, 0.0]);
            ifd.add_doubles(tags::MODEL_TIEPOINT_TAG, &[0.0, 0.0, 0.0, transform.c, transform.f, 0.0]);
        } else {
            debug!("Writing model transformation {:?}", transform.coefficients());
            let matrix = [
                transform.a, transform.b, 0.0, transform.c,
                transform.d, transform.e, 0.0, transform.f,
                0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ];
            ifd.add_doubles(tags::MODEL_TRANSFORMATION_TAG, &matrix);
        }
    }

    /// Add the GeoKey directory and its ASCII parameters
    pub fn add_geo_keys(ifd: &mut IFD, crs: &CrsDescription) {
        let (keys, ascii_params) = Self::build_keys(crs);

        let mut directory = vec![
            geo_keys::DIRECTORY_VERSION,
            geo_keys::KEY_REVISION,
            geo_keys::MINOR_REVISION,
            keys.len() as u16,
        ];
        for key in &keys {
            debug!("GeoKey {}: location {}, count {}, value {}", key.id, key.location, key.count, key.value);
            directory.extend_from_slice(&[key.id, key.location, key.count, key.value]);
        }

        ifd.add_shorts(tags::GEO_KEY_DIRECTORY_TAG, &directory);
        ifd.add_ascii(tags::GEO_ASCII_PARAMS_TAG, &ascii_params);
    }

    /// Keys sorted by id, plus the GeoAsciiParams text they reference
    pub fn build_keys(crs: &CrsDescription) -> (Vec<GeoKey>, String) {
        let citation = format!("{}{}", Self::citation_text(&crs.text), ASCII_PARAM_TERMINATOR);

        let model = match crs.kind {
            CrsKind::Projected => model_type::PROJECTED,
            CrsKind::Geographic => model_type::GEOGRAPHIC,
            CrsKind::Unknown => USER_DEFINED,
        };

        let mut keys = vec![
            GeoKey::short(geo_keys::GT_MODEL_TYPE, model),
            GeoKey::short(geo_keys::GT_RASTER_TYPE, raster_type::PIXEL_IS_AREA),
            GeoKey {
                id: geo_keys::GT_CITATION,
                location: tags::GEO_ASCII_PARAMS_TAG,
                count: citation.len().min(u16::MAX as usize) as u16,
                value: 0,
            },
        ];

        let code = crs
            .epsg
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(USER_DEFINED);

        match crs.kind {
            CrsKind::Geographic => keys.push(GeoKey::short(geo_keys::GEOGRAPHIC_TYPE, code)),
            CrsKind::Projected => {
                keys.push(GeoKey::short(geo_keys::PROJECTED_CS_TYPE, code));
                if crs.metre_units {
                    keys.push(GeoKey::short(geo_keys::PROJ_LINEAR_UNITS, LINEAR_UNIT_METRE));
                }
            }
            CrsKind::Unknown => {}
        }

        (keys, citation)
    }

    /// CRS text cut to what a GeoKey count can address, terminator included
    fn citation_text(text: &str) -> &str {
        let limit = u16::MAX as usize - ASCII_PARAM_TERMINATOR.len_utf8();
        if text.len() <= limit {
            return text;
        }
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        warn!("CRS citation of {} bytes truncated to {}", text.len(), end);
        &text[..end]
    }
}
