//! Raster profile record
//!
//! The profile is the rasterio-style dictionary that describes how a layer is
//! georeferenced and encoded. It is stored as JSON in the `profile` attribute
//! of a dataset, or comes from the preset table.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::raster::ElementType;

/// Affine transform in rasterio coefficient order
///
/// `x = a * col + b * row + c`, `y = d * col + e * row + f`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Vec<f64>")]
pub struct GeoTransform {
    /// Pixel width
    pub a: f64,
    /// Row rotation
    pub b: f64,
    /// Origin x
    pub c: f64,
    /// Column rotation
    pub d: f64,
    /// Pixel height (negative for north-up)
    pub e: f64,
    /// Origin y
    pub f: f64,
}

impl GeoTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        GeoTransform { a, b, c, d, e, f }
    }

    /// Build from 6 coefficients, or 9 when given as a full affine matrix
    pub fn from_coefficients(values: &[f64]) -> Result<Self, String> {
        match values {
            [a, b, c, d, e, f] => Ok(GeoTransform::new(*a, *b, *c, *d, *e, *f)),
            [a, b, c, d, e, f, g, h, i] => {
                if *g != 0.0 || *h != 0.0 || *i != 1.0 {
                    return Err(format!(
                        "transform last row must be [0, 0, 1], got [{}, {}, {}]",
                        g, h, i
                    ));
                }
                Ok(GeoTransform::new(*a, *b, *c, *d, *e, *f))
            }
            _ => Err(format!(
                "transform needs 6 or 9 coefficients, got {}",
                values.len()
            )),
        }
    }

    /// True when there is no rotation or shear
    pub fn is_rectilinear(&self) -> bool {
        self.b == 0.0 && self.d == 0.0
    }

    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl From<GeoTransform> for Vec<f64> {
    fn from(t: GeoTransform) -> Self {
        t.coefficients().to_vec()
    }
}

impl<'de> Deserialize<'de> for GeoTransform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        GeoTransform::from_coefficients(&values).map_err(de::Error::custom)
    }
}

/// Compression mode of the output raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Compression {
    None,
    Lzw,
    Deflate,
    Zstd,
}

impl Compression {
    pub fn name(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Lzw => "lzw",
            Compression::Deflate => "deflate",
            Compression::Zstd => "zstd",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "uncompressed" => Ok(Compression::None),
            "lzw" => Ok(Compression::Lzw),
            "deflate" | "zip" | "adobe deflate" => Ok(Compression::Deflate),
            "zstd" => Ok(Compression::Zstd),
            other => Err(format!("unsupported compression '{}'", other)),
        }
    }
}

impl TryFrom<String> for Compression {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Compression> for String {
    fn from(value: Compression) -> Self {
        value.name().to_string()
    }
}

fn default_count() -> u32 {
    1
}

/// Accepts a CRS string or a rasterio CRS mapping such as `{"init": "epsg:4326"}`
fn deserialize_crs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Object(map)) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(key, value)| match value {
                    Value::Bool(true) => format!("+{}", key),
                    Value::String(s) => format!("+{}={}", key, s),
                    other => format!("+{}={}", key, other),
                })
                .collect();
            Ok(Some(parts.join(" ")))
        }
        Some(other) => Err(de::Error::custom(format!("unsupported crs value: {}", other))),
    }
}

/// Georeferencing and encoding metadata for one output raster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, deserialize_with = "deserialize_crs")]
    pub crs: Option<String>,
    pub transform: GeoTransform,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtype: Option<ElementType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<Compression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockxsize: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockysize: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodata: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interleave: Option<String>,
}

impl RasterProfile {
    /// Parse a profile stored as JSON text
    pub fn from_json(text: &str, source: &str) -> AppResult<Self> {
        serde_json::from_str(text).map_err(|e| AppError::InvalidProfile {
            source: source.to_string(),
            reason: e.to_string(),
        })
    }

    /// Whether the writer should lay the raster out in tiles
    pub fn is_tiled(&self) -> bool {
        self.tiled.unwrap_or(false)
    }

    /// Block size as (x, y), if both are set
    pub fn block_size(&self) -> Option<(u32, u32)> {
        match (self.blockxsize, self.blockysize) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = r#"{
        "driver": "GTiff",
        "dtype": "float32",
        "nodata": null,
        "width": 6,
        "height": 4,
        "count": 1,
        "crs": "EPSG:5070",
        "transform": [30.0, 0.0, -2356095.0, 0.0, -30.0, 3172605.0, 0.0, 0.0, 1.0],
        "tiled": false,
        "interleave": "band"
    }"#;

    #[test]
    fn test_parse_rasterio_profile() {
        let profile = RasterProfile::from_json(STORED, "temp").unwrap();
        assert_eq!(profile.dtype, Some(ElementType::Float32));
        assert_eq!(profile.crs.as_deref(), Some("EPSG:5070"));
        assert_eq!(profile.transform.a, 30.0);
        assert_eq!(profile.transform.f, 3172605.0);
        assert_eq!(profile.compress, None);
        assert_eq!(profile.nodata, None);
        assert!(!profile.is_tiled());
    }

    #[test]
    fn test_crs_mapping_is_flattened() {
        let json = r#"{"crs": {"init": "epsg:4326"}, "transform": [1, 0, 0, 0, -1, 0],
                       "width": 1, "height": 1}"#;
        let profile = RasterProfile::from_json(json, "mapping").unwrap();
        assert_eq!(profile.crs.as_deref(), Some("+init=epsg:4326"));
        assert_eq!(profile.count, 1);
    }

    #[test]
    fn test_bad_transform_is_rejected() {
        let json = r#"{"transform": [1, 0, 0, 0, -1], "width": 1, "height": 1}"#;
        let err = RasterProfile::from_json(json, "broken").unwrap_err();
        assert!(matches!(err, AppError::InvalidProfile { .. }));

        let skewed = [1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0, 1.0];
        assert!(GeoTransform::from_coefficients(&skewed).is_err());
    }

    #[test]
    fn test_compression_names() {
        assert_eq!("LZW".parse::<Compression>(), Ok(Compression::Lzw));
        assert_eq!("zip".parse::<Compression>(), Ok(Compression::Deflate));
        assert!("jpeg".parse::<Compression>().is_err());
    }
}
