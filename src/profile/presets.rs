//! Preset profiles keyed by exact raster shape
//!
//! The built-in table is embedded from `presets.toml` and parsed once. Users
//! can extend it with their own file of the same format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::profile::raster_profile::RasterProfile;
use crate::raster::ElementType;

lazy_static! {
    static ref BUILTIN_PRESETS: PresetTable = {
        let content = include_str!("../../presets.toml");
        PresetTable::from_toml_str(content, "built-in presets").unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse built-in presets: {}", e);
            PresetTable::default()
        })
    };
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    preset: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    name: String,
    #[serde(flatten)]
    profile: RasterProfile,
}

/// A named prototype profile
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    /// Prototype without element type
    pub profile: RasterProfile,
}

/// Immutable mapping from (height, width) to a preset
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    entries: BTreeMap<(usize, usize), Preset>,
}

impl PresetTable {
    /// The table shipped with the binary
    pub fn builtin() -> Self {
        BUILTIN_PRESETS.clone()
    }

    /// Parse presets from TOML text
    pub fn from_toml_str(content: &str, source: &str) -> AppResult<Self> {
        let file: PresetFile = toml::from_str(content)
            .map_err(|e| AppError::InvalidPresets(format!("{}: {}", source, e)))?;

        let mut table = PresetTable::default();
        for entry in file.preset {
            let mut profile = entry.profile;
            if profile.dtype.take().is_some() {
                warn!("Preset {} declares a dtype; it is replaced by the dataset's at lookup", entry.name);
            }
            table.insert(Preset {
                name: entry.name,
                profile,
            });
        }

        debug!("Loaded {} presets from {}", table.len(), source);
        Ok(table)
    }

    /// Load presets from a TOML file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Add a preset, replacing any entry with the same shape
    pub fn insert(&mut self, preset: Preset) {
        let key = (preset.profile.height, preset.profile.width);
        if let Some(previous) = self.entries.insert(key, preset) {
            warn!("Preset {} for shape {:?} was replaced", previous.name, key);
        }
    }

    /// Merge another table into this one; its entries win
    pub fn extend(&mut self, other: PresetTable) {
        for (_, preset) in other.entries {
            self.insert(preset);
        }
    }

    pub fn get(&self, height: usize, width: usize) -> Option<&Preset> {
        self.entries.get(&(height, width))
    }

    /// Clone the prototype for an exact shape and fill in the element type
    pub fn lookup(&self, height: usize, width: usize, dtype: ElementType) -> Option<Preset> {
        self.get(height, width).map(|preset| {
            let mut preset = preset.clone();
            preset.profile.dtype = Some(dtype);
            preset
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::raster_profile::Compression;

    const SMALL: &str = r#"
        [[preset]]
        name = "tiny"
        crs = "EPSG:4326"
        transform = [0.5, 0.0, -10.0, 0.0, -0.5, 60.0]
        height = 4
        width = 6
    "#;

    #[test]
    fn test_builtin_presets() {
        let table = PresetTable::builtin();
        assert_eq!(table.len(), 2);

        let conus = table.get(33792, 48640).unwrap();
        assert_eq!(conus.name, "conus");
        assert_eq!(conus.profile.nodata, Some(99.0));
        assert_eq!(conus.profile.block_size(), Some((128, 128)));
        assert_eq!(conus.profile.compress, Some(Compression::Lzw));
        assert_eq!(conus.profile.dtype, None);

        let offshore = table.get(35780, 56332).unwrap();
        assert!(offshore.profile.crs.as_deref().unwrap().starts_with("PROJCS"));
        assert_eq!(offshore.profile.transform.c, -2641009.648820926);
    }

    #[test]
    fn test_lookup_requires_exact_shape() {
        let table = PresetTable::builtin();
        assert!(table.lookup(33792, 48641, ElementType::Float32).is_none());
        assert!(table.lookup(48640, 33792, ElementType::Float32).is_none());
    }

    #[test]
    fn test_lookup_clones_prototype() {
        let table = PresetTable::from_toml_str(SMALL, "test").unwrap();

        let first = table.lookup(4, 6, ElementType::Float32).unwrap();
        let second = table.lookup(4, 6, ElementType::UInt8).unwrap();

        assert_eq!(first.profile.dtype, Some(ElementType::Float32));
        assert_eq!(second.profile.dtype, Some(ElementType::UInt8));
        assert_eq!(table.get(4, 6).unwrap().profile.dtype, None);
    }

    #[test]
    fn test_extend_replaces_same_shape() {
        let mut table = PresetTable::builtin();
        let extra = PresetTable::from_toml_str(
            r#"
            [[preset]]
            name = "conus-v2"
            transform = [90.0, 0.0, 0.0, 0.0, -90.0, 0.0]
            height = 33792
            width = 48640
            "#,
            "extra",
        )
        .unwrap();

        table.extend(extra);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(33792, 48640).unwrap().name, "conus-v2");
    }

    #[test]
    fn test_invalid_presets() {
        let err = PresetTable::from_toml_str("[[preset]]\nname = 3", "bad").unwrap_err();
        assert!(matches!(err, AppError::InvalidPresets(_)));
    }
}
