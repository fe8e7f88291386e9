//! Profile resolution for a selected dataset
//!
//! Order of precedence:
//! 1. forced preset lookup (`--use-preset`)
//! 2. the stored `profile` attribute
//! 3. a preset for the exact shape, after the user confirms it

use log::{info, warn};

use crate::catalog::{AttributeValue, CatalogEntry};
use crate::console::Prompter;
use crate::errors::{AppError, AppResult};
use crate::profile::presets::PresetTable;
use crate::profile::raster_profile::RasterProfile;

const APPROXIMATE_PROFILE_QUESTION: &str = "There is a known profile for the resolution of this layer. \
     Should I attempt to use it to make a GeoTiff? Resulting georeferencing may not be valid.";

/// How the profile lookup behaves for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Ignore any stored profile and go straight to the preset table
    pub use_preset: bool,
    /// Never fall back to the preset table
    pub no_presets: bool,
}

/// Result of resolving a profile
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A profile to write with
    Resolved(RasterProfile),
    /// The user declined an approximate preset
    Declined,
}

/// Resolves the raster profile for a catalog entry
pub struct ProfileResolver<'a> {
    presets: &'a PresetTable,
    options: ResolverOptions,
}

impl<'a> ProfileResolver<'a> {
    pub fn new(presets: &'a PresetTable, options: ResolverOptions) -> Self {
        ProfileResolver { presets, options }
    }

    pub fn resolve(&self, entry: &CatalogEntry, prompter: &mut dyn Prompter) -> AppResult<Resolution> {
        if self.options.use_preset {
            info!("Ignoring stored profile of {}, using preset table", entry.name);
            return self.preset_for(entry).map(Resolution::Resolved);
        }

        if let Some(stored) = entry.stored_profile() {
            return Self::parse_stored(entry, stored).map(Resolution::Resolved);
        }

        prompter.echo(&format!(
            "Layer {} doesn't have a profile stored in the attributes.",
            entry.name
        ))?;

        if self.options.no_presets {
            return Err(AppError::MissingProfile(entry.name.clone()));
        }

        let profile = self.preset_for(entry)?;

        if !prompter.confirm(APPROXIMATE_PROFILE_QUESTION)? {
            prompter.echo("Bye!")?;
            return Ok(Resolution::Declined);
        }

        warn!("Using approximate preset profile for {}", entry.name);
        Ok(Resolution::Resolved(profile))
    }

    fn parse_stored(entry: &CatalogEntry, stored: &AttributeValue) -> AppResult<RasterProfile> {
        let source = format!("{} profile attribute", entry.name);
        match stored.as_text() {
            Some(text) => {
                info!("Using stored profile of {}", entry.name);
                RasterProfile::from_json(text, &source)
            }
            None => Err(AppError::InvalidProfile {
                source,
                reason: format!("expected JSON text, found {}", stored),
            }),
        }
    }

    /// Clone the preset matching the entry's 2D shape exactly
    fn preset_for(&self, entry: &CatalogEntry) -> AppResult<RasterProfile> {
        let (height, width) = entry
            .plane_shape()
            .ok_or_else(|| AppError::MissingProfile(entry.name.clone()))?;

        let dtype = entry.element_type.ok_or_else(|| AppError::UnsupportedElementType {
            dataset: entry.name.clone(),
            dtype: entry.type_label.clone(),
        })?;

        let preset = self
            .presets
            .lookup(height, width, dtype)
            .ok_or_else(|| AppError::NoKnownProfile {
                dataset: entry.name.clone(),
                height,
                width,
            })?;

        info!("Matched preset {} for shape ({}, {})", preset.name, height, width);
        Ok(preset.profile)
    }
}
