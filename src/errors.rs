//! Error types for the conversion pipeline
//!
//! Every variant is fatal for the run: `main` reports it and exits with
//! status 1. Declining an approximate preset is not an error and never
//! shows up here.

use std::fmt;
use std::io;

use crate::tiff::errors::TiffError;

/// Errors raised while cataloguing, resolving, reading or writing a layer
#[derive(Debug)]
pub enum AppError {
    /// The input file holds no datasets
    EmptyCatalog(String),
    /// No stored profile and no usable fallback
    MissingProfile(String),
    /// The layer shape has no entry in the preset table
    NoKnownProfile {
        dataset: String,
        height: usize,
        width: usize,
    },
    /// Only 2D and 3D datasets can be converted
    UnsupportedRank { dataset: String, rank: usize },
    /// The dataset element type has no GeoTIFF sample representation
    UnsupportedElementType { dataset: String, dtype: String },
    /// Resolved profile disagrees with the materialized array
    ProfileMismatch {
        field: &'static str,
        profile: String,
        data: String,
    },
    /// A stored or preset profile could not be interpreted
    InvalidProfile { source: String, reason: String },
    /// A presets file could not be parsed
    InvalidPresets(String),
    /// The requested dataset does not exist in the catalog
    DatasetNotFound(String),
    /// Input ended while waiting for an answer at a prompt
    Aborted,
    /// Bad command line value
    InvalidArgument(String),
    /// HDF5 library error
    Hdf5(hdf5::Error),
    /// JSON error
    Json(serde_json::Error),
    /// I/O error
    Io(io::Error),
    /// GeoTIFF writer error
    Tiff(TiffError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::EmptyCatalog(path) => write!(f, "No layers found in file {}", path),
            AppError::MissingProfile(name) => write!(
                f,
                "Layer {} doesn't have a profile attribute and no fallback is available. Aborting",
                name
            ),
            AppError::NoKnownProfile { dataset, height, width } => write!(
                f,
                "Layer {} resolution ({}, {}) does not have a known profile. Aborting",
                dataset, height, width
            ),
            AppError::UnsupportedRank { dataset, rank } => write!(
                f,
                "Layer must have 2 or 3 dimensions to convert. {} has {}",
                dataset, rank
            ),
            AppError::UnsupportedElementType { dataset, dtype } => write!(
                f,
                "Layer {} has element type {}, which cannot be written to a GeoTIFF",
                dataset, dtype
            ),
            AppError::ProfileMismatch { field, profile, data } => write!(
                f,
                "Profile {} ({}) does not match the loaded data ({})",
                field, profile, data
            ),
            AppError::InvalidProfile { source, reason } => {
                write!(f, "Invalid profile from {}: {}", source, reason)
            }
            AppError::InvalidPresets(msg) => write!(f, "Invalid presets: {}", msg),
            AppError::DatasetNotFound(name) => write!(f, "Dataset not found: {}", name),
            AppError::Aborted => write!(f, "Aborted!"),
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::Hdf5(e) => write!(f, "HDF5 error: {}", e),
            AppError::Json(e) => write!(f, "Failed to parse JSON: {}", e),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Tiff(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<hdf5::Error> for AppError {
    fn from(err: hdf5::Error) -> AppError {
        AppError::Hdf5(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> AppError {
        AppError::Json(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> AppError {
        AppError::Io(err)
    }
}

impl From<TiffError> for AppError {
    fn from(err: TiffError) -> AppError {
        AppError::Tiff(err)
    }
}

/// Result type for pipeline operations
pub type AppResult<T> = Result<T, AppError>;
