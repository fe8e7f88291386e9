//! TIFF builder strategy modules
//!
//! This module contains strategy implementations for the GeoTiffBuilder,
//! organized by functionality category.

pub mod basic_tags;
pub mod geo_tags;
pub mod metadata_tags;
pub mod writer;
