//! GeoTIFF writing module
//!
//! This module provides the structures and functions for writing a single
//! band raster as a TIFF or BigTIFF file with GeoTIFF georeferencing.

pub mod errors;
pub mod ifd;
pub mod layout;
mod tests;
pub mod builder;
pub mod builders;
pub(crate) mod constants;

pub use errors::{TiffError, TiffResult};
pub use ifd::{IFD, IFDEntry};
pub use layout::{ChunkKind, ChunkLayout, SampleSource, Window};
pub use builder::GeoTiffBuilder;
