//! Coordinate reference system handling for geospatial data

mod crs;

pub use self::crs::{CrsDescription, CrsKind};
