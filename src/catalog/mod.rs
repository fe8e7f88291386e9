//! Dataset catalog of the input HDF5 file

pub mod entry;
pub mod reader;

pub use entry::{AttributeValue, CatalogEntry, DESCRIPTION_ATTR, PROFILE_ATTR};
pub use reader::Catalog;
