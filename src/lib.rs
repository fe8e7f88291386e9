pub mod errors;
pub mod catalog;
pub mod console;
pub mod profile;
pub mod raster;
pub mod tiff;
pub mod utils;
pub mod compression;
pub mod coordinate;
pub mod commands;

pub use errors::{AppError, AppResult};
pub use catalog::{Catalog, CatalogEntry};
pub use commands::{Command, CommandFactory, ConvertCommand, ConvertOptions, Outcome};
pub use profile::{PresetTable, RasterProfile};
pub use raster::Layer;
pub use tiff::GeoTiffBuilder;
