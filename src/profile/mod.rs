//! Raster profiles: the stored record, the preset table and resolution

pub mod presets;
pub mod raster_profile;
pub mod resolver;

pub use presets::{Preset, PresetTable};
pub use raster_profile::{Compression, GeoTransform, RasterProfile};
pub use resolver::{ProfileResolver, Resolution, ResolverOptions};
