//! Materialized layers and final profile preparation

pub mod element_type;
pub mod layer;
pub mod materializer;
pub mod preparation;

pub use element_type::ElementType;
pub use layer::{Layer, RasterData, Sample};
pub use preparation::{prepare_profile, ProfileOverrides};
