//! Final profile preparation before writing
//!
//! Fills defaults from the loaded layer, applies command line overrides and
//! checks the profile against the array. A mismatch is never corrected.

use log::{info, warn};

use crate::errors::{AppError, AppResult};
use crate::profile::{Compression, RasterProfile};
use crate::raster::layer::Layer;
use crate::tiff::layout::ChunkLayout;

/// Caller-supplied changes to the resolved profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    /// Force LZW regardless of the stored compression
    pub force_lzw: bool,
    /// Tile size as (x, y); implies tiled output
    pub block_size: Option<(u32, u32)>,
}

/// Fill missing dtype and compression
pub fn apply_defaults(profile: &mut RasterProfile, layer: &Layer) {
    if profile.dtype.is_none() {
        profile.dtype = Some(layer.element_type());
    }
    if profile.compress.is_none() {
        profile.compress = Some(Compression::Lzw);
    }
    if profile.count != 1 {
        warn!("Profile declares {} bands; writing a single band", profile.count);
        profile.count = 1;
    }
}

pub fn apply_overrides(profile: &mut RasterProfile, overrides: &ProfileOverrides) {
    if overrides.force_lzw {
        info!("Forcing LZW compression");
        profile.compress = Some(Compression::Lzw);
    }
    if let Some((x, y)) = overrides.block_size {
        info!("Using {}x{} tiles", x, y);
        profile.blockxsize = Some(x);
        profile.blockysize = Some(y);
        profile.tiled = Some(true);
    }
}

/// Check element type and dimensions against the loaded array
pub fn validate(profile: &RasterProfile, layer: &Layer) -> AppResult<()> {
    let element_type = layer.element_type();
    if profile.dtype != Some(element_type) {
        return Err(AppError::ProfileMismatch {
            field: "dtype",
            profile: profile
                .dtype
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unset".to_string()),
            data: element_type.to_string(),
        });
    }

    let (rows, cols) = layer.shape();
    if profile.height != rows {
        return Err(AppError::ProfileMismatch {
            field: "height",
            profile: profile.height.to_string(),
            data: rows.to_string(),
        });
    }
    if profile.width != cols {
        return Err(AppError::ProfileMismatch {
            field: "width",
            profile: profile.width.to_string(),
            data: cols.to_string(),
        });
    }

    ChunkLayout::from_profile(profile, element_type).map_err(|e| AppError::InvalidProfile {
        source: format!("{} profile", layer.name),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Defaults, then overrides, then validation
pub fn prepare_profile(
    mut profile: RasterProfile,
    layer: &Layer,
    overrides: &ProfileOverrides,
) -> AppResult<RasterProfile> {
    apply_defaults(&mut profile, layer);
    apply_overrides(&mut profile, overrides);
    validate(&profile, layer)?;
    Ok(profile)
}
