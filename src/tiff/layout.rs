//! Chunk layout of a written raster
//!
//! A raster is written either as horizontal strips or as square-ish tiles.
//! [`ChunkLayout`] decides which from the profile and yields one [`Window`]
//! per chunk in file order (row-major over tiles).

use std::ops::Range;

use crate::profile::RasterProfile;
use crate::raster::ElementType;
use crate::tiff::errors::{TiffError, TiffResult};

/// Tile edge used when a tiled profile does not give one
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Target size of an uncompressed strip in bytes
pub const TARGET_STRIP_BYTES: usize = 8 * 1024;

/// Tile edges must be multiples of this
const TILE_MULTIPLE: u32 = 16;

/// Region of the raster covered by one chunk
///
/// `padded_rows` and `padded_cols` give the size of the chunk in the file.
/// Anything beyond `rows`/`cols` is filled with zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub padded_rows: usize,
    pub padded_cols: usize,
}

/// Anything that can hand out little-endian sample bytes for a window
pub trait SampleSource {
    fn element_type(&self) -> ElementType;

    /// (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    fn window_bytes(&self, window: &Window) -> Vec<u8>;
}

/// Strip or tile organisation of the image data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Strips { rows_per_strip: usize },
    Tiles { tile_width: usize, tile_height: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkLayout {
    pub width: usize,
    pub height: usize,
    pub kind: ChunkKind,
}

impl ChunkLayout {
    /// Work out the layout for a profile
    ///
    /// Tiled profiles use `blockxsize`/`blockysize` as the tile size, falling
    /// back to 256. Striped profiles use `blockysize` as rows per strip, or
    /// enough rows to fill about 8 KiB.
    pub fn from_profile(profile: &RasterProfile, element_type: ElementType) -> TiffResult<Self> {
        if profile.width == 0 || profile.height == 0 {
            return Err(TiffError::InvalidLayout(format!(
                "raster of {}x{} pixels has nothing to write",
                profile.width, profile.height
            )));
        }

        let kind = if profile.is_tiled() {
            let tile_width = profile.blockxsize.unwrap_or(DEFAULT_TILE_SIZE);
            let tile_height = profile.blockysize.unwrap_or(DEFAULT_TILE_SIZE);
            for (axis, size) in [("width", tile_width), ("height", tile_height)] {
                if size == 0 || size % TILE_MULTIPLE != 0 {
                    return Err(TiffError::InvalidLayout(format!(
                        "tile {} {} is not a positive multiple of {}",
                        axis, size, TILE_MULTIPLE
                    )));
                }
            }
            ChunkKind::Tiles {
                tile_width: tile_width as usize,
                tile_height: tile_height as usize,
            }
        } else {
            let rows_per_strip = match profile.blockysize {
                Some(rows) if rows > 0 => rows as usize,
                _ => {
                    let row_bytes = profile.width * element_type.size_bytes();
                    (TARGET_STRIP_BYTES / row_bytes.max(1)).max(1)
                }
            };
            ChunkKind::Strips {
                rows_per_strip: rows_per_strip.min(profile.height),
            }
        };

        Ok(ChunkLayout {
            width: profile.width,
            height: profile.height,
            kind,
        })
    }

    /// Chunks across and down
    pub fn grid(&self) -> (usize, usize) {
        match self.kind {
            ChunkKind::Strips { rows_per_strip } => (1, self.height.div_ceil(rows_per_strip)),
            ChunkKind::Tiles { tile_width, tile_height } => {
                (self.width.div_ceil(tile_width), self.height.div_ceil(tile_height))
            }
        }
    }

    pub fn chunk_count(&self) -> usize {
        let (across, down) = self.grid();
        across * down
    }

    /// Windows in the order the chunks are stored
    pub fn windows(&self) -> impl Iterator<Item = Window> + '_ {
        let (across, down) = self.grid();
        (0..down).flat_map(move |row| (0..across).map(move |col| self.window(row, col)))
    }

    fn window(&self, grid_row: usize, grid_col: usize) -> Window {
        match self.kind {
            ChunkKind::Strips { rows_per_strip } => {
                let start = grid_row * rows_per_strip;
                let end = (start + rows_per_strip).min(self.height);
                Window {
                    rows: start..end,
                    cols: 0..self.width,
                    padded_rows: end - start,
                    padded_cols: self.width,
                }
            }
            ChunkKind::Tiles { tile_width, tile_height } => {
                let row_start = grid_row * tile_height;
                let col_start = grid_col * tile_width;
                Window {
                    rows: row_start..(row_start + tile_height).min(self.height),
                    cols: col_start..(col_start + tile_width).min(self.width),
                    padded_rows: tile_height,
                    padded_cols: tile_width,
                }
            }
        }
    }

    /// Uncompressed size of all chunks, padding included
    pub fn raw_size(&self, element_type: ElementType) -> u64 {
        let (across, down) = self.grid();
        let element_size = element_type.size_bytes() as u64;
        match self.kind {
            ChunkKind::Strips { .. } => self.width as u64 * self.height as u64 * element_size,
            ChunkKind::Tiles { tile_width, tile_height } => {
                (across * down) as u64 * tile_width as u64 * tile_height as u64 * element_size
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(width: usize, height: usize) -> RasterProfile {
        RasterProfile::from_json(
            &format!(r#"{{"transform": [1, 0, 0, 0, -1, 0], "width": {}, "height": {}}}"#, width, height),
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_default_strips_fill_eight_kib() {
        let layout = ChunkLayout::from_profile(&profile(1024, 100), ElementType::Float32).unwrap();
        assert_eq!(layout.kind, ChunkKind::Strips { rows_per_strip: 2 });
        assert_eq!(layout.chunk_count(), 50);
    }

    #[test]
    fn test_wide_rows_get_one_row_per_strip() {
        let layout = ChunkLayout::from_profile(&profile(10_000, 3), ElementType::Float64).unwrap();
        assert_eq!(layout.kind, ChunkKind::Strips { rows_per_strip: 1 });
    }

    #[test]
    fn test_strip_size_from_block_height() {
        let mut p = profile(10, 7);
        p.blockysize = Some(3);
        let layout = ChunkLayout::from_profile(&p, ElementType::UInt8).unwrap();

        let windows: Vec<_> = layout.windows().collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2].rows, 6..7);
        assert_eq!(windows[2].padded_rows, 1);
    }

    #[test]
    fn test_tiles_cover_edges_with_padding() {
        let mut p = profile(40, 20);
        p.tiled = Some(true);
        p.blockxsize = Some(32);
        p.blockysize = Some(16);
        let layout = ChunkLayout::from_profile(&p, ElementType::Int16).unwrap();

        assert_eq!(layout.grid(), (2, 2));
        let windows: Vec<_> = layout.windows().collect();
        assert_eq!(windows[1].cols, 32..40);
        assert_eq!(windows[1].padded_cols, 32);
        assert_eq!(windows[3].rows, 16..20);
        assert_eq!(layout.raw_size(ElementType::Int16), 4 * 32 * 16 * 2);
    }

    #[test]
    fn test_tile_size_must_be_multiple_of_sixteen() {
        let mut p = profile(40, 20);
        p.tiled = Some(true);
        p.blockxsize = Some(100);
        p.blockysize = Some(16);
        assert!(matches!(
            ChunkLayout::from_profile(&p, ElementType::UInt8),
            Err(TiffError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_tiled_without_block_size_uses_default() {
        let mut p = profile(300, 10);
        p.tiled = Some(true);
        let layout = ChunkLayout::from_profile(&p, ElementType::UInt8).unwrap();
        assert_eq!(layout.kind, ChunkKind::Tiles { tile_width: 256, tile_height: 256 });
        assert_eq!(layout.grid(), (2, 1));
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        assert!(ChunkLayout::from_profile(&profile(0, 4), ElementType::UInt8).is_err());
    }
}
