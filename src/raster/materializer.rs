//! Reads the 2D plane of a dataset into memory

use hdf5::Dataset;
use log::info;
use ndarray::{Array2, Ix2};

use crate::catalog::CatalogEntry;
use crate::errors::{AppError, AppResult};
use crate::raster::element_type::ElementType;
use crate::raster::layer::{Layer, RasterData, Sample};

/// Materialize a dataset as a 2D layer
///
/// Rank 3 data is read at index 0 of the leading axis, rank 2 data whole.
/// Any other rank is rejected.
pub fn materialize(dataset: &Dataset, entry: &CatalogEntry) -> AppResult<Layer> {
    let rank = entry.rank();
    if rank != 2 && rank != 3 {
        return Err(AppError::UnsupportedRank {
            dataset: entry.name.clone(),
            rank,
        });
    }

    let element_type = entry
        .element_type
        .ok_or_else(|| AppError::UnsupportedElementType {
            dataset: entry.name.clone(),
            dtype: entry.type_label.clone(),
        })?;

    info!("Reading {} plane of {} ({})", entry.shape_label(), entry.name, element_type);

    let data = match element_type {
        ElementType::UInt8 => RasterData::UInt8(read_plane(dataset, rank)?),
        ElementType::Int8 => RasterData::Int8(read_plane(dataset, rank)?),
        ElementType::UInt16 => RasterData::UInt16(read_plane(dataset, rank)?),
        ElementType::Int16 => RasterData::Int16(read_plane(dataset, rank)?),
        ElementType::UInt32 => RasterData::UInt32(read_plane(dataset, rank)?),
        ElementType::Int32 => RasterData::Int32(read_plane(dataset, rank)?),
        ElementType::UInt64 => RasterData::UInt64(read_plane(dataset, rank)?),
        ElementType::Int64 => RasterData::Int64(read_plane(dataset, rank)?),
        ElementType::Float32 => RasterData::Float32(read_plane(dataset, rank)?),
        ElementType::Float64 => RasterData::Float64(read_plane(dataset, rank)?),
    };

    Ok(Layer::new(entry.name.clone(), data).with_description(entry.description.clone()))
}

fn read_plane<T: Sample>(dataset: &Dataset, rank: usize) -> hdf5::Result<Array2<T>> {
    if rank == 3 {
        dataset.read_slice::<T, _, Ix2>((0, .., ..))
    } else {
        dataset.read_2d::<T>()
    }
}
