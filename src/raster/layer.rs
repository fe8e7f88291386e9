//! In-memory 2D layers
//!
//! A `Layer` owns the materialized slice of one dataset. The element type is
//! carried by the `RasterData` variant so the array keeps its native type all
//! the way to the GeoTIFF writer.

use std::fmt;

use hdf5::H5Type;
use ndarray::{s, Array2};

use crate::raster::element_type::ElementType;
use crate::tiff::layout::{SampleSource, Window};

/// Primitive that can be stored as a GeoTIFF sample
pub trait Sample: H5Type + Copy + Default + PartialOrd + fmt::Display {
    const ELEMENT_TYPE: ElementType;

    /// Append the little-endian bytes of this value
    fn extend_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_sample {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Sample for $t {
                const ELEMENT_TYPE: ElementType = ElementType::$variant;

                fn extend_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_sample!(
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    u64 => UInt64,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
);

/// Typed 2D array data
#[derive(Debug, Clone, PartialEq)]
pub enum RasterData {
    UInt8(Array2<u8>),
    Int8(Array2<i8>),
    UInt16(Array2<u16>),
    Int16(Array2<i16>),
    UInt32(Array2<u32>),
    Int32(Array2<i32>),
    UInt64(Array2<u64>),
    Int64(Array2<i64>),
    Float32(Array2<f32>),
    Float64(Array2<f64>),
}

macro_rules! with_array {
    ($data:expr, $arr:ident => $body:expr) => {
        match $data {
            RasterData::UInt8($arr) => $body,
            RasterData::Int8($arr) => $body,
            RasterData::UInt16($arr) => $body,
            RasterData::Int16($arr) => $body,
            RasterData::UInt32($arr) => $body,
            RasterData::Int32($arr) => $body,
            RasterData::UInt64($arr) => $body,
            RasterData::Int64($arr) => $body,
            RasterData::Float32($arr) => $body,
            RasterData::Float64($arr) => $body,
        }
    };
}

impl RasterData {
    pub fn element_type(&self) -> ElementType {
        with_array!(self, arr => element_type_of(arr))
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        with_array!(self, arr => arr.dim())
    }

    /// Smallest and largest value, ignoring NaN
    pub fn value_range(&self) -> Option<(String, String)> {
        with_array!(self, arr => value_range(arr))
    }

    fn window_bytes(&self, window: &Window) -> Vec<u8> {
        with_array!(self, arr => window_bytes(arr, window))
    }
}

fn element_type_of<T: Sample>(_arr: &Array2<T>) -> ElementType {
    T::ELEMENT_TYPE
}

fn value_range<T: Sample>(arr: &Array2<T>) -> Option<(String, String)> {
    let mut values = arr.iter().copied().filter(|v| v.partial_cmp(v).is_some());
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    });
    Some((min.to_string(), max.to_string()))
}

fn window_bytes<T: Sample>(arr: &Array2<T>, window: &Window) -> Vec<u8> {
    let element_size = T::ELEMENT_TYPE.size_bytes();
    let mut out = Vec::with_capacity(window.padded_rows * window.padded_cols * element_size);

    let view = arr.slice(s![window.rows.clone(), window.cols.clone()]);
    let pad_cols = window.padded_cols - window.cols.len();

    for row in view.rows() {
        for &value in row.iter() {
            value.extend_le(&mut out);
        }
        out.resize(out.len() + pad_cols * element_size, 0);
    }

    let pad_rows = window.padded_rows - window.rows.len();
    out.resize(out.len() + pad_rows * window.padded_cols * element_size, 0);
    out
}

/// One materialized 2D layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Dataset name the layer was read from
    pub name: String,
    /// Free-text description attribute, if any
    pub description: Option<String>,
    pub data: RasterData,
}

impl Layer {
    pub fn new(name: impl Into<String>, data: RasterData) -> Self {
        Layer {
            name: name.into(),
            description: None,
            data,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    /// One-line summary printed after loading
    pub fn summary(&self) -> String {
        let (rows, cols) = self.shape();
        let (min, max) = self
            .data
            .value_range()
            .unwrap_or_else(|| ("nan".to_string(), "nan".to_string()));
        format!(
            "Loaded. Shape: ({}, {}), min: {}, max: {}, dtype: {}",
            rows,
            cols,
            min,
            max,
            self.element_type()
        )
    }
}

impl SampleSource for Layer {
    fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    fn dimensions(&self) -> (usize, usize) {
        self.data.shape()
    }

    fn window_bytes(&self, window: &Window) -> Vec<u8> {
        self.data.window_bytes(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_summary_ignores_nan() {
        let layer = Layer::new(
            "temp",
            RasterData::Float32(array![[1.5, f32::NAN], [-2.0, 7.25]]),
        );
        assert_eq!(
            layer.summary(),
            "Loaded. Shape: (2, 2), min: -2, max: 7.25, dtype: float32"
        );
    }

    #[test]
    fn test_window_bytes_pads_edge_tiles() {
        let layer = Layer::new("mask", RasterData::UInt8(array![[1, 2, 3], [4, 5, 6]]));
        let window = Window {
            rows: 1..2,
            cols: 2..3,
            padded_rows: 2,
            padded_cols: 2,
        };
        assert_eq!(layer.window_bytes(&window), vec![6, 0, 0, 0]);
    }

    #[test]
    fn test_window_bytes_little_endian() {
        let layer = Layer::new("depth", RasterData::Int16(array![[-2, 258]]));
        let window = Window {
            rows: 0..1,
            cols: 0..2,
            padded_rows: 1,
            padded_cols: 2,
        };
        assert_eq!(layer.window_bytes(&window), vec![0xFE, 0xFF, 0x02, 0x01]);
    }
}
