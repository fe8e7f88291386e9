//! Fixed-width numeric element types
//!
//! Names follow the numpy/rasterio spelling (`float32`, `uint8`, ...) since
//! that is what stored profiles carry in their `dtype` field.

use std::fmt;
use std::str::FromStr;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use serde::{Deserialize, Serialize};

use crate::tiff::constants::sample_format;

/// Element type of a dataset, a loaded layer or a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ElementType {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    UInt64,
    Int64,
    Float32,
    Float64,
}

impl ElementType {
    /// Canonical (numpy) name
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::UInt8 => "uint8",
            ElementType::Int8 => "int8",
            ElementType::UInt16 => "uint16",
            ElementType::Int16 => "int16",
            ElementType::UInt32 => "uint32",
            ElementType::Int32 => "int32",
            ElementType::UInt64 => "uint64",
            ElementType::Int64 => "int64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }

    /// Size of one element in bytes
    pub fn size_bytes(&self) -> usize {
        match self {
            ElementType::UInt8 | ElementType::Int8 => 1,
            ElementType::UInt16 | ElementType::Int16 => 2,
            ElementType::UInt32 | ElementType::Int32 | ElementType::Float32 => 4,
            ElementType::UInt64 | ElementType::Int64 | ElementType::Float64 => 8,
        }
    }

    /// Value for the BitsPerSample tag
    pub fn bits_per_sample(&self) -> u16 {
        (self.size_bytes() * 8) as u16
    }

    /// Value for the SampleFormat tag
    pub fn sample_format(&self) -> u16 {
        match self {
            ElementType::UInt8 | ElementType::UInt16 | ElementType::UInt32 | ElementType::UInt64 => {
                sample_format::UNSIGNED
            }
            ElementType::Int8 | ElementType::Int16 | ElementType::Int32 | ElementType::Int64 => {
                sample_format::SIGNED
            }
            ElementType::Float32 | ElementType::Float64 => sample_format::IEEEFP,
        }
    }

    /// Map an HDF5 type descriptor to an element type
    ///
    /// Returns `None` for strings, compounds, enums and anything else that
    /// is not a plain fixed-width number.
    pub fn from_descriptor(descriptor: &TypeDescriptor) -> Option<Self> {
        match descriptor {
            TypeDescriptor::Unsigned(size) => Some(match size {
                IntSize::U1 => ElementType::UInt8,
                IntSize::U2 => ElementType::UInt16,
                IntSize::U4 => ElementType::UInt32,
                IntSize::U8 => ElementType::UInt64,
            }),
            TypeDescriptor::Integer(size) => Some(match size {
                IntSize::U1 => ElementType::Int8,
                IntSize::U2 => ElementType::Int16,
                IntSize::U4 => ElementType::Int32,
                IntSize::U8 => ElementType::Int64,
            }),
            TypeDescriptor::Float(FloatSize::U4) => Some(ElementType::Float32),
            TypeDescriptor::Float(FloatSize::U8) => Some(ElementType::Float64),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uint8" | "u1" | "byte" => Ok(ElementType::UInt8),
            "int8" | "i1" => Ok(ElementType::Int8),
            "uint16" | "u2" => Ok(ElementType::UInt16),
            "int16" | "i2" => Ok(ElementType::Int16),
            "uint32" | "u4" => Ok(ElementType::UInt32),
            "int32" | "i4" => Ok(ElementType::Int32),
            "uint64" | "u8" => Ok(ElementType::UInt64),
            "int64" | "i8" => Ok(ElementType::Int64),
            "float32" | "f4" => Ok(ElementType::Float32),
            "float64" | "f8" => Ok(ElementType::Float64),
            other => Err(format!("unknown dtype '{}'", other)),
        }
    }
}

impl TryFrom<String> for ElementType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.name().to_string()
    }
}
