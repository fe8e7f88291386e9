//! HDF5 catalog reader
//!
//! Opens the input file, lists its top-level datasets and keeps the file
//! handle alive until the catalog is dropped.

use std::collections::BTreeMap;
use std::path::Path;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Dataset, File};
use log::{debug, info, warn};

use crate::catalog::entry::{AttributeValue, CatalogEntry, DESCRIPTION_ATTR};
use crate::errors::{AppError, AppResult};
use crate::raster::{materializer, ElementType, Layer};

/// Datasets of an open HDF5 file
pub struct Catalog {
    path: String,
    file: File,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Open a file and enumerate its top-level datasets
    ///
    /// Fails with `EmptyCatalog` when the file holds no datasets.
    pub fn open(path: &Path) -> AppResult<Self> {
        let display_path = path.display().to_string();
        info!("Opening {}", display_path);

        let file = File::open(path)?;
        let mut entries = Vec::new();
        for dataset in file.datasets()? {
            entries.push(read_entry(&dataset)?);
        }

        if entries.is_empty() {
            return Err(AppError::EmptyCatalog(display_path));
        }

        info!("Found {} datasets in {}", entries.len(), display_path);
        Ok(Catalog {
            path: display_path,
            file,
            entries,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, name: &str) -> AppResult<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| AppError::DatasetNotFound(name.to_string()))
    }

    /// Read the 2D plane of a dataset into memory
    pub fn read_layer(&self, name: &str) -> AppResult<Layer> {
        let entry = self.entry(name)?;
        let dataset = self.file.dataset(name)?;
        materializer::materialize(&dataset, entry)
    }
}

fn read_entry(dataset: &Dataset) -> AppResult<CatalogEntry> {
    let name = dataset.name().trim_start_matches('/').to_string();
    let shape = dataset.shape();
    let descriptor = dataset.dtype()?.to_descriptor()?;
    let element_type = ElementType::from_descriptor(&descriptor);
    let type_label = match element_type {
        Some(t) => t.name().to_string(),
        None => describe_type(&descriptor),
    };

    let mut attributes = BTreeMap::new();
    for attr_name in dataset.attr_names()? {
        match read_attribute(dataset, &attr_name) {
            Ok(value) => {
                attributes.insert(attr_name, value);
            }
            Err(e) => {
                warn!("Could not read attribute {} of {}: {}", attr_name, name, e);
                attributes.insert(attr_name, AttributeValue::Unsupported("unreadable".to_string()));
            }
        }
    }

    let description = attributes
        .get(DESCRIPTION_ATTR)
        .and_then(AttributeValue::as_text)
        .map(str::to_string);

    debug!("Dataset {}: shape {:?}, type {}, {} attributes", name, shape, type_label, attributes.len());

    Ok(CatalogEntry {
        name,
        shape,
        element_type,
        type_label,
        description,
        attributes,
    })
}

/// Largest fixed-length string attribute read as text, in bytes
const FIXED_STRING_CAPACITY: usize = 16 * 1024;

fn read_attribute(dataset: &Dataset, name: &str) -> hdf5::Result<AttributeValue> {
    let attr = dataset.attr(name)?;
    let descriptor = attr.dtype()?.to_descriptor()?;
    let scalar = attr.ndim() == 0;

    let value = match descriptor {
        TypeDescriptor::VarLenUnicode if scalar => {
            AttributeValue::Text(attr.read_scalar::<VarLenUnicode>()?.as_str().to_string())
        }
        TypeDescriptor::VarLenAscii if scalar => {
            AttributeValue::Text(attr.read_scalar::<VarLenAscii>()?.as_str().to_string())
        }
        // HDF5 converts between fixed string sizes, padding the shorter one
        TypeDescriptor::FixedAscii(size) if scalar && size <= FIXED_STRING_CAPACITY => {
            let value = attr.read_scalar::<FixedAscii<FIXED_STRING_CAPACITY>>()?;
            AttributeValue::Text(value.as_str().to_string())
        }
        TypeDescriptor::FixedUnicode(size) if scalar && size <= FIXED_STRING_CAPACITY => {
            let value = attr.read_scalar::<FixedUnicode<FIXED_STRING_CAPACITY>>()?;
            AttributeValue::Text(value.as_str().to_string())
        }
        TypeDescriptor::VarLenUnicode => {
            let items: Vec<String> = attr
                .read_raw::<VarLenUnicode>()?
                .iter()
                .map(|s| s.as_str().to_string())
                .collect();
            AttributeValue::Text(items.join(", "))
        }
        TypeDescriptor::Integer(_) if scalar => AttributeValue::Integer(attr.read_scalar::<i64>()?),
        TypeDescriptor::Unsigned(_) if scalar => {
            let value = attr.read_scalar::<u64>()?;
            match i64::try_from(value) {
                Ok(v) => AttributeValue::Integer(v),
                Err(_) => AttributeValue::Float(value as f64),
            }
        }
        TypeDescriptor::Float(_) if scalar => AttributeValue::Float(attr.read_scalar::<f64>()?),
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_) => {
            AttributeValue::Sequence(attr.read_raw::<f64>()?)
        }
        other => AttributeValue::Unsupported(describe_type(&other)),
    };

    Ok(value)
}

fn describe_type(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::VarLenUnicode
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::FixedAscii(_)
        | TypeDescriptor::FixedUnicode(_) => "string".to_string(),
        TypeDescriptor::Boolean => "bool".to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}
