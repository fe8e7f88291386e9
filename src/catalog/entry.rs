//! Catalog entries and attribute values

use std::collections::BTreeMap;
use std::fmt;

use crate::raster::ElementType;

/// Attribute holding the free-text dataset description
pub const DESCRIPTION_ATTR: &str = "description";
/// Attribute holding the JSON-serialized raster profile
pub const PROFILE_ATTR: &str = "profile";

/// Value of a dataset attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Sequence(Vec<f64>),
    /// Stored type we do not interpret; carries a label for display
    Unsupported(String),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Sequence(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            AttributeValue::Unsupported(label) => write!(f, "<{}>", label),
        }
    }
}

/// One top-level dataset of the input file
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub shape: Vec<usize>,
    /// `None` when the stored type is not a fixed-width number
    pub element_type: Option<ElementType>,
    /// Printable type name, also for unsupported types
    pub type_label: String,
    pub description: Option<String>,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl CatalogEntry {
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// (height, width) of the 2D plane that would be converted
    ///
    /// For 3D data the leading axis is the band axis.
    pub fn plane_shape(&self) -> Option<(usize, usize)> {
        match self.shape.as_slice() {
            [height, width] | [_, height, width] => Some((*height, *width)),
            _ => None,
        }
    }

    /// Shape written the way Python prints tuples
    pub fn shape_label(&self) -> String {
        match self.shape.as_slice() {
            [single] => format!("({},)", single),
            dims => {
                let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                format!("({})", parts.join(", "))
            }
        }
    }

    /// The stored `profile` attribute, if any
    pub fn stored_profile(&self) -> Option<&AttributeValue> {
        self.attributes.get(PROFILE_ATTR)
    }
}
