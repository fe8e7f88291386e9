//! Table rendering for the dataset list and attribute display
//!
//! Tables use dynamic content arrangement, so long cells wrap to the width
//! of the controlling terminal when there is one.

use comfy_table::presets::ASCII_NO_BORDERS;
use comfy_table::{ContentArrangement, Table};

use crate::catalog::CatalogEntry;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per dataset: index, name, shape, dtype and optionally description
pub fn catalog_table(entries: &[CatalogEntry], show_descriptions: bool) -> Table {
    let mut table = base_table();

    let mut header = vec!["", "Name", "Shape", "dtype"];
    if show_descriptions {
        header.push("Description");
    }
    table.set_header(header);

    for (index, entry) in entries.iter().enumerate() {
        let mut row = vec![
            index.to_string(),
            entry.name.clone(),
            entry.shape_label(),
            entry.type_label.clone(),
        ];
        if show_descriptions {
            row.push(entry.description.clone().unwrap_or_default());
        }
        table.add_row(row);
    }

    table
}

/// Attribute/Value rows, or `None` when the dataset has no attributes
pub fn attribute_table(entry: &CatalogEntry) -> Option<Table> {
    if entry.attributes.is_empty() {
        return None;
    }

    let mut table = base_table();
    table.set_header(vec!["Attribute", "Value"]);
    for (name, value) in &entry.attributes {
        table.add_row(vec![name.clone(), value.to_string()]);
    }
    Some(table)
}
