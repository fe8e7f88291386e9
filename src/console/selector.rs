//! Dataset selection and attribute display

use log::info;

use crate::catalog::CatalogEntry;
use crate::console::prompter::Prompter;
use crate::console::table;
use crate::errors::AppResult;

/// Show the dataset table and return the entry the user picks
pub fn select_entry<'a>(
    entries: &'a [CatalogEntry],
    show_descriptions: bool,
    prompter: &mut dyn Prompter,
) -> AppResult<&'a CatalogEntry> {
    prompter.echo(&table::catalog_table(entries, show_descriptions).to_string())?;
    prompter.echo("")?;

    let index = prompter.prompt_index("Select layer by number", entries.len())?;
    let entry = &entries[index];
    info!("Selected dataset #{}: {}", index, entry.name);
    Ok(entry)
}

/// Print every attribute of a dataset
pub fn show_attributes(entry: &CatalogEntry, prompter: &mut dyn Prompter) -> AppResult<()> {
    prompter.echo("")?;
    match table::attribute_table(entry) {
        Some(table) => prompter.echo(&table.to_string()),
        None => prompter.echo("Layer has no attributes"),
    }
}
