//! Attribute display command
//!
//! Lets the user pick a dataset and prints its attributes instead of
//! converting it.

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::catalog::Catalog;
use crate::commands::command_traits::{Command, Outcome};
use crate::commands::input_path;
use crate::console::{select_entry, show_attributes, Prompter};
use crate::errors::AppResult;

/// Command for printing the attributes of one dataset
pub struct AttributesCommand {
    /// Path to the HDF5 file
    input_file: PathBuf,
    /// Show dataset descriptions in the selection table
    show_descriptions: bool,
}

impl AttributesCommand {
    /// Create a new attributes command from CLI arguments
    pub fn new(args: &ArgMatches) -> AppResult<Self> {
        Ok(AttributesCommand {
            input_file: input_path(args)?,
            show_descriptions: args.get_flag("descriptions"),
        })
    }

    pub fn with_input(input_file: PathBuf, show_descriptions: bool) -> Self {
        AttributesCommand {
            input_file,
            show_descriptions,
        }
    }
}

impl Command for AttributesCommand {
    fn execute(&self, prompter: &mut dyn Prompter) -> AppResult<Outcome> {
        let catalog = Catalog::open(&self.input_file)?;
        let entry = select_entry(catalog.entries(), self.show_descriptions, prompter)?;

        info!("Showing {} attributes of {}", entry.attributes.len(), entry.name);
        show_attributes(entry, prompter)?;
        Ok(Outcome::AttributesShown)
    }
}
