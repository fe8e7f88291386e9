//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod attributes_command;
pub mod convert_command;

pub use command_traits::{Command, CommandFactory, Outcome};
pub use attributes_command::AttributesCommand;
pub use convert_command::{ConvertCommand, ConvertOptions};

use std::path::PathBuf;

use clap::ArgMatches;
use crate::errors::{AppError, AppResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct H5ToGeotiffCommandFactory;

impl H5ToGeotiffCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        H5ToGeotiffCommandFactory
    }
}

impl Default for H5ToGeotiffCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for H5ToGeotiffCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> AppResult<Box<dyn Command>> {
        if args.get_flag("attributes") {
            Ok(Box::new(AttributesCommand::new(args)?))
        } else {
            Ok(Box::new(ConvertCommand::new(args)?))
        }
    }
}

/// The positional input file, which must exist
pub(crate) fn input_path(args: &ArgMatches) -> AppResult<PathBuf> {
    let path = args
        .get_one::<PathBuf>("input")
        .cloned()
        .ok_or_else(|| AppError::InvalidArgument("Missing input file".to_string()))?;

    if !path.exists() {
        return Err(AppError::InvalidArgument(format!(
            "File '{}' does not exist.",
            path.display()
        )));
    }
    Ok(path)
}
