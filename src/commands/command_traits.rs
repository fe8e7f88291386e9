//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application, enabling a clean separation of concerns.

use std::path::PathBuf;

use crate::console::Prompter;
use crate::errors::AppResult;

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A GeoTIFF was written to this path
    Written(PathBuf),
    /// Attributes were printed, nothing written
    AttributesShown,
    /// The user declined the approximate preset
    Declined,
}

/// Represents an executable command in the application
///
/// Command objects encapsulate the logic for a specific CLI operation,
/// allowing for separation of concerns and better testability. All user
/// interaction goes through the prompter.
pub trait Command {
    /// Execute the command
    fn execute(&self, prompter: &mut dyn Prompter) -> AppResult<Outcome>;
}

/// Factory for creating commands from CLI arguments
///
/// This trait defines the interface for command factories
/// which can parse CLI arguments and create the appropriate Command.
pub trait CommandFactory {
    /// Create a new Command instance based on CLI arguments
    fn create_command(&self, args: &clap::ArgMatches) -> AppResult<Box<dyn Command>>;
}
