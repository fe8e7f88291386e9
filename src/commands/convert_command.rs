//! HDF5 to GeoTIFF conversion command
//!
//! This module implements the main pipeline: select a dataset, resolve its
//! profile, materialize the 2D plane, prepare the profile and write the
//! GeoTIFF.

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;

use crate::catalog::Catalog;
use crate::commands::command_traits::{Command, Outcome};
use crate::commands::input_path;
use crate::console::{select_entry, Prompter};
use crate::errors::{AppError, AppResult};
use crate::profile::{PresetTable, ProfileResolver, Resolution, ResolverOptions};
use crate::raster::{prepare_profile, ProfileOverrides};
use crate::tiff::GeoTiffBuilder;

/// Everything the conversion needs besides the user's answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Path to the HDF5 file
    pub input_file: PathBuf,
    /// Directory the GeoTIFF is written to
    pub output_dir: PathBuf,
    /// Show dataset descriptions in the selection table
    pub show_descriptions: bool,
    /// Extra presets merged over the built-in table
    pub presets_file: Option<PathBuf>,
    pub resolver: ResolverOptions,
    pub overrides: ProfileOverrides,
    /// Draw a progress bar while encoding
    pub show_progress: bool,
}

impl ConvertOptions {
    /// Defaults for converting `input_file` into the current directory
    pub fn new(input_file: impl Into<PathBuf>) -> Self {
        ConvertOptions {
            input_file: input_file.into(),
            output_dir: PathBuf::from("."),
            show_descriptions: false,
            presets_file: None,
            resolver: ResolverOptions::default(),
            overrides: ProfileOverrides::default(),
            show_progress: false,
        }
    }

    /// Read the options from CLI arguments
    pub fn from_args(args: &ArgMatches) -> AppResult<Self> {
        let block_size = match args.get_many::<u32>("block-size") {
            Some(values) => match values.copied().collect::<Vec<_>>().as_slice() {
                [x, y] => Some((*x, *y)),
                other => {
                    return Err(AppError::InvalidArgument(format!(
                        "--block-size takes two values, got {}",
                        other.len()
                    )))
                }
            },
            None => None,
        };

        let output_dir = args
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        if !output_dir.is_dir() {
            return Err(AppError::InvalidArgument(format!(
                "Output directory {} does not exist",
                output_dir.display()
            )));
        }

        Ok(ConvertOptions {
            input_file: input_path(args)?,
            output_dir,
            show_descriptions: args.get_flag("descriptions"),
            presets_file: args.get_one::<PathBuf>("presets").cloned(),
            resolver: ResolverOptions {
                use_preset: args.get_flag("use-preset"),
                no_presets: args.get_flag("no-presets"),
            },
            overrides: ProfileOverrides {
                force_lzw: args.get_flag("lzw"),
                block_size,
            },
            show_progress: true,
        })
    }
}

/// Command for converting one dataset to a GeoTIFF
pub struct ConvertCommand {
    options: ConvertOptions,
}

impl ConvertCommand {
    /// Create a new convert command from CLI arguments
    pub fn new(args: &ArgMatches) -> AppResult<Self> {
        Ok(ConvertCommand {
            options: ConvertOptions::from_args(args)?,
        })
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        ConvertCommand { options }
    }

    fn load_presets(&self) -> AppResult<PresetTable> {
        let mut presets = PresetTable::builtin();
        if let Some(path) = &self.options.presets_file {
            let extra = PresetTable::from_file(path)?;
            info!("Merging {} presets from {}", extra.len(), path.display());
            presets.extend(extra);
        }
        Ok(presets)
    }

    /// Output path for a dataset: `<output-dir>/<name>.tif`
    pub fn output_path(output_dir: &Path, dataset_name: &str) -> PathBuf {
        let file_stem = dataset_name.trim_matches('/').replace('/', "_");
        output_dir.join(format!("{}.tif", file_stem))
    }
}

impl Command for ConvertCommand {
    fn execute(&self, prompter: &mut dyn Prompter) -> AppResult<Outcome> {
        let presets = self.load_presets()?;
        let resolver = ProfileResolver::new(&presets, self.options.resolver);

        // The file stays open only until the plane is in memory
        let (profile, layer) = {
            let catalog = Catalog::open(&self.options.input_file)?;
            let entry = select_entry(catalog.entries(), self.options.show_descriptions, prompter)?;

            let profile = match resolver.resolve(entry, prompter)? {
                Resolution::Resolved(profile) => profile,
                Resolution::Declined => return Ok(Outcome::Declined),
            };

            prompter.echo(&format!("Loading layer {} from {}...", entry.name, catalog.path()))?;
            (profile, catalog.read_layer(&entry.name)?)
        };

        prompter.echo(&layer.summary())?;
        let profile = prepare_profile(profile, &layer, &self.options.overrides)?;

        let path = Self::output_path(&self.options.output_dir, &layer.name);
        prompter.echo(&format!("Writing data to {}", path.display()))?;

        GeoTiffBuilder::new(&profile)
            .with_description(layer.description.as_deref())
            .with_progress(self.options.show_progress)
            .write_to_path(&layer, &path)?;

        info!("Wrote {}", path.display());
        Ok(Outcome::Written(path))
    }
}
