//! Logger setup for the command line tool
//!
//! Log records go to stderr through `env_logger` so they never mix with the
//! tables and prompts printed on stdout.

use env_logger::{Builder, Env, Target};

/// Default filter when `RUST_LOG` is unset
const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,h5_to_geotiff=debug";

/// Global logger initialisation
pub struct Logger;

impl Logger {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(verbose: bool) -> &'static str {
        if verbose { VERBOSE_FILTER } else { QUIET_FILTER }
    }

    /// Initialize the global logger
    ///
    /// `RUST_LOG` takes precedence over the verbosity flag.
    pub fn init_global_logger(verbose: bool) {
        let env = Env::default().default_filter_or(Self::default_filter(verbose));
        let mut builder = Builder::from_env(env);
        builder.target(Target::Stderr).format_timestamp(None);

        if let Err(e) = builder.try_init() {
            eprintln!("Warning: Global logger was already initialized: {}", e);
        }
    }
}
