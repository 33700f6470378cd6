//! Configuration for `RomIndex`.
//!
//! Combines CLI arguments with the `[roms]` section of the user config file.

use std::path::PathBuf;

use rom_tools::rom_library::{LibraryConfig, RomsConfig};

use crate::Args;

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) dryrun: bool,
    pub(crate) library: LibraryConfig,
    pub(crate) verbose: bool,
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let user_config = RomsConfig::get_user_config()?;
        Ok(Self::from_args_and_user_config(args, user_config))
    }

    /// Roots given on the command line replace both configured root lists.
    pub(crate) fn from_args_and_user_config(args: Args, mut user_config: RomsConfig) -> Self {
        if !args.roots.is_empty() || !args.extended.is_empty() {
            user_config.standard_roots = Some(args.roots);
            user_config.extended_roots = Some(args.extended);
        }
        if !args.skip.is_empty() {
            user_config.skip_extensions = Some(args.skip);
        }
        if args.output.is_some() {
            user_config.catalog_path = args.output;
        }
        if args.markdown.is_some() {
            user_config.report_path = args.markdown;
        }

        let dryrun = args.print || user_config.dryrun;
        let verbose = args.verbose || user_config.verbose;

        Self {
            dryrun,
            library: user_config.into_library_config(),
            verbose,
        }
    }

    pub(crate) fn output_paths(&self) -> (PathBuf, PathBuf) {
        (self.library.catalog_path.clone(), self.library.report_path.clone())
    }
}
