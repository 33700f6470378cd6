//! Configuration for the interactive search session.

use std::path::PathBuf;

use anyhow::Context;

use rom_tools::rom_library::{LibraryConfig, RomsConfig};

use crate::Args;

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that selected files are copied into
    pub(crate) destination: PathBuf,
    pub(crate) dryrun: bool,
    pub(crate) full_path: bool,
    /// First search term to run before prompting
    pub(crate) initial_term: Option<String>,
    pub(crate) library: LibraryConfig,
    /// System name used to pick the directory under each search root
    pub(crate) system: String,
    pub(crate) verbose: bool,
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed,
    /// or the destination directory does not exist.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let user_config = RomsConfig::get_user_config()?;
        Self::from_args_and_user_config(args, user_config)
    }

    /// The system defaults to the destination directory name,
    /// which is the current working directory unless `--output` is given.
    pub(crate) fn from_args_and_user_config(args: Args, mut user_config: RomsConfig) -> anyhow::Result<Self> {
        let destination = rom_tools::resolve_input_path(args.output.as_deref())?;
        if !destination.is_dir() {
            anyhow::bail!("Destination is not a directory: {}", destination.display());
        }
        let system = match args.system.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(system) => system,
            None => destination
                .file_name()
                .map(rom_tools::os_str_to_string)
                .context("Failed to get system name from directory")?,
        };

        if args.depth.is_some() {
            user_config.max_depth = args.depth;
        }

        let dryrun = args.print || user_config.dryrun;
        let full_path = args.full_path || user_config.full_path;
        let verbose = args.verbose || user_config.verbose;

        Ok(Self {
            destination,
            dryrun,
            full_path,
            initial_term: args.term,
            library: user_config.into_library_config(),
            system,
            verbose,
        })
    }
}
