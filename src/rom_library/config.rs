//! Shared `[roms]` section of the user config file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use itertools::Itertools;
use serde::Deserialize;

use crate::config::expand_tilde;
use crate::rom_library::classify::{FilenameClassifier, SKIP_EXTENSIONS};
use crate::rom_library::scanner::ScanRoot;
use crate::rom_library::search::{DEFAULT_MAX_DEPTH, SearchResolver};

const DEFAULT_STANDARD_ROOT: &str = "~/roms/best";
const DEFAULT_EXTENDED_ROOT: &str = "~/roms/best_extended";
const DEFAULT_CATALOG_PATH: &str = "games.json";
const DEFAULT_REPORT_PATH: &str = "output.md";

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct RomsConfig {
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub dryrun: bool,
    #[serde(default)]
    pub extended_roots: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub full_path: bool,
    #[serde(default)]
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub report_path: Option<PathBuf>,
    #[serde(default)]
    pub search_roots: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub skip_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub staging_root: Option<PathBuf>,
    #[serde(default)]
    pub standard_roots: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub verbose: bool,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    roms: RomsConfig,
}

/// Library locations and filters with defaults applied and paths expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub standard_roots: Vec<PathBuf>,
    pub extended_roots: Vec<PathBuf>,
    pub search_roots: Vec<PathBuf>,
    pub staging_root: Option<PathBuf>,
    pub skip_extensions: Vec<String>,
    pub max_depth: usize,
    pub catalog_path: PathBuf,
    pub report_path: PathBuf,
}

impl RomsConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> anyhow::Result<Self> {
        let Some(path) = crate::config::CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse config from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.roms)
            .context("Failed to parse roms config TOML")
    }

    /// Apply defaults and expand `~` in all paths.
    #[must_use]
    pub fn into_library_config(self) -> LibraryConfig {
        let expand_all = |paths: Vec<PathBuf>| paths.iter().map(|p| expand_tilde(p)).collect::<Vec<_>>();

        let standard_roots = expand_all(
            self.standard_roots
                .unwrap_or_else(|| vec![PathBuf::from(DEFAULT_STANDARD_ROOT)]),
        );
        let extended_roots = expand_all(
            self.extended_roots
                .unwrap_or_else(|| vec![PathBuf::from(DEFAULT_EXTENDED_ROOT)]),
        );
        let staging_root = self.staging_root.map(|p| expand_tilde(&p));

        let mut search_roots = self.search_roots.map_or_else(
            || standard_roots.iter().chain(&extended_roots).cloned().collect(),
            expand_all,
        );
        if let Some(staging) = &staging_root
            && !search_roots.contains(staging)
        {
            search_roots.push(staging.clone());
        }

        let skip_extensions = self
            .skip_extensions
            .unwrap_or_else(|| SKIP_EXTENSIONS.iter().map(|&s| s.to_string()).collect())
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .unique()
            .collect();

        LibraryConfig {
            standard_roots,
            extended_roots,
            search_roots,
            staging_root,
            skip_extensions,
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            catalog_path: expand_tilde(&self.catalog_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH))),
            report_path: expand_tilde(&self.report_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH))),
        }
    }
}

impl LibraryConfig {
    #[must_use]
    pub fn classifier(&self) -> FilenameClassifier {
        FilenameClassifier::new(self.skip_extensions.clone())
    }

    /// Scan roots in processing order: standard roots first, then extended roots.
    #[must_use]
    pub fn scan_roots(&self) -> Vec<ScanRoot> {
        self.standard_roots
            .iter()
            .map(ScanRoot::standard)
            .chain(self.extended_roots.iter().map(ScanRoot::extended))
            .collect()
    }

    #[must_use]
    pub fn search_resolver(&self) -> SearchResolver {
        SearchResolver::new(self.search_roots.clone(), self.classifier())
            .with_staging_root(self.staging_root.clone())
            .with_max_depth(self.max_depth)
    }
}
