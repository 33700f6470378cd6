//! Locate ROM files for a system and search term with tiered fallback.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::rom_library::classify::FilenameClassifier;
use crate::rom_library::resolve::resolve_system_dir;

/// Default number of directory levels searched below a system directory.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Search term that matches every eligible file of the system.
const MATCH_ALL_TERM: &str = "system";

/// Which tier produced a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// Depth-bounded search of the system directories.
    Shallow,
    /// Unbounded search starting one level above the system directories.
    Deep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub tier: SearchTier,
    pub matches: Vec<PathBuf>,
}

/// Finds files matching a search term under the configured search roots.
#[derive(Debug, Clone)]
pub struct SearchResolver {
    roots: Vec<PathBuf>,
    staging_root: Option<PathBuf>,
    classifier: FilenameClassifier,
    max_depth: usize,
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl SearchResolver {
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, classifier: FilenameClassifier) -> Self {
        Self {
            roots,
            staging_root: None,
            classifier,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Root that is always searched fully, regardless of the system name.
    #[must_use]
    pub fn with_staging_root(mut self, staging_root: Option<PathBuf>) -> Self {
        self.staging_root = staging_root;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Run the shallow search and fall back to the deep search if nothing was found.
    #[must_use]
    pub fn search_with_fallback(&self, term: &str, system: &str) -> SearchOutcome {
        let matches = self.search(term, system);
        if !matches.is_empty() {
            return SearchOutcome {
                tier: SearchTier::Shallow,
                matches,
            };
        }
        SearchOutcome {
            tier: SearchTier::Deep,
            matches: self.deep_search(term, system),
        }
    }

    /// Depth-bounded search of each root's system directory.
    ///
    /// The staging root is searched fully recursively without resolving the system.
    /// Roots without a matching system directory are skipped.
    #[must_use]
    pub fn search(&self, term: &str, system: &str) -> Vec<PathBuf> {
        let mut matches = Vec::new();
        for root in &self.roots {
            if self.is_staging_root(root) {
                matches.extend(self.matching_files(WalkDir::new(root), term));
                continue;
            }

            let Some(system_dir) = resolve_system_dir(root, system) else {
                continue;
            };

            // Files in directories up to `max_depth` levels below the system directory
            let walker = WalkDir::new(system_dir).max_depth(self.max_depth + 1);
            matches.extend(self.matching_files(walker, term));
        }
        matches
    }

    /// Unbounded search starting from the parent of each resolved system directory,
    /// or from the root itself when the system does not resolve.
    #[must_use]
    pub fn deep_search(&self, term: &str, system: &str) -> Vec<PathBuf> {
        let mut matches = Vec::new();
        for root in &self.roots {
            let start = resolve_system_dir(root, system)
                .and_then(|system_dir| system_dir.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| root.clone());
            matches.extend(self.matching_files(WalkDir::new(start), term));
        }
        matches
    }

    /// Check a single filename against the search term.
    #[must_use]
    pub fn file_matches(&self, filename: &str, term: &str) -> bool {
        if self.classifier.should_skip(filename) {
            return false;
        }
        let term = term.to_lowercase();
        term == MATCH_ALL_TERM || filename.to_lowercase().contains(&term)
    }

    fn is_staging_root(&self, root: &Path) -> bool {
        self.staging_root.as_deref().is_some_and(|staging| staging == root)
    }

    fn matching_files(&self, walker: WalkDir, term: &str) -> Vec<PathBuf> {
        walker
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.file_matches(&crate::path_to_filename_string(entry.path()), term))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}
