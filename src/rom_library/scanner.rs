//! Walk configured ROM roots and consolidate files into logical game entries.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::{print_error, print_warning};
use crate::rom_library::classify::FilenameClassifier;

/// A configured source directory and its provenance class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRoot {
    pub path: PathBuf,
    pub extended: bool,
}

/// One logical title: a single ROM file or all discs of a multi-disc set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub system: String,
    pub name: String,
    pub filenames: Vec<String>,
    pub extended: bool,
    pub romhack: bool,
}

/// Scan result: games per system, systems in lexical order
/// and games in the order they were first discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    systems: BTreeMap<String, Vec<Game>>,
}

/// Walks roots and groups files per system and title.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    classifier: FilenameClassifier,
    verbose: bool,
}

/// Accumulator for a single (system, title) key while a scan is running.
///
/// Merging a file appends its name, ORs the romhack flag and
/// overwrites the extended flag, so the last contributing root wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct GameGroup {
    filenames: Vec<String>,
    romhack: bool,
    extended: bool,
}

/// Working groups of one system, in first-discovery order.
#[derive(Debug, Default)]
struct SystemGroups {
    order: Vec<(String, GameGroup)>,
    index: HashMap<String, usize>,
}

impl ScanRoot {
    pub fn standard(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extended: false,
        }
    }

    pub fn extended(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extended: true,
        }
    }

    const fn label(&self) -> &'static str {
        if self.extended { "EXTENDED" } else { "STANDARD" }
    }
}

impl GameGroup {
    fn merge(&mut self, filename: String, romhack: bool, extended: bool) {
        self.filenames.push(filename);
        self.romhack |= romhack;
        self.extended = extended;
    }

    fn into_game(self, system: &str, name: String) -> Game {
        Game {
            system: system.to_string(),
            name,
            filenames: self.filenames,
            extended: self.extended,
            romhack: self.romhack,
        }
    }
}

impl SystemGroups {
    fn group_mut(&mut self, title: &str) -> &mut GameGroup {
        let idx = *self.index.entry(title.to_string()).or_insert_with(|| {
            self.order.push((title.to_string(), GameGroup::default()));
            self.order.len() - 1
        });
        &mut self.order[idx].1
    }

    fn into_games(self, system: &str) -> Vec<Game> {
        self.order
            .into_iter()
            .map(|(name, group)| group.into_game(system, name))
            .collect()
    }
}

impl Catalog {
    /// All systems with their games.
    pub fn systems(&self) -> impl Iterator<Item = (&str, &[Game])> {
        self.systems.iter().map(|(system, games)| (system.as_str(), games.as_slice()))
    }

    /// Games of one system, if it was found.
    #[must_use]
    pub fn games(&self, system: &str) -> Option<&[Game]> {
        self.systems.get(system).map(Vec::as_slice)
    }

    /// All games across all systems.
    pub fn iter_games(&self) -> impl Iterator<Item = &Game> {
        self.systems.values().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn game_count(&self) -> usize {
        self.systems.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.iter_games().map(|game| game.filenames.len()).sum()
    }

    #[must_use]
    pub fn romhack_count(&self) -> usize {
        self.iter_games().filter(|game| game.romhack).count()
    }
}

impl Scanner {
    #[must_use]
    pub const fn new(classifier: FilenameClassifier, verbose: bool) -> Self {
        Self { classifier, verbose }
    }

    /// Index all systems under the given roots.
    ///
    /// Roots are processed in order, so extended roots should come after standard roots.
    /// Missing roots are reported and skipped.
    #[must_use]
    pub fn scan(&self, roots: &[ScanRoot]) -> Catalog {
        let mut working: BTreeMap<String, SystemGroups> = BTreeMap::new();

        for root in roots {
            if !root.path.is_dir() {
                print_warning!("Base path not found: {}", root.path.display());
                continue;
            }

            for system_dir in Self::system_dirs(&root.path) {
                let system = crate::path_to_filename_string(&system_dir);
                if self.verbose {
                    println!("{}", format!("Scanning system: {system} ({})", root.label()).cyan());
                }
                let groups = working.entry(system).or_default();
                self.scan_system(&system_dir, root.extended, groups);
            }
        }

        Catalog {
            systems: working
                .into_iter()
                .map(|(system, groups)| {
                    let games = groups.into_games(&system);
                    (system, games)
                })
                .filter(|(_, games)| !games.is_empty())
                .collect(),
        }
    }

    /// Immediate subdirectories of a root, sorted by name. Symlinked directories count.
    fn system_dirs(root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(true)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    print_warning!("Failed to read entry in {}: {error}", root.display());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn scan_system(&self, system_dir: &Path, extended: bool, groups: &mut SystemGroups) {
        let files = WalkDir::new(system_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    print_error!("Failed to read entry in {}: {error}", system_dir.display());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file());

        for entry in files {
            let filename = crate::path_to_filename_string(entry.path());
            if self.classifier.should_skip(&filename) {
                continue;
            }

            let stem = crate::path_to_file_stem_string(entry.path());
            let key = FilenameClassifier::disc_group_key(&stem);
            let romhack = FilenameClassifier::is_romhack(&filename);

            if self.verbose {
                let tag = if romhack { " [ROMHACK]" } else { "" };
                println!("  {filename} (Extended: {extended}){}", tag.yellow());
            }

            groups.group_mut(key.title()).merge(filename, romhack, extended);
        }
    }
}
