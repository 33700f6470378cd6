//! Filename classification: extension filtering, romhack detection and disc-set keys.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Extensions that are never indexable ROM payloads:
/// save states, packed archives and preview images.
pub const SKIP_EXTENSIONS: &[&str] = &["sav", "zip", "png"];

/// Substring marking a fan-made modification.
const ROMHACK_MARKER: &str = "romhack";

/// Matches a trailing `[Disc1of2]` marker.
static RE_DISC_BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<base>.*)\[disc\d+of\d+\]$").expect("Failed to compile bracketed disc regex")
});

/// Matches a trailing `(Disc 2)` or `(Disc2)` marker.
static RE_DISC_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<base>.*)\(disc ?\d+\)$").expect("Failed to compile parenthetical disc regex")
});

/// Multi-disc naming conventions recognized in file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscConvention {
    /// `Title [Disc1of2]`
    Bracketed,
    /// `Title (Disc 1)`
    Parenthetical,
}

/// Grouping key derived from a file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscKey {
    /// Part of a disc set, keyed by the base title.
    Grouped { base: String, convention: DiscConvention },
    /// Standalone file, keyed by the full stem.
    Ungrouped { full: String },
}

/// Decides which files are indexed and how they are keyed.
#[derive(Debug, Clone)]
pub struct FilenameClassifier {
    skip_extensions: Vec<String>,
}

impl DiscConvention {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Bracketed => &RE_DISC_BRACKETED,
            Self::Parenthetical => &RE_DISC_PARENTHETICAL,
        }
    }
}

impl DiscKey {
    /// Consolidated title used as the grouping key.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Grouped { base, .. } => base,
            Self::Ungrouped { full } => full,
        }
    }

    #[must_use]
    pub const fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped { .. })
    }
}

impl Default for FilenameClassifier {
    fn default() -> Self {
        Self::new(SKIP_EXTENSIONS.iter().map(|&s| s.to_string()).collect())
    }
}

impl FilenameClassifier {
    /// Create a classifier that skips the given extensions.
    /// Extensions are matched case-insensitively and may be given with or without a leading dot.
    #[must_use]
    pub fn new(skip_extensions: Vec<String>) -> Self {
        let skip_extensions = skip_extensions
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { skip_extensions }
    }

    #[must_use]
    pub fn skip_extensions(&self) -> &[String] {
        &self.skip_extensions
    }

    /// True if the file extension is in the exclusion set.
    #[must_use]
    pub fn should_skip(&self, filename: &str) -> bool {
        let extension = crate::path_to_file_extension_string(Path::new(filename));
        !extension.is_empty() && self.skip_extensions.contains(&extension)
    }

    /// True if the filename contains "romhack" in any casing.
    #[must_use]
    pub fn is_romhack(filename: &str) -> bool {
        filename.to_lowercase().contains(ROMHACK_MARKER)
    }

    /// Derive the grouping key for a file stem.
    ///
    /// The disc marker has to be the last segment of the stem.
    /// A stem that consists of only a disc marker stays ungrouped.
    #[must_use]
    pub fn disc_group_key(stem: &str) -> DiscKey {
        for convention in [DiscConvention::Bracketed, DiscConvention::Parenthetical] {
            if let Some(captures) = convention.pattern().captures(stem)
                && let Some(base) = captures.name("base")
            {
                let base = base.as_str().trim_end();
                if !base.is_empty() {
                    return DiscKey::Grouped {
                        base: base.to_string(),
                        convention,
                    };
                }
            }
        }
        DiscKey::Ungrouped { full: stem.to_string() }
    }
}
