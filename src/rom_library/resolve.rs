//! Resolve a system name to its directory under a base root.

use std::path::{Path, PathBuf};

/// System name that some collections store under a shorter legacy directory name.
const LEGACY_ALIAS: (&str, &str) = ("PS1", "PS");

/// Find the directory for `system` under `base_root`.
///
/// Tries the name as given, then lower-cased.
/// `PS1` falls back to `PS` when neither form exists.
/// Returns `None` when the root has no matching directory.
#[must_use]
pub fn resolve_system_dir(base_root: &Path, system: &str) -> Option<PathBuf> {
    find_candidate(base_root, system).or_else(|| {
        let (name, alias) = LEGACY_ALIAS;
        if system.eq_ignore_ascii_case(name) {
            find_candidate(base_root, alias)
        } else {
            None
        }
    })
}

fn find_candidate(base_root: &Path, system: &str) -> Option<PathBuf> {
    [system.to_string(), system.to_lowercase()]
        .into_iter()
        .map(|candidate| base_root.join(candidate))
        .find(|path| path.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn resolves_exact_name() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("SNES")).unwrap();
        assert_eq!(resolve_system_dir(root.path(), "SNES"), Some(root.path().join("SNES")));
    }

    #[test]
    fn resolves_lowercase_name() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("gba")).unwrap();
        let resolved = resolve_system_dir(root.path(), "GBA").unwrap();
        assert!(resolved.is_dir());
        assert_eq!(resolved.file_name().unwrap().to_string_lossy().to_lowercase(), "gba");
    }

    #[test]
    fn ps1_falls_back_to_ps() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("PS")).unwrap();
        let resolved = resolve_system_dir(root.path(), "PS1").unwrap();
        assert!(resolved.is_dir());
        assert!(resolved.file_name().unwrap().eq_ignore_ascii_case("ps"));
        assert!(resolve_system_dir(root.path(), "ps1").is_some());
    }

    #[test]
    fn ps1_prefers_own_directory() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("PS1")).unwrap();
        fs::create_dir(root.path().join("PS")).unwrap();
        assert_eq!(resolve_system_dir(root.path(), "PS1"), Some(root.path().join("PS1")));
    }

    #[test]
    fn alias_only_applies_to_ps1() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("PS")).unwrap();
        assert_eq!(resolve_system_dir(root.path(), "PS2"), None);
    }

    #[test]
    fn missing_system_is_none() {
        let root = tempdir().unwrap();
        assert_eq!(resolve_system_dir(root.path(), "N64"), None);
        assert_eq!(resolve_system_dir(&root.path().join("missing"), "N64"), None);
    }

    #[test]
    fn regular_file_is_not_a_system() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("nes"), b"").unwrap();
        assert_eq!(resolve_system_dir(root.path(), "NES"), None);
    }
}
