//! Integration tests for config loading from fixture files.

use std::fs;
use std::path::{Path, PathBuf};

use rom_tools::rom_library::{LibraryConfig, RomsConfig, ScanRoot};

/// Read the sample config file content.
fn read_sample_config() -> String {
    let config_path = Path::new("tests/fixtures/sample_config.toml");
    fs::read_to_string(config_path).expect("Failed to read sample config file")
}

fn sample_library_config() -> LibraryConfig {
    RomsConfig::from_toml_str(&read_sample_config())
        .expect("should parse sample config")
        .into_library_config()
}

#[test]
fn sample_config_is_valid_toml() {
    let config_content = read_sample_config();
    let result: Result<toml::Value, _> = toml::from_str(&config_content);
    assert!(result.is_ok(), "Sample config should be valid TOML: {:?}", result.err());
}

#[test]
fn sample_config_has_roms_section() {
    let value: toml::Value = toml::from_str(&read_sample_config()).expect("should parse");
    let roms = value.get("roms").expect("should have roms section");

    for key in ["standard_roots", "extended_roots", "staging_root", "skip_extensions", "max_depth"] {
        assert!(roms.get(key).is_some(), "[roms] should have {key}");
    }
}

#[test]
fn sample_config_parses_flags() {
    let config = RomsConfig::from_toml_str(&read_sample_config()).expect("should parse");
    assert!(config.verbose);
    assert!(!config.dryrun);
    assert!(!config.full_path);
    assert_eq!(config.max_depth, Some(3));
}

#[test]
fn sample_config_expands_home_directory() {
    let library = sample_library_config();
    let home = dirs::home_dir().expect("should have home directory");

    assert_eq!(library.standard_roots[0], home.join("roms/best"));
    assert_eq!(library.standard_roots[1], PathBuf::from("/mnt/nas/roms/best"));
    assert_eq!(library.staging_root, Some(home.join("Downloads/roms")));
    assert_eq!(library.catalog_path, home.join("roms/games.json"));
}

#[test]
fn sample_config_search_roots_include_staging_root() {
    let library = sample_library_config();
    let home = dirs::home_dir().expect("should have home directory");

    assert_eq!(library.search_roots.len(), 4);
    assert_eq!(library.search_roots.last(), Some(&home.join("Downloads/roms")));
}

#[test]
fn sample_config_normalizes_skip_extensions() {
    let library = sample_library_config();
    assert_eq!(library.skip_extensions, vec!["sav", "zip", "png", "srm"]);
    assert!(library.classifier().should_skip("Zelda.SRM"));
}

#[test]
fn sample_config_scan_roots_are_ordered() {
    let roots = sample_library_config().scan_roots();
    assert_eq!(roots.len(), 3);
    assert!(!roots[0].extended);
    assert!(!roots[1].extended);
    assert!(roots[2].extended);
    assert_eq!(roots[2], ScanRoot::extended(roots[2].path.clone()));
}

#[test]
fn all_config_fields_are_optional() {
    let config = RomsConfig::from_toml_str("[roms]\n").expect("should parse");
    let library = config.into_library_config();
    assert_eq!(library.standard_roots.len(), 1);
    assert_eq!(library.extended_roots.len(), 1);
    assert!(library.staging_root.is_none());
}

#[test]
fn unknown_value_types_are_rejected() {
    assert!(RomsConfig::from_toml_str("[roms]\nmax_depth = \"deep\"").is_err());
    assert!(RomsConfig::from_toml_str("[roms]\nstandard_roots = \"/roms\"").is_err());
}
