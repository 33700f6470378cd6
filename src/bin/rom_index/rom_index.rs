use anyhow::Result;
use colored::Colorize;

use rom_tools::rom_library::{self, Catalog, Scanner};

use crate::Args;
use crate::config::Config;

/// Scans the ROM library and exports the catalog.
pub struct RomIndex {
    config: Config,
}

impl RomIndex {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::from_args(args)?;
        Ok(Self { config })
    }

    pub fn run(&self) -> Result<()> {
        let roots = self.config.library.scan_roots();
        if self.config.verbose {
            for root in &roots {
                let label = if root.extended { "extended" } else { "standard" };
                println!("Root ({label}): {}", root.path.display().to_string().magenta());
            }
            println!("Skipping extensions: {:?}", self.config.library.skip_extensions);
            println!("Dryrun: {}", rom_tools::colorize_bool(self.config.dryrun));
        }

        let scanner = Scanner::new(self.config.library.classifier(), self.config.verbose);
        let catalog = scanner.scan(&roots);

        Self::print_summary(&catalog);

        if self.config.dryrun {
            print!("{}", rom_library::markdown_table(&catalog));
            return Ok(());
        }

        let (catalog_path, report_path) = self.config.output_paths();
        rom_library::write_catalog_json(&catalog, &catalog_path)?;
        rom_library::write_markdown(&catalog, &report_path)?;
        println!(
            "{}",
            format!(
                "Games indexed and saved to {} and {}",
                catalog_path.display(),
                report_path.display()
            )
            .green()
        );
        Ok(())
    }

    fn print_summary(catalog: &Catalog) {
        if catalog.is_empty() {
            println!("{}", "No games found".yellow());
            return;
        }
        println!(
            "{}",
            format!(
                "Found {} games ({} files) in {} systems, {} romhacks",
                catalog.game_count(),
                catalog.file_count(),
                catalog.system_count(),
                catalog.romhack_count()
            )
            .bold()
        );
        for (system, games) in catalog.systems() {
            println!("  {:<12} {}", system.cyan(), games.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use clap::Parser;
    use rom_tools::rom_library::RomsConfig;
    use tempfile::tempdir;

    #[test]
    fn test_run_writes_catalog_and_report() {
        let library = tempdir().unwrap();
        let output = tempdir().unwrap();
        for file in ["NES/Zelda.nes", "NES/Zelda.sav", "PSX/Quest (Disc 1).bin", "PSX/Quest (Disc 2).bin"] {
            let path = library.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"rom").unwrap();
        }
        let json_path = output.path().join("games.json");
        let md_path = output.path().join("output.md");

        let args = Args::try_parse_from([
            "test",
            library.path().to_str().unwrap(),
            "-o",
            json_path.to_str().unwrap(),
            "-m",
            md_path.to_str().unwrap(),
        ])
        .expect("should parse");
        let config = Config::from_args_and_user_config(args, RomsConfig::default());
        RomIndex { config }.run().unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(json["NES"][0]["filenames"], serde_json::json!(["Zelda.nes"]));
        assert_eq!(json["PSX"][0]["name"], "Quest");

        let report = fs::read_to_string(md_path).unwrap();
        assert!(report.contains("| PSX | Quest | Quest (Disc 1).bin, Quest (Disc 2).bin | No | No |"));
    }

    #[test]
    fn test_dryrun_does_not_write_files() {
        let library = tempdir().unwrap();
        fs::create_dir_all(library.path().join("GB")).unwrap();
        fs::write(library.path().join("GB/Tetris.gb"), b"rom").unwrap();
        let json_path = library.path().join("games.json");

        let args = Args::try_parse_from([
            "test",
            library.path().to_str().unwrap(),
            "-p",
            "-o",
            json_path.to_str().unwrap(),
        ])
        .expect("should parse");
        let config = Config::from_args_and_user_config(args, RomsConfig::default());
        RomIndex { config }.run().unwrap();

        assert!(!json_path.exists());
    }
}
