mod config;
mod rom_index;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::rom_index::RomIndex;

#[derive(Parser)]
#[command(author, version, name = env!("CARGO_BIN_NAME"), about = "Index ROM directories into a catalog of games")]
pub struct Args {
    /// Standard root directories to scan
    #[arg(value_hint = clap::ValueHint::DirPath)]
    roots: Vec<PathBuf>,

    /// Extended root directories to scan after the standard roots
    #[arg(short = 'x', long, num_args = 1, action = clap::ArgAction::Append, value_name = "ROOT", value_hint = clap::ValueHint::DirPath)]
    extended: Vec<PathBuf>,

    /// File extensions to skip
    #[arg(short = 's', long, num_args = 1, action = clap::ArgAction::Append, value_name = "EXTENSION")]
    skip: Vec<String>,

    /// Output path for the JSON catalog
    #[arg(short = 'o', long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Output path for the Markdown report
    #[arg(short = 'm', long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    markdown: Option<PathBuf>,

    /// Only print the report without writing files
    #[arg(short = 'p', long)]
    print: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        rom_tools::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        RomIndex::new(args)?.run()
    }
}

#[cfg(test)]
mod cli_args_tests {
    use super::*;

    #[test]
    fn parses_standard_and_extended_roots() {
        let args = Args::try_parse_from(["test", "/roms/best", "/roms/more", "-x", "/roms/extended"])
            .expect("should parse");
        assert_eq!(args.roots, vec![PathBuf::from("/roms/best"), PathBuf::from("/roms/more")]);
        assert_eq!(args.extended, vec![PathBuf::from("/roms/extended")]);
    }

    #[test]
    fn parses_multiple_skip_extensions() {
        let args = Args::try_parse_from(["test", "-s", "sav", "--skip", "srm"]).expect("should parse");
        assert_eq!(args.skip, vec!["sav", "srm"]);
    }

    #[test]
    fn parses_output_paths() {
        let args = Args::try_parse_from(["test", "-o", "catalog.json", "--markdown", "games.md"]).expect("should parse");
        assert_eq!(args.output, Some(PathBuf::from("catalog.json")));
        assert_eq!(args.markdown, Some(PathBuf::from("games.md")));
    }

    #[test]
    fn parses_combined_flags() {
        let args = Args::try_parse_from(["test", "-pv"]).expect("should parse");
        assert!(args.print);
        assert!(args.verbose);
    }

    #[test]
    fn empty_by_default() {
        let args = Args::try_parse_from(["test"]).expect("should parse");
        assert!(args.roots.is_empty());
        assert!(args.extended.is_empty());
        assert!(args.skip.is_empty());
        assert!(args.output.is_none());
        assert!(args.markdown.is_none());
        assert!(!args.print);
        assert!(!args.verbose);
    }
}
