mod config;
mod session;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::config::Config;

#[derive(Parser)]
#[command(author, version, name = env!("CARGO_BIN_NAME"), about = "Search ROM libraries and copy files into the current system directory")]
pub struct Args {
    /// Initial search term. Use "system" to list every file
    term: Option<String>,

    /// System name to search for. Defaults to the destination directory name
    #[arg(short = 's', long, value_name = "NAME")]
    system: Option<String>,

    /// Directory levels searched below each system directory
    #[arg(short = 'd', long, value_name = "LEVELS")]
    depth: Option<usize>,

    /// Destination directory for copied files. Defaults to the current directory
    #[arg(short = 'o', long, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    output: Option<PathBuf>,

    /// Show full paths in search results
    #[arg(short = 'f', long)]
    full_path: bool,

    /// Only print actions without copying files
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
        let config = Config::from_args(args)?;
        session::run_interactive(&config)
    }
}

#[cfg(test)]
mod cli_args_tests {
    use super::*;

    #[test]
    fn parses_term_and_system() {
        let args = Args::try_parse_from(["test", "mario", "-s", "SNES"]).expect("should parse");
        assert_eq!(args.term.as_deref(), Some("mario"));
        assert_eq!(args.system.as_deref(), Some("SNES"));
    }

    #[test]
    fn parses_depth_and_output() {
        let args = Args::try_parse_from(["test", "--depth", "4", "-o", "/roms/GBA"]).expect("should parse");
        assert_eq!(args.depth, Some(4));
        assert_eq!(args.output, Some(PathBuf::from("/roms/GBA")));
    }

    #[test]
    fn parses_combined_flags() {
        let args = Args::try_parse_from(["test", "-fpv"]).expect("should parse");
        assert!(args.full_path);
        assert!(args.print);
        assert!(args.verbose);
    }

    #[test]
    fn rejects_invalid_depth() {
        assert!(Args::try_parse_from(["test", "-d", "deep"]).is_err());
    }

    #[test]
    fn empty_by_default() {
        let args = Args::try_parse_from(["test"]).expect("should parse");
        assert!(args.term.is_none());
        assert!(args.system.is_none());
        assert!(args.depth.is_none());
        assert!(args.output.is_none());
        assert!(!args.full_path);
        assert!(!args.print);
        assert!(!args.verbose);
    }
}
