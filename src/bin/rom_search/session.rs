//! Interactive search and copy loop.

use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use rom_tools::rom_library::{SearchResolver, SearchTier, suggest_name};

use crate::config::Config;

const QUIT: &str = "q";
const SELECT_ALL: &str = "all";

/// States of the interactive search loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingTerm,
    ShowingResults(Vec<PathBuf>),
    AwaitingSelection(Vec<PathBuf>),
    Done,
}

/// Parsed input from the search term prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermInput {
    Quit,
    Empty,
    Term(String),
}

/// One entry of a comma-separated selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the result list
    Index(usize),
    /// Token that is not a valid result number
    Invalid(String),
}

/// Search session reading operator input from `input` and writing to `output`.
pub struct Session<'a, R, W> {
    config: &'a Config,
    resolver: SearchResolver,
    input: R,
    output: W,
    pending_term: Option<String>,
}

impl TermInput {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            Self::Empty
        } else if input.eq_ignore_ascii_case(QUIT) {
            Self::Quit
        } else {
            Self::Term(input.to_string())
        }
    }
}

/// Parse a list of 1-based result numbers like `1, 3` or `all`.
pub fn parse_selection(input: &str, count: usize) -> Vec<Selection> {
    let input = input.trim();
    if input.eq_ignore_ascii_case(SELECT_ALL) {
        return (0..count).map(Selection::Index).collect();
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(number) if (1..=count).contains(&number) => Selection::Index(number - 1),
            _ => Selection::Invalid(token.to_string()),
        })
        .collect()
}

/// Copy a file and carry over its modification time.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if target.exists() && dunce::canonicalize(source)? == dunce::canonicalize(target)? {
        anyhow::bail!("Source and target are the same file: {}", target.display());
    }
    let bytes = fs::copy(source, target)
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
    let modified = fs::metadata(source)
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("Failed to read modification time: {}", source.display()))?;
    File::options()
        .write(true)
        .open(target)
        .and_then(|file| file.set_modified(modified))
        .with_context(|| format!("Failed to set modification time: {}", target.display()))?;
    Ok(bytes)
}

/// Run the interactive session on stdin and stdout.
pub fn run_interactive(config: &Config) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(config, stdin.lock(), stdout.lock()).run()
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(config: &'a Config, input: R, output: W) -> Self {
        Self {
            config,
            resolver: config.library.search_resolver(),
            input,
            output,
            pending_term: config.initial_term.clone(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Detected system: {}", self.config.system.cyan().bold())?;
        if self.config.verbose {
            for root in self.resolver.roots() {
                writeln!(self.output, "Search root: {}", root.display())?;
            }
            writeln!(self.output, "Copying to: {}", self.config.destination.display())?;
            writeln!(self.output, "Dryrun: {}", rom_tools::colorize_bool(self.config.dryrun))?;
        }

        let mut state = SessionState::AwaitingTerm;
        while state != SessionState::Done {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// Advance the session by one state.
    pub fn step(&mut self, state: SessionState) -> Result<SessionState> {
        match state {
            SessionState::AwaitingTerm => self.await_term(),
            SessionState::ShowingResults(matches) => self.show_results(matches),
            SessionState::AwaitingSelection(matches) => self.await_selection(&matches),
            SessionState::Done => Ok(SessionState::Done),
        }
    }

    fn await_term(&mut self) -> Result<SessionState> {
        let line = match self.pending_term.take() {
            Some(term) => Some(term),
            None => self.prompt("\nEnter search term (or 'q' to quit): ")?,
        };
        let Some(line) = line else {
            return Ok(SessionState::Done);
        };

        match TermInput::parse(&line) {
            TermInput::Quit => {
                writeln!(self.output, "Quitting.")?;
                Ok(SessionState::Done)
            }
            TermInput::Empty => {
                writeln!(self.output, "{}", "Empty search term, please enter something.".yellow())?;
                Ok(SessionState::AwaitingTerm)
            }
            TermInput::Term(term) => self.search(&term),
        }
    }

    fn search(&mut self, term: &str) -> Result<SessionState> {
        let outcome = self.resolver.search_with_fallback(term, &self.config.system);
        if outcome.is_empty() {
            writeln!(
                self.output,
                "{}",
                "No matching files found in normal or deep search.".yellow()
            )?;
            return Ok(SessionState::AwaitingTerm);
        }
        if outcome.tier == SearchTier::Deep {
            writeln!(
                self.output,
                "{}",
                "No matching files found in normal search, showing deep search results.".yellow()
            )?;
        }
        Ok(SessionState::ShowingResults(outcome.matches))
    }

    fn show_results(&mut self, matches: Vec<PathBuf>) -> Result<SessionState> {
        writeln!(self.output, "\n{}", "Found files:".bold())?;
        for (number, path) in matches.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, rom_tools::path_to_filename_string(path))?;
            if self.config.full_path {
                writeln!(self.output, "   {}", path.display().to_string().dimmed())?;
            }
        }
        Ok(SessionState::AwaitingSelection(matches))
    }

    fn await_selection(&mut self, matches: &[PathBuf]) -> Result<SessionState> {
        let Some(line) = self.prompt("\nEnter file numbers to copy (e.g. 1,2 or 'all'): ")? else {
            return Ok(SessionState::Done);
        };

        let selections = parse_selection(&line, matches.len());
        if selections.is_empty() {
            writeln!(self.output, "Nothing selected.")?;
        }
        for selection in selections {
            match selection {
                Selection::Index(index) => self.copy_selected(&matches[index])?,
                Selection::Invalid(token) => {
                    writeln!(self.output, "{}", format!("Invalid selection: {token}").yellow())?;
                }
            }
        }
        Ok(SessionState::AwaitingTerm)
    }

    fn copy_selected(&mut self, source: &Path) -> Result<()> {
        let filename = rom_tools::path_to_filename_string(source);
        let suggested = suggest_name(&filename);

        writeln!(self.output, "\nCopy file: '{filename}'")?;
        let (old_diff, new_diff) = rom_tools::color_diff(&filename, &suggested, true);
        writeln!(self.output, "{old_diff}")?;
        if old_diff != new_diff {
            writeln!(self.output, "{new_diff}")?;
        }

        let name = self
            .prompt("Press Enter to accept the suggested name or type a new name: ")?
            .filter(|name| !name.is_empty())
            .unwrap_or(suggested);
        if name.contains(['/', '\\']) {
            writeln!(
                self.output,
                "{}",
                format!("Skipping copy, name contains a path separator: {name}").yellow()
            )?;
            return Ok(());
        }

        let target = self.config.destination.join(&name);
        if self.config.dryrun {
            writeln!(self.output, "{} '{filename}' -> '{name}'", "[DRYRUN] Copy".magenta())?;
            return Ok(());
        }

        writeln!(self.output, "Copying '{filename}' -> '{name}'")?;
        match copy_file(source, &target) {
            Ok(_) => writeln!(self.output, "{}", "Copied".green())?,
            Err(error) => writeln!(self.output, "{}", format!("Error: {error:#}").red())?,
        }
        Ok(())
    }

    /// Print the message and read one trimmed line. Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message.magenta())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).context("Failed to read input")? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
