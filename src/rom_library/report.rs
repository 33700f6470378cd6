//! Catalog exports: JSON per system and a Markdown overview table.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::rom_library::scanner::{Catalog, Game};

const TABLE_HEADER: &str = "| System | Name | Files | Extended | Romhack |";
const TABLE_DIVIDER: &str = "|--------|------|-------|----------|---------|";

/// Serialize the catalog as pretty-printed JSON keyed by system.
pub fn catalog_json(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")
}

/// Write the catalog JSON to the given path.
pub fn write_catalog_json(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = catalog_json(catalog)?;
    fs::write(path, json).with_context(|| format!("Failed to write catalog: {}", path.display()))
}

/// Render all games as a single Markdown table sorted by system and name.
///
/// Returns an empty string for an empty catalog.
#[must_use]
pub fn markdown_table(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return String::new();
    }

    let rows = catalog
        .iter_games()
        .sorted_by_cached_key(|game| (game.system.to_lowercase(), game.name.to_lowercase()))
        .map(table_row);

    let mut lines = vec![TABLE_HEADER.to_string(), TABLE_DIVIDER.to_string()];
    lines.extend(rows);
    // Blank line after the table
    lines.push(String::new());
    lines.join("\n")
}

/// Write the Markdown table to the given path.
pub fn write_markdown(catalog: &Catalog, path: &Path) -> Result<()> {
    fs::write(path, markdown_table(catalog))
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn table_row(game: &Game) -> String {
    format!(
        "| {} | {} | {} | {} | {} |",
        escape_cell(&game.system),
        escape_cell(&game.name),
        escape_cell(&game.filenames.join(", ")),
        crate::yes_no(game.extended),
        crate::yes_no(game.romhack)
    )
}

/// Escape pipes so cell text cannot split a table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', r"\|")
}
