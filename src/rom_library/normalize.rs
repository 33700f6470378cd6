//! Suggest clean filenames for copied ROMs.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use unicode_normalization::UnicodeNormalization;

/// Leading catalog number like `03 - ` or `01_`.
static RE_ORDERING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s*[-_]*\s*").expect("Failed to compile ordering prefix regex"));

static RE_PARENTHESES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("Failed to compile parentheses regex"));

static RE_SQUARE_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("Failed to compile square brackets regex"));

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Tags that carry meaning and are kept in the suggested name.
const KEEP_TAGS: &[&str] = &["romhack", "disc"];

/// Derive a clean filename from a noisy source filename.
///
/// Removes leading ordering numbers and all `(...)` and `[...]` annotations,
/// except the ones mentioning a romhack or a disc number.
///
/// ```rust
/// use rom_tools::rom_library::suggest_name;
///
/// assert_eq!(suggest_name("01_Game (USA) [romhack v2].nes"), "Game [romhack v2].nes");
/// assert_eq!(suggest_name("03 - Quest (Europe) (Disc 2).iso"), "Quest (Disc 2).iso");
/// ```
#[must_use]
pub fn suggest_name(original: &str) -> String {
    let (stem, extension) = match original.rsplit_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (original, None),
    };

    let cleaned = remove_annotations(stem, &RE_PARENTHESES);
    let cleaned = remove_annotations(&cleaned, &RE_SQUARE_BRACKETS);
    let cleaned = collapse_whitespace(&cleaned);
    // A name made only of annotations is kept as is
    let cleaned = if cleaned.is_empty() { collapse_whitespace(stem) } else { cleaned };
    let stem = strip_ordering_prefix(&cleaned);

    let suggested = match extension {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem.to_string(),
    };
    suggested.nfc().collect()
}

/// Remove leading ordering numbers until none is left.
/// The last number stays when nothing else would remain, so `1942` keeps its title.
fn strip_ordering_prefix(stem: &str) -> &str {
    let mut stem = stem;
    while let Some(prefix) = RE_ORDERING_PREFIX.find(stem) {
        let rest = &stem[prefix.end()..];
        if rest.is_empty() {
            break;
        }
        stem = rest;
    }
    stem
}

fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn remove_annotations(stem: &str, pattern: &Regex) -> String {
    pattern
        .replace_all(stem, |captures: &Captures| {
            let content = captures[1].to_lowercase();
            if KEEP_TAGS.iter().any(|tag| content.contains(tag)) {
                captures[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_region_keeps_romhack() {
        assert_eq!(suggest_name("01_Game (USA) [romhack v2].nes"), "Game [romhack v2].nes");
    }

    #[test]
    fn strips_catalog_prefix_variants() {
        assert_eq!(suggest_name("03 - Chrono Trigger.sfc"), "Chrono Trigger.sfc");
        assert_eq!(suggest_name("  12__Metroid.nes"), "Metroid.nes");
        assert_eq!(suggest_name("7-Tetris.gb"), "Tetris.gb");
    }

    #[test]
    fn keeps_disc_tags() {
        assert_eq!(
            suggest_name("Final Fantasy VII (USA) (Disc 1).bin"),
            "Final Fantasy VII (Disc 1).bin"
        );
        assert_eq!(suggest_name("Title [Disc1of2] [!].bin"), "Title [Disc1of2].bin");
    }

    #[test]
    fn keep_match_is_case_insensitive() {
        assert_eq!(suggest_name("Mario (ROMHACK) (Beta).smc"), "Mario (ROMHACK).smc");
    }

    #[test]
    fn removes_all_plain_annotations() {
        assert_eq!(suggest_name("Zelda (USA) (Rev 1) [!] [b1].sfc"), "Zelda.sfc");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(suggest_name("Super   Mario (USA)   World.sfc"), "Super Mario World.sfc");
    }

    #[test]
    fn only_last_dot_separates_extension() {
        assert_eq!(suggest_name("Dr. Mario (Japan).nes"), "Dr. Mario.nes");
    }

    #[test]
    fn name_without_extension() {
        assert_eq!(suggest_name("02 - Quest (Europe)"), "Quest");
    }

    #[test]
    fn numeric_title_is_not_stripped_away() {
        assert_eq!(suggest_name("1942.nes"), "1942.nes");
        assert_eq!(suggest_name("03 - 1942 (Japan).nes"), "1942.nes");
        assert_eq!(suggest_name("1942 (Japan).nes"), "1942.nes");
        assert_eq!(suggest_name("12.nes"), "12.nes");
    }

    #[test]
    fn strips_repeated_ordering_prefixes() {
        assert_eq!(suggest_name("5 7 Game.nes"), "Game.nes");
        assert_eq!(suggest_name("01 - 02 - Title.nes"), "Title.nes");
        assert_eq!(suggest_name("01 - 5 7"), "7");
    }

    #[test]
    fn annotation_only_name_is_kept() {
        assert_eq!(suggest_name("(USA)  [!].nes"), "(USA) [!].nes");
    }

    #[test]
    fn numbers_inside_title_are_kept() {
        assert_eq!(suggest_name("Tekken 3 (USA).bin"), "Tekken 3.bin");
    }

    #[test]
    fn composes_unicode() {
        let decomposed = "Pok\u{65}\u{301}mon (USA).gb";
        assert_eq!(suggest_name(decomposed), "Pok\u{e9}mon.gb");
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "01_Game (USA) [romhack v2].nes",
            "03 - 1942 (Japan).nes",
            "Final Fantasy VII (USA) (Disc 1).bin",
            "Title [Disc1of2] [!].bin",
            "  05 _ Super   Metroid (JU) [!].sfc",
            "Quest (disc 2) (Europe).iso",
            "Mario (ROMHACK) (Beta).smc",
            "5 7 Game.nes",
            "01 - 02 - Title.nes",
            "1942 (Japan).nes",
            "01 (USA) 02 - Game.sfc",
            "(Europe).gb",
            "3 (Disc 1).bin",
        ];
        for input in inputs {
            let once = suggest_name(input);
            assert_eq!(suggest_name(&once), once, "not idempotent for '{input}'");
        }
    }
}
