//! Recommendation parser. Splits a model reply into intro, entries and
//! trailing notes, then pulls title, body and link out of each entry line.
//!
//! Pure and lenient: nothing here fails. A missing pattern just leaves the
//! corresponding field empty.
//!
//! Title precedence: `**bold**` span, then text before the first `" - "`, then
//! the first 50 characters. Saved list items depend on this order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTRO_MAX_CHARS: usize = 200;
const FALLBACK_TITLE_CHARS: usize = 50;
const TITLE_SEPARATOR: &str = " - ";

static ENTRY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s*").expect("entry prefix pattern is valid"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

/// Non-empty lines of a reply, sorted into their three roles. Borrows from the reply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassifiedLines<'a> {
    pub intro: Option<&'a str>,
    pub entries: Vec<&'a str>,
    pub other: Vec<&'a str>,
}

/// One enumerated recommendation.
///
/// `link` is untrusted text copied from the model output; renderers must only
/// use it as an anchor target opened without referrer or opener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    /// Declared ordinal, as written. Not validated or renumbered.
    pub index: Option<u32>,
    pub title: Option<String>,
    pub body: String,
    pub link: Option<String>,
    pub link_label: Option<String>,
    /// The entry line exactly as received; saved as the item description.
    pub line: String,
}

/// Structured form of a whole reply.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ParsedResponse {
    pub intro: Option<String>,
    pub items: Vec<RecommendationItem>,
    pub other: Vec<String>,
}

impl ParsedResponse {
    pub fn parse(raw: &str, intro_max_chars: usize) -> Self {
        let lines = classify_lines(raw, intro_max_chars);
        ParsedResponse {
            intro: lines.intro.map(str::to_string),
            items: lines.entries.into_iter().map(extract_item).collect(),
            other: lines.other.into_iter().map(str::to_string).collect(),
        }
    }
}

pub fn is_entry_line(line: &str) -> bool {
    ENTRY_PREFIX.is_match(line)
}

/// Sorts the non-empty lines of `raw` into intro, entries and other.
///
/// Only the first non-entry line shorter than `intro_max_chars` becomes the
/// intro; any later short line lands in `other`, even if it reads like an intro.
pub fn classify_lines(raw: &str, intro_max_chars: usize) -> ClassifiedLines<'_> {
    let mut classified = ClassifiedLines::default();

    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        if is_entry_line(line) {
            classified.entries.push(line);
        } else if classified.intro.is_none() && line.chars().count() < intro_max_chars {
            classified.intro = Some(line);
        } else {
            classified.other.push(line);
        }
    }

    classified
}

/// Extracts a `RecommendationItem` from one entry line.
///
/// Lossy and one-way: rebuilding a line from title, body and link and
/// extracting again does not, in general, give back the same title.
pub fn extract_item(line: &str) -> RecommendationItem {
    let (index, stripped) = match ENTRY_PREFIX.captures(line) {
        Some(caps) => {
            let prefix_end = caps.get(0).map_or(0, |m| m.end());
            let index = caps[1].parse::<u32>().unwrap_or(u32::MAX);
            (Some(index), &line[prefix_end..])
        }
        None => (None, line),
    };

    let (link_label, link) = match LINK.captures(stripped) {
        Some(caps) => (Some(caps[1].to_string()), Some(caps[2].to_string())),
        None => (None, None),
    };

    let (title, body) = match BOLD.captures(stripped) {
        Some(caps) => {
            let span = caps.get(0).map_or("", |m| m.as_str());
            let rest = stripped.replacen(span, "", 1);
            let rest = LINK.replace_all(&rest, "");
            (non_empty(caps[1].trim()), tidy_body(&rest.replace("**", "")))
        }
        // Fallback titles come from the line as written, links included.
        None => match stripped.find(TITLE_SEPARATOR) {
            Some(pos) => {
                let rest = &stripped[pos + TITLE_SEPARATOR.len()..];
                (
                    non_empty(&stripped[..pos]),
                    tidy_body(&LINK.replace_all(rest, "")),
                )
            }
            None => {
                let head: String = stripped.chars().take(FALLBACK_TITLE_CHARS).collect();
                (non_empty(&head), tidy_body(&LINK.replace_all(stripped, "")))
            }
        },
    };

    RecommendationItem {
        index,
        title,
        body,
        link,
        link_label,
        line: line.to_string(),
    }
}

/// Removes `**` markers for display of intro and trailing lines.
pub fn strip_bold_markers(line: &str) -> String {
    line.replace("**", "")
}

/// Collapses the gaps left by removed spans and drops dangling `-` separators.
fn tidy_body(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut body = collapsed.as_str();
    loop {
        let next = body
            .strip_suffix(" -")
            .or_else(|| body.strip_prefix("- "))
            .or(if body == "-" { Some("") } else { None });
        match next {
            Some(rest) => body = rest.trim(),
            None => break,
        }
    }
    body.to_string()
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Here are 3 picks!\n\
        1. **Song A** by X - a bop - [Spotify](https://x)\n\
        2. **Song B** by Y - chill - [Spotify](https://y)\n\
        Enjoy!";

    #[test]
    fn test_end_to_end_sample_reply() {
        let parsed = ParsedResponse::parse(SAMPLE, DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(parsed.intro.as_deref(), Some("Here are 3 picks!"));
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].title.as_deref(), Some("Song A"));
        assert_eq!(parsed.items[0].link.as_deref(), Some("https://x"));
        assert_eq!(parsed.items[1].title.as_deref(), Some("Song B"));
        assert_eq!(parsed.items[1].link.as_deref(), Some("https://y"));
        assert_eq!(parsed.other, vec!["Enjoy!".to_string()]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let classified = classify_lines("", DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(classified, ClassifiedLines::default());
        let parsed = ParsedResponse::parse("\n  \n\n", DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(parsed, ParsedResponse::default());
    }

    #[test]
    fn test_second_short_line_is_not_promoted_to_intro() {
        let raw = "Welcome!\nAlso short.\n1. **A**";
        let classified = classify_lines(raw, DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(classified.intro, Some("Welcome!"));
        assert_eq!(classified.other, vec!["Also short."]);
    }

    #[test]
    fn test_intro_is_first_short_line_even_after_long_one() {
        let long = "x".repeat(250);
        let raw = format!("{long}\n1. **A**\nShort tip");
        let classified = classify_lines(&raw, DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(classified.intro, Some("Short tip"));
        assert_eq!(classified.other, vec![long.as_str()]);
    }

    #[test]
    fn test_line_at_threshold_is_not_intro() {
        let exact = "y".repeat(10);
        let classified = classify_lines(&exact, 10);
        assert_eq!(classified.intro, None);
        assert_eq!(classified.other.len(), 1);
    }

    #[test]
    fn test_entries_keep_encounter_order_and_duplicates() {
        let raw = "3. **C**\n1. **A**\n3. **C**";
        let parsed = ParsedResponse::parse(raw, DEFAULT_INTRO_MAX_CHARS);
        let indexes: Vec<_> = parsed.items.iter().map(|i| i.index).collect();
        assert_eq!(indexes, vec![Some(3), Some(1), Some(3)]);
        assert_eq!(parsed.items[0], parsed.items[2]);
    }

    #[test]
    fn test_indented_numbers_are_not_entries() {
        assert!(is_entry_line("12. Something"));
        assert!(is_entry_line("4.No space"));
        assert!(!is_entry_line("  1. indented"));
        assert!(!is_entry_line("1) paren"));
    }

    #[test]
    fn test_bold_title_with_link() {
        let item = extract_item(
            "3. **Dune** by Frank Herbert (1965) - epic saga - [Goodreads](https://goodreads.com/x)",
        );
        assert_eq!(item.index, Some(3));
        assert_eq!(item.title.as_deref(), Some("Dune"));
        assert_eq!(item.link.as_deref(), Some("https://goodreads.com/x"));
        assert_eq!(item.link_label.as_deref(), Some("Goodreads"));
        assert!(item.body.contains("by Frank Herbert (1965) - epic saga"));
        assert!(!item.body.contains("**"));
        assert!(!item.body.contains('['));
        assert!(!item.body.contains("]("));
    }

    #[test]
    fn test_fallback_title_splits_on_separator() {
        let item = extract_item("2. The Hobbit - a classic adventure");
        assert_eq!(item.title.as_deref(), Some("The Hobbit"));
        assert_eq!(item.body, "a classic adventure");
        assert_eq!(item.link, None);
    }

    #[test]
    fn test_fallback_title_takes_first_fifty_chars() {
        let sentence =
            "An absolutely sprawling run-on sentence about a film that never seems to end at all";
        assert!(sentence.chars().count() > 50);
        let item = extract_item(&format!("7. {sentence}"));
        let expected: String = sentence.chars().take(50).collect();
        assert_eq!(item.title.as_deref(), Some(expected.as_str()));
        assert_eq!(item.link, None);
        assert_eq!(item.body, sentence);
    }

    #[test]
    fn test_fallback_title_counts_characters_not_bytes() {
        let text = "é".repeat(60);
        let item = extract_item(&format!("1. {text}"));
        assert_eq!(item.title.map(|t| t.chars().count()), Some(50));
    }

    #[test]
    fn test_linked_fallback_title_keeps_link_markup() {
        let item = extract_item("2. [The Hobbit](https://g.com/h) - a classic adventure");
        assert_eq!(item.title.as_deref(), Some("[The Hobbit](https://g.com/h)"));
        assert_eq!(item.body, "a classic adventure");
        assert_eq!(item.link.as_deref(), Some("https://g.com/h"));
        assert_eq!(item.link_label.as_deref(), Some("The Hobbit"));
    }

    #[test]
    fn test_leading_link_without_separator_uses_first_fifty_chars() {
        let item = extract_item("1. [Song A](https://x) by X with no separator at all");
        assert_eq!(
            item.title.as_deref(),
            Some("[Song A](https://x) by X with no separator at all")
        );
        assert_eq!(item.body, "by X with no separator at all");
        assert_eq!(item.link.as_deref(), Some("https://x"));
    }

    #[test]
    fn test_fallback_title_is_trimmed() {
        let item = extract_item("3.   Padded title   - body");
        assert_eq!(item.title.as_deref(), Some("Padded title"));
    }

    #[test]
    fn test_hyphenated_words_are_not_separators() {
        let item = extract_item("5. Spider-Man: Into the Spider-Verse - animated");
        assert_eq!(item.title.as_deref(), Some("Spider-Man: Into the Spider-Verse"));
        assert_eq!(item.body, "animated");
    }

    #[test]
    fn test_secondary_bold_keeps_text_without_markers() {
        let item = extract_item("1. **Heat** (1995) starring **Al Pacino**");
        assert_eq!(item.title.as_deref(), Some("Heat"));
        assert_eq!(item.body, "(1995) starring Al Pacino");
    }

    #[test]
    fn test_first_link_wins_all_links_removed_from_body() {
        let item = extract_item("1. **X** - [One](https://1) and [Two](https://2)");
        assert_eq!(item.link.as_deref(), Some("https://1"));
        assert_eq!(item.body, "and");
    }

    #[test]
    fn test_link_is_passed_through_unchecked() {
        let item = extract_item("1. **X** [click](javascript:alert)");
        assert_eq!(item.link.as_deref(), Some("javascript:alert"));
    }

    #[test]
    fn test_bare_ordinal_has_no_title() {
        let item = extract_item("9.");
        assert_eq!(item.index, Some(9));
        assert_eq!(item.title, None);
        assert_eq!(item.body, "");
    }

    #[test]
    fn test_huge_ordinal_does_not_panic() {
        let item = extract_item("99999999999999. **Big**");
        assert_eq!(item.index, Some(u32::MAX));
        assert_eq!(item.title.as_deref(), Some("Big"));
    }

    #[test]
    fn test_unterminated_markup_degrades_to_fallback() {
        let item = extract_item("1. **Broken - [label](no-close");
        assert_eq!(item.title.as_deref(), Some("**Broken"));
        assert_eq!(item.link, None);
    }

    #[test]
    fn test_line_is_preserved_verbatim() {
        let line = "4. **Arrival** (2016) - [IMDb](https://imdb.com/a)";
        assert_eq!(extract_item(line).line, line);
    }

    /// Extraction is one-way: a line rebuilt without bold markup falls back to
    /// the separator rule and yields a different title.
    #[test]
    fn test_reconstructed_line_does_not_round_trip() {
        let first = extract_item(
            "3. **Dune** by Frank Herbert (1965) - epic saga - [Goodreads](https://goodreads.com/x)",
        );
        let rebuilt = format!(
            "3. {} {} [{}]({})",
            first.title.clone().unwrap_or_default(),
            first.body,
            first.link_label.clone().unwrap_or_default(),
            first.link.clone().unwrap_or_default()
        );
        let again = extract_item(&rebuilt);
        assert_ne!(again.title, first.title);
        assert_eq!(again.link, first.link);
    }

    #[test]
    fn test_strip_bold_markers() {
        assert_eq!(strip_bold_markers("**Tip:** listen loud"), "Tip: listen loud");
    }

    #[test]
    fn test_crlf_lines_are_classified() {
        let parsed = ParsedResponse::parse("Hi\r\n1. **A** - b\r\n", DEFAULT_INTRO_MAX_CHARS);
        assert_eq!(parsed.intro.as_deref(), Some("Hi"));
        assert_eq!(parsed.items[0].body, "b");
    }
}
