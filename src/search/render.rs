//! Pure view models for the suggestion dropdown.
//!
//! Nothing here touches the DOM; components map these values to markup.

use super::session::{Dropdown, SearchSession};
use crate::api::Suggestion;

/// A run of title text; `Mark` runs matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Mark(String),
}

pub(crate) fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of `needle` matched case-insensitively at the start of `hay`.
fn match_len(hay: &str, needle: &[char]) -> Option<usize> {
    let mut chars = hay.chars();
    let mut len = 0;
    for &n in needle {
        let c = chars.next()?;
        if !chars_match(c, n) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

/// Split `text` so that every case-insensitive occurrence of `query` is a
/// `Mark` segment. Matches are found left to right and never overlap.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if query.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let needle: Vec<char> = query.chars().collect();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < text.len() {
        match match_len(&text[pos..], &needle) {
            Some(len) => {
                if plain_start < pos {
                    segments.push(Segment::Plain(text[plain_start..pos].to_string()));
                }
                segments.push(Segment::Mark(text[pos..pos + len].to_string()));
                pos += len;
                plain_start = pos;
            }
            None => {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::Plain(text[plain_start..].to_string()));
    }
    segments
}

/// "Ø 4.6m • 3 variants", or `None` when the suggestion has neither.
pub fn metadata_line(suggestion: &Suggestion) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(d) = suggestion.diameter.filter(|d| *d != 0.0) {
        parts.push(format!("Ø {}m", d));
    }
    if let Some(n) = suggestion.variant_count.filter(|n| *n > 0) {
        parts.push(format!(
            "{} {}",
            n,
            plural(n as usize, "variant", "variants")
        ));
    }
    (!parts.is_empty()).then(|| parts.join(" • "))
}

/// Counter line under the model field.
pub fn results_counter(count: usize, query: &str) -> String {
    if count > 0 {
        format!("{} {} found", count, plural(count, "model", "models"))
    } else if !query.is_empty() {
        "No models match your search".to_string()
    } else {
        String::new()
    }
}

pub fn empty_message(query: &str) -> String {
    format!("No models found for \"{}\"", query)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub name: String,
    pub title: Vec<Segment>,
    pub meta: Option<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    Hidden,
    Rows(Vec<SuggestionRow>),
    Empty { query: String },
    Failed,
}

impl DropdownView {
    pub fn from_session(session: &SearchSession) -> Self {
        match session.dropdown() {
            Dropdown::Closed => DropdownView::Hidden,
            Dropdown::Failed => DropdownView::Failed,
            Dropdown::Open => {
                let query = session.listed_for().unwrap_or_default();
                if session.suggestions().is_empty() {
                    return if query.is_empty() {
                        DropdownView::Hidden
                    } else {
                        DropdownView::Empty {
                            query: query.to_string(),
                        }
                    };
                }
                let rows = session
                    .suggestions()
                    .iter()
                    .enumerate()
                    .map(|(i, s)| SuggestionRow {
                        name: s.name.clone(),
                        title: highlight(&s.name, query),
                        meta: metadata_line(s),
                        highlighted: session.highlighted() == Some(i),
                    })
                    .collect();
                DropdownView::Rows(rows)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::search::session::{Lookup, NavKey};
    use crate::testing::suggestion;

    fn plain(s: &str) -> Segment {
        Segment::Plain(s.to_string())
    }

    fn mark(s: &str) -> Segment {
        Segment::Mark(s.to_string())
    }

    #[test]
    fn test_highlight_every_occurrence_ignoring_case() {
        assert_eq!(
            highlight("SFM135-sfm", "sfm"),
            vec![mark("SFM"), plain("135-"), mark("sfm")]
        );
    }

    #[test]
    fn test_highlight_empty_query_is_plain() {
        assert_eq!(highlight("RCT 80", ""), vec![plain("RCT 80")]);
    }

    #[test]
    fn test_highlight_treats_regex_chars_literally() {
        assert_eq!(
            highlight("A.B (x)", "(x)"),
            vec![plain("A.B "), mark("(x)")]
        );
        assert_eq!(highlight("AxB", "."), vec![plain("AxB")]);
    }

    #[test]
    fn test_highlight_non_ascii() {
        assert_eq!(highlight("Ø 4m Ø", "ø"), vec![mark("Ø"), plain(" 4m "), mark("Ø")]);
    }

    #[test]
    fn test_highlight_matches_do_not_overlap() {
        assert_eq!(highlight("aaa", "aa"), vec![mark("aa"), plain("a")]);
    }

    #[test]
    fn test_metadata_line() {
        assert_eq!(
            metadata_line(&suggestion("RCT 80", Some(4.6), Some(3))).as_deref(),
            Some("Ø 4.6m • 3 variants")
        );
        assert_eq!(
            metadata_line(&suggestion("RCT 80", None, Some(1))).as_deref(),
            Some("1 variant")
        );
        assert_eq!(metadata_line(&suggestion("RCT 80", Some(0.0), Some(0))), None);
    }

    #[test]
    fn test_results_counter() {
        assert_eq!(results_counter(1, "RC"), "1 model found");
        assert_eq!(results_counter(12, ""), "12 models found");
        assert_eq!(results_counter(0, "ZZ"), "No models match your search");
        assert_eq!(results_counter(0, ""), "");
    }

    fn listed(query: &str, list: Vec<Suggestion>) -> SearchSession {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let lookup = session.on_input(query).unwrap_or(Lookup::All);
        let pending = session.begin_lookup(&lookup).unwrap();
        session.apply_lookup(&pending, Ok(list));
        session
    }

    #[test]
    fn test_dropdown_rows_mark_highlight() {
        let mut session = listed(
            "rc",
            vec![
                suggestion("RCT 80", Some(4.6), Some(2)),
                suggestion("RCT 90", None, None),
            ],
        );
        session.on_key(NavKey::ArrowDown);
        let DropdownView::Rows(rows) = DropdownView::from_session(&session) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows[0].highlighted);
        assert!(!rows[1].highlighted);
        assert_eq!(rows[0].title, vec![mark("RC"), plain("T 80")]);
        assert_eq!(rows[0].meta.as_deref(), Some("Ø 4.6m • 2 variants"));
        assert_eq!(rows[1].meta, None);
    }

    #[test]
    fn test_dropdown_empty_state_names_query() {
        let session = listed("ZZ", vec![]);
        let view = DropdownView::from_session(&session);
        assert_eq!(view, DropdownView::Empty { query: "ZZ".to_string() });
        assert_eq!(empty_message("ZZ"), "No models found for \"ZZ\"");
    }

    #[test]
    fn test_dropdown_hidden_for_empty_listing() {
        let session = listed("", vec![]);
        assert_eq!(DropdownView::from_session(&session), DropdownView::Hidden);
    }

    proptest! {
        /// Property: highlighting never loses or reorders text
        #[test]
        fn prop_highlight_preserves_text(text in "[a-zA-Z0-9 Øø-]{0,24}", query in "[a-zA-Z0-9Øø]{0,3}") {
            let joined: String = highlight(&text, &query)
                .into_iter()
                .map(|s| match s {
                    Segment::Plain(t) | Segment::Mark(t) => t,
                })
                .collect();
            prop_assert_eq!(joined, text);
        }

        /// Property: every marked run equals the query ignoring case
        #[test]
        fn prop_marks_equal_query(text in "[a-cA-C]{0,24}", query in "[a-cA-C]{1,3}") {
            for segment in highlight(&text, &query) {
                if let Segment::Mark(m) = segment {
                    prop_assert_eq!(m.to_lowercase(), query.to_lowercase());
                }
            }
        }
    }
}
