//! Autocomplete state for one category-selection lifetime.
//!
//! The session owns the query text, the suggestion list, the highlighted row
//! and dropdown visibility. It never touches timers or the network: input
//! handlers return the [`Lookup`] to debounce, [`SearchSession::begin_lookup`]
//! issues a ticket, and [`SearchSession::apply_lookup`] applies the result only
//! if that ticket is still the newest one.

use tracing::{debug, warn};

use super::render::results_counter;
use super::ticket::{LatestWins, RequestId};
use crate::api::Suggestion;
use crate::error::FetchError;

/// Queries shorter than this (but non-empty) never reach the network.
pub const MIN_FILTER_CHARS: usize = 2;

/// What a debounced lookup should fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Unfiltered listing of the category.
    All,
    Matching(String),
}

impl Lookup {
    pub fn query(&self) -> &str {
        match self {
            Lookup::All => "",
            Lookup::Matching(q) => q,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dropdown {
    #[default]
    Closed,
    Open,
    /// The last lookup failed; shown as an error panel, distinct from "no matches".
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(NavKey::ArrowDown),
            "ArrowUp" => Some(NavKey::ArrowUp),
            "Enter" => Some(NavKey::Enter),
            "Escape" => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// An issued lookup. Hand it back to [`SearchSession::apply_lookup`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub id: RequestId,
    pub category: String,
    pub lookup: Lookup,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    category: Option<String>,
    text: String,
    suggestions: Vec<Suggestion>,
    /// Query the current suggestion list was fetched for.
    listed_for: Option<String>,
    highlighted: Option<usize>,
    dropdown: Dropdown,
    lookups: LatestWins,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Lifecycle --

    /// Back to the pristine state with no category. In-flight lookups become stale.
    pub fn reset(&mut self) {
        self.category = None;
        self.text.clear();
        self.suggestions.clear();
        self.listed_for = None;
        self.highlighted = None;
        self.dropdown = Dropdown::Closed;
        self.lookups.supersede();
    }

    pub fn select_category(&mut self, code: &str) {
        self.reset();
        self.category = Some(code.to_string());
    }

    // -- Accessors --

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Raw input text, as displayed in the field.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn query(&self) -> &str {
        self.text.trim()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn listed_for(&self) -> Option<&str> {
        self.listed_for.as_deref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn dropdown(&self) -> Dropdown {
        self.dropdown
    }

    pub fn is_open(&self) -> bool {
        self.dropdown != Dropdown::Closed
    }

    /// "{n} models found" style line under the field; blank when nothing is listed.
    pub fn counter_text(&self) -> String {
        match &self.listed_for {
            Some(query) => results_counter(self.suggestions.len(), query),
            None => String::new(),
        }
    }

    /// Style class for the counter line.
    pub fn counter_class(&self) -> &'static str {
        match &self.listed_for {
            Some(_) if !self.suggestions.is_empty() => "field-hint has-results",
            Some(query) if !query.is_empty() => "field-hint no-results",
            _ => "field-hint",
        }
    }

    // -- Input --

    /// Record new text. Returns the lookup to debounce, or `None` when the
    /// pending one should just be cancelled (single-character queries).
    pub fn on_input(&mut self, text: &str) -> Option<Lookup> {
        self.text = text.to_string();
        self.highlighted = None;
        self.lookups.supersede();

        let query = self.query();
        match query.chars().count() {
            0 => Some(Lookup::All),
            n if n < MIN_FILTER_CHARS => {
                self.dropdown = Dropdown::Closed;
                self.suggestions.clear();
                self.listed_for = None;
                None
            }
            _ => Some(Lookup::Matching(query.to_string())),
        }
    }

    /// Empty field: re-list the category. Otherwise reopen cached suggestions
    /// for the current query without fetching.
    pub fn on_focus(&mut self) -> Option<Lookup> {
        if self.query().is_empty() {
            let text = self.text.clone();
            return self.on_input(&text);
        }
        if self.listed_for.as_deref() == Some(self.query()) && !self.suggestions.is_empty() {
            self.dropdown = Dropdown::Open;
        }
        None
    }

    // -- Lookups --

    /// Issue a lookup once its debounce window has elapsed. `None` without a category.
    pub fn begin_lookup(&mut self, lookup: &Lookup) -> Option<PendingLookup> {
        let category = self.category.clone()?;
        let id = self.lookups.issue();
        Some(PendingLookup {
            id,
            category,
            lookup: lookup.clone(),
        })
    }

    /// Apply a finished lookup. Returns `false`, changing nothing, when a newer
    /// lookup has been issued (or the session reset) since `pending` was issued.
    pub fn apply_lookup(
        &mut self,
        pending: &PendingLookup,
        result: Result<Vec<Suggestion>, FetchError>,
    ) -> bool {
        if !self.lookups.is_current(pending.id) {
            debug!(
                "Dropping stale lookup {} for {:?} (current {})",
                pending.id,
                pending.lookup.query(),
                self.lookups.current()
            );
            return false;
        }

        self.highlighted = None;
        match result {
            Ok(suggestions) => {
                let query = pending.lookup.query();
                self.dropdown = if suggestions.is_empty() && query.is_empty() {
                    Dropdown::Closed
                } else {
                    Dropdown::Open
                };
                self.suggestions = suggestions;
                self.listed_for = Some(query.to_string());
            }
            Err(e) => {
                warn!("Failed to load models: {}", e);
                self.suggestions.clear();
                self.listed_for = None;
                self.dropdown = Dropdown::Failed;
            }
        }
        true
    }

    // -- Navigation --

    /// Keyboard handling. Returns the committed model name on Enter.
    pub fn on_key(&mut self, key: NavKey) -> Option<String> {
        if key == NavKey::Escape {
            self.dismiss();
            return None;
        }
        if self.dropdown != Dropdown::Open {
            return None;
        }

        let len = self.suggestions.len();
        match key {
            NavKey::ArrowDown => {
                if len > 0 {
                    let next = self.highlighted.map_or(0, |i| i + 1);
                    self.highlighted = Some(next.min(len - 1));
                }
                None
            }
            NavKey::ArrowUp => {
                self.highlighted = match self.highlighted {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                None
            }
            NavKey::Enter => match self.highlighted {
                Some(i) => self.select(i),
                None => None,
            },
            NavKey::Escape => None,
        }
    }

    /// Key pressed anywhere on the page, focus or not. Only Escape acts there.
    /// Returns whether the dropdown was closed.
    pub fn on_page_key(&mut self, key: NavKey) -> bool {
        if key != NavKey::Escape || !self.is_open() {
            return false;
        }
        self.dismiss();
        true
    }

    pub fn on_hover(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.highlighted = Some(index);
        }
    }

    /// Commit a suggestion into the field and close the dropdown.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let name = self.suggestions.get(index)?.name.clone();
        self.text = name.clone();
        self.listed_for = None;
        self.lookups.supersede();
        self.dismiss();
        Some(name)
    }

    /// Escape or a click outside the widget.
    pub fn dismiss(&mut self) {
        self.dropdown = Dropdown::Closed;
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::suggestion;

    fn session_with(names: &[&str]) -> SearchSession {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let lookup = session.on_input("RC").unwrap();
        let pending = session.begin_lookup(&lookup).unwrap();
        let list = names.iter().map(|n| suggestion(n, None, None)).collect();
        assert!(session.apply_lookup(&pending, Ok(list)));
        session
    }

    #[test]
    fn test_input_length_thresholds() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        assert_eq!(session.on_input(""), Some(Lookup::All));
        assert_eq!(session.on_input("   "), Some(Lookup::All));
        assert_eq!(session.on_input("R"), None);
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(
            session.on_input("  RCT "),
            Some(Lookup::Matching("RCT".to_string())),
            "Lookups use the trimmed text"
        );
        assert_eq!(session.text(), "  RCT ", "Field keeps the raw text");
    }

    #[test]
    fn test_single_multibyte_char_is_one_char() {
        let mut session = SearchSession::new();
        session.select_category("SST");
        assert_eq!(session.on_input("Ø"), None);
    }

    #[test]
    fn test_single_char_closes_open_dropdown() {
        let mut session = session_with(&["RCT 80", "RCT 90"]);
        assert!(session.is_open());
        assert_eq!(session.on_input("R"), None);
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(session.counter_text(), "");
    }

    #[test]
    fn test_no_lookup_without_category() {
        let mut session = SearchSession::new();
        let lookup = session.on_input("RC").unwrap();
        assert_eq!(session.begin_lookup(&lookup), None);
    }

    #[test]
    fn test_stale_lookup_is_dropped() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let a = session.begin_lookup(&Lookup::Matching("RC".into())).unwrap();
        let b = session.begin_lookup(&Lookup::Matching("RCT".into())).unwrap();

        assert!(session.apply_lookup(&b, Ok(vec![suggestion("RCT 80", None, None)])));
        let before = session.clone();
        assert!(!session.apply_lookup(&a, Ok(vec![suggestion("RC 1", None, None)])));
        assert_eq!(session, before, "Stale result must not change anything");
        assert_eq!(session.suggestions()[0].name, "RCT 80");
    }

    #[test]
    fn test_stale_failure_is_dropped_too() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let a = session.begin_lookup(&Lookup::All).unwrap();
        let b = session.begin_lookup(&Lookup::All).unwrap();
        assert!(session.apply_lookup(&b, Ok(vec![suggestion("RCT 80", None, None)])));
        assert!(!session.apply_lookup(&a, Err(FetchError::Transport("offline".into()))));
        assert_eq!(session.dropdown(), Dropdown::Open);
    }

    #[test]
    fn test_typing_supersedes_in_flight_lookup() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let a = session.begin_lookup(&Lookup::Matching("RC".into())).unwrap();
        session.on_input("R");
        assert!(!session.apply_lookup(&a, Ok(vec![suggestion("RCT 80", None, None)])));
        assert_eq!(session.dropdown(), Dropdown::Closed);
    }

    #[test]
    fn test_empty_result_for_query_opens_empty_state() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let lookup = session.on_input("ZZ").unwrap();
        let pending = session.begin_lookup(&lookup).unwrap();
        session.apply_lookup(&pending, Ok(vec![]));
        assert_eq!(session.dropdown(), Dropdown::Open);
        assert_eq!(session.counter_text(), "No models match your search");
        assert_eq!(session.counter_class(), "field-hint no-results");
    }

    #[test]
    fn test_empty_listing_stays_closed() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let lookup = session.on_input("").unwrap();
        let pending = session.begin_lookup(&lookup).unwrap();
        session.apply_lookup(&pending, Ok(vec![]));
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(session.counter_text(), "");
        assert_eq!(session.counter_class(), "field-hint");
    }

    #[test]
    fn test_failure_is_distinct_from_no_matches() {
        let mut session = SearchSession::new();
        session.select_category("RCT");
        let lookup = session.on_input("RC").unwrap();
        let pending = session.begin_lookup(&lookup).unwrap();
        session.apply_lookup(&pending, Err(FetchError::Decode("bad json".into())));
        assert_eq!(session.dropdown(), Dropdown::Failed);
        assert!(session.suggestions().is_empty());

        // Retyping recovers
        let lookup = session.on_input("RCT").unwrap();
        let pending = session.begin_lookup(&lookup).unwrap();
        session.apply_lookup(&pending, Ok(vec![suggestion("RCT 80", None, None)]));
        assert_eq!(session.dropdown(), Dropdown::Open);
    }

    #[test]
    fn test_arrow_keys_clamp_without_wrapping() {
        let mut session = session_with(&["A1", "A2", "A3"]);
        assert_eq!(session.highlighted(), None);
        session.on_key(NavKey::ArrowUp);
        assert_eq!(session.highlighted(), None);
        for _ in 0..5 {
            session.on_key(NavKey::ArrowDown);
        }
        assert_eq!(session.highlighted(), Some(2));
        session.on_key(NavKey::ArrowUp);
        assert_eq!(session.highlighted(), Some(1));
        session.on_key(NavKey::ArrowUp);
        session.on_key(NavKey::ArrowUp);
        assert_eq!(session.highlighted(), None);
    }

    #[test]
    fn test_enter_without_highlight_is_noop() {
        let mut session = session_with(&["A1", "A2"]);
        assert_eq!(session.on_key(NavKey::Enter), None);
        assert!(session.is_open(), "Enter with no highlight must not close");
        assert_eq!(session.text(), "RC");
    }

    #[test]
    fn test_enter_commits_highlighted() {
        let mut session = session_with(&["RCT 80", "RCT 90"]);
        session.on_key(NavKey::ArrowDown);
        session.on_key(NavKey::ArrowDown);
        assert_eq!(session.on_key(NavKey::Enter), Some("RCT 90".to_string()));
        assert_eq!(session.text(), "RCT 90");
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(session.highlighted(), None);
        assert_eq!(session.counter_text(), "", "Counter is blank once the hint expires");
    }

    #[test]
    fn test_hover_sets_highlight_without_closing() {
        let mut session = session_with(&["A1", "A2"]);
        session.on_hover(1);
        assert_eq!(session.highlighted(), Some(1));
        assert!(session.is_open());
        session.on_hover(7);
        assert_eq!(session.highlighted(), Some(1), "Out of range hover is ignored");
    }

    #[test]
    fn test_escape_closes_and_clears_highlight() {
        let mut session = session_with(&["A1", "A2"]);
        session.on_key(NavKey::ArrowDown);
        session.on_key(NavKey::Escape);
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(session.highlighted(), None);
    }

    #[test]
    fn test_escape_anywhere_on_page_closes() {
        let mut session = session_with(&["RCT 80", "RCT 90"]);
        session.on_key(NavKey::ArrowDown);
        assert!(!session.on_page_key(NavKey::ArrowDown), "Only Escape acts outside the field");
        assert!(!session.on_page_key(NavKey::Enter));
        assert!(session.is_open());

        assert!(session.on_page_key(NavKey::Escape));
        assert_eq!(session.dropdown(), Dropdown::Closed);
        assert_eq!(session.highlighted(), None);
        assert!(!session.on_page_key(NavKey::Escape), "Already closed");
    }

    #[test]
    fn test_focus_reopens_cached_suggestions() {
        let mut session = session_with(&["RCT 80"]);
        session.dismiss();
        assert_eq!(session.on_focus(), None, "Cached list needs no fetch");
        assert_eq!(session.dropdown(), Dropdown::Open);
    }

    #[test]
    fn test_focus_on_empty_field_relists() {
        let mut session = SearchSession::new();
        session.select_category("FM");
        assert_eq!(session.on_focus(), Some(Lookup::All));
    }

    #[test]
    fn test_focus_after_commit_does_not_reopen() {
        let mut session = session_with(&["RCT 80"]);
        session.select(0);
        assert_eq!(session.on_focus(), None);
        assert_eq!(session.dropdown(), Dropdown::Closed);
    }

    #[test]
    fn test_select_category_resets_session() {
        let mut session = session_with(&["RCT 80"]);
        let stale = session.begin_lookup(&Lookup::All).unwrap();
        session.select_category("SST");
        assert_eq!(session.category(), Some("SST"));
        assert_eq!(session.text(), "");
        assert!(session.suggestions().is_empty());
        assert!(!session.is_open());
        assert!(!session.apply_lookup(&stale, Ok(vec![suggestion("RCT 80", None, None)])));

        session.reset();
        assert_eq!(session.category(), None);
    }

    #[test]
    fn test_nav_key_mapping() {
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::ArrowDown));
        assert_eq!(NavKey::from_key("Escape"), Some(NavKey::Escape));
        assert_eq!(NavKey::from_key("Tab"), None);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Key(NavKey),
        Hover(usize),
    }

    fn action_strategy() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Key(NavKey::ArrowDown)),
            Just(Action::Key(NavKey::ArrowUp)),
            Just(Action::Key(NavKey::Enter)),
            (0usize..12).prop_map(Action::Hover),
        ]
    }

    proptest! {
        /// Property: the highlight is always none or a valid row
        #[test]
        fn prop_highlight_stays_in_bounds(
            count in 0usize..8,
            actions in prop::collection::vec(action_strategy(), 0..40),
        ) {
            let names: Vec<String> = (0..count).map(|i| format!("M{}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut session = session_with(&refs);
            for action in actions {
                match action {
                    Action::Key(k) => { session.on_key(k); }
                    Action::Hover(i) => session.on_hover(i),
                }
                if let Some(i) = session.highlighted() {
                    prop_assert!(i < session.suggestions().len());
                }
            }
        }
    }
}
