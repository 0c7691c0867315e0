//! Turns a search response into headers and per-card match annotations.

use tracing::debug;

use super::render::plural;
use super::ticket::{LatestWins, RequestId};
use crate::api::{SearchInfo, SearchResponse, TankResult};
use crate::error::FetchError;

pub const EXACT_MATCH_LABEL: &str = "Exact Match";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Exact,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl BadgeTone {
    pub fn for_label(label: &str) -> Self {
        if label == EXACT_MATCH_LABEL {
            BadgeTone::Exact
        } else {
            BadgeTone::Other
        }
    }

    pub fn colors(self) -> BadgeColors {
        match self {
            BadgeTone::Exact => BadgeColors {
                background: "#D1FAE5",
                border: "#10B981",
                text: "#065F46",
            },
            BadgeTone::Other => BadgeColors {
                background: "#FEF3C7",
                border: "#F59E0B",
                text: "#78350F",
            },
        }
    }

    /// Inline style for the badge element.
    pub fn style(self) -> String {
        let c = self.colors();
        format!(
            "background: {}; border-left-color: {}; color: {};",
            c.background, c.border, c.text
        )
    }
}

/// How a result card describes its closeness to the search.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchAnnotation {
    Badge {
        label: String,
        tone: BadgeTone,
        difference: Option<f64>,
    },
    Difference(f64),
    Approximate {
        diameter_diff: Option<f64>,
        height_diff: Option<f64>,
    },
    None,
}

fn diff_text(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

impl MatchAnnotation {
    /// First rule that applies wins: label, then bare difference, then approximate.
    pub fn classify(result: &TankResult) -> Self {
        if let Some(label) = &result.match_label {
            return MatchAnnotation::Badge {
                label: label.clone(),
                tone: BadgeTone::for_label(label),
                difference: result.match_difference,
            };
        }
        if let Some(diff) = result.match_difference {
            return MatchAnnotation::Difference(diff);
        }
        if result.match_type.as_deref() == Some("approximate") {
            return MatchAnnotation::Approximate {
                diameter_diff: result.diameter_diff,
                height_diff: result.height_diff,
            };
        }
        MatchAnnotation::None
    }

    /// Rendered text, one entry per line. Empty for `None`.
    pub fn lines(&self) -> Vec<String> {
        match self {
            MatchAnnotation::Badge {
                label, difference, ..
            } => match difference {
                Some(d) => vec![format!("{} (Δ {} KL)", label, d)],
                None => vec![label.clone()],
            },
            MatchAnnotation::Difference(d) => vec![format!("Match difference: {} KL", d)],
            MatchAnnotation::Approximate {
                diameter_diff,
                height_diff,
            } => vec![
                "Approximate match".to_string(),
                format!(
                    "Diameter: ±{}m / Height: ±{}m",
                    diff_text(*diameter_diff),
                    diff_text(*height_diff)
                ),
            ],
            MatchAnnotation::None => Vec::new(),
        }
    }

    pub fn tone(&self) -> Option<BadgeTone> {
        match self {
            MatchAnnotation::Badge { tone, .. } => Some(*tone),
            _ => None,
        }
    }
}

/// Whole kilolitres, halves rounded away from zero.
fn whole_kl(value: f64) -> String {
    format!("{}", value.round())
}

/// Header sentence chosen by the kind of search the server ran.
pub fn header(response: &SearchResponse) -> String {
    let count = response.count();
    match &response.search_info {
        Some(SearchInfo::Capacity {
            capacity_kl,
            lower_bound,
            upper_bound,
        }) => {
            let mut text = format!(
                "Found {} {} for {} KL",
                count,
                plural(count, "tank", "tanks"),
                capacity_kl
            );
            if let Some(lower) = lower_bound {
                let upper = upper_bound.map_or_else(|| "?".to_string(), whole_kl);
                text.push_str(&format!(" (Range: {} - {} KL)", whole_kl(*lower), upper));
            }
            text
        }
        Some(SearchInfo::Model { query }) => format!("Results for model: {}", query),
        Some(SearchInfo::Dimensions {
            diameter, height, ..
        }) => format!(
            "{} approximate {} for {}m × {}m",
            count,
            plural(count, "match", "matches"),
            diameter,
            height
        ),
        Some(SearchInfo::Diameter { diameter }) => format!(
            "{} {} with diameter ≈ {}m",
            count,
            plural(count, "tank", "tanks"),
            diameter
        ),
        Some(SearchInfo::Height { height }) => format!(
            "{} {} with height ≈ {}m",
            count,
            plural(count, "tank", "tanks"),
            height
        ),
        Some(SearchInfo::Unknown) | None => String::new(),
    }
}

pub fn summary_line(count: usize) -> String {
    format!("{} {} found", count, plural(count, "result", "results"))
}

/// One result card, ready for markup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub model: String,
    pub diameter: String,
    pub height: String,
    pub capacity_kl: String,
    pub capacity: String,
    pub annotation: MatchAnnotation,
}

impl ResultCard {
    pub fn from_result(result: &TankResult) -> Self {
        Self {
            model: result.model.clone(),
            diameter: format!("{} m", result.diameter),
            height: format!("{} m", result.height),
            capacity_kl: result.capacity_kl_display.clone(),
            capacity: result.capacity_display.clone(),
            annotation: MatchAnnotation::classify(result),
        }
    }
}

/// Lifecycle of the result area.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Done(SearchResponse),
    Failed(String),
}

impl SearchState {
    pub fn from_result(result: Result<SearchResponse, FetchError>) -> Self {
        match result {
            Ok(response) => SearchState::Done(response),
            Err(e) => SearchState::Failed(e.user_message()),
        }
    }
}

/// Result area state for overlapping submissions: the latest submitted
/// search wins and anything it superseded is dropped on arrival.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTracker {
    state: SearchState,
    searches: LatestWins,
}

impl SearchTracker {
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a search and show the loading state. Hand the id back to [`Self::finish`].
    pub fn begin(&mut self) -> RequestId {
        self.state = SearchState::Loading;
        self.searches.issue()
    }

    /// Apply a finished search. Returns `false`, changing nothing, if a newer
    /// search was started or the area cleared since `id` was issued.
    pub fn finish(&mut self, id: RequestId, result: Result<SearchResponse, FetchError>) -> bool {
        if !self.searches.is_current(id) {
            debug!("Dropping superseded search {} (current {})", id, self.searches.current());
            return false;
        }
        self.state = SearchState::from_result(result);
        true
    }

    /// Back to idle. Searches still in flight become stale.
    pub fn clear(&mut self) {
        self.searches.supersede();
        self.state = SearchState::Idle;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Hidden,
    Loading,
    /// The search succeeded but matched nothing.
    NoResults,
    Error(String),
    Results {
        header: String,
        summary: String,
        cards: Vec<ResultCard>,
    },
}

impl ResultsView {
    pub fn from_state(state: &SearchState) -> Self {
        match state {
            SearchState::Idle => ResultsView::Hidden,
            SearchState::Loading => ResultsView::Loading,
            SearchState::Failed(message) => ResultsView::Error(message.clone()),
            SearchState::Done(response) if response.results.is_empty() => ResultsView::NoResults,
            SearchState::Done(response) => ResultsView::Results {
                header: header(response),
                summary: summary_line(response.count()),
                cards: response.results.iter().map(ResultCard::from_result).collect(),
            },
        }
    }
}
