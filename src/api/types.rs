use serde::Deserialize;

// -- Suggestion lookup --

/// One candidate model offered by the autocomplete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "model")]
    pub name: String,
    #[serde(default)]
    pub diameter: Option<f64>,
    #[serde(default, rename = "capacity_count")]
    pub variant_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    #[serde(default)]
    pub models: Option<Vec<Suggestion>>,
}

// -- Search --

/// Describes which kind of search the server ran, plus its echo of the inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "search_type", rename_all = "lowercase")]
pub enum SearchInfo {
    Capacity {
        capacity_kl: f64,
        #[serde(default)]
        lower_bound: Option<f64>,
        #[serde(default)]
        upper_bound: Option<f64>,
    },
    Model {
        query: String,
    },
    Dimensions {
        diameter: f64,
        height: f64,
        #[serde(default)]
        calculated_volume: Option<f64>,
    },
    Diameter {
        diameter: f64,
    },
    Height {
        height: f64,
    },
    #[serde(other)]
    Unknown,
}

/// A single tank/height combination returned by a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TankResult {
    #[serde(default)]
    pub tank_type: String,
    #[serde(default)]
    pub tank_type_name: String,
    pub model: String,
    #[serde(default)]
    pub base_model: String,
    pub diameter: f64,
    pub height: f64,
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub capacity_kl: f64,
    #[serde(default)]
    pub capacity_display: String,
    #[serde(default)]
    pub capacity_kl_display: String,
    #[serde(default)]
    pub capacity_unit: String,

    // Match annotations, present depending on search type
    #[serde(default)]
    pub match_label: Option<String>,
    #[serde(default)]
    pub match_difference: Option<f64>,
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub diameter_diff: Option<f64>,
    #[serde(default)]
    pub height_diff: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TankResult>,
    #[serde(default)]
    pub search_info: Option<SearchInfo>,
    #[serde(default)]
    pub count: Option<usize>,
}

impl SearchResponse {
    /// Result count as reported by the server, falling back to the list length.
    pub fn count(&self) -> usize {
        self.count.unwrap_or(self.results.len())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
