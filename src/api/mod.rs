//! HTTP access to the catalog service: the suggestion lookup and the search.
//!
//! Bodies are read as text and decoded with `serde_json`, so decoding is the
//! same in the browser and in native tests.

pub mod types;

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub use types::{SearchInfo, SearchResponse, Suggestion, TankResult};

use crate::error::FetchError;
use crate::search::request::SearchRequest;
use types::{ErrorBody, ModelsResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    /// `base` is prepended to every endpoint path; empty means same origin.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Suggestion lookup URL. An empty query lists the whole category.
    pub fn models_url(&self, category: &str, query: &str) -> String {
        let mut url = format!(
            "{}/api/models/?tank_type={}",
            self.base,
            urlencoding::encode(category)
        );
        if !query.is_empty() {
            url.push_str("&q=");
            url.push_str(&urlencoding::encode(query));
        }
        url
    }

    pub fn search_url(&self, request: &SearchRequest) -> String {
        format!("{}/api/search/?{}", self.base, request.to_query_string())
    }

    pub async fn fetch_suggestions(
        &self,
        category: &str,
        query: &str,
    ) -> Result<Vec<Suggestion>, FetchError> {
        let url = self.models_url(category, query);
        info!("Looking up models: {}", url);
        let (status, body) = get_text(&url).await.inspect_err(|e| {
            warn!("Model lookup failed: {}", e);
        })?;
        decode_suggestions(status, &body).inspect_err(|e| {
            warn!("Model lookup failed: {}", e);
        })
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, FetchError> {
        let url = self.search_url(request);
        info!("Searching tanks: {}", url);
        let (status, body) = get_text(&url).await.inspect_err(|e| {
            warn!("Search failed: {}", e);
        })?;
        decode_search(status, &body).inspect_err(|e| {
            warn!("Search failed: {}", e);
        })
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, body: &str, fallback: &str) -> FetchError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| fallback.to_string());
    FetchError::Rejected { status, message }
}

/// Decode a suggestion lookup body. A missing `models` field means no matches.
pub fn decode_suggestions(status: u16, body: &str) -> Result<Vec<Suggestion>, FetchError> {
    if !is_success(status) {
        return Err(rejection(status, body, "Failed to load models"));
    }
    let parsed: ModelsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(parsed.models.unwrap_or_default())
}

/// Decode a search body. Non-success statuses carry the server's `error` text
/// when it sent one.
pub fn decode_search(status: u16, body: &str) -> Result<SearchResponse, FetchError> {
    if !is_success(status) {
        return Err(rejection(status, body, "Search failed"));
    }
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

async fn get_text(url: &str) -> Result<(u16, String), FetchError> {
    let window = web_sys::window()
        .ok_or_else(|| FetchError::Transport("No browser window available".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| FetchError::Transport(js_message(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| FetchError::Decode("fetch did not resolve to a Response".to_string()))?;

    let text = response
        .text()
        .map_err(|e| FetchError::Decode(js_message(&e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| FetchError::Transport(js_message(&e)))?;

    Ok((response.status(), body.as_string().unwrap_or_default()))
}

fn js_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "Unknown error".to_string())
}
