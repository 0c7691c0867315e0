use leptos::prelude::*;

use crate::components::tank_card::TankCard;
use crate::search::{ResultsView, SearchState};

/// Result area below the search form.
#[component]
pub fn ResultsPanel(#[prop(into)] state: Signal<SearchState>) -> impl IntoView {
    view! {
        {move || match state.with(ResultsView::from_state) {
            ResultsView::Hidden => view! { <div style="display:none"></div> }.into_any(),
            ResultsView::Loading => view! {
                <section class="results-section">
                    <div class="loading">
                        <div class="loading-spinner"></div>
                        <p>"Searching tanks..."</p>
                    </div>
                </section>
            }.into_any(),
            ResultsView::NoResults => view! {
                <section class="results-section">
                    <div class="empty-state">
                        <h3>"No matching tanks found"</h3>
                        <p>"Try adjusting your search parameters"</p>
                    </div>
                </section>
            }.into_any(),
            ResultsView::Error(message) => view! {
                <section class="results-section">
                    <div class="empty-state error">
                        <h3>"Error"</h3>
                        <p>{message}</p>
                    </div>
                </section>
            }.into_any(),
            ResultsView::Results { header, summary, cards } => view! {
                <section class="results-section">
                    <div class="results-header">
                        <h3>{header}</h3>
                        <p class="results-count">{summary}</p>
                    </div>
                    <div class="results-grid">
                        {cards.into_iter().map(|card| view! { <TankCard card=card /> }).collect_view()}
                    </div>
                </section>
            }.into_any(),
        }}
    }
}
