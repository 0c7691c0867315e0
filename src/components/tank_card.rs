use leptos::prelude::*;

use crate::search::classify::ResultCard;

#[component]
pub fn TankCard(card: ResultCard) -> impl IntoView {
    let lines = card.annotation.lines();
    let style = card
        .annotation
        .tone()
        .map(|tone| tone.style())
        .unwrap_or_default();

    view! {
        <div class="result-card">
            <div class="card-header">
                <div class="model-name">{card.model}</div>
            </div>
            <div class="specs-grid">
                <div class="spec-row">
                    <span class="spec-label">"Diameter"</span>
                    <span class="spec-value">{card.diameter}</span>
                </div>
                <div class="spec-row">
                    <span class="spec-label">"Height"</span>
                    <span class="spec-value">{card.height}</span>
                </div>
            </div>
            <div class="capacity-highlight">
                <div class="main-capacity">{card.capacity_kl}</div>
                <div class="secondary-capacity">{card.capacity}</div>
            </div>
            {(!lines.is_empty()).then(|| view! {
                <div class="match-info" style=style>
                    {lines.into_iter().map(|line| view! { <div>{line}</div> }).collect_view()}
                </div>
            })}
        </div>
    }
}
