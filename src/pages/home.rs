use leptos::prelude::*;

use crate::app::use_app;
use crate::components::category_card::CategoryCard;

/// Category picker. Landing here ends any previous selection.
#[component]
pub fn HomePage() -> impl IntoView {
    let app = use_app();

    Effect::new(move |_| {
        app.session.update(|s| s.reset());
    });

    let categories = app.config.with_value(|c| c.categories.clone());

    view! {
        <div class="page home-page">
            <div class="page-header">
                <h2>"Select a Tank Type"</h2>
                <p class="page-description">
                    "Choose a product line, then search by capacity, model or dimensions."
                </p>
            </div>
            <div class="card-grid">
                {categories
                    .into_iter()
                    .map(|category| view! { <CategoryCard category=category /> })
                    .collect_view()}
            </div>
        </div>
    }
}
