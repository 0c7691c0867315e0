use leptos::prelude::*;

use crate::config::Category;

/// Link tile for one tank category on the picker.
#[component]
pub fn CategoryCard(category: Category) -> impl IntoView {
    let href = format!("/search/{}", category.code);

    view! {
        <a class="card category-card" href=href>
            <span class="category-short">{category.short}</span>
            <h3>{category.name}</h3>
            <p class="category-description">{category.description}</p>
            <div class="category-meta">
                <span>{category.capacity_range}</span>
                <span class="category-unit">{category.unit}</span>
            </div>
        </a>
    }
}
