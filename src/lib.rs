use leptos::prelude::*;

pub mod api;
mod app;
mod components;
pub mod config;
pub mod error;
mod logging;
mod pages;
pub mod search;
pub mod testing;

use app::App;
use config::AppConfig;

/// Load configuration, install logging and mount the UI on `<body>`.
pub fn run() {
    let config = AppConfig::embedded();
    logging::init(&config.log_level);
    tracing::info!(
        "TankMate initialized with {} categories",
        config.categories.len()
    );

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
