use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::pages::home::HomePage;
use crate::pages::tank_search::TankSearchPage;
use crate::search::SearchSession;

/// Shared handles for every page. The session lives here so that it is
/// created once and only ever reset, never recreated.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    pub client: StoredValue<ApiClient>,
    pub session: RwSignal<SearchSession>,
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let client = ApiClient::new(config.api_base.clone());
    provide_context(AppContext {
        config: StoredValue::new(config),
        client: StoredValue::new(client),
        session: RwSignal::new(SearchSession::new()),
    });

    view! {
        <Router>
            <style>{include_str!("app.css")}</style>
            <div class="app-layout">
                <header class="app-header">
                    <a href="/" class="app-title">"TankMate"</a>
                    <p class="app-subtitle">"Find the right tank by capacity, model or dimensions"</p>
                </header>
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/search/:category") view=TankSearchPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
