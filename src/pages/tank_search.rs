use std::time::Duration;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use tracing::info;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::components::model_autocomplete::ModelAutocomplete;
use crate::components::notification::Notification;
use crate::components::results_panel::ResultsPanel;
use crate::search::{LatestWins, SearchForm, SearchRequest, SearchTracker, VolumePreview};

#[component]
pub fn TankSearchPage() -> impl IntoView {
    let app = use_app();
    let params = use_params_map();
    let notification_ms = app.config.with_value(|c| c.notification_ms);

    let category = Memo::new(move |_| {
        let code = params.with(|p| p.get("category")).unwrap_or_default();
        app.config.with_value(|c| c.category(&code).cloned())
    });

    let (capacity, set_capacity) = signal(String::new());
    let (diameter, set_diameter) = signal(String::new());
    let (height, set_height) = signal(String::new());
    let (preview, set_preview) = signal(None::<VolumePreview>);
    let results = RwSignal::new(SearchTracker::default());
    let (notice, set_notice) = signal(None::<String>);

    let notices = StoredValue::new(LatestWins::default());

    // New category: fresh session, empty form, no stale results
    Effect::new(move |_| {
        let Some(selected) = category.get() else {
            app.session.update(|s| s.reset());
            return;
        };
        info!("Selected tank type {}", selected.code);
        app.session.update(|s| s.select_category(&selected.code));
        set_capacity.set(String::new());
        set_diameter.set(String::new());
        set_height.set(String::new());
        set_preview.set(None);
        results.update(|r| r.clear());
    });

    let notify = move |message: String| {
        let mut ticket = 0;
        notices.update_value(|t| ticket = t.issue());
        set_notice.set(Some(message));
        set_timeout(
            move || {
                if notices.with_value(|t| t.is_current(ticket)) {
                    set_notice.set(None);
                }
            },
            Duration::from_millis(u64::from(notification_ms)),
        );
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        app.session.update(|s| s.dismiss());

        let form = SearchForm {
            capacity: capacity.get_untracked(),
            model: app.session.with_untracked(|s| s.text().to_string()),
            diameter: diameter.get_untracked(),
            height: height.get_untracked(),
        };
        let selected = app.session.with_untracked(|s| s.category().map(str::to_string));
        let request = match SearchRequest::build(selected.as_deref(), &form) {
            Ok(request) => request,
            Err(e) => {
                notify(e.to_string());
                return;
            }
        };

        set_preview.set(VolumePreview::from_form(&form));

        let Some(ticket) = results.try_update(|r| r.begin()) else {
            return;
        };

        let client = app.client.get_value();
        spawn_local(async move {
            let result = client.search(&request).await;
            results.maybe_update(|r| r.finish(ticket, result));
        });
    };

    view! {
        <div class="page search-page">
            {move || match category.get() {
                None => view! {
                    <div class="empty-state">
                        <h3>"Unknown tank type"</h3>
                        <a href="/" class="btn btn-secondary">"Choose a tank type"</a>
                    </div>
                }.into_any(),
                Some(selected) => view! {
                    <div class="page-header search-header">
                        <h2>{selected.title()}</h2>
                        <a href="/" class="btn btn-secondary">"Change tank type"</a>
                    </div>

                    <form class="search-form card" on:submit=on_submit>
                        <div class="form-group">
                            <label for="capacityInput">"Capacity (KL)"</label>
                            <input
                                type="number"
                                step="any"
                                id="capacityInput"
                                class="input"
                                placeholder="e.g., 100"
                                prop:value=move || capacity.get()
                                on:input=move |ev| set_capacity.set(event_target_value(&ev))
                            />
                        </div>

                        <ModelAutocomplete placeholder=selected.placeholder.clone() />

                        <div class="form-row">
                            <div class="form-group">
                                <label for="diameterInput">"Diameter (m)"</label>
                                <input
                                    type="number"
                                    step="any"
                                    id="diameterInput"
                                    class="input"
                                    prop:value=move || diameter.get()
                                    on:input=move |ev| set_diameter.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-group">
                                <label for="heightInput">"Height (m)"</label>
                                <input
                                    type="number"
                                    step="any"
                                    id="heightInput"
                                    class="input"
                                    prop:value=move || height.get()
                                    on:input=move |ev| set_height.set(event_target_value(&ev))
                                />
                            </div>
                        </div>

                        <button type="submit" class="btn btn-primary">"Search"</button>
                    </form>

                    {move || preview.get().map(|volume| view! {
                        <div class="volume-info">
                            <h4>"Calculated Volume"</h4>
                            <p>
                                <strong>{volume.summary()}</strong>
                                " "
                                {volume.basis()}
                            </p>
                        </div>
                    })}

                    <ResultsPanel state=Signal::derive(move || results.with(|r| r.state().clone())) />
                }.into_any(),
            }}

            <Notification message=notice />
        </div>
    }
}
