use std::time::Duration;

use leptos::either::Either;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::app::use_app;
use crate::search::render::{empty_message, Segment};
use crate::search::{Debouncer, DropdownView, LatestWins, Lookup, NavKey, WindowScheduler};

fn title_view(segments: Vec<Segment>) -> impl IntoView {
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Either::Left(text),
            Segment::Mark(text) => Either::Right(view! { <mark>{text}</mark> }),
        })
        .collect_view()
}

/// Model field with debounced server-side suggestions.
///
/// All state lives in the shared [`crate::search::SearchSession`]; this
/// component only wires DOM events, the debounce timer and the fetches.
#[component]
pub fn ModelAutocomplete(#[prop(into)] placeholder: String) -> impl IntoView {
    let app = use_app();
    let session = app.session;
    let (delay_ms, hint_ms) = app
        .config
        .with_value(|c| (c.debounce_ms, c.selection_hint_ms));

    let debouncer = StoredValue::new(Debouncer::new(WindowScheduler, delay_ms));
    let hints = StoredValue::new(LatestWins::default());
    let (selected_hint, set_selected_hint) = signal(None::<String>);

    let run_lookup = move |lookup: Lookup| {
        let Some(pending) = session.try_update(|s| s.begin_lookup(&lookup)).flatten() else {
            return;
        };
        let client = app.client.get_value();
        spawn_local(async move {
            let result = client
                .fetch_suggestions(&pending.category, pending.lookup.query())
                .await;
            session.maybe_update(|s| s.apply_lookup(&pending, result));
        });
    };

    let schedule = move |lookup: Lookup| {
        debouncer.update_value(|d| d.schedule(move || run_lookup(lookup)));
    };

    let commit = move |name: String| {
        debouncer.update_value(|d| d.cancel());
        let mut ticket = 0;
        hints.update_value(|h| ticket = h.issue());
        set_selected_hint.set(Some(format!("✓ {} selected", name)));
        set_timeout(
            move || {
                if hints.with_value(|h| h.is_current(ticket)) {
                    set_selected_hint.set(None);
                }
            },
            Duration::from_millis(u64::from(hint_ms)),
        );
    };

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        hints.update_value(|h| h.supersede());
        set_selected_hint.set(None);
        match session.try_update(|s| s.on_input(&value)).flatten() {
            Some(lookup) => schedule(lookup),
            None => debouncer.update_value(|d| d.cancel()),
        }
    };

    let on_focus = move |_: leptos::ev::FocusEvent| {
        if let Some(lookup) = session.try_update(|s| s.on_focus()).flatten() {
            schedule(lookup);
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        let Some(key) = NavKey::from_key(&ev.key()) else {
            return;
        };
        // Closed dropdown: let Enter submit the form
        if !session.with_untracked(|s| s.is_open()) {
            return;
        }
        ev.prevent_default();
        if let Some(name) = session.try_update(|s| s.on_key(key)).flatten() {
            commit(name);
        }
    };

    // Close dropdown when clicking outside
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let outside_click = window_event_listener(leptos::ev::mousedown, move |ev| {
        if !session.with_untracked(|s| s.is_open()) {
            return;
        }
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|node| container.contains(Some(&node)));
        if !inside {
            session.update(|s| s.dismiss());
        }
    });

    // Escape closes the dropdown wherever focus is
    let escape_key = window_event_listener(leptos::ev::keydown, move |ev| {
        let Some(key) = NavKey::from_key(&ev.key()) else {
            return;
        };
        if session.with_untracked(|s| s.is_open()) {
            session.maybe_update(|s| s.on_page_key(key));
        }
    });

    on_cleanup(move || {
        outside_click.remove();
        escape_key.remove();
        debouncer.update_value(|d| d.cancel());
    });

    let counter_text = move || {
        selected_hint
            .get()
            .unwrap_or_else(|| session.with(|s| s.counter_text()))
    };
    let counter_class = move || {
        if selected_hint.with(Option::is_some) {
            "field-hint selected"
        } else {
            session.with(|s| s.counter_class())
        }
    };

    view! {
        <div class="form-group autocomplete" node_ref=container_ref>
            <label for="modelInput">"Model"</label>
            <input
                type="text"
                id="modelInput"
                class="input"
                autocomplete="off"
                placeholder=placeholder
                prop:value=move || session.with(|s| s.text().to_string())
                on:input=on_input
                on:focus=on_focus
                on:keydown=on_keydown
            />

            {move || match session.with(DropdownView::from_session) {
                DropdownView::Hidden => view! { <div style="display:none"></div> }.into_any(),
                DropdownView::Rows(rows) => {
                    let items = rows
                        .into_iter()
                        .enumerate()
                        .map(|(i, row)| {
                            let class = if row.highlighted {
                                "autocomplete-item selected"
                            } else {
                                "autocomplete-item"
                            };
                            view! {
                                <div
                                    class=class
                                    on:mouseenter=move |_| session.update(|s| s.on_hover(i))
                                    on:mousedown=move |ev: leptos::ev::MouseEvent| {
                                        // Keep focus on the input
                                        ev.prevent_default();
                                        if let Some(name) = session.try_update(|s| s.select(i)).flatten() {
                                            commit(name);
                                        }
                                    }
                                >
                                    <div class="autocomplete-item-title">{title_view(row.title)}</div>
                                    {row.meta.map(|meta| view! {
                                        <div class="autocomplete-item-meta">{meta}</div>
                                    })}
                                </div>
                            }
                        })
                        .collect_view();
                    view! { <div class="autocomplete-dropdown">{items}</div> }.into_any()
                }
                DropdownView::Empty { query } => view! {
                    <div class="autocomplete-dropdown">
                        <div class="autocomplete-empty">
                            <p>{empty_message(&query)}</p>
                            <small>"Try a different search term"</small>
                        </div>
                    </div>
                }.into_any(),
                DropdownView::Failed => view! {
                    <div class="autocomplete-dropdown">
                        <div class="autocomplete-empty error">
                            <p>"Failed to load models"</p>
                            <small>"Please try again"</small>
                        </div>
                    </div>
                }.into_any(),
            }}

            <div class=counter_class>{counter_text}</div>
        </div>
    }
}
