use leptos::prelude::*;

/// Transient message shown over the page; hidden while `message` is `None`.
#[component]
pub fn Notification(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|text| view! {
            <div class="notification notification-error" role="alert">{text}</div>
        })}
    }
}
