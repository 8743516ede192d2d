//! Toast Notifications
//!
//! Renders the store's notifications; each dismisses itself after a timeout.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::store::{Notification, NotificationKind};

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let duration_ms = ctx.toast_duration_ms;

    view! {
        <div class="toast-stack">
            <For
                each=move || store.with(|s| s.notifications.clone())
                key=|note| note.id
                children=move |note| view! { <Toast note=note duration_ms=duration_ms /> }
            />
        </div>
    }
}

#[component]
fn Toast(note: Notification, duration_ms: u32) -> impl IntoView {
    let store = use_app_context().store;
    let id = note.id;

    spawn_local(async move {
        TimeoutFuture::new(duration_ms).await;
        store.update(|s| s.dismiss_notification(id));
    });

    let class = match note.kind {
        NotificationKind::Success => "toast success",
        NotificationKind::Error => "toast error",
    };

    view! {
        <div class=class role="status">
            <div class="toast-body">
                <p class="toast-title">{note.title}</p>
                <p class="toast-message">{note.message}</p>
            </div>
            <button class="toast-close" on:click=move |_| store.update(|s| s.dismiss_notification(id))>
                "✕"
            </button>
        </div>
    }
}
