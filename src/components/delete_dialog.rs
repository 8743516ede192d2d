//! Delete Confirmation Dialog
//!
//! Shown while a delete is pending. Stays open until the request resolves.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn DeleteDialog() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let deleting = move || store.with(|s| s.in_flight.delete);

    let confirm = move |_| {
        let sync = ctx.sync();
        spawn_local(async move {
            sync.confirm_delete().await;
        });
    };

    view! {
        <div class="dialog-overlay">
            <div class="dialog alert" role="alertdialog">
                <h2 class="dialog-title">"Delete Book?"</h2>
                <p class="dialog-description">
                    "This action cannot be undone. This will permanently delete the book from the library."
                </p>
                <div class="form-actions">
                    <button
                        class="cancel-btn"
                        disabled=deleting
                        on:click=move |_| store.update(|s| s.cancel_delete())
                    >
                        "Cancel"
                    </button>
                    <button class="confirm-btn danger" disabled=deleting on:click=confirm>
                        {move || if deleting() { "Deleting..." } else { "Delete" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
