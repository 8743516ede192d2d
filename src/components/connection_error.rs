//! Connection Error Page
//!
//! Full-page state shown when the catalog listing could not be loaded.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn ConnectionError() -> impl IntoView {
    let ctx = use_app_context();
    let origin = ctx.server_origin.get_value();

    let retry = move |_| {
        let sync = ctx.sync();
        spawn_local(async move {
            sync.load().await;
        });
    };

    view! {
        <div class="connection-error">
            <span class="error-icon">"📚"</span>
            <h2>"Connection Error"</h2>
            <p>
                "Unable to connect to the backend server. Please make sure your API is running on "
                {origin}
            </p>
            <button class="retry-btn" on:click=retry>"Retry"</button>
        </div>
    }
}
