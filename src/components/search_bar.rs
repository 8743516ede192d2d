//! Search Bar Component

use leptos::prelude::*;

use crate::store::{use_app_store, CatalogStateStoreFields};

/// Live search input bound to the store's query
#[component]
pub fn SearchBar() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="search-bar">
            <span class="search-icon">"🔍"</span>
            <input
                type="search"
                placeholder="Search by title, author, or genre..."
                prop:value=move || store.query().get()
                on:input=move |ev| store.query().set(event_target_value(&ev))
            />
        </div>
    }
}
