//! Stats Cards Component
//!
//! Total / available / borrowed counts over the whole catalog.

use leptos::prelude::*;

use crate::store::use_app_store;

#[component]
pub fn StatsCards() -> impl IntoView {
    let store = use_app_store();
    let summary = move || store.with(|s| s.summary());

    view! {
        <div class="stats-grid">
            <div class="stat-card">
                <p class="stat-label">"Total Books"</p>
                <p class="stat-value total">{move || summary().total}</p>
            </div>
            <div class="stat-card">
                <p class="stat-label">"Available"</p>
                <p class="stat-value available">{move || summary().available}</p>
            </div>
            <div class="stat-card">
                <p class="stat-label">"Borrowed"</p>
                <p class="stat-value borrowed">{move || summary().borrowed}</p>
            </div>
        </div>
    }
}
