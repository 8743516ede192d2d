//! Book Form Component
//!
//! Add/edit dialog. Inputs are bound to the store's draft, so a failed save
//! leaves the user's unsaved input in place.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;
use crate::form::BookFormStateStoreFields;
use crate::store::{CatalogStateStoreFields, FormTarget};

/// Lowest year the year input accepts
const MIN_YEAR: u32 = 1000;

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

#[component]
pub fn BookForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let is_edit = move || store.with(|s| matches!(s.form, Some(FormTarget::Edit(_))));
    let saving = move || store.with(|s| s.in_flight.saving());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let sync = ctx.sync();
        spawn_local(async move {
            sync.submit().await;
        });
    };

    let close = move || store.update(|s| s.close_form());

    view! {
        <div class="dialog-overlay" on:click=move |_| close()>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2 class="dialog-title">
                    {move || if is_edit() { "Edit Book" } else { "Add New Book" }}
                </h2>

                <form class="book-form" on:submit=on_submit>
                    <div class="field">
                        <label for="title">"Title *"</label>
                        <input
                            id="title"
                            placeholder="Enter book title"
                            required
                            prop:value=move || store.draft().title().get()
                            on:input=move |ev| store.draft().title().set(event_target_value(&ev))
                        />
                    </div>

                    <div class="field">
                        <label for="author">"Author *"</label>
                        <input
                            id="author"
                            placeholder="Enter author name"
                            required
                            prop:value=move || store.draft().author().get()
                            on:input=move |ev| store.draft().author().set(event_target_value(&ev))
                        />
                    </div>

                    <div class="field-row">
                        <div class="field">
                            <label for="publishedYear">"Published Year"</label>
                            <input
                                id="publishedYear"
                                type="number"
                                placeholder="2024"
                                min=MIN_YEAR.to_string()
                                max=current_year().to_string()
                                prop:value=move || store.draft().published_year().get()
                                on:input=move |ev| store.draft().published_year().set(event_target_value(&ev))
                            />
                        </div>

                        <div class="field">
                            <label for="genre">"Genre"</label>
                            <input
                                id="genre"
                                placeholder="Fiction, Science, etc."
                                prop:value=move || store.draft().genre().get()
                                on:input=move |ev| store.draft().genre().set(event_target_value(&ev))
                            />
                        </div>
                    </div>

                    <label class="toggle-row">
                        <span>
                            <span class="toggle-label">"Available"</span>
                            <span class="hint">"Is this book available for borrowing?"</span>
                        </span>
                        <input
                            id="available"
                            type="checkbox"
                            prop:checked=move || store.draft().available().get()
                            on:change=move |ev| store.draft().available().set(event_target_checked(&ev))
                        />
                    </label>

                    {move || store.with(|s| s.form_error.clone()).map(|msg| view! {
                        <p class="form-error">{msg}</p>
                    })}

                    <div class="form-actions">
                        <button type="button" class="cancel-btn" disabled=saving on:click=move |_| close()>
                            "Cancel"
                        </button>
                        <button type="submit" class="submit-btn" disabled=saving>
                            {move || {
                                if saving() {
                                    "Saving..."
                                } else if is_edit() {
                                    "Update Book"
                                } else {
                                    "Add Book"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
