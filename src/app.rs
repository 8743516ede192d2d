//! Library Catalog App
//!
//! Catalog page: header, search, stats, table, and the add/edit and
//! delete dialogs. Owns the catalog store.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use catalog_client::Book;

use crate::components::{
    BookForm, BookTable, ConnectionError, DeleteDialog, SearchBar, StatsCards, ToastStack,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{CatalogState, Snapshot};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();
    let store = Store::new(CatalogState::new());
    let ctx = AppContext::new(store, &config);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Load catalog on mount
    Effect::new(move |_| {
        let sync = ctx.sync();
        spawn_local(async move {
            sync.load().await;
        });
    });

    let errored = move || store.with(|s| matches!(s.snapshot, Snapshot::Errored(_)));
    let loading = move || store.with(|s| s.snapshot.is_loading());
    let form_open = move || store.with(|s| s.form.is_some());
    let delete_pending = move || store.with(|s| s.pending_delete.is_some());

    let visible_books = Signal::derive(move || store.with(|s| s.visible_books()));
    let on_edit = Callback::new(move |book: Book| store.update(|s| s.open_edit(book)));
    let on_delete = Callback::new(move |id: String| store.update(|s| s.request_delete(id)));

    view! {
        <Show when=move || !errored() fallback=|| view! { <ConnectionError /> }>
            <div class="app-layout">
                <header class="app-header">
                    <div class="brand">
                        <span class="brand-icon">"📚"</span>
                        <div>
                            <h1>"Library Manager"</h1>
                            <p class="subtitle">"Manage your book collection"</p>
                        </div>
                    </div>
                    <button class="add-btn" on:click=move |_| store.update(|s| s.open_create())>
                        "+ Add Book"
                    </button>
                </header>

                <main class="main-content">
                    <SearchBar />
                    <StatsCards />
                    <Show when=move || !loading() fallback=|| view! { <div class="loading">"Loading..."</div> }>
                        <BookTable books=visible_books on_edit=on_edit on_delete=on_delete />
                    </Show>
                </main>

                <Show when=form_open>
                    <BookForm />
                </Show>
                <Show when=delete_pending>
                    <DeleteDialog />
                </Show>
            </div>
        </Show>
        <ToastStack />
    }
}
