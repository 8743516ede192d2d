//! Catalog Synchronization
//!
//! Runs the catalog's network operations and feeds their outcomes into
//! `CatalogState`. Consistency model: invalidate-and-refetch. A mutation
//! never patches the cached list; on success the whole catalog is listed
//! again, strictly after the success transition has been applied.

use gloo_timers::future::TimeoutFuture;
use log::{info, warn};

use leptos::prelude::*;

use catalog_client::{Book, CatalogApi, CatalogResult};

use crate::store::{AppStore, CatalogState, FormTarget, MutationKind};

/// Somewhere `CatalogState` lives: the reactive store in the app, a plain cell in tests
pub trait StateCell {
    fn inspect<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R;
    fn modify<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R;
}

impl StateCell for AppStore {
    fn inspect<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        self.with_untracked(f)
    }

    fn modify<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}

/// How often a failed listing is resubmitted before the snapshot errors out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Delay before the first retry; doubles per attempt
    pub base_delay_ms: u32,
}

const MAX_RETRY_DELAY_MS: u32 = 30_000;

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> u32 {
        self.base_delay_ms
            .saturating_mul(1u32 << attempt.min(15))
            .min(MAX_RETRY_DELAY_MS)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            base_delay_ms: 1_000,
        }
    }
}

#[derive(Clone)]
pub struct CatalogSync<A, S> {
    api: A,
    state: S,
    retry: RetryPolicy,
}

impl<A: CatalogApi, S: StateCell> CatalogSync<A, S> {
    pub fn new(api: A, state: S, retry: RetryPolicy) -> Self {
        Self { api, state, retry }
    }

    /// Initial listing. No-op while another listing is in flight.
    pub async fn load(&self) {
        self.fetch(false).await
    }

    /// Invalidate the snapshot and list again, superseding any listing in flight
    pub async fn refetch(&self) {
        self.fetch(true).await
    }

    async fn fetch(&self, supersede: bool) {
        let Some(token) = self.state.modify(|s| s.begin_fetch(supersede)) else {
            info!("catalog listing already in flight");
            return;
        };
        let result = self.list_with_retry().await;
        if let Ok(books) = &result {
            info!("loaded {} books", books.len());
        }
        self.state.modify(|s| s.finish_fetch(token, result));
    }

    async fn list_with_retry(&self) -> CatalogResult<Vec<Book>> {
        let mut attempt = 0;
        loop {
            match self.api.list_all().await {
                Ok(books) => return Ok(books),
                Err(e) if attempt < self.retry.retries => {
                    let delay = self.retry.delay_for(attempt);
                    warn!("listing failed ({}), retry {} in {}ms", e, attempt + 1, delay);
                    pause(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("listing failed after {} attempts: {}", attempt + 1, e);
                    return Err(e);
                }
            }
        }
    }

    /// Submit the open form: create or update depending on its target
    pub async fn submit(&self) {
        let (target, shaped) = self.state.inspect(|s| (s.form.clone(), s.draft.shape()));
        let Some(target) = target else {
            return;
        };
        let input = match shaped {
            Ok(input) => input,
            Err(e) => {
                self.state.modify(|s| s.form_error = Some(e.to_string()));
                return;
            }
        };
        self.state.modify(|s| s.form_error = None);

        match target {
            FormTarget::Create => {
                self.state.modify(|s| s.begin_mutation(MutationKind::Create));
                let result = self.api.create(&input.into_create()).await;
                if let Ok(book) = &result {
                    info!("created book {}", book.id);
                }
                self.settle(MutationKind::Create, result.map(|_| ())).await;
            }
            FormTarget::Edit(book) => {
                self.state.modify(|s| s.begin_mutation(MutationKind::Update));
                let result = self.api.update(&book.id, &input.into_update()).await;
                self.settle(MutationKind::Update, result.map(|_| ())).await;
            }
        }
    }

    /// Delete the book awaiting confirmation
    pub async fn confirm_delete(&self) {
        let Some(id) = self.state.inspect(|s| s.pending_delete.clone()) else {
            return;
        };
        self.state.modify(|s| s.begin_mutation(MutationKind::Delete));
        let result = self.api.delete(&id).await;
        self.settle(MutationKind::Delete, result).await;
    }

    async fn settle(&self, kind: MutationKind, result: CatalogResult<()>) {
        match result {
            Ok(()) => {
                self.state.modify(|s| s.mutation_succeeded(kind));
                self.refetch().await;
            }
            Err(e) => {
                warn!("{:?} failed: {}", kind, e);
                self.state.modify(|s| s.mutation_failed(kind, &e));
            }
        }
    }
}

async fn pause(ms: u32) {
    if ms > 0 {
        TimeoutFuture::new(ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use async_trait::async_trait;
    use reactive_stores::Store;
    use catalog_client::{CatalogError, CreateBookInput, Operation, UpdateBookInput};

    use crate::store::{NotificationKind, Snapshot};
    use crate::table::{table_body, TableBody};

    type Shared = Rc<RefCell<CatalogState>>;

    impl<A, S> CatalogSync<A, S> {
        fn api(&self) -> &A {
            &self.api
        }

        fn state(&self) -> &S {
            &self.state
        }
    }

    impl StateCell for Shared {
        fn inspect<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
            f(&*self.borrow())
        }

        fn modify<R>(&self, f: impl FnOnce(&mut CatalogState) -> R) -> R {
            f(&mut *self.borrow_mut())
        }
    }

    /// In-memory backend with scripted failures
    #[derive(Default)]
    struct FakeApi {
        books: RefCell<Vec<Book>>,
        next_id: Cell<u32>,
        list_calls: Cell<u32>,
        /// Number of upcoming `list_all` calls that fail
        list_failures: Cell<u32>,
        update_error: RefCell<Option<CatalogError>>,
        delete_error: RefCell<Option<CatalogError>>,
        /// Observes the view state at the moment a listing is issued
        observed: RefCell<Option<Shared>>,
        form_open_at_list: RefCell<Vec<bool>>,
        /// Close the observed form while a create is pending, as Cancel would
        cancel_during_create: Cell<bool>,
        delete_calls: Cell<u32>,
    }

    impl FakeApi {
        fn with_books(books: Vec<Book>) -> Self {
            let api = Self::default();
            *api.books.borrow_mut() = books;
            api
        }
    }

    #[async_trait(?Send)]
    impl CatalogApi for FakeApi {
        async fn list_all(&self) -> CatalogResult<Vec<Book>> {
            self.list_calls.set(self.list_calls.get() + 1);
            if let Some(state) = self.observed.borrow().as_ref() {
                self.form_open_at_list.borrow_mut().push(state.borrow().form.is_some());
            }
            if self.list_failures.get() > 0 {
                self.list_failures.set(self.list_failures.get() - 1);
                return Err(CatalogError::Transport {
                    operation: Operation::List,
                    reason: "connection refused".into(),
                });
            }
            Ok(self.books.borrow().clone())
        }

        async fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
            self.books
                .borrow()
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or(CatalogError::NotFound)
        }

        async fn create(&self, input: &CreateBookInput) -> CatalogResult<Book> {
            if self.cancel_during_create.get() {
                if let Some(state) = self.observed.borrow().as_ref() {
                    state.borrow_mut().close_form();
                }
            }
            self.next_id.set(self.next_id.get() + 1);
            let book = Book {
                id: format!("new-{}", self.next_id.get()),
                title: input.title.clone(),
                author: input.author.clone(),
                published_year: input.published_year,
                genre: input.genre.clone(),
                available: input.available.unwrap_or(true),
                created_at: "now".into(),
                updated_at: "now".into(),
            };
            self.books.borrow_mut().push(book.clone());
            Ok(book)
        }

        async fn update(&self, id: &str, input: &UpdateBookInput) -> CatalogResult<Book> {
            if let Some(e) = self.update_error.borrow().clone() {
                return Err(e);
            }
            let mut books = self.books.borrow_mut();
            let book = books.iter_mut().find(|b| b.id == id).ok_or(CatalogError::NotFound)?;
            if let Some(title) = &input.title {
                book.title = title.clone();
            }
            if let Some(available) = input.available {
                book.available = available;
            }
            Ok(book.clone())
        }

        async fn delete(&self, id: &str) -> CatalogResult<()> {
            self.delete_calls.set(self.delete_calls.get() + 1);
            if let Some(e) = self.delete_error.borrow().clone() {
                return Err(e);
            }
            let mut books = self.books.borrow_mut();
            let before = books.len();
            books.retain(|b| b.id != id);
            if books.len() == before {
                Err(CatalogError::NotFound)
            } else {
                Ok(())
            }
        }
    }

    fn make_book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            published_year: None,
            genre: None,
            available: true,
            created_at: "c".to_string(),
            updated_at: "u".to_string(),
        }
    }

    fn no_delay() -> RetryPolicy {
        RetryPolicy {
            retries: 2,
            base_delay_ms: 0,
        }
    }

    fn setup(api: FakeApi) -> CatalogSync<FakeApi, Shared> {
        CatalogSync::new(api, Rc::new(RefCell::new(CatalogState::new())), no_delay())
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), 1_000);
        assert_eq!(policy.delay_for(1), 2_000);
        assert_eq!(policy.delay_for(10), MAX_RETRY_DELAY_MS);
    }

    #[tokio::test]
    async fn test_load_on_mount() {
        let sync = setup(FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]));
        sync.load().await;

        let state = sync.state().borrow();
        assert_eq!(state.books().len(), 1);
        assert_eq!(sync.api().list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_load_recovers_within_retry_budget() {
        let api = FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]);
        api.list_failures.set(2);
        let sync = setup(api);
        sync.load().await;

        assert_eq!(sync.api().list_calls.get(), 3);
        assert!(matches!(sync.state().borrow().snapshot, Snapshot::Loaded(ref b) if b.len() == 1));
    }

    #[tokio::test]
    async fn test_exhausted_retries_render_connection_error() {
        let api = FakeApi::default();
        api.list_failures.set(u32::MAX);
        let sync = setup(api);
        sync.load().await;

        assert_eq!(sync.api().list_calls.get(), 3);
        let state = sync.state().borrow();
        assert!(matches!(state.snapshot, Snapshot::Errored(_)));
        assert_ne!(state.snapshot, Snapshot::Loaded(vec![]));
    }

    #[tokio::test]
    async fn test_retry_after_error_loads_again() {
        let api = FakeApi::default();
        api.list_failures.set(3);
        let sync = setup(api);
        sync.load().await;
        assert!(matches!(sync.state().borrow().snapshot, Snapshot::Errored(_)));

        sync.load().await;
        assert_eq!(sync.state().borrow().snapshot, Snapshot::Loaded(vec![]));
    }

    #[tokio::test]
    async fn test_create_with_blank_year_then_refetch() {
        let sync = setup(FakeApi::default());
        sync.load().await;

        sync.state().modify(|s| {
            s.open_create();
            s.draft.title = "Foo".into();
            s.draft.author = "Bar".into();
            s.draft.published_year = String::new();
        });
        sync.submit().await;

        let created = sync.api().books.borrow()[0].clone();
        assert_eq!(created.published_year, None);

        let state = sync.state().borrow();
        assert_eq!(state.form, None);
        assert_eq!(state.books(), &[created]);
        assert_eq!(state.notifications.last().unwrap().message, "Book added successfully.");
        assert_eq!(sync.api().list_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_success_transition_precedes_refetch() {
        let sync = setup(FakeApi::default());
        *sync.api().observed.borrow_mut() = Some(sync.state().clone());
        sync.load().await;

        sync.state().modify(|s| {
            s.open_create();
            s.draft.title = "Foo".into();
            s.draft.author = "Bar".into();
        });
        sync.submit().await;

        // mount listing saw a closed form, refetch saw it already closed again
        assert_eq!(*sync.api().form_open_at_list.borrow(), vec![false, false]);
    }

    #[tokio::test]
    async fn test_update_not_found_keeps_form_open() {
        let book = make_book("1", "Dune", "Herbert");
        let api = FakeApi::with_books(vec![book.clone()]);
        *api.update_error.borrow_mut() = Some(CatalogError::NotFound);
        let sync = setup(api);
        sync.load().await;

        sync.state().modify(|s| {
            s.open_edit(book.clone());
            s.draft.title = "Dune Messiah".into();
        });
        sync.submit().await;

        let state = sync.state().borrow();
        assert_eq!(state.form, Some(FormTarget::Edit(book)));
        assert_eq!(state.draft.title, "Dune Messiah");
        assert!(!state.in_flight.update);
        let toast = state.notifications.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Book not found");
        // no refetch after a failed mutation
        assert_eq!(sync.api().list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_update_sends_patch_for_edit_target() {
        let book = make_book("1", "Dune", "Herbert");
        let sync = setup(FakeApi::with_books(vec![book.clone()]));
        sync.load().await;

        sync.state().modify(|s| {
            s.open_edit(book);
            s.draft.available = false;
        });
        sync.submit().await;

        let state = sync.state().borrow();
        assert_eq!(state.form, None);
        assert!(!state.books()[0].available);
        assert_eq!(state.summary().borrowed, 1);
    }

    #[tokio::test]
    async fn test_invalid_year_stays_local() {
        let sync = setup(FakeApi::default());
        sync.load().await;
        sync.state().modify(|s| {
            s.open_create();
            s.draft.published_year = "nineteen".into();
        });
        sync.submit().await;

        let state = sync.state().borrow();
        assert!(state.form.is_some());
        assert!(state.form_error.is_some());
        assert!(sync.api().books.borrow().is_empty());
        assert_eq!(sync.api().list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_delete_last_book_empties_catalog() {
        let sync = setup(FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]));
        sync.load().await;

        sync.state().modify(|s| s.request_delete("1"));
        sync.confirm_delete().await;

        let state = sync.state().borrow();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.snapshot, Snapshot::Loaded(vec![]));
        assert_eq!(table_body(&state.visible_books()), TableBody::Empty);
    }

    #[tokio::test]
    async fn test_delete_failure_still_clears_confirmation() {
        let api = FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]);
        *api.delete_error.borrow_mut() = Some(CatalogError::RequestFailed {
            operation: Operation::Delete,
            status: 500,
        });
        let sync = setup(api);
        sync.load().await;

        sync.state().modify(|s| s.request_delete("1"));
        sync.confirm_delete().await;

        let state = sync.state().borrow();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.books().len(), 1);
        assert_eq!(state.notifications.last().unwrap().message, "Failed to delete book");
    }

    #[tokio::test]
    async fn test_confirm_without_pending_is_noop() {
        let sync = setup(FakeApi::default());
        sync.confirm_delete().await;
        assert!(!sync.state().borrow().in_flight.delete);
        assert!(sync.state().borrow().notifications.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_delete_sends_nothing() {
        let sync = setup(FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]));
        sync.load().await;

        sync.state().modify(|s| {
            s.request_delete("1");
            s.cancel_delete();
        });
        sync.confirm_delete().await;

        let state = sync.state().borrow();
        assert_eq!(state.pending_delete, None);
        assert_eq!(state.books().len(), 1);
        assert!(state.notifications.is_empty());
        assert_eq!(sync.api().delete_calls.get(), 0);
        assert_eq!(sync.api().list_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_cancel_does_not_abort_pending_create() {
        let api = FakeApi::default();
        api.cancel_during_create.set(true);
        let sync = setup(api);
        *sync.api().observed.borrow_mut() = Some(sync.state().clone());
        sync.load().await;

        sync.state().modify(|s| {
            s.open_create();
            s.draft.title = "Foo".into();
            s.draft.author = "Bar".into();
        });
        sync.submit().await;

        assert_eq!(sync.api().books.borrow().len(), 1);
        assert_eq!(sync.api().list_calls.get(), 2);
        let state = sync.state().borrow();
        assert_eq!(state.form, None);
        assert!(!state.in_flight.saving());
        assert_eq!(state.books().len(), 1);
        let toast = state.notifications.last().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert_eq!(toast.message, "Book added successfully.");
    }

    #[tokio::test]
    async fn test_success_after_cancel_settles_update() {
        let book = make_book("1", "Dune", "Herbert");
        let sync = setup(FakeApi::with_books(vec![book.clone()]));
        sync.load().await;

        sync.state().modify(|s| {
            s.open_edit(book);
            s.begin_mutation(MutationKind::Update);
            s.close_form();
        });
        sync.settle(MutationKind::Update, Ok(())).await;

        let state = sync.state().borrow();
        assert_eq!(state.form, None);
        assert!(!state.in_flight.update);
        assert_eq!(state.notifications.last().unwrap().message, "Book updated successfully.");
        assert_eq!(sync.api().list_calls.get(), 2);
    }

    #[tokio::test]
    async fn test_reactive_store_drives_catalog() {
        let owner = Owner::new();
        owner.set();
        let store: AppStore = Store::new(CatalogState::new());
        let sync = CatalogSync::new(
            FakeApi::with_books(vec![make_book("1", "Dune", "Herbert")]),
            store,
            no_delay(),
        );

        sync.load().await;
        assert_eq!(store.with_untracked(|s| s.books().len()), 1);

        sync.state().modify(|s| s.request_delete("1"));
        sync.confirm_delete().await;

        store.with_untracked(|s| {
            assert_eq!(s.snapshot, Snapshot::Loaded(vec![]));
            assert_eq!(s.pending_delete, None);
            assert!(!s.in_flight.delete);
            assert_eq!(s.notifications.last().unwrap().message, "Book deleted successfully.");
        });
        assert_eq!(sync.api().list_calls.get(), 2);
    }
}
