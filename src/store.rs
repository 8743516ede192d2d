//! Catalog View State
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. All transitions
//! are plain methods on `CatalogState` so the orchestrator can drive them
//! from async tasks and tests can drive them without a reactive runtime.

use leptos::prelude::*;
use log::debug;
use reactive_stores::Store;

use catalog_client::{Book, CatalogError};

use crate::filter::filter_books;
use crate::form::BookFormState;

/// Lifecycle of the cached catalog snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Snapshot {
    #[default]
    NotLoaded,
    /// First load in progress, nothing to show yet
    Loading,
    Loaded(Vec<Book>),
    /// Refetch after a mutation; the stale list stays visible
    Refreshing(Vec<Book>),
    /// Listing failed after its retry budget (message)
    Errored(String),
}

impl Snapshot {
    pub fn books(&self) -> &[Book] {
        match self {
            Snapshot::Loaded(books) | Snapshot::Refreshing(books) => books,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Snapshot::NotLoaded | Snapshot::Loading)
    }
}

/// What the open form is editing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(Book),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Book added successfully.",
            MutationKind::Update => "Book updated successfully.",
            MutationKind::Delete => "Book deleted successfully.",
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to add book.",
            MutationKind::Update => "Failed to update book.",
            MutationKind::Delete => "Failed to delete book.",
        }
    }
}

/// Busy flags, one per mutation kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InFlight {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl InFlight {
    fn set(&mut self, kind: MutationKind, value: bool) {
        match kind {
            MutationKind::Create => self.create = value,
            MutationKind::Update => self.update = value,
            MutationKind::Delete => self.delete = value,
        }
    }

    /// Create or update pending: the form's submit button is busy
    pub fn saving(&self) -> bool {
        self.create || self.update
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient toast message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Identifies one listing request; responses from superseded requests are dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchToken(u64);

/// Counts shown above the table, computed over the whole catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
}

impl CatalogSummary {
    pub fn of(books: &[Book]) -> Self {
        let available = books.iter().filter(|b| b.available).count();
        Self {
            total: books.len(),
            available,
            borrowed: books.len() - available,
        }
    }
}

/// Catalog view state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    pub snapshot: Snapshot,
    /// Open form (None = closed)
    pub form: Option<FormTarget>,
    /// Unsaved form input
    pub draft: BookFormState,
    /// Inline validation message for the draft
    pub form_error: Option<String>,
    /// Book awaiting delete confirmation
    pub pending_delete: Option<String>,
    pub in_flight: InFlight,
    pub query: String,
    pub notifications: Vec<Notification>,
    next_notification_id: u64,
    fetch_generation: u64,
    fetch_in_flight: bool,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        self.snapshot.books()
    }

    /// Books matching the live search query
    pub fn visible_books(&self) -> Vec<Book> {
        filter_books(&self.query, self.books())
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::of(self.books())
    }

    // ========================
    // Snapshot
    // ========================

    /// Start a listing request.
    ///
    /// Without `supersede`, returns None when a listing is already in flight.
    /// With it, the new request wins and the older response is discarded.
    pub fn begin_fetch(&mut self, supersede: bool) -> Option<FetchToken> {
        if self.fetch_in_flight && !supersede {
            return None;
        }
        self.fetch_generation += 1;
        self.fetch_in_flight = true;
        self.snapshot = match std::mem::take(&mut self.snapshot) {
            Snapshot::Loaded(books) | Snapshot::Refreshing(books) => Snapshot::Refreshing(books),
            _ => Snapshot::Loading,
        };
        Some(FetchToken(self.fetch_generation))
    }

    /// Settle a listing request. Returns false if the response was stale.
    pub fn finish_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<Book>, CatalogError>,
    ) -> bool {
        if token.0 != self.fetch_generation {
            debug!("dropping stale catalog response #{}", token.0);
            return false;
        }
        self.fetch_in_flight = false;
        self.snapshot = match result {
            Ok(books) => Snapshot::Loaded(books),
            Err(e) => Snapshot::Errored(e.to_string()),
        };
        true
    }

    // ========================
    // Form
    // ========================

    pub fn open_create(&mut self) {
        self.form = Some(FormTarget::Create);
        self.draft = BookFormState::blank();
        self.form_error = None;
    }

    pub fn open_edit(&mut self, book: Book) {
        self.draft = BookFormState::from_book(&book);
        self.form = Some(FormTarget::Edit(book));
        self.form_error = None;
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.form_error = None;
    }

    // ========================
    // Delete confirmation
    // ========================

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // ========================
    // Mutations
    // ========================

    pub fn begin_mutation(&mut self, kind: MutationKind) {
        self.in_flight.set(kind, true);
    }

    pub fn mutation_succeeded(&mut self, kind: MutationKind) {
        self.in_flight.set(kind, false);
        match kind {
            MutationKind::Create | MutationKind::Update => self.close_form(),
            MutationKind::Delete => self.pending_delete = None,
        }
        self.notify(NotificationKind::Success, "Success!", kind.success_message());
    }

    /// Surface the failure. Form and draft stay as they were; the delete
    /// confirmation is cleared regardless of outcome.
    pub fn mutation_failed(&mut self, kind: MutationKind, error: &CatalogError) {
        self.in_flight.set(kind, false);
        if kind == MutationKind::Delete {
            self.pending_delete = None;
        }
        let message = error.to_string();
        let message = if message.is_empty() {
            kind.fallback_message().to_string()
        } else {
            message
        };
        self.notify(NotificationKind::Error, "Error", message);
    }

    // ========================
    // Notifications
    // ========================

    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> u64 {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notifications.push(Notification {
            id,
            kind,
            title: title.into(),
            message: message.into(),
        });
        id
    }

    pub fn dismiss_notification(&mut self, id: u64) {
        self.notifications.retain(|n| n.id != id);
    }
}

/// Type alias for the store
pub type AppStore = Store<CatalogState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
