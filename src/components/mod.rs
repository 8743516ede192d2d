//! UI Components
//!
//! Leptos components for the catalog page.

mod book_form;
mod book_table;
mod connection_error;
mod delete_dialog;
mod search_bar;
mod stats_cards;
mod toast_stack;

pub use book_form::BookForm;
pub use book_table::BookTable;
pub use connection_error::ConnectionError;
pub use delete_dialog::DeleteDialog;
pub use search_bar::SearchBar;
pub use stats_cards::StatsCards;
pub use toast_stack::ToastStack;
