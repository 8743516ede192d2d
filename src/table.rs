//! Table Cell Formatting
//!
//! What each catalog row displays, independent of the DOM.

use catalog_client::Book;

pub const GENRE_PLACEHOLDER: &str = "Not specified";
pub const YEAR_PLACEHOLDER: &str = "N/A";

/// Rendered text of one table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowCells {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub genre_is_placeholder: bool,
    pub year: String,
    pub year_is_placeholder: bool,
    pub status: &'static str,
    pub available: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody {
    /// Nothing to show: render the empty-state placeholder
    Empty,
    Rows(Vec<RowCells>),
}

pub fn availability_label(available: bool) -> &'static str {
    if available { "Available" } else { "Borrowed" }
}

impl RowCells {
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_else(|| GENRE_PLACEHOLDER.to_string()),
            genre_is_placeholder: book.genre.is_none(),
            year: book
                .published_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| YEAR_PLACEHOLDER.to_string()),
            year_is_placeholder: book.published_year.is_none(),
            status: availability_label(book.available),
            available: book.available,
        }
    }
}

pub fn table_body(books: &[Book]) -> TableBody {
    if books.is_empty() {
        TableBody::Empty
    } else {
        TableBody::Rows(books.iter().map(RowCells::from_book).collect())
    }
}
