//! Book Form Shaping
//!
//! Raw form fields and their conversion into backend input records.

use reactive_stores::Store;
use thiserror::Error;

use catalog_client::{Book, CreateBookInput, UpdateBookInput};

/// Text-level state of the add/edit form
#[derive(Clone, Debug, PartialEq, Eq, Store)]
pub struct BookFormState {
    pub title: String,
    pub author: String,
    /// Raw text of the year input
    pub published_year: String,
    pub genre: String,
    pub available: bool,
}

impl Default for BookFormState {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Published year must be a whole number")]
    InvalidYear,
}

/// A submitted form, before it is split into create or update input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub available: bool,
}

impl BookFormState {
    /// Create mode: empty fields, available by default
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            published_year: String::new(),
            genre: String::new(),
            available: true,
        }
    }

    /// Edit mode: fields pre-populated from an existing book
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year.map(|y| y.to_string()).unwrap_or_default(),
            genre: book.genre.clone().unwrap_or_default(),
            available: book.available,
        }
    }

    /// Shape raw fields into a submittable record.
    /// Title and author pass through verbatim; blank optional fields become unset.
    pub fn shape(&self) -> Result<BookInput, FormError> {
        let year = self.published_year.trim();
        let published_year = if year.is_empty() {
            None
        } else {
            Some(leading_integer(year).ok_or(FormError::InvalidYear)?)
        };

        Ok(BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year,
            genre: (!self.genre.is_empty()).then(|| self.genre.clone()),
            available: self.available,
        })
    }
}

/// Integer prefix of `text`: an optional sign followed by digits.
/// Number inputs can hold "1965.5" or "1e3"; those read as 1965 and 1.
fn leading_integer(text: &str) -> Option<i32> {
    let unsigned = text.trim_start_matches(['+', '-']);
    let sign_len = text.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

impl BookInput {
    pub fn into_create(self) -> CreateBookInput {
        CreateBookInput {
            title: self.title,
            author: self.author,
            published_year: self.published_year,
            genre: self.genre,
            available: Some(self.available),
        }
    }

    pub fn into_update(self) -> UpdateBookInput {
        UpdateBookInput {
            title: Some(self.title),
            author: Some(self.author),
            published_year: self.published_year,
            genre: self.genre,
            available: Some(self.available),
        }
    }
}
