//! Search Filter
//!
//! Case-insensitive substring search over title, author and genre.

use catalog_client::Book;

/// Books whose title, author or genre contains `query`, in input order
pub fn filter_books(query: &str, books: &[Book]) -> Vec<Book> {
    if query.is_empty() {
        return books.to_vec();
    }
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| matches_query(&needle, book))
        .cloned()
        .collect()
}

fn matches_query(needle: &str, book: &Book) -> bool {
    book.title.to_lowercase().contains(needle)
        || book.author.to_lowercase().contains(needle)
        || book
            .genre
            .as_deref()
            .is_some_and(|genre| genre.to_lowercase().contains(needle))
}
