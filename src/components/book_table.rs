//! Book Table Component
//!
//! Stateless: renders the given books, forwards row actions to callbacks.

use leptos::prelude::*;

use catalog_client::Book;

use crate::table::{table_body, RowCells, TableBody};

#[component]
pub fn BookTable(
    #[prop(into)] books: Signal<Vec<Book>>,
    #[prop(into)] on_edit: Callback<Book>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    move || {
        let books = books.get();
        match table_body(&books) {
            TableBody::Empty => view! {
                <div class="empty-state">
                    <span class="empty-icon">"📖"</span>
                    <h3>"No books found"</h3>
                    <p>"Get started by adding your first book to the library."</p>
                </div>
            }
            .into_any(),
            TableBody::Rows(rows) => view! {
                <table class="book-table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Author"</th>
                            <th>"Genre"</th>
                            <th>"Year"</th>
                            <th>"Status"</th>
                            <th class="actions">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {books
                            .into_iter()
                            .zip(rows)
                            .map(|(book, row)| view! {
                                <BookRow book=book row=row on_edit=on_edit on_delete=on_delete />
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any(),
        }
    }
}

/// A single book row
#[component]
fn BookRow(
    book: Book,
    row: RowCells,
    on_edit: Callback<Book>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let RowCells {
        id,
        title,
        author,
        genre,
        genre_is_placeholder,
        year,
        year_is_placeholder,
        status,
        available,
    } = row;
    let genre_class = if genre_is_placeholder { "muted placeholder" } else { "muted" };
    let year_class = if year_is_placeholder { "muted placeholder" } else { "" };
    let badge_class = if available { "badge available" } else { "badge borrowed" };

    view! {
        <tr class="book-row">
            <td class="title">{title}</td>
            <td>{author}</td>
            <td class=genre_class>{genre}</td>
            <td class=year_class>{year}</td>
            <td>
                <span class=badge_class>{status}</span>
            </td>
            <td class="actions">
                <button class="edit-btn" title="Edit" on:click=move |_| on_edit.run(book.clone())>
                    "✎"
                </button>
                <button class="delete-btn" title="Delete" on:click=move |_| on_delete.run(id.clone())>
                    "×"
                </button>
            </td>
        </tr>
    }
}
