//! Request path construction for the library's HTTP surface.
//!
//! Paths are built relative so the mirror racer can prepend whichever
//! mirror authority wins. Query strings use form urlencoding (space
//! encodes as `+`), matching what the site's own search form submits.

use url::form_urlencoded;

const SEARCH_PATH: &str = "/booksearch";
const BOOK_PATH: &str = "/b";

/// Builds the book-search path for a free-text query.
///
/// The `chb=on` parameter restricts results to books, excluding author
/// and series matches.
#[must_use]
pub fn search_path(query: &str) -> String {
    let params: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("ask", query)
        .append_pair("chb", "on")
        .finish();
    format!("{SEARCH_PATH}?{params}")
}

/// Builds the download path for a book in the given format.
#[must_use]
pub fn download_path(id: &str, format: &str) -> String {
    join_book_path(&[id, format])
}

/// Builds the detail-page path for a book.
#[must_use]
pub fn info_path(id: &str) -> String {
    join_book_path(&[id])
}

/// Joins segments under the book path, dropping empty ones.
fn join_book_path(segments: &[&str]) -> String {
    let mut path = String::from(BOOK_PATH);
    for segment in segments {
        if !segment.is_empty() {
            path.push('/');
            path.push_str(segment);
        }
    }
    path
}
