//! Error types for the parse module.

use thiserror::Error;

/// Errors raised when mirror HTML does not carry the expected structure.
///
/// Mirrors answer `200 OK` even for empty searches and error pages, so
/// structural absence is the only reliable signal that a page is not
/// the kind of page the caller asked for.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The page carries no result listing (empty search, error page,
    /// or a page of a different kind).
    #[error("list with items not found")]
    ListNotFound,

    /// The page carries no book detail body.
    #[error("item body not found")]
    ItemBodyNotFound,

    /// The detail body exists but names no readable book, so the page
    /// is not a book page.
    #[error("item not found")]
    ItemNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_messages() {
        assert_eq!(ParseError::ListNotFound.to_string(), "list with items not found");
        assert_eq!(ParseError::ItemBodyNotFound.to_string(), "item body not found");
        assert_eq!(ParseError::ItemNotFound.to_string(), "item not found");
    }
}
