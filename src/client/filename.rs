//! File name handling for downloaded books.
//!
//! Mirrors advertise the canonical book file name through the
//! `Content-Disposition` header; this module extracts it and makes it
//! safe to join onto an output directory.

/// Parses a Content-Disposition header value into a file name.
///
/// Handles the shapes the mirrors emit:
/// - `attachment; filename="book.fb2.zip"`
/// - `attachment; filename=book.mobi`
/// - `attachment; filename*=UTF-8''book.epub` (RFC 5987)
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    // Try filename*= first (RFC 5987 encoded)
    if let Some(pos) = header.find("filename*=") {
        let value = header[pos + 10..].trim();
        // Format: charset'language'encoded_value
        if let Some(quote_pos) = value.find("''") {
            let encoded = &value[quote_pos + 2..];
            let end = encoded.find(';').unwrap_or(encoded.len());
            let encoded_name = encoded[..end].trim();
            if let Ok(decoded) = urlencoding::decode(encoded_name) {
                return Some(decoded.into_owned());
            }
        }
    }

    // Try regular filename=
    if let Some(pos) = header.find("filename=") {
        let value = header[pos + 9..].trim();

        if let Some(stripped) = value.strip_prefix('"') {
            if let Some(end) = stripped.find('"') {
                return Some(stripped[..end].to_string());
            }
        } else {
            // Unquoted - take until ; or end
            let end = value.find(';').unwrap_or(value.len());
            let filename = value[..end].trim();
            if !filename.is_empty() {
                return Some(filename.to_string());
            }
        }
    }

    None
}

/// Replaces characters that are invalid on common filesystems, so a
/// server-supplied name can be joined onto a directory without escaping
/// it.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return String::new();
    }

    // "." and ".." survive the character mapping; rewrite the dots so the
    // name stays a plain file name.
    match sanitized.as_str() {
        "." | ".." => sanitized.chars().map(|_| '_').collect(),
        _ => sanitized,
    }
}
