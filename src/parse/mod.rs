//! HTML parsing for mirror pages.
//!
//! Mirror pages are server-rendered HTML with a stable structural skeleton
//! around the `#main` container. The parsers here rely only on that
//! skeleton and normalize all extracted text, so cosmetic markup changes
//! and formatting whitespace do not leak into results.

mod error;

pub use error::ParseError;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Formats the mirrors can serve, in canonical presentation order.
pub const KNOWN_FORMATS: &[&str] = &["fb2", "epub", "mobi"];

static LIST_ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("div#main > ul > li"));
static ITEM_BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("div#main"));
static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("div#main > h1"));
static GENRE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("p.genre"));
static ANNOTATION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("div#main > p"));
static SIZE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(r#"span[style="size"]"#));

/// Trailing digit run of a listing href, e.g. `/b/42053`.
static LIST_ITEM_ID_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"[0-9]+$"));
/// Book id inside a read link, e.g. `/b/42053/read`.
static READ_LINK_ID_RE: LazyLock<Regex> = LazyLock::new(|| static_regex(r"b/([0-9]+)/read$"));

#[allow(clippy::unwrap_used)]
fn selector(css: &'static str) -> Selector {
    // Selectors are compile-time literals and always parse.
    Selector::parse(css).unwrap()
}

#[allow(clippy::unwrap_used)]
fn static_regex(pattern: &'static str) -> Regex {
    // Patterns are compile-time literals and always compile.
    Regex::new(pattern).unwrap()
}

/// One row of a search result listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Book identifier extracted from the title link; empty when the
    /// link carries no trailing digits.
    pub id: String,
    /// Normalized title text.
    pub title: String,
    /// Author names in document order; empty for anonymous entries.
    pub authors: Vec<String>,
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} <{}>", self.id, self.title, self.authors.join(", "))
    }
}

/// Details scraped from a book page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResult {
    /// Book identifier recovered from the page's read link.
    pub id: String,
    /// Normalized title text; empty when the page has no heading.
    pub title: String,
    /// Genre line; empty when absent.
    pub genre: String,
    /// First annotation paragraph; empty when absent.
    pub annotation: String,
    /// Display string of the book size as the page shows it.
    pub size: String,
    /// Subset of [`KNOWN_FORMATS`] actually offered by the page, in
    /// canonical order.
    pub formats: Vec<String>,
}

impl fmt::Display for InfoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Size: {}", self.size)?;
        writeln!(f, "Formats: {}", self.formats.join(" "))?;
        writeln!(f)?;
        write!(f, "{}", self.annotation)
    }
}

/// Parses a search result page into listing rows.
///
/// Rows live at `div#main > ul > li`. The first anchor of a row is the
/// title link (its trailing href digits are the book id), every further
/// anchor is an author. Rows without any anchor are separator noise and
/// are skipped.
///
/// # Errors
///
/// Returns [`ParseError::ListNotFound`] when the page has no listing
/// rows at all, which is how mirrors render empty searches and error
/// pages.
pub fn parse_search(html: &str) -> Result<Vec<ListItem>, ParseError> {
    let document = Html::parse_document(html);

    let mut items = Vec::new();
    let mut saw_rows = false;
    for row in document.select(&LIST_ITEM_SELECTOR) {
        saw_rows = true;
        let mut anchors = row.select(&ANCHOR_SELECTOR);
        let Some(title_link) = anchors.next() else {
            continue;
        };
        let href = title_link.value().attr("href").unwrap_or_default();
        let id = LIST_ITEM_ID_RE
            .find(href)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        items.push(ListItem {
            id,
            title: element_text(title_link),
            authors: anchors.map(element_text).collect(),
        });
    }

    if !saw_rows {
        return Err(ParseError::ListNotFound);
    }
    Ok(items)
}

/// Parses a book detail page.
///
/// The book id is recovered from the page's `…/b/<id>/read` link; a page
/// without one is not a book page, no matter what else it contains.
/// Title, genre, annotation and size fall back to empty strings when
/// their nodes are absent. Formats are probed by link presence anywhere
/// in the document.
///
/// # Errors
///
/// Returns [`ParseError::ItemBodyNotFound`] when the detail container is
/// missing entirely, and [`ParseError::ItemNotFound`] when no read link
/// identifies a book.
pub fn parse_info(html: &str) -> Result<InfoResult, ParseError> {
    let document = Html::parse_document(html);

    if document.select(&ITEM_BODY_SELECTOR).next().is_none() {
        return Err(ParseError::ItemBodyNotFound);
    }

    let id = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .find_map(|href| {
            READ_LINK_ID_RE
                .captures(href)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .ok_or(ParseError::ItemNotFound)?;

    Ok(InfoResult {
        id,
        title: first_direct_text(&document, &TITLE_SELECTOR),
        genre: first_text(&document, &GENRE_SELECTOR),
        annotation: annotation_text(&document),
        size: first_direct_text(&document, &SIZE_SELECTOR),
        formats: available_formats(&document),
    })
}

/// First `div#main > p` that carries its own text. The genre paragraph
/// wraps all its text in anchors, so it never qualifies and the first
/// real annotation paragraph wins.
fn annotation_text(document: &Html) -> String {
    document
        .select(&ANNOTATION_SELECTOR)
        .map(direct_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// Formats for which the document advertises a download link.
fn available_formats(document: &Html) -> Vec<String> {
    KNOWN_FORMATS
        .iter()
        .filter(|format| {
            document.select(&ANCHOR_SELECTOR).any(|anchor| {
                anchor
                    .value()
                    .attr("href")
                    .is_some_and(|href| href.contains(*format))
            })
        })
        .map(ToString::to_string)
        .collect()
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn first_direct_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(direct_text)
        .unwrap_or_default()
}

/// Concatenated descendant text with every whitespace run collapsed to a
/// single space and the ends trimmed.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    normalize_whitespace(&raw)
}

/// Like [`element_text`] but only the element's own text nodes, not the
/// text of nested elements.
fn direct_text(element: ElementRef<'_>) -> String {
    let raw: String = element
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect();
    normalize_whitespace(&raw)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Книжная полка</title></head>
<body>
<div id="main">
  <h1 class="title">Найденные книги</h1>
  <ul>
    <li>
      <a href="/b/1">Пелевин и поколение
        пустоты</a>
      - <a href="/a/10">Сергей Полотовский</a>, <a href="/a/11">Роман Козак</a>
    </li>
    <li><a href="/b/2">"Нео-пелевин"</a> - <a href="/a/12">Вадим Сеновский</a></li>
    <li><a href="/b/3">Виктор Пелевин - Синий фонарь</a> - <a href="/a/13">Сергей Валерьевич Бережной</a></li>
  </ul>
</div>
</body>
</html>"#;

    const ITEM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Путь джедая</title></head>
<body>
<div id="main">
  <h1 class="title">Путь джедая (fb2)</h1>
  <p class="genre"><a href="/g/99" class="genre">Самосовершенствование</a></p>
  <p>Очень   полезная
 книга про путь.</p>
  <span style="size">2523K, 197с.</span>
  <a href="/b/42053/fb2">(fb2)</a>
  <a href="/b/42053/epub">(epub)</a>
  <a href="/b/42053/mobi">(mobi)</a>
  <a href="/b/42053/read">(читать)</a>
</div>
</body>
</html>"#;

    #[test]
    fn test_parse_search_extracts_rows_in_document_order() {
        let items = parse_search(LIST_PAGE).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0],
            ListItem {
                id: "1".to_string(),
                title: "Пелевин и поколение пустоты".to_string(),
                authors: vec!["Сергей Полотовский".to_string(), "Роман Козак".to_string()],
            }
        );
        assert_eq!(items[1].id, "2");
        assert_eq!(items[1].title, "\"Нео-пелевин\"");
        assert_eq!(items[1].authors, vec!["Вадим Сеновский".to_string()]);
        assert_eq!(items[2].title, "Виктор Пелевин - Синий фонарь");
    }

    #[test]
    fn test_parse_search_normalizes_title_whitespace() {
        let items = parse_search(LIST_PAGE).unwrap();
        assert_eq!(items[0].title, "Пелевин и поколение пустоты");
    }

    #[test]
    fn test_parse_search_many_authors_preserved_in_order() {
        let html = r#"<div id="main"><ul>
          <li><a href="/b/510935">Не только Холмс</a>
            <a href="/a/1">Эллен Вуд</a>
            <a href="/a/2">Грант Аллен</a>
            <a href="/a/3">Кэтрин Луиза Пиркис</a>
          </li>
        </ul></div>"#;
        let items = parse_search(html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "510935");
        assert_eq!(
            items[0].authors,
            vec![
                "Эллен Вуд".to_string(),
                "Грант Аллен".to_string(),
                "Кэтрин Луиза Пиркис".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_search_row_without_author_links() {
        let html = r#"<div id="main"><ul>
          <li><a href="/b/42053">Путь джедая</a></li>
        </ul></div>"#;
        let items = parse_search(html).unwrap();
        assert_eq!(
            items,
            vec![ListItem {
                id: "42053".to_string(),
                title: "Путь джедая".to_string(),
                authors: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_parse_search_skips_rows_without_anchors() {
        let html = r#"<div id="main"><ul>
          <li>Все книги</li>
          <li><a href="/b/7">Книга</a></li>
        </ul></div>"#;
        let items = parse_search(html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "7");
    }

    #[test]
    fn test_parse_search_href_without_digits_yields_empty_id() {
        let html = r#"<div id="main"><ul>
          <li><a href="/stat/b">Статистика</a></li>
        </ul></div>"#;
        let items = parse_search(html).unwrap();
        assert_eq!(items[0].id, "");
    }

    #[test]
    fn test_parse_search_rejects_page_without_listing() {
        let err = parse_search("<html><body><div id=\"main\"><p>нет</p></div></body></html>")
            .unwrap_err();
        assert_eq!(err, ParseError::ListNotFound);
    }

    #[test]
    fn test_parse_search_rejects_item_page() {
        let err = parse_search(ITEM_PAGE).unwrap_err();
        assert_eq!(err, ParseError::ListNotFound);
    }

    #[test]
    fn test_parse_search_rejects_error_page() {
        let err = parse_search("<html><body><h1>502 Bad Gateway</h1></body></html>").unwrap_err();
        assert_eq!(err, ParseError::ListNotFound);
    }

    #[test]
    fn test_parse_search_rejects_non_html_body() {
        let err = parse_search("{}").unwrap_err();
        assert_eq!(err, ParseError::ListNotFound);
    }

    #[test]
    fn test_parse_info_extracts_all_fields() {
        let info = parse_info(ITEM_PAGE).unwrap();
        assert_eq!(info.id, "42053");
        assert_eq!(info.title, "Путь джедая (fb2)");
        assert_eq!(info.genre, "Самосовершенствование");
        assert_eq!(info.annotation, "Очень полезная книга про путь.");
        assert_eq!(info.size, "2523K, 197с.");
        assert_eq!(info.formats, vec!["fb2", "epub", "mobi"]);
    }

    #[test]
    fn test_parse_info_formats_keep_canonical_order() {
        let html = r#"<div id="main">
          <a href="/b/5/mobi">(mobi)</a>
          <a href="/b/5/fb2">(fb2)</a>
          <a href="/b/5/read">(читать)</a>
        </div>"#;
        let info = parse_info(html).unwrap();
        assert_eq!(info.formats, vec!["fb2", "mobi"]);
    }

    #[test]
    fn test_parse_info_annotation_skips_genre_paragraph() {
        // The genre paragraph precedes the annotation and keeps all its
        // text inside anchors; it must not be mistaken for the annotation.
        let html = r#"<div id="main">
          <p class="genre"> <a href="/g/5" class="genre">Фантастика</a> </p>
          <p>Аннотация книги.</p>
          <a href="/b/11/read">(читать)</a>
        </div>"#;
        let info = parse_info(html).unwrap();
        assert_eq!(info.genre, "Фантастика");
        assert_eq!(info.annotation, "Аннотация книги.");
    }

    #[test]
    fn test_parse_info_missing_optional_fields_are_empty() {
        let html = r#"<div id="main"><a href="/b/9/read">(читать)</a></div>"#;
        let info = parse_info(html).unwrap();
        assert_eq!(info.id, "9");
        assert_eq!(info.title, "");
        assert_eq!(info.genre, "");
        assert_eq!(info.annotation, "");
        assert_eq!(info.size, "");
        assert!(info.formats.is_empty());
    }

    #[test]
    fn test_parse_info_without_body_container() {
        let err = parse_info("<html><body><h1>502 Bad Gateway</h1></body></html>").unwrap_err();
        assert_eq!(err, ParseError::ItemBodyNotFound);
    }

    #[test]
    fn test_parse_info_without_read_link_is_not_an_item() {
        let html = r#"<div id="main"><h1>Новости сайта</h1><a href="/news/1">далее</a></div>"#;
        let err = parse_info(html).unwrap_err();
        assert_eq!(err, ParseError::ItemNotFound);
    }

    #[test]
    fn test_parse_info_ignores_read_links_without_id_shape() {
        // "how to read" style links must not satisfy the id probe
        let html = r#"<div id="main">
          <a href="/help/read">как читать</a>
          <a href="/b/17/read">(читать)</a>
        </div>"#;
        let info = parse_info(html).unwrap();
        assert_eq!(info.id, "17");
    }

    #[test]
    fn test_list_item_display_without_authors() {
        let item = ListItem {
            id: "1".to_string(),
            title: "TestBookTitle".to_string(),
            authors: Vec::new(),
        };
        assert_eq!(item.to_string(), "1: TestBookTitle <>");
    }

    #[test]
    fn test_list_item_display_single_author() {
        let item = ListItem {
            id: "1".to_string(),
            title: "TestBookTitle".to_string(),
            authors: vec!["TestAuthor".to_string()],
        };
        assert_eq!(item.to_string(), "1: TestBookTitle <TestAuthor>");
    }

    #[test]
    fn test_list_item_display_multiple_authors() {
        let item = ListItem {
            id: "1".to_string(),
            title: "TestBookTitle".to_string(),
            authors: vec![
                "TestAuthor1".to_string(),
                "TestAuthor2".to_string(),
                "TestAuthor3".to_string(),
            ],
        };
        assert_eq!(
            item.to_string(),
            "1: TestBookTitle <TestAuthor1, TestAuthor2, TestAuthor3>"
        );
    }

    #[test]
    fn test_info_result_display_block() {
        let info = InfoResult {
            id: "42053".to_string(),
            title: "Путь джедая".to_string(),
            genre: "Самосовершенствование".to_string(),
            annotation: "Очень полезная книга".to_string(),
            size: "2523K, 197с.".to_string(),
            formats: vec!["fb2".to_string(), "epub".to_string(), "mobi".to_string()],
        };
        let rendered = info.to_string();
        assert_eq!(
            rendered,
            "Путь джедая\nID: 42053\nSize: 2523K, 197с.\nFormats: fb2 epub mobi\n\nОчень полезная книга"
        );
    }

    #[test]
    fn test_normalize_whitespace_collapses_runs_and_trims() {
        assert_eq!(normalize_whitespace("  Война\n  и \t мир "), "Война и мир");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }
}
