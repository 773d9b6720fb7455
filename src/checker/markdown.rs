// src/checker/markdown.rs
// =============================================================================
// This module extracts candidate links from Markdown text.
//
// How it works:
// 1. Parse the Markdown with `pulldown-cmark` into a stream of events
// 2. Every Markdown link (inline, reference, autolink) arrives as
//    Event::Start(Tag::Link(..)) carrying its destination exactly as written
// 3. Raw HTML in the document (<a href="...">) arrives as Event::Html chunks;
//    those chunks are parsed with `scraper` to find their <a> elements
// 4. Keep only targets whose scheme is http or https
//
// Why not render to HTML and scrape everything?
// - The HTML renderer percent-encodes link targets (Café -> Caf%C3%A9,
//   [ -> %5B), so the reported URL would no longer be what the author wrote.
//
// Links are returned byte-for-byte: no trailing-slash fixes, no lowercasing,
// no percent-encoding, no deduplication. The same URL twice in a document is
// checked twice.
// =============================================================================

use pulldown_cmark::{Event, Options, Parser, Tag};
use scraper::{Html, Selector};
use url::{ParseError, Url};

// Extracts all HTTP/HTTPS links from Markdown text, in document order
//
// Example input:
//   "Check out [Rust](https://www.rust-lang.org) or [docs](./docs/README.md)"
//
// Example output:
//   vec!["https://www.rust-lang.org"]
pub fn extract_markdown_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Consecutive Html events belong to the same piece of raw HTML (an HTML
    // block comes one line per event), so they are collected and parsed
    // together once a non-HTML event shows up
    let mut raw_html = String::new();

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Html(chunk) => {
                raw_html.push_str(&chunk);
                continue;
            }
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                flush_raw_html(&mut raw_html, &mut links);
                links.push(dest_url.to_string());
            }
            _ => flush_raw_html(&mut raw_html, &mut links),
        }
    }
    flush_raw_html(&mut raw_html, &mut links);

    links.retain(|href| is_http_link(href));
    links
}

// Parser extensions documentation usually relies on
//
// There is no table-of-contents extension in pulldown-cmark. Generated TOC
// entries are in-page fragments (#section), which are never candidates, so
// the extracted links are the same without it.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

// Collects the hrefs of <a> elements in buffered raw HTML, then clears it
fn flush_raw_html(raw_html: &mut String, links: &mut Vec<String>) {
    if raw_html.is_empty() {
        return;
    }

    // "a" is a constant, known-valid selector
    let selector = Selector::parse("a").expect("`a` is a valid CSS selector");
    let fragment = Html::parse_fragment(raw_html);

    links.extend(
        fragment
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string),
    );
    raw_html.clear();
}

// Checks if a link target has an http or https scheme
//
// We skip:
// - empty hrefs
// - relative links (docs/setup.md, ../README.md)
// - fragments (#installation)
// - mailto:, tel:, javascript:, ftp:, ...
//
// Only the scheme matters here. A target like http://example.com:99999/ is
// not a valid URL, but it is still an http link and must be checked (and
// reported), not silently dropped.
fn is_http_link(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        // No scheme at all: relative path, fragment, empty string
        Err(ParseError::RelativeUrlWithoutBase) => false,
        // Has a scheme but the rest is malformed
        Err(_) => scheme_of(href).is_some_and(|scheme| {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }),
    }
}

// The text before the first ':' when it looks like a URL scheme
fn scheme_of(href: &str) -> Option<&str> {
    let (scheme, _) = href.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an Event?
//    - pulldown-cmark doesn't build a tree; it hands out events as it reads
//    - Event::Start(Tag::Link(..)) = a link begins, with its destination
//    - Event::Html = a piece of raw HTML copied from the document
//
// 2. What does retain do?
//    - Keeps the items for which the closure returns true, in order
//    - It filters the Vec in place, no new allocation
//
// 3. Why `continue` in the Html arm?
//    - Every other event flushes the buffered HTML first
//    - Skipping the flush for Html events is what lets a multi-line HTML
//      block be parsed as one piece
//
// 4. What is bool::then_some?
//    - true.then_some(x) is Some(x), false.then_some(x) is None
// -----------------------------------------------------------------------------
