//! Table-of-contents extraction from rendered HTML.
//!
//! Walks `<h1>`–`<h3>` headings in the rendered body, gives each an `id`
//! derived from its text (percent-encoded, the way a URL fragment would
//! be), and builds the collapsible sidebar listing: level-2 headings are
//! the roots, level-3 headings nest under their preceding level-2 parent.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left verbatim in anchor ids (unreserved set plus `/`).
const ANCHOR_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// One heading in the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Plain text of the heading (inline tags stripped).
    pub text: String,
    /// Anchor id injected into the heading element.
    pub id: String,
    /// Heading level (1–3).
    pub level: u8,
    /// Level-3 children of a level-2 entry.
    pub children: Vec<TocEntry>,
}

/// Extract the TOC and return the HTML with `id` attributes injected.
#[must_use]
pub fn extract_toc(html: &str) -> (Vec<TocEntry>, String) {
    let mut toc: Vec<TocEntry> = Vec::new();
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    while let Some((level, open_start, open_end)) = next_heading_open(rest) {
        let close_tag = format!("</h{level}>");
        let Some(close_offset) = rest[open_end..].find(&close_tag) else {
            break;
        };
        let inner = &rest[open_end..open_end + close_offset];
        let text = strip_tags(inner).trim().to_owned();

        // Everything before the heading passes through untouched
        output.push_str(&rest[..open_start]);

        if text.is_empty() {
            // Keep an empty heading as-is, skip it in the TOC
            output.push_str(&rest[open_start..open_end + close_offset + close_tag.len()]);
        } else {
            let id = utf8_percent_encode(&text, ANCHOR_SET).to_string();
            write!(output, r#"<h{level} id="{id}">{inner}{close_tag}"#).unwrap();

            let entry = TocEntry {
                text,
                id,
                level,
                children: Vec::new(),
            };
            match level {
                3 => match toc.last_mut() {
                    Some(parent) if parent.level == 2 => parent.children.push(entry),
                    _ => toc.push(entry),
                },
                _ => toc.push(entry),
            }
        }

        rest = &rest[open_end + close_offset + close_tag.len()..];
    }

    output.push_str(rest);
    (toc, output)
}

/// Find the next `<h1>`–`<h3>` opening tag; returns (level, start, end).
fn next_heading_open(html: &str) -> Option<(u8, usize, usize)> {
    let mut search_from = 0;
    loop {
        let pos = html[search_from..].find("<h")?;
        let start = search_from + pos;
        let bytes = html.as_bytes();

        let level = match bytes.get(start + 2) {
            Some(b'1') => 1,
            Some(b'2') => 2,
            Some(b'3') => 3,
            _ => {
                search_from = start + 2;
                continue;
            }
        };
        // Must be a real tag boundary: `<h2>` or `<h2 ...>`
        match bytes.get(start + 3) {
            Some(b'>') => return Some((level, start, start + 4)),
            Some(b' ') => {
                let close = html[start..].find('>')?;
                return Some((level, start, start + close + 1));
            }
            _ => search_from = start + 3,
        }
    }
}

/// Strip inline HTML tags, keeping text content only.
fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Render the sidebar listing. Level-2 entries are the roots; entries with
/// children get a toggle and a collapsed sublist.
#[must_use]
pub fn toc_html(toc: &[TocEntry]) -> String {
    if toc.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<ul class="toc-list">"#);
    for entry in toc.iter().filter(|e| e.level == 2) {
        if entry.children.is_empty() {
            write!(
                html,
                r##"<li class="toc-item toc-level-2"><a href="#{}" class="toc-link">{}</a></li>"##,
                entry.id, entry.text
            )
            .unwrap();
        } else {
            write!(
                html,
                r##"<li class="toc-item toc-level-2"><div class="toc-h2-wrapper"><a href="#{}" class="toc-link">{}</a><span class="toc-toggle-icon" onclick="toggleChildren(this)">▶</span></div><ul class="toc-sublist collapsed">"##,
                entry.id, entry.text
            )
            .unwrap();
            for child in &entry.children {
                write!(
                    html,
                    r##"<li class="toc-item toc-level-3"><a href="#{}" class="toc-link">{}</a></li>"##,
                    child.id, child.text
                )
                .unwrap();
            }
            html.push_str("</ul></li>");
        }
    }
    html.push_str("</ul>");
    html
}
