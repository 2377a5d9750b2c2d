//! The document conversion pipeline.
//!
//! One pass, file to file: extract diagram blocks, scan front matter,
//! render the body with `pulldown-cmark`, carve out the TOC, wrap in the
//! themed template, then replace each diagram placeholder with its
//! dispatched markup. A fresh session id is generated per run and its cache
//! directory is created up front so an external collaborator always has a
//! place to deliver into.

use std::path::{Path, PathBuf};

use pulldown_cmark::{Options, Parser, html};

use mdprop_diagrams::{
    DiagramCache, DiagramKind, RenderMode, SessionId, SvgPalette, extract_diagrams,
    placeholder_comment, render_diagram,
};
use mdprop_theme::{Theme, ThemeError};

use crate::frontmatter::scan_front_matter;
use crate::template::render_page;
use crate::toc::{extract_toc, toc_html};

/// Conversion errors.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Theme(#[from] ThemeError),

    #[error("document not found: {path}")]
    DocumentMissing { path: PathBuf },
}

/// Options for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// Theme key (built-in or from `theme_dir`).
    pub theme: String,
    /// Directory of additional theme files.
    pub theme_dir: Option<PathBuf>,
    /// Immediate templated rendering or deferred pending spans.
    pub mode: RenderMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            theme: mdprop_theme::DEFAULT_THEME.to_owned(),
            theme_dir: None,
            mode: RenderMode::Immediate,
        }
    }
}

/// Summary returned to the CLI after a successful conversion.
#[derive(Clone, Debug)]
pub struct ConvertSummary {
    pub session: SessionId,
    pub cache_dir: PathBuf,
    pub html_path: PathBuf,
    pub title: String,
    /// Display name of the theme that was applied.
    pub theme_name: String,
    /// (index, kind) of every extracted diagram, in document order.
    pub diagrams: Vec<(usize, DiagramKind)>,
    pub mode: RenderMode,
    /// Size of the written HTML file in bytes.
    pub output_bytes: u64,
}

/// Convert one Markdown document to themed HTML next to it.
///
/// # Errors
///
/// Fails when the document is missing or unreadable, the theme cannot be
/// loaded, or the output cannot be written. The input file is never
/// modified.
pub fn convert_document(
    md_path: &Path,
    options: &ConvertOptions,
) -> Result<ConvertSummary, ConvertError> {
    if !md_path.is_file() {
        return Err(ConvertError::DocumentMissing {
            path: md_path.to_owned(),
        });
    }

    let theme = Theme::load(&options.theme, options.theme_dir.as_deref())?;
    let markdown = std::fs::read_to_string(md_path)?;

    let session = SessionId::generate();
    let cache = DiagramCache::for_document(md_path);
    let cache_dir = cache.create_session(&session)?;
    tracing::debug!("session {session}, cache at {}", cache_dir.display());

    // Diagram blocks leave the document before markdown parsing so their
    // box-drawing art is never mistaken for markup.
    let extraction = extract_diagrams(&markdown);
    let front = scan_front_matter(&extraction.document);

    let mut body = String::with_capacity(front.body.len() * 2);
    let parser = Parser::new_ext(&front.body, parser_options());
    html::push_html(&mut body, parser);

    let (toc, body) = extract_toc(&body);
    let sidebar = toc_html(&toc);

    let mut page = render_page(&theme, &front.title, &front.meta, &sidebar, &body);

    let palette = SvgPalette {
        primary: theme.colors.primary.clone(),
        secondary: theme.colors.secondary.clone(),
    };
    for diagram in &extraction.diagrams {
        let markup = render_diagram(
            diagram.kind,
            &diagram.source,
            diagram.index,
            &session,
            options.mode,
            &palette,
        );
        page = page.replace(&placeholder_comment(diagram.index), &markup);
    }

    let html_path = md_path.with_extension("html");
    std::fs::write(&html_path, &page)?;

    Ok(ConvertSummary {
        session,
        cache_dir,
        title: front.title,
        theme_name: theme.name,
        diagrams: extraction
            .diagrams
            .iter()
            .map(|d| (d.index, d.kind))
            .collect(),
        mode: options.mode,
        output_bytes: page.len() as u64,
        html_path,
    })
}

/// Markdown parser options: tables, strikethrough, and task lists.
fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdprop_diagrams::{apply_side_file, export_pending, scan_pending};

    const DOC: &str = "\
# Upgrade Proposal

**Prepared by:** Acme Consulting
**Date:** 2026-08-01
**Version:** 1.0

---

## Background

Some *emphasis* and a [link](https://example.com).

```ascii:architecture
┌────────┐
│  Core  │
└────────┘
```

## Timeline

| Phase | Weeks |
|-------|-------|
| Build | 1-6   |

```ascii:flowchart
A → B
```
";

    fn write_doc(dir: &Path) -> PathBuf {
        let path = dir.join("proposal.md");
        std::fs::write(&path, DOC).unwrap();
        path
    }

    #[test]
    fn test_immediate_conversion_end_to_end() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = write_doc(tmp.path());

        let summary = convert_document(&md_path, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.title, "Upgrade Proposal");
        assert_eq!(summary.theme_name, "Purple");
        assert_eq!(
            summary.diagrams,
            vec![(1, DiagramKind::Architecture), (2, DiagramKind::Flowchart)]
        );
        assert!(summary.cache_dir.is_dir());

        let page = std::fs::read_to_string(&summary.html_path).unwrap();
        assert!(page.contains("<title>Upgrade Proposal</title>"));
        assert!(page.contains("Acme Consulting"));
        // Markdown went through the library renderer
        assert!(page.contains("<em>emphasis</em>"));
        assert!(page.contains("<table>"));
        // Both diagrams rendered inline, no markers remain
        assert!(page.contains("<svg"));
        assert!(!page.contains("SVG-PLACEHOLDER"));
        assert!(!page.contains("SVG-PENDING"));
        // TOC anchors injected
        assert!(page.contains(r#"<h2 id="Background">"#));
        assert_eq!(summary.output_bytes, page.len() as u64);
    }

    #[test]
    fn test_deferred_conversion_emits_pending_spans() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = write_doc(tmp.path());

        let options = ConvertOptions {
            mode: RenderMode::Deferred,
            ..ConvertOptions::default()
        };
        let summary = convert_document(&md_path, &options).unwrap();

        let page = std::fs::read_to_string(&summary.html_path).unwrap();
        let scan = scan_pending(&page, None);
        assert_eq!(scan.session, Some(summary.session.clone()));
        assert_eq!(scan.items.len(), 2);
        assert_eq!(scan.items[0].raw_content, "┌────────┐\n│  Core  │\n└────────┘");
        assert_eq!(scan.items[1].raw_content, "A → B");
    }

    #[test]
    fn test_each_run_gets_fresh_session() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = write_doc(tmp.path());

        let first = convert_document(&md_path, &ConvertOptions::default()).unwrap();
        let second = convert_document(&md_path, &ConvertOptions::default()).unwrap();
        assert_ne!(first.session, second.session);
        // Both session cache directories coexist
        assert!(first.cache_dir.is_dir());
        assert!(second.cache_dir.is_dir());
    }

    #[test]
    fn test_missing_document() {
        let err =
            convert_document(Path::new("/nonexistent/x.md"), &ConvertOptions::default())
                .unwrap_err();
        assert!(matches!(err, ConvertError::DocumentMissing { .. }));
    }

    #[test]
    fn test_unknown_theme_fails_before_writing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = write_doc(tmp.path());

        let options = ConvertOptions {
            theme: "nope".to_owned(),
            ..ConvertOptions::default()
        };
        let err = convert_document(&md_path, &options).unwrap_err();
        assert!(matches!(err, ConvertError::Theme(ThemeError::NotFound { .. })));
        assert!(!tmp.path().join("proposal.html").exists());
    }

    #[test]
    fn test_deferred_lifecycle_end_to_end() {
        // convert (deferred) -> export -> external cache fill -> apply
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = write_doc(tmp.path());

        let options = ConvertOptions {
            mode: RenderMode::Deferred,
            ..ConvertOptions::default()
        };
        let summary = convert_document(&md_path, &options).unwrap();

        let export = export_pending(&summary.html_path, None).unwrap();
        assert_eq!(export.set.session_id, summary.session);
        assert_eq!(export.set.total, 2);

        // Play the external collaborator: one file per placeholder, named
        // as the side file dictates
        for item in &export.set.placeholders {
            std::fs::write(
                summary.cache_dir.join(&item.cache_file),
                format!("<svg data-diagram=\"{}\"></svg>", item.id),
            )
            .unwrap();
        }

        let outcome = apply_side_file(&export.side_file).unwrap();
        assert_eq!(outcome.replaced, 2);
        assert_eq!(outcome.leftover_markers, 0);

        let page = std::fs::read_to_string(&summary.html_path).unwrap();
        assert!(!page.contains("SVG-PENDING"));
        // Both insertions present, in original document order
        let first = page.find(r#"<svg data-diagram="1">"#).unwrap();
        let second = page.find(r#"<svg data-diagram="2">"#).unwrap();
        assert!(first < second);
        // The session cache is gone
        assert!(!summary.cache_dir.exists());
    }

    #[test]
    fn test_document_without_diagrams() {
        let tmp = tempfile::TempDir::new().unwrap();
        let md_path = tmp.path().join("plain.md");
        std::fs::write(&md_path, "# Plain\n\nNo diagrams here.\n").unwrap();

        let summary = convert_document(&md_path, &ConvertOptions::default()).unwrap();
        assert!(summary.diagrams.is_empty());
        let page = std::fs::read_to_string(&summary.html_path).unwrap();
        assert!(page.contains("No diagrams here."));
    }
}
