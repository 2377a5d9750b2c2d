//! Cache-backed substitution: splice generated markup over pending spans.
//!
//! Mutation is all-or-nothing at the file level. Every referenced cache
//! file is checked before the document is touched; a single missing file
//! aborts the run with the full missing list and the document byte-
//! identical to its pre-substitution state. Unmatched markers are the one
//! tolerated irregularity: they are skipped with a warning and processing
//! continues.

use std::path::{Path, PathBuf};

use crate::cache::DiagramCache;
use crate::export::{PendingSet, SCHEMA_VERSION};
use crate::marker::{LEGACY_PENDING_RE, PENDING_START_RE, PendingMarker};

/// Substitution errors.
#[derive(Debug, thiserror::Error)]
pub enum SubstituteError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid side file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "unsupported side-file schema version {found} (expected {SCHEMA_VERSION}); \
         re-run the conversion with this tool version"
    )]
    SchemaVersion { found: u32 },

    #[error("rendered document not found: {path}")]
    DocumentMissing { path: PathBuf },

    #[error("missing cache file(s), nothing substituted: {}", format_paths(missing))]
    MissingCache { missing: Vec<PathBuf> },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a successful substitution run.
#[derive(Clone, Debug, Default)]
pub struct SubstituteOutcome {
    /// The rewritten document.
    pub html_path: PathBuf,
    /// Spans replaced with cache contents.
    pub replaced: usize,
    /// How many of those were UI (HTML fragment) replacements.
    pub ui_count: usize,
    /// Items skipped because their marker span was not found intact.
    pub skipped: Vec<usize>,
    /// Post-substitution leftovers from this session (should be zero).
    pub leftover_markers: usize,
    /// Markers in the pre-session (unscoped) format found in the document.
    pub legacy_markers: usize,
    pub warnings: Vec<String>,
}

/// Apply a side file: verify the cache, splice every span, clean up.
///
/// # Errors
///
/// Fails without touching the document when the side file is unreadable or
/// has the wrong schema version, when the rendered document is missing, or
/// when any referenced cache file does not exist.
pub fn apply_side_file(side_file: &Path) -> Result<SubstituteOutcome, SubstituteError> {
    let set: PendingSet = serde_json::from_str(&std::fs::read_to_string(side_file)?)?;
    if set.schema_version != SCHEMA_VERSION {
        return Err(SubstituteError::SchemaVersion {
            found: set.schema_version,
        });
    }

    let base_dir = side_file.parent().unwrap_or_else(|| Path::new("."));
    let html_path = base_dir.join(&set.html_file);
    if !html_path.is_file() {
        return Err(SubstituteError::DocumentMissing { path: html_path });
    }

    // Dependency check before any mutation: enumerate every missing cache
    // file in one pass so the operator sees the full list at once.
    let cache = DiagramCache::for_document(&base_dir.join(&set.document));
    let entries: Vec<PathBuf> = set
        .placeholders
        .iter()
        .map(|item| cache.entry_path(&set.session_id, item.id, item.kind))
        .collect();
    let missing: Vec<PathBuf> = entries.iter().filter(|p| !p.is_file()).cloned().collect();
    if !missing.is_empty() {
        return Err(SubstituteError::MissingCache { missing });
    }

    let mut html = std::fs::read_to_string(&html_path)?;
    let mut outcome = SubstituteOutcome {
        html_path: html_path.clone(),
        ..SubstituteOutcome::default()
    };

    for (item, entry) in set.placeholders.iter().zip(&entries) {
        let marker = PendingMarker {
            kind: item.kind,
            id: item.id,
            session: set.session_id.clone(),
        };
        let start = marker.start_comment();
        let end = marker.end_comment();

        let Some(span) = find_span(&html, &start, &end) else {
            outcome.warnings.push(format!(
                "span for placeholder #{} not found intact, skipped",
                item.id
            ));
            outcome.skipped.push(item.id);
            continue;
        };

        let replacement = std::fs::read_to_string(entry)?;
        html.replace_range(span, &replacement);
        outcome.replaced += 1;
        if item.kind.cache_extension() == "html" {
            outcome.ui_count += 1;
        }
    }

    // Post-condition scan. Leftovers from this session mean the side file
    // and the document have drifted apart; markers in the old unscoped
    // format are from another tool generation and merely flagged.
    outcome.leftover_markers = PENDING_START_RE
        .captures_iter(&html)
        .filter(|c| &c[3] == set.session_id.as_str())
        .count();
    if outcome.leftover_markers > 0 {
        outcome.warnings.push(format!(
            "{} pending marker(s) of session {} remain after substitution",
            outcome.leftover_markers, set.session_id
        ));
    }
    outcome.legacy_markers = LEGACY_PENDING_RE.find_iter(&html).count();
    if outcome.legacy_markers > 0 {
        tracing::warn!(
            "{} legacy unscoped pending marker(s) left in {}",
            outcome.legacy_markers,
            html_path.display()
        );
    }

    std::fs::write(&html_path, &html)?;

    if let Err(e) = cache.remove_session(&set.session_id) {
        tracing::warn!("failed to remove session cache: {e}");
        outcome
            .warnings
            .push(format!("failed to remove session cache: {e}"));
    }

    Ok(outcome)
}

/// Byte range of `start`..`end` inclusive, or `None` when either marker is
/// absent or out of order.
fn find_span(html: &str, start: &str, end: &str) -> Option<std::ops::Range<usize>> {
    let start_pos = html.find(start)?;
    let end_offset = html[start_pos..].find(end)?;
    Some(start_pos..start_pos + end_offset + end.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_pending;
    use crate::kind::DiagramKind;
    use crate::render::{RenderMode, SvgPalette, render_diagram};
    use crate::session::SessionId;

    struct Fixture {
        tmp: tempfile::TempDir,
        html_path: PathBuf,
        side_file: PathBuf,
        session: SessionId,
    }

    /// Render a two-diagram deferred document, export it, and optionally
    /// drop cache files for the given (id, content) pairs.
    fn fixture(cache_entries: &[(usize, DiagramKind, &str)]) -> Fixture {
        let tmp = tempfile::TempDir::new().unwrap();
        let session = SessionId::parse("abc123").unwrap();
        let palette = SvgPalette::default();

        let html = format!(
            "<html><body>\n<p>lead</p>\n{}\n<p>mid</p>\n{}\n<p>tail</p>\n</body></html>",
            render_diagram(
                DiagramKind::Architecture,
                "┌─┐\n│A│\n└─┘",
                1,
                &session,
                RenderMode::Deferred,
                &palette
            ),
            render_diagram(
                DiagramKind::Ui,
                "[ OK ]",
                2,
                &session,
                RenderMode::Deferred,
                &palette
            ),
        );
        let html_path = tmp.path().join("proposal.html");
        std::fs::write(&html_path, html).unwrap();

        let outcome = export_pending(&html_path, None).unwrap();

        let cache = DiagramCache::for_document(&html_path);
        cache.create_session(&session).unwrap();
        for (id, kind, content) in cache_entries {
            std::fs::write(cache.entry_path(&session, *id, *kind), content).unwrap();
        }

        Fixture {
            html_path,
            side_file: outcome.side_file,
            session,
            tmp,
        }
    }

    #[test]
    fn test_full_substitution() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg>arch</svg>"),
            (2, DiagramKind::Ui, "<div>mockup</div>"),
        ]);

        let outcome = apply_side_file(&fx.side_file).unwrap();
        assert_eq!(outcome.replaced, 2);
        assert_eq!(outcome.ui_count, 1);
        assert_eq!(outcome.leftover_markers, 0);
        assert!(outcome.skipped.is_empty());

        let html = std::fs::read_to_string(&fx.html_path).unwrap();
        assert!(html.contains("<svg>arch</svg>"));
        assert!(html.contains("<div>mockup</div>"));
        assert!(!html.contains("SVG-PENDING"));
        // Insertions sit in original order between the untouched prose
        let arch = html.find("<svg>arch</svg>").unwrap();
        let ui = html.find("<div>mockup</div>").unwrap();
        assert!(arch < ui);
        assert!(html.find("<p>lead</p>").unwrap() < arch);
        assert!(html.find("<p>tail</p>").unwrap() > ui);
    }

    #[test]
    fn test_session_cache_removed_on_success() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg/>"),
            (2, DiagramKind::Ui, "<div/>"),
        ]);

        apply_side_file(&fx.side_file).unwrap();

        let cache = DiagramCache::for_document(&fx.html_path);
        assert!(!cache.session_dir(&fx.session).exists());
        assert!(!fx.tmp.path().join(".mdprop-cache/proposal").exists());
    }

    #[test]
    fn test_missing_cache_aborts_without_mutation() {
        // Only one of the two cache files is present
        let fx = fixture(&[(1, DiagramKind::Architecture, "<svg/>")]);
        let before = std::fs::read_to_string(&fx.html_path).unwrap();

        let err = apply_side_file(&fx.side_file).unwrap_err();
        match &err {
            SubstituteError::MissingCache { missing } => {
                assert_eq!(missing.len(), 1);
                assert!(missing[0].ends_with("2.html"));
            }
            other => panic!("expected MissingCache, got {other:?}"),
        }

        // Document untouched, cache entries untouched
        let after = std::fs::read_to_string(&fx.html_path).unwrap();
        assert_eq!(before, after);
        let cache = DiagramCache::for_document(&fx.html_path);
        assert!(cache.entry_path(&fx.session, 1, DiagramKind::Architecture).is_file());
    }

    #[test]
    fn test_identity_cache_restores_prose_exactly() {
        // Cache contents equal to a fixed replacement leave surrounding
        // regions byte-identical to the pre-deferred document
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "X"),
            (2, DiagramKind::Ui, "Y"),
        ]);

        apply_side_file(&fx.side_file).unwrap();
        let html = std::fs::read_to_string(&fx.html_path).unwrap();
        assert_eq!(
            html,
            "<html><body>\n<p>lead</p>\nX\n<p>mid</p>\nY\n<p>tail</p>\n</body></html>"
        );
    }

    #[test]
    fn test_broken_span_skipped_with_warning() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg/>"),
            (2, DiagramKind::Ui, "<div/>"),
        ]);

        // Corrupt the first span's END marker
        let html = std::fs::read_to_string(&fx.html_path).unwrap();
        let end = PendingMarker {
            kind: DiagramKind::Architecture,
            id: 1,
            session: fx.session.clone(),
        }
        .end_comment();
        std::fs::write(&fx.html_path, html.replace(&end, "<!-- gone -->")).unwrap();

        let outcome = apply_side_file(&fx.side_file).unwrap();
        assert_eq!(outcome.replaced, 1);
        assert_eq!(outcome.skipped, vec![1]);
        assert!(outcome.warnings.iter().any(|w| w.contains("#1")));
        // The surviving START of the broken span is reported as leftover
        assert_eq!(outcome.leftover_markers, 1);
    }

    #[test]
    fn test_legacy_markers_tolerated() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg/>"),
            (2, DiagramKind::Ui, "<div/>"),
        ]);

        let mut html = std::fs::read_to_string(&fx.html_path).unwrap();
        html.push_str("\n<!-- SVG-PENDING-FLOWCHART-START -->old<!-- SVG-PENDING-FLOWCHART-END -->");
        std::fs::write(&fx.html_path, html).unwrap();

        let outcome = apply_side_file(&fx.side_file).unwrap();
        assert_eq!(outcome.replaced, 2);
        assert_eq!(outcome.legacy_markers, 1);
        assert_eq!(outcome.leftover_markers, 0);
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg/>"),
            (2, DiagramKind::Ui, "<div/>"),
        ]);

        let json = std::fs::read_to_string(&fx.side_file)
            .unwrap()
            .replace("\"schema_version\": 2", "\"schema_version\": 1");
        std::fs::write(&fx.side_file, json).unwrap();

        let err = apply_side_file(&fx.side_file).unwrap_err();
        assert!(matches!(err, SubstituteError::SchemaVersion { found: 1 }));
    }

    #[test]
    fn test_missing_document_rejected() {
        let fx = fixture(&[
            (1, DiagramKind::Architecture, "<svg/>"),
            (2, DiagramKind::Ui, "<div/>"),
        ]);
        std::fs::remove_file(&fx.html_path).unwrap();

        let err = apply_side_file(&fx.side_file).unwrap_err();
        assert!(matches!(err, SubstituteError::DocumentMissing { .. }));
    }
}
