//! Pending-work export: collect deferred diagram spans into a side file.
//!
//! The side file is the contract with the external collaborator: a JSON
//! object enumerating every pending span of one session, each item carrying
//! the decoded raw text and the cache filename the collaborator must write.
//! Re-running export on an unmodified document produces identical content.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::escape::unescape_html;
use crate::kind::DiagramKind;
use crate::marker::{DATA_RAW_RE, PENDING_START_RE, PendingMarker};
use crate::session::SessionId;

/// Side-file schema version. Version 2 is the session-scoped marker format;
/// the unscoped version 1 format has no migration path and is rejected.
pub const SCHEMA_VERSION: u32 = 2;

/// One pending diagram awaiting external generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
    /// Decoded raw diagram text, exactly as extracted from the Markdown.
    pub raw_content: String,
    /// Filename the collaborator must create in the session cache directory.
    pub cache_file: String,
}

/// The side-file payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSet {
    #[serde(default)]
    pub schema_version: u32,
    pub session_id: SessionId,
    /// Source document name (`<stem>.md`).
    pub document: String,
    /// Rendered document name (`<stem>.html`), relative to the side file.
    pub html_file: String,
    pub total: usize,
    pub placeholders: Vec<PendingItem>,
}

impl PendingSet {
    /// Deterministic side-file name for a document/session pair.
    #[must_use]
    pub fn side_file_name(html_stem: &str, session: &SessionId) -> String {
        format!("{html_stem}.{session}.json")
    }
}

/// Result of scanning a rendered document for pending spans.
#[derive(Clone, Debug)]
pub struct ScanResult {
    /// Session the items belong to (`None` when no marker matched).
    pub session: Option<SessionId>,
    pub items: Vec<PendingItem>,
    pub warnings: Vec<String>,
}

/// Export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write side file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no exportable pending markers found in {path}")]
    NoPendingMarkers { path: PathBuf },
}

/// Outcome of [`export_pending`].
#[derive(Clone, Debug)]
pub struct ExportOutcome {
    pub set: PendingSet,
    pub side_file: PathBuf,
    pub warnings: Vec<String>,
}

/// Scan rendered HTML for pending spans belonging to one session.
///
/// The target session is `wanted` when given, otherwise the session of the
/// first START marker found. START markers without a matching END marker,
/// markers from other sessions, and spans missing their `data-raw`
/// attribute are skipped with a warning; partial exports are allowed.
#[must_use]
pub fn scan_pending(html: &str, wanted: Option<&SessionId>) -> ScanResult {
    let mut session: Option<SessionId> = wanted.cloned();
    let mut items = Vec::new();
    let mut warnings = Vec::new();
    let mut skipped_sessions = 0usize;

    for captures in PENDING_START_RE.captures_iter(html) {
        let tag = &captures[1];
        let Ok(id) = captures[2].parse::<usize>() else {
            warnings.push(format!("pending marker with unparsable id '{}'", &captures[2]));
            continue;
        };
        let Some(marker_session) = SessionId::parse(&captures[3]) else {
            continue;
        };

        let Some(kind) = DiagramKind::from_marker_tag(tag) else {
            warnings.push(format!("pending marker #{id} has unknown tag '{tag}', skipped"));
            continue;
        };

        match &session {
            None => session = Some(marker_session.clone()),
            Some(target) if *target != marker_session => {
                skipped_sessions += 1;
                continue;
            }
            Some(_) => {}
        }

        let marker = PendingMarker {
            kind,
            id,
            session: marker_session,
        };

        let start = captures.get(0).unwrap();
        let Some(end_offset) = html[start.end()..].find(&marker.end_comment()) else {
            warnings.push(format!(
                "pending marker #{id} ({tag}) has no matching END marker, skipped"
            ));
            continue;
        };
        let block = &html[start.end()..start.end() + end_offset];

        let Some(raw_captures) = DATA_RAW_RE.captures(block) else {
            warnings.push(format!(
                "pending marker #{id} ({tag}) carries no data-raw attribute, skipped"
            ));
            continue;
        };

        items.push(PendingItem {
            id,
            kind,
            raw_content: unescape_html(&raw_captures[1]),
            cache_file: format!("{id}.{}", kind.cache_extension()),
        });
    }

    if skipped_sessions > 0 {
        warnings.push(format!(
            "skipped {skipped_sessions} pending marker(s) from other sessions"
        ));
    }

    ScanResult {
        session,
        items,
        warnings,
    }
}

/// Export the pending spans of a rendered HTML document to its side file.
///
/// The side file lands next to the document as `<stem>.<session>.json`.
///
/// # Errors
///
/// Fails when the document cannot be read, when no exportable marker
/// exists, or when the side file cannot be written.
pub fn export_pending(
    html_path: &Path,
    wanted: Option<&SessionId>,
) -> Result<ExportOutcome, ExportError> {
    let html = std::fs::read_to_string(html_path)?;
    let scan = scan_pending(&html, wanted);

    let Some(session) = scan.session else {
        return Err(ExportError::NoPendingMarkers {
            path: html_path.to_owned(),
        });
    };
    if scan.items.is_empty() {
        return Err(ExportError::NoPendingMarkers {
            path: html_path.to_owned(),
        });
    }

    let stem = html_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let html_file = html_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document.html")
        .to_owned();

    let total = scan.items.len();
    let set = PendingSet {
        schema_version: SCHEMA_VERSION,
        session_id: session.clone(),
        document: format!("{stem}.md"),
        html_file,
        total,
        placeholders: scan.items,
    };

    let side_file = html_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(PendingSet::side_file_name(stem, &session));

    let mut json = serde_json::to_string_pretty(&set)?;
    json.push('\n');
    std::fs::write(&side_file, json)?;

    Ok(ExportOutcome {
        set,
        side_file,
        warnings: scan.warnings,
    })
}
