//! Marker comment syntax.
//!
//! Two marker families appear in documents:
//!
//! - **Placeholder markers** (`<!-- SVG-PLACEHOLDER-3 -->`) stand in for an
//!   extracted diagram block between extraction and rendering, within a
//!   single `convert` run.
//! - **Pending markers** delimit a deferred diagram span awaiting external
//!   generation. A START/END pair is tagged with the kind, the sequence id,
//!   and the session id:
//!   `<!-- SVG-PENDING-FLOWCHART-START:id=2,session=a1b2c3 -->`.
//!
//! An earlier tool generation emitted pending markers without the
//! `id=,session=` suffix; those are detected (for diagnostics) but never
//! produced.

use std::sync::LazyLock;

use regex::Regex;

use crate::kind::DiagramKind;
use crate::session::SessionId;

/// Session-scoped pending START markers, capturing (tag, id, session).
pub(crate) static PENDING_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- SVG-PENDING-([A-Z]+)-START:id=(\d+),session=([0-9a-f]{6}) -->").unwrap()
});

/// Unscoped pending markers from the previous marker format.
pub(crate) static LEGACY_PENDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- SVG-PENDING-([A-Z]+)-START -->").unwrap());

/// The `data-raw` attribute inside a pending span.
pub(crate) static DATA_RAW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-raw="([^"]*)""#).unwrap());

/// Placeholder comment for an extracted diagram block.
#[must_use]
pub fn placeholder_comment(index: usize) -> String {
    format!("<!-- SVG-PLACEHOLDER-{index} -->")
}

/// Identity of one pending span: kind tag, sequence id, session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMarker {
    pub kind: DiagramKind,
    pub id: usize,
    pub session: SessionId,
}

impl PendingMarker {
    /// The START comment opening this span.
    #[must_use]
    pub fn start_comment(&self) -> String {
        format!(
            "<!-- SVG-PENDING-{}-START:id={},session={} -->",
            self.kind.marker_tag(),
            self.id,
            self.session
        )
    }

    /// The END comment closing this span.
    #[must_use]
    pub fn end_comment(&self) -> String {
        format!(
            "<!-- SVG-PENDING-{}-END:id={},session={} -->",
            self.kind.marker_tag(),
            self.id,
            self.session
        )
    }
}
