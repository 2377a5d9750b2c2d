//! Diagram placeholder lifecycle for mdprop.
//!
//! Markdown proposals carry ASCII diagrams in fenced blocks tagged
//! ```` ```ascii:<kind> ````. This crate owns every stage of their journey:
//!
//! 1. [`extract_diagrams`]: replace each block with a numbered placeholder
//!    marker and record its kind and raw text.
//! 2. [`render_diagram`]: turn a recorded block into final markup
//!    (templated SVG or a monospace passthrough), or, in deferred mode,
//!    into an inert pending span for out-of-band generation.
//! 3. [`export_pending`]: collect pending spans from a rendered document
//!    into a JSON side file for an external collaborator.
//! 4. [`apply_side_file`]: splice externally produced cache files back over
//!    the pending spans and tear down the session cache directory.
//!
//! Concurrent runs over the same document are isolated by a random
//! [`SessionId`] that namespaces both the markers and the cache directory.

mod cache;
mod classify;
mod escape;
mod export;
mod extract;
mod kind;
mod marker;
mod render;
mod session;
mod substitute;

pub use cache::{CACHE_ROOT_DIR, DiagramCache};
pub use classify::{Structure, classify, contains_box_drawing};
pub use escape::{escape_attr, unescape_html};
pub use export::{
    ExportError, ExportOutcome, PendingItem, PendingSet, SCHEMA_VERSION, ScanResult,
    export_pending, scan_pending,
};
pub use extract::{ExtractedDiagram, Extraction, extract_diagrams};
pub use kind::DiagramKind;
pub use marker::{PendingMarker, placeholder_comment};
pub use render::{RenderMode, SvgPalette, render_diagram};
pub use session::SessionId;
pub use substitute::{SubstituteError, SubstituteOutcome, apply_side_file};
