//! Diagram kind enumeration.

use serde::{Deserialize, Serialize};

/// The closed set of diagram categories a fenced block can declare.
///
/// The kind selects the rendering template in immediate mode, the marker tag
/// in deferred mode, and the cache-file extension an external collaborator
/// must use. Unrecognized kind text maps to [`DiagramKind::Generic`] rather
/// than erroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Architecture,
    Flowchart,
    Ui,
    Timeline,
    #[serde(rename = "diagram")]
    Generic,
}

impl DiagramKind {
    /// Parse a kind name exactly (`architecture`, `flowchart`, `ui`,
    /// `timeline`, `diagram`).
    ///
    /// Returns `None` for anything else; use [`Self::from_fence`] for the
    /// lenient fence-tag form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "architecture" => Some(Self::Architecture),
            "flowchart" => Some(Self::Flowchart),
            "ui" => Some(Self::Ui),
            "timeline" => Some(Self::Timeline),
            "diagram" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Parse a fence info string (`ascii:<kind>` or the `diagram:<kind>`
    /// alias).
    ///
    /// Returns `None` when the fence does not declare a diagram block at
    /// all. A declared but unknown kind falls back to `Generic` so that a
    /// typo in the kind never drops a diagram from the pipeline.
    #[must_use]
    pub fn from_fence(info: &str) -> Option<Self> {
        let kind = info
            .strip_prefix("ascii:")
            .or_else(|| info.strip_prefix("diagram:"))?;
        Some(Self::parse(kind).unwrap_or(Self::Generic))
    }

    /// Lowercase kind name used in fence tags and the side file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Flowchart => "flowchart",
            Self::Ui => "ui",
            Self::Timeline => "timeline",
            Self::Generic => "diagram",
        }
    }

    /// Uppercase tag embedded in pending START/END marker comments.
    #[must_use]
    pub fn marker_tag(self) -> &'static str {
        match self {
            Self::Architecture => "ARCHITECTURE",
            Self::Flowchart => "FLOWCHART",
            Self::Ui => "UI",
            Self::Timeline => "TIMELINE",
            Self::Generic => "DIAGRAM",
        }
    }

    /// Parse the uppercase marker tag back into a kind.
    #[must_use]
    pub fn from_marker_tag(tag: &str) -> Option<Self> {
        match tag {
            "ARCHITECTURE" => Some(Self::Architecture),
            "FLOWCHART" => Some(Self::Flowchart),
            "UI" => Some(Self::Ui),
            "TIMELINE" => Some(Self::Timeline),
            "DIAGRAM" => Some(Self::Generic),
            _ => None,
        }
    }

    /// Cache-file extension an external collaborator must produce.
    ///
    /// UI mockups are delivered as HTML fragments; every other kind is an
    /// SVG drawing.
    #[must_use]
    pub fn cache_extension(self) -> &'static str {
        match self {
            Self::Ui => "html",
            _ => "svg",
        }
    }

    /// Human-readable label for progress messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Architecture => "architecture diagram",
            Self::Flowchart => "flowchart",
            Self::Ui => "UI mockup",
            Self::Timeline => "timeline",
            Self::Generic => "diagram",
        }
    }
}
