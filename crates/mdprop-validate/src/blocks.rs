//! Diagram-block tagging audit.
//!
//! Scans fenced code blocks for box-drawing characters and reports blocks
//! that look like ASCII diagrams but are not tagged `ascii:<kind>`. An
//! untagged block goes through conversion as plain code and never reaches
//! the diagram pipeline.

use std::sync::LazyLock;

use regex::Regex;

use mdprop_diagrams::{DiagramKind, contains_box_drawing};

/// Any fenced code block: info string and body.
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```([^`\n]*)\n(.*?)```").unwrap());

/// One problematic code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIssue {
    /// 1-based line number of the opening fence.
    pub line: usize,
    /// The fence info string as written (possibly empty).
    pub info: String,
    /// What is wrong with the tag.
    pub problem: BlockProblem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockProblem {
    /// Tagged `ascii` but missing the `:<kind>` suffix.
    MissingKind,
    /// Not tagged as a diagram at all.
    Untagged,
}

impl BlockIssue {
    /// One-line description for the report.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.problem {
            BlockProblem::MissingKind => format!(
                "line {}: tagged 'ascii' but missing a kind (use ascii:architecture/flowchart/ui/timeline/diagram)",
                self.line
            ),
            BlockProblem::Untagged => format!(
                "line {}: diagram-looking block without an ascii: tag (current: '{}')",
                self.line, self.info
            ),
        }
    }
}

/// Result of [`check_blocks`].
#[derive(Clone, Debug, Default)]
pub struct BlockReport {
    /// Blocks containing box-drawing characters.
    pub checked: usize,
    /// Correctly tagged blocks, with their kinds.
    pub tagged: Vec<(usize, DiagramKind)>,
    pub issues: Vec<BlockIssue>,
}

impl BlockReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Audit every fenced code block containing box-drawing characters.
#[must_use]
pub fn check_blocks(markdown: &str) -> BlockReport {
    let mut report = BlockReport::default();

    for captures in CODE_FENCE_RE.captures_iter(markdown) {
        let info = captures[1].trim().to_owned();
        let body = &captures[2];
        if !contains_box_drawing(body) {
            continue;
        }
        report.checked += 1;

        let whole = captures.get(0).unwrap();
        let line = markdown[..whole.start()].matches('\n').count() + 1;

        if let Some(kind) = DiagramKind::from_fence(&info) {
            report.tagged.push((line, kind));
        } else if info == "ascii" || info == "diagram" {
            report.issues.push(BlockIssue {
                line,
                info,
                problem: BlockProblem::MissingKind,
            });
        } else {
            report.issues.push(BlockIssue {
                line,
                info,
                problem: BlockProblem::Untagged,
            });
        }
    }

    report
}
