//! Proposal structure validation.
//!
//! Keyword and regex presence checks over a Markdown proposal: the fixed
//! outline, discouraged topics, metadata lines, price and schedule figures,
//! and diagram-block tagging. Nothing here parses Markdown properly; these
//! are the same shallow scans an editor would do by eye.

mod blocks;
mod proposal;

pub use blocks::{BlockIssue, BlockProblem, BlockReport, check_blocks};
pub use proposal::{ValidationReport, validate_proposal};
