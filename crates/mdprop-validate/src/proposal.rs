//! Proposal outline validation.
//!
//! A proposal must carry the four core sections and the document metadata,
//! quote an explicit price, and give a schedule. Topics that belong in a
//! statement of work rather than a sales proposal are sometimes legitimate,
//! so they are flagged as warnings and never fail the run.

use std::sync::LazyLock;

use regex::Regex;

use crate::blocks::check_blocks;

/// The four core sections, matched as keywords on heading lines.
const REQUIRED_SECTIONS: [(&str, &str); 4] = [
    ("Background & Objectives", "Background"),
    ("Solution Design", "Solution"),
    ("Investment Budget", "Budget"),
    ("Implementation Timeline", "Timeline"),
];

/// Topics a sales proposal should not drift into.
const DISCOURAGED_TOPICS: [&str; 9] = [
    "Technical Architecture",
    "Database Design",
    "Interface Design",
    "Technology Stack",
    "ROI Analysis",
    "Payback Period",
    "After-sales Service",
    "Warranty",
    "Appendix",
];

/// An explicit price figure: a currency sign followed by an amount.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$€£¥][\d,]+(?:\.\d+)?").unwrap());

/// A schedule duration: "6 weeks", "3 months", "Week 1-2".
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+\s*(?:weeks?|months?)|weeks?\s*\d)").unwrap());

/// Heading lines (`## ...`).
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+(.+)$").unwrap());

/// Result of [`validate_proposal`]. Issues fail the document; warnings are
/// advisory.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    /// Sections that were found, by display name.
    pub present_sections: Vec<String>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate a proposal document against the fixed outline.
#[must_use]
pub fn validate_proposal(markdown: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let headings: Vec<String> = HEADING_RE
        .captures_iter(markdown)
        .map(|c| c[1].to_owned())
        .collect();

    for (display, keyword) in REQUIRED_SECTIONS {
        if headings.iter().any(|h| h.contains(keyword)) {
            report.present_sections.push(display.to_owned());
        } else {
            report
                .issues
                .push(format!("missing core section: {display}"));
        }
    }

    let drifted: Vec<&str> = DISCOURAGED_TOPICS
        .into_iter()
        .filter(|topic| markdown.contains(topic))
        .collect();
    if !drifted.is_empty() {
        report.warnings.push(format!(
            "possibly out-of-scope content: {} (confirm each is really needed)",
            drifted.join(", ")
        ));
    }

    if markdown.contains("{{COMPANY_NAME}}") {
        report.warnings.push(
            "placeholder {{COMPANY_NAME}} is still present; replace it with the actual company"
                .to_owned(),
        );
    } else if !markdown.contains("**Prepared by:**") {
        report
            .warnings
            .push("missing issuer metadata (**Prepared by:** line)".to_owned());
    }

    if !PRICE_RE.is_match(markdown) {
        report
            .issues
            .push("missing an explicit price figure (e.g. $120,000)".to_owned());
    }

    if !DURATION_RE.is_match(markdown) {
        report
            .issues
            .push("missing an implementation duration (weeks/months)".to_owned());
    }

    let blocks = check_blocks(markdown);
    for issue in &blocks.issues {
        report.warnings.push(issue.describe());
    }

    report
}
