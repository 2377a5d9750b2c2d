//! Front-matter scanning for proposal documents.
//!
//! Proposals open with a title heading and bold metadata lines, optionally
//! closed off by a `---` separator:
//!
//! ```markdown
//! # Platform Upgrade Proposal
//!
//! **Prepared by:** Acme Consulting
//! **Date:** 2026-08-01
//! **Version:** 1.0
//!
//! ---
//!
//! Body starts here.
//! ```
//!
//! The separator only cuts the document when a metadata line precedes it;
//! a plain thematic break in a document without front matter stays part of
//! the body.

/// Metadata shown in the rendered page header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentMeta {
    pub prepared_by: String,
    pub date: String,
    pub version: String,
}

/// Result of [`scan_front_matter`].
#[derive(Clone, Debug)]
pub struct FrontMatter {
    /// Title from the first `# ` heading, or the default.
    pub title: String,
    pub meta: DocumentMeta,
    /// Markdown body to render (front matter stripped when present).
    pub body: String,
}

/// Title used when the document has no level-1 heading.
const DEFAULT_TITLE: &str = "Proposal";

/// Strip the bold wrapper and whitespace off a metadata value.
fn clean_value(value: &str) -> String {
    value.trim().trim_end_matches('*').trim().to_owned()
}

/// Scan title and metadata, and split the body from the front matter.
#[must_use]
pub fn scan_front_matter(markdown: &str) -> FrontMatter {
    let lines: Vec<&str> = markdown.lines().collect();

    let mut title = DEFAULT_TITLE.to_owned();
    let mut meta = DocumentMeta::default();
    let mut saw_metadata = false;
    let mut body_start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if saw_metadata {
                body_start = Some(i + 1);
            }
            break;
        }
        if let Some(heading) = line.strip_prefix("# ") {
            title = heading.trim().to_owned();
        } else if let Some(value) = line.strip_prefix("**Prepared by:**") {
            meta.prepared_by = clean_value(value);
            saw_metadata = true;
        } else if let Some(value) = line.strip_prefix("**Date:**") {
            meta.date = clean_value(value);
            saw_metadata = true;
        } else if let Some(value) = line.strip_prefix("**Version:**") {
            meta.version = clean_value(value);
            saw_metadata = true;
        }
    }

    let body = match body_start {
        Some(start) => lines[start..].join("\n"),
        None => markdown.to_owned(),
    };

    FrontMatter { title, meta, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
# Platform Upgrade Proposal

**Prepared by:** Acme Consulting
**Date:** 2026-08-01
**Version:** 1.0

---

## Background

Body text.";

    #[test]
    fn test_full_front_matter() {
        let fm = scan_front_matter(DOC);
        assert_eq!(fm.title, "Platform Upgrade Proposal");
        assert_eq!(fm.meta.prepared_by, "Acme Consulting");
        assert_eq!(fm.meta.date, "2026-08-01");
        assert_eq!(fm.meta.version, "1.0");
        assert_eq!(fm.body, "\n## Background\n\nBody text.");
    }

    #[test]
    fn test_no_front_matter_keeps_whole_body() {
        let doc = "# Title\n\nJust text.\n\n---\n\nMore text after a rule.";
        let fm = scan_front_matter(doc);
        assert_eq!(fm.title, "Title");
        assert_eq!(fm.meta, DocumentMeta::default());
        // The --- is a thematic break here, not a front-matter fence
        assert_eq!(fm.body, doc);
    }

    #[test]
    fn test_missing_title_uses_default() {
        let fm = scan_front_matter("plain text only");
        assert_eq!(fm.title, "Proposal");
        assert_eq!(fm.body, "plain text only");
    }

    #[test]
    fn test_bold_wrapped_values_trimmed() {
        let fm = scan_front_matter("**Version:** 2.1**\n");
        assert_eq!(fm.meta.version, "2.1");
    }

    #[test]
    fn test_metadata_without_separator() {
        let doc = "# T\n\n**Date:** 2026-01-01\n\nBody.";
        let fm = scan_front_matter(doc);
        assert_eq!(fm.meta.date, "2026-01-01");
        // No separator: nothing is stripped
        assert_eq!(fm.body, doc);
    }

    #[test]
    fn test_only_first_separator_counts() {
        let doc = "**Date:** d\n---\nbody\n---\ntail";
        let fm = scan_front_matter(doc);
        assert_eq!(fm.body, "body\n---\ntail");
    }
}
