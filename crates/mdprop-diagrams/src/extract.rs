//! Diagram block extraction from Markdown.

use std::sync::LazyLock;

use regex::Regex;

use crate::kind::DiagramKind;
use crate::marker::placeholder_comment;

/// Fenced diagram blocks: ```` ```ascii:<kind> ```` (or the `diagram:`
/// alias), capturing the kind word and the body between the fences.
static DIAGRAM_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:ascii|diagram):(\w+)\n(.*?)\n```").unwrap());

/// One diagram block lifted out of a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedDiagram {
    /// 1-based sequence index, assigned in document order.
    pub index: usize,
    pub kind: DiagramKind,
    /// Raw text between the fences, verbatim.
    pub source: String,
}

/// Result of [`extract_diagrams`].
#[derive(Clone, Debug)]
pub struct Extraction {
    /// The document with every diagram block replaced by a placeholder
    /// marker.
    pub document: String,
    /// Extracted blocks in document order.
    pub diagrams: Vec<ExtractedDiagram>,
}

/// Replace every tagged diagram block with a numbered placeholder marker.
///
/// Blocks are processed first-to-last by position and spliced out on their
/// match spans, so a block whose text repeats verbatim elsewhere in the
/// document is still replaced exactly once. Indices are contiguous from 1.
#[must_use]
pub fn extract_diagrams(markdown: &str) -> Extraction {
    let mut document = String::with_capacity(markdown.len());
    let mut diagrams = Vec::new();
    let mut last_end = 0;

    for (index, captures) in DIAGRAM_FENCE_RE.captures_iter(markdown).enumerate() {
        let index = index + 1;
        let whole = captures.get(0).unwrap();
        let kind = DiagramKind::parse(&captures[1]).unwrap_or(DiagramKind::Generic);

        document.push_str(&markdown[last_end..whole.start()]);
        document.push_str(&placeholder_comment(index));
        last_end = whole.end();

        diagrams.push(ExtractedDiagram {
            index,
            kind,
            source: captures[2].to_owned(),
        });
    }
    document.push_str(&markdown[last_end..]);

    Extraction { document, diagrams }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "\
# Title

Intro paragraph.

```ascii:architecture
┌───────┐
│  Hub  │
└───────┘
```

Between the diagrams.

```ascii:flowchart
A → B → C
```

Closing text.
";

    #[test]
    fn test_extract_two_blocks() {
        let extraction = extract_diagrams(DOC);
        assert_eq!(extraction.diagrams.len(), 2);

        assert_eq!(extraction.diagrams[0].index, 1);
        assert_eq!(extraction.diagrams[0].kind, DiagramKind::Architecture);
        assert_eq!(extraction.diagrams[0].source, "┌───────┐\n│  Hub  │\n└───────┘");

        assert_eq!(extraction.diagrams[1].index, 2);
        assert_eq!(extraction.diagrams[1].kind, DiagramKind::Flowchart);
        assert_eq!(extraction.diagrams[1].source, "A → B → C");
    }

    #[test]
    fn test_document_rewritten_with_markers() {
        let extraction = extract_diagrams(DOC);
        assert!(extraction.document.contains("<!-- SVG-PLACEHOLDER-1 -->"));
        assert!(extraction.document.contains("<!-- SVG-PLACEHOLDER-2 -->"));
        assert!(!extraction.document.contains("```ascii:"));
        // Surrounding prose is untouched
        assert!(extraction.document.contains("Between the diagrams."));
        assert!(extraction.document.contains("Closing text."));
    }

    #[test]
    fn test_indices_contiguous_from_one() {
        let doc = "```ascii:ui\na\n```\n```ascii:ui\nb\n```\n```ascii:ui\nc\n```\n";
        let extraction = extract_diagrams(doc);
        let indices: Vec<_> = extraction.diagrams.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_content_replaced_once_each() {
        // Two blocks with identical bodies must each get their own marker
        let doc = "```ascii:ui\nsame\n```\n\ntext\n\n```ascii:ui\nsame\n```\n";
        let extraction = extract_diagrams(doc);
        assert_eq!(extraction.diagrams.len(), 2);
        assert_eq!(
            extraction.document.matches("<!-- SVG-PLACEHOLDER-1 -->").count(),
            1
        );
        assert_eq!(
            extraction.document.matches("<!-- SVG-PLACEHOLDER-2 -->").count(),
            1
        );
    }

    #[test]
    fn test_untagged_fences_left_alone() {
        let doc = "```rust\nfn main() {}\n```\n\n```ascii\nno kind\n```\n";
        let extraction = extract_diagrams(doc);
        assert!(extraction.diagrams.is_empty());
        assert_eq!(extraction.document, doc);
    }

    #[test]
    fn test_unknown_kind_extracted_as_generic() {
        let doc = "```ascii:gantt\nW1 ━━ W2\n```\n";
        let extraction = extract_diagrams(doc);
        assert_eq!(extraction.diagrams.len(), 1);
        assert_eq!(extraction.diagrams[0].kind, DiagramKind::Generic);
    }

    #[test]
    fn test_diagram_prefix_alias() {
        let doc = "```diagram:timeline\nWeek 1-2\n```\n";
        let extraction = extract_diagrams(doc);
        assert_eq!(extraction.diagrams.len(), 1);
        assert_eq!(extraction.diagrams[0].kind, DiagramKind::Timeline);
    }

    #[test]
    fn test_extraction_then_resplice_is_identity() {
        // Splicing the original fences back over the markers reproduces the
        // input byte-for-byte: extraction touches nothing else.
        let extraction = extract_diagrams(DOC);
        let mut restored = extraction.document.clone();
        for diagram in &extraction.diagrams {
            let fence = format!("```ascii:{}\n{}\n```", diagram.kind.as_str(), diagram.source);
            restored = restored.replace(&placeholder_comment(diagram.index), &fence);
        }
        assert_eq!(restored, DOC);
    }
}
