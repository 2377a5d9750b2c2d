//! Renderer dispatch for extracted diagram blocks.
//!
//! A pure function of the block and its surroundings: no I/O, no ambient
//! state. The mode is decided once per run by the caller and threaded in.
//!
//! Immediate mode produces fixed-canvas SVG templates for the kinds with a
//! recognizable shape (architecture, flowchart, timeline) and a styled
//! monospace block for the rest. Generic blocks are routed through the
//! structure classifier first. Deferred mode produces an inert pending span
//! whose `data-raw` attribute carries the escaped raw text for an external
//! collaborator to pick up.

use std::fmt::Write;

use crate::classify::{Structure, classify};
use crate::escape::escape_attr;
use crate::kind::DiagramKind;
use crate::marker::PendingMarker;
use crate::session::SessionId;

/// How diagram blocks are turned into markup, decided once per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Render templated SVG / monospace markup inline.
    #[default]
    Immediate,
    /// Emit pending marker spans for out-of-band generation.
    Deferred,
}

/// The two theme colors the SVG templates draw with.
#[derive(Clone, Debug)]
pub struct SvgPalette {
    pub primary: String,
    pub secondary: String,
}

impl Default for SvgPalette {
    fn default() -> Self {
        Self {
            primary: "#667eea".to_owned(),
            secondary: "#764ba2".to_owned(),
        }
    }
}

/// Render one extracted diagram block into replacement markup.
///
/// Never fails and never returns empty markup: unknown shapes fall back to
/// the monospace passthrough block.
#[must_use]
pub fn render_diagram(
    kind: DiagramKind,
    source: &str,
    index: usize,
    session: &SessionId,
    mode: RenderMode,
    palette: &SvgPalette,
) -> String {
    match mode {
        RenderMode::Deferred => pending_span(kind, source, index, session),
        RenderMode::Immediate => match kind {
            DiagramKind::Architecture => architecture_svg(source, index, palette),
            DiagramKind::Flowchart => flowchart_svg(source, index, palette),
            DiagramKind::Timeline => timeline_svg(source, index, palette),
            DiagramKind::Ui => monospace_block(source),
            DiagramKind::Generic => match classify(source) {
                Structure::NestedBoxes => architecture_svg(source, index, palette),
                Structure::Flow => flowchart_svg(source, index, palette),
                Structure::Timeline => timeline_svg(source, index, palette),
                Structure::SimpleBox => monospace_block(source),
            },
        },
    }
}

/// Pull text labels out of ASCII art: box-drawing and arrow characters
/// become spaces, then each run of text separated by 2+ spaces is one
/// fragment. Duplicates are dropped, order preserved.
fn text_fragments(source: &str) -> Vec<String> {
    const DRAWING: [char; 26] = [
        '┌', '┐', '└', '┘', '│', '─', '├', '┤', '┬', '┴', '┼', '━', '┃', '╭', '╮', '╰', '╯', '═',
        '║', '╗', '╚', '╔', '╝', '→', '↓', '↑',
    ];

    let mut fragments: Vec<String> = Vec::new();
    for line in source.lines() {
        let cleaned: String = line
            .chars()
            .map(|c| if DRAWING.contains(&c) { ' ' } else { c })
            .collect();
        for piece in cleaned.split("  ") {
            let piece = piece.trim();
            if piece.is_empty() || fragments.iter().any(|f| f == piece) {
                continue;
            }
            fragments.push(piece.to_owned());
        }
    }
    fragments.truncate(8);
    fragments
}

/// Fragment at `index`, or the fallback when the art had too little text.
fn fragment_or<'a>(fragments: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    fragments.get(index).map_or(fallback, String::as_str)
}

fn svg_open(out: &mut String, width: u32, height: u32, index: usize) {
    write!(
        out,
        r#"<div class="diagram" style="margin: 25px 0; text-align: center;">
<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg" style="max-width: 100%; height: auto;">
  <defs>
    <filter id="ds{index}" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="2" dy="2" stdDeviation="3" flood-opacity="0.1"/>
    </filter>
  </defs>
"#
    )
    .unwrap();
}

fn svg_close(out: &mut String) {
    out.push_str("</svg>\n</div>");
}

fn svg_box(out: &mut String, x: u32, y: u32, w: u32, h: u32, stroke: &str, filter: Option<usize>) {
    let filter_attr = filter.map_or(String::new(), |i| format!(r#" filter="url(#ds{i})""#));
    writeln!(
        out,
        r#"  <rect x="{x}" y="{y}" width="{w}" height="{h}" fill="white" stroke="{stroke}" stroke-width="2" rx="8"{filter_attr}/>"#
    )
    .unwrap();
}

fn svg_label(out: &mut String, x: u32, y: u32, size: u32, fill: &str, weight: &str, text: &str) {
    writeln!(
        out,
        r#"  <text x="{x}" y="{y}" text-anchor="middle" font-family="-apple-system, BlinkMacSystemFont, sans-serif" font-size="{size}" font-weight="{weight}" fill="{fill}">{}</text>"#,
        escape_attr(text)
    )
    .unwrap();
}

/// Architecture template: an outer frame with a title and three labeled
/// component boxes.
fn architecture_svg(source: &str, index: usize, palette: &SvgPalette) -> String {
    let fragments = text_fragments(source);
    let title = fragment_or(&fragments, 0, "System Overview");

    let mut out = String::with_capacity(2048);
    svg_open(&mut out, 800, 280, index);

    svg_box(&mut out, 20, 20, 760, 240, &palette.primary, Some(index));
    svg_label(&mut out, 400, 52, 18, "#333", "600", title);

    let labels = [
        fragment_or(&fragments, 1, "Component A"),
        fragment_or(&fragments, 2, "Component B"),
        fragment_or(&fragments, 3, "Component C"),
    ];
    let xs = [60, 320, 580];
    for (x, label) in xs.into_iter().zip(labels) {
        svg_box(&mut out, x, 100, 160, 80, &palette.primary, None);
        svg_label(&mut out, x + 80, 145, 14, "#333", "600", label);
    }

    // Connectors between the component boxes
    for x in [240, 500] {
        writeln!(
            out,
            r#"  <line x1="{x}" y1="140" x2="{}" y2="140" stroke="{}" stroke-width="2"/>"#,
            x + 60,
            palette.secondary
        )
        .unwrap();
        writeln!(
            out,
            r#"  <polygon points="{p},140 {b},135 {b},145" fill="{}"/>"#,
            palette.secondary,
            p = x + 60,
            b = x + 50
        )
        .unwrap();
    }

    svg_close(&mut out);
    out
}

/// Flowchart template: a source box flowing into a stack of target boxes.
fn flowchart_svg(source: &str, index: usize, palette: &SvgPalette) -> String {
    let fragments = text_fragments(source);

    let mut out = String::with_capacity(2048);
    svg_open(&mut out, 600, 300, index);

    svg_box(&mut out, 30, 110, 140, 60, &palette.primary, Some(index));
    svg_label(&mut out, 100, 145, 14, "#333", "600", fragment_or(&fragments, 0, "Input"));

    // Arrow from the source box into the stack
    writeln!(
        out,
        r#"  <line x1="170" y1="140" x2="250" y2="140" stroke="{}" stroke-width="2"/>"#,
        palette.secondary
    )
    .unwrap();
    writeln!(
        out,
        r#"  <polygon points="250,140 240,135 240,145" fill="{}"/>"#,
        palette.secondary
    )
    .unwrap();

    let steps = [
        fragment_or(&fragments, 1, "Step 1"),
        fragment_or(&fragments, 2, "Step 2"),
        fragment_or(&fragments, 3, "Step 3"),
    ];
    for (row, step) in steps.into_iter().enumerate() {
        let y = 60 + u32::try_from(row).unwrap_or(0) * 70;
        writeln!(
            out,
            r##"  <rect x="270" y="{y}" width="280" height="50" fill="#f0f8ff" stroke="{}" stroke-width="1.5" rx="6"/>"##,
            palette.primary
        )
        .unwrap();
        svg_label(&mut out, 410, y + 30, 12, "#333", "400", step);
    }

    svg_close(&mut out);
    out
}

/// Timeline template: up to five phase boxes joined left to right.
fn timeline_svg(source: &str, index: usize, palette: &SvgPalette) -> String {
    let fragments = text_fragments(source);
    // Prefer fragments that look like schedule entries
    let phases: Vec<&str> = {
        let scheduled: Vec<&str> = fragments
            .iter()
            .map(String::as_str)
            .filter(|f| f.contains("Week") || f.contains("Phase") || f.contains("Month"))
            .collect();
        if scheduled.is_empty() {
            fragments.iter().map(String::as_str).collect()
        } else {
            scheduled
        }
    };

    let mut out = String::with_capacity(2048);
    svg_open(&mut out, 800, 160, index);

    let count = phases.len().clamp(1, 5);
    for slot in 0..count {
        let x = 20 + u32::try_from(slot).unwrap_or(0) * 155;
        svg_box(&mut out, x, 40, 130, 60, &palette.primary, None);
        let label = phases.get(slot).copied().unwrap_or("Phase");
        svg_label(&mut out, x + 65, 75, 12, "#333", "600", label);
        if slot > 0 {
            writeln!(
                out,
                r#"  <line x1="{}" y1="70" x2="{x}" y2="70" stroke="{}" stroke-width="2"/>"#,
                x - 25,
                palette.primary
            )
            .unwrap();
        }
    }
    if phases.len() > count {
        svg_label(&mut out, 400, 135, 12, "#666", "400", "…");
    }

    svg_close(&mut out);
    out
}

/// Styled monospace passthrough for content with no recognizable shape.
fn monospace_block(source: &str) -> String {
    format!(
        "<div style=\"background: #f8f9fa; border: 2px solid #e8e8e8; border-radius: 8px; padding: 20px; margin: 25px 0;\">\n\
         <pre><code style=\"font-family: 'Courier New', monospace; white-space: pre; line-height: 1.5;\">{}</code></pre>\n\
         </div>",
        escape_attr(source)
    )
}

/// Deferred-mode pending span: START/END comments around an inert notice
/// div carrying the escaped raw text.
fn pending_span(kind: DiagramKind, source: &str, index: usize, session: &SessionId) -> String {
    let marker = PendingMarker {
        kind,
        id: index,
        session: session.clone(),
    };
    format!(
        "{start}\n\
         <div class=\"svg-pending\" data-id=\"{index}\" data-session=\"{session}\" data-type=\"{kind}\" data-raw=\"{raw}\">\n  \
         <div style=\"background: #fff7e6; border: 2px dashed #fa8c16; border-radius: 8px; padding: 20px; margin: 25px 0; text-align: center;\">\n    \
         <p style=\"color: #fa8c16; font-size: 14px; margin: 0;\">Generating {label}…</p>\n    \
         <p style=\"color: #999; font-size: 12px; margin: 5px 0 0 0;\">Raw content embedded, awaiting substitution</p>\n  \
         </div>\n\
         </div>\n\
         {end}",
        start = marker.start_comment(),
        end = marker.end_comment(),
        kind = kind.as_str(),
        label = kind.label(),
        raw = escape_attr(source),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionId {
        SessionId::parse("a1b2c3").unwrap()
    }

    #[test]
    fn test_immediate_architecture_is_svg() {
        let markup = render_diagram(
            DiagramKind::Architecture,
            "┌────┐\n│ Hub │\n└────┘",
            1,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(markup.contains("<svg"));
        assert!(markup.contains("#667eea"));
        assert!(!markup.contains("SVG-PENDING"));
    }

    #[test]
    fn test_immediate_ui_is_monospace() {
        let markup = render_diagram(
            DiagramKind::Ui,
            "┌[Save]──[Cancel]┐",
            1,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(markup.contains("<pre><code"));
        assert!(!markup.contains("<svg"));
    }

    #[test]
    fn test_generic_routes_through_classifier() {
        let timeline = render_diagram(
            DiagramKind::Generic,
            "Week 1-2 ━━ Week 3-4",
            1,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(timeline.contains("<svg"));
        assert!(timeline.contains("Week 1-2"));

        let plain = render_diagram(
            DiagramKind::Generic,
            "no structure here",
            2,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(plain.contains("<pre><code"));
    }

    #[test]
    fn test_never_empty_for_any_kind() {
        for kind in [
            DiagramKind::Architecture,
            DiagramKind::Flowchart,
            DiagramKind::Ui,
            DiagramKind::Timeline,
            DiagramKind::Generic,
        ] {
            for mode in [RenderMode::Immediate, RenderMode::Deferred] {
                let markup =
                    render_diagram(kind, "", 1, &session(), mode, &SvgPalette::default());
                assert!(!markup.is_empty(), "{kind:?}/{mode:?} produced empty markup");
            }
        }
    }

    #[test]
    fn test_deferred_span_structure() {
        let markup = render_diagram(
            DiagramKind::Flowchart,
            "A → B",
            2,
            &session(),
            RenderMode::Deferred,
            &SvgPalette::default(),
        );
        assert!(markup.starts_with("<!-- SVG-PENDING-FLOWCHART-START:id=2,session=a1b2c3 -->"));
        assert!(markup.ends_with("<!-- SVG-PENDING-FLOWCHART-END:id=2,session=a1b2c3 -->"));
        assert!(markup.contains(r#"data-type="flowchart""#));
        assert!(markup.contains(r#"data-raw="A → B""#));
    }

    #[test]
    fn test_deferred_escapes_raw_content() {
        let markup = render_diagram(
            DiagramKind::Ui,
            r#"<input value="x">"#,
            1,
            &session(),
            RenderMode::Deferred,
            &SvgPalette::default(),
        );
        assert!(markup.contains("data-raw=\"&lt;input value=&quot;x&quot;&gt;\""));
    }

    #[test]
    fn test_monospace_escapes_content() {
        let markup = render_diagram(
            DiagramKind::Ui,
            "<script>alert(1)</script>",
            1,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(markup.contains("&lt;script&gt;"));
        assert!(!markup.contains("<script>"));
    }

    #[test]
    fn test_svg_labels_come_from_content() {
        let markup = render_diagram(
            DiagramKind::Architecture,
            "┌──────────────────────────┐\n│  Member Platform          │\n│ ┌──────┐  ┌──────┐       │\n│ │ Web  │  │ API  │       │\n│ └──────┘  └──────┘       │\n└──────────────────────────┘",
            1,
            &session(),
            RenderMode::Immediate,
            &SvgPalette::default(),
        );
        assert!(markup.contains("Member Platform"));
        assert!(markup.contains("Web"));
        assert!(markup.contains("API"));
    }

    #[test]
    fn test_palette_colors_used() {
        let palette = SvgPalette {
            primary: "#1890ff".to_owned(),
            secondary: "#096dd9".to_owned(),
        };
        let markup = render_diagram(
            DiagramKind::Timeline,
            "Week 1 ━━ Week 2",
            1,
            &session(),
            RenderMode::Immediate,
            &palette,
        );
        assert!(markup.contains("#1890ff"));
    }

    #[test]
    fn test_text_fragments() {
        let fragments = text_fragments("┌──────┐  ┌─────┐\n│ Web  │  │ API │\n└──────┘  └─────┘");
        assert_eq!(fragments, vec!["Web".to_owned(), "API".to_owned()]);
    }

    #[test]
    fn test_text_fragments_dedup_and_cap() {
        let raw = "A  A  A\nB  C  D\nE  F  G\nH  I  J";
        let fragments = text_fragments(raw);
        assert_eq!(fragments.len(), 8);
        assert_eq!(fragments[0], "A");
        assert_eq!(fragments.iter().filter(|f| *f == "A").count(), 1);
    }
}
