//! Heuristic structure classification for ASCII diagrams.
//!
//! Untyped (generic) diagram blocks still deserve a reasonable rendering.
//! The classifier inspects the character makeup of the raw text and guesses
//! the closest structural shape; the renderer picks a template from the
//! guess. This is intentionally a handful of substring checks, not a parser.

/// Box-drawing characters that identify ASCII art.
const BOX_CHARS: [char; 22] = [
    '┌', '┐', '└', '┘', '│', '─', '├', '┤', '┬', '┴', '┼', '━', '┃', '╭', '╮', '╰', '╯', '═', '║',
    '╗', '╚', '╔',
];

/// Structural shape guessed from raw diagram text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Structure {
    /// Boxes inside boxes, reads as a component/architecture drawing.
    NestedBoxes,
    /// Arrows between elements without nesting, reads as a flow.
    Flow,
    /// Week/phase markers or long horizontal bars, reads as a schedule.
    Timeline,
    /// Anything simpler: a single framed box or plain annotated text.
    SimpleBox,
}

/// Guess the structural shape of raw ASCII diagram text.
#[must_use]
pub fn classify(raw: &str) -> Structure {
    let lines: Vec<&str> = raw.trim().lines().collect();

    let has_nested = lines.iter().any(|line| {
        line.chars().filter(|&c| c == '┌').count() > 1
            || line.chars().filter(|&c| c == '│').count() > 2
    });
    let has_arrows = lines
        .iter()
        .any(|line| line.contains('→') || line.contains('↓') || line.contains('━'));
    let has_timeline = lines
        .iter()
        .any(|line| line.contains("Week") || line.contains("━━"));

    if has_timeline {
        Structure::Timeline
    } else if has_arrows && !has_nested {
        Structure::Flow
    } else if has_nested {
        Structure::NestedBoxes
    } else {
        Structure::SimpleBox
    }
}

/// Whether the text contains box-drawing characters (i.e. looks like an
/// ASCII diagram at all).
#[must_use]
pub fn contains_box_drawing(text: &str) -> bool {
    text.chars().any(|c| BOX_CHARS.contains(&c))
}
