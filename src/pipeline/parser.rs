//! Best-effort parser for generated section text.
//!
//! The generation service is asked for a "**Title**: body" line
//! structure but is not trusted to honor it. Output here is a
//! rendering hint, never a validated schema: parsing preserves every
//! input line and cannot fail.

use serde::{Deserialize, Serialize};

/// One renderable unit of a generated section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// "Title: body" line, split at the first colon.
    Titled { title: String, body: String },
    /// Line without a usable colon, emitted verbatim.
    Plain { body: String },
    /// Blank line, preserved for rendering spacing.
    Break,
}

/// Split generated text into ordered segments, one per input line.
///
/// A colon at position zero does not make a title; the line is kept
/// as plain body. The empty string yields an empty sequence.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                return Segment::Break;
            }
            match line.find(':') {
                Some(idx) if idx > 0 => Segment::Titled {
                    title: line[..idx].trim().to_string(),
                    body: line[idx + 1..].trim().to_string(),
                },
                _ => Segment::Plain {
                    body: line.to_string(),
                },
            }
        })
        .collect()
}
