use crate::span::Span;
use crate::tag::{Params, Tag};

/// Zero-length spans of `tag` at the char position of every `sequence` in `text`.
pub fn line_break_spans<'r>(text: &str, tag: &'r Tag, sequence: &str) -> Vec<Span<'r>> {
    if sequence.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut last_byte = 0;
    let mut char_pos = 0;
    for (byte, _) in text.match_indices(sequence) {
        char_pos += text[last_byte..byte].chars().count();
        last_byte = byte;
        spans.push(Span::new(tag, char_pos, 0, Params::new()));
    }
    spans
}
