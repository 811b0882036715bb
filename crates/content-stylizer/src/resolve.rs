//! Crossing-overlap resolution.
//!
//! HTML elements cannot interleave, so a span that starts inside another and
//! runs past its end is cut at that end. The remainder becomes a new span that
//! is queued for processing like any other and may be cut again.

use std::cmp::Ordering;

use crate::span::Span;

/// Processing order: earlier begin first, then the longer (enclosing) span.
fn processing_order(a: &Span<'_>, b: &Span<'_>) -> Ordering {
    a.begin()
        .cmp(&b.begin())
        .then_with(|| b.length.cmp(&a.length))
}

/// Split crossing spans so that any two spans in the result are either
/// disjoint or nested.
///
/// The result is in processing order, with split remainders in their sorted
/// position. Text coverage, tags and params are preserved.
pub fn resolve_overlaps<'r>(mut spans: Vec<Span<'r>>) -> Vec<Span<'r>> {
    spans.sort_by(processing_order);

    // Ends of the currently open spans, innermost last.
    let mut open_ends: Vec<usize> = Vec::new();
    let mut splits = 0usize;
    let mut idx = 0;

    while idx < spans.len() {
        let begin = spans[idx].begin();
        while open_ends.last().is_some_and(|&end| end <= begin) {
            open_ends.pop();
        }

        if let Some(&parent_end) = open_ends.last() {
            let current = &mut spans[idx];
            if current.end() > parent_end {
                let remainder = Span::new(
                    current.tag,
                    parent_end,
                    current.end() - parent_end,
                    current.params.clone(),
                );
                current.length = parent_end - current.begin();
                tracing::trace!(
                    target: "stylizer::resolve",
                    tag = current.tag.kind(),
                    at = parent_end,
                    "splitting crossing span"
                );

                let insert_at = spans[idx + 1..]
                    .iter()
                    .position(|later| processing_order(later, &remainder) == Ordering::Greater)
                    .map_or(spans.len(), |pos| idx + 1 + pos);
                spans.insert(insert_at, remainder);
                splits += 1;
            }
        }

        open_ends.push(spans[idx].end());
        idx += 1;
    }

    if splits > 0 {
        tracing::debug!(
            target: "stylizer::resolve",
            splits,
            spans = spans.len(),
            "resolved crossing spans"
        );
    }

    spans
}
