use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::StylizerError;
use crate::span::Span;

/// What happens at an event position. Variant order is emission order within a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    End = 1,
    Singleton = 2,
    Begin = 3,
}

#[derive(Debug, Clone, Copy)]
pub struct Event<'s, 'r> {
    pub position: usize,
    pub kind: EventKind,
    pub span: &'s Span<'r>,
    /// Index of the span in the indexed list, used to break exact ties.
    seq: usize,
}

impl<'s, 'r> Event<'s, 'r> {
    fn new(position: usize, kind: EventKind, span: &'s Span<'r>, seq: usize) -> Self {
        Self {
            position,
            kind,
            span,
            seq,
        }
    }

    /// Markup for this event from the span's tag.
    pub fn markup(&self) -> Result<String, StylizerError> {
        let tag = self.span.tag;
        let produced = match self.kind {
            EventKind::Begin | EventKind::Singleton => tag.opening(&self.span.params),
            EventKind::End => tag.closing(&self.span.params),
        };
        produced.map_err(|source| StylizerError::Producer {
            tag: tag.kind().into(),
            source,
        })
    }

    fn emission_order(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind).then_with(|| match self.kind {
            // The span that closes last opens first.
            EventKind::Begin => other
                .span
                .length
                .cmp(&self.span.length)
                .then_with(|| self.seq.cmp(&other.seq)),
            // The span opened last closes first.
            EventKind::End => other
                .span
                .begin()
                .cmp(&self.span.begin())
                .then_with(|| other.seq.cmp(&self.seq)),
            EventKind::Singleton => self.seq.cmp(&other.seq),
        })
    }
}

/// Events grouped by char position, each group in emission order.
pub type EventGroups<'s, 'r> = BTreeMap<usize, Vec<Event<'s, 'r>>>;

/// Turn nested (non-crossing) spans into position-keyed events.
pub fn index_events<'s, 'r>(spans: &'s [Span<'r>]) -> EventGroups<'s, 'r> {
    let mut groups: EventGroups<'s, 'r> = BTreeMap::new();

    for (seq, span) in spans.iter().enumerate() {
        if span.is_singleton() {
            groups
                .entry(span.begin())
                .or_default()
                .push(Event::new(span.begin(), EventKind::Singleton, span, seq));
        } else {
            groups
                .entry(span.begin())
                .or_default()
                .push(Event::new(span.begin(), EventKind::Begin, span, seq));
            groups
                .entry(span.end())
                .or_default()
                .push(Event::new(span.end(), EventKind::End, span, seq));
        }
    }

    for group in groups.values_mut() {
        group.sort_by(Event::emission_order);
    }

    groups
}
