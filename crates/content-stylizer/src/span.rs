use serde_json::Value;
use std::ops::Range;

use crate::registry::TagRegistry;
use crate::tag::{Params, Tag};

/// Record fields consumed by normalization. Everything else becomes a param.
const CONFIG_FIELDS: [&str; 3] = ["type", "offset", "length"];

/// A tagged char range of the source text.
#[derive(Debug, Clone)]
pub struct Span<'r> {
    pub tag: &'r Tag,
    /// Char offset, not byte offset.
    pub offset: usize,
    pub length: usize,
    pub params: Params,
}

impl<'r> Span<'r> {
    pub fn new(tag: &'r Tag, offset: usize, length: usize, params: Params) -> Self {
        Self {
            tag,
            offset,
            length,
            params,
        }
    }

    pub fn begin(&self) -> usize {
        self.offset
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn is_singleton(&self) -> bool {
        self.length == 0
    }

    pub fn to_range(&self) -> Range<usize> {
        self.begin()..self.end()
    }
}

/// Turn raw annotation records into spans clamped to `char_count`.
///
/// Records that are not objects, name an unregistered tag type, or lack an
/// offset are dropped. Negative offsets clamp to 0 and ranges running past the
/// end of the text are cut at `char_count`.
pub fn normalize_spans<'r>(
    records: &[Value],
    registry: &'r TagRegistry,
    char_count: usize,
) -> Vec<Span<'r>> {
    let mut spans = Vec::with_capacity(records.len());

    for record in records {
        let Some(fields) = record.as_object() else {
            tracing::trace!(target: "stylizer::normalize", "dropping non-object record");
            continue;
        };
        let Some(tag) = fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|kind| registry.get_tag(kind))
        else {
            tracing::trace!(
                target: "stylizer::normalize",
                kind = ?fields.get("type"),
                "dropping record with unknown tag type"
            );
            continue;
        };
        let Some(offset) = fields.get("offset").and_then(coerce_int) else {
            tracing::trace!(
                target: "stylizer::normalize",
                tag = tag.kind(),
                "dropping record without offset"
            );
            continue;
        };
        let length = fields.get("length").and_then(coerce_int).unwrap_or(0);

        let mut params = Params::new();
        for (key, value) in fields {
            if !CONFIG_FIELDS.contains(&key.as_str()) {
                params.insert(key.clone(), value.clone());
            }
        }

        let (begin, end) = clamp_range(offset, length, char_count);
        spans.push(Span::new(tag, begin, end - begin, params));
    }

    spans
}

fn clamp_range(offset: i64, length: i64, char_count: usize) -> (usize, usize) {
    let limit = i64::try_from(char_count).unwrap_or(i64::MAX);
    let begin = offset.clamp(0, limit);
    let end = offset.saturating_add(length.max(0)).clamp(begin, limit);
    (begin as usize, end as usize)
}

/// Integer coercion for loosely typed record fields.
///
/// Null and structured values count as absent. Floats truncate toward zero,
/// booleans map to 0/1, and strings use their leading integer (0 if none).
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => Some(leading_int(s)),
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative { -value } else { value }
}
