use serde_json::Value;
use smol_str::SmolStr;

use crate::config::{LineBreakConfig, StylizerConfig};
use crate::error::StylizerError;
use crate::event::index_events;
use crate::line_break::line_break_spans;
use crate::output::{HtmlOutput, MarkupOutput};
use crate::registry::TagRegistry;
use crate::render::render_events;
use crate::resolve::resolve_overlaps;
use crate::span::normalize_spans;
use crate::tag::{Producer, Tag};

/// Renders annotated text to HTML using a fixed set of tags.
///
/// A `Stylizer` is immutable while rendering and can be shared between
/// threads; every call works on its own spans and events.
#[derive(Debug, Clone, Default)]
pub struct Stylizer {
    registry: TagRegistry,
    line_break: LineBreakConfig,
}

impl Stylizer {
    pub fn new(registry: TagRegistry) -> Self {
        Self {
            registry,
            line_break: LineBreakConfig::default(),
        }
    }

    pub fn from_config(config: &StylizerConfig) -> Self {
        Self {
            registry: TagRegistry::from_definitions(&config.tags),
            line_break: config.line_break.clone(),
        }
    }

    pub fn with_line_break(mut self, line_break: LineBreakConfig) -> Self {
        self.line_break = line_break;
        self
    }

    pub fn add_tag(
        &mut self,
        kind: impl Into<SmolStr>,
        opening: impl Into<Producer>,
        closing: Option<Producer>,
    ) -> &mut Self {
        self.registry.add_tag(kind, opening, closing);
        self
    }

    pub fn has_tag(&self, kind: &str) -> bool {
        self.registry.has_tag(kind)
    }

    pub fn get_tag(&self, kind: &str) -> Option<&Tag> {
        self.registry.get_tag(kind)
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Render `text` with `annotations` applied as HTML.
    ///
    /// Each annotation is a JSON object with a `type`, an `offset` and an
    /// optional `length`, all in chars. Any other fields are passed to the
    /// tag's producers as params.
    pub fn render(&self, text: &str, annotations: &[Value]) -> Result<String, StylizerError> {
        let mut output = HtmlOutput::new(String::with_capacity(text.len()));
        self.render_to(text, annotations, &mut output)?;
        Ok(output.into_inner())
    }

    /// Same as [`Stylizer::render`], writing into `output`.
    pub fn render_to<O>(
        &self,
        text: &str,
        annotations: &[Value],
        output: &mut O,
    ) -> Result<(), StylizerError>
    where
        O: MarkupOutput,
        StylizerError: From<O::Error>,
    {
        if text.is_empty() {
            return Ok(());
        }

        let char_count = text.chars().count();
        let spans = normalize_spans(annotations, &self.registry, char_count);
        let normalized = spans.len();
        let mut spans = resolve_overlaps(spans);

        if let Some(tag) = self.registry.get_tag(&self.line_break.tag) {
            spans.extend(line_break_spans(text, tag, &self.line_break.sequence));
        }

        let groups = index_events(&spans);
        tracing::debug!(
            target: "stylizer::render",
            chars = char_count,
            annotations = annotations.len(),
            normalized,
            spans = spans.len(),
            positions = groups.len(),
            "rendering annotated text"
        );

        render_events(text, &groups, output)
    }
}
