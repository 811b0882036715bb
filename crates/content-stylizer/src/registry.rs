use smol_str::SmolStr;
use std::collections::HashMap;

use crate::config::TagDefinition;
use crate::tag::{Producer, Tag};

/// Tag types known to a stylizer, keyed by type identifier.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<SmolStr, Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from declarative definitions. Definitions without a type are skipped.
    pub fn from_definitions<'a>(definitions: impl IntoIterator<Item = &'a TagDefinition>) -> Self {
        let mut registry = Self::new();
        for def in definitions {
            if def.kind.is_empty() {
                tracing::debug!(target: "stylizer::registry", "skipping tag definition without a type");
                continue;
            }
            registry.add_tag(
                def.kind.clone(),
                def.beginning.clone(),
                def.end.clone().map(Producer::from),
            );
        }
        registry
    }

    /// Register a tag type, replacing any previous registration of the same type.
    pub fn add_tag(
        &mut self,
        kind: impl Into<SmolStr>,
        opening: impl Into<Producer>,
        closing: Option<Producer>,
    ) -> &mut Self {
        let kind = kind.into();
        let tag = Tag::new(kind.clone(), opening.into(), closing);
        if self.tags.insert(kind.clone(), tag).is_some() {
            tracing::debug!(target: "stylizer::registry", tag = %kind, "replaced tag registration");
        }
        self
    }

    pub fn has_tag(&self, kind: &str) -> bool {
        self.tags.contains_key(kind)
    }

    pub fn get_tag(&self, kind: &str) -> Option<&Tag> {
        self.tags.get(kind)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
