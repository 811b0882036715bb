use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::StylizerError;

/// Declarative tag registration with static markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    #[serde(rename = "type", default)]
    pub kind: SmolStr,
    pub beginning: SmolStr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<SmolStr>,
}

/// How implicit line breaks are detected and which tag marks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineBreakConfig {
    /// Tag type inserted at each line break, if registered.
    pub tag: SmolStr,
    pub sequence: SmolStr,
}

impl Default for LineBreakConfig {
    fn default() -> Self {
        Self {
            tag: SmolStr::new_static("br"),
            sequence: SmolStr::new_static("\n"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylizerConfig {
    pub tags: Vec<TagDefinition>,
    pub line_break: LineBreakConfig,
}

impl StylizerConfig {
    pub fn from_json(json: &str) -> Result<Self, StylizerError> {
        Ok(serde_json::from_str(json)?)
    }
}
