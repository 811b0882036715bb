use serde_json::{Map, Value};
use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

use crate::error::ProducerError;

/// Free-form parameters carried by an annotation, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a parameter. A repeated key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String parameter lookup for producers that cannot work without it.
    pub fn str(&self, key: &str) -> Result<&str, ProducerError> {
        match self.0.get(key) {
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(ProducerError::InvalidParam {
                name: key.to_owned(),
                expected: "string",
            }),
            None => Err(ProducerError::MissingParam {
                name: key.to_owned(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

pub type ProducerFn = dyn Fn(&Params) -> Result<String, ProducerError> + Send + Sync;

/// Source of a tag's opening or closing markup.
#[derive(Clone)]
pub enum Producer {
    Static(SmolStr),
    Dynamic(Arc<ProducerFn>),
}

impl Producer {
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Params) -> Result<String, ProducerError> + Send + Sync + 'static,
    {
        Producer::Dynamic(Arc::new(f))
    }

    pub fn produce(&self, params: &Params) -> Result<String, ProducerError> {
        match self {
            Producer::Static(markup) => Ok(markup.to_string()),
            Producer::Dynamic(f) => f(params),
        }
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::Static(markup) => f.debug_tuple("Static").field(markup).finish(),
            Producer::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Producer {
    fn from(markup: &str) -> Self {
        Producer::Static(SmolStr::new(markup))
    }
}

impl From<String> for Producer {
    fn from(markup: String) -> Self {
        Producer::Static(SmolStr::from(markup))
    }
}

impl From<SmolStr> for Producer {
    fn from(markup: SmolStr) -> Self {
        Producer::Static(markup)
    }
}

/// A registered tag type and the producers for its markup.
#[derive(Debug, Clone)]
pub struct Tag {
    kind: SmolStr,
    opening: Producer,
    closing: Option<Producer>,
}

impl Tag {
    pub fn new(kind: impl Into<SmolStr>, opening: Producer, closing: Option<Producer>) -> Self {
        Self {
            kind: kind.into(),
            opening,
            closing,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn opening(&self, params: &Params) -> Result<String, ProducerError> {
        self.opening.produce(params)
    }

    /// Closing markup. Tags registered without a closing producer close with nothing.
    pub fn closing(&self, params: &Params) -> Result<String, ProducerError> {
        match &self.closing {
            Some(producer) => producer.produce(params),
            None => Ok(String::new()),
        }
    }

    pub fn has_closing(&self) -> bool {
        self.closing.is_some()
    }
}
