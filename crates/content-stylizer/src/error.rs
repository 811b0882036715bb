use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StylizerError {
    #[error("producer for tag `{tag}` failed: {source}")]
    #[diagnostic(
        code(stylizer::producer),
        help("check that the annotation carries the params the tag expects")
    )]
    Producer {
        tag: SmolStr,
        #[source]
        source: ProducerError,
    },

    #[error("failed to write output: {0}")]
    #[diagnostic(code(stylizer::write))]
    Write(#[from] std::fmt::Error),

    #[error("invalid stylizer configuration: {0}")]
    #[diagnostic(code(stylizer::config))]
    Config(#[from] serde_json::Error),
}

/// Failure raised by a parametrized producer.
#[derive(Debug, Error, Diagnostic)]
pub enum ProducerError {
    #[error("missing param `{name}`")]
    #[diagnostic(code(stylizer::producer::missing_param))]
    MissingParam { name: String },

    #[error("param `{name}` is not a {expected}")]
    #[diagnostic(code(stylizer::producer::invalid_param))]
    InvalidParam {
        name: String,
        expected: &'static str,
    },

    #[error("{0}")]
    #[diagnostic(code(stylizer::producer::custom))]
    Custom(String),
}
