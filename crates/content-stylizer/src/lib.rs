//! Content stylizer
//!
//! Renders plain text plus positional annotations as HTML. Annotations may
//! overlap freely; crossing ranges are split so the emitted tags always nest.
//!
//! ```
//! use content_stylizer::Stylizer;
//! use serde_json::json;
//!
//! let mut stylizer = Stylizer::default();
//! stylizer
//!     .add_tag("strong", "<strong>", Some("</strong>".into()))
//!     .add_tag("em", "<em>", Some("</em>".into()));
//!
//! let html = stylizer
//!     .render(
//!         "Testing",
//!         &[
//!             json!({"type": "strong", "offset": 0, "length": 4}),
//!             json!({"type": "em", "offset": 0, "length": 7}),
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(html, "<em><strong>Test</strong>ing</em>");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod line_break;
pub mod output;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod span;
pub mod stylizer;
pub mod tag;

pub use config::{LineBreakConfig, StylizerConfig, TagDefinition};
pub use error::{ProducerError, StylizerError};
pub use event::{Event, EventGroups, EventKind, index_events};
pub use output::{HtmlOutput, MarkupOutput};
pub use registry::TagRegistry;
pub use resolve::resolve_overlaps;
pub use span::{Span, normalize_spans};
pub use stylizer::Stylizer;
pub use tag::{Params, Producer, ProducerFn, Tag};
