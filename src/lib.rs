//! An extensible multi-pass Markdown-to-HTML conversion engine.
//!
//! The pipeline runs in five stages, each driven by its own prioritized
//! [`registry::Registry`]: preprocessors rewrite the raw line stream,
//! [`blockparser`] builds a document tree out of it, [`treeprocessors`] walk
//! and mutate that tree (inline expansion, then prettifying), [`serializer`]
//! renders it to a string, and [`postprocessors`] make a final pass over
//! that string. [`Markdown`] is the facade that owns all five registries and
//! drives a conversion end to end; [`Extension`] is how a caller adds
//! processors to any of them.

pub mod blockparser;
pub mod engine_state;
pub mod error;
pub mod extension;
pub mod inlineparser;
pub mod markdown;
pub mod options;
pub mod postprocessors;
pub mod preprocessors;
pub mod registry;
pub mod serializer;
pub mod stash;
pub mod state;
pub mod treeprocessors;
pub mod tree;

pub use engine_state::{EngineState, LinkReference};
pub use error::{MarkdownError, Result};
pub use extension::Extension;
pub use markdown::Markdown;
pub use options::{ConfigValue, ExtensionConfigs, MarkdownOptions, OutputFormat};
pub use registry::{Priority, Registry};
pub use tree::{Attributes, Element, Tag, Value};

pub use blockparser::{BlockParser, BlockProcessor, BlockProcessorRegistry};
pub use inlineparser::{InlineMatch, InlinePattern, InlinePatternRegistry, InlineReplacement};
pub use postprocessors::{Postprocessor, PostprocessorRegistry};
pub use preprocessors::{Preprocessor, PreprocessorRegistry};
pub use treeprocessors::{Treeprocessor, TreeprocessorContext, TreeprocessorRegistry};
