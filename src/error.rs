//! Error kinds surfaced across the conversion pipeline.
//!
//! Structural/API errors (`BadInput`, `BadOutputFormat`, `ExtensionLoadFailure`,
//! `NotFound`) propagate to the caller. Content errors (malformed raw HTML,
//! unmatched emphasis markers, unknown escapes) never appear here: the parser
//! recovers locally by falling back to literal text and logging a warning.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkdownError {
    /// The input passed to `convert` was not valid UTF-8 text, or file
    /// decoding failed in `convertFile`.
    #[error("bad input: {0}")]
    BadInput(String),

    /// The requested output format is not registered in `output_formats`.
    #[error("unknown output format: {0}")]
    BadOutputFormat(String),

    /// An extension identifier could not be resolved, or the resolved value
    /// does not implement `Extension`.
    #[error("failed to load extension {name}: {reason}")]
    ExtensionLoadFailure { name: String, reason: String },

    /// A strict-mode registry lookup found no entry for the given name.
    #[error("no entry named {0:?} in registry")]
    NotFound(String),

    /// I/O failure from the `convertFile` collaborator boundary.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkdownError>;
