//! Per-conversion mutable state shared across every stage (spec §3
//! "Lifecycle"): the stash, the block-parser state stack, and the table of
//! reference-style link definitions collected during preprocessing.
//!
//! Everything here is reinitialized by [`crate::Markdown::reset`]; the
//! registries that hold processors are *not* part of this struct and
//! survive a reset (spec: "Registries themselves survive resets; their
//! contents do not").

use std::collections::HashMap;

use crate::stash::HtmlStash;
use crate::state::State;

/// A parsed reference-style link definition: `[label]: /url "title"`.
#[derive(Debug, Clone)]
pub struct LinkReference {
    pub url: String,
    pub title: Option<String>,
}

/// The default set of characters the backslash-escape inline pattern
/// recognizes. Scoped to the engine instance (never a process-global list)
/// so an extension can add to `escaped_chars` on one `Markdown` without
/// affecting another.
pub fn default_escaped_chars() -> Vec<char> {
    "\\`*_{}[]()>#+-.!~".chars().collect()
}

pub struct EngineState {
    pub stash: HtmlStash,
    pub parser_state: State,
    pub link_references: HashMap<String, LinkReference>,
    pub escaped_chars: Vec<char>,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            stash: HtmlStash::new(),
            parser_state: State::new(),
            link_references: HashMap::new(),
            escaped_chars: default_escaped_chars(),
        }
    }

    /// Reinitialize all per-conversion state. Extension-specific reset hooks
    /// are invoked separately by `Markdown::reset`.
    pub fn reset(&mut self) {
        self.stash.reset();
        self.parser_state = State::new();
        self.link_references.clear();
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}
