//! Construction options for a [`crate::Markdown`] engine instance.
//!
//! Mirrors the constructor surface in spec §6: `extensions`,
//! `extension_configs`, `output_format`, `lazy_ol`, `tab_length`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Output serialization mode (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Xhtml,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Xhtml
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::MarkdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputFormat::Html),
            "xhtml" => Ok(OutputFormat::Xhtml),
            other => Err(crate::error::MarkdownError::BadOutputFormat(other.to_string())),
        }
    }
}

/// An untyped extension configuration value, analogous to the dict of
/// `{str: str|int|bool}` that Python-Markdown's `extension_configs` accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    String(String),
}

/// Per-extension configuration: identifier -> option name -> value.
pub type ExtensionConfigs = HashMap<String, HashMap<String, ConfigValue>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownOptions {
    pub output_format: OutputFormat,
    /// When true, `1.` or `9.` at the start of an ordered list sets the
    /// displayed starting number; when false, any leading integer forces
    /// the list to start at 1 (spec §4.4 edge policy).
    pub lazy_ol: bool,
    /// Number of spaces that constitute one level of indentation (list
    /// continuation, indented code block detection).
    pub tab_length: usize,
    #[serde(default)]
    pub extension_configs: ExtensionConfigs,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            lazy_ol: true,
            tab_length: 4,
            extension_configs: HashMap::new(),
        }
    }
}
