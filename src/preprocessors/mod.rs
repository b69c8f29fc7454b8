//! Preprocessors: the first pipeline stage (spec §4.3). Operate on the text
//! split into lines and return a rewritten list of lines.

pub mod html_block;
pub mod reference;

use std::rc::Rc;

use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::registry::Registry;

pub trait Preprocessor {
    fn name(&self) -> &'static str;
    fn run(&self, lines: Vec<String>, state: &mut EngineState, options: &MarkdownOptions) -> Vec<String>;
}

pub type PreprocessorRef = Rc<dyn Preprocessor>;
pub type PreprocessorRegistry = Registry<PreprocessorRef>;

/// Priorities for the built-in preprocessors. Higher runs first. The raw-HTML
/// extractor must run before the reference-definition stripper, since a
/// reference definition can appear inside text that precedes a raw block but
/// must never be mistaken for one inside stashed content.
pub const PRIORITY_HTML_BLOCK: f64 = 20.0;
pub const PRIORITY_REFERENCE: f64 = 15.0;

pub fn register_builtins(registry: &mut PreprocessorRegistry) {
    registry.register(Rc::new(html_block::HtmlBlockPreprocessor::new()), "html_block", PRIORITY_HTML_BLOCK);
    registry.register(Rc::new(reference::ReferencePreprocessor), "reference", PRIORITY_REFERENCE);
}
