//! Block-level fallback for reference-style link definitions the
//! preprocessor didn't strip (spec §4.4 "reference definitions (stripped
//! during preprocessing when possible)"): a definition sharing a block with
//! other content, for instance, survives preprocessing and is caught here.

use std::collections::VecDeque;

use crate::blockparser::shared::first_line;
use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::preprocessors::reference::parse_reference_line;
use crate::tree::Element;

pub struct ReferenceDefProcessor;

impl BlockProcessor for ReferenceDefProcessor {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        parse_reference_line(first_line(block)).is_some()
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let mut lines = block.splitn(2, '\n');
        let first = lines.next().unwrap_or("");
        let Some((label, reference)) = parse_reference_line(first) else {
            blocks.push_front(block);
            return false;
        };
        parser.state.link_references.entry(label).or_insert(reference);
        if let Some(rest) = lines.next() {
            if !rest.trim().is_empty() {
                blocks.push_front(rest.to_string());
            }
        }
        let _ = parent;
        true
    }
}
