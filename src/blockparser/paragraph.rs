//! Fallback processor (spec §4.4, lowest priority): whatever no other
//! processor claimed becomes a `<p>`, raw text left for the inline engine.

use std::collections::VecDeque;

use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag};

pub struct ParagraphProcessor;

impl BlockProcessor for ParagraphProcessor {
    fn name(&self) -> &'static str {
        "paragraph"
    }

    fn test(&self, _parent: &Element, _block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        true
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let trimmed = block.trim();
        if trimmed.is_empty() {
            return true;
        }
        let mut p = Element::new(Tag::element("p"));
        p.text = Some(trimmed.to_string().into());
        parent.push_child(p);
        true
    }
}
