//! Highest-priority block processor: a block that is nothing but a stash
//! placeholder (a raw-HTML block handed off by the preprocessor) is emitted
//! directly, unwrapped, rather than falling through to the paragraph
//! processor. This is what lets `"<p>*raw*</p>"` round-trip byte-for-byte
//! instead of being wrapped in a second `<p>`.

use std::collections::VecDeque;

use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::stash::HtmlStash;
use crate::tree::{Element, Value};

pub struct EmptyBlockProcessor;

impl BlockProcessor for EmptyBlockProcessor {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        let trimmed = block.trim();
        !trimmed.is_empty() && HtmlStash::find_placeholders(trimmed).len() == 1 && {
            let (start, end, _) = HtmlStash::find_placeholders(trimmed)[0];
            start == 0 && end == trimmed.len()
        }
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let mut node = Element::fragment();
        node.text = Some(Value::atomic(block.trim().to_string()));
        parent.push_child(node);
        true
    }
}
