//! Indented code block (spec §4.4): requires >= `tab_length` spaces of
//! indent; emits literal text. The trailing `\n` is always retained. A
//! subsequent indented block immediately following one already emits into
//! the same `<code>` (separated by a blank line) rather than opening a new
//! `<pre>`.

use std::collections::VecDeque;

use crate::blockparser::shared::{dedent, first_line, leading_spaces};
use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag, Value};

pub struct CodeBlockProcessor;

impl BlockProcessor for CodeBlockProcessor {
    fn name(&self) -> &'static str {
        "code"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, options: &MarkdownOptions) -> bool {
        leading_spaces(first_line(block)) >= options.tab_length
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let dedented = dedent(&block, parser.options.tab_length);

        if let Some(last) = parent.children.last_mut() {
            if last.tag.local_name() == Some("pre") {
                if let Some(code) = last.children.first_mut() {
                    if code.tag.local_name() == Some("code") {
                        let text = code.text.get_or_insert_with(|| Value::atomic(String::new()));
                        text.push_str("\n\n");
                        text.push_str(&dedented);
                        text.push('\n');
                        return true;
                    }
                }
            }
        }

        let mut code = Element::new(Tag::element("code"));
        code.text = Some(Value::atomic(format!("{dedented}\n")));
        let mut pre = Element::new(Tag::element("pre"));
        pre.push_child(code);
        parent.push_child(pre);
        true
    }
}
