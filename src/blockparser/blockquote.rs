//! Blockquotes (spec §4.4). Strips the `>` marker (and one following space)
//! from every quoted line, treats un-marked lines as lazy continuation, and
//! recurses into `parse_chunk` on the dedented text so a blockquote's
//! contents are themselves full block-level markdown.

use std::collections::VecDeque;

use crate::blockparser::shared::first_line;
use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag};

fn starts_with_marker(line: &str) -> bool {
    let trimmed = line.strip_prefix("   ").or_else(|| line.strip_prefix("  ")).or_else(|| line.strip_prefix(' ')).unwrap_or(line);
    trimmed.starts_with('>')
}

fn strip_marker(line: &str) -> &str {
    let stripped = line.strip_prefix("   ").or_else(|| line.strip_prefix("  ")).or_else(|| line.strip_prefix(' ')).unwrap_or(line);
    match stripped.strip_prefix('>') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

pub struct BlockquoteProcessor;

impl BlockProcessor for BlockquoteProcessor {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        starts_with_marker(first_line(block))
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let dedented: String = block.split('\n').map(strip_marker).collect::<Vec<_>>().join("\n");

        let mut bq = Element::new(Tag::element("blockquote"));
        parser.state.parser_state.set("blockquote");
        parser.parse_chunk(&mut bq, &dedented);
        parser.state.parser_state.reset();
        parent.push_child(bq);
        true
    }
}
