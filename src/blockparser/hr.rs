//! Thematic break / horizontal rule (spec §4.4 built-ins list).

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use crate::blockparser::shared::first_line;
use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag};

fn hr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(?:(-)[ \t]*(?:-[ \t]*){2,}|(_)[ \t]*(?:_[ \t]*){2,}|(\*)[ \t]*(?:\*[ \t]*){2,})$").unwrap())
}

pub struct HrProcessor;

impl BlockProcessor for HrProcessor {
    fn name(&self) -> &'static str {
        "hr"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        hr_re().is_match(first_line(block))
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let mut lines = block.splitn(2, '\n');
        let _matched_line = lines.next();
        if let Some(rest) = lines.next() {
            if !rest.trim().is_empty() {
                blocks.push_front(rest.to_string());
            }
        }
        parent.push_child(Element::new(Tag::element("hr")));
        true
    }
}
