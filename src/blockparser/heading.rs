//! ATX (`# Heading`) and setext (`Heading\n---`) headings (spec §4.4).

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag};

/// No space is required between the `#` run and the heading text (spec §8's
/// own fixture has `"#foo"` render as `<h1>foo</h1>`): this follows the
/// original implementation's lenient ATX grammar rather than CommonMark's
/// stricter one, which would reject `#foo` outright.
fn atx_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(#{1,6})(.*?)#*\s*$").unwrap())
}

fn setext_underline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(=+|-+)\s*$").unwrap())
}

pub struct AtxHeadingProcessor;

impl BlockProcessor for AtxHeadingProcessor {
    fn name(&self) -> &'static str {
        "atxheading"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        block.split('\n').next().map(|l| atx_re().is_match(l)).unwrap_or(false)
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let mut lines = block.splitn(2, '\n');
        let first = lines.next().unwrap_or("");
        let Some(caps) = atx_re().captures(first) else {
            blocks.push_front(block);
            return false;
        };
        let level = caps[1].len().min(6) as u8;
        let text = caps.get(2).map(|m| m.as_str()).unwrap_or("").trim().to_string();
        if let Some(rest) = lines.next() {
            if !rest.trim().is_empty() {
                blocks.push_front(rest.to_string());
            }
        }
        let mut el = Element::new(Tag::element(format!("h{level}")));
        el.text = Some(text.into());
        parent.push_child(el);
        true
    }
}

pub struct SetextHeadingProcessor;

impl SetextHeadingProcessor {
    fn underline_level(block: &str) -> Option<(u8, usize)> {
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 2 {
            return None;
        }
        let caps = setext_underline_re().captures(lines[1])?;
        let marker = &caps[1];
        let level = if marker.starts_with('=') { 1 } else { 2 };
        Some((level, lines[0].len() + 1 + lines[1].len()))
    }
}

impl BlockProcessor for SetextHeadingProcessor {
    fn name(&self) -> &'static str {
        "setextheading"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        let lines: Vec<&str> = block.split('\n').collect();
        lines.len() >= 2 && !lines[0].trim().is_empty() && setext_underline_re().is_match(lines[1])
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let Some((level, consumed)) = Self::underline_level(&block) else {
            blocks.push_front(block);
            return false;
        };
        let text = block.split('\n').next().unwrap_or("").trim().to_string();
        let rest = &block[consumed.min(block.len())..];
        let rest = rest.strip_prefix('\n').unwrap_or(rest);
        if !rest.trim().is_empty() {
            blocks.push_front(rest.to_string());
        }
        let mut el = Element::new(Tag::element(format!("h{level}")));
        el.text = Some(text.into());
        parent.push_child(el);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockparser::BlockProcessorRegistry;

    #[test]
    fn atx_strips_trailing_hashes() {
        let mut registry = BlockProcessorRegistry::new();
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let mut parser = BlockParser::new(&mut registry, &mut state, &options);
        let mut root = Element::document_root();
        let mut blocks = VecDeque::new();
        blocks.push_back("## foo ##".to_string());
        AtxHeadingProcessor.run(&mut root, &mut blocks, &mut parser);
        let h = &root.children[0];
        assert_eq!(h.tag.local_name(), Some("h2"));
        assert_eq!(h.text.as_ref().unwrap().body, "foo");
    }

    #[test]
    fn setext_double_underline_is_h1() {
        let mut registry = BlockProcessorRegistry::new();
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let mut parser = BlockParser::new(&mut registry, &mut state, &options);
        let mut root = Element::document_root();
        let mut blocks = VecDeque::new();
        blocks.push_back("foo\n===".to_string());
        SetextHeadingProcessor.run(&mut root, &mut blocks, &mut parser);
        let h = &root.children[0];
        assert_eq!(h.tag.local_name(), Some("h1"));
        assert_eq!(h.text.as_ref().unwrap().body, "foo");
    }
}
