//! Ordered (`1.`) and unordered (`-`, `*`, `+`) lists (spec §4.4). Item
//! bodies and single-level lazy continuation lines are collected as raw text
//! for the inline engine to expand later; a continuation line that is itself
//! an indented sub-list is folded into the parent item's text rather than
//! split into a nested `<ol>`/`<ul>`.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use crate::blockparser::shared::first_line;
use crate::blockparser::{BlockParser, BlockProcessor};
use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::tree::{Element, Tag};

fn unordered_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}[*+-][ \t]+(.*)$").unwrap())
}

fn ordered_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(\d+)[.)][ \t]+(.*)$").unwrap())
}

pub struct ListProcessor {
    ordered: bool,
}

impl ListProcessor {
    pub fn ordered() -> Self {
        Self { ordered: true }
    }

    pub fn unordered() -> Self {
        Self { ordered: false }
    }

    fn marker_re(&self) -> &'static Regex {
        if self.ordered {
            ordered_marker_re()
        } else {
            unordered_marker_re()
        }
    }
}

impl BlockProcessor for ListProcessor {
    fn name(&self) -> &'static str {
        if self.ordered {
            "olist"
        } else {
            "ulist"
        }
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        self.marker_re().is_match(first_line(block))
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, parser: &mut BlockParser) -> bool {
        let Some(block) = blocks.pop_front() else { return false };
        let re = self.marker_re();
        let mut items: Vec<String> = Vec::new();
        let mut start_number: Option<u64> = None;
        for line in block.split('\n') {
            if let Some(caps) = re.captures(line) {
                if self.ordered {
                    if start_number.is_none() {
                        start_number = caps[1].parse::<u64>().ok();
                    }
                    items.push(caps[2].to_string());
                } else {
                    items.push(caps[1].to_string());
                }
            } else if let Some(last) = items.last_mut() {
                last.push('\n');
                last.push_str(line.trim_start());
            } else {
                items.push(line.trim_start().to_string());
            }
        }

        let tag = if self.ordered { "ol" } else { "ul" };
        let mut list_el = Element::new(Tag::element(tag));
        if self.ordered {
            // spec §4.4 "Lazy ordered lists": with `lazy_ol` enabled, the
            // list's own leading number sets where the displayed numbering
            // starts; disabled, every ordered list starts at 1.
            let start = if parser.options.lazy_ol { start_number.unwrap_or(1) } else { 1 };
            if start != 1 {
                list_el.attrs.insert("start", start.to_string());
            }
        }
        parser.state.parser_state.set("list");
        for item_text in items {
            let mut li = Element::new(Tag::element("li"));
            li.text = Some(item_text.trim().to_string().into());
            list_el.push_child(li);
        }
        parser.state.parser_state.reset();
        parent.push_child(list_el);
        true
    }
}
