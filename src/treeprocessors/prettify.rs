//! Adds a trailing newline to every top-level block element's tail so the
//! serialized document reads one block per line, matching the teacher's
//! general "don't make the user's terminal look like a wall of text" stance
//! on emitted output.

use crate::tree::Value;
use crate::treeprocessors::{Treeprocessor, TreeprocessorContext};

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "blockquote", "pre", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "table",
];

pub struct PrettifyTreeprocessor;

impl Treeprocessor for PrettifyTreeprocessor {
    fn name(&self) -> &'static str {
        "prettify"
    }

    fn run(&self, root: &mut crate::tree::Element, _ctx: &mut TreeprocessorContext) {
        for child in &mut root.children {
            prettify_block(child);
        }
    }
}

fn prettify_block(el: &mut crate::tree::Element) {
    if let Some(name) = el.tag.local_name() {
        if BLOCK_TAGS.contains(&name) {
            let tail = el.tail.get_or_insert_with(|| Value::plain(String::new()));
            if !tail.body.ends_with('\n') {
                tail.push_str("\n");
            }
        }
    }
    for child in &mut el.children {
        prettify_block(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::EngineState;
    use crate::inlineparser::InlinePatternRegistry;
    use crate::options::MarkdownOptions;
    use crate::tree::{Element, Tag};

    #[test]
    fn top_level_paragraph_gets_trailing_newline() {
        let mut registry = InlinePatternRegistry::new();
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let mut ctx = TreeprocessorContext { state: &mut state, options: &options, inline_patterns: &mut registry };

        let mut root = Element::new(Tag::Fragment);
        root.push_child(Element::named("p"));
        root.push_child(Element::named("p"));

        PrettifyTreeprocessor.run(&mut root, &mut ctx);

        assert_eq!(root.children[0].tail.as_ref().unwrap().body, "\n");
    }
}
