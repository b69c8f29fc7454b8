//! Applies the inline pattern registry to every non-atomic `text`/`tail` in
//! the tree, tracking the ancestor tag stack for pattern exclusion checks
//! (spec §4.5 "ancestor exclusion", §4.6).

use crate::inlineparser::{self, InlineNode, InlinePatternRef};
use crate::tree::{Element, Value};
use crate::treeprocessors::{Treeprocessor, TreeprocessorContext};

pub struct InlineTreeprocessor;

impl Treeprocessor for InlineTreeprocessor {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn run(&self, root: &mut Element, ctx: &mut TreeprocessorContext) {
        let patterns: Vec<InlinePatternRef> = ctx.inline_patterns.iter().cloned().collect();
        let mut ancestors = Vec::new();
        walk(root, &patterns, ctx.state, &mut ancestors);
    }
}

fn walk(el: &mut Element, patterns: &[InlinePatternRef], state: &crate::engine_state::EngineState, ancestors: &mut Vec<String>) {
    if let Some(name) = el.tag.local_name() {
        ancestors.push(name.to_string());
    }

    let old_children = std::mem::take(&mut el.children);
    let mut new_children: Vec<Element> = Vec::with_capacity(old_children.len());
    for mut child in old_children {
        walk(&mut child, patterns, state, ancestors);
        let tail = child.tail.take();
        new_children.push(child);
        if let Some(tail_val) = tail {
            if tail_val.atomic {
                new_children.last_mut().unwrap().tail = Some(tail_val);
            } else {
                let nodes = inlineparser::run_patterns(&tail_val.body, patterns, state, ancestors);
                attach_tail_nodes(&mut new_children, nodes);
            }
        }
    }

    if let Some(text) = el.text.take() {
        if text.atomic {
            el.text = Some(text);
        } else {
            let nodes = inlineparser::run_patterns(&text.body, patterns, state, ancestors);
            let mut leading = Vec::new();
            attach_own_text(el, nodes, &mut leading);
            leading.extend(new_children);
            new_children = leading;
        }
    }

    el.children = new_children;
    if el.tag.local_name().is_some() {
        ancestors.pop();
    }
}

fn attach_own_text(el: &mut Element, nodes: Vec<InlineNode>, leading: &mut Vec<Element>) {
    for node in nodes {
        match node {
            InlineNode::Text(s) => match leading.last_mut() {
                Some(last) => {
                    last.tail.get_or_insert_with(|| Value::plain(String::new())).push_str(&s);
                }
                None => {
                    el.text.get_or_insert_with(|| Value::plain(String::new())).push_str(&s);
                }
            },
            InlineNode::Elem(e) => leading.push(e),
        }
    }
}

fn attach_tail_nodes(children: &mut Vec<Element>, nodes: Vec<InlineNode>) {
    for node in nodes {
        match node {
            InlineNode::Text(s) => {
                let last = children.last_mut().expect("tail belongs to an already-pushed child");
                last.tail.get_or_insert_with(|| Value::plain(String::new())).push_str(&s);
            }
            InlineNode::Elem(e) => children.push(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::EngineState;
    use crate::inlineparser::InlinePatternRegistry;
    use crate::options::MarkdownOptions;
    use crate::tree::Tag;

    #[test]
    fn expands_emphasis_inside_paragraph_text() {
        let mut registry = InlinePatternRegistry::new();
        crate::inlineparser::register_builtins(&mut registry);
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let mut ctx = TreeprocessorContext { state: &mut state, options: &options, inline_patterns: &mut registry };

        let mut root = Element::new(Tag::Fragment);
        let mut p = Element::named("p");
        p.text = Some("a *b* c".to_string().into());
        root.push_child(p);

        InlineTreeprocessor.run(&mut root, &mut ctx);

        let p = &root.children[0];
        assert_eq!(p.text.as_ref().unwrap().body, "a ");
        assert_eq!(p.children[0].tag.local_name(), Some("em"));
        assert_eq!(p.children[0].text.as_ref().unwrap().body, "b");
        assert_eq!(p.children[0].tail.as_ref().unwrap().body, " c");
    }

    #[test]
    fn atomic_text_is_left_untouched() {
        let mut registry = InlinePatternRegistry::new();
        crate::inlineparser::register_builtins(&mut registry);
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let mut ctx = TreeprocessorContext { state: &mut state, options: &options, inline_patterns: &mut registry };

        let mut root = Element::new(Tag::Fragment);
        let mut code = Element::named("code");
        code.text = Some(crate::tree::Value::atomic("*not emphasis*"));
        root.push_child(code);

        InlineTreeprocessor.run(&mut root, &mut ctx);

        assert_eq!(root.children[0].text.as_ref().unwrap().body, "*not emphasis*");
        assert!(root.children[0].children.is_empty());
    }
}
