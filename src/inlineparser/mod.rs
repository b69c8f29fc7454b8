//! Inline processing (spec §4.5): pattern objects find and replace spans of
//! raw text inside an element's `text`/`tail` with nested elements or
//! substituted text, driven by [`crate::treeprocessors::inline`] which walks
//! the tree built by the block parser.
//!
//! Rust's `regex` crate has no backreferences or lookaround, so patterns
//! that Python-Markdown expresses as a single regex (code spans matching a
//! backtick run length, emphasis flanking rules) are hand-rolled scanners
//! here instead; only the structurally simple patterns (escape, entity,
//! autolink) use `regex`.

pub mod patterns;

use std::rc::Rc;

use crate::engine_state::EngineState;
use crate::registry::Registry;
use crate::tree::Element;

/// What an [`InlinePattern`] replaces a matched span with.
pub enum InlineReplacement {
    /// Plain substitution text, itself still subject to inline processing at
    /// the splice point (used by e.g. the entity pattern, which never needs
    /// further recursion since it has no sub-structure, but callers treat it
    /// uniformly with `Node`).
    Text(String),
    /// A new element. If `el.text` is set and not atomic, the tree walker
    /// recurses into it before splicing (so link/emphasis text is itself
    /// inline-processed, subject to ancestor exclusion).
    Node(Element),
}

pub struct InlineMatch {
    pub start: usize,
    pub end: usize,
    pub replacement: InlineReplacement,
}

pub trait InlinePattern {
    fn name(&self) -> &'static str;

    /// Tag names under which this pattern must not fire (spec §4.5 "ancestor
    /// exclusion"), e.g. the code-span pattern excludes nothing but a link
    /// pattern typically excludes `a` to forbid nested links.
    fn excluded_ancestors(&self) -> &'static [&'static str] {
        &[]
    }

    /// Find the first (leftmost) match in `text`, if any.
    fn find(&self, text: &str, state: &EngineState) -> Option<InlineMatch>;
}

pub type InlinePatternRef = Rc<dyn InlinePattern>;
pub type InlinePatternRegistry = Registry<InlinePatternRef>;

pub const PRIORITY_BACKTICK: f64 = 190.0;
pub const PRIORITY_ESCAPE: f64 = 180.0;
pub const PRIORITY_AUTOLINK: f64 = 170.0;
pub const PRIORITY_LINK: f64 = 160.0;
pub const PRIORITY_IMAGE: f64 = 150.0;
pub const PRIORITY_ENTITY: f64 = 140.0;
/// Extensions should register above this if they need to win over emphasis.
pub const PRIORITY_EMPHASIS: f64 = 100.0;

pub fn register_builtins(registry: &mut InlinePatternRegistry) {
    registry.register(Rc::new(patterns::backtick::BacktickPattern), "backtick", PRIORITY_BACKTICK);
    registry.register(Rc::new(patterns::escape::EscapePattern), "escape", PRIORITY_ESCAPE);
    registry.register(Rc::new(patterns::autolink::AutolinkPattern), "autolink", PRIORITY_AUTOLINK);
    registry.register(Rc::new(patterns::link::LinkPattern), "link", PRIORITY_LINK);
    registry.register(Rc::new(patterns::image::ImagePattern), "image", PRIORITY_IMAGE);
    registry.register(Rc::new(patterns::entity::EntityPattern), "entity", PRIORITY_ENTITY);
    registry.register(Rc::new(patterns::emphasis::EmphasisPattern), "emphasis", PRIORITY_EMPHASIS);
    // Strikethrough ships as a pattern but is not wired into the default
    // registry; an extension opts in with `registry.register(Rc::new(
    // patterns::strikethrough::StrikethroughPattern), "strikethrough", ...)`.
}

pub(crate) enum InlineNode {
    Text(String),
    Elem(Element),
}

/// Repeatedly scan `text` against every non-excluded pattern (in registry
/// priority order, used only to break leftmost-match ties) and splice in
/// replacements, recursing into any replacement element's own text. Returns
/// the resulting flat run of text/element nodes.
pub(crate) fn run_patterns(
    text: &str,
    patterns: &[InlinePatternRef],
    state: &EngineState,
    ancestors: &[String],
) -> Vec<InlineNode> {
    let mut nodes = Vec::new();
    let mut remaining = text;
    loop {
        if remaining.is_empty() {
            break;
        }
        let mut best: Option<(usize, InlineMatch)> = None;
        for (idx, pat) in patterns.iter().enumerate() {
            if pat.excluded_ancestors().iter().any(|a| ancestors.iter().any(|anc| anc == a)) {
                continue;
            }
            if let Some(m) = pat.find(remaining, state) {
                let replace = match &best {
                    None => true,
                    Some((best_idx, best_match)) => m.start < best_match.start || (m.start == best_match.start && idx < *best_idx),
                };
                if replace {
                    best = Some((idx, m));
                }
            }
        }

        match best {
            None => {
                nodes.push(InlineNode::Text(remaining.to_string()));
                break;
            }
            Some((_, m)) => {
                if m.start > 0 {
                    nodes.push(InlineNode::Text(remaining[..m.start].to_string()));
                }
                match m.replacement {
                    InlineReplacement::Text(s) => nodes.push(InlineNode::Text(s)),
                    InlineReplacement::Node(mut el) => {
                        if let Some(inner) = el.text.take() {
                            if inner.atomic {
                                el.text = Some(inner);
                            } else {
                                let mut child_ancestors = ancestors.to_vec();
                                if let Some(name) = el.tag.local_name() {
                                    child_ancestors.push(name.to_string());
                                }
                                let inner_nodes = run_patterns(&inner.body, patterns, state, &child_ancestors);
                                attach_as_leading_children(&mut el, inner_nodes);
                            }
                        }
                        nodes.push(InlineNode::Elem(el));
                    }
                }
                remaining = &remaining[m.end..];
            }
        }
    }
    nodes
}

fn attach_as_leading_children(el: &mut Element, nodes: Vec<InlineNode>) {
    use crate::tree::Value;
    let mut children = Vec::new();
    for node in nodes {
        match node {
            InlineNode::Text(s) => match children.last_mut() {
                Some(last) => attach_tail_text(last, &s),
                None => {
                    el.text.get_or_insert_with(|| Value::plain(String::new())).push_str(&s);
                }
            },
            InlineNode::Elem(e) => children.push(e),
        }
    }
    el.children = children;
}

pub(crate) fn attach_tail_text(el: &mut Element, s: &str) {
    use crate::tree::Value;
    el.tail.get_or_insert_with(|| Value::plain(String::new())).push_str(s);
}
