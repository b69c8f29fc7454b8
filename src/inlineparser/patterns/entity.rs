//! Character and entity references (`&amp;`, `&#10003;`, `&#x2713;`) pass
//! through untouched (spec §4.3/§4.5, resolved against the original
//! implementation's `htmlparser` behavior: references are never stashed or
//! re-escaped, only recognized and left as-is). Matched syntactically, not
//! against the full named-entity table.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::tree::{Element, Value};

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);").unwrap())
}

pub struct EntityPattern;

impl InlinePattern for EntityPattern {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn find(&self, text: &str, _state: &EngineState) -> Option<InlineMatch> {
        let m = entity_re().find(text)?;
        let mut node = Element::fragment();
        node.text = Some(Value::atomic(m.as_str().to_string()));
        Some(InlineMatch {
            start: m.start(),
            end: m.end(),
            replacement: InlineReplacement::Node(node),
        })
    }
}
