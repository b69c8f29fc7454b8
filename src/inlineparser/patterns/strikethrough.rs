//! `~~text~~` → `<del>`. Not part of the default registry (spec Non-goals
//! scope strikethrough out as a shipped extension); kept here so a caller
//! can opt in with `registry.register(Rc::new(StrikethroughPattern), ...)`.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::tree::{Element, Tag, Value};

fn strikethrough_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"~~(.+?)~~").unwrap())
}

pub struct StrikethroughPattern;

impl InlinePattern for StrikethroughPattern {
    fn name(&self) -> &'static str {
        "strikethrough"
    }

    fn find(&self, text: &str, _state: &EngineState) -> Option<InlineMatch> {
        let caps = strikethrough_re().captures(text)?;
        let whole = caps.get(0).unwrap();
        let mut el = Element::new(Tag::element("del"));
        el.text = Some(Value::plain(caps[1].to_string()));
        Some(InlineMatch { start: whole.start(), end: whole.end(), replacement: InlineReplacement::Node(el) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_tilde_becomes_del() {
        let m = StrikethroughPattern.find("a ~~b~~ c", &EngineState::new()).unwrap();
        match m.replacement {
            InlineReplacement::Node(el) => {
                assert_eq!(el.tag.local_name(), Some("del"));
                assert_eq!(el.text.unwrap().body, "b");
            }
            _ => panic!("expected node"),
        }
    }
}
