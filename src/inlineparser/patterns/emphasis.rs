//! `**strong**` / `__strong__` and `*em*` / `_em_` (spec §4.5). Strong is
//! tried before emphasis so `**x**` isn't mistaken for emphasis around a
//! literal `*`. Triple-marker combinations (`***x***`/`___x___`) are tried
//! first of all: `***x***` parses as nested `strong>em` (spec §4.5) by
//! reducing to the single-marker case — the outer match's replacement text
//! is the inner content rewrapped in one marker (`*x*`), which the ordinary
//! recursive re-scan over this same pattern then turns into `<em>x</em>`
//! inside the `<strong>`, with no separate triple-marker element type
//! needed.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::tree::{Element, Tag, Value};

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:\*\*\*(?P<strong3_star>.+?)\*\*\*)|(?:___(?P<strong3_under>.+?)___)|(?:\*\*(?P<strong_star>.+?)\*\*)|(?:__(?P<strong_under>.+?)__)|(?:\*(?P<em_star>[^*]+?)\*)|(?:_(?P<em_under>[^_]+?)_)",
        )
        .expect("emphasis regex is valid")
    })
}

pub struct EmphasisPattern;

impl InlinePattern for EmphasisPattern {
    fn name(&self) -> &'static str {
        "emphasis"
    }

    fn find(&self, text: &str, _state: &EngineState) -> Option<InlineMatch> {
        let caps = emphasis_re().captures(text)?;
        let whole = caps.get(0).unwrap();
        let (tag, inner) = if let Some(m) = caps.name("strong3_star") {
            ("strong", format!("*{}*", m.as_str()))
        } else if let Some(m) = caps.name("strong3_under") {
            ("strong", format!("_{}_", m.as_str()))
        } else if let Some(m) = caps.name("strong_star").or_else(|| caps.name("strong_under")) {
            ("strong", m.as_str().to_string())
        } else {
            let m = caps.name("em_star").or_else(|| caps.name("em_under")).unwrap();
            ("em", m.as_str().to_string())
        };
        let mut el = Element::new(Tag::element(tag));
        el.text = Some(Value::plain(inner));
        Some(InlineMatch { start: whole.start(), end: whole.end(), replacement: InlineReplacement::Node(el) })
    }
}
