//! Inline (`[text](url "title")`) and reference-style (`[text][ref]`,
//! `[text]`) links (spec §4.5). Bracket and paren matching is balance-counted
//! by hand rather than regex, since the destination or link text may itself
//! contain nested brackets/parens that a backreference-free regex can't
//! track.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::preprocessors::reference::normalize_label;
use crate::tree::{Element, Tag, Value};

pub(crate) fn match_brackets(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1i32;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

pub(crate) fn match_parens(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1i32;
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn destination_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?x)
            ^\s*
            (?:<(?P<angle>[^<>]*)>|(?P<bare>\S*))
            (?:\s+(?:"(?P<t1>[^"]*)"|'(?P<t2>[^']*)'))?
            \s*$
            "#,
        )
        .expect("link destination regex is valid")
    })
}

pub(crate) fn parse_inline_destination(inner: &str) -> Option<(String, Option<String>)> {
    let caps = destination_re().captures(inner)?;
    let url = caps
        .name("angle")
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let title = caps.name("t1").or_else(|| caps.name("t2")).map(|m| m.as_str().to_string());
    Some((url, title))
}

pub struct LinkPattern;

impl LinkPattern {
    fn try_match_at(text: &str, bytes: &[u8], open: usize, state: &EngineState) -> Option<InlineMatch> {
        let close = match_brackets(bytes, open)?;
        let link_text = &text[open + 1..close];
        let pos = close + 1;

        if bytes.get(pos) == Some(&b'(') {
            if let Some(paren_close) = match_parens(bytes, pos) {
                let inner = &text[pos + 1..paren_close];
                if let Some((url, title)) = parse_inline_destination(inner) {
                    return Some(build_match(open, paren_close + 1, link_text, url, title));
                }
            }
        }

        let (end, label) = if bytes.get(pos) == Some(&b'[') {
            match match_brackets(bytes, pos) {
                Some(ref_close) => {
                    let raw_label = &text[pos + 1..ref_close];
                    let label = if raw_label.trim().is_empty() { link_text.to_string() } else { raw_label.to_string() };
                    (ref_close + 1, label)
                }
                None => (close + 1, link_text.to_string()),
            }
        } else {
            (close + 1, link_text.to_string())
        };

        let reference = state.link_references.get(&normalize_label(&label))?;
        Some(build_match(open, end, link_text, reference.url.clone(), reference.title.clone()))
    }
}

fn build_match(start: usize, end: usize, link_text: &str, url: String, title: Option<String>) -> InlineMatch {
    let mut a = Element::new(Tag::element("a"));
    a.attrs.insert("href", url);
    if let Some(title) = title {
        a.attrs.insert("title", title);
    }
    a.text = Some(Value::plain(link_text.to_string()));
    InlineMatch { start, end, replacement: InlineReplacement::Node(a) }
}

impl InlinePattern for LinkPattern {
    fn name(&self) -> &'static str {
        "link"
    }

    fn excluded_ancestors(&self) -> &'static [&'static str] {
        &["a"]
    }

    fn find(&self, text: &str, state: &EngineState) -> Option<InlineMatch> {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'[' {
                if let Some(m) = Self::try_match_at(text, bytes, i, state) {
                    return Some(m);
                }
            }
            i += 1;
        }
        None
    }
}
