//! Angle-bracket autolinks: `<http://example.com>`, `<foo@example.com>`
//! (spec §4.5 built-ins list).

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::tree::{Element, Tag, Value};

fn autolink_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<(?:(?P<url>[A-Za-z][A-Za-z0-9+.\-]*:[^<>\s]*)|(?P<email>[^<>\s@]+@[^<>\s]+))>").unwrap()
    })
}

pub struct AutolinkPattern;

impl InlinePattern for AutolinkPattern {
    fn name(&self) -> &'static str {
        "autolink"
    }

    fn excluded_ancestors(&self) -> &'static [&'static str] {
        &["a"]
    }

    fn find(&self, text: &str, _state: &EngineState) -> Option<InlineMatch> {
        let caps = autolink_re().captures(text)?;
        let whole = caps.get(0).unwrap();
        let (content, href) = if let Some(url) = caps.name("url") {
            (url.as_str().to_string(), url.as_str().to_string())
        } else {
            let email = caps.name("email").unwrap().as_str();
            (email.to_string(), format!("mailto:{email}"))
        };
        let mut a = Element::new(Tag::element("a"));
        a.attrs.insert("href", href);
        a.text = Some(Value::atomic(content));
        Some(InlineMatch {
            start: whole.start(),
            end: whole.end(),
            replacement: InlineReplacement::Node(a),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_autolink_keeps_scheme_as_href() {
        let m = AutolinkPattern.find("see <http://example.com>", &EngineState::new()).unwrap();
        match m.replacement {
            InlineReplacement::Node(el) => assert_eq!(el.attrs.get("href"), Some("http://example.com")),
            _ => panic!("expected node"),
        }
    }

    #[test]
    fn email_autolink_gets_mailto_prefix() {
        let m = AutolinkPattern.find("<foo@example.com>", &EngineState::new()).unwrap();
        match m.replacement {
            InlineReplacement::Node(el) => assert_eq!(el.attrs.get("href"), Some("mailto:foo@example.com")),
            _ => panic!("expected node"),
        }
    }
}
