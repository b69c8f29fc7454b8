//! Images: `![alt](url "title")`, `![alt][ref]` (spec §4.5). Reuses the
//! balance-counted bracket/paren scanner from [`super::link`]; unlike links,
//! the alt text is stored as an attribute rather than recursed into, since an
//! image has no nested inline content.

use crate::engine_state::EngineState;
use crate::inlineparser::patterns::link::{match_brackets, match_parens, parse_inline_destination};
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::preprocessors::reference::normalize_label;
use crate::tree::{Element, Tag};

pub struct ImagePattern;

impl ImagePattern {
    fn try_match_at(text: &str, bytes: &[u8], bang: usize, state: &EngineState) -> Option<InlineMatch> {
        if bytes.get(bang + 1) != Some(&b'[') {
            return None;
        }
        let open = bang + 1;
        let close = match_brackets(bytes, open)?;
        let alt = &text[open + 1..close];
        let pos = close + 1;

        if bytes.get(pos) == Some(&b'(') {
            if let Some(paren_close) = match_parens(bytes, pos) {
                let inner = &text[pos + 1..paren_close];
                if let Some((url, title)) = parse_inline_destination(inner) {
                    return Some(build_match(bang, paren_close + 1, alt, url, title));
                }
            }
        }

        let (end, label) = if bytes.get(pos) == Some(&b'[') {
            match match_brackets(bytes, pos) {
                Some(ref_close) => {
                    let raw_label = &text[pos + 1..ref_close];
                    let label = if raw_label.trim().is_empty() { alt.to_string() } else { raw_label.to_string() };
                    (ref_close + 1, label)
                }
                None => (close + 1, alt.to_string()),
            }
        } else {
            (close + 1, alt.to_string())
        };

        let reference = state.link_references.get(&normalize_label(&label))?;
        Some(build_match(bang, end, alt, reference.url.clone(), reference.title.clone()))
    }
}

fn build_match(start: usize, end: usize, alt: &str, url: String, title: Option<String>) -> InlineMatch {
    let mut img = Element::new(Tag::element("img"));
    img.attrs.insert("src", url);
    img.attrs.insert("alt", alt.to_string());
    if let Some(title) = title {
        img.attrs.insert("title", title);
    }
    InlineMatch { start, end, replacement: InlineReplacement::Node(img) }
}

impl InlinePattern for ImagePattern {
    fn name(&self) -> &'static str {
        "image"
    }

    fn find(&self, text: &str, state: &EngineState) -> Option<InlineMatch> {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'!' {
                if let Some(m) = Self::try_match_at(text, bytes, i, state) {
                    return Some(m);
                }
            }
            i += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_image_with_alt_and_title() {
        let m = ImagePattern.find(r#"![alt](/img.png "Title")"#, &EngineState::new()).unwrap();
        match m.replacement {
            InlineReplacement::Node(el) => {
                assert_eq!(el.tag.local_name(), Some("img"));
                assert_eq!(el.attrs.get("src"), Some("/img.png"));
                assert_eq!(el.attrs.get("alt"), Some("alt"));
                assert_eq!(el.attrs.get("title"), Some("Title"));
            }
            _ => panic!("expected node"),
        }
    }
}
