//! Backslash escapes (spec §4.5): `\X` for `X` in the engine's configured
//! escaped-character set becomes the literal character `X`, protected from
//! every later inline pattern since it is committed straight to a text node
//! rather than fed back into the scan.

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};

pub struct EscapePattern;

impl InlinePattern for EscapePattern {
    fn name(&self) -> &'static str {
        "escape"
    }

    fn find(&self, text: &str, state: &EngineState) -> Option<InlineMatch> {
        let mut chars = text.char_indices().peekable();
        while let Some((idx, c)) = chars.next() {
            if c != '\\' {
                continue;
            }
            if let Some(&(next_idx, next_c)) = chars.peek() {
                if state.escaped_chars.contains(&next_c) {
                    return Some(InlineMatch {
                        start: idx,
                        end: next_idx + next_c.len_utf8(),
                        replacement: InlineReplacement::Text(next_c.to_string()),
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inlineparser::InlineReplacement;

    #[test]
    fn escaped_asterisk_becomes_literal() {
        let state = EngineState::new();
        let m = EscapePattern.find(r"a \*b\* c", &state).unwrap();
        assert_eq!(m.start, 2);
        match m.replacement {
            InlineReplacement::Text(s) => assert_eq!(s, "*"),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn backslash_before_non_escapable_char_is_not_a_match() {
        let state = EngineState::new();
        assert!(EscapePattern.find(r"a \qb", &state).is_none());
    }
}
