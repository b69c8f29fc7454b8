//! Code spans: `` `code` `` (spec §4.5). Matches the shortest run of
//! backticks needed to delimit the span against a later run of the *same*
//! length — something Rust's backreference-free regex can't express, so this
//! is a small hand-rolled scanner instead.

use crate::engine_state::EngineState;
use crate::inlineparser::{InlineMatch, InlinePattern, InlineReplacement};
use crate::tree::{Element, Tag, Value};

pub struct BacktickPattern;

fn backtick_run(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() && bytes[j] == b'`' {
        j += 1;
    }
    j
}

/// If content is wrapped in exactly one leading and trailing space and isn't
/// pure whitespace, strip both (CommonMark code-span rule).
fn strip_one_space(content: &str) -> &str {
    if content.len() >= 2 && content.starts_with(' ') && content.ends_with(' ') && !content.trim().is_empty() {
        &content[1..content.len() - 1]
    } else {
        content
    }
}

impl InlinePattern for BacktickPattern {
    fn name(&self) -> &'static str {
        "backtick"
    }

    fn find(&self, text: &str, _state: &EngineState) -> Option<InlineMatch> {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'`' {
                i += 1;
                continue;
            }
            let open_end = backtick_run(bytes, i);
            let run_len = open_end - i;

            let mut k = open_end;
            let mut found_close: Option<usize> = None;
            while k < bytes.len() {
                if bytes[k] == b'`' {
                    let close_end = backtick_run(bytes, k);
                    if close_end - k == run_len {
                        found_close = Some(k);
                        break;
                    }
                    k = close_end;
                } else {
                    k += 1;
                }
            }

            if let Some(close_start) = found_close {
                let content = &text[open_end..close_start];
                let trimmed = strip_one_space(content);
                let mut code = Element::new(Tag::element("code"));
                code.text = Some(Value::atomic(trimmed.to_string()));
                return Some(InlineMatch {
                    start: i,
                    end: close_start + run_len,
                    replacement: InlineReplacement::Node(code),
                });
            }

            i = open_end;
        }
        None
    }
}
