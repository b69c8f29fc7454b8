//! Strips reference-style link definitions (`[label]: /url "title"`) out of
//! the line stream and records them in [`EngineState::link_references`]
//! (spec §4.3, §4.4 "reference definitions (stripped during preprocessing
//! when possible)"). A definition that a later block happens to swallow
//! first (e.g. inside a stashed raw-HTML block) is simply never seen here,
//! which is the documented "when possible" escape hatch.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine_state::{EngineState, LinkReference};
use crate::options::MarkdownOptions;
use crate::preprocessors::Preprocessor;

pub(crate) fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?x)
            ^\ {0,3}\[(?P<label>[^\]]+)\]:\s*
            (?P<url><[^<>]*>|[^\s]+)
            (?:\s+(?:"(?P<t1>[^"]*)"|'(?P<t2>[^']*)'|\((?P<t3>[^()]*)\)))?
            \s*$
            "#,
        )
        .expect("reference definition regex is valid")
    })
}

pub fn normalize_label(label: &str) -> String {
    label.trim().split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Parse a single line as a reference definition, returning its normalized
/// label and the [`LinkReference`] it names. Shared by the preprocessor and
/// by [`crate::blockparser::reference_def`], the block-level fallback for
/// definitions the preprocessor didn't strip.
pub(crate) fn parse_reference_line(line: &str) -> Option<(String, LinkReference)> {
    let caps = reference_re().captures(line)?;
    let label = normalize_label(&caps["label"]);
    let mut url = caps["url"].to_string();
    if url.starts_with('<') && url.ends_with('>') && url.len() >= 2 {
        url = url[1..url.len() - 1].to_string();
    }
    let title = caps
        .name("t1")
        .or_else(|| caps.name("t2"))
        .or_else(|| caps.name("t3"))
        .map(|m| m.as_str().to_string());
    Some((label, LinkReference { url, title }))
}

pub struct ReferencePreprocessor;

impl Preprocessor for ReferencePreprocessor {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn run(&self, lines: Vec<String>, state: &mut EngineState, _options: &MarkdownOptions) -> Vec<String> {
        lines
            .into_iter()
            .filter(|line| {
                let Some((label, reference)) = parse_reference_line(line) else {
                    return true;
                };
                state.link_references.entry(label).or_insert(reference);
                false
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MarkdownOptions;

    #[test]
    fn strips_definition_and_records_it() {
        let pre = ReferencePreprocessor;
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        let lines = vec![
            "see [foo]".to_string(),
            "".to_string(),
            r#"[foo]: /url "Title""#.to_string(),
        ];
        let out = pre.run(lines, &mut state, &options);
        assert_eq!(out, vec!["see [foo]".to_string(), "".to_string()]);
        let reference = state.link_references.get("foo").unwrap();
        assert_eq!(reference.url, "/url");
        assert_eq!(reference.title.as_deref(), Some("Title"));
    }

    #[test]
    fn angle_bracketed_url_is_unwrapped() {
        let pre = ReferencePreprocessor;
        let mut state = EngineState::new();
        let options = MarkdownOptions::default();
        pre.run(vec!["[a]: <http://example.com/x y>".to_string()], &mut state, &options);
        assert_eq!(state.link_references.get("a").unwrap().url, "http://example.com/x y");
    }
}
