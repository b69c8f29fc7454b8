//! Restores stash placeholders with the raw HTML they stand for (spec §4.2
//! "restored verbatim by a postprocessor"). Must run after every other
//! postprocessor, since a stashed fragment's bytes are not markdown and
//! shouldn't be touched by anything that scans the output for markdown-ish
//! patterns.

use crate::engine_state::EngineState;
use crate::postprocessors::Postprocessor;
use crate::stash::HtmlStash;

pub struct RawHtmlPostprocessor;

impl Postprocessor for RawHtmlPostprocessor {
    fn name(&self) -> &'static str {
        "raw_html"
    }

    fn run(&self, html: String, state: &EngineState) -> String {
        let placeholders = HtmlStash::find_placeholders(&html);
        if placeholders.is_empty() {
            return html;
        }
        let mut out = String::with_capacity(html.len());
        let mut last = 0;
        for (start, end, index) in placeholders {
            out.push_str(&html[last..start]);
            if let Some(fragment) = state.stash.get(index) {
                out.push_str(fragment);
            } else {
                log::warn!("stash placeholder #{index} has no matching fragment; dropping");
            }
            last = end;
        }
        out.push_str(&html[last..]);
        out
    }
}
