//! Holder of opaque raw-HTML fragments (spec §3/§4.2/§6).
//!
//! A fragment stored via [`HtmlStash::store`] is replaced everywhere in the
//! pipeline by a placeholder token built from [`STASH_SENTINEL`]. The final
//! postprocessor (`postprocessors::raw_html`) is the only other piece of the
//! engine that parses this format.

/// A Unicode private-use code point. No Markdown construct or ordinary HTML
/// text can contain it, so it is safe to use as a placeholder delimiter that
/// survives block splitting, inline matching, and serialization untouched.
pub const STASH_SENTINEL: char = '\u{E020}';
const MARKER: &str = "wzxhzdk:";

#[derive(Debug, Default)]
pub struct HtmlStash {
    fragments: Vec<String>,
}

impl HtmlStash {
    pub fn new() -> Self {
        Self { fragments: Vec::new() }
    }

    /// Store `fragment` verbatim and return its placeholder token.
    pub fn store(&mut self, fragment: impl Into<String>) -> String {
        let index = self.fragments.len();
        self.fragments.push(fragment.into());
        let placeholder = format!("{STASH_SENTINEL}{MARKER}{index}{STASH_SENTINEL}");
        log::trace!("stashed fragment #{index} ({} bytes)", self.fragments[index].len());
        placeholder
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fragments.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn reset(&mut self) {
        self.fragments.clear();
    }

    /// Scan `text` for placeholder tokens. Returns `(start_byte, end_byte,
    /// index)` triples in left-to-right order.
    pub fn find_placeholders(text: &str) -> Vec<(usize, usize, usize)> {
        let mut out = Vec::new();
        let mut search_from = 0;
        while let Some(rel) = text[search_from..].find(STASH_SENTINEL) {
            let start = search_from + rel;
            let after_sentinel = start + STASH_SENTINEL.len_utf8();
            let Some(rest) = text[after_sentinel..].strip_prefix(MARKER) else {
                search_from = after_sentinel;
                continue;
            };
            let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
            if digits_len == 0 {
                search_from = after_sentinel;
                continue;
            }
            let digits = &rest[..digits_len];
            let after_digits = after_sentinel + MARKER.len() + digits_len;
            if !text[after_digits..].starts_with(STASH_SENTINEL) {
                search_from = after_sentinel;
                continue;
            }
            let end = after_digits + STASH_SENTINEL.len_utf8();
            if let Ok(index) = digits.parse::<usize>() {
                out.push((start, end, index));
            }
            search_from = end;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_retrieve_is_byte_identical() {
        let mut stash = HtmlStash::new();
        let placeholder = stash.store("<div>raw</div>");
        assert!(placeholder.starts_with(STASH_SENTINEL));
        assert_eq!(stash.get(0), Some("<div>raw</div>"));
    }

    #[test]
    fn placeholders_are_found_in_surrounding_text() {
        let mut stash = HtmlStash::new();
        let p0 = stash.store("one");
        let p1 = stash.store("two");
        let text = format!("before {p0} middle {p1} after");
        let found = HtmlStash::find_placeholders(&text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].2, 0);
        assert_eq!(found[1].2, 1);
    }

    #[test]
    fn reset_clears_fragments() {
        let mut stash = HtmlStash::new();
        stash.store("x");
        assert_eq!(stash.len(), 1);
        stash.reset();
        assert_eq!(stash.len(), 0);
    }
}
