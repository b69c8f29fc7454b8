//! Raw-HTML extractor (spec §4.3).
//!
//! A permissive, hand-rolled HTML tokenizer. Block-level start tags found
//! at the start of a line open a raw region that runs until its tag stack
//! empties; everything inside (including inline markup) is stashed verbatim
//! and replaced by a single placeholder plus a blank-line separator.
//!
//! Resolved against `examples/original_source/markdown/htmlparser.py` where
//! spec.md is silent on an exact edge case (the `inraw`/`intail`/tag-stack
//! state machine, that entity/character references pass through as literal
//! text unless they happen to fall inside an already-open raw region — they
//! are never themselves a reason to open one — and that `script`/`style`
//! content is scanned as opaque CDATA rather than re-tokenized for nested
//! tags or entities).

use std::collections::HashSet;

use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::preprocessors::Preprocessor;
use crate::stash::HtmlStash;

/// Elements whose content model is plain character data in HTML (`<script>`,
/// `<style>`). Once one of these opens a raw region, the tokenizer stops
/// dispatching on `<`/`&` inside it and scans only for the matching literal
/// end tag (spec §4.3), so markup-looking text in script/style bodies (a `<`
/// comparison, a bare `&&`) is never mistaken for a nested tag or entity.
const CDATA_CONTENT_ELEMENTS: &[&str] = &["script", "style"];

const BLOCK_LEVEL_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "iframe", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tbody", "td", "th", "thead", "tr", "ul", "canvas", "math", "noscript", "output", "progress",
    "script", "style", "svg", "video", "button", "map", "object", "embed", "audio", "select",
    "textarea", "colgroup", "caption", "legend", "optgroup", "option", "center", "source", "track",
];

fn is_block_level(tag: &str) -> bool {
    BLOCK_LEVEL_TAGS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Blank line at the very start of `text` (two newlines, possibly with
/// interleaved spaces).
fn starts_with_blank_line(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    let mut seen_newlines = 0;
    loop {
        match chars.peek() {
            Some(' ') => {
                chars.next();
            }
            Some('\n') => {
                chars.next();
                seen_newlines += 1;
                if seen_newlines == 2 {
                    return true;
                }
            }
            _ => return false,
        }
    }
}

pub struct HtmlBlockPreprocessor {
    empty_tags: HashSet<String>,
}

impl HtmlBlockPreprocessor {
    pub fn new() -> Self {
        let mut empty_tags = HashSet::new();
        empty_tags.insert("hr".to_string());
        Self { empty_tags }
    }

    pub fn with_empty_tags(empty_tags: HashSet<String>) -> Self {
        Self { empty_tags }
    }

    fn extract(&self, text: &str, stash: &mut HtmlStash) -> String {
        let mut ctx = Ctx {
            text,
            pos: 0,
            line_start: 0,
            inraw: false,
            intail: false,
            stack: Vec::new(),
            cdata_tag: None,
            cache: String::new(),
            out: String::new(),
            empty_tags: &self.empty_tags,
        };
        ctx.run(stash);
        ctx.out
    }
}

impl Default for HtmlBlockPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for HtmlBlockPreprocessor {
    fn name(&self) -> &'static str {
        "html_block"
    }

    fn run(&self, lines: Vec<String>, state: &mut EngineState, _options: &MarkdownOptions) -> Vec<String> {
        let text = lines.join("\n");
        let extracted = self.extract(&text, &mut state.stash);
        extracted.split('\n').map(|s| s.to_string()).collect()
    }
}

struct Ctx<'a> {
    text: &'a str,
    pos: usize,
    line_start: usize,
    inraw: bool,
    intail: bool,
    stack: Vec<String>,
    /// Set to the tag name while scanning the body of an open `<script>` or
    /// `<style>` element; while set, `run` bypasses `<`/`&` dispatch
    /// entirely and looks only for the matching literal end tag.
    cdata_tag: Option<String>,
    cache: String,
    out: String,
    empty_tags: &'a HashSet<String>,
}

impl<'a> Ctx<'a> {
    fn at_line_start(&self) -> bool {
        let offset = self.pos - self.line_start;
        if offset == 0 {
            return true;
        }
        if offset > 3 {
            return false;
        }
        self.text[self.line_start..self.pos].bytes().all(|b| b == b' ')
    }

    fn advance_newline_tracking(&mut self, consumed: &str, start: usize) {
        if let Some(rel) = consumed.rfind('\n') {
            self.line_start = start + rel + 1;
        }
    }

    fn sink(&mut self, s: &str) {
        if self.inraw {
            self.cache.push_str(s);
        } else {
            self.out.push_str(s);
        }
    }

    fn run(&mut self, stash: &mut HtmlStash) {
        let len = self.text.len();
        while self.pos < len {
            let start = self.pos;
            if let Some(tag) = self.cdata_tag.clone() {
                let rest = &self.text[self.pos..];
                match find_cdata_terminator(rest, &tag) {
                    Some(offset) => {
                        if offset > 0 {
                            let data = &rest[..offset];
                            self.cache.push_str(data);
                            self.advance_newline_tracking(data, start);
                            self.pos += offset;
                        }
                        self.cdata_tag = None;
                        continue;
                    }
                    None => {
                        self.cache.push_str(rest);
                        self.advance_newline_tracking(rest, start);
                        self.pos = len;
                        self.cdata_tag = None;
                        break;
                    }
                }
            }
            let rest = &self.text[self.pos..];
            let Some(special) = rest.find(|c| c == '<' || c == '&') else {
                self.sink(rest);
                self.advance_newline_tracking(rest, start);
                self.pos = len;
                break;
            };
            if special > 0 {
                let data = &rest[..special];
                self.handle_data(data);
                self.advance_newline_tracking(data, start);
                self.pos += special;
                continue;
            }
            if rest.starts_with('&') {
                self.handle_reference(stash);
            } else {
                self.handle_angle(stash);
            }
        }
        if !self.cache.is_empty() {
            let leftover = std::mem::take(&mut self.cache);
            let placeholder = stash.store(leftover);
            self.out.push_str(&placeholder);
        }
    }

    fn handle_data(&mut self, data: &str) {
        if self.intail && data.contains('\n') {
            self.intail = false;
        }
        self.sink(data);
    }

    /// Dispatch on whatever follows `&`: named or numeric character
    /// reference, or literal `&` if no terminating `;` is found.
    fn handle_reference(&mut self, _stash: &mut HtmlStash) {
        let start = self.pos;
        let rest = &self.text[self.pos..];
        if let Some(end) = scan_entity(rest) {
            let data = &rest[..end];
            self.handle_data(data);
            self.pos += end;
            return;
        }
        // No well-formed reference: emit the literal `&` and continue.
        self.handle_data("&");
        self.pos = start + 1;
    }

    /// Dispatch on whatever follows `<`.
    fn handle_angle(&mut self, stash: &mut HtmlStash) {
        let rest = &self.text[self.pos..];
        if let Some(end) = match_comment(rest) {
            self.finish_at_line_start(rest, end, stash, true);
        } else if let Some(end) = match_pi(rest) {
            self.finish_at_line_start(rest, end, stash, true);
        } else if let Some(end) = match_cdata(rest) {
            self.finish_at_line_start(rest, end, stash, true);
        } else if let Some(end) = match_declaration(rest) {
            self.finish_at_line_start(rest, end, stash, true);
        } else if rest.starts_with("</") {
            self.handle_end_tag_token(rest, stash);
        } else if let Some((tag, end, self_closing)) = match_start_tag(rest) {
            self.handle_start_tag_token(rest, &tag, end, self_closing, stash);
        } else {
            // Unterminated/unknown construct: literal `<`.
            self.handle_data("<");
            self.pos += 1;
        }
    }

    /// Shared path for comment/PI/declaration/CDATA: these are always
    /// block-level constructs (spec §4.3).
    fn finish_at_line_start(&mut self, rest: &str, end: usize, stash: &mut HtmlStash, is_block: bool) {
        let token = rest[..end].to_string();
        self.handle_empty_tag(&token, is_block, stash);
        self.pos += end;
    }

    fn handle_end_tag_token(&mut self, rest: &str, stash: &mut HtmlStash) {
        let Some(end) = rest.find('>').map(|i| i + 1) else {
            self.handle_data("<");
            self.pos += 1;
            return;
        };
        let text = &rest[..end];
        let tag = text[2..text.len() - 1].trim().to_ascii_lowercase();
        let tag = tag.split_whitespace().next().unwrap_or("").to_string();

        if self.inraw {
            self.cache.push_str(text);
            if let Some(idx) = self.stack.iter().rposition(|t| *t == tag) {
                self.stack.truncate(idx);
            }
            if self.stack.is_empty() {
                let after = &rest[end..];
                if starts_with_blank_line(after) {
                    self.cache.push('\n');
                } else {
                    self.intail = true;
                }
                self.inraw = false;
                let fragment = std::mem::take(&mut self.cache);
                let placeholder = stash.store(fragment);
                self.out.push_str(&placeholder);
                self.out.push_str("\n\n");
            }
        } else {
            self.out.push_str(text);
        }
        self.pos += end;
    }

    fn handle_start_tag_token(&mut self, rest: &str, tag: &str, end: usize, self_closing: bool, stash: &mut HtmlStash) {
        let forced_empty = self.empty_tags.contains(tag);
        if self_closing || forced_empty {
            let text = &rest[..end];
            self.handle_empty_tag(text, is_block_level(tag), stash);
            self.pos += end;
            return;
        }

        if is_block_level(tag) && (self.intail || (self.at_line_start() && !self.inraw)) {
            self.inraw = true;
            self.out.push('\n');
        }

        let text = &rest[..end];
        if self.inraw {
            self.stack.push(tag.to_string());
            self.cache.push_str(text);
            if CDATA_CONTENT_ELEMENTS.contains(&tag) {
                self.cdata_tag = Some(tag.to_string());
            }
        } else {
            self.out.push_str(text);
        }
        self.pos += end;
    }

    /// Standalone constructs (comments, PIs, declarations, CDATA, forced
    /// self-closing tags): stash as their own block when at line start and
    /// block-level, append to an open raw region, or pass through literally.
    fn handle_empty_tag(&mut self, data: &str, is_block: bool, stash: &mut HtmlStash) {
        if self.inraw || self.intail {
            self.cache.push_str(data);
            return;
        }
        if self.at_line_start() && is_block {
            let mut payload = data.to_string();
            let after = &self.text[self.pos + data.len()..];
            if starts_with_blank_line(after) {
                payload.push('\n');
            } else {
                self.intail = true;
            }
            if !self.out.ends_with("\n\n") && self.out.ends_with('\n') {
                self.out.push('\n');
            }
            let placeholder = stash.store(payload);
            self.out.push_str(&placeholder);
            self.out.push_str("\n\n");
        } else {
            self.out.push_str(data);
        }
    }
}

/// Scan a well-formed entity or character reference starting at `&`
/// (inclusive), requiring a terminating `;`. Returns the byte length of the
/// whole reference, or `None` if malformed (treated as literal data).
fn scan_entity(rest: &str) -> Option<usize> {
    debug_assert!(rest.starts_with('&'));
    let body = &rest[1..];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
        if !digits.is_empty() && hex[digits.len()..].starts_with(';') {
            return Some(1 + 2 + digits.len() + 1);
        }
        return None;
    }
    if let Some(num) = body.strip_prefix('#') {
        let digits: String = num.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() && num[digits.len()..].starts_with(';') {
            return Some(1 + 1 + digits.len() + 1);
        }
        return None;
    }
    let mut chars = body.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }
    let name_len = body
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '-' || *c == '.')
        .count();
    if body[name_len..].starts_with(';') {
        Some(1 + name_len + 1)
    } else {
        None
    }
}

/// First byte offset in `rest` where a literal `</tag ...>` end tag begins,
/// matched case-insensitively with no tolerance for anything but whitespace
/// between the tag name and `>` (script/style content is never tokenized
/// while this is being searched for, so nothing shorter-circuits the scan).
fn find_cdata_terminator(rest: &str, tag: &str) -> Option<usize> {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{tag}");
    let mut search_from = 0;
    while let Some(idx) = lower[search_from..].find(&needle) {
        let abs = search_from + idx;
        let after = &rest[abs + needle.len()..];
        let trimmed = after.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if trimmed.starts_with('>') {
            return Some(abs);
        }
        search_from = abs + needle.len();
    }
    None
}

fn match_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("<!--") {
        return None;
    }
    rest[4..].find("-->").map(|i| 4 + i + 3)
}

fn match_pi(rest: &str) -> Option<usize> {
    if !rest.starts_with("<?") {
        return None;
    }
    rest[2..].find("?>").map(|i| 2 + i + 2)
}

fn match_cdata(rest: &str) -> Option<usize> {
    if !rest.starts_with("<![CDATA[") {
        return None;
    }
    rest[9..].find("]]>").map(|i| 9 + i + 3)
}

fn match_declaration(rest: &str) -> Option<usize> {
    if !rest.starts_with("<!") {
        return None;
    }
    let after = rest.as_bytes().get(2).copied();
    if !after.map(|b| b.is_ascii_alphabetic()).unwrap_or(false) {
        return None;
    }
    rest[2..].find('>').map(|i| 2 + i + 1)
}

/// Scan a start tag `<tag attr="v" ...>` or `<tag .../>`. Returns
/// `(tag_name_lowercase, byte_length, is_self_closing)`.
fn match_start_tag(rest: &str) -> Option<(String, usize, bool)> {
    debug_assert!(rest.starts_with('<'));
    let after_lt = &rest[1..];
    let name_len = after_lt
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '-')
        .count();
    if name_len == 0 || !after_lt.chars().next()?.is_ascii_alphabetic() {
        return None;
    }
    let tag = after_lt[..name_len].to_ascii_lowercase();
    let gt = rest.find('>')?;
    let self_closing = rest[..gt].trim_end().ends_with('/');
    Some((tag, gt + 1, self_closing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stash::HtmlStash;

    fn extract(text: &str) -> (String, HtmlStash) {
        let mut stash = HtmlStash::new();
        let pre = HtmlBlockPreprocessor::new();
        let out = pre.extract(text, &mut stash);
        (out, stash)
    }

    #[test]
    fn plain_text_passes_through_untouched() {
        let (out, stash) = extract("hello *world*");
        assert_eq!(out, "hello *world*");
        assert!(stash.is_empty());
    }

    #[test]
    fn raw_paragraph_block_is_stashed_verbatim() {
        let (out, stash) = extract("<p>*raw*</p>");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.get(0), Some("<p>*raw*</p>"));
        assert!(out.contains(&crate::stash::STASH_SENTINEL.to_string()));
    }

    #[test]
    fn inline_tag_is_not_stashed() {
        let (out, stash) = extract("a <em>b</em> c");
        assert_eq!(out, "a <em>b</em> c");
        assert!(stash.is_empty());
    }

    #[test]
    fn nested_same_tag_tracks_stack_depth() {
        let (_out, stash) = extract("<div><div>inner</div></div>");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.get(0), Some("<div><div>inner</div></div>"));
    }

    #[test]
    fn standalone_comment_is_stashed() {
        let (_out, stash) = extract("<!-- a comment -->\n\ntext");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.get(0), Some("<!-- a comment -->\n"));
    }

    #[test]
    fn entity_reference_passes_through_literally() {
        let (out, stash) = extract("Ben &amp; Jerry");
        assert_eq!(out, "Ben &amp; Jerry");
        assert!(stash.is_empty());
    }

    #[test]
    fn malformed_entity_without_semicolon_is_literal() {
        let (out, _stash) = extract("A & B");
        assert_eq!(out, "A & B");
    }

    #[test]
    fn forced_empty_tag_hr_is_stashed_standalone() {
        let (_out, stash) = extract("<hr>\n\ntext");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.get(0), Some("<hr>\n"));
    }

    #[test]
    fn script_body_markup_is_not_tokenized_as_nested_tags() {
        let (_out, stash) = extract("<script>if (a < b) { x.write(\"<div>&oops\"); }</script>\n\ntext");
        assert_eq!(stash.len(), 1);
        assert_eq!(
            stash.get(0),
            Some("<script>if (a < b) { x.write(\"<div>&oops\"); }</script>\n")
        );
    }

    #[test]
    fn style_nested_inside_script_like_markup_stays_in_cdata_mode() {
        let (_out, stash) = extract("<style>.a::before { content: \"</di\" \"v>\"; }</style>\n\ntext");
        assert_eq!(stash.len(), 1);
        assert_eq!(stash.get(0), Some("<style>.a::before { content: \"</di\" \"v>\"; }</style>\n"));
    }
}
