//! Serializes the document tree to its final HTML/XHTML string (spec §4.7).
//!
//! A single walk handles both output formats: XHTML self-closes void
//! elements (`<hr />`) and always quotes attribute values; HTML leaves void
//! elements unclosed (`<hr>`) and renders a boolean attribute bare when its
//! value is empty.

use std::collections::HashSet;

use crate::options::{MarkdownOptions, OutputFormat};
use crate::tree::{Attributes, Element, Tag, Value};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

const BOOLEAN_ATTRS: &[&str] = &[
    "checked", "disabled", "selected", "readonly", "required", "autofocus", "multiple", "novalidate", "formnovalidate",
];

fn is_void(local: &str) -> bool {
    VOID_ELEMENTS.contains(&local)
}

fn is_boolean_attr(name: &str) -> bool {
    BOOLEAN_ATTRS.contains(&name)
}

/// Escape `&`, `<`, `>`, and (when `in_attr`) `"` for safe inclusion in HTML
/// text or a quoted attribute value. Attribute values additionally escape
/// any control character below `0x20` as a numeric character reference
/// (spec §4.7); text content leaves such characters alone.
pub fn escape_html(s: &str, in_attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            other if in_attr && (other as u32) < 0x20 => {
                out.push_str(&format!("&#{};", other as u32));
            }
            other => out.push(other),
        }
    }
    out
}

pub fn serialize(root: &Element, options: &MarkdownOptions) -> String {
    let mut out = String::new();
    let mut declared_namespaces: HashSet<String> = HashSet::new();
    write_node(&mut out, root, options, &mut declared_namespaces);
    out
}

fn write_node(out: &mut String, el: &Element, options: &MarkdownOptions, declared_namespaces: &mut HashSet<String>) {
    match &el.tag {
        Tag::Fragment => {
            write_text(out, &el.text, false);
            for child in &el.children {
                write_node(out, child, options, declared_namespaces);
            }
        }
        Tag::Comment => {
            out.push_str("<!--");
            if let Some(text) = &el.text {
                out.push_str(&text.body);
            }
            out.push_str("-->");
        }
        Tag::ProcessingInstruction { target } => {
            out.push('<');
            out.push('?');
            out.push_str(target);
            if let Some(text) = &el.text {
                out.push(' ');
                out.push_str(&text.body);
            }
            out.push_str("?>");
        }
        Tag::Element { ns, local } => {
            write_element(out, el, ns.as_deref(), local, options, declared_namespaces);
        }
    }
    write_text(out, &el.tail, false);
}

fn write_element(
    out: &mut String,
    el: &Element,
    ns: Option<&str>,
    local: &str,
    options: &MarkdownOptions,
    declared_namespaces: &mut HashSet<String>,
) {
    let qualified = match ns {
        Some(ns) => format!("{ns}:{local}"),
        None => local.to_string(),
    };

    out.push('<');
    out.push_str(&qualified);

    if let Some(ns) = ns {
        if declared_namespaces.insert(ns.to_string()) {
            out.push(' ');
            out.push_str(&format!(r#"xmlns:{ns}="{ns}""#));
        }
    }

    write_attrs(out, &el.attrs, options);

    let void = is_void(local);
    if void {
        match options.output_format {
            OutputFormat::Xhtml => out.push_str(" />"),
            OutputFormat::Html => out.push('>'),
        }
        return;
    }
    out.push('>');

    write_text(out, &el.text, false);
    for child in &el.children {
        write_node(out, child, options, declared_namespaces);
    }

    out.push_str("</");
    out.push_str(&qualified);
    out.push('>');
}

fn write_attrs(out: &mut String, attrs: &Attributes, options: &MarkdownOptions) {
    for (key, value) in attrs.iter() {
        let is_bool = is_boolean_attr(key) && (value.is_empty() || value == key);
        if is_bool {
            match options.output_format {
                OutputFormat::Html => {
                    out.push(' ');
                    out.push_str(key);
                }
                OutputFormat::Xhtml => {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(key);
                    out.push('"');
                }
            }
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_html(value, true));
        out.push('"');
    }
}

fn write_text(out: &mut String, value: &Option<Value>, _in_attr: bool) {
    if let Some(value) = value {
        write_value(out, value, false);
    }
}

fn write_value(out: &mut String, value: &Value, in_attr: bool) {
    if value.atomic {
        out.push_str(&value.body);
    } else {
        out.push_str(&escape_html(&value.body, in_attr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Element as Elem, Value as Val};

    #[test]
    fn xhtml_self_closes_void_elements() {
        let mut options = MarkdownOptions::default();
        options.output_format = OutputFormat::Xhtml;
        let mut root = Elem::fragment();
        root.push_child(Elem::named("hr"));
        assert_eq!(serialize(&root, &options), "<hr />");
    }

    #[test]
    fn html_leaves_void_elements_unclosed() {
        let mut options = MarkdownOptions::default();
        options.output_format = OutputFormat::Html;
        let mut root = Elem::fragment();
        root.push_child(Elem::named("hr"));
        assert_eq!(serialize(&root, &options), "<hr>");
    }

    #[test]
    fn atomic_text_is_not_escaped() {
        let options = MarkdownOptions::default();
        let mut root = Elem::fragment();
        let mut pre = Elem::named("pre");
        pre.text = Some(Val::atomic("<script>"));
        root.push_child(pre);
        assert_eq!(serialize(&root, &options), "<pre><script></pre>");
    }

    #[test]
    fn plain_text_is_escaped() {
        let options = MarkdownOptions::default();
        let mut root = Elem::fragment();
        let mut p = Elem::named("p");
        p.text = Some("a < b & c".to_string().into());
        root.push_child(p);
        assert_eq!(serialize(&root, &options), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn attribute_values_are_quote_escaped() {
        let options = MarkdownOptions::default();
        let mut root = Elem::fragment();
        let mut a = Elem::named("a");
        a.attrs.insert("title", r#"say "hi""#);
        root.push_child(a);
        assert_eq!(serialize(&root, &options), r#"<a title="say &quot;hi&quot;"></a>"#);
    }

    #[test]
    fn attribute_control_chars_become_numeric_references() {
        let options = MarkdownOptions::default();
        let mut root = Elem::fragment();
        let mut a = Elem::named("a");
        a.attrs.insert("title", "a\u{1}b");
        root.push_child(a);
        assert_eq!(serialize(&root, &options), r#"<a title="a&#1;b"></a>"#);
    }

    #[test]
    fn boolean_attr_is_bare_in_html_and_self_valued_in_xhtml() {
        let mut html_opts = MarkdownOptions::default();
        html_opts.output_format = OutputFormat::Html;
        let mut root = Elem::named("input");
        root.attrs.insert("checked", "");
        assert_eq!(serialize(&root, &html_opts), "<input checked>");

        let xhtml_opts = MarkdownOptions::default();
        let mut root = Elem::named("input");
        root.attrs.insert("checked", "");
        assert_eq!(serialize(&root, &xhtml_opts), r#"<input checked="checked" />"#);
    }
}
