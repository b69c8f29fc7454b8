//! Atomic strings are never re-parsed as inline markdown, and never
//! re-escaped by the serializer, regardless of where they enter the tree
//! (spec §3 "Atomic string").

use marco_down::tree::{Element, Tag, Value};
use marco_down::{serializer, MarkdownOptions};

#[test]
fn atomic_text_with_markup_characters_serializes_verbatim() {
    let options = MarkdownOptions::default();
    let mut root = Element::fragment();
    let mut code = Element::new(Tag::element("code"));
    code.text = Some(Value::atomic("<b>*not bold*</b> & co"));
    root.push_child(code);

    let html = serializer::serialize(&root, &options);
    assert_eq!(html, "<code><b>*not bold*</b> & co</code>");
}

#[test]
fn plain_text_with_the_same_characters_is_escaped() {
    let options = MarkdownOptions::default();
    let mut root = Element::fragment();
    let mut p = Element::new(Tag::element("p"));
    p.text = Some(Value::plain("<b>&co"));
    root.push_child(p);

    let html = serializer::serialize(&root, &options);
    assert_eq!(html, "<p>&lt;b&gt;&amp;co</p>");
}
