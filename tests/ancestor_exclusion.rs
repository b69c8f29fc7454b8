//! A pattern's `excluded_ancestors` stops it from firing inside its own
//! output: both the link and autolink patterns exclude `a`, so neither
//! nests a second anchor inside link text (spec §4.5 "ancestor exclusion").

use marco_down::Markdown;

#[test]
fn a_link_url_inside_link_text_is_not_turned_into_a_nested_anchor() {
    let mut md = Markdown::new();
    let html = md.convert("[see <https://example.com>](https://example.org)").unwrap();
    assert!(html.contains(r#"<a href="https://example.org">"#));
    // The autolink inside the outer anchor's text must stay literal, not
    // become a second `<a>` nested inside the first.
    assert_eq!(html.matches("<a ").count(), 1);
    assert!(html.contains("see &lt;https://example.com&gt;"));
}

#[test]
fn emphasis_is_still_expanded_inside_link_text() {
    let mut md = Markdown::new();
    let html = md.convert("[a *bold* word](https://example.com)").unwrap();
    assert!(html.contains(r#"<a href="https://example.com">a <em>bold</em> word</a>"#));
}

#[test]
fn a_bracketed_image_inside_link_text_still_renders_as_an_image() {
    let mut md = Markdown::new();
    let html = md.convert("[![alt](img.png)](https://example.com)").unwrap();
    assert!(html.contains(r#"<a href="https://example.com">"#));
    assert!(html.contains(r#"<img src="img.png" alt="alt">"#));
}
