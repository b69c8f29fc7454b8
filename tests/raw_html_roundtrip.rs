//! End-to-end round trips through the raw-HTML extractor, the stash, and the
//! restoring postprocessor, beyond the single case already covered by
//! `end_to_end.rs`.

use marco_down::Markdown;

#[test]
fn nested_block_tags_round_trip_byte_for_byte() {
    let mut md = Markdown::new();
    let html = md.convert("<div>\n<div>inner *not emphasized*</div>\n</div>").unwrap();
    assert!(html.contains("<div>\n<div>inner *not emphasized*</div>\n</div>"));
    assert!(!html.contains("<em>"));
}

#[test]
fn standalone_comment_round_trips_with_surrounding_paragraphs() {
    let mut md = Markdown::new();
    let html = md.convert("before\n\n<!-- a note -->\n\nafter").unwrap();
    assert!(html.contains("<p>before</p>"));
    assert!(html.contains("<!-- a note -->"));
    assert!(html.contains("<p>after</p>"));
}

#[test]
fn converting_twice_does_not_leak_a_stale_placeholder_into_the_second_document() {
    let mut md = Markdown::new();
    let first = md.convert("<div>first raw</div>").unwrap();
    assert!(first.contains("<div>first raw</div>"));

    let second = md.convert("just a paragraph").unwrap();
    assert_eq!(second, "<p>just a paragraph</p>");
    assert!(!second.contains('\u{E020}'));
}

#[test]
fn forced_empty_tag_block_is_preserved_alongside_markdown_content() {
    let mut md = Markdown::new();
    let html = md.convert("<hr>\n\nSome *text*.").unwrap();
    assert!(html.contains("<hr>"));
    assert!(html.contains("<em>text</em>"));
}
