//! Worked example of a caller-supplied extension: pipe tables are not a
//! built-in block processor, but the registry hooks `Extension` exposes are
//! enough to add one without touching engine internals.

use std::collections::VecDeque;
use std::rc::Rc;

use marco_down::blockparser::{shared::first_line, BlockParser, BlockProcessor};
use marco_down::engine_state::EngineState;
use marco_down::options::MarkdownOptions;
use marco_down::tree::{Element, Tag, Value};
use marco_down::{Extension, Markdown};
use regex::Regex;

fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn is_delimiter_row(line: &str) -> bool {
    let re = Regex::new(r"^\s*\|?\s*:?-{3,}:?\s*(\|\s*:?-{3,}:?\s*)*\|?\s*$").unwrap();
    re.is_match(line)
}

struct TableProcessor;

impl BlockProcessor for TableProcessor {
    fn name(&self) -> &'static str {
        "table"
    }

    fn test(&self, _parent: &Element, block: &str, _state: &EngineState, _options: &MarkdownOptions) -> bool {
        let header = first_line(block);
        let Some(delim) = block.split('\n').nth(1) else { return false };
        header.contains('|') && is_delimiter_row(delim)
    }

    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, _parser: &mut BlockParser) -> bool {
        let block = blocks.pop_front().unwrap_or_default();
        let mut lines = block.split('\n');
        let header = split_row(lines.next().unwrap_or(""));
        let _delim = lines.next();

        let mut table = Element::new(Tag::element("table"));
        let mut thead = Element::new(Tag::element("thead"));
        let mut hrow = Element::new(Tag::element("tr"));
        for cell in &header {
            let mut th = Element::new(Tag::element("th"));
            th.text = Some(Value::plain(cell.clone()));
            hrow.push_child(th);
        }
        thead.push_child(hrow);
        table.push_child(thead);

        let mut tbody = Element::new(Tag::element("tbody"));
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Element::new(Tag::element("tr"));
            for cell in split_row(line) {
                let mut td = Element::new(Tag::element("td"));
                td.text = Some(Value::plain(cell));
                row.push_child(td);
            }
            tbody.push_child(row);
        }
        table.push_child(tbody);
        parent.push_child(table);
        true
    }
}

struct TableExtension;

impl Extension for TableExtension {
    fn extend_markdown(&self, md: &mut Markdown) {
        // Above the paragraph fallback, below everything with a stronger
        // opinion about a leading `|`.
        md.block_processors.register(Rc::new(TableProcessor), "table", 15.0);
    }
}

#[test]
fn registered_table_extension_converts_a_pipe_table() {
    let mut md = Markdown::with_extensions(vec![Rc::new(TableExtension)]);
    let html = md
        .convert("| Name | Count |\n| --- | --- |\n| widgets | 3 |\n| gadgets | 7 |")
        .unwrap();
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>Name</th>"));
    assert!(html.contains("<td>widgets</td>"));
    assert!(html.contains("<td>7</td>"));
}

#[test]
fn text_without_a_delimiter_row_is_not_claimed_by_the_table_processor() {
    let mut md = Markdown::with_extensions(vec![Rc::new(TableExtension)]);
    let html = md.convert("a | b\nnot a table").unwrap();
    assert!(!html.contains("<table>"));
    assert!(html.contains("<p>"));
}

#[test]
fn first_line_helper_is_reused_by_the_test_hook() {
    assert_eq!(first_line("| a | b |\n| - | - |"), "| a | b |");
}
