//! Block-level parser (spec §4.4): splits text into blocks on blank-line
//! boundaries, then repeatedly hands the head block to the first
//! `BlockProcessor` whose `test` accepts it.

pub mod blockquote;
pub mod code;
pub mod empty;
pub mod heading;
pub mod hr;
pub mod list;
pub mod paragraph;
pub mod reference_def;
pub mod shared;

use std::collections::VecDeque;
use std::rc::Rc;

use crate::engine_state::EngineState;
use crate::options::MarkdownOptions;
use crate::registry::Registry;
use crate::tree::Element;

pub trait BlockProcessor {
    fn name(&self) -> &'static str;

    /// Decide whether this processor wants `block`. Must not mutate
    /// anything; `parser.test` calls across the registry happen against the
    /// same snapshot of `blocks.front()`.
    fn test(&self, parent: &Element, block: &str, state: &EngineState, options: &MarkdownOptions) -> bool;

    /// Consume (at least) `blocks[0]`, mutating `parent`'s children. Returns
    /// `true` on success. May push residual text back onto the front of
    /// `blocks`, and may recurse via `parser.parse_blocks`.
    fn run(&self, parent: &mut Element, blocks: &mut VecDeque<String>, parser: &mut BlockParser) -> bool;
}

pub type BlockProcessorRef = Rc<dyn BlockProcessor>;
pub type BlockProcessorRegistry = Registry<BlockProcessorRef>;

/// Priorities for the built-in block processors (highest first). Exact
/// values are otherwise unconstrained by spec.md; these are the numbers
/// this implementation pins (see DESIGN.md).
pub const PRIORITY_EMPTY: f64 = 100.0;
pub const PRIORITY_CODE: f64 = 90.0;
pub const PRIORITY_HR: f64 = 80.0;
pub const PRIORITY_OLIST: f64 = 70.0;
pub const PRIORITY_ULIST: f64 = 60.0;
pub const PRIORITY_SETEXT: f64 = 50.0;
pub const PRIORITY_ATX: f64 = 40.0;
pub const PRIORITY_BLOCKQUOTE: f64 = 30.0;
pub const PRIORITY_REFERENCE: f64 = 20.0;
/// Extensions (e.g. a table processor) should register above this and
/// below `PRIORITY_REFERENCE` so they win over the paragraph fallback.
pub const PRIORITY_PARAGRAPH: f64 = 0.0;

pub fn register_builtins(registry: &mut BlockProcessorRegistry) {
    registry.register(Rc::new(empty::EmptyBlockProcessor), "empty", PRIORITY_EMPTY);
    registry.register(Rc::new(code::CodeBlockProcessor), "code", PRIORITY_CODE);
    registry.register(Rc::new(hr::HrProcessor), "hr", PRIORITY_HR);
    registry.register(Rc::new(list::ListProcessor::ordered()), "olist", PRIORITY_OLIST);
    registry.register(Rc::new(list::ListProcessor::unordered()), "ulist", PRIORITY_ULIST);
    registry.register(Rc::new(heading::SetextHeadingProcessor), "setextheading", PRIORITY_SETEXT);
    registry.register(Rc::new(heading::AtxHeadingProcessor), "atxheading", PRIORITY_ATX);
    registry.register(Rc::new(blockquote::BlockquoteProcessor), "blockquote", PRIORITY_BLOCKQUOTE);
    registry.register(Rc::new(reference_def::ReferenceDefProcessor), "reference", PRIORITY_REFERENCE);
    registry.register(Rc::new(paragraph::ParagraphProcessor), "paragraph", PRIORITY_PARAGRAPH);
}

/// Split `text` into maximal runs of non-blank lines (spec Glossary
/// "Block"), separated by one or more blank (whitespace-only) lines.
pub fn split_blocks(text: &str) -> VecDeque<String> {
    let mut blocks = VecDeque::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push_back(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push_back(current.join("\n"));
    }
    blocks
}

pub struct BlockParser<'a> {
    registry: &'a mut BlockProcessorRegistry,
    pub state: &'a mut EngineState,
    pub options: &'a MarkdownOptions,
}

impl<'a> BlockParser<'a> {
    pub fn new(registry: &'a mut BlockProcessorRegistry, state: &'a mut EngineState, options: &'a MarkdownOptions) -> Self {
        Self { registry, state, options }
    }

    /// Direct access to the registry, so a processor's `run` can register
    /// (or deregister) another processor mid-stage. The running stage's own
    /// snapshot of iteration order, already captured by `parse_blocks`, is
    /// unaffected until the next `parse_blocks` call (spec §5).
    pub fn registry_mut(&mut self) -> &mut BlockProcessorRegistry {
        self.registry
    }

    pub fn parse_document(&mut self, lines: &[String]) -> Element {
        let mut root = Element::document_root();
        let text = lines.join("\n");
        self.parse_chunk(&mut root, &text);
        root
    }

    pub fn parse_chunk(&mut self, parent: &mut Element, text: &str) {
        let blocks = split_blocks(text);
        self.parse_blocks(parent, blocks);
    }

    pub fn parse_blocks(&mut self, parent: &mut Element, mut blocks: VecDeque<String>) {
        let procs: Vec<BlockProcessorRef> = self.registry.iter().cloned().collect();
        while let Some(block) = blocks.front().cloned() {
            let chosen = procs.iter().find(|p| p.test(parent, &block, self.state, self.options)).cloned();
            match chosen {
                Some(proc) => {
                    log::debug!("block processor {:?} handling block of {} bytes", proc.name(), block.len());
                    let consumed = proc.run(parent, &mut blocks, self);
                    if !consumed {
                        log::warn!("block processor {:?} declined after matching test(); dropping block to guarantee progress", proc.name());
                        if blocks.front().map(|b| b.as_str()) == Some(block.as_str()) {
                            blocks.pop_front();
                        }
                    }
                }
                None => {
                    // Unreachable as long as the paragraph fallback stays
                    // registered; guard against an empty registry anyway.
                    blocks.pop_front();
                }
            }
        }
    }
}
