//! Tree processors: the stage between block parsing and serialization (spec
//! §4.6). Each processor walks and mutates the whole document tree in place.

pub mod inline;
pub mod prettify;

use std::rc::Rc;

use crate::engine_state::EngineState;
use crate::inlineparser::InlinePatternRegistry;
use crate::options::MarkdownOptions;
use crate::registry::Registry;
use crate::tree::Element;

pub struct TreeprocessorContext<'a> {
    pub state: &'a mut EngineState,
    pub options: &'a MarkdownOptions,
    pub inline_patterns: &'a mut InlinePatternRegistry,
}

pub trait Treeprocessor {
    fn name(&self) -> &'static str;
    fn run(&self, root: &mut Element, ctx: &mut TreeprocessorContext);
}

pub type TreeprocessorRef = Rc<dyn Treeprocessor>;
pub type TreeprocessorRegistry = Registry<TreeprocessorRef>;

pub const PRIORITY_INLINE: f64 = 20.0;
pub const PRIORITY_PRETTIFY: f64 = 10.0;

pub fn register_builtins(registry: &mut TreeprocessorRegistry) {
    registry.register(Rc::new(inline::InlineTreeprocessor), "inline", PRIORITY_INLINE);
    registry.register(Rc::new(prettify::PrettifyTreeprocessor), "prettify", PRIORITY_PRETTIFY);
}

pub fn run_all(registry: &mut TreeprocessorRegistry, root: &mut Element, ctx: &mut TreeprocessorContext) {
    let procs: Vec<TreeprocessorRef> = registry.iter().cloned().collect();
    for proc in procs {
        log::debug!("running treeprocessor {:?}", proc.name());
        proc.run(root, ctx);
    }
}
