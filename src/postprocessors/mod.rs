//! Postprocessors: the final pipeline stage (spec §4.2/§4.6), running on the
//! serialized HTML string rather than the tree. Only one ships by default —
//! restoring stashed raw-HTML fragments — since the escaping postprocessor
//! Python-Markdown needs for its own internal ampersand placeholder has no
//! counterpart here: [`crate::serializer`] escapes bare `&` at serialization
//! time and the entity inline pattern already passes recognized references
//! through atomically, so there is nothing left for a second pass to fix up.

pub mod raw_html;

use std::rc::Rc;

use crate::engine_state::EngineState;
use crate::registry::Registry;

pub trait Postprocessor {
    fn name(&self) -> &'static str;
    fn run(&self, html: String, state: &EngineState) -> String;
}

pub type PostprocessorRef = Rc<dyn Postprocessor>;
pub type PostprocessorRegistry = Registry<PostprocessorRef>;

pub const PRIORITY_RAW_HTML: f64 = 10.0;

pub fn register_builtins(registry: &mut PostprocessorRegistry) {
    registry.register(Rc::new(raw_html::RawHtmlPostprocessor), "raw_html", PRIORITY_RAW_HTML);
}

pub fn run_all(registry: &mut PostprocessorRegistry, mut html: String, state: &EngineState) -> String {
    let procs: Vec<PostprocessorRef> = registry.iter().cloned().collect();
    for proc in procs {
        log::debug!("running postprocessor {:?}", proc.name());
        html = proc.run(html, state);
    }
    html
}
