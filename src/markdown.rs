//! The core facade (spec §4.8): owns the five processor registries plus
//! per-conversion state, and drives `convert()` through preprocessing, block
//! parsing, tree processing, serialization, and postprocessing.

use std::rc::Rc;

use crate::blockparser::{self, BlockParser, BlockProcessorRegistry};
use crate::engine_state::EngineState;
use crate::error::Result;
use crate::extension::Extension;
use crate::inlineparser::{self, InlinePatternRegistry};
use crate::options::MarkdownOptions;
use crate::postprocessors::{self, PostprocessorRegistry};
use crate::preprocessors::{self, PreprocessorRegistry};
use crate::serializer;
use crate::treeprocessors::{self, TreeprocessorContext, TreeprocessorRegistry};

/// A configured conversion engine. Registries are public so extensions (and
/// callers assembling a custom pipeline by hand) can register, deregister,
/// or reorder processors directly.
pub struct Markdown {
    pub preprocessors: PreprocessorRegistry,
    pub block_processors: BlockProcessorRegistry,
    pub tree_processors: TreeprocessorRegistry,
    pub inline_patterns: InlinePatternRegistry,
    pub postprocessors: PostprocessorRegistry,
    options: MarkdownOptions,
    state: EngineState,
    extensions: Vec<Rc<dyn Extension>>,
}

impl Markdown {
    /// A new engine with every built-in processor registered and default
    /// options.
    pub fn new() -> Self {
        Self::with_options(MarkdownOptions::default())
    }

    pub fn with_options(options: MarkdownOptions) -> Self {
        let mut preprocessors = PreprocessorRegistry::new();
        preprocessors::register_builtins(&mut preprocessors);
        let mut block_processors = BlockProcessorRegistry::new();
        blockparser::register_builtins(&mut block_processors);
        let mut tree_processors = TreeprocessorRegistry::new();
        treeprocessors::register_builtins(&mut tree_processors);
        let mut inline_patterns = InlinePatternRegistry::new();
        inlineparser::register_builtins(&mut inline_patterns);
        let mut postprocessors = PostprocessorRegistry::new();
        postprocessors::register_builtins(&mut postprocessors);

        Self {
            preprocessors,
            block_processors,
            tree_processors,
            inline_patterns,
            postprocessors,
            options,
            state: EngineState::new(),
            extensions: Vec::new(),
        }
    }

    /// Build an engine and immediately register every extension in order
    /// (spec §6: extensions are applied in the order given).
    pub fn with_extensions(extensions: Vec<Rc<dyn Extension>>) -> Self {
        let mut md = Self::new();
        for ext in extensions {
            md.register_extension(ext);
        }
        md
    }

    /// Register an extension, calling its `extend_markdown` hook
    /// immediately and keeping a handle so `reset` can call its `reset` hook
    /// too.
    pub fn register_extension(&mut self, ext: Rc<dyn Extension>) {
        ext.extend_markdown(self);
        self.extensions.push(ext);
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Reinitialize per-conversion state (spec §3 "Lifecycle"): the stash,
    /// parser state stack, and reference table are cleared; extensions with
    /// their own per-conversion state are given a chance to reset too.
    /// Registries and their registered processors are untouched.
    pub fn reset(&mut self) {
        self.state.reset();
        for ext in &self.extensions {
            ext.reset();
        }
    }

    /// Convert a markdown document to HTML (spec §4.8). Resets
    /// per-conversion state first, so repeated calls on the same `Markdown`
    /// never leak a previous document's stash or reference table.
    pub fn convert(&mut self, source: &str) -> Result<String> {
        self.reset();

        let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = normalized.strip_prefix('\u{FEFF}').unwrap_or(&normalized);
        let mut lines: Vec<String> = normalized.split('\n').map(|s| s.to_string()).collect();

        let pre_procs: Vec<_> = self.preprocessors.iter().cloned().collect();
        for proc in pre_procs {
            log::debug!("running preprocessor {:?}", proc.name());
            lines = proc.run(lines, &mut self.state, &self.options);
        }

        let mut root = {
            let mut parser = BlockParser::new(&mut self.block_processors, &mut self.state, &self.options);
            parser.parse_document(&lines)
        };

        let mut ctx = TreeprocessorContext {
            state: &mut self.state,
            options: &self.options,
            inline_patterns: &mut self.inline_patterns,
        };
        treeprocessors::run_all(&mut self.tree_processors, &mut root, &mut ctx);

        let html = serializer::serialize(&root, &self.options);
        let html = postprocessors::run_all(&mut self.postprocessors, html, &self.state);

        // Prettify only guarantees a separating newline *between* blocks;
        // the facade itself trims the leading/trailing whitespace that
        // leaves on the outermost blocks (spec §8 end-to-end fixtures never
        // show a trailing newline on the final document).
        Ok(html.trim().to_string())
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}
