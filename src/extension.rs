//! The collaborator contract bundled extensions attach through (spec §6
//! "Extension interface"). The extensions themselves — tables, abbreviations,
//! wiki-links — are out of scope; this module specifies only the trait core
//! exposes so they can register into any of the five pipeline registries.

use crate::Markdown;

pub trait Extension {
    /// Register processors into any of `md`'s five registries.
    fn extend_markdown(&self, md: &mut Markdown);

    /// Invoked on every `Markdown::reset`. Extensions with their own
    /// per-conversion state (e.g. a footnote counter) override this;
    /// the default is a no-op.
    fn reset(&self) {}
}
