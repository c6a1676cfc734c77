//! Version sources, tried in priority order by the resolver
//!
//! - [keywords::KeywordSource]: export-substituted keywords, no process spawn
//! - [vcs::VcsSource]: live checkout queried through a [crate::runner::CommandRunner]
//! - [parentdir::ParentDirSource]: `<prefix><version>` directory naming
//!
//! Every source answers with `Option<VersionRecord>`; `None` means "no
//! information here", never an error.

pub mod keywords;
pub mod parentdir;
pub mod vcs;

pub use keywords::KeywordSource;
pub use parentdir::ParentDirSource;
pub use vcs::VcsSource;

use std::path::Path;

use crate::domain::VersionRecord;
use crate::ui;

/// Per-call inputs shared by all sources.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Source tree root, if it could be computed from the version file location.
    pub root: Option<&'a Path>,
    pub verbose: bool,
}

impl<'a> ResolveContext<'a> {
    pub fn new(root: Option<&'a Path>, verbose: bool) -> Self {
        ResolveContext { root, verbose }
    }

    /// Emit a diagnostic when verbose output was requested.
    pub fn note(&self, message: impl AsRef<str>) {
        if self.verbose {
            ui::display_note(message.as_ref());
        }
    }

    /// Emit a warning-level diagnostic when verbose output was requested.
    pub fn warn(&self, message: impl AsRef<str>) {
        if self.verbose {
            ui::display_warning(message.as_ref());
        }
    }
}

/// One strategy for discovering a version.
pub trait VersionSource {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Try to produce a record; `None` hands over to the next source.
    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<VersionRecord>;
}
