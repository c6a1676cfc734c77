//! Resolution orchestration
//!
//! Runs the version sources in fixed priority order and returns the first
//! record any of them produces:
//!
//! 1. Export-substituted keywords (no root needed, no process spawned)
//! 2. Live checkout, queried at the source root
//! 3. Parent directory name of the source root
//! 4. The caller's default, or `unknown`
//!
//! The source root is the version file's absolute location with one trailing
//! component removed per segment of `versionfile_source`. Without a version
//! file location only the keywords can be consulted.

use std::path::{Path, PathBuf};

use crate::config::VersionConfig;
use crate::domain::{Keywords, VersionRecord};
use crate::runner::{CommandRunner, ProcessRunner};
use crate::sources::{KeywordSource, ParentDirSource, ResolveContext, VcsSource, VersionSource};

/// Resolves a version for one configured source tree.
///
/// Holds no state between calls: resolving twice in an unchanged environment
/// gives identical records.
pub struct Resolver<R: CommandRunner = ProcessRunner> {
    config: VersionConfig,
    keywords: Option<Keywords>,
    runner: R,
    versionfile: Option<PathBuf>,
}

impl Resolver<ProcessRunner> {
    /// Create a resolver that spawns real processes.
    pub fn new(config: VersionConfig) -> Self {
        let runner = ProcessRunner::new().hide_stderr(config.vcs.hide_stderr);
        Resolver::with_runner(config, runner)
    }
}

impl<R: CommandRunner> Resolver<R> {
    /// Create a resolver with a custom command runner.
    pub fn with_runner(config: VersionConfig, runner: R) -> Self {
        let keywords = Some(config.keywords.to_keywords());
        Resolver {
            config,
            keywords,
            runner,
            versionfile: None,
        }
    }

    /// Set the location of the version file, from which the root is derived.
    pub fn with_versionfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.versionfile = Some(path.into());
        self
    }

    /// Replace the configured keywords, e.g. with ones scraped from a file.
    pub fn with_keywords(mut self, keywords: Option<Keywords>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn config(&self) -> &VersionConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Source tree root, or `None` when the version file location is unknown.
    pub fn root(&self) -> Option<PathBuf> {
        let versionfile = self.versionfile.as_deref()?;
        let absolute = std::path::absolute(versionfile).ok()?;
        Some(walk_up(&absolute, self.config.versionfile_depth()))
    }

    /// Resolve the version.
    ///
    /// Never fails: when no source produces a record, `default` is returned
    /// unchanged, or `{version: "unknown", full: ""}` if it is `None`.
    ///
    /// # Arguments
    /// * `default` - Record to fall back to
    /// * `verbose` - Print diagnostics to stderr while resolving
    pub fn resolve(&self, default: Option<VersionRecord>, verbose: bool) -> VersionRecord {
        let default = default.unwrap_or_default();
        let root = self.root();
        let ctx = ResolveContext::new(root.as_deref(), verbose);

        let keywords = KeywordSource::new(self.keywords.clone(), self.config.tag_prefix.as_str());
        let vcs = VcsSource::new(
            &self.runner,
            self.config.vcs.commands.clone(),
            self.config.vcs.metadata_dir.as_str(),
            self.config.tag_prefix.as_str(),
        );
        let parentdir = ParentDirSource::new(self.config.parentdir_prefix.as_str());

        // Root-based sources answer `None` on their own when the root is unknown.
        let sources: [&dyn VersionSource; 3] = [&keywords, &vcs, &parentdir];

        if let Some(record) = sources.iter().find_map(|source| {
            let record = source.try_resolve(&ctx)?;
            ctx.note(format!("resolved {} via {}", record.version(), source.name()));
            Some(record)
        }) {
            return record;
        }

        if ctx.root.is_none() {
            ctx.note("unable to determine the source root, using default");
        }
        default
    }
}

fn walk_up(path: &Path, levels: usize) -> PathBuf {
    let mut root = path;
    for _ in 0..levels {
        if let Some(parent) = root.parent() {
            root = parent;
        }
    }
    root.to_path_buf()
}
