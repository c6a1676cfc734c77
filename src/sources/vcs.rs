use std::path::Path;

use crate::domain::record::DIRTY_SUFFIX;
use crate::domain::VersionRecord;
use crate::runner::CommandRunner;

use super::{ResolveContext, VersionSource};

/// Arguments of the describe-style query: nearest tag, distance, dirty marker.
pub const DESCRIBE_ARGS: [&str; 4] = ["describe", "--tags", "--dirty", "--always"];

/// Arguments of the full commit id query.
pub const REV_PARSE_ARGS: [&str; 2] = ["rev-parse", "HEAD"];

/// Queries the version-control tool in a live checkout.
///
/// Only applies when `metadata_dir` exists under the root. Both the describe
/// output and the commit id are required; either failing yields `None`.
pub struct VcsSource<R: CommandRunner> {
    runner: R,
    commands: Vec<String>,
    metadata_dir: String,
    tag_prefix: String,
}

impl<R: CommandRunner> VcsSource<R> {
    pub fn new(
        runner: R,
        commands: Vec<String>,
        metadata_dir: impl Into<String>,
        tag_prefix: impl Into<String>,
    ) -> Self {
        VcsSource {
            runner,
            commands,
            metadata_dir: metadata_dir.into(),
            tag_prefix: tag_prefix.into(),
        }
    }

    /// Run one query, collapsing every failure to `None`.
    ///
    /// A missing executable is an ordinary probe miss; anything else means
    /// the tool ran and failed, and is reported as a warning.
    fn query(&self, args: &[&str], root: &Path, ctx: &ResolveContext<'_>) -> Option<String> {
        match self.runner.run(&self.commands, args, root) {
            Ok(stdout) => Some(stdout),
            Err(e) if e.is_not_found() => {
                ctx.note(e.to_string());
                None
            }
            Err(e) => {
                ctx.warn(e.to_string());
                None
            }
        }
    }
}

impl<R: CommandRunner> VersionSource for VcsSource<R> {
    fn name(&self) -> &'static str {
        "vcs"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<VersionRecord> {
        let root = ctx.root?;

        if !root.join(&self.metadata_dir).exists() {
            ctx.note(format!("no {} in {}", self.metadata_dir, root.display()));
            return None;
        }

        let described = self
            .query(&DESCRIBE_ARGS, root, ctx)
            .filter(|out| !out.is_empty())?;

        let Some(tag) = described.strip_prefix(self.tag_prefix.as_str()) else {
            ctx.note(format!(
                "tag <{}> does not start with prefix <{}>",
                described, self.tag_prefix
            ));
            return None;
        };
        if tag.is_empty() {
            return None;
        }

        let mut full = self.query(&REV_PARSE_ARGS, root, ctx)?.trim().to_string();
        if tag.ends_with(DIRTY_SUFFIX) {
            full.push_str(DIRTY_SUFFIX);
        }

        Some(VersionRecord::new(tag, full))
    }
}
