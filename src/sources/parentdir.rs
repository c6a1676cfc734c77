use crate::domain::VersionRecord;

use super::{ResolveContext, VersionSource};

/// Infers the version from a root directory named `<prefix><version>`,
/// as source tarballs conventionally unpack. Never yields a commit id.
#[derive(Debug, Clone)]
pub struct ParentDirSource {
    prefix: String,
}

impl ParentDirSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        ParentDirSource {
            prefix: prefix.into(),
        }
    }
}

impl VersionSource for ParentDirSource {
    fn name(&self) -> &'static str {
        "parentdir"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<VersionRecord> {
        let root = ctx.root?;
        let dirname = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        match dirname.strip_prefix(self.prefix.as_str()) {
            Some(version) if !version.is_empty() => Some(VersionRecord::new(version, "")),
            _ => {
                ctx.note(format!(
                    "guessing rootdir is <{}>, but <{}> does not start with prefix <{}>",
                    root.display(),
                    dirname,
                    self.prefix
                ));
                None
            }
        }
    }
}
