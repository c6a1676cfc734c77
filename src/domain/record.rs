use std::fmt;

/// Marker used as `version` when nothing could be discovered.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Suffix appended by `describe --dirty` when the working tree has local changes.
pub const DIRTY_SUFFIX: &str = "-dirty";

/// The outcome of a version resolution.
///
/// `version` is a tag-derived string, a raw commit id or [`UNKNOWN_VERSION`];
/// `full` is the full commit id (possibly with [`DIRTY_SUFFIX`]) or empty.
/// Fields are private so a record cannot change after a resolver hands it out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRecord {
    version: String,
    full: String,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, full: impl Into<String>) -> Self {
        VersionRecord {
            version: version.into(),
            full: full.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    /// Whether the commit id carries the dirty-tree marker.
    pub fn is_dirty(&self) -> bool {
        self.full.ends_with(DIRTY_SUFFIX)
    }
}

impl Default for VersionRecord {
    fn default() -> Self {
        VersionRecord::new(UNKNOWN_VERSION, "")
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}
