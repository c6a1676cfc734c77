use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Ref-names placeholder as written in the source, before `git archive` expands it.
pub const UNEXPANDED_REFNAMES: &str = "$Format:%d$";

/// Commit-hash placeholder as written in the source, before `git archive` expands it.
pub const UNEXPANDED_FULL: &str = "$Format:%H$";

/// Leading text of any placeholder that was never substituted.
pub const UNEXPANDED_MARKER: &str = "$Format";

/// Decoration newer git versions put in front of tag refs ("tag: v1.0").
pub const TAG_DECORATION: &str = "tag: ";

const REFNAMES_ASSIGNMENT: &str = "git_refnames =";
const FULL_ASSIGNMENT: &str = "git_full =";

static ASSIGNED_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=\s*["'](.*)["']"#).expect("valid assignment regex"));

static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// The two export-substituted keywords.
///
/// Either entry may be missing when the keywords were scraped from a file
/// that only carried one of the assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    pub refnames: Option<String>,
    pub full: Option<String>,
}

impl Keywords {
    pub fn new(refnames: impl Into<String>, full: impl Into<String>) -> Self {
        Keywords {
            refnames: Some(refnames.into()),
            full: Some(full.into()),
        }
    }

    /// Keywords exactly as they look before any export substitution.
    pub fn unexpanded() -> Self {
        Keywords::new(UNEXPANDED_REFNAMES, UNEXPANDED_FULL)
    }

    pub fn is_empty(&self) -> bool {
        self.refnames.is_none() && self.full.is_none()
    }

    /// Whether the ref-names keyword still holds the literal placeholder.
    pub fn is_unexpanded(&self) -> bool {
        self.refnames
            .as_deref()
            .is_some_and(|r| r.trim().starts_with(UNEXPANDED_MARKER))
    }
}

/// Candidate tags derived from a decorated ref list, kept in sorted order.
///
/// Sorting is plain lexicographic string order: "2.0" comes before "2.0rc1",
/// and "10.0" comes before "2.0".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
    discarded: BTreeSet<String>,
}

impl TagSet {
    /// Builds the candidate set from a ref-names blob such as
    /// `(HEAD -> master, tag: v1.2, origin/master)`.
    ///
    /// Refs decorated with `tag: ` win. Without any decorated ref, every ref
    /// containing a digit is kept and the rest are recorded as discarded.
    pub fn from_refnames(refnames: &str) -> Self {
        let refs: BTreeSet<String> = refnames
            .trim()
            .trim_matches(|c| c == '(' || c == ')')
            .split(',')
            .map(|r| r.trim().to_string())
            .collect();

        let decorated: BTreeSet<String> = refs
            .iter()
            .filter_map(|r| r.strip_prefix(TAG_DECORATION))
            .map(str::to_string)
            .collect();

        if !decorated.is_empty() {
            return TagSet {
                tags: decorated,
                discarded: BTreeSet::new(),
            };
        }

        let (tags, discarded) = refs.into_iter().partition(|r| HAS_DIGIT.is_match(r));
        TagSet { tags, discarded }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Refs dropped by the digit heuristic.
    pub fn discarded(&self) -> impl Iterator<Item = &str> {
        self.discarded.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

/// Scrapes `git_refnames = "..."` and `git_full = "..."` assignments from a file.
///
/// Best effort: lines that do not match are skipped, and any I/O error yields
/// whatever was collected so far (usually nothing).
pub fn extract_keywords(path: &Path) -> Keywords {
    match fs::read_to_string(path) {
        Ok(text) => extract_keywords_from_str(&text),
        Err(_) => Keywords::default(),
    }
}

/// Line scanner behind [`extract_keywords`].
pub fn extract_keywords_from_str(text: &str) -> Keywords {
    let mut keywords = Keywords::default();

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(REFNAMES_ASSIGNMENT) {
            if let Some(value) = assigned_value(line) {
                keywords.refnames = Some(value);
            }
        }
        if line.starts_with(FULL_ASSIGNMENT) {
            if let Some(value) = assigned_value(line) {
                keywords.full = Some(value);
            }
        }
    }

    keywords
}

fn assigned_value(line: &str) -> Option<String> {
    ASSIGNED_VALUE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
