use crate::domain::{Keywords, TagSet, VersionRecord};

use super::{ResolveContext, VersionSource};

/// Reads the version out of keywords expanded by `git archive`.
///
/// Works without a source root and never spawns a process.
#[derive(Debug, Clone)]
pub struct KeywordSource {
    keywords: Option<Keywords>,
    tag_prefix: String,
}

impl KeywordSource {
    pub fn new(keywords: Option<Keywords>, tag_prefix: impl Into<String>) -> Self {
        KeywordSource {
            keywords,
            tag_prefix: tag_prefix.into(),
        }
    }
}

impl VersionSource for KeywordSource {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn try_resolve(&self, ctx: &ResolveContext<'_>) -> Option<VersionRecord> {
        let keywords = self.keywords.as_ref().filter(|k| !k.is_empty())?;
        let Some(refnames) = keywords.refnames.as_deref() else {
            ctx.note("no refnames keyword found, not using keywords");
            return None;
        };

        if keywords.is_unexpanded() {
            ctx.note("keywords are unexpanded, not using");
            return None;
        }

        let full = keywords.full.as_deref().unwrap_or_default().trim();
        let tags = TagSet::from_refnames(refnames);

        let discarded: Vec<&str> = tags.discarded().collect();
        if !discarded.is_empty() {
            ctx.note(format!("discarding <{}>, no digits", discarded.join(",")));
        }
        if tags.is_empty() {
            ctx.note("no likely tags");
        } else {
            ctx.note(format!(
                "likely tags ({}): {}",
                tags.len(),
                tags.iter().collect::<Vec<_>>().join(",")
            ));
        }

        for tag in tags.iter() {
            let Some(version) = tag.strip_prefix(self.tag_prefix.as_str()) else {
                continue;
            };
            if version.is_empty() {
                continue;
            }
            ctx.note(format!("picking {}", version));
            return Some(VersionRecord::new(version, full));
        }

        if full.is_empty() {
            ctx.note("no suitable tags and no revision id");
            return None;
        }

        ctx.note("no suitable tags, using full revision id");
        Some(VersionRecord::new(full, full))
    }
}
