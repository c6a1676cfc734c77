//! Domain types - pure data with no process or filesystem access beyond keyword scraping

pub mod keywords;
pub mod record;

pub use keywords::{extract_keywords, Keywords, TagSet};
pub use record::VersionRecord;
