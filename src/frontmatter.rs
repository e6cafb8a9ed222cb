// File: src/frontmatter.rs
//! Front-matter splitting and parsing for article drafts.
//!
//! A draft opens with a `---` fenced block of TOML key/value pairs; the
//! remainder is the markdown body. A document without a leading fence is
//! all body.
use extract_frontmatter::{Extractor, config::Splitter};
use serde::Deserialize;

pub const DELIMITER: &str = "---";

/// Ephemeral metadata parsed from a draft's front matter. Lives only for
/// the duration of one publish attempt.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Draft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
    /// Comma-separated label list, split at payload-build time.
    pub tags: Option<String>,
    pub series: Option<String>,
    pub organization_id: Option<String>,
    pub cover_image: Option<String>,
    pub canonical_url: Option<String>,
}

/// Splits `text` into parsed front matter and the remaining body.
/// Parse errors are returned verbatim for the workflow to surface.
pub fn parse(text: &str) -> Result<(Draft, String), String> {
    if text.starts_with(DELIMITER) {
        let (raw, body) = Extractor::new(Splitter::EnclosingLines(DELIMITER)).extract(text);
        let draft = toml::from_str(&raw).map_err(|e| e.to_string())?;
        Ok((draft, body.to_string()))
    } else {
        Ok((Draft::default(), text.to_string()))
    }
}
