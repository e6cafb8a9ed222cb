// File: src/model.rs
//! Wire types for the articles API and the publish result.
//!
//! API reference: <https://developers.forem.com/api>. The response of a
//! publish is a single JSON shape carrying either a `url` or an `error`
//! field; `PublishOutcome` turns that field-presence sniffing into an
//! explicit two-variant result.
use crate::config::split_tags;
use crate::frontmatter::Draft;
use serde::{Deserialize, Serialize};

/// A remote-owned content record as returned by `GET /articles`.
///
/// Only `id`, `title` and `url` drive any logic; the rest is descriptive
/// metadata kept for display.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub canonical_url: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub tag_list: Vec<String>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub positive_reactions_count: u32,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub user: Option<ArticleAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ArticleAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Request body for `POST /articles`: `{article: {...}}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticlePayload {
    pub article: ArticleData,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ArticleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body_markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Treat an empty front-matter string the same as an absent one so the
/// wire never carries `""` for an optional field.
fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl ArticlePayload {
    /// Maps parsed front matter plus the document body onto the remote
    /// schema. The comma-separated `tags` field is split and trimmed;
    /// `cover_image` lands in the API's `main_image` field.
    pub fn from_draft(draft: &Draft, body: &str) -> Self {
        Self {
            article: ArticleData {
                title: non_empty(&draft.title),
                body_markdown: body.to_string(),
                description: non_empty(&draft.description),
                published: draft.published,
                tags: draft.tags.as_deref().map(split_tags).unwrap_or_default(),
                series: non_empty(&draft.series),
                organization_id: non_empty(&draft.organization_id),
                main_image: non_empty(&draft.cover_image),
                canonical_url: non_empty(&draft.canonical_url),
            },
        }
    }
}

/// Explicit result of a publish call, decoded from the API's single
/// response shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Published { url: String },
    Failed { message: String },
}

impl PublishOutcome {
    /// Discriminates the decoded response: an `error` field wins, then a
    /// `url` field; anything else is reported as an unexpected shape.
    pub fn from_response(value: &serde_json::Value, status: http::StatusCode) -> Self {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Self::Failed {
                message: message.to_string(),
            };
        }
        if let Some(url) = value.get("url").and_then(|u| u.as_str()) {
            return Self::Published {
                url: url.to_string(),
            };
        }
        Self::Failed {
            message: format!("Unexpected response from server (HTTP {})", status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_splits_and_trims_tags() {
        let draft = Draft {
            title: Some("t".to_string()),
            description: Some("d".to_string()),
            tags: Some("a, b, c".to_string()),
            ..Default::default()
        };
        let payload = ArticlePayload::from_draft(&draft, "body");
        assert_eq!(payload.article.tags, vec!["a", "b", "c"]);
        assert_eq!(payload.article.title.as_deref(), Some("t"));
        assert_eq!(payload.article.body_markdown, "body");
    }

    #[test]
    fn test_payload_drops_empty_optionals() {
        let draft = Draft {
            title: Some("t".to_string()),
            series: Some("".to_string()),
            canonical_url: Some("  ".to_string()),
            ..Default::default()
        };
        let payload = ArticlePayload::from_draft(&draft, "");
        assert_eq!(payload.article.series, None);
        assert_eq!(payload.article.canonical_url, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["article"].get("series").is_none());
        assert!(json["article"].get("canonical_url").is_none());
        // tags are always present, defaulting to an empty list
        assert_eq!(json["article"]["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_outcome_prefers_error_field() {
        let value = serde_json::json!({"error": "Invalid api key", "status": 401});
        assert_eq!(
            PublishOutcome::from_response(&value, http::StatusCode::UNAUTHORIZED),
            PublishOutcome::Failed {
                message: "Invalid api key".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_url_field() {
        let value = serde_json::json!({"url": "https://dev.to/user/post"});
        assert_eq!(
            PublishOutcome::from_response(&value, http::StatusCode::CREATED),
            PublishOutcome::Published {
                url: "https://dev.to/user/post".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_unexpected_shape() {
        let value = serde_json::json!({"ok": true});
        let outcome = PublishOutcome::from_response(&value, http::StatusCode::OK);
        assert!(matches!(outcome, PublishOutcome::Failed { .. }));
    }

    #[test]
    fn test_article_decodes_with_sparse_metadata() {
        let json = r#"[{"id": 7, "title": "Hello", "url": "https://dev.to/a/hello"}]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles[0].id, 7);
        assert!(articles[0].tag_list.is_empty());
        assert!(articles[0].user.is_none());
    }
}
