// File: ./src/commands/article.rs
//! Draft scaffolding and the publish workflow.
use crate::client::ApiClient;
use crate::config::Config;
use crate::context::AppContext;
use crate::frontmatter;
use crate::host::{Host, Selection};
use crate::model::{ArticlePayload, PublishOutcome};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Scaffold inserted into every new draft.
pub const ARTICLE_TEMPLATE: &str = include_str!("../../templates/article.template");

/// Canonical draft file extension.
pub const EXTENSION: &str = "md";

/// Ensures `filename` carries the canonical extension exactly once.
/// A name already ending in `.` gets the extension without a second dot.
pub fn correct_extension(filename: &str, extension: &str) -> String {
    if Utf8Path::new(filename).extension() == Some(extension) {
        return filename.to_string();
    }

    if filename.ends_with('.') {
        return format!("{}{}", filename, extension);
    }

    format!("{}.{}", filename, extension)
}

/// Replaces every selection range with `template`, leaving unselected
/// text untouched. A collapsed selection is a plain insertion point.
pub fn apply_template(text: &str, selections: &[Selection], template: &str) -> String {
    let mut result = text.to_string();
    // Apply right-to-left so earlier offsets stay valid.
    let mut ordered: Vec<Selection> = selections.to_vec();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));
    for selection in ordered {
        result.replace_range(selection.start..selection.end, template);
    }
    result
}

/// Prompts for a filename and creates an empty draft with the template
/// inserted. Never overwrites: an existing file at the resolved path
/// aborts with a conflict message.
pub fn create_article(host: &dyn Host, target_dir: &Utf8Path) {
    let Some(input) = host.show_prompt("Please enter the filename", "article.md") else {
        return;
    };
    if input.trim().is_empty() {
        return;
    }

    let filename = if Utf8Path::new(&input).is_absolute() {
        Utf8PathBuf::from(&input)
    } else {
        target_dir.join(&input)
    };

    let filepath = Utf8PathBuf::from(correct_extension(filename.as_str(), EXTENSION));
    if filepath.exists() {
        host.show_error(&format!("File '{}' already exists", filepath));
        return;
    }

    if let Err(e) = fs::write(&filepath, "") {
        host.show_error(&format!("Failed to create '{}': {}", filepath, e));
        return;
    }

    if let Err(e) = host.open_document(&filepath) {
        host.show_error(&e);
        return;
    }

    insert_template(host);
}

/// Inserts the draft template at every active selection, then saves.
/// No-op without an active document.
pub fn insert_template(host: &dyn Host) {
    let Some(doc) = host.active_document() else {
        return;
    };

    let text = apply_template(&doc.text, &doc.selections, ARTICLE_TEMPLATE);
    if let Err(e) = host.replace_active_text(&text) {
        host.show_error(&e);
        return;
    }
    if let Err(e) = host.save_active_document() {
        host.show_error(&e);
    }
}

/// Publishes the active document. Preconditions are checked in order and
/// the workflow aborts at the first failure with a user-visible message;
/// there is no retry and no partial success.
pub async fn publish_article(host: &dyn Host, ctx: &dyn AppContext, client: &ApiClient) {
    let Some(doc) = host.active_document() else {
        host.show_error("You have to have the article open in order to publish it");
        return;
    };

    let config = Config::load_or_default(ctx);
    if config.api_key.is_empty() {
        host.show_error("You must provide a dev.to token");
        return;
    }

    let (draft, body) = match frontmatter::parse(&doc.text) {
        Ok(parsed) => parsed,
        Err(e) => {
            host.show_error(&e);
            return;
        }
    };

    let payload = ArticlePayload::from_draft(&draft, &body);

    // The API docs mention the title isn't required, but it is.
    if payload.article.title.is_none() {
        host.show_error("Title attribute is required");
        return;
    }

    if payload.article.tags.len() > 4 {
        host.show_error("A maximum of 4 tags is supported");
        return;
    }

    match client.post_article(&payload, &config.api_key).await {
        Ok(PublishOutcome::Failed { message }) => host.show_error(&message),
        Ok(PublishOutcome::Published { url }) => {
            host.show_info("Post has successfully been published to dev.to");
            // The post is only reachable at its canonical URL once published.
            let target = if payload.article.published.unwrap_or(false) {
                url
            } else {
                format!("{}/edit", url)
            };
            host.open_url(&target);
        }
        Err(e) => host.show_error(&e),
    }
}
