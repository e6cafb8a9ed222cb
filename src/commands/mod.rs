// File: ./src/commands/mod.rs
//! Host-invoked command surface.
//!
//! The host registers these eight commands and funnels user actions into
//! `dispatch`. Settings writes notify the explorer afterwards, standing
//! in for the editor-wide configuration-change event the tree source
//! listens to.
pub mod article;
pub mod tags;
pub mod token;

use crate::client::ApiClient;
use crate::context::AppContext;
use crate::explorer::ArticleExplorer;
use crate::host::Host;
use camino::Utf8PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RefreshArticles,
    AddTag,
    /// Remove the given label(s); prompts with a multi-select pick when
    /// invoked without an argument.
    RemoveTag(Option<String>),
    SetToken,
    /// Create a new draft inside the given directory.
    CreateArticle(Utf8PathBuf),
    InsertTemplate,
    PublishArticle,
    OpenArticle(String),
}

pub async fn dispatch(
    command: Command,
    host: &dyn Host,
    ctx: &dyn AppContext,
    client: &ApiClient,
    explorer: &ArticleExplorer,
) {
    match command {
        Command::RefreshArticles => explorer.refresh(),
        Command::AddTag => {
            tags::add_tag(host, ctx);
            explorer.source().config_changed();
        }
        Command::RemoveTag(tag) => {
            tags::remove_tag(host, ctx, tag.as_deref());
            explorer.source().config_changed();
        }
        Command::SetToken => {
            token::set_token(host, ctx);
            explorer.source().config_changed();
        }
        Command::CreateArticle(dir) => article::create_article(host, &dir),
        Command::InsertTemplate => article::insert_template(host),
        Command::PublishArticle => article::publish_article(host, ctx, client).await,
        Command::OpenArticle(url) => host.open_url(&url),
    }
}
