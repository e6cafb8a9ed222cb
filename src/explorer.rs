// File: src/explorer.rs
//! Tag-grouped explorer tree: configured tags at the root, remote
//! articles as leaves.
//!
//! The tree source is the one stateful component here. It remembers the
//! tag set it last served (`tags_loaded`) and, when the host reports a
//! configuration change, fires a whole-tree invalidation event iff the
//! stored set differs (order-sensitive). Article children are fetched
//! fresh on every expansion; nothing is cached.
use crate::client::ApiClient;
use crate::config::Config;
use crate::context::AppContext;
use crate::host::Host;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Tag(String),
    Article(ArticleLeaf),
}

/// Lightweight leaf record, the only article data the tree keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleLeaf {
    pub id: u64,
    pub title: String,
    pub url: String,
}

pub struct TagTreeSource {
    client: ApiClient,
    ctx: Arc<dyn AppContext>,
    tags_loaded: Mutex<Vec<String>>,
    listeners: Mutex<Vec<mpsc::UnboundedSender<()>>>,
}

impl TagTreeSource {
    pub fn new(client: ApiClient, ctx: Arc<dyn AppContext>) -> Self {
        Self {
            client,
            ctx,
            tags_loaded: Mutex::new(Vec::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Registers an invalidation observer. Every fired event means the
    /// whole tree is stale and should be re-queried from the root.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.lock().unwrap().push(tx);
        rx
    }

    /// Fires an invalidation event to all live observers.
    pub fn refresh(&self) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|tx| tx.send(()).is_ok());
    }

    /// Children of `node`; `None` is the (virtual) root.
    ///
    /// The root listing records the served tag set as the snapshot used
    /// for change detection. Tag children re-fetch on every call.
    pub async fn children(&self, node: Option<&TreeNode>) -> Result<Vec<TreeNode>, String> {
        match node {
            None => {
                let tags = Config::load_or_default(self.ctx.as_ref()).tags;
                *self.tags_loaded.lock().unwrap() = tags.clone();
                Ok(tags.into_iter().map(TreeNode::Tag).collect())
            }
            Some(TreeNode::Tag(tag)) => {
                let articles = self.client.get_articles(tag).await?;
                Ok(articles
                    .into_iter()
                    .map(|a| {
                        TreeNode::Article(ArticleLeaf {
                            id: a.id,
                            title: a.title,
                            url: a.url,
                        })
                    })
                    .collect())
            }
            Some(TreeNode::Article(_)) => Ok(Vec::new()),
        }
    }

    /// Host notification hook: re-reads the configured tag set and
    /// invalidates the tree if it no longer matches the last-loaded
    /// snapshot.
    pub fn config_changed(&self) {
        let current = Config::load_or_default(self.ctx.as_ref()).tags;
        let stale = *self.tags_loaded.lock().unwrap() != current;
        if stale {
            log::debug!("Tag set changed, invalidating explorer tree");
            self.refresh();
        }
    }

    /// Releases all registered observers; no further events fire.
    pub fn dispose(&self) {
        self.listeners.lock().unwrap().clear();
    }
}

/// Selecting an article leaf opens its URL; tag nodes only expand.
pub fn activate(node: &TreeNode, host: &dyn Host) {
    if let TreeNode::Article(leaf) = node {
        host.open_url(&leaf.url);
    }
}

/// Thin wrapper the host registers as its tree source.
pub struct ArticleExplorer {
    source: Arc<TagTreeSource>,
}

impl ArticleExplorer {
    pub fn new(source: Arc<TagTreeSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<TagTreeSource> {
        &self.source
    }

    pub fn refresh(&self) {
        self.source.refresh();
    }

    pub fn dispose(&self) {
        self.source.dispose();
    }
}
