// Crate root library declaration and module exports.
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod explorer;
pub mod frontmatter;
pub mod host;
pub mod logging;
pub mod model;
pub mod storage;
