// File: ./src/client/mod.rs
pub mod core;

pub use crate::client::core::{ApiClient, DEFAULT_API_BASE, TOP_TAG};
