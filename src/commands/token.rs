// File: ./src/commands/token.rs
//! Credential entry.
use crate::config::Config;
use crate::context::AppContext;
use crate::host::Host;

/// Prompts for the API key and persists it. Dismissing the prompt aborts
/// silently; an explicitly blank entry clears the stored key.
pub fn set_token(host: &dyn Host, ctx: &dyn AppContext) {
    let Some(token) = host.show_prompt(
        "Please enter your dev.to token, the token can be generated at https://dev.to/settings/account",
        "",
    ) else {
        return;
    };

    let mut config = match Config::load_for_update(ctx) {
        Ok(config) => config,
        Err(e) => {
            host.show_error(&e.to_string());
            return;
        }
    };
    config.api_key = token.trim().to_string();
    if let Err(e) = config.save(ctx) {
        host.show_error(&e.to_string());
    }
}
