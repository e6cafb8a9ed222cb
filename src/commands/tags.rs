// File: ./src/commands/tags.rs
//! Tag set commands: add via prompt, remove via argument or quick pick.
use crate::config::{Config, split_tags};
use crate::context::AppContext;
use crate::host::Host;

pub fn add_tag(host: &dyn Host, ctx: &dyn AppContext) {
    let Some(input) = host.show_prompt(
        "Please enter the tag you want to add (use , to add multiple tags)",
        "",
    ) else {
        return;
    };
    if input.trim().is_empty() {
        return;
    }

    // A corrupt config must abort the write, not be clobbered by defaults.
    let mut config = match Config::load_for_update(ctx) {
        Ok(config) => config,
        Err(e) => {
            host.show_error(&e.to_string());
            return;
        }
    };
    config.add_tags(&input);
    if let Err(e) = config.save(ctx) {
        host.show_error(&e.to_string());
    }
}

/// Removing can happen through a tree-item button (which passes the tag)
/// or from the command palette (which asks via a multi-select pick).
pub fn remove_tag(host: &dyn Host, ctx: &dyn AppContext, tag: Option<&str>) {
    let mut config = match Config::load_for_update(ctx) {
        Ok(config) => config,
        Err(e) => {
            host.show_error(&e.to_string());
            return;
        }
    };

    let to_remove = match tag {
        Some(t) => split_tags(t),
        None => match host.pick_many(&config.tags) {
            Some(picked) => picked,
            None => return,
        },
    };
    if to_remove.is_empty() {
        return;
    }

    config.remove_tags(&to_remove);
    if let Err(e) = config.save(ctx) {
        host.show_error(&e.to_string());
    }
}
