//! # Argument Schema Builder
//!
//! Combines the scanner and the default resolver into the per-action list of
//! variables, each marked required or defaulted. Schemas for every action are
//! built eagerly at startup, before any argument parsing happens.

use crate::{
    core::{defaults, placeholders, references::ResolveError},
    models::{Action, ActionSchema, ArgumentSpec, Config},
};

/// Builds the argument schema of a single action.
pub fn build(action: &Action, config: &Config) -> Result<ActionSchema, ResolveError> {
    let names = placeholders::scan_action(action, config)?;
    let mut resolved_defaults = defaults::resolve(action, config)?;

    let arguments: Vec<ArgumentSpec> = names
        .into_iter()
        .map(|name| {
            let default_value = resolved_defaults.remove(&name);
            ArgumentSpec {
                name,
                default_value,
            }
        })
        .collect();

    log::debug!(
        "Schema for '{}': {} argument(s), {} required",
        action.name,
        arguments.len(),
        arguments.iter().filter(|arg| !arg.has_default()).count()
    );

    Ok(ActionSchema {
        action: action.name.clone(),
        description: action.desc.clone(),
        short_flags: action.short,
        arguments,
    })
}

/// Builds the schema of every action, in declaration order.
pub fn build_all(config: &Config) -> Result<Vec<ActionSchema>, ResolveError> {
    config
        .actions
        .iter()
        .map(|action| build(action, config))
        .collect()
}
