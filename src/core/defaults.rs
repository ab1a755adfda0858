//! # Default Resolver
//!
//! Computes the effective default of every variable an action may use by merging
//! its own `default` entries with the defaults of the actions it references.
//!
//! Precedence: a key already in the accumulator is never overwritten. The action's
//! own defaults therefore win over anything inherited, and among inherited defaults
//! the first sub-action in step order wins.

use crate::{
    core::references::{ActionStack, ResolveError},
    models::{Action, Config, StepOperation},
};
use std::collections::HashMap;

/// Resolves the effective defaults of `action`. Pure function of the config.
pub fn resolve(action: &Action, config: &Config) -> Result<HashMap<String, String>, ResolveError> {
    let mut stack = ActionStack::default();
    resolve_inner(action, config, &mut stack)
}

fn resolve_inner<'a>(
    action: &'a Action,
    config: &'a Config,
    stack: &mut ActionStack<'a>,
) -> Result<HashMap<String, String>, ResolveError> {
    stack.enter(&action.name)?;

    let mut defaults = action.declared_defaults();
    let references = action
        .content
        .iter()
        .flat_map(|step| step.operations())
        .filter_map(|operation| match operation {
            StepOperation::SubAction(name) => Some(name),
            StepOperation::Command(_) => None,
        });

    for name in references {
        let Some(sub_action) = config.find_action(name) else {
            log::debug!("Defaults: skipping unresolved action reference '{}'", name);
            continue;
        };
        for (key, value) in resolve_inner(sub_action, config, stack)? {
            defaults.entry(key).or_insert(value);
        }
    }

    stack.leave();
    Ok(defaults)
}
