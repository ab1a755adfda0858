//! # Placeholder Scanner
//!
//! Discovers the `${name}` variables an action depends on, following sub-action
//! references depth-first. The order of first appearance is the canonical order
//! used to register CLI flags, so it must stay deterministic.

use crate::{
    core::references::{ActionStack, ResolveError},
    models::{Action, Config, Step, StepOperation},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches a `${name}` placeholder, capturing the name.
    pub(crate) static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid");
}

/// Yields the placeholder names of a single template, left to right, duplicates included.
pub fn placeholders_in(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Scans a sequence of steps and returns the distinct variable names, in order of first appearance.
///
/// Sub-action references are expanded in place; references to unknown actions contribute nothing.
pub fn scan(steps: &[Step], config: &Config) -> Result<Vec<String>, ResolveError> {
    let mut names = Vec::new();
    let mut stack = ActionStack::default();
    scan_into(steps, config, &mut stack, &mut names)?;
    Ok(names)
}

/// Scans an action's own steps, counting the action itself as the root of the reference chain.
pub fn scan_action(action: &Action, config: &Config) -> Result<Vec<String>, ResolveError> {
    let mut names = Vec::new();
    let mut stack = ActionStack::default();
    stack.enter(&action.name)?;
    scan_into(&action.content, config, &mut stack, &mut names)?;
    stack.leave();
    Ok(names)
}

fn scan_into<'a>(
    steps: &'a [Step],
    config: &'a Config,
    stack: &mut ActionStack<'a>,
    names: &mut Vec<String>,
) -> Result<(), ResolveError> {
    for step in steps {
        for operation in step.operations() {
            match operation {
                StepOperation::SubAction(name) => {
                    let Some(sub_action) = config.find_action(name) else {
                        log::debug!("Scanner: skipping unresolved action reference '{}'", name);
                        continue;
                    };
                    stack.enter(&sub_action.name)?;
                    scan_into(&sub_action.content, config, stack, names)?;
                    stack.leave();
                }
                StepOperation::Command(template) => {
                    for name in placeholders_in(template) {
                        if !names.iter().any(|known| known == name) {
                            names.push(name.to_string());
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
