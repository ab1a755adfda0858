// src/core/references.rs

use thiserror::Error;

/// Errors raised while following sub-action references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// An action reaches itself through its own sub-action references.
    #[error("Cyclic action reference detected: {}", .path.join(" -> "))]
    CyclicReference { path: Vec<String> },
}

/// The chain of actions currently being expanded.
///
/// Only actions *on the stack* count: the same action may appear in two sibling
/// branches (a diamond), but never inside its own expansion.
#[derive(Debug, Default)]
pub struct ActionStack<'a> {
    path: Vec<&'a str>,
}

impl<'a> ActionStack<'a> {
    /// Pushes `name`, failing if it is already being expanded.
    pub fn enter(&mut self, name: &'a str) -> Result<(), ResolveError> {
        if self.path.contains(&name) {
            let mut path: Vec<String> = self.path.iter().map(|n| n.to_string()).collect();
            path.push(name.to_string());
            return Err(ResolveError::CyclicReference { path });
        }
        self.path.push(name);
        Ok(())
    }

    /// Pops the innermost action.
    pub fn leave(&mut self) {
        self.path.pop();
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
