// src/core/mod.rs

pub mod action_executor;
pub mod config_loader;
pub mod console;
pub mod defaults;
pub mod interpolator;
pub mod placeholders;
pub mod references;
pub mod schema;
