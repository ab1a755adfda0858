// src/cli/handlers/mod.rs

// Logic for each CLI entry point. Every configured action is dispatched through `run`.

pub mod run;
