// src/bin/monica.rs

use anyhow::{Context, Result};
use colored::*;
use monica::{
    cli::{self, flags::FlagError, handlers},
    constants::{EXIT_COMMAND_FAILED, EXIT_CONFIG_ERROR},
    core::{
        config_loader::{ConfigError, ConfigLoader},
        console,
        references::ResolveError,
        schema,
    },
    t,
};
use std::{env, ffi::OsString};

/// The main entry point of `monica`.
/// It sets up logging, loads the configuration, derives the CLI, dispatches the
/// chosen action and maps the outcome to a process exit code.
fn main() {
    let argv: Vec<OsString> = env::args_os().collect();
    init_logging(cli::debug_requested(&argv));

    // The entire application logic is wrapped in a Result to enable centralized error handling.
    if let Err(e) = run_cli(argv) {
        std::process::exit(report_error(&e));
    }
}

/// Configures `env_logger`. `RUST_LOG` is honored; `--debug` raises the default to `debug`.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Two-phase flow: build every schema and the CLI first, then parse and execute.
fn run_cli(argv: Vec<OsString>) -> Result<()> {
    log::debug!("CLI args: {:?}", argv);

    let working_dir = env::current_dir().context(t!("main.error.working_dir"))?;
    let config = ConfigLoader::new(working_dir).load()?;

    // --- Phase 1: schemas and flag registration, for all actions ---
    let schemas = schema::build_all(&config)?;
    let command = cli::build_command(&schemas)?;

    // --- Phase 2: parse once, then execute with immutable values ---
    let invocation = match cli::parse_invocation(command, &schemas, argv) {
        Ok(invocation) => invocation,
        // Help, version and usage errors are printed and exited by clap itself.
        Err(e) => e.exit(),
    };
    log::debug!("Invocation: {:?}", invocation);

    handlers::run::handle(&invocation, &config)
}

/// Prints a failure and returns the exit code for it.
fn report_error(e: &anyhow::Error) -> i32 {
    let is_config_error = e.downcast_ref::<ConfigError>().is_some()
        || e.downcast_ref::<ResolveError>().is_some()
        || e.downcast_ref::<FlagError>().is_some();

    if is_config_error {
        console::error(&e.to_string());
        return EXIT_CONFIG_ERROR;
    }

    console::error(&format!("{}: {:#}", t!("main.error.label").red().bold(), e));
    EXIT_COMMAND_FAILED
}
