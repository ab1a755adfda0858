//! # Command-Line Surface
//!
//! The CLI is derived from the configuration: one subcommand per action, one flag per
//! variable in that action's schema. Construction happens in two phases:
//!
//! 1. [`build_command`] turns the eagerly built schemas into a `clap::Command`.
//! 2. [`parse_invocation`] runs clap once and produces an immutable [`Invocation`]
//!    (chosen action plus resolved argument values) for the executor.

use crate::{
    cli::flags::FlagError,
    constants::DEBUG_FLAG,
    models::{ActionSchema, ResolvedArgs},
};
use clap::{Args, Command, FromArgMatches, error::ErrorKind};
use std::ffi::OsString;

pub mod flags;
pub mod handlers;

/// Arguments available regardless of the chosen action.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Enable debug mode.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// The outcome of argument parsing: what to run, and with which values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: String,
    pub args: ResolvedArgs,
    pub globals: GlobalArgs,
}

/// Builds the full command tree from every action's schema.
pub fn build_command(schemas: &[ActionSchema]) -> Result<Command, FlagError> {
    let root = clap::command!()
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .styles(
            clap::builder::Styles::styled()
                .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
                .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
                .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
                .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
        );
    let mut root = GlobalArgs::augment_args(root);

    for schema in schemas {
        let mut subcommand = Command::new(schema.action.clone());
        if !schema.description.is_empty() {
            subcommand = subcommand.about(schema.description.clone());
        }
        for spec in flags::flag_specs(schema)? {
            log::trace!("Registering --{} for '{}'", spec.long, schema.action);
            subcommand = subcommand.arg(spec.to_arg());
        }
        root = root.subcommand(subcommand);
    }

    Ok(root)
}

/// Parses `argv` against the built command and collects the chosen action's values.
pub fn parse_invocation<I, T>(
    command: Command,
    schemas: &[ActionSchema],
    argv: I,
) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command.try_get_matches_from(argv)?;
    let globals = GlobalArgs::from_arg_matches(&matches)?;

    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| clap::Error::new(ErrorKind::MissingSubcommand))?;
    let schema = schemas
        .iter()
        .find(|schema| schema.action == name)
        .ok_or_else(|| clap::Error::new(ErrorKind::InvalidSubcommand))?;

    let args: ResolvedArgs = schema
        .arguments
        .iter()
        .filter_map(|argument| {
            sub_matches
                .get_one::<String>(&argument.name)
                .map(|value| (argument.name.clone(), value.clone()))
        })
        .collect();

    log::debug!(
        "Chosen action '{}' with {} resolved argument(s)",
        name,
        args.len()
    );

    Ok(Invocation {
        action: name.to_string(),
        args,
        globals,
    })
}

/// Checks for the global debug flag before clap runs, so logging covers config loading too.
pub fn debug_requested<I, T>(argv: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: AsRef<std::ffi::OsStr>,
{
    let flag = format!("--{}", DEBUG_FLAG);
    argv.into_iter()
        .take_while(|arg| arg.as_ref() != "--")
        .any(|arg| arg.as_ref() == flag.as_str())
}
