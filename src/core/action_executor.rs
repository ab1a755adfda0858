use crate::{
    core::{
        console, interpolator,
        references::{ActionStack, ResolveError},
    },
    models::{Action, Config, ResolvedArgs, StepOperation},
    system::executor::{CommandRunner, ExecutionError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    #[error("Command '{command}' failed{}.", exit_suffix(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },
}

fn exit_suffix(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!(" with exit code {}", code),
        None => " (terminated by signal)".to_string(),
    }
}

// --- Main Public Function ---

/// Executes an action's steps depth-first, in declared order.
///
/// Sub-actions reuse the same resolved arguments and never print the banner;
/// only the invocation with `announce` set does. The first failing command stops
/// the whole run.
pub fn execute<R: CommandRunner + ?Sized>(
    action: &Action,
    config: &Config,
    args: &ResolvedArgs,
    announce: bool,
    runner: &mut R,
) -> Result<(), ActionError> {
    let mut stack = ActionStack::default();
    execute_inner(action, config, args, announce, runner, &mut stack)
}

// --- Internal Recursive Executor ---

fn execute_inner<'a, R: CommandRunner + ?Sized>(
    action: &'a Action,
    config: &'a Config,
    args: &ResolvedArgs,
    announce: bool,
    runner: &mut R,
    stack: &mut ActionStack<'a>,
) -> Result<(), ActionError> {
    stack.enter(&action.name)?;

    if announce {
        let banner = if action.desc.is_empty() {
            format!(t!("executor.info.executing_unnamed"), name = action.name)
        } else {
            format!(
                t!("executor.info.executing"),
                desc = action.desc,
                name = action.name
            )
        };
        console::info(&banner);
    }

    for step in &action.content {
        for operation in step.operations() {
            match operation {
                StepOperation::SubAction(name) => match config.find_action(name) {
                    Some(sub_action) => {
                        log::debug!(
                            "Entering sub-action '{}' (depth {})",
                            sub_action.name,
                            stack.depth()
                        );
                        execute_inner(sub_action, config, args, false, runner, stack)?;
                    }
                    None => {
                        log::debug!("Skipping unresolved action reference '{}'", name);
                    }
                },
                StepOperation::Command(template) => {
                    run_command_step(template, args, runner)?;
                }
            }
        }
    }

    stack.leave();
    Ok(())
}

// --- Execution Helpers ---

/// Substitutes, reports and runs a single command template.
fn run_command_step<R: CommandRunner + ?Sized>(
    template: &str,
    args: &ResolvedArgs,
    runner: &mut R,
) -> Result<(), ActionError> {
    let command_line = interpolator::substitute(template, args);
    console::info(&format!(t!("executor.info.command"), command = command_line));

    let output = runner.run(&command_line)?;
    if !output.succeeded {
        return Err(ActionError::CommandFailed {
            command: command_line,
            exit_code: output.exit_code,
        });
    }
    Ok(())
}
