use crate::{
    cli::Invocation,
    core::action_executor,
    models::Config,
    system::executor::ShellRunner,
};
use anyhow::{Context, Result, anyhow};
use colored::*;

///
/// Main entry point for running the action chosen on the command line.
/// The invocation already carries every resolved argument value.
///
pub fn handle(invocation: &Invocation, config: &Config) -> Result<()> {
    // 1. Find the chosen action. The CLI only offers configured actions.
    let action = config.find_action(&invocation.action).ok_or_else(|| {
        anyhow!(
            t!("run.error.action_not_found"),
            name = invocation.action.cyan()
        )
    })?;

    // 2. Prepare the shell used for every command of this run.
    let mut runner = ShellRunner::new(config.shell.as_deref())
        .with_context(|| t!("run.error.shell_setup"))?;
    log::debug!("Running '{}' with {:?}", action.name, runner);

    // 3. Execute, announcing only the top-level action.
    action_executor::execute(action, config, &invocation.args, true, &mut runner)?;

    Ok(())
}
