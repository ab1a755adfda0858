// src/system/executor.rs

use crate::{constants::DEFAULT_SHELL, core::console};
use std::io::{self, Write};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Shell specification '{0}' could not be parsed.")]
    ShellParse(String),
    #[error("No shell program specified.")]
    EmptyShell,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// The captured result of one command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub succeeded: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Runs one already-substituted command line.
///
/// Implementations block until the command finishes.
pub trait CommandRunner {
    fn run(&mut self, command_line: &str) -> Result<CommandOutput, ExecutionError>;
}

/// Runs command lines through a shell, capturing stdout and stderr separately,
/// then reports them (stderr first) once the process has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRunner {
    program: String,
    args: Vec<String>,
}

impl Default for ShellRunner {
    fn default() -> Self {
        let mut parts = DEFAULT_SHELL.iter().map(|s| s.to_string());
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
        }
    }
}

impl ShellRunner {
    /// Builds a runner from an optional shell specification such as `"bash -c"`.
    /// The command line is appended as the final argument.
    pub fn new(shell: Option<&str>) -> Result<Self, ExecutionError> {
        let Some(spec) = shell else {
            return Ok(Self::default());
        };

        let parts =
            shlex::split(spec).ok_or_else(|| ExecutionError::ShellParse(spec.to_string()))?;
        let mut parts = parts.into_iter();
        let program = parts.next().ok_or(ExecutionError::EmptyShell)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Runs `command_line` and captures its output without printing anything.
    pub fn capture(&self, command_line: &str) -> Result<CommandOutput, ExecutionError> {
        let trimmed_command = command_line.trim();
        if trimmed_command.is_empty() {
            return Ok(CommandOutput {
                succeeded: true,
                exit_code: Some(0),
                ..Default::default()
            });
        }

        log::debug!(
            "Spawning: {} {} {:?}",
            self.program,
            self.args.join(" "),
            trimmed_command
        );

        let output = StdCommand::new(&self.program)
            .args(&self.args)
            .arg(trimmed_command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?;

        log::debug!("Command finished with status {}", output.status);

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            succeeded: output.status.success(),
            exit_code: output.status.code(),
        })
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command_line: &str) -> Result<CommandOutput, ExecutionError> {
        let output = self.capture(command_line)?;
        report(&output);
        Ok(output)
    }
}

/// Prints captured output to the process streams. See [`report_to`].
pub fn report(output: &CommandOutput) {
    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = report_to(output, &mut stdout.lock(), &mut stderr.lock()) {
        log::warn!("Could not print command output: {}", e);
    }
}

/// Writes captured output: stderr first, then stdout. Empty buffers write nothing.
pub fn report_to<O: Write, E: Write>(
    output: &CommandOutput,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    if !output.stderr.is_empty() {
        console::write_error_output(err, &output.stderr)?;
        err.flush()?;
    }
    if !output.stdout.is_empty() {
        console::write_output(out, &output.stdout)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_and_stderr_separately() {
        let runner = ShellRunner::default();
        let output = runner.capture("echo out; echo err 1>&2").unwrap();
        assert!(output.succeeded);
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.exit_code, Some(0));
    }

    #[test]
    fn test_shell_features_are_available() {
        let runner = ShellRunner::default();
        let output = runner.capture("printf 'a\\nb\\nc\\n' | wc -l | tr -d ' '").unwrap();
        assert_eq!(output.stdout.trim(), "3");
    }

    #[test]
    fn test_non_zero_exit_is_failure() {
        let runner = ShellRunner::default();
        let output = runner.capture("echo boom 1>&2; exit 3").unwrap();
        assert!(!output.succeeded);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "boom\n");
    }

    #[test]
    fn test_empty_command_succeeds_without_spawning() {
        let runner = ShellRunner::new(Some("/definitely/not/a/shell")).unwrap();
        let output = runner.capture("   ").unwrap();
        assert!(output.succeeded);
    }

    #[test]
    fn test_missing_shell_is_an_execution_error() {
        let runner = ShellRunner::new(Some("/definitely/not/a/shell -c")).unwrap();
        assert!(matches!(
            runner.capture("echo hi"),
            Err(ExecutionError::CommandFailed(..))
        ));
    }

    #[test]
    fn test_shell_spec_parsing() {
        let runner = ShellRunner::new(Some("bash -e -c")).unwrap();
        assert_eq!(runner.program, "bash");
        assert_eq!(runner.args, vec!["-e", "-c"]);

        assert!(matches!(ShellRunner::new(Some("")), Err(ExecutionError::EmptyShell)));
        assert!(matches!(
            ShellRunner::new(Some("bash \"-c")),
            Err(ExecutionError::ShellParse(_))
        ));
        assert_eq!(ShellRunner::new(None).unwrap(), ShellRunner::default());
    }
}
