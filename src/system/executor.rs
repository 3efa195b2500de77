// src/system/executor.rs

use std::path::Path;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Runs a short-lived command in `cwd` and returns its standard output.
///
/// Stderr is discarded: the caller decides what a failure means, and completion
/// output must never be interleaved with diagnostics from a helper process.
pub fn execute_and_capture_output(command_line: &str, cwd: &Path) -> Result<String, ExecutionError> {
    let trimmed_command = command_line.trim();
    let parts = shlex::split(trimmed_command)
        .ok_or_else(|| ExecutionError::CommandParse(trimmed_command.to_string()))?;
    let Some((program, args)) = parts.split_first() else {
        return Err(ExecutionError::EmptyCommand);
    };

    let clean_cwd = dunce::simplified(cwd);
    log::trace!("Running '{}' in '{}'", trimmed_command, clean_cwd.display());

    let command_output = StdCommand::new(program)
        .args(args)
        .current_dir(clean_cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(trimmed_command.to_string(), e))?;

    if !command_output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus(
            trimmed_command.to_string(),
        ));
    }

    String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: trimmed_command.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_command_is_rejected() {
        let dir = tempdir().unwrap();
        let result = execute_and_capture_output("   ", dir.path());
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn test_unbalanced_quotes_are_a_parse_error() {
        let dir = tempdir().unwrap();
        let result = execute_and_capture_output("git log \"--format", dir.path());
        assert!(matches!(result, Err(ExecutionError::CommandParse(_))));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let dir = tempdir().unwrap();
        let result = execute_and_capture_output("fixline-no-such-program --x", dir.path());
        assert!(matches!(result, Err(ExecutionError::CommandFailed(..))));
    }
}
