use crate::config::HookConfig;
use crate::runner::{CommandRunner, RunOutcome};
use anyhow::Result;
use std::path::Path;

/// What the hook should report back to the orchestrator
#[derive(Debug)]
pub enum CheckOutcome {
    /// No type errors attributable to the edited file
    Clean,
    /// Filtered diagnostics for the edited file (newline-joined)
    Errors(String),
    TimedOut,
    ToolMissing,
}

/// Run the type checker from the project root and evaluate its output.
pub fn run_typecheck(
    runner: &dyn CommandRunner,
    config: &HookConfig,
    project_root: &Path,
    file_path: &str,
) -> Result<CheckOutcome> {
    let outcome = runner.run(&config.command, project_root, config.timeout())?;

    match outcome {
        RunOutcome::ToolMissing => {
            tracing::debug!("type checker not found, skipping");
            Ok(CheckOutcome::ToolMissing)
        }
        RunOutcome::TimedOut => Ok(CheckOutcome::TimedOut),
        RunOutcome::Completed {
            code,
            stdout,
            stderr,
        } => {
            tracing::debug!(code, stderr = %stderr.trim(), "type checker finished");

            if code != 0 && !stdout.is_empty() {
                let errors = filter_file_errors(&stdout, file_path);
                if !errors.is_empty() {
                    return Ok(CheckOutcome::Errors(errors.join("\n")));
                }
            }

            Ok(CheckOutcome::Clean)
        }
    }
}

/// Keep only the diagnostic lines that belong to the edited file: lines
/// containing its path, plus indented continuation lines. Deliberately
/// best-effort; the exact semantics are part of the hook's contract.
fn filter_file_errors<'a>(stdout: &'a str, file_path: &str) -> Vec<&'a str> {
    stdout
        .trim()
        .lines()
        .filter(|line| line.contains(file_path) || line.starts_with(char::is_whitespace))
        .collect()
}
