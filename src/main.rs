use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

mod check;
mod config;
mod error_log;
mod input;
mod project;
mod runner;

use check::CheckOutcome;
use error_log::{ErrorEntry, ErrorLog};
use input::HookInput;
use runner::SystemRunner;

// Exit codes understood by the orchestrator:
//   0 = no issues / not applicable
//   1 = hook infrastructure failure
//   2 = type errors found, changes required
const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_BLOCK: i32 = 2;

fn main() {
    init_tracing();

    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error in typescript hook: {:#}", err);
            }
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

/// Debug diagnostics, enabled via RUST_LOG. Silent by default so the
/// exit-code contract stays the only output channel.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let input = read_input()?;

    let Some(file_path) = input.file_path() else {
        tracing::debug!("no file path in tool input, skipping");
        return Ok(EXIT_OK);
    };

    if !is_typescript_file(file_path) {
        tracing::debug!(file = file_path, "not a TypeScript file, skipping");
        return Ok(EXIT_OK);
    }

    let path = Path::new(file_path);
    if !path.exists() {
        // The file may have been deleted or renamed since the edit
        tracing::debug!(file = file_path, "file no longer exists, skipping");
        return Ok(EXIT_OK);
    }

    let config = config::load()?;
    if config.is_ignored(file_path) {
        tracing::debug!(file = file_path, "matches ignore pattern, skipping");
        return Ok(EXIT_OK);
    }

    let Some(start_dir) = path.parent() else {
        return Ok(EXIT_OK);
    };
    let Some(project_root) = project::find_project_root(start_dir) else {
        tracing::debug!(file = file_path, "no tsconfig.json found, skipping");
        return Ok(EXIT_OK);
    };
    tracing::debug!(root = %project_root.display(), "type checking");

    match check::run_typecheck(&SystemRunner, &config, &project_root, file_path)? {
        CheckOutcome::Clean | CheckOutcome::ToolMissing => Ok(EXIT_OK),
        CheckOutcome::TimedOut => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("TypeScript check timed out");
            }
            Ok(EXIT_OK)
        }
        CheckOutcome::Errors(errors) => {
            let log_path = match &config.error_log {
                Some(path) => path.clone(),
                None => ErrorLog::default_path()?,
            };
            ErrorLog::new(log_path).append(ErrorEntry {
                file_path: file_path.to_string(),
                errors: errors.clone(),
                session_id: input.session_id.clone(),
            })?;

            #[allow(clippy::print_stderr)]
            {
                eprintln!("TypeScript errors found in {}:", file_path);
                eprintln!("{}", errors);
            }
            Ok(EXIT_BLOCK)
        }
    }
}

fn read_input() -> Result<HookInput> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read hook input from stdin")?;
    let input: HookInput =
        serde_json::from_str(&buffer).context("failed to parse hook input as JSON")?;
    Ok(input)
}

fn is_typescript_file(path: &str) -> bool {
    path.ends_with(".ts") || path.ends_with(".tsx")
}
