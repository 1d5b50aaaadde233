use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Outcome of a bounded subprocess invocation
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The process exceeded the wall-clock bound and was killed
    TimedOut,
    /// The executable could not be found
    ToolMissing,
}

/// Capability interface for running the type checker, so tests can
/// substitute a fake returning canned output.
pub trait CommandRunner {
    fn run(&self, command: &[String], cwd: &Path, timeout: Duration) -> Result<RunOutcome>;
}

/// Runs the real subprocess with captured output and a bounded wait
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &[String], cwd: &Path, timeout: Duration) -> Result<RunOutcome> {
        let (program, args) = command
            .split_first()
            .context("type-check command is empty")?;

        let mut child = match Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(RunOutcome::ToolMissing);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to launch '{}'", program));
            }
        };

        // Drain both pipes off-thread so a chatty compiler can't fill the
        // pipe buffer and stall before the wait completes.
        let stdout_reader = spawn_pipe_reader(child.stdout.take());
        let stderr_reader = spawn_pipe_reader(child.stderr.take());

        match child
            .wait_timeout(timeout)
            .with_context(|| format!("failed waiting on '{}'", program))?
        {
            Some(status) => {
                let stdout = join_pipe_reader(stdout_reader);
                let stderr = join_pipe_reader(stderr_reader);
                Ok(RunOutcome::Completed {
                    code: status.code().unwrap_or(-1),
                    stdout,
                    stderr,
                })
            }
            None => {
                let _ = child.kill();
                let _ = child.wait();
                // Leave the readers detached: a grandchild of the killed
                // process can hold the pipe open past the deadline.
                drop(stdout_reader);
                drop(stderr_reader);
                Ok(RunOutcome::TimedOut)
            }
        }
    }
}

fn spawn_pipe_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = String::new();
            let _ = pipe.read_to_string(&mut buffer);
            buffer
        })
    })
}

fn join_pipe_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
