//! Running external commands

use crate::error::{LoadError, Result};
use std::future::Future;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, trace};

/// Exit code and captured output of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub rc: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(rc: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            rc,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Output of a command that exited with 0
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    pub fn success(&self) -> bool {
        self.rc == 0
    }
}

/// Runs a command line and captures its output.
///
/// `args` starts with the program. A non-zero exit code is not an error at
/// this level; callers decide what it means.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        args: &[String],
        env: &[(&str, &str)],
    ) -> impl Future<Output = Result<CommandOutput>> + Send;
}

/// Runner spawning real processes with a time limit
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, args: &[String], env: &[(&str, &str)]) -> Result<CommandOutput> {
        let Some((program, program_args)) = args.split_first() else {
            return Err(LoadError::config("Empty command line"));
        };
        let command_line = args.join(" ");
        debug!(command = %command_line, "running command");

        let mut command = Command::new(program);
        command
            .args(program_args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => {
                return Err(LoadError::Timeout {
                    command: command_line,
                    seconds: self.timeout.as_secs(),
                });
            }
            Ok(Err(error)) => {
                return Err(LoadError::Spawn {
                    command: command_line,
                    message: error.to_string(),
                });
            }
            Ok(Ok(output)) => output,
        };

        // killed by a signal
        let rc = output.status.code().unwrap_or(-1);
        trace!(command = %command_line, rc, "command finished");
        Ok(CommandOutput {
            rc,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// One recorded invocation of a [`ScriptedRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

/// Runner answering from a fixed table of command lines.
///
/// Used to test loaders and the pipeline without the programs installed.
/// Unknown command lines fail as if the program could not be started.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Vec<(Vec<String>, CommandOutput)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `args` with `output`
    #[must_use]
    pub fn respond(mut self, args: &[&str], output: CommandOutput) -> Self {
        let args = args.iter().map(ToString::to_string).collect();
        self.responses.push((args, output));
        self
    }

    /// Invocations so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Command lines run so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.args.join(" "))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, args: &[String], env: &[(&str, &str)]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                args: args.to_vec(),
                env: env
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                    .collect(),
            });

        self.responses
            .iter()
            .find(|(expected, _)| expected.as_slice() == args)
            .map(|(_, output)| output.clone())
            .ok_or_else(|| LoadError::Spawn {
                command: args.join(" "),
                message: "No such file or directory".to_string(),
            })
    }
}
