//! External command execution
//!
//! Every git and registry command goes through a [`CommandRunner`]. The
//! [`Executor`] layers the run mode and failure policy on top, so a fake run
//! reports mutating commands instead of handing them to the runner.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::error::{CommandError, Result};
use crate::types::RunMode;

/// A program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute
    pub program: String,
    /// Arguments, passed without shell interpretation
    pub args: Vec<String>,
    /// Working directory (inherits the process directory if unset)
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Create a command from a full argument vector (`argv[0]` is the program)
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if killed by a signal
    pub code: Option<i32>,
    /// Stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    /// A successful result with the given output
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            output: output.into(),
        }
    }

    /// A failed result with the given exit code and output
    pub fn failure(code: i32, output: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            output: output.into(),
        }
    }

    /// Whether the command exited with status 0
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs commands to completion and captures their output
pub trait CommandRunner {
    /// Run `command`, returning an error only if it could not be started
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as real subprocesses
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip(self), fields(command = %command))]
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        let program = which::which(&command.program).map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let mut cmd = Command::new(program);
        cmd.args(&command.args);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        let start = Instant::now();
        let output = cmd.output().map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        info!(
            command = %command,
            code = ?output.status.code(),
            duration_ms = start.elapsed().as_millis(),
            "command finished"
        );

        Ok(CommandOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}

/// Receives user-facing progress from the release steps
pub trait Reporter {
    /// A step is starting
    fn step(&self, message: &str);

    /// A command is about to run
    fn running(&self, command: &CommandSpec);

    /// A mutating action was suppressed by fake mode
    fn skipped(&self, action: &str);

    /// A command exited unsuccessfully
    fn failed(&self, command: &CommandSpec, output: &CommandOutput);

    /// Something the user must read before continuing
    fn warning(&self, message: &str);
}

/// What to do when a command exits unsuccessfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the release with [`CommandError::Failed`]
    #[default]
    Abort,
    /// Report the failure and move on to the next step
    Continue,
}

/// Runs release commands under a run mode and failure policy
pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
    reporter: &'a dyn Reporter,
    mode: RunMode,
    policy: FailurePolicy,
}

impl<'a> Executor<'a> {
    /// Create an executor that aborts on the first failed command
    pub fn new(runner: &'a dyn CommandRunner, reporter: &'a dyn Reporter, mode: RunMode) -> Self {
        Self {
            runner,
            reporter,
            mode,
            policy: FailurePolicy::Abort,
        }
    }

    /// Set the failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether mutating actions are suppressed
    pub fn is_fake(&self) -> bool {
        self.mode.is_fake()
    }

    /// The reporter receiving progress
    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter
    }

    /// Run a command that changes state outside the temporary workspace.
    ///
    /// Returns `None` in fake mode, where the command is only reported.
    pub fn mutate(&self, command: &CommandSpec) -> Result<Option<CommandOutput>> {
        if self.is_fake() {
            debug!(command = %command, "fake mode, not running");
            self.reporter
                .skipped(&format!("not running \"{}\"", command));
            return Ok(None);
        }
        self.execute(command).map(Some)
    }

    /// Run a command in every mode
    pub fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.execute(command)
    }

    /// Report a suppressed file write, returning true when the write should happen
    pub fn allow_write(&self, path: &Path) -> bool {
        if self.is_fake() {
            self.reporter
                .skipped(&format!("not updating {}", path.display()));
            return false;
        }
        true
    }

    fn execute(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.reporter.running(command);
        let output = self.runner.run(command)?;

        if output.is_success() {
            return Ok(output);
        }

        self.reporter.failed(command, &output);
        match self.policy {
            FailurePolicy::Abort => Err(CommandError::Failed {
                command: command.to_string(),
                code: output.code,
                output: output.output.trim().to_string(),
            }
            .into()),
            FailurePolicy::Continue => {
                warn!(command = %command, code = ?output.code, "command failed, continuing");
                Ok(output)
            }
        }
    }
}
