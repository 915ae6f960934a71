//! In-memory doubles for the command and reporting seams
//!
//! Compiled for this crate's tests and, through the `test-support` feature,
//! for the tests of crates that drive an [`Executor`](crate::Executor).

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::Result;
use crate::process::{CommandOutput, CommandRunner, CommandSpec, Reporter};

/// Replays canned results and records every command it receives
///
/// Commands with no queued result succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<CommandOutput>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    /// Create a runner where every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next unanswered command
    pub fn respond(self, output: CommandOutput) -> Self {
        self.responses.borrow_mut().push_back(output);
        self
    }

    /// Commands received so far
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Commands received so far, rendered as strings
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| CommandOutput::success("")))
    }
}

/// A single event seen by [`CollectingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Step(String),
    Running(String),
    Skipped(String),
    Failed { command: String, code: Option<i32> },
    Warning(String),
}

/// Reporter that keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: RefCell<Vec<ReportEvent>>,
}

impl CollectingReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.borrow().clone()
    }

    /// Suppressed actions recorded so far
    pub fn skipped(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Skipped(action) => Some(action.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn step(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Step(message.to_string()));
    }

    fn running(&self, command: &CommandSpec) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Running(command.to_string()));
    }

    fn skipped(&self, action: &str) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Skipped(action.to_string()));
    }

    fn failed(&self, command: &CommandSpec, output: &CommandOutput) {
        self.events.borrow_mut().push(ReportEvent::Failed {
            command: command.to_string(),
            code: output.code,
        });
    }

    fn warning(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(ReportEvent::Warning(message.to_string()));
    }
}
