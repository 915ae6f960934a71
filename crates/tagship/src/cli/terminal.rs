//! Terminal implementations of the release reporter and confirmation prompt

use std::io::{BufReader, IsTerminal};

use console::{style, Term};
use dialoguer::Confirm;
use tracing::debug;

use tagship_core::error::{Result, WorkflowError};
use tagship_core::process::Reporter;
use tagship_core::workflow::{Confirmer, LineConfirmer};
use tagship_core::{CommandOutput, CommandSpec};

/// Prints release progress with `console` styling
///
/// Progress goes to stdout for text output and to stderr when stdout is
/// reserved for JSON. Warnings and failures are shown even when quiet.
pub struct ConsoleReporter {
    term: Term,
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a reporter writing to stdout
    pub fn stdout(quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            quiet,
        }
    }

    /// Create a reporter writing to stderr
    pub fn stderr(quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            quiet,
        }
    }

    fn line(&self, text: String) {
        // Ignore write errors on a closed pipe.
        let _ = self.term.write_line(&text);
    }
}

impl Reporter for ConsoleReporter {
    fn step(&self, message: &str) {
        if !self.quiet {
            self.line(format!("{} {}", style("→").blue(), message));
        }
    }

    fn running(&self, command: &CommandSpec) {
        if !self.quiet {
            self.line(format!(
                "  {} {}",
                style("running").dim(),
                style(command).cyan()
            ));
        }
    }

    fn skipped(&self, action: &str) {
        if !self.quiet {
            self.line(format!(
                "  {} {}",
                style("--fake passed,").yellow(),
                action
            ));
        }
    }

    fn failed(&self, command: &CommandSpec, output: &CommandOutput) {
        let code = output
            .code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        self.line(format!(
            "{} Command \"{}\" failed (code: {})",
            style("✗").red().bold(),
            command,
            code
        ));
        let captured = output.output.trim();
        if !captured.is_empty() {
            self.line(format!("  {}", style(captured).dim()));
        }
    }

    fn warning(&self, message: &str) {
        self.line(format!(
            "{} {}",
            style("!").yellow().bold(),
            style(message).yellow()
        ));
    }
}

/// Confirmation through a `dialoguer` prompt on an interactive terminal
///
/// Only `y` or `n` settles the prompt. Esc and `q` ask again.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self) -> Result<bool> {
        settle(|prompt| {
            Confirm::new()
                .with_prompt(prompt)
                .interact_opt()
                .map_err(|e| WorkflowError::Prompt(e.to_string()).into())
        })
    }
}

/// Ask until `ask` returns an answer, switching to the retry prompt after
/// the first dismissal
fn settle(mut ask: impl FnMut(&str) -> Result<Option<bool>>) -> Result<bool> {
    let mut prompt = "ARE YOU SURE YOU WISH TO PROCEED?";
    loop {
        if let Some(answer) = ask(prompt)? {
            return Ok(answer);
        }
        debug!("confirmation dismissed, asking again");
        prompt = "Please respond with \"y\" or \"n\"";
    }
}

/// Pick the prompt: `dialoguer` on a terminal, plain lines on piped stdin
pub fn confirmer() -> Box<dyn Confirmer> {
    if std::io::stdin().is_terminal() && Term::stderr().is_term() {
        Box::new(TerminalConfirmer)
    } else {
        Box::new(LineConfirmer::new(
            BufReader::new(std::io::stdin()),
            std::io::stderr(),
        ))
    }
}
