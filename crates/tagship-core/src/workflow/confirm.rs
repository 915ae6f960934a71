//! Interactive release confirmation

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Result, WorkflowError};

/// First question asked before a release
pub const CONFIRM_PROMPT: &str = "ARE YOU SURE YOU WISH TO PROCEED? (y/n): ";

/// Question repeated after an answer other than y or n
pub const RETRY_PROMPT: &str = "Please respond with \"y\" or \"n\": ";

/// Asks the user to approve the release
pub trait Confirmer {
    /// Returns true to proceed, false to abort
    fn confirm(&mut self) -> Result<bool>;
}

/// Line-oriented confirmation over any reader and writer
///
/// Keeps asking until a line is exactly `y` or `n`, ignoring case.
/// End of input counts as `n`.
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    /// Create a confirmer reading answers from `input`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).map_err(|e| WorkflowError::Prompt(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| WorkflowError::Prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| WorkflowError::Prompt(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(
            line.trim_end_matches(['\n', '\r']).to_lowercase(),
        ))
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&mut self) -> Result<bool> {
        let mut prompt = CONFIRM_PROMPT;
        loop {
            match self.ask(prompt)?.as_deref() {
                Some("y") => return Ok(true),
                Some("n") | None => return Ok(false),
                Some(other) => {
                    debug!(answer = other, "unrecognized confirmation answer");
                    prompt = RETRY_PROMPT;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = LineConfirmer::new(Cursor::new(input.as_bytes()), &mut output)
            .confirm()
            .unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes() {
        let (confirmed, output) = answer("y\n");
        assert!(confirmed);
        assert_eq!(output, CONFIRM_PROMPT);
    }

    #[test]
    fn test_uppercase_no() {
        let (confirmed, _) = answer("N\n");
        assert!(!confirmed);
    }

    #[test]
    fn test_retries_until_exact_answer() {
        let (confirmed, output) = answer("yes\n\n y\nY\r\n");
        assert!(confirmed);
        assert_eq!(output.matches(RETRY_PROMPT).count(), 3);
    }

    #[test]
    fn test_end_of_input_declines() {
        let (confirmed, output) = answer("maybe\n");
        assert!(!confirmed);
        assert!(output.ends_with(RETRY_PROMPT));
    }
}
