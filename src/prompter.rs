use std::io::{self, BufRead, Write};

/// Outcome of asking the user for a missing slot value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    /// A non blank line, already trimmed.
    Line(String),
    /// The user submitted a blank line.
    Empty,
    /// The input channel was closed or failed.
    Cancelled,
}

/// Blocking channel used by the dialogue engine to ask for missing slots.
pub trait SlotPrompter {
    fn read_reply(&mut self, prompt: &str) -> PromptReply;
}

/// Prompter writing prompts to an output stream and reading replies line by
/// line from an input stream.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> SlotPrompter for LinePrompter<R, W> {
    fn read_reply(&mut self, prompt: &str) -> PromptReply {
        if write!(self.output, "{}\n> ", prompt).is_err() {
            return PromptReply::Cancelled;
        }
        if self.output.flush().is_err() {
            return PromptReply::Cancelled;
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => PromptReply::Cancelled,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    PromptReply::Empty
                } else {
                    PromptReply::Line(trimmed.to_string())
                }
            }
        }
    }
}

/// Prompter bound to the process standard streams.
pub struct StdinPrompter;

impl SlotPrompter for StdinPrompter {
    fn read_reply(&mut self, prompt: &str) -> PromptReply {
        let stdin = io::stdin();
        let stdout = io::stdout();
        LinePrompter::new(stdin.lock(), stdout.lock()).read_reply(prompt)
    }
}
