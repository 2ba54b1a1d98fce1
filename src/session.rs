use std::io::{BufRead, Write};

use log::info;

use crate::config::SessionConfig;
use crate::engine::ChatbotEngine;
use crate::errors::*;
use crate::prompter::LinePrompter;

/// Interactive read/respond loop over a pair of line oriented streams.
///
/// Slot prompts issued while a message is being processed read from the
/// same input stream as the top level loop.
pub struct SessionLoop<'e, R, W> {
    engine: &'e ChatbotEngine,
    session: SessionConfig,
    input: R,
    output: W,
}

impl<'e, R: BufRead, W: Write> SessionLoop<'e, R, W> {
    pub fn new(engine: &'e ChatbotEngine, session: SessionConfig, input: R, output: W) -> Self {
        Self {
            engine,
            session,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting chat session");
        writeln!(self.output, "{}", "=".repeat(50))?;
        writeln!(self.output, "{}", self.session.welcome_message)?;
        writeln!(self.output, "Type 'quit', 'exit', or 'bye' to end the conversation")?;
        writeln!(self.output, "{}", "=".repeat(50))?;
        loop {
            write!(self.output, "\nYou: ")?;
            self.output.flush()?;
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    writeln!(self.output, "\n\nGoodbye!")?;
                    break;
                }
                Ok(_) => {}
            }
            let message = line.trim().to_string();

            let response = {
                let mut prompter = LinePrompter::new(&mut self.input, &mut self.output);
                self.engine.process_message(&message, &mut prompter)
            };
            writeln!(self.output, "RemindMe!: {}", response)?;

            if is_goodbye(&self.session.goodbye_statements, &message) {
                writeln!(
                    self.output,
                    "\nAre you sure you want to end this chat? Type \"yes\" or \"no\""
                )?;
                write!(self.output, "> ")?;
                self.output.flush()?;
                let mut confirmation = String::new();
                match self.input.read_line(&mut confirmation) {
                    Ok(0) | Err(_) => {
                        writeln!(self.output, "\nGoodbye!")?;
                        break;
                    }
                    Ok(_) => match confirmation.trim().to_lowercase().as_str() {
                        "yes" => {
                            writeln!(self.output, "Goodbye! Have a great day!")?;
                            info!("Chat session ended");
                            break;
                        }
                        "no" => continue,
                        _ => {
                            writeln!(self.output, "Invalid input. Please type \"yes\" or \"no\"")?;
                            continue;
                        }
                    },
                }
            }
        }
        Ok(())
    }
}

/// A message ends the session when it contains any of the configured
/// goodbye statements, anywhere in the text.
fn is_goodbye(goodbye_statements: &[String], message: &str) -> bool {
    let lowercased = message.to_lowercase();
    goodbye_statements
        .iter()
        .any(|statement| lowercased.contains(statement.as_str()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use crate::config::ChatbotConfig;
    use crate::intent_classifier::IntentPrediction;
    use crate::testutils::{
        catalog_from_json, FixedTemplateSelector, MockedEntityExtractor, MockedIntentClassifier,
    };

    fn test_engine() -> ChatbotEngine {
        let catalog = Arc::new(catalog_from_json(
            r#"{
                "intents": [
                    {
                        "tag": "greeting",
                        "patterns": ["hello"],
                        "responses": ["Hello! How can I help you?"]
                    },
                    {
                        "tag": "set_reminder",
                        "patterns": ["remind me"],
                        "responses": ["Reminder set for {date}."],
                        "inputs": ["date"]
                    }
                ]
            }"#,
        ));
        let classifier: MockedIntentClassifier = vec![
            (
                "hello".to_string(),
                vec![IntentPrediction {
                    intent_name: "greeting".to_string(),
                    probability: 0.9,
                }],
            ),
            (
                "remind me".to_string(),
                vec![IntentPrediction {
                    intent_name: "set_reminder".to_string(),
                    probability: 0.9,
                }],
            ),
        ]
        .into_iter()
        .collect();
        ChatbotEngine::new(
            Arc::new(classifier),
            Arc::new(MockedEntityExtractor::default()),
            catalog,
            ChatbotConfig::default(),
        )
        .with_template_selector(Box::new(FixedTemplateSelector::default()))
    }

    fn run_session(input: &str) -> String {
        let engine = test_engine();
        let mut output = Vec::new();
        let mut session = SessionLoop::new(
            &engine,
            SessionConfig::default(),
            Cursor::new(input.as_bytes().to_vec()),
            &mut output,
        );
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_session_processes_messages_until_confirmed_goodbye() {
        // When
        let transcript = run_session("hello\ngoodbye\nyes\n");

        // Then
        assert!(transcript.starts_with(&"=".repeat(50)));
        assert!(transcript.contains("RemindMe! Chatbot - Ready to assist you!\n"));
        assert!(transcript.contains("RemindMe!: Hello! How can I help you?"));
        assert!(transcript.contains("Are you sure you want to end this chat? Type \"yes\" or \"no\""));
        assert!(transcript.ends_with("Goodbye! Have a great day!\n"));
    }

    #[test]
    fn test_session_continues_when_goodbye_is_not_confirmed() {
        // When
        let transcript = run_session("goodbye\nno\nhello\ngoodbye\nyes\n");

        // Then
        assert!(transcript.contains("RemindMe!: Hello! How can I help you?"));
        assert!(transcript.ends_with("Goodbye! Have a great day!\n"));
    }

    #[test]
    fn test_session_rejects_invalid_exit_confirmation() {
        // When
        let transcript = run_session("goodbye\nmaybe\nhello\n");

        // Then
        assert!(transcript.contains("Invalid input. Please type \"yes\" or \"no\""));
        assert!(transcript.contains("RemindMe!: Hello! How can I help you?"));
        assert!(transcript.ends_with("\n\nGoodbye!\n"));
    }

    #[test]
    fn test_session_reads_slot_replies_from_the_same_stream() {
        // When
        let transcript = run_session("remind me\ntomorrow\nbye\nyes\n");

        // Then
        assert!(transcript.contains("Please provide date\n> "));
        assert!(transcript.contains("RemindMe!: Reminder set for tomorrow.\nPlease provide date"));
    }

    #[test]
    fn test_session_continues_after_cancelled_slot_prompt() {
        // When
        let transcript = run_session("remind me\n");

        // Then
        assert!(transcript.contains("Please provide date\n> "));
        assert!(transcript.contains("RemindMe!: Input cancelled. Please try again."));
        assert!(transcript.ends_with("\n\nGoodbye!\n"));
    }

    #[test]
    fn test_session_answers_blank_messages() {
        // When
        let transcript = run_session("\nbye\nyes\n");

        // Then
        assert!(transcript.contains("RemindMe!: Please enter a message."));
    }

    #[test]
    fn test_session_says_goodbye_on_closed_input() {
        // When
        let transcript = run_session("");

        // Then
        assert!(transcript.contains("RemindMe! Chatbot - Ready to assist you!\n"));
        assert!(transcript.ends_with("\n\nGoodbye!\n"));
    }

    #[test]
    fn test_is_goodbye_matches_substrings() {
        // Given
        let statements = SessionConfig::default().goodbye_statements;

        // When / Then
        assert!(is_goodbye(&statements, "goodbye"));
        assert!(is_goodbye(&statements, "Bye for now"));
        assert!(is_goodbye(&statements, "I have to leave"));
        assert!(!is_goodbye(&statements, "hello there"));
    }
}
