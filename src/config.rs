use std::env;
use std::fs::File;
use std::path::Path;

use failure::ResultExt;
use log::warn;
use serde_derive::Deserialize;

use crate::errors::*;

pub const INTENT_ERROR_THRESHOLD_ENV: &str = "INTENT_ERROR_THRESHOLD";

/// Runtime configuration of the chatbot.
///
/// Every field has a default, so an empty or partial configuration file is
/// valid. All values are passed explicitly to the components that consume
/// them, nothing is read from global state afterwards.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    pub intent: IntentConfig,
    pub entities: EntityConfig,
    pub session: SessionConfig,
    pub messages: MessageConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    /// Predictions with a probability at or below this value are discarded.
    pub error_threshold: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// When true, only the first occurrence of each entity type is kept.
    pub keep_first_entity_only: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub goodbye_statements: Vec<String>,
    pub welcome_message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub fallback: String,
    pub no_response: String,
    pub cancelled: String,
    pub empty_input: String,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            error_threshold: 0.25,
        }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            keep_first_entity_only: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            goodbye_statements: vec![
                "bye".to_string(),
                "goodbye".to_string(),
                "see you".to_string(),
                "later".to_string(),
                "quit".to_string(),
                "exit".to_string(),
                "leave".to_string(),
                "end".to_string(),
            ],
            welcome_message: "RemindMe! Chatbot - Ready to assist you!".to_string(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            fallback: "I'm sorry, I didn't understand that. Could you please rephrase \
                       your question?"
                .to_string(),
            no_response: "I'm sorry, I don't have a response for that.".to_string(),
            cancelled: "Input cancelled. Please try again.".to_string(),
            empty_input: "Please enter a message.".to_string(),
        }
    }
}

impl ChatbotConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_file = File::open(&path).with_context(|_| {
            RemindMeError::ConfigLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        let config = serde_json::from_reader(config_file).with_context(|_| {
            RemindMeError::ConfigLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        Ok(config)
    }

    /// Applies overrides taken from the process environment.
    pub fn apply_env_overrides(&mut self) {
        let raw_threshold = env::var(INTENT_ERROR_THRESHOLD_ENV).ok();
        self.apply_threshold_override(raw_threshold.as_ref().map(|s| s.as_str()));
    }

    fn apply_threshold_override(&mut self, raw_threshold: Option<&str>) {
        if let Some(raw) = raw_threshold {
            match raw.trim().parse::<f32>() {
                Ok(threshold) => self.intent.error_threshold = threshold,
                Err(_) => warn!(
                    "Ignoring invalid {} value: '{}'",
                    INTENT_ERROR_THRESHOLD_ENV, raw
                ),
            }
        }
    }
}
