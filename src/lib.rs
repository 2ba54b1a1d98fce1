pub mod config;
pub mod datetime_parser;
mod engine;
mod entity_extractor;
pub mod errors;
mod intent_catalog;
mod intent_classifier;
pub mod models;
mod prompter;
mod response_generator;
mod session;
mod template;
#[cfg(test)]
mod testutils;
mod utils;

pub use crate::config::{
    ChatbotConfig, EntityConfig, IntentConfig, MessageConfig, SessionConfig,
    INTENT_ERROR_THRESHOLD_ENV,
};
pub use crate::engine::ChatbotEngine;
pub use crate::entity_extractor::{
    EntityExtractor, EntityMap, EntityValue, LexiconEntityExtractor, DATE_ENTITY, TIME_ENTITY,
};
pub use crate::errors::*;
pub use crate::intent_catalog::{Intent, IntentCatalog, SlotSpec};
pub use crate::intent_classifier::{IntentClassifier, IntentPrediction, PatternIntentClassifier};
pub use crate::prompter::{LinePrompter, PromptReply, SlotPrompter, StdinPrompter};
pub use crate::response_generator::ResponseGenerator;
pub use crate::session::SessionLoop;
pub use crate::template::{substitute, TemplateSelector, UniformTemplateSelector};
pub use crate::utils::tokenize_light;
