use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::config::{ChatbotConfig, MessageConfig};
use crate::entity_extractor::{EntityExtractor, EntityMap, LexiconEntityExtractor};
use crate::errors::*;
use crate::intent_catalog::IntentCatalog;
use crate::intent_classifier::{IntentClassifier, PatternIntentClassifier};
use crate::prompter::SlotPrompter;
use crate::response_generator::ResponseGenerator;
use crate::template::{TemplateSelector, UniformTemplateSelector};

/// Facade wiring the intent classifier, the entity extractor and the
/// response generator together for single turn processing.
pub struct ChatbotEngine {
    intent_classifier: Arc<dyn IntentClassifier>,
    entity_extractor: Arc<dyn EntityExtractor>,
    response_generator: ResponseGenerator,
    messages: MessageConfig,
}

impl ChatbotEngine {
    /// Loads the engine from a directory containing `intents.json` and
    /// `entities.json`.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ChatbotConfig) -> Result<Self> {
        info!("Loading the chatbot engine from {:?}...", path.as_ref());
        let catalog = Arc::new(IntentCatalog::from_path(
            path.as_ref().join("intents.json"),
        )?);
        let intent_classifier = Arc::new(PatternIntentClassifier::from_catalog(
            &catalog,
            config.intent.error_threshold,
        ));
        let entity_extractor = Arc::new(LexiconEntityExtractor::from_path(
            path.as_ref().join("entities.json"),
            config.entities.keep_first_entity_only,
        )?);
        let engine = Self::new(intent_classifier, entity_extractor, catalog, config);
        info!("Chatbot engine loaded");
        Ok(engine)
    }

    pub fn new(
        intent_classifier: Arc<dyn IntentClassifier>,
        entity_extractor: Arc<dyn EntityExtractor>,
        catalog: Arc<IntentCatalog>,
        config: ChatbotConfig,
    ) -> Self {
        let response_generator = ResponseGenerator::new(
            catalog,
            Box::new(UniformTemplateSelector),
            config.messages.clone(),
        );
        Self {
            intent_classifier,
            entity_extractor,
            response_generator,
            messages: config.messages,
        }
    }

    /// Replaces the template selection strategy, e.g. to make response
    /// selection reproducible.
    pub fn with_template_selector(mut self, selector: Box<dyn TemplateSelector>) -> Self {
        self.response_generator = self.response_generator.with_selector(selector);
        self
    }

    /// Processes one user message and returns the chatbot response.
    ///
    /// Failures of the classifier or the extractor are logged and degraded
    /// to an empty result, they never abort the turn.
    pub fn process_message(&self, message: &str, prompter: &mut dyn SlotPrompter) -> String {
        if message.trim().is_empty() {
            return self.messages.empty_input.clone();
        }
        let processing_start = Instant::now();
        let entities = self.entity_extractor.extract(message).unwrap_or_else(|err| {
            warn!("Entity extraction failed: {}", err);
            EntityMap::new()
        });
        let ranked_intents = self.intent_classifier.classify(message).unwrap_or_else(|err| {
            warn!("Intent classification failed: {}", err);
            vec![]
        });
        let response = self
            .response_generator
            .generate(&ranked_intents, entities, prompter);
        let response_preview: String = response.chars().take(100).collect();
        info!(
            "Processed message in {:?}: '{}' -> '{}'",
            processing_start.elapsed(),
            message,
            response_preview
        );
        response
    }
}
