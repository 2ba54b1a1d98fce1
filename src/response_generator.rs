use std::sync::Arc;

use log::debug;

use crate::config::MessageConfig;
use crate::entity_extractor::{EntityMap, EntityValue};
use crate::intent_catalog::IntentCatalog;
use crate::intent_classifier::IntentPrediction;
use crate::prompter::{PromptReply, SlotPrompter};
use crate::template::{substitute, TemplateSelector};

/// Turns an intent ranking and the entities of a message into the final
/// response text, prompting the user for any required slot that is still
/// missing.
pub struct ResponseGenerator {
    catalog: Arc<IntentCatalog>,
    selector: Box<dyn TemplateSelector>,
    messages: MessageConfig,
}

impl ResponseGenerator {
    pub fn new(
        catalog: Arc<IntentCatalog>,
        selector: Box<dyn TemplateSelector>,
        messages: MessageConfig,
    ) -> Self {
        Self {
            catalog,
            selector,
            messages,
        }
    }

    pub fn with_selector(mut self, selector: Box<dyn TemplateSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Generates the response for one dialogue turn.
    ///
    /// The entity map is consumed: values gathered through prompting only
    /// live for the duration of this turn.
    pub fn generate(
        &self,
        ranked_intents: &[IntentPrediction],
        mut entities: EntityMap,
        prompter: &mut dyn SlotPrompter,
    ) -> String {
        let top_prediction = match ranked_intents.first() {
            Some(prediction) => prediction,
            None => return self.messages.fallback.clone(),
        };
        let intent = match self.catalog.find(&top_prediction.intent_name) {
            Some(intent) => intent,
            None => {
                debug!(
                    "Predicted intent '{}' is not in the catalog",
                    top_prediction.intent_name
                );
                return self.messages.fallback.clone();
            }
        };
        let template = match self.selector.select(&intent.responses) {
            Some(template) if !template.is_empty() => template,
            _ => return self.messages.no_response.clone(),
        };
        debug!("Selected template for intent '{}': '{}'", intent.tag, template);

        let mut response = template.to_string();
        let mut missing_slots = Vec::new();
        for slot in &intent.slots {
            if let Some(value) = entities.get(&slot.entity_type) {
                response = substitute(&response, &slot.entity_type, value.display_value());
            } else if slot.required {
                missing_slots.push(slot);
            }
        }

        for slot in missing_slots {
            response.push('\n');
            response.push_str(&slot.prompt);
            match prompter.read_reply(&slot.prompt) {
                PromptReply::Line(value) => {
                    response = substitute(&response, &slot.entity_type, &value);
                    entities.insert(slot.entity_type.clone(), EntityValue::Single(value));
                }
                PromptReply::Empty => continue,
                PromptReply::Cancelled => return self.messages.cancelled.clone(),
            }
        }
        response
    }
}
