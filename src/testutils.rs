use std::collections::{HashMap, VecDeque};
use std::iter::FromIterator;

use failure::format_err;

use crate::entity_extractor::{EntityExtractor, EntityMap};
use crate::errors::*;
use crate::intent_catalog::IntentCatalog;
use crate::intent_classifier::{IntentClassifier, IntentPrediction};
use crate::prompter::{PromptReply, SlotPrompter};
use crate::template::TemplateSelector;

pub fn catalog_from_json(json: &str) -> IntentCatalog {
    let model = serde_json::from_str(json).unwrap();
    IntentCatalog::from_model(model).unwrap()
}

#[derive(Default)]
pub struct MockedIntentClassifier {
    pub mocked_outputs: HashMap<String, Vec<IntentPrediction>>,
}

impl IntentClassifier for MockedIntentClassifier {
    fn classify(&self, message: &str) -> Result<Vec<IntentPrediction>> {
        Ok(self
            .mocked_outputs
            .get(message)
            .cloned()
            .unwrap_or_else(|| vec![]))
    }
}

impl FromIterator<(String, Vec<IntentPrediction>)> for MockedIntentClassifier {
    fn from_iter<T: IntoIterator<Item = (String, Vec<IntentPrediction>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

#[derive(Default)]
pub struct MockedEntityExtractor {
    pub mocked_outputs: HashMap<String, EntityMap>,
}

impl EntityExtractor for MockedEntityExtractor {
    fn extract(&self, message: &str) -> Result<EntityMap> {
        Ok(self
            .mocked_outputs
            .get(message)
            .cloned()
            .unwrap_or_else(EntityMap::new))
    }
}

impl FromIterator<(String, EntityMap)> for MockedEntityExtractor {
    fn from_iter<T: IntoIterator<Item = (String, EntityMap)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}

pub struct FailingIntentClassifier;

impl IntentClassifier for FailingIntentClassifier {
    fn classify(&self, _message: &str) -> Result<Vec<IntentPrediction>> {
        Err(format_err!("intent classification failure"))
    }
}

pub struct FailingEntityExtractor;

impl EntityExtractor for FailingEntityExtractor {
    fn extract(&self, _message: &str) -> Result<EntityMap> {
        Err(format_err!("entity extraction failure"))
    }
}

/// Prompter replaying a fixed sequence of replies and recording the prompts
/// it was asked. Once the replies are exhausted it reports cancellation.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub replies: VecDeque<PromptReply>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn with_replies(replies: Vec<PromptReply>) -> Self {
        Self {
            replies: replies.into(),
            prompts: vec![],
        }
    }
}

impl SlotPrompter for ScriptedPrompter {
    fn read_reply(&mut self, prompt: &str) -> PromptReply {
        self.prompts.push(prompt.to_string());
        self.replies.pop_front().unwrap_or(PromptReply::Cancelled)
    }
}

/// Selector always picking the template at a fixed index, so that tests do
/// not depend on randomness.
#[derive(Default)]
pub struct FixedTemplateSelector {
    index: usize,
}

impl FixedTemplateSelector {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl TemplateSelector for FixedTemplateSelector {
    fn select<'a>(&self, templates: &'a [String]) -> Option<&'a str> {
        templates.get(self.index).map(|template| template.as_str())
    }
}
