use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use failure::ResultExt;
use log::info;

use crate::errors::*;
use crate::models::{IntentCatalogModel, SlotModel};
use crate::utils::{EntityName, IntentName};

/// A slot an intent needs before its response templates can be completed.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSpec {
    pub entity_type: EntityName,
    pub required: bool,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub tag: IntentName,
    pub patterns: Vec<String>,
    pub responses: Vec<String>,
    pub slots: Vec<SlotSpec>,
}

/// Validated collection of intents, indexed by tag.
///
/// Validation happens once at load time so that lookups during a dialogue
/// never have to guard against malformed declarations.
#[derive(Debug)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
    tag_index: HashMap<IntentName, usize>,
}

impl IntentCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Loading intent catalog from {:?}...", path.as_ref());
        let catalog_file = File::open(&path).with_context(|_| {
            RemindMeError::CatalogLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        let model = serde_json::from_reader(catalog_file).with_context(|_| {
            RemindMeError::CatalogLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        let catalog = Self::from_model(model)?;
        info!("Loaded {} intents", catalog.len());
        Ok(catalog)
    }

    pub fn from_model(model: IntentCatalogModel) -> Result<Self> {
        let mut intents = Vec::with_capacity(model.intents.len());
        let mut tag_index = HashMap::with_capacity(model.intents.len());
        for intent_model in model.intents {
            let slots = intent_model
                .inputs
                .into_iter()
                .map(|slot_model| match slot_model {
                    SlotModel::EntityType(entity_type) => SlotSpec {
                        prompt: default_prompt(&entity_type),
                        required: true,
                        entity_type,
                    },
                    SlotModel::Spec(spec) => SlotSpec {
                        prompt: match spec.prompt {
                            Some(prompt) => prompt,
                            None => default_prompt(&spec.entity_type),
                        },
                        required: spec.required,
                        entity_type: spec.entity_type,
                    },
                })
                .collect();
            let intent = Intent {
                tag: intent_model.tag,
                patterns: intent_model
                    .patterns
                    .iter()
                    .map(|pattern| pattern.text().to_string())
                    .collect(),
                responses: intent_model
                    .responses
                    .iter()
                    .map(|response| response.text().to_string())
                    .collect(),
                slots,
            };
            if tag_index.insert(intent.tag.clone(), intents.len()).is_some() {
                return Err(RemindMeError::DuplicateIntent(intent.tag).into());
            }
            intents.push(intent);
        }
        Ok(Self { intents, tag_index })
    }

    pub fn find(&self, tag: &str) -> Option<&Intent> {
        self.tag_index.get(tag).map(|index| &self.intents[*index])
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

fn default_prompt(entity_type: &str) -> String {
    format!("Please provide {}", entity_type)
}
