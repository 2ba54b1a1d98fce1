use serde_derive::Deserialize;

use crate::utils::{EntityName, IntentName};

#[derive(Debug, Clone, Deserialize)]
pub struct IntentCatalogModel {
    pub intents: Vec<IntentModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentModel {
    pub tag: IntentName,
    #[serde(default)]
    pub patterns: Vec<PatternModel>,
    #[serde(default)]
    pub responses: Vec<ResponseModel>,
    #[serde(default)]
    pub inputs: Vec<SlotModel>,
}

/// Training patterns are either plain utterances or annotated objects
/// carrying the utterance under a "text" key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternModel {
    Text(String),
    Annotated(AnnotatedPatternModel),
}

impl PatternModel {
    pub fn text(&self) -> &str {
        match self {
            PatternModel::Text(text) => text,
            PatternModel::Annotated(annotated) => &annotated.text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatedPatternModel {
    pub text: String,
}

/// Response templates are plain strings or objects carrying the template
/// under a "text" key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseModel {
    Text(String),
    Object(ResponseObjectModel),
}

impl ResponseModel {
    pub fn text(&self) -> &str {
        match self {
            ResponseModel::Text(text) => text,
            ResponseModel::Object(object) => &object.text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseObjectModel {
    pub text: String,
}

/// Slot declarations are either a bare entity type name or an object with
/// an explicit required flag and prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlotModel {
    EntityType(EntityName),
    Spec(SlotSpecModel),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotSpecModel {
    #[serde(rename = "type")]
    pub entity_type: EntityName,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub prompt: Option<String>,
}

fn default_required() -> bool {
    true
}
