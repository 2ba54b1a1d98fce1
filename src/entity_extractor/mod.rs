mod lexicon_extractor;

pub use self::lexicon_extractor::{LexiconEntityExtractor, DATE_ENTITY, TIME_ENTITY};

use std::collections::HashMap;
use std::mem;

use crate::errors::*;
use crate::utils::EntityName;

/// Entity values extracted from a single message, keyed by entity type.
pub type EntityMap = HashMap<EntityName, EntityValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum EntityValue {
    Single(String),
    Multiple(Vec<String>),
}

impl EntityValue {
    /// Value used when the entity is substituted into a response template.
    /// Multi valued entities contribute their first occurrence.
    pub fn display_value(&self) -> &str {
        match self {
            EntityValue::Single(value) => value,
            EntityValue::Multiple(values) => {
                values.first().map(String::as_str).unwrap_or("")
            }
        }
    }

    pub fn push(&mut self, value: String) {
        match self {
            EntityValue::Single(existing) => {
                *self = EntityValue::Multiple(vec![mem::take(existing), value]);
            }
            EntityValue::Multiple(values) => values.push(value),
        }
    }
}

pub trait EntityExtractor: Send + Sync {
    fn extract(&self, message: &str) -> Result<EntityMap>;
}
