mod pattern_classifier;

pub use self::pattern_classifier::PatternIntentClassifier;

use crate::errors::*;
use crate::utils::IntentName;

#[derive(Debug, Clone, PartialEq)]
pub struct IntentPrediction {
    pub intent_name: IntentName,
    pub probability: f32,
}

/// Ranks the intents a message may express, most probable first.
///
/// Implementations return an empty ranking when nothing scores above their
/// confidence threshold, never an error for ordinary unmatched input.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, message: &str) -> Result<Vec<IntentPrediction>>;
}
