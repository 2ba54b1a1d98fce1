use std::cmp::Ordering;
use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, warn};

use crate::errors::*;
use crate::intent_catalog::IntentCatalog;
use crate::intent_classifier::{IntentClassifier, IntentPrediction};
use crate::utils::{tokenize_light, IntentName};

/// Intent classifier scoring messages against the training patterns of the
/// catalog with a token set similarity.
pub struct PatternIntentClassifier {
    intents: Vec<IntentPatterns>,
    error_threshold: f32,
}

struct IntentPatterns {
    tag: IntentName,
    pattern_token_sets: Vec<HashSet<String>>,
}

impl PatternIntentClassifier {
    pub fn from_catalog(catalog: &IntentCatalog, error_threshold: f32) -> Self {
        let intents = catalog
            .intents()
            .iter()
            .map(|intent| IntentPatterns {
                tag: intent.tag.clone(),
                pattern_token_sets: intent
                    .patterns
                    .iter()
                    .map(|pattern| tokenize_light(pattern).into_iter().collect::<HashSet<_>>())
                    .filter(|tokens| !tokens.is_empty())
                    .collect(),
            })
            .collect::<Vec<_>>();
        debug!(
            "Built pattern classifier with {} intents (threshold: {})",
            intents.len(),
            error_threshold
        );
        Self {
            intents,
            error_threshold,
        }
    }
}

impl IntentClassifier for PatternIntentClassifier {
    fn classify(&self, message: &str) -> Result<Vec<IntentPrediction>> {
        let message_tokens: HashSet<String> = tokenize_light(message).into_iter().collect();
        if message_tokens.is_empty() {
            return Ok(vec![]);
        }
        let predictions: Vec<IntentPrediction> = self
            .intents
            .iter()
            .filter_map(|intent| {
                let probability = intent
                    .pattern_token_sets
                    .iter()
                    .map(|pattern_tokens| similarity(&message_tokens, pattern_tokens))
                    .fold(0.0f32, f32::max);
                if probability > self.error_threshold {
                    Some(IntentPrediction {
                        intent_name: intent.tag.clone(),
                        probability,
                    })
                } else {
                    None
                }
            })
            .sorted_by(|lhs, rhs| {
                rhs.probability
                    .partial_cmp(&lhs.probability)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| lhs.intent_name.cmp(&rhs.intent_name))
            })
            .collect();
        match predictions.first() {
            Some(top_prediction) => debug!(
                "Predicted intent '{}' with probability {:.3}",
                top_prediction.intent_name, top_prediction.probability
            ),
            None => warn!("No intent passed the error threshold for: '{}'", message),
        }
        Ok(predictions)
    }
}

/// Harmonic mean of the share of pattern tokens found in the message and the
/// share of message tokens found in the pattern.
fn similarity(message_tokens: &HashSet<String>, pattern_tokens: &HashSet<String>) -> f32 {
    let overlap = pattern_tokens.intersection(message_tokens).count() as f32;
    if overlap == 0.0 {
        return 0.0;
    }
    let pattern_coverage = overlap / pattern_tokens.len() as f32;
    let message_coverage = overlap / message_tokens.len() as f32;
    2.0 * pattern_coverage * message_coverage / (pattern_coverage + message_coverage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::catalog_from_json;

    fn classifier(error_threshold: f32) -> PatternIntentClassifier {
        let catalog = catalog_from_json(
            r#"{
                "intents": [
                    {
                        "tag": "greeting",
                        "patterns": ["hello", "hi there", "good morning"],
                        "responses": ["Hello!"]
                    },
                    {
                        "tag": "set_reminder",
                        "patterns": ["remind me", "set a reminder", "create a reminder"],
                        "responses": ["Reminder set for {date}."]
                    }
                ]
            }"#,
        );
        PatternIntentClassifier::from_catalog(&catalog, error_threshold)
    }

    #[test]
    fn test_classify_ranks_matching_intent_first() {
        // Given
        let classifier = classifier(0.25);

        // When
        let predictions = classifier.classify("please remind me about the meeting").unwrap();

        // Then
        assert_eq!("set_reminder", predictions[0].intent_name);
        assert!(predictions[0].probability > 0.25);
    }

    #[test]
    fn test_classify_with_exact_pattern_match() {
        // Given
        let classifier = classifier(0.25);

        // When
        let predictions = classifier.classify("set a reminder").unwrap();

        // Then
        assert_eq!("set_reminder", predictions[0].intent_name);
        assert!((predictions[0].probability - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_classify_returns_descending_probabilities() {
        // Given
        let classifier = classifier(0.0);

        // When
        let predictions = classifier.classify("hello, remind me").unwrap();

        // Then
        assert_eq!(2, predictions.len());
        assert!(predictions[0].probability >= predictions[1].probability);
    }

    #[test]
    fn test_classify_filters_predictions_below_threshold() {
        // Given
        let classifier = classifier(0.9);

        // When
        let predictions = classifier.classify("please remind me about the meeting").unwrap();

        // Then
        assert_eq!(Vec::<IntentPrediction>::new(), predictions);
    }

    #[test]
    fn test_classify_with_unmatched_message() {
        // Given
        let classifier = classifier(0.25);

        // When
        let predictions = classifier.classify("completely unrelated words").unwrap();

        // Then
        assert_eq!(Vec::<IntentPrediction>::new(), predictions);
    }

    #[test]
    fn test_classify_with_blank_message() {
        // Given
        let classifier = classifier(0.25);

        // When / Then
        assert_eq!(Vec::<IntentPrediction>::new(), classifier.classify("").unwrap());
        assert_eq!(
            Vec::<IntentPrediction>::new(),
            classifier.classify(" !? ").unwrap()
        );
    }

    #[test]
    fn test_classify_breaks_ties_deterministically() {
        // Given
        let catalog = catalog_from_json(
            r#"{
                "intents": [
                    {"tag": "second", "patterns": ["do the thing"], "responses": ["B"]},
                    {"tag": "first", "patterns": ["do the thing"], "responses": ["A"]}
                ]
            }"#,
        );
        let classifier = PatternIntentClassifier::from_catalog(&catalog, 0.25);

        // When
        let predictions = classifier.classify("do the thing").unwrap();

        // Then
        let names: Vec<&str> = predictions
            .iter()
            .map(|prediction| prediction.intent_name.as_str())
            .collect();
        assert_eq!(vec!["first", "second"], names);
    }
}
