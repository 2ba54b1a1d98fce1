use std::collections::hash_map::Entry;
use std::fs::File;
use std::iter::FromIterator;
use std::ops::Range;
use std::path::Path;

use failure::ResultExt;
use itertools::Itertools;
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};

use crate::datetime_parser::{find_date_expression, find_time_expression};
use crate::entity_extractor::{EntityExtractor, EntityMap, EntityValue};
use crate::errors::*;
use crate::models::EntityAnnotationsModel;
use crate::utils::{deduplicate_overlapping_items, ranges_overlap, EntityName};

pub const DATE_ENTITY: &str = "date";
pub const TIME_ENTITY: &str = "time";

/// Entity extractor backed by the surface forms found in an annotated
/// corpus, augmented with date and time expression matching.
#[derive(Debug)]
pub struct LexiconEntityExtractor {
    entries: Vec<LexiconEntry>,
    keep_first_entity_only: bool,
}

#[derive(Debug)]
struct LexiconEntry {
    pattern: Regex,
    label: EntityName,
}

#[derive(Debug, Clone, PartialEq)]
struct EntityMatch {
    range: Range<usize>,
    label: EntityName,
    value: String,
}

impl LexiconEntityExtractor {
    pub fn from_path<P: AsRef<Path>>(path: P, keep_first_entity_only: bool) -> Result<Self> {
        info!("Loading entity annotations from {:?}...", path.as_ref());
        let annotations_file = File::open(&path).with_context(|_| {
            RemindMeError::LexiconLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        let model = serde_json::from_reader(annotations_file).with_context(|_| {
            RemindMeError::LexiconLoad(path.as_ref().to_string_lossy().into_owned())
        })?;
        let extractor = Self::from_model(model, keep_first_entity_only)?;
        info!("Loaded entity lexicon with {} entries", extractor.entries.len());
        Ok(extractor)
    }

    pub fn from_model(
        model: EntityAnnotationsModel,
        keep_first_entity_only: bool,
    ) -> Result<Self> {
        let mut surface_forms = Vec::new();
        for annotation in &model.annotations {
            for span in &annotation.entities {
                match annotation.text.get(span.start..span.end) {
                    Some(surface) if !surface.trim().is_empty() => {
                        surface_forms.push((surface.to_lowercase(), span.label.clone()));
                    }
                    _ => warn!(
                        "Skipping annotation span {}..{} outside of '{}'",
                        span.start, span.end, annotation.text
                    ),
                }
            }
        }
        let entries = surface_forms
            .into_iter()
            .unique()
            .map(|(surface, label)| {
                let pattern = surface_pattern(&surface)?;
                Ok(LexiconEntry { pattern, label })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            entries,
            keep_first_entity_only,
        })
    }

    pub fn with_keep_first_entity_only(mut self, keep_first_entity_only: bool) -> Self {
        self.keep_first_entity_only = keep_first_entity_only;
        self
    }
}

/// Builds an extractor from `(surface form, entity label)` pairs, keeping
/// only the first occurrence of each entity type at extraction time.
impl FromIterator<(String, EntityName)> for LexiconEntityExtractor {
    fn from_iter<T: IntoIterator<Item = (String, EntityName)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .unique()
            .filter_map(|(surface, label)| {
                surface_pattern(&surface)
                    .ok()
                    .map(|pattern| LexiconEntry { pattern, label })
            })
            .collect();
        Self {
            entries,
            keep_first_entity_only: true,
        }
    }
}

impl EntityExtractor for LexiconEntityExtractor {
    fn extract(&self, message: &str) -> Result<EntityMap> {
        if message.trim().is_empty() {
            return Ok(EntityMap::new());
        }
        let mut matches = Vec::new();
        for entry in &self.entries {
            for found in entry.pattern.find_iter(message) {
                matches.push(EntityMatch {
                    range: found.start()..found.end(),
                    label: entry.label.clone(),
                    value: found.as_str().to_string(),
                });
            }
        }
        matches.extend(temporal_matches(message));

        let mut deduped = deduplicate_overlapping_items(
            matches,
            |lhs, rhs| ranges_overlap(&lhs.range, &rhs.range),
            |matched| -(matched.range.clone().count() as i32),
        );
        deduped.sort_by_key(|matched| matched.range.start);

        let mut entities = EntityMap::new();
        for matched in deduped {
            match entities.entry(matched.label) {
                Entry::Vacant(entry) => {
                    entry.insert(EntityValue::Single(matched.value));
                }
                Entry::Occupied(mut entry) => {
                    if !self.keep_first_entity_only {
                        entry.get_mut().push(matched.value);
                    }
                }
            }
        }
        if !entities.is_empty() {
            debug!("Extracted entities from '{}': {:?}", message, entities);
        }
        Ok(entities)
    }
}

fn surface_pattern(surface: &str) -> Result<Regex> {
    let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(surface)))
        .case_insensitive(true)
        .build()?;
    Ok(pattern)
}

fn temporal_matches(message: &str) -> Vec<EntityMatch> {
    let mut matches = Vec::new();
    if let Some(range) = find_date_expression(message) {
        matches.push(EntityMatch {
            value: message[range.clone()].to_string(),
            label: DATE_ENTITY.to_string(),
            range,
        });
    }
    if let Some(range) = find_time_expression(message) {
        matches.push(EntityMatch {
            value: message[range.clone()].to_string(),
            label: TIME_ENTITY.to_string(),
            range,
        });
    }
    matches
}
