use serde_derive::Deserialize;

use crate::utils::EntityName;

#[derive(Debug, Clone, Deserialize)]
pub struct EntityAnnotationsModel {
    #[serde(default)]
    pub annotations: Vec<AnnotationModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationModel {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<AnnotatedSpanModel>,
}

/// Span boundaries are byte offsets into the annotated text.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotatedSpanModel {
    pub start: usize,
    pub end: usize,
    pub label: EntityName,
}
