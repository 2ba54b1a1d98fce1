use rand::seq::SliceRandom;

/// Replaces every `{key}` placeholder in the template with the given value.
///
/// Placeholders with no matching key are left untouched, and values are
/// inserted verbatim, so substituting the same key twice is a no-op unless
/// the value itself contains a placeholder.
pub fn substitute(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", key), value)
}

/// Strategy used to pick one response template among an intent's candidates.
pub trait TemplateSelector: Send + Sync {
    fn select<'a>(&self, templates: &'a [String]) -> Option<&'a str>;
}

/// Picks a template uniformly at random.
pub struct UniformTemplateSelector;

impl TemplateSelector for UniformTemplateSelector {
    fn select<'a>(&self, templates: &'a [String]) -> Option<&'a str> {
        templates
            .choose(&mut rand::thread_rng())
            .map(|template| template.as_str())
    }
}
