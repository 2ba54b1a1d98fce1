use std::ops::Range;

pub type IntentName = String;
pub type EntityName = String;

/// Lowercases the input and splits it into alphanumeric tokens.
pub fn tokenize_light(input: &str) -> Vec<String> {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

pub fn ranges_overlap(lhs: &Range<usize>, rhs: &Range<usize>) -> bool {
    lhs.start < rhs.end && rhs.start < lhs.end
}

pub fn deduplicate_overlapping_items<I, O, S, K>(
    items: Vec<I>,
    overlap: O,
    sort_key_fn: S,
) -> Vec<I>
where
    I: Clone,
    O: Fn(&I, &I) -> bool,
    S: FnMut(&I) -> K,
    K: Ord,
{
    let mut sorted_items = items.clone();
    sorted_items.sort_by_key(sort_key_fn);
    let mut deduplicated_items: Vec<I> = Vec::with_capacity(items.len());
    for item in sorted_items {
        if !deduplicated_items
            .iter()
            .any(|dedup_item| overlap(dedup_item, &item))
        {
            deduplicated_items.push(item);
        }
    }
    deduplicated_items
}
