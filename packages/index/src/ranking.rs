//! Grouping of raw search hits into ranked references.

/// Pick the `k` strongest references from raw `(reference, distance)` hits.
///
/// Hits are grouped by reference. Groups rank by hit count (descending),
/// then by their best distance (ascending); groups that still tie keep the
/// order in which they first appeared.
///
/// # Examples
/// ```
/// use statute_index::ranking::select_top_references;
///
/// let hits = vec![
///     ("A".to_string(), 0.2),
///     ("B".to_string(), 0.05),
///     ("C".to_string(), 0.3),
///     ("A".to_string(), 0.4),
///     ("C".to_string(), 0.35),
///     ("A".to_string(), 0.5),
/// ];
/// assert_eq!(select_top_references(&hits, 2), vec!["A", "C"]);
/// ```
#[must_use]
pub fn select_top_references(hits: &[(String, f32)], k: usize) -> Vec<String> {
    let mut groups: Vec<(&str, usize, f32)> = Vec::new();

    for (reference, distance) in hits {
        match groups.iter_mut().find(|group| group.0 == reference.as_str()) {
            Some(group) => {
                group.1 += 1;
                group.2 = group.2.min(*distance);
            }
            None => groups.push((reference.as_str(), 1, *distance)),
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.total_cmp(&b.2)));

    groups
        .into_iter()
        .take(k)
        .map(|(reference, _, _)| reference.to_string())
        .collect()
}
