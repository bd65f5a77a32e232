//! Filter and order the instance list for a selection.
//!
//! Filters run language first, then topic, then ordering. The input slice
//! is never reordered; callers get indices (or references) into it.

use crate::recommend::RecommendationIndex;
use crate::selection::Selection;
use crate::stats::InstanceRecord;
use crate::taxonomy::SortMode;
use rand::Rng;

/// Indices into `instances`, filtered and ordered for `selection`.
pub fn compute_indices<R: Rng + ?Sized>(
    instances: &[InstanceRecord],
    recommendations: &RecommendationIndex,
    selection: &Selection,
    rng: &mut R,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..instances.len()).collect();

    if selection.filters_language() {
        let domains = recommendations.domains_for_language(&selection.language);
        indices.retain(|&i| domains.contains(instances[i].domain.as_str()));
    }

    if selection.filters_topic() {
        let domains = recommendations.domains_for_topic(selection.topic);
        indices.retain(|&i| domains.contains(instances[i].domain.as_str()));
    }

    match selection.sort {
        SortMode::Random => sort_random(&mut indices, rng),
        SortMode::MostActive => sort_active(&mut indices, instances),
        SortMode::LeastActive => {
            // Reverse of most-active, so equal counts come out in reverse
            // input order rather than input order.
            sort_active(&mut indices, instances);
            indices.reverse();
        }
    }

    tracing::debug!(
        total = instances.len(),
        shown = indices.len(),
        topic = selection.topic.name(),
        language = %selection.language,
        sort = selection.sort.name(),
        "recomputed instance list"
    );
    indices
}

/// Filtered and ordered view of `instances` for `selection`.
pub fn compute<'a, R: Rng + ?Sized>(
    instances: &'a [InstanceRecord],
    recommendations: &RecommendationIndex,
    selection: &Selection,
    rng: &mut R,
) -> Vec<&'a InstanceRecord> {
    compute_indices(instances, recommendations, selection, rng)
        .into_iter()
        .map(|i| &instances[i])
        .collect()
}

/// Shuffle by giving each entry an independent key in [0, 1).
fn sort_random<R: Rng + ?Sized>(indices: &mut Vec<usize>, rng: &mut R) {
    let mut keyed: Vec<(f64, usize)> = indices.iter().map(|&i| (rng.r#gen::<f64>(), i)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}

/// Stable, descending by monthly active users.
fn sort_active(indices: &mut [usize], instances: &[InstanceRecord]) {
    indices.sort_by(|&a, &b| {
        instances[b]
            .counts
            .users_active_month
            .cmp(&instances[a].counts.users_active_month)
    });
}
