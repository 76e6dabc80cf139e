//! Change detection against the baseline snapshot.
//!
//! Comparison is literal string equality after trimming. `"01"` and `"1"` are
//! different values; callers that want them treated as equal must normalise
//! the baseline before it reaches the engine.

use super::cluster::Cluster;

/// True when every field's trimmed value equals its trimmed baseline.
///
/// A cluster with no baseline (a record being created) is never unchanged.
pub fn is_unchanged(cluster: &Cluster<'_>) -> bool {
    cluster
        .fields()
        .iter()
        .all(|f| f.original().is_some_and(|original| original == f.value()))
}
