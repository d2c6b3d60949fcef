//! Preference matrix construction

use std::collections::BTreeMap;

use crate::models::{ItemSentimentSummary, PreferenceMatrix};

/// Flattens per-item sentiment summaries into a sparse user×item matrix
///
/// Only per-user labels participate; each item's `overall` label is an
/// item-level aggregate, not a preference signal. Ordered maps make the
/// result deterministic for a given input.
pub struct PreferenceMatrixBuilder;

impl PreferenceMatrixBuilder {
    pub fn build(summaries: &BTreeMap<String, ItemSentimentSummary>) -> PreferenceMatrix {
        let mut matrix = PreferenceMatrix::new();
        for (item_id, summary) in summaries {
            for (user_id, label) in &summary.labels {
                matrix
                    .entry(user_id.clone())
                    .or_default()
                    .insert(item_id.clone(), label.preference());
            }
        }
        matrix
    }
}
