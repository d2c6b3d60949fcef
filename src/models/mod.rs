use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scores at or above this mark read as Positive, at or below its negation
/// as Negative. Both boundaries are inclusive.
pub const POLARITY_THRESHOLD: f64 = 0.05;

/// A single free-text review left by one user on one video
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub user_id: String,
    pub review: String,
}

/// Discretized sentiment class derived from a compound polarity score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// Classifies a compound score in [-1, 1] by the fixed thresholds
    pub fn from_score(score: f64) -> Self {
        if score >= POLARITY_THRESHOLD {
            Label::Positive
        } else if score <= -POLARITY_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    /// Numeric preference value used in the user×item matrix
    pub fn preference(self) -> i8 {
        match self {
            Label::Positive => 1,
            Label::Negative => -1,
            Label::Neutral => 0,
        }
    }
}

/// Sentiment summary for one video: a label per reviewing user plus the
/// aggregate label for the video itself.
///
/// Serializes to the flat shape the frontend consumes, with per-user
/// labels beside the `overall` key:
/// `{"alice": "Positive", "bob": "Negative", "overall": "Neutral"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemSentimentSummary {
    #[serde(flatten)]
    pub labels: BTreeMap<String, Label>,
    pub overall: Label,
}

/// Raw request payload: every video's reviews, keyed by video id
pub type ReviewsByItem = BTreeMap<String, Vec<Review>>;

/// Sparse user×item preference matrix: `matrix[user][item] ∈ {-1, 0, +1}`.
/// An entry exists only if that user reviewed that item.
pub type PreferenceMatrix = BTreeMap<String, BTreeMap<String, i8>>;
