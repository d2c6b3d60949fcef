//! Review aggregation
//!
//! Turns raw per-review polarity scores into per-user labels and one
//! overall label per video. The overall label uses a vote-margin policy
//! rather than a plain majority: near-ties within 5% of the decisive
//! votes read as Neutral.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{ItemSentimentSummary, Label, Review, ReviewsByItem};
use crate::services::PolarityOracle;

/// Aggregates reviews into per-user and per-item sentiment labels
pub struct ReviewAggregator {
    oracle: Arc<dyn PolarityOracle>,
}

impl ReviewAggregator {
    /// Creates an aggregator scoring reviews through the given oracle
    pub fn new(oracle: Arc<dyn PolarityOracle>) -> Self {
        Self { oracle }
    }

    /// Labels every review and derives each video's overall label.
    ///
    /// An oracle failure (including an out-of-range score) aborts the
    /// whole aggregation: a silently defaulted score would corrupt the
    /// vote tally.
    pub async fn aggregate(
        &self,
        reviews_by_item: &ReviewsByItem,
    ) -> AppResult<BTreeMap<String, ItemSentimentSummary>> {
        let mut summaries = BTreeMap::new();
        for (item_id, reviews) in reviews_by_item {
            let summary = self.aggregate_item(item_id, reviews).await?;
            summaries.insert(item_id.clone(), summary);
        }
        Ok(summaries)
    }

    async fn aggregate_item(
        &self,
        item_id: &str,
        reviews: &[Review],
    ) -> AppResult<ItemSentimentSummary> {
        let mut labels = BTreeMap::new();
        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut neutral = 0usize;

        for review in reviews {
            let score = self.oracle.score(&review.review).await?;
            if !(-1.0..=1.0).contains(&score) {
                return Err(AppError::Oracle(format!(
                    "{} returned out-of-range score {} for item {}",
                    self.oracle.name(),
                    score,
                    item_id
                )));
            }

            let label = Label::from_score(score);
            match label {
                Label::Positive => positive += 1,
                Label::Negative => negative += 1,
                Label::Neutral => neutral += 1,
            }

            // Every review counts in the tallies; a user reviewing twice
            // keeps their latest label.
            labels.insert(review.user_id.clone(), label);
        }

        let overall = overall_label(positive, negative);
        tracing::debug!(
            item_id,
            positive,
            negative,
            neutral,
            overall = ?overall,
            "Aggregated item reviews"
        );

        Ok(ItemSentimentSummary { labels, overall })
    }
}

/// Vote-margin policy for the item-level label.
///
/// Neutral votes never decide the outcome. With `P` positive and `N`
/// negative votes, the margin is 5% of `P + N` (at least one vote); a
/// split whose difference falls within the margin is indecisive.
fn overall_label(positive: usize, negative: usize) -> Label {
    let decisive = positive + negative;
    if decisive == 0 {
        return Label::Neutral;
    }

    let margin = std::cmp::max(1, (0.05 * decisive as f64) as usize);
    let diff = positive.abs_diff(negative);

    if positive == negative || diff <= margin {
        Label::Neutral
    } else if positive > negative {
        Label::Positive
    } else {
        Label::Negative
    }
}
