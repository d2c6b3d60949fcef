//! Memory-based collaborative filtering
//!
//! Similarity between two users is the signed dot product over the items
//! both have scored. Videos liked by positively-similar neighbors, and not
//! yet scored by the target user, are accumulated and ranked.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::ReviewsByItem;
use crate::services::{PreferenceMatrixBuilder, ReviewAggregator};

/// Recommends unseen videos to a user from other users' sentiment profiles
pub struct Recommender {
    aggregator: Arc<ReviewAggregator>,
}

impl Recommender {
    pub const DEFAULT_TOP_K: i64 = 3;

    pub fn new(aggregator: Arc<ReviewAggregator>) -> Self {
        Self { aggregator }
    }

    /// Ranks up to `top_k` videos the target user has not scored.
    ///
    /// The matrix is rebuilt from the supplied reviews on every call. A
    /// user with no reviews yields an empty list: no basis for
    /// recommendation, not an error. A negative `top_k` is rejected so a
    /// malformed request is distinguishable from "no data".
    ///
    /// Ties are broken deterministically: neighbors with equal similarity
    /// by user id ascending, candidates with equal accumulated score by
    /// item id ascending.
    pub async fn recommend(
        &self,
        user_id: &str,
        reviews_by_item: &ReviewsByItem,
        top_k: i64,
    ) -> AppResult<Vec<String>> {
        if top_k < 0 {
            return Err(AppError::InvalidInput(format!(
                "top_k must be non-negative, got {}",
                top_k
            )));
        }

        let summaries = self.aggregator.aggregate(reviews_by_item).await?;
        let matrix = PreferenceMatrixBuilder::build(&summaries);

        let Some(target) = matrix.get(user_id) else {
            tracing::debug!(user_id, "User absent from preference matrix");
            return Ok(Vec::new());
        };

        // Signed dot product over the shared support; users with no common
        // item carry no signal, zero or negative similarity excludes the
        // user entirely.
        let mut similarities: Vec<(&String, i64)> = Vec::new();
        for (other_id, ratings) in &matrix {
            if other_id == user_id {
                continue;
            }
            let mut similarity = 0i64;
            let mut overlap = false;
            for (item_id, &score) in ratings {
                if let Some(&target_score) = target.get(item_id) {
                    overlap = true;
                    similarity += i64::from(target_score) * i64::from(score);
                }
            }
            if overlap && similarity > 0 {
                similarities.push((other_id, similarity));
            }
        }
        similarities.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        tracing::debug!(
            user_id,
            neighbor_count = similarities.len(),
            "Computed user similarities"
        );

        // Only videos a neighbor scored +1 contribute, weighted by that
        // neighbor's similarity.
        let mut candidates: BTreeMap<&String, i64> = BTreeMap::new();
        for &(other_id, similarity) in &similarities {
            for (item_id, &score) in &matrix[other_id] {
                if score == 1 && !target.contains_key(item_id) {
                    *candidates.entry(item_id).or_insert(0) += similarity;
                }
            }
        }

        let mut ranked: Vec<(&String, i64)> = candidates.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Ok(ranked
            .into_iter()
            .take(top_k as usize)
            .map(|(item_id, _)| item_id.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Review;
    use crate::services::oracle::testing::FixedOracle;

    fn recommender() -> Recommender {
        let oracle = Arc::new(FixedOracle::new(&[
            ("great", 0.9),
            ("awful", -0.8),
            ("fine", 0.0),
        ]));
        Recommender::new(Arc::new(ReviewAggregator::new(oracle)))
    }

    fn reviews(pairs: &[(&str, &str)]) -> Vec<Review> {
        pairs
            .iter()
            .map(|(user_id, review)| Review {
                user_id: user_id.to_string(),
                review: review.to_string(),
            })
            .collect()
    }

    fn input(items: &[(&str, &[(&str, &str)])]) -> ReviewsByItem {
        items
            .iter()
            .map(|(item_id, pairs)| (item_id.to_string(), reviews(pairs)))
            .collect()
    }

    #[tokio::test]
    async fn test_recommend_via_shared_positive_neighbor() {
        // bob is alice's only positively-similar neighbor (via v1) and
        // likes v2, which alice has not scored.
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great")]),
            ("v2", &[("bob", "great"), ("carol", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert_eq!(recs, vec!["v2".to_string()]);
    }

    #[tokio::test]
    async fn test_recommend_absent_user_is_empty() {
        let reviews = input(&[("v1", &[("alice", "great")])]);
        let recs = recommender()
            .recommend("unknown_user", &reviews, 3)
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_top_k_zero_is_empty() {
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great")]),
            ("v2", &[("bob", "great")]),
        ]);
        let recs = recommender().recommend("alice", &reviews, 0).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_rejects_negative_top_k() {
        let reviews = input(&[("v1", &[("alice", "great")])]);
        let err = recommender()
            .recommend("alice", &reviews, -1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_recommend_excludes_seen_items_and_duplicates() {
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great"), ("carol", "great")]),
            ("v2", &[("bob", "great"), ("carol", "great")]),
            ("v3", &[("bob", "great")]),
        ]);

        let recs = recommender()
            .recommend("alice", &reviews, 10)
            .await
            .unwrap();
        assert!(!recs.contains(&"v1".to_string()));
        let mut deduped = recs.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), recs.len());
        // v2 is backed by two neighbors, v3 by one
        assert_eq!(recs, vec!["v2".to_string(), "v3".to_string()]);
    }

    #[tokio::test]
    async fn test_recommend_excludes_dissimilar_neighbor() {
        // bob disagrees with alice on v1, so bob's likes carry no weight.
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "awful")]),
            ("v2", &[("bob", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_excludes_neighbor_without_overlap() {
        // carol shares no scored item with alice; her likes never surface.
        let reviews = input(&[
            ("v1", &[("alice", "great")]),
            ("v2", &[("carol", "great")]),
            ("v3", &[("carol", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_neutral_and_negative_items_never_contribute() {
        // bob is similar to alice via v1 but only liked v2 with "fine" /
        // disliked v3, so neither is recommended.
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great")]),
            ("v2", &[("bob", "fine")]),
            ("v3", &[("bob", "awful")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_ranks_by_accumulated_score() {
        // bob shares two liked items with alice (similarity 2), carol one
        // (similarity 1). bob backs v4, carol backs v3.
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great"), ("carol", "great")]),
            ("v2", &[("alice", "great"), ("bob", "great")]),
            ("v3", &[("carol", "great")]),
            ("v4", &[("bob", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert_eq!(recs, vec!["v4".to_string(), "v3".to_string()]);
    }

    #[tokio::test]
    async fn test_recommend_tie_breaks_by_item_id() {
        // v2 and v3 both accumulate bob's similarity only.
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great")]),
            ("v3", &[("bob", "great")]),
            ("v2", &[("bob", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 3).await.unwrap();
        assert_eq!(recs, vec!["v2".to_string(), "v3".to_string()]);
    }

    #[tokio::test]
    async fn test_recommend_truncates_to_top_k() {
        let reviews = input(&[
            ("v1", &[("alice", "great"), ("bob", "great")]),
            ("v2", &[("bob", "great")]),
            ("v3", &[("bob", "great")]),
            ("v4", &[("bob", "great")]),
        ]);

        let recs = recommender().recommend("alice", &reviews, 2).await.unwrap();
        assert_eq!(recs.len(), 2);
    }
}
