use std::sync::Arc;

use crate::services::{PolarityOracle, Recommender, ReviewAggregator};

/// Shared application state
///
/// The services are pure and request-scoped; the state only carries the
/// injected oracle wiring, so concurrent requests need no locking.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ReviewAggregator>,
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Creates application state around the given polarity oracle
    pub fn new(oracle: Arc<dyn PolarityOracle>) -> Self {
        let aggregator = Arc::new(ReviewAggregator::new(oracle));
        let recommender = Arc::new(Recommender::new(Arc::clone(&aggregator)));
        Self {
            aggregator,
            recommender,
        }
    }
}
