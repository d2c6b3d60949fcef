pub mod aggregator;
pub mod matrix;
pub mod oracle;
pub mod recommender;

pub use aggregator::ReviewAggregator;
pub use matrix::PreferenceMatrixBuilder;
pub use oracle::{PolarityOracle, RemoteOracle};
pub use recommender::Recommender;
