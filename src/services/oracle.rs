//! Polarity oracle abstraction
//!
//! The service never computes sentiment itself; it consumes a compound
//! polarity score in [-1, 1] from an external oracle. The trait keeps the
//! aggregator testable and lets deployments swap scoring backends.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Trait for external sentiment-scoring backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolarityOracle: Send + Sync {
    /// Returns the compound polarity score for one text.
    ///
    /// Callers may rely on the score lying in [-1, 1]; anything outside
    /// that range is treated as an oracle failure upstream.
    async fn score(&self, text: &str) -> AppResult<f64>;

    /// Oracle name for logging and debugging
    fn name(&self) -> &'static str;
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ScoreResponse {
    compound: f64,
}

/// Oracle backed by a remote HTTP scoring service
///
/// Expects a `POST {base_url}/score` endpoint taking `{"text": ...}` and
/// returning `{"compound": ...}`.
pub struct RemoteOracle {
    http_client: HttpClient,
    base_url: String,
}

impl RemoteOracle {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }
}

#[async_trait]
impl PolarityOracle for RemoteOracle {
    async fn score(&self, text: &str) -> AppResult<f64> {
        let response = self
            .http_client
            .post(format!("{}/score", self.base_url))
            .json(&ScoreRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Oracle(format!(
                "scoring service returned {}",
                response.status()
            )));
        }

        let body: ScoreResponse = response.json().await?;
        tracing::debug!(oracle = self.name(), compound = body.compound, "Text scored");
        Ok(body.compound)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
