use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{ItemSentimentSummary, ReviewsByItem};
use crate::services::Recommender;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub user_id: String,
    pub recommendations: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Label every review and each video's overall sentiment
pub async fn analyze(
    State(state): State<AppState>,
    Json(reviews): Json<ReviewsByItem>,
) -> AppResult<Json<BTreeMap<String, ItemSentimentSummary>>> {
    let summaries = state.aggregator.aggregate(&reviews).await?;
    Ok(Json(summaries))
}

/// Recommend unseen videos for one user from the posted review set
pub async fn recommend(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RecommendParams>,
    Json(reviews): Json<ReviewsByItem>,
) -> AppResult<Json<RecommendResponse>> {
    let top_k = params.top_k.unwrap_or(Recommender::DEFAULT_TOP_K);
    let recommendations = state
        .recommender
        .recommend(&user_id, &reviews, top_k)
        .await?;

    tracing::info!(
        %user_id,
        top_k,
        recommended = recommendations.len(),
        "Served recommendations"
    );

    Ok(Json(RecommendResponse {
        user_id,
        recommendations,
    }))
}
