//! Sentiment-driven video recommendation service.
//!
//! Reviews are scored by an external polarity oracle, aggregated into
//! per-user and per-item sentiment labels, flattened into a sparse
//! user×item preference matrix, and ranked for a target user via
//! user-user similarity.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
