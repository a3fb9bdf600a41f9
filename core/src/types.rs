//! Wire DTOs for the prediction endpoint.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates. `likes` and
//! `comments` stay `serde_json::Number` so they print in the same text form
//! the server sent (`150`, not `150.0`).

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Request payload for `POST /predict/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictRequest {
    pub url: String,
}

/// Decision and feature metrics returned by the predictor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub decision: String,
    #[serde(default)]
    pub features: Features,
}

/// Auxiliary signals returned alongside the decision. Any of them may be
/// missing; unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Features {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_views: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_ratio: Option<f64>,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub message: String,
}
