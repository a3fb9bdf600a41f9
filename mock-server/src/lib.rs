use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
    time::Duration,
};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Video statistics the mock predictor knows about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// Compound sentiment of title and description, in `[-1, 1]`.
    pub sentiment: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Features {
    pub log_views: f64,
    pub likes: u64,
    pub comments: u64,
    pub like_ratio: f64,
    pub sentiment: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prediction {
    pub decision: String,
    pub features: Features,
}

#[derive(Deserialize)]
pub struct PredictInput {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

pub const WATCH: &str = "Watch 👍";
pub const SKIP: &str = "Skip 👎";
pub const HEALTH_MESSAGE: &str = "Backend is running ✅";

const MIN_LIKE_RATIO: f64 = 0.02;

pub type Catalog = Arc<HashMap<String, Video>>;

/// Router backed by the built-in sample catalog.
pub fn app() -> Router {
    app_with(sample_videos())
}

pub fn app_with(videos: impl IntoIterator<Item = Video>) -> Router {
    let catalog: Catalog = Arc::new(videos.into_iter().map(|v| (v.id.clone(), v)).collect());
    Router::new()
        .route("/", get(health))
        .route("/predict/", post(predict_handler))
        .with_state(catalog)
}

/// Router whose `/predict/` always answers with `status` and `body`,
/// regardless of the request.
pub fn scripted(status: StatusCode, body: serde_json::Value) -> Router {
    Router::new().route(
        "/predict/",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

/// Like `scripted`, but the body is sent verbatim, not as JSON.
pub fn scripted_text(status: StatusCode, body: String) -> Router {
    Router::new().route(
        "/predict/",
        post(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    )
}

/// Router whose `/predict/` sleeps for `delay` before answering.
pub fn stalled(delay: Duration) -> Router {
    Router::new().route(
        "/predict/",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(predict(&sample_videos()[0]))
        }),
    )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

pub fn sample_videos() -> Vec<Video> {
    vec![
        Video {
            id: "dQw4w9WgXcQ".to_string(),
            views: 1_500_000,
            likes: 45_000,
            comments: 2_300,
            sentiment: 0.62,
        },
        Video {
            id: "abc123def45".to_string(),
            views: 90_000,
            likes: 300,
            comments: 12,
            sentiment: -0.41,
        },
    ]
}

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:v=|be/)([A-Za-z0-9_-]{11})").expect("video id pattern is valid")
    })
}

/// Pull the 11-character video id out of a watch or short link.
pub fn extract_video_id(url: &str) -> Option<&str> {
    video_id_pattern()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Derive features and a deterministic decision from raw statistics.
pub fn predict(video: &Video) -> Prediction {
    let log_views = (video.views as f64).ln_1p();
    let like_ratio = video.likes as f64 / (video.views as f64 + 1.0);
    let decision = if like_ratio >= MIN_LIKE_RATIO && video.sentiment >= 0.0 {
        WATCH
    } else {
        SKIP
    };
    Prediction {
        decision: decision.to_string(),
        features: Features {
            log_views,
            likes: video.likes,
            comments: video.comments,
            like_ratio,
            sentiment: video.sentiment,
        },
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": HEALTH_MESSAGE }))
}

async fn predict_handler(
    State(catalog): State<Catalog>,
    Json(input): Json<PredictInput>,
) -> Result<Json<Prediction>, (StatusCode, Json<ErrorDetail>)> {
    info!(url = %input.url, "prediction requested");
    let id = extract_video_id(&input.url)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Invalid YouTube URL"))?;
    let video = catalog
        .get(id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Video not found"))?;
    let prediction = predict(video);
    info!(video_id = id, decision = %prediction.decision, "prediction served");
    Ok(Json(prediction))
}

fn reject(status: StatusCode, detail: &str) -> (StatusCode, Json<ErrorDetail>) {
    warn!(%status, detail, "prediction rejected");
    (
        status,
        Json(ErrorDetail {
            detail: detail.to_string(),
        }),
    )
}
