//! Stateless HTTP request builder and response parser for the predictor.
//!
//! # Design
//! `PredictClient` holds only the base URL and the status policy. Each
//! endpoint is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`; the round-trip in
//! between belongs to the caller.

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{HealthStatus, PredictRequest, PredictionResult};

#[derive(Debug, Clone)]
pub struct PredictClient {
    base_url: String,
    status_policy: StatusPolicy,
}

impl PredictClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url).with_status_policy(config.status_policy)
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict/", self.base_url)
    }

    pub fn build_predict(&self, url: &str) -> Result<HttpRequest, ApiError> {
        let payload = PredictRequest {
            url: url.to_string(),
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.predict_url(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Decode a prediction. Under `StatusPolicy::Ignore` a 500 with a valid
    /// body is a result like any other.
    pub fn parse_predict(&self, response: HttpResponse) -> Result<PredictionResult, ApiError> {
        self.check_status(&response)?;
        decode(&response)
    }

    /// The health probe always requires a 2xx status.
    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthStatus, ApiError> {
        if !response.is_success() {
            return Err(http_error(response));
        }
        decode(&response)
    }

    fn check_status(&self, response: &HttpResponse) -> Result<(), ApiError> {
        match self.status_policy {
            StatusPolicy::Ignore => Ok(()),
            StatusPolicy::RequireSuccess if response.is_success() => Ok(()),
            StatusPolicy::RequireSuccess => Err(http_error(response.clone())),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn http_error(response: HttpResponse) -> ApiError {
    ApiError::HttpError {
        status: response.status,
        body: response.body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PredictClient {
        PredictClient::new("http://127.0.0.1:8000")
    }

    #[test]
    fn build_predict_produces_correct_request() {
        let req = client().build_predict("https://youtu.be/abc123").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://127.0.0.1:8000/predict/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"url": "https://youtu.be/abc123"}));
    }

    #[test]
    fn build_predict_escapes_url() {
        let req = client().build_predict("a\"b").unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["url"], "a\"b");
    }

    #[test]
    fn build_health_produces_correct_request() {
        let req = client().build_health();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://127.0.0.1:8000/");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PredictClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.predict_url(), "http://127.0.0.1:8000/predict/");
    }

    #[test]
    fn parse_predict_success() {
        let response = HttpResponse::new(
            200,
            r#"{"decision":"Watch","features":{"sentiment":0.732,"likes":150,"comments":42}}"#,
        );
        let result = client().parse_predict(response).unwrap();
        assert_eq!(result.decision, "Watch");
        assert_eq!(result.features.sentiment, Some(0.732));
    }

    #[test]
    fn parse_predict_ignores_error_status_by_default() {
        let response = HttpResponse::new(500, r#"{"decision":"Skip","features":{}}"#);
        let result = client().parse_predict(response).unwrap();
        assert_eq!(result.decision, "Skip");
    }

    #[test]
    fn parse_predict_strict_rejects_error_status() {
        let response = HttpResponse::new(500, r#"{"decision":"Skip","features":{}}"#);
        let err = client()
            .with_status_policy(StatusPolicy::RequireSuccess)
            .parse_predict(response)
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_predict_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_predict(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_predict_error_detail_body_is_not_a_result() {
        let response = HttpResponse::new(500, r#"{"detail":"Video not found"}"#);
        let err = client().parse_predict(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_health_requires_success() {
        let ok = client()
            .parse_health(HttpResponse::new(200, r#"{"message":"up"}"#))
            .unwrap();
        assert_eq!(ok.message, "up");

        let err = client()
            .parse_health(HttpResponse::new(503, r#"{"message":"down"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }
}
