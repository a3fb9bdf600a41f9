//! Client configuration.
//!
//! `ClientConfig::default()` reproduces the reference behavior: status codes
//! are not inspected and decisions are classified by substring. The one
//! deliberate departure is the 30 second request timeout.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a response's HTTP status affects parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any response with a decodable body is a result, whatever its status.
    #[default]
    Ignore,
    /// Non-2xx responses are failures before the body is looked at.
    RequireSuccess,
}

/// How a decision label selects the panel variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Classifier {
    /// Lowercased label contains `"watch"`.
    #[default]
    Substring,
    /// Leading word parsed as `Decision::Watch` or `Decision::Skip`.
    Enumerated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Enforced by the transport. `None` waits forever.
    pub timeout: Option<Duration>,
    pub status_policy: StatusPolicy,
    pub classifier: Classifier,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            status_policy: StatusPolicy::default(),
            classifier: Classifier::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
