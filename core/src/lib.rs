//! Request client core for the watch-or-skip predictor.
//!
//! # Overview
//! Owns one UI session's state (input URL, pending flag, last result), builds
//! the `POST /predict/` request, parses the reply, and derives what the UI
//! should draw. All network I/O goes through the `Transport` trait, so the
//! core itself never touches a socket.
//!
//! # Design
//! - `PredictClient` is stateless: base URL plus status policy, with
//!   `build_*` / `parse_*` pairs per endpoint.
//! - `Session` is the single owner of mutable state; every submit ends with
//!   the session idle again.
//! - `render` is a pure function of state, so hosts redraw after each call.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod render;
pub mod session;
pub mod types;

pub use client::PredictClient;
pub use config::{Classifier, ClientConfig, StatusPolicy};
pub use error::{ApiError, SubmitError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use render::{Decision, ResultPanel, Variant, View};
pub use session::{Session, SessionState, Submission};
pub use types::{Features, HealthStatus, PredictRequest, PredictionResult};
