//! The Request Client: one session's transient state and the operations that
//! mutate it.
//!
//! # Design
//! `Session` is the single owner of `SessionState`. A submission is split in
//! two so a host can run the I/O however it likes:
//!
//! 1. `begin_submit` validates the input, marks the session pending, clears
//!    the previous result and hands back a `Submission` carrying a fresh id
//!    and the request to send.
//! 2. `complete` takes that id plus whatever the transport produced and
//!    always returns the session to idle.
//!
//! Only the id recorded by the latest `begin_submit` is accepted by
//! `complete`; anything else is stale. `submit` glues the two halves around a
//! `Transport` for hosts that are happy to block.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::PredictClient;
use crate::config::{Classifier, ClientConfig};
use crate::error::{ApiError, SubmitError, TransportError};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::render::View;
use crate::types::PredictionResult;

/// The three fields a UI binds to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub input_url: String,
    pub is_pending: bool,
    pub last_result: Option<PredictionResult>,
}

/// An accepted submit that is waiting for its response.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct Session {
    client: PredictClient,
    classifier: Classifier,
    state: SessionState,
    in_flight: Option<Uuid>,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: PredictClient::from_config(config),
            classifier: config.classifier,
            state: SessionState::default(),
            in_flight: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending
    }

    pub fn last_result(&self) -> Option<&PredictionResult> {
        self.state.last_result.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input_url = text.into();
    }

    pub fn view(&self) -> View {
        View::of(&self.state, self.classifier)
    }

    pub fn begin_submit(&mut self) -> Result<Submission, SubmitError> {
        if self.state.input_url.is_empty() {
            debug!("submit rejected: empty input");
            return Err(SubmitError::Validation);
        }
        if let Some(id) = self.in_flight {
            debug!(%id, "submit rejected: request already pending");
            return Err(SubmitError::InFlight);
        }

        let request = self.client.build_predict(&self.state.input_url)?;
        let id = Uuid::new_v4();
        self.in_flight = Some(id);
        self.state.is_pending = true;
        self.state.last_result = None;
        debug!(%id, url = %self.state.input_url, endpoint = %request.url, "submission started");
        Ok(Submission { id, request })
    }

    /// Finish the submission `id` with the transport's outcome.
    ///
    /// Returns the stored result on success. On any failure the previous
    /// result stays cleared. The session is idle afterwards unless `id` was
    /// stale, in which case nothing changes.
    pub fn complete(
        &mut self,
        id: Uuid,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<&PredictionResult, SubmitError> {
        if self.in_flight != Some(id) {
            warn!(%id, "ignoring completion for a submission that is not in flight");
            return Err(SubmitError::Stale);
        }
        self.in_flight = None;
        self.state.is_pending = false;

        let parsed = outcome
            .map_err(ApiError::from)
            .and_then(|response| {
                debug!(%id, status = response.status, "response received");
                self.client.parse_predict(response)
            });

        match parsed {
            Ok(prediction) => {
                debug!(%id, decision = %prediction.decision, "submission succeeded");
                Ok(&*self.state.last_result.insert(prediction))
            }
            Err(err) => {
                warn!(%id, error = %err, "submission failed");
                Err(SubmitError::Network(err))
            }
        }
    }

    /// Validate, send through `transport`, and record the outcome.
    pub fn submit<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<&PredictionResult, SubmitError> {
        let submission = self.begin_submit()?;
        let outcome = transport.execute(&submission.request);
        self.complete(submission.id, outcome)
    }

    /// Forget the in-flight submission, if any. Its eventual completion will
    /// be treated as stale. Returns whether anything was aborted.
    pub fn abort(&mut self) -> bool {
        match self.in_flight.take() {
            Some(id) => {
                self.state.is_pending = false;
                debug!(%id, "submission aborted");
                true
            }
            None => false,
        }
    }
}
