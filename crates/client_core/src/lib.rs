use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ErrorBody,
    protocol::{
        EvaluationQuery, EvaluationResponse, SearchQuery, SearchResponse, EVALUATE_PATH,
        SEARCH_PATH,
    },
};
use thiserror::Error;
use tracing::{debug, warn};

pub mod flow;
pub mod forms;
pub mod view;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Could not reach the scoring service. Check your connection and try again.";

/// Outcome taxonomy for one request/response exchange. A single failed
/// attempt is terminal; there are no retries and no timeout beyond what the
/// transport enforces.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request never completed (network unreachable, timeout, DNS).
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a non-success status. `message` is the
    /// server-supplied error text when the failure body parsed, otherwise
    /// the generic fallback.
    #[error("service error (status {status}): {message}")]
    Application { status: u16, message: String },
    /// Success status, but the body was not the expected JSON shape.
    #[error("malformed response body: {detail}")]
    MalformedResponse { detail: String },
}

impl DispatchError {
    /// The single line shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            DispatchError::Transport { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
            DispatchError::Application { message, .. } => message.clone(),
            DispatchError::MalformedResponse { .. } => {
                shared::error::GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// HTTP client for the two scoring-service endpoints. Cheap to clone; both
/// flows share one connection pool.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    http: Client,
    base_url: String,
}

impl AdvisorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, DispatchError> {
        self.post_json(SEARCH_PATH, query).await
    }

    pub async fn evaluate(
        &self,
        query: &EvaluationQuery,
    ) -> Result<EvaluationResponse, DispatchError> {
        self.post_json(EVALUATE_PATH, query).await
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, DispatchError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        debug!(path, "dispatching scoring request");
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|source| DispatchError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .into_message();
            warn!(path, status = status.as_u16(), "scoring request rejected");
            return Err(DispatchError::Application {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|err| DispatchError::MalformedResponse {
                detail: err.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
