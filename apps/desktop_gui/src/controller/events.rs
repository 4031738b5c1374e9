//! Events flowing from the scoring worker back to the UI thread, plus the
//! one-line presentation of dispatcher failures.

use client_core::flow::SubmissionTicket;
use client_core::DispatchError;
use shared::protocol::{EvaluationResponse, SearchResponse};

#[derive(Debug)]
pub enum UiEvent {
    SearchSettled {
        ticket: SubmissionTicket,
        outcome: Result<SearchResponse, DispatchError>,
    },
    EvaluationSettled {
        ticket: SubmissionTicket,
        /// Business name as it was submitted, for the verdict heading.
        /// The draft may have been edited while the request was in flight.
        business_name: String,
        outcome: Result<EvaluationResponse, DispatchError>,
    },
    WorkerFailed(String),
}

/// Collapse any dispatcher failure to the single line shown in a flow's
/// error notice.
pub fn failure_notice(err: &DispatchError) -> String {
    let label = match err {
        DispatchError::Transport { .. } => "Connection",
        DispatchError::Application { .. } => "Service",
        DispatchError::MalformedResponse { .. } => "Response",
    };
    format!("{label} error: {}", err.user_message())
}
