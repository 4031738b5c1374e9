//! Commands queued from the UI thread to the scoring worker.

use client_core::flow::SubmissionTicket;
use shared::protocol::{EvaluationQuery, SearchQuery};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Search {
        ticket: SubmissionTicket,
        query: SearchQuery,
    },
    Evaluate {
        ticket: SubmissionTicket,
        query: EvaluationQuery,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Search { .. } => "search",
            BackendCommand::Evaluate { .. } => "evaluate",
        }
    }
}
