//! Per-flow submission lifecycle: `idle -> submitting -> idle`, with
//! sequence tickets so a stale settlement can never clobber a newer one.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowPhase {
    #[default]
    Idle,
    Submitting,
}

/// Issued once per submission; monotonically increasing within a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// This ticket is the most recently issued one; its outcome applies.
    Current,
    /// A newer submission has been issued since; discard this outcome.
    Stale,
}

#[derive(Debug, Default)]
pub struct FlowLifecycle {
    phase: FlowPhase,
    issued: u64,
}

impl FlowLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FlowPhase::Submitting
    }

    /// Begin a submission. Returns `None` while one is already in flight,
    /// making re-entrant submit events a no-op.
    pub fn submit(&mut self) -> Option<SubmissionTicket> {
        if self.is_submitting() {
            return None;
        }
        Some(self.issue())
    }

    /// Begin a submission even while one is in flight. The earlier request's
    /// settlement becomes stale; the newest-issued submission wins
    /// regardless of completion order.
    pub fn submit_superseding(&mut self) -> SubmissionTicket {
        self.issue()
    }

    fn issue(&mut self) -> SubmissionTicket {
        self.issued += 1;
        self.phase = FlowPhase::Submitting;
        SubmissionTicket(self.issued)
    }

    /// Settle a submission. Only the most recently issued ticket returns to
    /// idle; a stale ticket leaves the flow submitting because a newer
    /// request is still outstanding.
    pub fn settle(&mut self, ticket: SubmissionTicket) -> Settlement {
        if ticket.0 == self.issued {
            self.phase = FlowPhase::Idle;
            Settlement::Current
        } else {
            Settlement::Stale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_is_rejected_while_in_flight() {
        let mut flow = FlowLifecycle::new();
        let first = flow.submit().expect("first submission");
        assert!(flow.submit().is_none());
        assert_eq!(flow.settle(first), Settlement::Current);
        assert!(flow.submit().is_some());
    }

    #[test]
    fn settlement_returns_flow_to_idle_on_every_path() {
        let mut flow = FlowLifecycle::new();
        let ticket = flow.submit().expect("submission");
        assert!(flow.is_submitting());
        flow.settle(ticket);
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn superseded_submission_settles_stale_in_completion_order() {
        let mut flow = FlowLifecycle::new();
        let first = flow.submit().expect("first submission");
        let second = flow.submit_superseding();

        // Older response arrives first: discarded, flow stays submitting.
        assert_eq!(flow.settle(first), Settlement::Stale);
        assert!(flow.is_submitting());

        assert_eq!(flow.settle(second), Settlement::Current);
        assert!(!flow.is_submitting());
    }

    #[test]
    fn superseded_submission_stays_stale_when_it_completes_last() {
        let mut flow = FlowLifecycle::new();
        let first = flow.submit().expect("first submission");
        let second = flow.submit_superseding();

        // Newest-issued response completes first and wins.
        assert_eq!(flow.settle(second), Settlement::Current);
        assert!(!flow.is_submitting());

        // The older response trickling in later must still be discarded.
        assert_eq!(flow.settle(first), Settlement::Stale);
        assert!(!flow.is_submitting());
    }
}
