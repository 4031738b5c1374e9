//! Queueing from the UI thread to the scoring worker.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Try to queue a command for the worker. Returns `false` when nothing was
/// queued, so the caller can settle the ticket it just issued instead of
/// leaving the flow stuck in its submitting phase.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            *status = "The app is busy; please retry in a moment.".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command channel disconnected");
            *status = "The scoring worker stopped; restart the app.".to_string();
            false
        }
    }
}
