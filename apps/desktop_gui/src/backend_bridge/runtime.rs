//! Worker thread hosting the async HTTP client. The UI thread never blocks
//! on the network; it exchanges messages with this thread over bounded
//! channels.

use crossbeam_channel::{Receiver, Sender};

use client_core::AdvisorClient;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawn the scoring worker. Each command runs as its own task, so a search
/// and an evaluation can be in flight at the same time. The worker exits
/// when the command channel closes.
pub fn launch(service_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(error = %err, "failed to build scoring worker runtime");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "Could not start the network worker: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let client = AdvisorClient::new(service_url);
            tracing::info!(base_url = client.base_url(), "scoring worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Search { ticket, query } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = client.search(&query).await;
                            let _ = ui_tx.try_send(UiEvent::SearchSettled { ticket, outcome });
                        });
                    }
                    BackendCommand::Evaluate { ticket, query } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let business_name = query.business_name.clone();
                            let outcome = client.evaluate(&query).await;
                            let _ = ui_tx.try_send(UiEvent::EvaluationSettled {
                                ticket,
                                business_name,
                                outcome,
                            });
                        });
                    }
                }
            }
            tracing::info!("command channel closed; scoring worker exiting");
        });
    });
}
