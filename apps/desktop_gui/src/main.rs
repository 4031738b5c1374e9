mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{AdvisorApp, SETTINGS_STORAGE_KEY};

const SERVICE_URL_ENV: &str = "VENTURE_SCOUT_SERVICE_URL";
const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

/// Desktop client for the Venture Scout opportunity scoring service.
#[derive(Debug, Parser)]
#[command(name = "venture-scout")]
struct Args {
    /// Base URL of the scoring service. Falls back to
    /// VENTURE_SCOUT_SERVICE_URL, then to the local default.
    #[arg(long)]
    service_url: Option<String>,
}

fn resolve_service_url(cli_value: Option<String>) -> Result<String, String> {
    let candidate = cli_value
        .or_else(|| {
            std::env::var(SERVICE_URL_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

    Url::parse(&candidate)
        .map(|_| candidate.clone())
        .map_err(|err| format!("invalid service URL '{candidate}': {err}"))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let service_url = match resolve_service_url(args.service_url) {
        Ok(url) => url,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(service_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Venture Scout")
            .with_inner_size([920.0, 760.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Venture Scout",
        options,
        Box::new(|cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str(&text).ok())
            });
            Ok(Box::new(AdvisorApp::new(cmd_tx, ui_rx, persisted_settings)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_service_url_must_parse() {
        assert!(resolve_service_url(Some("http://10.0.0.2:9000".to_string())).is_ok());
        assert!(resolve_service_url(Some("not a url".to_string())).is_err());
    }
}
