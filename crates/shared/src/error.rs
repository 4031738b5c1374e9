use serde::Deserialize;

/// Generic text shown when the service fails without a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The scoring service returned an invalid response.";

/// Failure body for any non-2xx status on either endpoint. The message is
/// optional; callers substitute [`GENERIC_FAILURE_MESSAGE`] when it is
/// missing or the body does not parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> String {
        match self.error {
            Some(message) if !message.trim().is_empty() => message,
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
