use serde::{Deserialize, Serialize};

/// Stable identifier the scoring service assigns to a suggestion row.
///
/// View state (expand/collapse) is keyed by this id, never by the position
/// of a card in the rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    Risky,
    Poor,
    /// Any verdict string the client does not recognize. Rendered with the
    /// same negative treatment as `Poor`.
    #[serde(other)]
    Unrecognized,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Good => "GOOD",
            Verdict::Risky => "RISKY",
            Verdict::Poor => "POOR",
            Verdict::Unrecognized => "NOT RECOMMENDED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Positive,
    Cautionary,
    Negative,
}

impl From<Verdict> for Severity {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Good => Severity::Positive,
            Verdict::Risky => Severity::Cautionary,
            Verdict::Poor | Verdict::Unrecognized => Severity::Negative,
        }
    }
}
