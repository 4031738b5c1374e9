//! Renderer view-models: everything the GUI paints is computed here, per
//! flow, so rendering stays a pure function of this state.

use std::collections::HashSet;

use shared::domain::{Severity, SuggestionId, Verdict};
use shared::protocol::{EvaluationResponse, SearchResult, UsefulLink};

pub const COMPETITION_PLACEHOLDER: &str = "—";
pub const RATIONALE_FALLBACK: &str = "Local demand and a low cost of entry.";
pub const STEP_SEPARATOR: &str = " • ";
pub const UNNAMED_BUSINESS: &str = "BUSINESS";

const STEP_PREVIEW_LEN: usize = 3;

/// Score as a rounded percentage. Round-half-up (`f64::round`): 0.875
/// renders as 88%.
pub fn score_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Whole-currency display with thousands separators: 1500 -> "1,500".
pub fn format_amount(amount: f64) -> String {
    let digits = (amount.round().max(0.0) as i64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One rendered suggestion. Sparse rows degrade field by field; a missing
/// optional never rejects the card.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionCard {
    pub id: SuggestionId,
    pub name: String,
    pub description: String,
    pub score_percent: u8,
    pub investment_label: String,
    pub competition_label: String,
    pub rationale: String,
    /// First three validation steps joined with [`STEP_SEPARATOR`];
    /// `None` when the service sent no steps, which also hides the
    /// expand control.
    pub steps_preview: Option<String>,
    pub validation_steps: Vec<String>,
    pub primary_link: Option<UsefulLink>,
}

impl SuggestionCard {
    pub fn from_result(result: &SearchResult) -> Self {
        let steps_preview = if result.validation_steps.is_empty() {
            None
        } else {
            Some(
                result
                    .validation_steps
                    .iter()
                    .take(STEP_PREVIEW_LEN)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(STEP_SEPARATOR),
            )
        };

        Self {
            id: result.id.clone(),
            name: result.name.clone(),
            description: result.description.clone(),
            score_percent: score_percent(result.score),
            investment_label: format!("$ {}", format_amount(result.estimated_investment)),
            competition_label: result
                .competition_level
                .clone()
                .unwrap_or_else(|| COMPETITION_PLACEHOLDER.to_string()),
            rationale: result
                .rationale
                .clone()
                .unwrap_or_else(|| RATIONALE_FALLBACK.to_string()),
            steps_preview,
            validation_steps: result.validation_steps.clone(),
            primary_link: result.useful_links.first().cloned(),
        }
    }

    pub fn has_step_details(&self) -> bool {
        self.steps_preview.is_some()
    }
}

/// The search flow's results panel. Cards keep the service-provided order;
/// expand state is keyed by suggestion id, never by list position.
#[derive(Debug, Default)]
pub struct SearchResultsView {
    cards: Vec<SuggestionCard>,
    expanded: HashSet<SuggestionId>,
}

impl SearchResultsView {
    /// Replaces any previous collection wholesale; no incremental merge.
    pub fn from_results(results: &[SearchResult]) -> Self {
        Self {
            cards: results.iter().map(SuggestionCard::from_result).collect(),
            expanded: HashSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[SuggestionCard] {
        &self.cards
    }

    pub fn is_expanded(&self, id: &SuggestionId) -> bool {
        self.expanded.contains(id)
    }

    /// Pure view-state flip; never re-fetches.
    pub fn toggle_expanded(&mut self, id: &SuggestionId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }
}

/// The evaluation flow's verdict panel.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationView {
    /// Submitted business name, uppercased for display.
    pub heading: String,
    pub verdict: Verdict,
    pub severity: Severity,
    pub reasons: Vec<String>,
    pub offer_suggestions: bool,
}

impl EvaluationView {
    pub fn new(business_name: &str, response: &EvaluationResponse) -> Self {
        let trimmed = business_name.trim();
        let heading = if trimmed.is_empty() {
            UNNAMED_BUSINESS.to_string()
        } else {
            trimmed.to_uppercase()
        };
        Self {
            heading,
            verdict: response.evaluation,
            severity: Severity::from(response.evaluation),
            reasons: response.reasons.clone(),
            offer_suggestions: response.suggestions_button,
        }
    }
}
