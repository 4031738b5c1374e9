//! Form drafts: the editable field buffers for each flow and the coercion
//! that turns them into wire payloads.

use shared::protocol::{EvaluationQuery, SearchQuery};

/// Coerce a free-text amount field to a non-negative finite number.
/// Unparsable, negative, or non-finite input becomes 0 so NaN can never
/// reach the wire.
pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchFormDraft {
    pub neighborhood: String,
    pub skills: String,
    pub interests: String,
    pub dislikes: String,
    pub investment: String,
    pub hours_available: String,
    pub priority_audience: String,
    pub accessibility_mode: bool,
}

impl SearchFormDraft {
    /// Assemble a payload from the current field values. Built fresh on
    /// every submission.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            neighborhood: self.neighborhood.trim().to_string(),
            skills: self.skills.trim().to_string(),
            interests: self.interests.trim().to_string(),
            dislikes: self.dislikes.trim().to_string(),
            investment: coerce_amount(&self.investment),
            hours_available: coerce_amount(&self.hours_available),
            priority_audience: self.priority_audience.trim().to_string(),
            accessibility_mode: self.accessibility_mode,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationFormDraft {
    pub neighborhood: String,
    pub business_name: String,
    pub skills: String,
    pub investment: String,
}

impl EvaluationFormDraft {
    pub fn to_query(&self) -> EvaluationQuery {
        EvaluationQuery {
            neighborhood: self.neighborhood.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            skills: self.skills.trim().to_string(),
            investment: coerce_amount(&self.investment),
        }
    }

    /// Cross-flow hand-off: a search card passes only the business name.
    pub fn adopt_business_name(&mut self, name: &str) {
        self.business_name = name.to_string();
    }
}
