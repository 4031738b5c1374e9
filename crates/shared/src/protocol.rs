use serde::{Deserialize, Serialize};

use crate::domain::{SuggestionId, Verdict};

pub const SEARCH_PATH: &str = "/api/search";
pub const EVALUATE_PATH: &str = "/api/evaluate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub neighborhood: String,
    pub skills: String,
    pub interests: String,
    pub dislikes: String,
    pub investment: f64,
    pub hours_available: f64,
    pub priority_audience: String,
    pub accessibility_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsefulLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub link: String,
}

/// One suggestion row. Optional fields carry per-item fallbacks so a single
/// sparse row never rejects the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: SuggestionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub estimated_investment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default)]
    pub validation_steps: Vec<String>,
    #[serde(default)]
    pub useful_links: Vec<UsefulLink>,
}

/// An absent `results` field is the same as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationQuery {
    pub neighborhood: String,
    pub business_name: String,
    pub skills: String,
    pub investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub evaluation: Verdict,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub suggestions_button: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    #[test]
    fn search_query_serializes_camel_case_wire_names() {
        let query = SearchQuery {
            neighborhood: "Riverside".to_string(),
            skills: "baking; sales".to_string(),
            interests: "food".to_string(),
            dislikes: "night shifts".to_string(),
            investment: 1500.0,
            hours_available: 20.0,
            priority_audience: "seniors".to_string(),
            accessibility_mode: true,
        };

        let value = serde_json::to_value(&query).expect("serialize");
        assert_eq!(value["hoursAvailable"], 20.0);
        assert_eq!(value["priorityAudience"], "seniors");
        assert_eq!(value["accessibilityMode"], true);
    }

    #[test]
    fn sparse_result_row_fills_defaults_instead_of_failing() {
        let row: SearchResult =
            serde_json::from_str(r#"{"id": "b-7", "name": "Food Cart"}"#).expect("deserialize");
        assert_eq!(row.score, 0.0);
        assert_eq!(row.estimated_investment, 0.0);
        assert!(row.competition_level.is_none());
        assert!(row.validation_steps.is_empty());
        assert!(row.useful_links.is_empty());
    }

    #[test]
    fn absent_results_field_reads_as_empty() {
        let body: SearchResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(body.results.is_empty());
    }

    #[test]
    fn unknown_verdict_degrades_to_negative_severity() {
        let body: EvaluationResponse =
            serde_json::from_str(r#"{"evaluation": "meh", "reasons": []}"#).expect("deserialize");
        assert_eq!(body.evaluation, Verdict::Unrecognized);
        assert_eq!(Severity::from(body.evaluation), Severity::Negative);
        assert!(!body.suggestions_button);
    }
}
