use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::domain::{SuggestionId, Verdict};
use shared::error::GENERIC_FAILURE_MESSAGE;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ScoringServerState {
    search_bodies: Arc<Mutex<Vec<Value>>>,
    evaluate_bodies: Arc<Mutex<Vec<Value>>>,
    search_reply: Arc<Mutex<(StatusCode, String)>>,
    evaluate_reply: Arc<Mutex<(StatusCode, String)>>,
}

impl ScoringServerState {
    fn new() -> Self {
        Self {
            search_bodies: Arc::new(Mutex::new(Vec::new())),
            evaluate_bodies: Arc::new(Mutex::new(Vec::new())),
            search_reply: Arc::new(Mutex::new((StatusCode::OK, "{}".to_string()))),
            evaluate_reply: Arc::new(Mutex::new((StatusCode::OK, "{}".to_string()))),
        }
    }

    async fn set_search_reply(&self, status: StatusCode, body: impl Into<String>) {
        *self.search_reply.lock().await = (status, body.into());
    }

    async fn set_evaluate_reply(&self, status: StatusCode, body: impl Into<String>) {
        *self.evaluate_reply.lock().await = (status, body.into());
    }
}

async fn handle_search(
    State(state): State<ScoringServerState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.search_bodies.lock().await.push(body);
    let (status, reply) = state.search_reply.lock().await.clone();
    (status, reply)
}

async fn handle_evaluate(
    State(state): State<ScoringServerState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.evaluate_bodies.lock().await.push(body);
    let (status, reply) = state.evaluate_reply.lock().await.clone();
    (status, reply)
}

async fn spawn_scoring_server() -> (AdvisorClient, ScoringServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let state = ScoringServerState::new();
    let app = Router::new()
        .route(shared::protocol::SEARCH_PATH, post(handle_search))
        .route(shared::protocol::EVALUATE_PATH, post(handle_evaluate))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (AdvisorClient::new(format!("http://{addr}")), state)
}

#[tokio::test]
async fn search_posts_camel_case_payload_and_parses_results() {
    let (client, state) = spawn_scoring_server().await;
    state
        .set_search_reply(
            StatusCode::OK,
            json!({
                "results": [{
                    "id": "b-7",
                    "name": "Food Cart",
                    "description": "Street food.",
                    "score": 0.91,
                    "estimatedInvestment": 1200.0,
                    "validationSteps": ["step one"],
                    "usefulLinks": [{"label": "Office", "link": "https://example.org"}]
                }]
            })
            .to_string(),
        )
        .await;

    let query = shared::protocol::SearchQuery {
        neighborhood: "Riverside".to_string(),
        skills: "baking".to_string(),
        interests: "food".to_string(),
        dislikes: String::new(),
        investment: 1500.0,
        hours_available: 20.0,
        priority_audience: String::new(),
        accessibility_mode: false,
    };
    let response = client.search(&query).await.expect("search");

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].id, SuggestionId("b-7".to_string()));
    assert_eq!(response.results[0].estimated_investment, 1200.0);

    let seen = state.search_bodies.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["hoursAvailable"], 20.0);
    assert_eq!(seen[0]["accessibilityMode"], false);
}

#[tokio::test]
async fn search_treats_absent_results_as_empty() {
    let (client, state) = spawn_scoring_server().await;
    state.set_search_reply(StatusCode::OK, "{}").await;

    let response = client
        .search(&blank_search_query())
        .await
        .expect("search with absent results");
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn non_success_status_surfaces_server_error_message() {
    let (client, state) = spawn_scoring_server().await;
    state
        .set_search_reply(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": "quota exceeded"}).to_string(),
        )
        .await;

    let err = client
        .search(&blank_search_query())
        .await
        .expect_err("must fail");
    match &err {
        DispatchError::Application { status, message } => {
            assert_eq!(*status, 429);
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert!(err.user_message().contains("quota exceeded"));
}

#[tokio::test]
async fn non_success_status_with_unparsable_body_uses_generic_fallback() {
    let (client, state) = spawn_scoring_server().await;
    state
        .set_search_reply(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>")
        .await;

    let err = client
        .search(&blank_search_query())
        .await
        .expect_err("must fail");
    match err {
        DispatchError::Application { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, GENERIC_FAILURE_MESSAGE);
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn success_status_with_unparsable_body_is_malformed_response() {
    let (client, state) = spawn_scoring_server().await;
    state
        .set_search_reply(StatusCode::OK, "not json at all")
        .await;

    let err = client
        .search(&blank_search_query())
        .await
        .expect_err("must fail");
    assert!(matches!(err, DispatchError::MalformedResponse { .. }));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_failure() {
    // Bind, note the port, and drop the listener so connections are refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = AdvisorClient::new(format!("http://{addr}"));
    let err = client
        .search(&blank_search_query())
        .await
        .expect_err("must fail");
    assert!(matches!(err, DispatchError::Transport { .. }));
    assert_eq!(err.user_message(), TRANSPORT_FAILURE_MESSAGE);
}

#[tokio::test]
async fn evaluate_round_trip_parses_verdict_and_flags() {
    let (client, state) = spawn_scoring_server().await;
    state
        .set_evaluate_reply(
            StatusCode::OK,
            json!({
                "evaluation": "good",
                "reasons": ["skills match", "region fits"],
                "suggestionsButton": false
            })
            .to_string(),
        )
        .await;

    let query = shared::protocol::EvaluationQuery {
        neighborhood: "Riverside".to_string(),
        business_name: "Food Cart".to_string(),
        skills: "baking".to_string(),
        investment: 800.0,
    };
    let response = client.evaluate(&query).await.expect("evaluate");

    assert_eq!(response.evaluation, Verdict::Good);
    assert_eq!(response.reasons.len(), 2);
    assert!(!response.suggestions_button);

    let seen = state.evaluate_bodies.lock().await;
    assert_eq!(seen[0]["businessName"], "Food Cart");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_normalized() {
    let client = AdvisorClient::new("http://127.0.0.1:9/");
    assert_eq!(client.base_url(), "http://127.0.0.1:9");
}

fn blank_search_query() -> shared::protocol::SearchQuery {
    shared::protocol::SearchQuery {
        neighborhood: String::new(),
        skills: String::new(),
        interests: String::new(),
        dislikes: String::new(),
        investment: 0.0,
        hours_available: 0.0,
        priority_audience: String::new(),
        accessibility_mode: false,
    }
}
