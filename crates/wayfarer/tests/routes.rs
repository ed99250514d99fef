use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wayfarer::{AppState, router};
use wayfarer_test_model::{PresetResponse, TestModelProvider};

struct Harness {
    chat: TestModelProvider,
    extraction: TestModelProvider,
    app: Router,
}

fn harness() -> Harness {
    let chat = TestModelProvider::default();
    let extraction = TestModelProvider::default();
    let app = router(AppState::with_model_providers(
        chat.clone(),
        extraction.clone(),
    ));
    Harness {
        chat,
        extraction,
        app,
    }
}

async fn post(app: &Router, uri: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn plan(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Island Hopper",
        "tagline": "Sun, sea and ferries",
        "destination": "Cyclades, Greece",
        "duration": "10 days",
        "groupSize": "Solo",
        "totalCost": 2800.5,
        "rating": 4.6,
        "reviewCount": 310,
        "image": "https://images.example.com/santorini.jpg",
        "highlights": ["Oia sunset", "Milos beaches", "Naxos hike", "Paros old town"],
        "included": { "hotels": 4, "ferries": 3 },
        "tags": ["beach", "islands"],
        "aiConfidence": 88
    })
}

fn extraction(count: usize) -> Value {
    let plans: Vec<Value> = (0..count).map(|i| plan(&format!("plan-{i}"))).collect();
    json!({
        "preferences": {
            "destination": "Greece",
            "duration": "10 days",
            "budget": "$3000",
            "groupSize": "Solo",
            "travelStyle": "Relaxed",
            "interests": ["beaches"],
            "conversationSummary": "Ten relaxed days in the Greek islands.",
            "season": "June"
        },
        "plans": plans
    })
}

#[tokio::test]
async fn test_chat() {
    let h = harness();
    h.chat.add_response(PresetResponse::text("  How long would you like to stay?  "));

    let (status, body) = post(
        &h.app,
        "/chat",
        json!({
            "message": "I want to go to Greece",
            "conversationHistory": [
                { "role": "assistant", "content": "Hi! Where to?" },
                { "role": "tool", "content": "{}" }
            ]
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "How long would you like to stay?");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));

    // Only the system instruction and the new message reach the model.
    let requests = h.chat.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 2);
    assert!(h.extraction.requests().is_empty());
}

#[tokio::test]
async fn test_chat_without_history() {
    let h = harness();
    h.chat.add_response(PresetResponse::text("Hello!"));
    let (status, body) =
        post(&h.app, "/chat", json!({ "message": "Hi" }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hello!");
}

#[tokio::test]
async fn test_chat_upstream_failure() {
    let h = harness();
    h.chat.add_response(PresetResponse::status(401, "invalid api key sk-123"));
    let (status, body) =
        post(&h.app, "/chat", json!({ "message": "Hi" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(!error.contains("sk-123"));
    assert!(!error.contains("401"));
}

#[tokio::test]
async fn test_chat_empty_completion() {
    let h = harness();
    h.chat.add_response(PresetResponse::empty());
    let (status, body) =
        post(&h.app, "/chat", json!({ "message": "Hi" }).to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_chat_bad_request() {
    let h = harness();
    let (status, body) =
        post(&h.app, "/chat", json!({ "message": "   " }).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = post(&h.app, "/chat", "{ not json").await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);

    let (status, _) = post(&h.app, "/chat", json!({}).to_string()).await;
    assert!(status.is_client_error());

    assert!(h.chat.requests().is_empty());
}

#[tokio::test]
async fn test_summarize() {
    let h = harness();
    h.extraction.add_response(PresetResponse::text(format!(
        "```json\n{}\n```",
        extraction(3)
    )));

    let (status, body) = post(
        &h.app,
        "/chat/summarize",
        json!({
            "conversationHistory": [
                { "role": "user", "content": "Greek islands, 10 days, solo" },
                { "role": "assistant", "content": "Sounds great! Type confirm when ready." },
                { "role": "user", "content": "confirm" }
            ]
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["preferences"]["destination"], "Greece");
    assert_eq!(body["preferences"]["season"], "June");
    assert_eq!(body["plans"].as_array().unwrap().len(), 3);
    assert_eq!(body["plans"][0], plan("plan-0"));
    assert!(h.chat.requests().is_empty());
}

#[tokio::test]
async fn test_summarize_rejects_wrong_plan_count() {
    for plans in [2, 4] {
        let h = harness();
        h.extraction
            .add_response(PresetResponse::text(extraction(plans).to_string()));
        let (status, body) = post(
            &h.app,
            "/chat/summarize",
            json!({ "conversationHistory": [{ "role": "user", "content": "Greece" }] })
                .to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "error": body["error"] }));
        assert!(body.get("plans").is_none());
    }
}

#[tokio::test]
async fn test_summarize_rejects_prose() {
    let h = harness();
    h.extraction.add_response(PresetResponse::text(
        "Here are three lovely trips to Greece for you!",
    ));
    let (status, body) = post(
        &h.app,
        "/chat/summarize",
        json!({ "conversationHistory": [{ "role": "user", "content": "Greece" }] })
            .to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_summarize_requires_history() {
    let h = harness();
    let (status, body) = post(&h.app, "/chat/summarize", "{}").await;
    assert!(status.is_client_error());
    assert_eq!(body["success"], false);
    assert!(h.extraction.requests().is_empty());
}

#[tokio::test]
async fn test_health() {
    let h = harness();
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = h.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
