use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::Instrument;
use wayfarer_core::Extraction;
use wayfarer_core::conversation::ChatMessage;

use crate::error::ApiError;
use crate::state::AppState;

const CHAT_FAILURE: &str = "Failed to get a response from the travel assistant";
const SUMMARIZE_FAILURE: &str = "Failed to generate trip plans from the conversation";

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/summarize", post(summarize))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    #[serde(default)]
    conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    success: bool,
    response: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeRequest {
    conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct SummarizeResponse {
    success: bool,
    #[serde(flatten)]
    extraction: Extraction,
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let span = info_span!("chat", history = req.conversation_history.len());
    let response = state
        .assistant
        .reply(&req.conversation_history, message)
        .instrument(span)
        .await
        .map_err(|err| {
            error!("chat failed: {err}");
            ApiError::internal(CHAT_FAILURE)
        })?;

    Ok(Json(ChatResponse {
        success: true,
        response,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(req) = payload?;

    let span = info_span!("summarize", history = req.conversation_history.len());
    let extraction = state
        .extractor
        .extract(&req.conversation_history)
        .instrument(span)
        .await
        .map_err(|err| {
            error!("summarize failed: {err}");
            ApiError::internal(SUMMARIZE_FAILURE)
        })?;
    info!("extracted {} plans", extraction.plans.len());

    Ok(Json(SummarizeResponse {
        success: true,
        extraction,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
