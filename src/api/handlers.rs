//! HTTP request handlers

use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, ModelResponse, SessionResponse,
    SessionStartedResponse, SetModelRequest, StartSessionRequest, SuccessResponse,
};
use super::AppState;
use crate::model_selection::{resolve_available_models, ModelChoices};
use crate::runtime::SessionRecord;
use crate::turn::{handle_turn, TurnError};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Login + session start
        .route("/api/sessions", post(start_session))
        .route("/api/sessions/:id", get(get_session).delete(end_session))
        .route("/api/sessions/:id/model", put(set_model))
        .route("/api/sessions/:id/messages", post(send_message))
        // Model selector contents
        .route("/api/models", get(list_models))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn start_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<StartSessionRequest>,
) -> Result<Json<SessionStartedResponse>, AppError> {
    let Some(identity) = state.auth.authenticate(&req.username, &req.password) else {
        tracing::warn!(user = %req.username, "Rejected login");
        return Err(AppError::Unauthorized("Invalid username or password".to_string()));
    };

    let choices = resolve_available_models(state.client.as_ref(), &state.default_model).await;
    let record = state.sessions.start(identity, &choices).await;

    Ok(Json(SessionStartedResponse {
        session_id: record.id.clone(),
        user: record.identity.clone(),
        selected_model: choices.selected().to_string(),
        models: choices.models,
        selected_index: choices.selected_index,
    }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let record = find_session(&state, &id).await?;
    let session = record.session.lock().await;

    Ok(Json(SessionResponse {
        session_id: record.id.clone(),
        selected_model: session.selected_model().map(String::from),
        messages: session.history().as_slice().to_vec(),
        created_at: record.created_at,
    }))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.sessions.end(&id).await {
        return Err(AppError::NotFound(format!("Session not found: {id}")));
    }
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Conversation
// ============================================================

async fn set_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<SetModelRequest>,
) -> Result<Json<ModelResponse>, AppError> {
    let record = find_session(&state, &id).await?;
    record.session.lock().await.set_model(req.model.clone());

    tracing::info!(session_id = %id, model = %req.model, "Model selected");

    Ok(Json(ModelResponse {
        selected_model: req.model,
    }))
}

async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let record = find_session(&state, &id).await?;

    // Held across the upstream call: one turn at a time per session
    let mut session = record.session.lock().await;
    let model = session.model_or(&state.default_model);

    let reply = handle_turn(
        state.client.as_ref(),
        &mut session,
        &req.content,
        &state.default_model,
    )
    .await
    .map_err(|e| {
        tracing::warn!(
            session_id = %id,
            model = %e.model,
            status = ?e.source.status(),
            error = %e,
            "Turn failed"
        );
        AppError::Upstream(e)
    })?;

    Ok(Json(ChatResponse { reply, model }))
}

// ============================================================
// Model Info
// ============================================================

async fn list_models(State(state): State<AppState>) -> Json<ModelChoices> {
    Json(resolve_available_models(state.client.as_ref(), &state.default_model).await)
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("ollama-chat ", env!("CARGO_PKG_VERSION"))
}

async fn find_session(state: &AppState, id: &str) -> Result<Arc<SessionRecord>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))
}

// ============================================================
// Error Handling
// ============================================================

/// JSON body extractor whose rejections render as `AppError`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
struct AppJson<T>(T);

enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Upstream(TurnError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            AppError::Upstream(e) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(e.user_message()).with_category(e.category()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
