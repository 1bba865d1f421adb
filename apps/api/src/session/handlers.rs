//! Axum route handlers for the Session API.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::composer::{compose, DetailLevel, DEFAULT_DETAIL_LEVEL};
use crate::consultation::{
    consult, generate_action_plan, ConsultOutcome, ConsultRequest, DEFAULT_TEMPERATURE,
};
use crate::conversation::export::{render_transcript, transcript_filename};
use crate::conversation::Turn;
use crate::errors::AppError;
use crate::knowledge::Persona;
use crate::llm_client::ModelChoice;
use crate::session::SessionHandle;
use crate::state::AppState;

const MAX_TEMPERATURE: f32 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Deserialize)]
pub struct ConsultBody {
    #[serde(default)]
    pub question: String,
    pub level: Option<i64>,
    pub model: Option<ModelChoice>,
    pub temperature: Option<f32>,
    pub business_context: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActionPlanBody {
    pub level: Option<i64>,
    pub model: Option<ModelChoice>,
    pub business_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConsultResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub turns: Vec<Turn>,
}

/// What a front end may offer the user.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub persona: Persona,
    pub models: Vec<ModelChoice>,
    pub default_model: ModelChoice,
    pub detail_levels: Vec<i64>,
    pub default_detail_level: i64,
}

impl ConsultResponse {
    fn new(outcome: ConsultOutcome, turns: Vec<Turn>) -> Self {
        let status = outcome.status();
        let (reply, error) = match outcome {
            ConsultOutcome::Skipped => (None, None),
            ConsultOutcome::Completed(reply) => (Some(reply), None),
            ConsultOutcome::Failed(message) => (None, Some(message)),
        };
        Self {
            status,
            reply,
            error,
            turns,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

fn system_instruction(
    state: &AppState,
    level: Option<i64>,
    business_context: Option<&str>,
) -> Result<String, AppError> {
    Ok(compose(
        state.persona,
        state.knowledge.text(),
        level.unwrap_or(DEFAULT_DETAIL_LEVEL),
        business_context,
    )?)
}

fn validate_temperature(temperature: f32) -> Result<f32, AppError> {
    if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(AppError::Validation(format!(
            "temperature must be between 0 and {MAX_TEMPERATURE}, got {temperature}"
        )));
    }
    Ok(temperature)
}

fn parse_action_plan_body(raw: &[u8]) -> Result<ActionPlanBody, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(ActionPlanBody::default());
    }
    serde_json::from_slice(raw)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        persona: state.persona,
        models: ModelChoice::ALL.to_vec(),
        default_model: state.default_model,
        detail_levels: DetailLevel::ALL.iter().map(|l| *l as i64).collect(),
        default_detail_level: DEFAULT_DETAIL_LEVEL,
    })
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let handle = find_session(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        turns: session.conversation.turns().to_vec(),
    }))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/sessions/:id/history
///
/// Clears the conversation. Clearing an already-empty conversation still succeeds.
pub async fn handle_clear_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let handle = find_session(&state, id).await?;
    handle.lock().await.conversation.clear();
    info!("Cleared history for session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/consult
///
/// Blank questions short-circuit with `status: "skipped"`. Completion failures are
/// reported in the body with `status: "failed"`, not as an HTTP error.
pub async fn handle_consult(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ConsultBody>, JsonRejection>,
) -> Result<Json<ConsultResponse>, AppError> {
    let Json(body) = body?;
    let handle = find_session(&state, id).await?;

    if body.question.trim().is_empty() {
        let session = handle.lock().await;
        return Ok(Json(ConsultResponse::new(
            ConsultOutcome::Skipped,
            session.conversation.turns().to_vec(),
        )));
    }

    let system_instruction =
        system_instruction(&state, body.level, body.business_context.as_deref())?;
    let temperature = validate_temperature(body.temperature.unwrap_or(DEFAULT_TEMPERATURE))?;

    let mut session = handle.lock().await;
    let outcome = consult(
        &mut session.conversation,
        state.llm.as_ref(),
        ConsultRequest {
            system_instruction,
            question: body.question,
            model: body.model.unwrap_or(state.default_model),
            temperature,
            history_mode: state.history_mode,
        },
    )
    .await;

    Ok(Json(ConsultResponse::new(
        outcome,
        session.conversation.turns().to_vec(),
    )))
}

/// POST /api/v1/sessions/:id/action-plan
///
/// The body is optional; an empty body means all defaults. A body that is present
/// but does not parse (unknown model, wrong types) is rejected with 400.
pub async fn handle_action_plan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ConsultResponse>, AppError> {
    let body = parse_action_plan_body(&body)?;
    let handle = find_session(&state, id).await?;

    let system_instruction =
        system_instruction(&state, body.level, body.business_context.as_deref())?;

    let mut session = handle.lock().await;
    let outcome = generate_action_plan(
        &mut session.conversation,
        state.llm.as_ref(),
        system_instruction,
        body.model.unwrap_or(state.default_model),
        state.history_mode,
    )
    .await;

    Ok(Json(ConsultResponse::new(
        outcome,
        session.conversation.turns().to_vec(),
    )))
}

/// GET /api/v1/sessions/:id/export
///
/// Plain-text transcript offered as a download named with the current timestamp.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = find_session(&state, id).await?;
    let transcript = render_transcript(&handle.lock().await.conversation, state.persona);
    let filename = transcript_filename(state.persona, Utc::now());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        transcript,
    ))
}
