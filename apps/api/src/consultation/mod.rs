//! Consultation Protocol — one request/response cycle against the completion service.
//!
//! Flow: skip blank question → record user turn → build request → call service →
//!       record assistant turn (success) or surface a message (failure).
//!
//! The user turn is recorded before the call, so a failed call still leaves the
//! question in the conversation. Failures never escape as errors.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::composer::prompts::ACTION_PLAN_QUESTION;
use crate::composer::user_message;
use crate::conversation::{Conversation, Role, Turn};
use crate::llm_client::{CompletionRequest, CompletionService, ModelChoice};

/// Sampling temperature for ordinary questions.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Lower temperature for the canned action plan so it stays focused.
pub const ACTION_PLAN_TEMPERATURE: f32 = 0.3;

/// Whether prior turns are forwarded to the completion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryMode {
    /// Only the system instruction and the current question are sent.
    #[default]
    SingleTurn,
    /// Every earlier turn is sent between the system instruction and the question.
    Replay,
}

/// Inputs for one consultation, apart from the conversation and the service.
#[derive(Debug, Clone)]
pub struct ConsultRequest {
    pub system_instruction: String,
    pub question: String,
    pub model: ModelChoice,
    pub temperature: f32,
    pub history_mode: HistoryMode,
}

/// Terminal state of one consultation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsultOutcome {
    /// Blank question: nothing recorded, no call made.
    Skipped,
    /// Service replied; the reply was recorded as an assistant turn.
    Completed(String),
    /// Service failed; holds the user-visible message. No assistant turn recorded.
    Failed(String),
}

impl ConsultOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            ConsultOutcome::Skipped => "skipped",
            ConsultOutcome::Completed(_) => "completed",
            ConsultOutcome::Failed(_) => "failed",
        }
    }
}

/// Prior turns as the service should see them: user turns wrapped exactly like
/// the current question, assistant turns unchanged.
fn replayed_context(conversation: &Conversation) -> Vec<Turn> {
    conversation
        .replay()
        .map(|turn| match turn.role {
            Role::User => Turn {
                content: user_message(&turn.content),
                ..turn.clone()
            },
            Role::Assistant => turn.clone(),
        })
        .collect()
}

/// Runs one consultation against `conversation`.
pub async fn consult(
    conversation: &mut Conversation,
    service: &dyn CompletionService,
    request: ConsultRequest,
) -> ConsultOutcome {
    if request.question.trim().is_empty() {
        return ConsultOutcome::Skipped;
    }

    // Snapshot before the user turn goes in, so the question isn't sent twice.
    let history = match request.history_mode {
        HistoryMode::SingleTurn => Vec::new(),
        HistoryMode::Replay => replayed_context(conversation),
    };

    conversation.append(Role::User, request.question.as_str());

    let completion = CompletionRequest {
        system: request.system_instruction,
        history,
        user_message: user_message(&request.question),
        model: request.model,
        temperature: request.temperature,
    };

    info!(
        "Consulting model {} (temperature {}, {} context turns)",
        completion.model,
        completion.temperature,
        completion.history.len()
    );

    match service.complete(completion).await {
        Ok(reply) => {
            conversation.append(Role::Assistant, reply.as_str());
            ConsultOutcome::Completed(reply)
        }
        Err(e) => {
            error!("Completion failed: {e}");
            ConsultOutcome::Failed(format!("Error generating response: {e}"))
        }
    }
}

/// The "generate action plan" action: the same protocol with a canned question
/// and a lower temperature.
pub async fn generate_action_plan(
    conversation: &mut Conversation,
    service: &dyn CompletionService,
    system_instruction: String,
    model: ModelChoice,
    history_mode: HistoryMode,
) -> ConsultOutcome {
    consult(
        conversation,
        service,
        ConsultRequest {
            system_instruction,
            question: ACTION_PLAN_QUESTION.to_string(),
            model,
            temperature: ACTION_PLAN_TEMPERATURE,
            history_mode,
        },
    )
    .await
}
