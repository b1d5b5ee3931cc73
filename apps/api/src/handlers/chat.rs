use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::gateway;
use crate::sessions::SessionKind;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

fn session_kind(slug: &str) -> Result<SessionKind, AppError> {
    SessionKind::from_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("no chat session '{slug}'")))
}

/// The message shown in-channel when the gateway fails mid-turn.
fn fallback_text(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Market => {
            "I'm having a brief connection issue while scanning the job market. \
             Let's try that again in a second!"
        }
        SessionKind::Support => "System connection error. Please try again.",
        SessionKind::Assistant => "I'm having trouble connecting to the expert manual.",
    }
}

/// POST /api/v1/chat/:session/message
///
/// One conversational turn. The session is busy for the duration; gateway
/// failures surface as an in-channel model message, never an error status.
pub async fn send(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Result<Json<Value>, AppError> {
    let kind = session_kind(&slug)?;
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let (history, epoch) = {
        let mut engine = state.engine.write().await;
        let session = engine.session_mut(kind);
        if session.busy {
            return Err(AppError::Conflict("a reply is already in progress".to_string()));
        }
        let history = session.history();
        session.push_user(req.message.clone());
        session.busy = true;
        (history, engine.epoch)
    };

    let turn = match kind {
        SessionKind::Market => gateway::market_search(&state.ai, &req.message)
            .await
            .map(|(text, sources)| (text, sources, None)),
        SessionKind::Support | SessionKind::Assistant => {
            gateway::support_reply(&state.ai, &req.message, &history)
                .await
                .map(|reply| (reply.text, Vec::new(), reply.navigate_to))
        }
    };

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch {
        // The session this turn belonged to no longer exists.
        return Ok(Json(json!({"discarded": true})));
    }
    engine.session_mut(kind).busy = false;

    match turn {
        Ok((mut text, sources, navigate_to)) => {
            if let Some(step) = navigate_to {
                if engine.navigate(step) {
                    text.push_str(&format!(
                        "\n\n*System Action: Navigating to {}...*",
                        step.as_str()
                    ));
                }
            }
            if sources.is_empty() {
                engine.session_mut(kind).push_model(text);
            } else {
                engine.session_mut(kind).push_model_with_sources(text, sources);
            }
        }
        Err(e) => {
            tracing::warn!("Chat turn failed for '{slug}': {e}");
            engine.session_mut(kind).push_model(fallback_text(kind));
        }
    }

    Ok(Json(json!({
        "messages": engine.session(kind).messages,
        "step": engine.step,
    })))
}

/// GET /api/v1/chat/:session
pub async fn history(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind = session_kind(&slug)?;
    let engine = state.engine.read().await;
    let session = engine.session(kind);
    Ok(Json(json!({
        "messages": session.messages,
        "busy": session.busy,
    })))
}

/// DELETE /api/v1/chat/:session
pub async fn clear(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind = session_kind(&slug)?;
    let mut engine = state.engine.write().await;
    engine.session_mut(kind).clear();
    Ok(Json(json!({
        "messages": engine.session(kind).messages,
    })))
}
