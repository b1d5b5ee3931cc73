use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway;
use crate::narration::{wav_from_pcm, BeginOutcome, CHANNELS, SAMPLE_RATE};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PlayRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct HandleRequest {
    pub id: Uuid,
}

/// POST /api/v1/narration/play
///
/// Toggle semantics: the active text stops, different text supersedes.
/// On a load, responds with the synthesized WAV and the narration handle
/// in `x-narration-id`; a stopped or superseded request gets a JSON marker.
pub async fn play(
    State(state): State<AppState>,
    Json(req): Json<PlayRequest>,
) -> Result<Response, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("nothing to narrate".to_string()));
    }

    let (id, epoch) = {
        let mut engine = state.engine.write().await;
        match engine.narration.begin(&req.text) {
            BeginOutcome::ToggledOff => {
                return Ok(Json(json!({"status": "stopped"})).into_response());
            }
            BeginOutcome::Load(id) => (id, engine.epoch),
        }
    };

    let pcm = match gateway::generate_speech(&state.ai, &req.text).await {
        Ok(pcm) => pcm,
        Err(e) => {
            let mut engine = state.engine.write().await;
            engine.narration.finished(id);
            return Err(e.into());
        }
    };

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch || !engine.narration.playback_started(id) {
        return Ok(Json(json!({"status": "superseded"})).into_response());
    }

    let wav = wav_from_pcm(&pcm, SAMPLE_RATE, CHANNELS);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/wav".to_string()),
            (
                header::HeaderName::from_static("x-narration-id"),
                id.to_string(),
            ),
        ],
        wav,
    )
        .into_response())
}

/// POST /api/v1/narration/finished
///
/// Playback-complete callback. A stale handle is a no-op.
pub async fn finished(
    State(state): State<AppState>,
    Json(req): Json<HandleRequest>,
) -> Json<serde_json::Value> {
    let mut engine = state.engine.write().await;
    engine.narration.finished(req.id);
    Json(json!({"status": "ok"}))
}

/// POST /api/v1/narration/stop
pub async fn stop(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut engine = state.engine.write().await;
    engine.narration.stop();
    Json(json!({"status": "stopped"}))
}
