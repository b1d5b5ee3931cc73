use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::export;
use crate::gateway;
use crate::state::AppState;
use crate::workflow::Step;

/// POST /api/v1/discovery/run
///
/// Runs one full discovery batch. The previous batch, its selection and
/// nothing else are replaced wholesale; built outreach packages survive so
/// a re-run never destroys campaign work.
pub async fn run(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (profile, epoch) = {
        let engine = state.engine.read().await;
        let profile = engine
            .profile
            .clone()
            .ok_or_else(|| AppError::Validation("discovery requires a profile".to_string()))?;
        (profile, engine.epoch)
    };

    let matches = gateway::discover_employers(&state.ai, &profile).await?;

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch {
        return Ok(Json(json!({"discarded": true})));
    }
    engine.matches = matches;
    engine.selected.clear();
    engine.step = Step::Report;

    tracing::info!("Discovery batch of {} matches stored", engine.matches.len());
    Ok(Json(json!({
        "matches": engine.matches,
        "step": engine.step,
    })))
}

/// GET /api/v1/matches
pub async fn list(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine.read().await;
    Json(json!({
        "matches": engine.matches,
        "selected": engine.selected,
    }))
}

/// GET /api/v1/matches/export
///
/// The full batch as CSV, with the reconnect marker stripped from the
/// rationale column.
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let engine = state.engine.read().await;
    if engine.matches.is_empty() {
        return Err(AppError::NotFound("no matches to export".to_string()));
    }

    let csv = export::match_report_csv(&engine.matches)?;
    let file_name = export::report_file_name(engine.profile.as_ref().map(|p| p.title.as_str()));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        csv,
    ))
}

/// POST /api/v1/matches/:name/select
pub async fn toggle_select(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut engine = state.engine.write().await;
    if engine.find_match(&name).is_none() {
        return Err(AppError::NotFound(format!("no match named '{name}'")));
    }
    engine.toggle_selection(&name);
    Ok(Json(json!({"selected": engine.selected})))
}
