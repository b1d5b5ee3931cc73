use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::export;
use crate::gateway;
use crate::state::AppState;

/// GET /api/v1/outreach/view
///
/// The campaign work surface: matches filtered by the selection (empty
/// selection shows all) plus every package built so far.
pub async fn view(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine.read().await;
    Json(json!({
        "matches": engine.filtered_matches(),
        "outreach": engine.outreach,
    }))
}

/// POST /api/v1/outreach/:name/generate
///
/// Builds (or rebuilds) the outreach package for one employer. The cache
/// is keyed by employer name; regeneration overwrites.
pub async fn generate(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let (profile, employer, epoch) = {
        let engine = state.engine.read().await;
        let profile = engine
            .profile
            .clone()
            .ok_or_else(|| AppError::Validation("outreach requires a profile".to_string()))?;
        let employer = engine
            .find_match(&name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no match named '{name}'")))?;
        (profile, employer, engine.epoch)
    };

    let assets = gateway::generate_outreach(&state.ai, &profile, &employer).await?;

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch {
        return Ok(Json(json!({"discarded": true})));
    }
    engine.outreach.insert(employer.name.clone(), assets.clone());

    tracing::info!("Outreach package built for '{}'", employer.name);
    Ok(Json(json!({"outreach": assets})))
}

/// GET /api/v1/outreach/bundle
///
/// Every built package for the current view, concatenated for clipboard
/// export.
pub async fn bundle(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let engine = state.engine.read().await;
    let text = export::outreach_bundle(&engine.filtered_matches(), &engine.outreach)
        .ok_or_else(|| AppError::NotFound("no outreach packages built".to_string()))?;
    Ok(Json(json!({"bundle": text})))
}
