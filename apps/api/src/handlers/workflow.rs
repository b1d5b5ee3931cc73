use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::workflow::Step;

/// GET /api/v1/workflow
pub async fn get_workflow(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine.read().await;
    Json(json!({
        "step": engine.step,
        "progress": engine.step.progress(),
        "hasProfile": engine.profile.is_some(),
    }))
}

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub step: Step,
}

/// POST /api/v1/workflow/navigate
pub async fn navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<Value>, AppError> {
    let mut engine = state.engine.write().await;
    if !engine.navigate(req.step) {
        return Err(AppError::Validation(format!(
            "step '{}' requires a profile",
            req.step.as_str()
        )));
    }
    Ok(Json(json!({
        "step": engine.step,
        "progress": engine.step.progress(),
    })))
}

fn default_reset_target() -> Step {
    Step::Intake
}

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(default = "default_reset_target")]
    pub target: Step,
}

/// POST /api/v1/reset
///
/// The one operation that touches every entity class at once. Total and
/// unconditional; lands on the caller-supplied target step.
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Json<Value> {
    let mut engine = state.engine.write().await;
    engine.perform_reset(req.target);
    tracing::info!("Engine reset, landing on '{}'", req.target.as_str());
    Json(json!({
        "message": "Engine reset complete. All data cleared.",
        "step": engine.step,
        // Clients auto-dismiss the confirmation toast after this delay.
        "dismissAfterMs": 3500,
    }))
}

/// GET /api/v1/dashboard
pub async fn dashboard(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine.read().await;
    Json(json!({
        "stats": engine.dashboard_stats(),
        "step": engine.step,
    }))
}
