use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::gateway;
use crate::models::intake::IntakeForm;
use crate::state::AppState;
use crate::workflow::Step;

/// POST /api/v1/intake
///
/// Validates the raw form, enhances it into a full profile through the
/// gateway, merges in the fields the model never sees (partner lists,
/// contact info) and lands on the discovery step.
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<IntakeForm>,
) -> Result<Json<Value>, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::IntakeValidation(errors));
    }

    let epoch = {
        let engine = state.engine.read().await;
        engine.epoch
    };

    let mut profile = gateway::enhance_profile(&state.ai, &form).await?;
    // Operator-entered fields override anything the model produced.
    profile.current_partners = form.current_partners_list();
    profile.past_partners = form.past_partners_list();
    profile.primary_contact_info = Some(form.contact_info());

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch {
        return Ok(Json(json!({"discarded": true})));
    }
    engine.profile = Some(profile.clone());
    engine.step = Step::Discovery;

    tracing::info!("Profile enhanced for '{}'", profile.title);
    Ok(Json(json!({
        "profile": profile,
        "step": engine.step,
    })))
}
