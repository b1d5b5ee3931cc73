use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::export::{compose_url, EmailProvider};
use crate::state::AppState;

fn default_provider() -> EmailProvider {
    EmailProvider::Default
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    #[serde(default = "default_provider")]
    pub provider: EmailProvider,
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// POST /api/v1/email/compose
///
/// Builds a webmail compose (or mailto) URL. No mail leaves this service;
/// the client opens the URL itself.
pub async fn compose(
    State(_state): State<AppState>,
    Json(req): Json<ComposeRequest>,
) -> Result<Json<Value>, AppError> {
    if req.recipient.trim().is_empty() {
        return Err(AppError::Validation("recipient must not be empty".to_string()));
    }
    let url = compose_url(req.provider, &req.recipient, &req.subject, &req.body)
        .map_err(|e| AppError::Validation(format!("could not build compose URL: {e}")))?;
    Ok(Json(json!({"url": url.as_str()})))
}
