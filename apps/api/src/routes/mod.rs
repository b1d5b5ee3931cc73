pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{chat, discovery, email, intake, linkedin, narration, outreach, workflow};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Workflow
        .route("/api/v1/workflow", get(workflow::get_workflow))
        .route("/api/v1/workflow/navigate", post(workflow::navigate))
        .route("/api/v1/reset", post(workflow::reset))
        .route("/api/v1/dashboard", get(workflow::dashboard))
        // Intake & discovery
        .route("/api/v1/intake", post(intake::submit))
        .route("/api/v1/discovery/run", post(discovery::run))
        .route("/api/v1/matches", get(discovery::list))
        .route("/api/v1/matches/export", get(discovery::export_csv))
        .route("/api/v1/matches/:name/select", post(discovery::toggle_select))
        // Outreach campaigns
        .route("/api/v1/outreach/view", get(outreach::view))
        .route("/api/v1/outreach/bundle", get(outreach::bundle))
        .route("/api/v1/outreach/:name/generate", post(outreach::generate))
        // LinkedIn content
        .route("/api/v1/linkedin", get(linkedin::list))
        .route("/api/v1/linkedin/generate", post(linkedin::generate))
        .route("/api/v1/linkedin/bundle", get(linkedin::bundle))
        .route("/api/v1/linkedin/:index", patch(linkedin::edit))
        .route("/api/v1/linkedin/:index/graphic", post(linkedin::graphic))
        // Narration
        .route("/api/v1/narration/play", post(narration::play))
        .route("/api/v1/narration/finished", post(narration::finished))
        .route("/api/v1/narration/stop", post(narration::stop))
        // Chat sessions
        .route("/api/v1/chat/:session/message", post(chat::send))
        .route("/api/v1/chat/:session", get(chat::history).delete(chat::clear))
        // Email share
        .route("/api/v1/email/compose", post(email::compose))
        .with_state(state)
}
