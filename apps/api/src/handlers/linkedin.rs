use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::export;
use crate::gateway;
use crate::models::linkedin::PostEdit;
use crate::state::AppState;

/// GET /api/v1/linkedin
pub async fn list(State(state): State<AppState>) -> Json<Value> {
    let engine = state.engine.read().await;
    Json(json!({
        "posts": engine.posts,
        "hashtagBank": engine.hashtag_bank(),
        "generating": engine.generating_images,
    }))
}

/// POST /api/v1/linkedin/generate
///
/// Regenerates the ten-post calendar wholesale. Existing graphics go with
/// the posts they were attached to.
pub async fn generate(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let (profile, epoch) = {
        let engine = state.engine.read().await;
        let profile = engine
            .profile
            .clone()
            .ok_or_else(|| AppError::Validation("content generation requires a profile".to_string()))?;
        (profile, engine.epoch)
    };

    let posts = gateway::generate_calendar(&state.ai, &profile).await?;

    let mut engine = state.engine.write().await;
    if engine.epoch != epoch {
        return Ok(Json(json!({"discarded": true})));
    }
    engine.posts = posts;
    engine.generating_images.clear();

    tracing::info!("Content calendar of {} posts stored", engine.posts.len());
    Ok(Json(json!({
        "posts": engine.posts,
        "hashtagBank": engine.hashtag_bank(),
    })))
}

/// PATCH /api/v1/linkedin/:index
pub async fn edit(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(edit): Json<PostEdit>,
) -> Result<Json<Value>, AppError> {
    let mut engine = state.engine.write().await;
    let post = engine
        .posts
        .get_mut(index)
        .ok_or_else(|| AppError::NotFound(format!("no post at index {index}")))?;
    post.apply(edit);
    Ok(Json(json!({"post": post})))
}

/// POST /api/v1/linkedin/:index/graphic
///
/// Generates a branded 1:1 graphic for one post. At most one generation
/// per post may be in flight; the result lands as a data URL on the post.
pub async fn graphic(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, AppError> {
    let (post, profile, epoch) = {
        let mut engine = state.engine.write().await;
        let post = engine
            .posts
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("no post at index {index}")))?;
        let profile = engine
            .profile
            .clone()
            .ok_or_else(|| AppError::Validation("graphics require a profile".to_string()))?;
        if !engine.generating_images.insert(index) {
            return Err(AppError::Conflict(format!(
                "a graphic for post {index} is already generating"
            )));
        }
        (post, profile, engine.epoch)
    };

    let result = gateway::generate_post_graphic(&state.ai, &post, &profile).await;

    let mut engine = state.engine.write().await;
    engine.generating_images.remove(&index);
    let data_url = result?;
    if engine.epoch != epoch {
        return Ok(Json(json!({"discarded": true})));
    }
    if let Some(post) = engine.posts.get_mut(index) {
        post.image_url = Some(data_url.clone());
    }
    Ok(Json(json!({"imageUrl": data_url})))
}

/// GET /api/v1/linkedin/bundle
pub async fn bundle(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let engine = state.engine.read().await;
    let text = export::linkedin_bundle(&engine.posts)
        .ok_or_else(|| AppError::NotFound("no posts to bundle".to_string()))?;
    Ok(Json(json!({"bundle": text})))
}
