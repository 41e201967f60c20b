//! Axum request handlers for the HTTP API.
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::generate::images::ImageGenerator;
use crate::video::poller::VideoPoller;

pub async fn root() -> &'static str {
    "Stability API Proxy"
}

/// POST /generate_images: `{"prompts": [...]}` -> `{"folderName", "images"}`.
pub async fn generate_images(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let prompts = parse_prompts(&payload)?;

    let generator = ImageGenerator::new(state.stability_client.clone(), state.public_root.clone());
    let batch = generator.generate(&prompts).await?;
    for failure in &batch.failures {
        tracing::warn!("prompt {} produced no image: {}", failure.index + 1, failure.reason);
    }

    Ok(Json(json!({
        "folderName": batch.folder,
        "images": batch.images,
    })))
}

/// POST /process_images: `{"directory"}` (or `{"imageDirectoryName"}`)
/// -> `{"message", "videoDirectory"}`.
pub async fn process_images(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> AppResult<Json<Value>> {
    let directory = payload
        .get("directory")
        .or_else(|| payload.get("imageDirectoryName"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::BadRequest("Directory path is required.".to_string()))?;

    // Directory names are resolved beneath the public root; absolute
    // filesystem paths are not accepted.
    let image_dir = state.public_root.join(directory.trim_start_matches('/'));
    let poller = VideoPoller::new(state.stability_client.clone(), state.poll_policy);
    let report = poller.process_directory(&image_dir).await?;

    let video_dir = match report.video_dir.strip_prefix(&state.public_root) {
        Ok(rel) => format!("/{}", rel.display()),
        Err(_) => report.video_dir.display().to_string(),
    };
    Ok(Json(json!({
        "message": "Images processed successfully.",
        "videoDirectory": video_dir,
    })))
}

fn parse_prompts(payload: &Value) -> AppResult<Vec<String>> {
    let prompts = payload
        .get("prompts")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::BadRequest("Prompts are required and must be an array.".to_string()))?;
    prompts
        .iter()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| AppError::BadRequest("Prompts must be strings.".to_string()))
        })
        .collect()
}
