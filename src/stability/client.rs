//! Thin HTTP client for the Stability AI endpoints.
//!
//! - `generate_image` posts a multipart form to `stable-image/generate/core`
//!   and returns raw image bytes.
//! - `submit_video_job` posts an image to `image-to-video` and returns the
//!   remote job id.
//! - `fetch_video_result` queries `image-to-video/result/<id>`; 202 means the
//!   job is still running, 200 carries the video bytes.
use std::path::Path;

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Parameters for one image generation call.
pub struct ImageRequest<'a> {
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
    pub output_format: &'a str,
    pub style_preset: &'a str,
}

/// Outcome of one poll of the video result endpoint.
pub enum VideoPoll {
    /// 202: the job is still running.
    Pending,
    /// 200: the finished video bytes.
    Ready(Vec<u8>),
}

#[derive(Clone)]
pub struct StabilityClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StabilityClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        StabilityClient { client: Client::new(), base_url: base, api_key }
    }

    /// Generate one image. Returns the raw bytes on success.
    pub async fn generate_image(&self, request: &ImageRequest<'_>) -> AppResult<Vec<u8>> {
        let url = format!("{}/v2beta/stable-image/generate/core", self.base_url);
        tracing::info!("Requesting image generation at URL: {}", url);

        let form = Form::new()
            .text("prompt", request.prompt.to_string())
            .text("output_format", request.output_format.to_string())
            .text("width", request.width.to_string())
            .text("height", request.height.to_string())
            .text("style_preset", request.style_preset.to_string());

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status() == StatusCode::OK {
            response.bytes().await.map(|b| b.to_vec()).map_err(AppError::HttpClient)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = format!("Failed to generate image. Status: {}, Body: {}", status, body);
            tracing::error!("{}", message);
            Err(AppError::Stability(message))
        }
    }

    /// Submit one image for video generation. Returns the remote job id.
    pub async fn submit_video_job(&self, image_path: &Path) -> AppResult<String> {
        let url = format!("{}/v2beta/image-to-video", self.base_url);
        let file_name = image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.png")
            .to_string();
        let bytes = tokio::fs::read(image_path).await?;

        // The conversion parameters are fixed; they are not user-configurable.
        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(file_name))
            .text("seed", "0")
            .text("cfg_scale", "1.8")
            .text("motion_bucket_id", "127");

        let response = self.client.post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status() == StatusCode::OK {
            let json: Value = response.json().await.map_err(AppError::HttpClient)?;
            let id = json
                .get("id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| AppError::Stability(format!("Video job response has no 'id': {}", json)))?;
            tracing::info!("Submitted video job {}", id);
            Ok(id.to_string())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = format!("Failed to submit video job. Status: {}, Body: {}", status, body);
            tracing::error!("{}", message);
            Err(AppError::Stability(message))
        }
    }

    /// Poll the result endpoint once for the given job id.
    pub async fn fetch_video_result(&self, id: &str) -> AppResult<VideoPoll> {
        let url = format!("{}/v2beta/image-to-video/result/{}", self.base_url, id);
        let response = self.client.get(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "video/*")
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        match response.status() {
            StatusCode::ACCEPTED => Ok(VideoPoll::Pending),
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err(AppError::HttpClient)?;
                Ok(VideoPoll::Ready(bytes.to_vec()))
            }
            status => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
                Err(AppError::Stability(format!("Response {}: {}", status.as_u16(), body)))
            }
        }
    }
}
