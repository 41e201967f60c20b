//! Submit-and-poll loop for image-to-video conversion.
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::stability::client::{StabilityClient, VideoPoll};
use crate::utils::resize::resize_to_fit;

/// Longest side of images submitted for video generation.
const SUBMIT_MAX_DIMENSION: u32 = 768;

/// Fixed polling schedule: one flat wait before the first poll, then a
/// bounded number of fixed-interval attempts. No jitter, no backoff growth,
/// no cancellation once a job has been submitted.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub initial_wait: Duration,
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            initial_wait: Duration::from_secs(300),
            poll_interval: Duration::from_secs(60),
            max_attempts: 5,
        }
    }
}

pub struct VideoPoller {
    client: StabilityClient,
    policy: PollPolicy,
}

impl VideoPoller {
    pub fn new(client: StabilityClient, policy: PollPolicy) -> Self {
        VideoPoller { client, policy }
    }

    /// Convert one image to video: resize it into `resized_dir`, submit the
    /// job, then poll until the video is ready or attempts run out. Returns
    /// the path of the written video.
    ///
    /// A 202 consumes one attempt and waits out the poll interval; any status
    /// other than 202/200 aborts immediately with the status and body.
    pub async fn process_image(
        &self,
        image_path: &Path,
        video_dir: &Path,
        resized_dir: &Path,
    ) -> AppResult<PathBuf> {
        let resized = resize_to_fit(image_path, resized_dir, SUBMIT_MAX_DIMENSION)?;
        let job_id = self.client.submit_video_job(&resized).await?;

        tokio::time::sleep(self.policy.initial_wait).await;

        for attempt in 1..=self.policy.max_attempts {
            match self.client.fetch_video_result(&job_id).await? {
                VideoPoll::Pending => {
                    tracing::info!(
                        "Video job {} still running (attempt {}/{})",
                        job_id,
                        attempt,
                        self.policy.max_attempts
                    );
                    tokio::time::sleep(self.policy.poll_interval).await;
                }
                VideoPoll::Ready(bytes) => {
                    let stem = image_path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .ok_or_else(|| {
                            std::io::Error::new(
                                std::io::ErrorKind::InvalidInput,
                                "image path has no file stem",
                            )
                        })?;
                    let video_path = video_dir.join(format!("{}.mp4", stem));
                    tokio::fs::write(&video_path, &bytes).await?;
                    tracing::info!("Video job {} complete: {}", job_id, video_path.display());
                    return Ok(video_path);
                }
            }
        }

        Err(AppError::Stability(format!(
            "Video job {} did not complete after {} attempts",
            job_id, self.policy.max_attempts
        )))
    }
}
