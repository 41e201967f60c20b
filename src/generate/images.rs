//! Batch image generation into a fresh numbered output folder.
use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::stability::client::{ImageRequest, StabilityClient};
use crate::utils::dirs::allocate_numbered_dir;

/// Contextual preamble prepended to every prompt sent upstream.
const GLOBAL_PROMPT: &str = "African Context: Imagine scenes inspired by the rich tapestry of African landscapes, cultures, and traditions. From the vast savannahs teeming with wildlife to bustling marketplaces filled with vibrant colors and sounds, capture the essence of Africa's diversity and beauty.";

const FOLDER_BASE: &str = "tunmi";
const FILE_STEM: &str = "tunmi";
const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 576;
const OUTPUT_FORMAT: &str = "png";
const STYLE_PRESET: &str = "analog-film";

/// Result of one batch run. A failed prompt produces no file and no entry in
/// `images`; the failure itself is kept so callers can inspect it instead of
/// digging through logs.
pub struct GeneratedBatch {
    /// Output folder, relative to the public root, with a leading slash.
    pub folder: String,
    /// Relative paths of the produced images, in prompt order.
    pub images: Vec<String>,
    /// Prompts that failed upstream.
    pub failures: Vec<PromptFailure>,
}

pub struct PromptFailure {
    /// 0-based position of the prompt in the request.
    pub index: usize,
    pub prompt: String,
    pub reason: String,
}

pub struct ImageGenerator {
    client: StabilityClient,
    public_root: PathBuf,
}

impl ImageGenerator {
    pub fn new(client: StabilityClient, public_root: impl Into<PathBuf>) -> Self {
        ImageGenerator { client, public_root: public_root.into() }
    }

    /// Generate one image per prompt into a newly allocated folder.
    ///
    /// Remote failures are logged, recorded, and skipped; the batch itself
    /// only fails on filesystem errors.
    pub async fn generate(&self, prompts: &[String]) -> AppResult<GeneratedBatch> {
        let folder = allocate_numbered_dir(&self.public_root.join(FOLDER_BASE))?;

        let mut images = Vec::new();
        let mut failures = Vec::new();
        for (i, prompt) in prompts.iter().enumerate() {
            let full_prompt = format!("{}\n\n{}", GLOBAL_PROMPT, prompt);
            let request = ImageRequest {
                prompt: &full_prompt,
                width: IMAGE_WIDTH,
                height: IMAGE_HEIGHT,
                output_format: OUTPUT_FORMAT,
                style_preset: STYLE_PRESET,
            };
            match self.client.generate_image(&request).await {
                Ok(bytes) => {
                    let file = folder.join(format!("{}{}.png", FILE_STEM, i + 1));
                    tokio::fs::write(&file, &bytes).await?;
                    tracing::info!("Generated image for prompt \"{}\"", prompt);
                    images.push(self.relative(&file));
                }
                Err(err) => {
                    tracing::error!("Image generation failed for prompt \"{}\": {}", prompt, err);
                    failures.push(PromptFailure {
                        index: i,
                        prompt: prompt.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(GeneratedBatch { folder: self.relative(&folder), images, failures })
    }

    fn relative(&self, path: &Path) -> String {
        match path.strip_prefix(&self.public_root) {
            Ok(rel) => format!("/{}", rel.display()),
            Err(_) => path.display().to_string(),
        }
    }
}
