//! Drives the poller over every image file in a directory.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::utils::dirs::ensure_subdir;
use crate::video::poller::VideoPoller;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];
const VIDEO_SUBDIR: &str = "videos";
const RESIZED_SUBDIR: &str = "resized";

/// Result of one directory run. A file that failed produces no video; the
/// failure is recorded and the remaining files still run.
pub struct ProcessReport {
    pub video_dir: PathBuf,
    /// Written video paths, in processing order.
    pub videos: Vec<PathBuf>,
    pub failures: Vec<ImageFailure>,
}

pub struct ImageFailure {
    pub file: String,
    pub reason: String,
}

fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

impl VideoPoller {
    /// Convert every image file in `image_dir` to video. Creates the
    /// `videos/` and `resized/` subdirectories if needed; filenames are
    /// sorted so the walk order is stable across filesystems.
    pub async fn process_directory(&self, image_dir: &Path) -> AppResult<ProcessReport> {
        let video_dir = ensure_subdir(image_dir, VIDEO_SUBDIR)?;
        let resized_dir = ensure_subdir(image_dir, RESIZED_SUBDIR)?;

        let mut names = Vec::new();
        for entry in fs::read_dir(image_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_image_file(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        let mut videos = Vec::new();
        let mut failures = Vec::new();
        for name in names {
            let path = image_dir.join(&name);
            match self.process_image(&path, &video_dir, &resized_dir).await {
                Ok(video) => videos.push(video),
                Err(err) => {
                    tracing::error!("Failed to process image {}: {}", name, err);
                    failures.push(ImageFailure { file: name, reason: err.to_string() });
                }
            }
        }

        Ok(ProcessReport { video_dir, videos, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::is_image_file;

    #[test]
    fn filters_by_image_extension() {
        assert!(is_image_file("a.png"));
        assert!(is_image_file("b.JPG"));
        assert!(is_image_file("c.JpEg"));
        assert!(is_image_file("d.bmp"));
        assert!(!is_image_file("e.gif"));
        assert!(!is_image_file("f.mp4"));
        assert!(!is_image_file("noext"));
        assert!(!is_image_file("dir.png.txt"));
    }
}
