//! Stability API Proxy library
//!
//! Modules:
//! - `api`: Axum HTTP handlers and router setup used by the binary.
//! - `stability`: Thin client for the Stability AI REST endpoints.
//! - `generate`: Batch image generation into numbered output folders.
//! - `video`: Image-to-video submission, polling, and directory processing.
//! - `utils`: Folder allocation and bounded image resizing.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `StabilityClient`,
//! `ImageGenerator`, `VideoPoller`, and `PollPolicy`.
pub mod api;
pub mod stability;
pub mod generate;
pub mod video;
pub mod utils;
pub mod config;
pub mod error;

pub use config::Config;
pub use stability::client::StabilityClient;
pub use generate::images::ImageGenerator;
pub use video::poller::{PollPolicy, VideoPoller};
