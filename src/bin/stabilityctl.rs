use clap::{Parser, Subcommand};
use stability_api_proxy::{Config, ImageGenerator, PollPolicy, StabilityClient, VideoPoller};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "stabilityctl", about = "CLI for Stability API Proxy", version)]
struct Cli {
    /// Override STABILITY_API_URL
    #[arg(global = true, long)]
    stability_url: Option<String>,

    /// Override STABILITY_API_KEY
    #[arg(global = true, long)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one image per prompt into a fresh numbered folder
    Generate {
        /// Prompt texts, one image each
        #[arg(required = true)]
        prompts: Vec<String>,
        /// Root to store outputs under (defaults to PUBLIC_ROOT)
        #[arg(long, value_name = "PATH")]
        public_root: Option<PathBuf>,
    },
    /// Resize every image in a folder and convert each one to video
    Process {
        /// Directory of images under the public root
        directory: String,
        /// Seconds to wait before the first result poll
        #[arg(long, default_value_t = 300)]
        initial_wait_secs: u64,
        /// Seconds between result polls
        #[arg(long, default_value_t = 60)]
        poll_interval_secs: u64,
        /// Poll attempts before giving up on a job
        #[arg(long, default_value_t = 5)]
        max_attempts: u32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    Config::dotenv_load();
    let cli = Cli::parse();
    let config = Config::new().expect("Failed to load configuration");

    let base_url = cli.stability_url.clone().unwrap_or_else(|| config.stability_url.clone());
    let api_key = cli.api_key.clone().unwrap_or_else(|| config.stability_api_key.clone());
    let client = StabilityClient::new(base_url, api_key);

    match cli.command {
        Commands::Generate { prompts, public_root } => {
            let root = public_root.unwrap_or_else(|| PathBuf::from(&config.public_root));
            let generator = ImageGenerator::new(client, root);
            match generator.generate(&prompts).await {
                Ok(batch) => {
                    println!("{}", batch.folder);
                    for image in &batch.images {
                        println!("{}", image);
                    }
                    for failure in &batch.failures {
                        eprintln!("prompt {} failed: {}", failure.index + 1, failure.reason);
                    }
                    if batch.images.is_empty() && !batch.failures.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(err) => {
                    eprintln!("error: {}", err);
                    std::process::exit(1);
                }
            }
        }
        Commands::Process { directory, initial_wait_secs, poll_interval_secs, max_attempts } => {
            let policy = PollPolicy {
                initial_wait: Duration::from_secs(initial_wait_secs),
                poll_interval: Duration::from_secs(poll_interval_secs),
                max_attempts,
            };
            let poller = VideoPoller::new(client, policy);
            let image_dir = PathBuf::from(&config.public_root).join(directory.trim_start_matches('/'));
            match poller.process_directory(&image_dir).await {
                Ok(report) => {
                    println!("{}", report.video_dir.display());
                    for video in &report.videos {
                        println!("{}", video.display());
                    }
                    for failure in &report.failures {
                        eprintln!("{} failed: {}", failure.file, failure.reason);
                    }
                    if report.videos.is_empty() && !report.failures.is_empty() {
                        std::process::exit(1);
                    }
                }
                Err(err) => {
                    eprintln!("error: {}", err);
                    std::process::exit(1);
                }
            }
        }
    }
}
