//! DeepGuard command-line client.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use deepguard_app::render::{render_json, render_text};
use deepguard_app::{init_tracing, load_image, AppConfig, ClassifyController, SessionError};
use deepguard_client::DetectClient;

#[derive(Parser, Debug)]
#[command(name = "deepguard")]
#[command(author, version, about = "Check images for signs of manipulation", long_about = None)]
struct Args {
    /// Images to analyze
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Base URL of the detection service (overrides DEEPGUARD_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides DEEPGUARD_API_TIMEOUT)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print one JSON document per image
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = AppConfig::from_env().with_overrides(args.api_url.clone(), args.timeout);
    init_tracing(config.log_format, args.verbose);
    info!(base_url = %config.client.base_url, "Starting deepguard");

    let client = DetectClient::new(config.client.clone()).context("Failed to create detection client")?;
    let controller = ClassifyController::new(Arc::new(client));

    let mut failures = 0usize;
    for (index, path) in args.images.iter().enumerate() {
        if index > 0 && !args.json {
            println!();
        }
        if !classify_path(&controller, path, args.json).await? {
            failures += 1;
        }
    }

    if failures > 0 {
        error!(failures, total = args.images.len(), "Some images could not be classified");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Select, analyze and print one image. Returns whether a verdict was produced.
async fn classify_path(controller: &ClassifyController, path: &Path, json: bool) -> Result<bool> {
    let file = match load_image(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
    {
        Ok(file) => file,
        Err(e) => {
            error!("{:#}", e);
            return Ok(false);
        }
    };

    // Each path is its own workflow.
    controller.reset();
    match controller.select_image(file) {
        Ok(_) => {
            controller.analyze().await.context("Analysis could not start")?;
        }
        Err(SessionError::InvalidMediaType { media_type }) => {
            info!(path = %path.display(), %media_type, "Skipping non-image file");
        }
        Err(e) => return Err(e).context("Image selection failed"),
    }

    let view = controller.view();
    if json {
        println!("{}", render_json(&view).context("Failed to serialize result")?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(view.result.is_some())
}
