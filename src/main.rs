//! Cover picker entry point.
//! Loads the video, starts the decode pool, then hands the screen to eframe.

use std::path::PathBuf;

use clap::Parser;
use coverpick::ui::CoverPickerApp;
use coverpick::{CoverScreen, PickerSettings};
use eframe::egui;
use tracing_subscriber::EnvFilter;

/// Pick a cover frame from a video
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Video to pick a cover from
    video: Option<PathBuf>,

    /// Number of thumbnails in the strip
    #[arg(short = 'n', long, default_value_t = coverpick::thumbnail::DEFAULT_THUMBNAIL_COUNT)]
    thumbnails: usize,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Failed to start decode runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("UI error: {0}")]
    Ui(#[from] eframe::Error),
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log)))
        .init();

    let mut settings = PickerSettings {
        thumbnail_count: args.thumbnails,
        ..PickerSettings::default()
    };
    if let Some(video) = args.video {
        settings = settings.with_video_path(video);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("coverpick-decode")
        .build()?;
    let screen = CoverScreen::open_or_empty(settings, runtime.handle().clone());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Cover")
            .with_inner_size([390.0, 844.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "coverpick",
        native_options,
        Box::new(move |cc| Box::new(CoverPickerApp::new(cc, screen, runtime))),
    )?;
    Ok(())
}
