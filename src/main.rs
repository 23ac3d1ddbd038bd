use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;

use eframe::egui;
use rythmx::player::PlayerController;
use rythmx::utils::load_config;
use rythmx::window::RythmxApp;
use rythmx::GstMediaService;

/// RythmX - a small desktop video player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media file to play
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start in fullscreen mode
    #[arg(short, long)]
    fullscreen: bool,

    /// Set initial volume (0-100)
    #[arg(short, long, value_name = "VOLUME", value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Set initial playback speed (0.5-2.0)
    #[arg(short, long, value_name = "SPEED")]
    speed: Option<f64>,

    /// Window width
    #[arg(long)]
    width: Option<u32>,

    /// Window height
    #[arg(long)]
    height: Option<u32>,

    /// Configuration file to use instead of the user one
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(args.config.as_deref());

    // Initialize logging; RUST_LOG wins over everything else
    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config
            .as_ref()
            .map(|c| c.general.log_level.clone())
            .unwrap_or_else(|_| "info".to_string())
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting RythmX v{}", env!("CARGO_PKG_VERSION"));

    let mut config = config.inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    if let Some(volume) = args.volume {
        config.playback.default_volume = f64::from(volume);
    }
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config.window.fullscreen |= args.fullscreen;
    config.validate()?;

    if let Some(file) = &args.file {
        if !file.exists() {
            error!("File not found: {:?}", file);
            return Err(anyhow::anyhow!("File not found: {}", file.display()));
        }
    }

    let title = config.window.title.clone();
    let viewport = egui::ViewportBuilder::default()
        .with_title(title.clone())
        .with_inner_size([config.window.width as f32, config.window.height as f32])
        .with_min_inner_size([480.0, 320.0])
        .with_fullscreen(config.window.fullscreen)
        .with_drag_and_drop(true);

    let options = eframe::NativeOptions {
        viewport,
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let app_name = title.clone();
    let playback = config.playback.clone();
    let initial_speed = args.speed;
    let initial_file = args.file;

    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let service = GstMediaService::new()?.with_frame_notify(move || ctx.request_repaint());

            let mut controller = PlayerController::new(Box::new(service), playback, &title);
            if let Some(speed) = initial_speed {
                controller.set_speed(speed)?;
            }

            Ok(Box::new(RythmxApp::new(&cc.egui_ctx, controller, initial_file)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {}", e))?;

    info!("RythmX exited");
    Ok(())
}
