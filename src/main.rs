mod app;
mod app_data;
mod cli;
mod config;
mod recommend;
mod state;
mod task;
mod tilt;
mod timeline;
mod tone;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app_data::site;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging
    let default_filter = if cli.output.verbose {
        "insight=trace,info"
    } else {
        "insight=debug,info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.command.is_some() {
        return cli::run(cli).await;
    }

    tracing::info!("Starting Insight");
    let config = cli::load_config(&cli);
    run_window(config)
}

fn run_window(config: config::Config) -> Result<()> {
    let window = &site().window;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(window.initial_size)
        .with_min_inner_size(window.min_size)
        .with_title(&window.title);

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true, // Save/restore window size and position
        ..Default::default()
    };

    eframe::run_native(
        "Insight",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::InsightApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
