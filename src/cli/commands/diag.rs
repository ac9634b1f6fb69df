//! Diagnostic and debugging commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, OutputFormat};
use crate::cli::shell;
use crate::config::Config;
use crate::recommend::HttpRecommendationClient;
use crate::tilt::{BoundingRect, TiltController, TiltState};

#[derive(Subcommand, Debug)]
pub enum DiagCommands {
    /// Show data paths and the service endpoint
    Paths,

    /// Compute the card tilt for a pointer position
    Tilt {
        /// Pointer x coordinate
        #[arg(allow_negative_numbers = true)]
        x: f32,

        /// Pointer y coordinate
        #[arg(allow_negative_numbers = true)]
        y: f32,

        /// Card left edge
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        left: f32,

        /// Card top edge
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        top: f32,

        /// Card width
        #[arg(long, default_value_t = 300.0)]
        width: f32,

        /// Card height
        #[arg(long, default_value_t = 400.0)]
        height: f32,
    },
}

#[derive(Serialize)]
struct PathsResult {
    config_file: String,
    config_exists: bool,
    shell_history: String,
    endpoint: String,
}

#[derive(Serialize)]
struct TiltResult {
    tilt_x: f32,
    tilt_y: f32,
    transform: String,
    corners: [(f32, f32); 4],
}

pub async fn run(command: DiagCommands, config: &Config, format: OutputFormat, _quiet: bool) -> Result<()> {
    match command {
        DiagCommands::Paths => paths(config, format).await,
        DiagCommands::Tilt {
            x,
            y,
            left,
            top,
            width,
            height,
        } => tilt(x, y, BoundingRect::new(left, top, width, height), format),
    }
}

async fn paths(config: &Config, format: OutputFormat) -> Result<()> {
    let config_path = Config::config_path().ok();

    let result = PathsResult {
        config_file: config_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "<error>".to_string()),
        config_exists: config_path.as_ref().is_some_and(|p| p.exists()),
        shell_history: shell::history_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "<error>".to_string()),
        endpoint: HttpRecommendationClient::new(&config.service)?.endpoint(),
    };

    print_formatted(&result, format, |r| {
        [
            format!(
                "Config file:    {}{}",
                r.config_file,
                if r.config_exists { "" } else { " (not found)" }
            ),
            format!("Shell history:  {}", r.shell_history),
            format!("Endpoint:       {}", r.endpoint),
        ]
        .join("\n")
    })?;

    Ok(())
}

fn tilt(x: f32, y: f32, rect: BoundingRect, format: OutputFormat) -> Result<()> {
    let mut controller = TiltController::new();
    controller.on_pointer_move(x, y, Some(rect));

    let (TiltState::Tilted { tilt_x, tilt_y }, Some(transform)) = (controller.state(), controller.transform())
    else {
        anyhow::bail!("Card has no measurable size ({} x {})", rect.width, rect.height);
    };

    let result = TiltResult {
        tilt_x,
        tilt_y,
        transform: transform.to_string(),
        corners: transform.project_corners(&rect),
    };

    print_formatted(&result, format, |r| {
        let corners: Vec<String> = r
            .corners
            .iter()
            .map(|(cx, cy)| format!("({:.1}, {:.1})", cx, cy))
            .collect();
        [
            format!("tiltX: {:.3} deg", r.tilt_x),
            format!("tiltY: {:.3} deg", r.tilt_y),
            format!("transform: {}", r.transform),
            format!("corners: {}", corners.join(" ")),
        ]
        .join("\n")
    })?;

    Ok(())
}
