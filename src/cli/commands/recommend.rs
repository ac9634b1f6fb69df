//! One-shot recommendation requests

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;
use crate::recommend::{GameRecommendation, HttpRecommendationClient, RecommendationService};
use crate::state::{RecommendationController, RequestStatus};
use crate::tone::Tone;

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Game title or theme to search for (may be empty)
    #[arg(default_value = "")]
    pub query: String,

    /// Mood filter: happy, sad, angry, surprising or suspenseful
    #[arg(short, long)]
    pub tone: Option<Tone>,

    /// Show at most this many results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn run(args: RecommendArgs, config: &Config, format: OutputFormat, quiet: bool) -> Result<()> {
    let client = HttpRecommendationClient::new(&config.service)?;
    if format == OutputFormat::Text {
        print_success(&format!("Asking {}...", client.endpoint()), quiet);
    }

    let limit = args.limit;
    let mut games = fetch(args, Arc::new(client)).await?;
    if let Some(limit) = limit {
        games.truncate(limit);
    }
    print_formatted(&games, format, |games| format_cards(games))?;

    Ok(())
}

/// Submit one request through a fresh controller and wait for its outcome
async fn fetch(args: RecommendArgs, service: Arc<dyn RecommendationService>) -> Result<Vec<GameRecommendation>> {
    let mut controller = RecommendationController::new(service);
    controller.set_query(args.query);
    controller.set_tone(args.tone.unwrap_or_default());

    controller.submit();
    controller.wait().await;

    match controller.current_state() {
        RequestStatus::Success(games) => Ok(games.clone()),
        RequestStatus::Failed(e) => Err(anyhow::Error::new(*e)),
        RequestStatus::Idle | RequestStatus::Loading => {
            anyhow::bail!("Request did not complete")
        }
    }
}

/// Plain-text rendering of the card list, in service order
pub(crate) fn format_cards(games: &[GameRecommendation]) -> String {
    if games.is_empty() {
        return "No recommendations found.".to_string();
    }

    let mut blocks = Vec::with_capacity(games.len());
    for (i, game) in games.iter().enumerate() {
        let mut lines = vec![
            format!("{}. {}", i + 1, game.title),
            format!("   Released: {}  |  Price: {}", game.release_date, game.price),
            format!("   Developer: {}", game.developer),
        ];
        if let Some(genres) = &game.genres {
            lines.push(format!("   Genres: {}", genres));
        }
        lines.push(format!("   {}", game.description));
        if let Some(link) = game.video_link() {
            lines.push(format!("   Movie: {}", link));
        }
        if let Some(link) = game.screenshot_link() {
            lines.push(format!("   Screenshot: {}", link));
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}
