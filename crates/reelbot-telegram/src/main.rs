//! Reelbot: a Telegram bot for movie search and discovery.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use teloxide::Bot;
use tracing_subscriber::EnvFilter;

use reelbot_core::ConversationController;
use reelbot_providers::{ImdbClient, YoutubeSearch};

mod config;
mod dispatch;
mod transport;

use config::BotConfig;
use transport::TelegramTransport;

#[derive(Parser)]
#[command(name = "reelbot")]
#[command(about = "Telegram bot for movie search and discovery", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "reelbot.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = BotConfig::load(&cli.config)?;
    init_tracing(config.log.as_deref());

    let token = config.resolve_token()?;
    let bot = Bot::new(token);

    let imdb = Arc::new(ImdbClient::new());
    let controller = Arc::new(ConversationController::new(
        Arc::new(TelegramTransport::new(bot.clone())),
        imdb.clone(),
        imdb,
        Arc::new(YoutubeSearch::new()),
    ));

    tracing::info!("starting reelbot");
    dispatch::run(bot, controller).await;
    Ok(())
}

fn init_tracing(default_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or("info")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
