use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use pollcast::cli::{Cli, Commands};
use pollcast::core::{config, init_logger, Config};
use pollcast::mcq::extract_questions;
use pollcast::session::SessionStore;
use pollcast::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, PollPublisher};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    match cli.command {
        Some(Commands::Extract { file, json }) => run_extract(&file, json),
        Some(Commands::Run) | None => {
            // Initialize logger (console + file)
            init_logger(&config::LOG_FILE_PATH)?;
            run_bot().await
        }
    }
}

/// Parse a local HTML file and print what the bot would publish.
fn run_extract(file: &std::path::Path, json: bool) -> Result<()> {
    let html = std::fs::read_to_string(file)?;
    let questions = extract_questions(&html);

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        println!("Found {} questions in {}", questions.len(), file.display());
        for (i, question) in questions.iter().enumerate() {
            let image = if question.image_url.is_some() { ", image" } else { "" };
            println!("{:>3}. {} ({} options{})", i + 1, question.text, question.options.len(), image);
        }
    }

    Ok(())
}

/// Run the bot in long polling mode until interrupted.
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    let config = Arc::new(Config::from_env()?);
    log::info!(
        "Authorized user: {}, target chat: {}",
        config.authorized_user,
        config.target_chat
    );

    let bot = create_bot()?;

    let bot_info = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username, bot_info.id);

    setup_bot_commands(&bot).await?;

    let sessions = Arc::new(SessionStore::new());
    let publisher = Arc::new(PollPublisher::new(bot.clone(), config.target_chat));
    let handler = schema(HandlerDeps::new(Arc::clone(&config), sessions, publisher));

    log::info!("Ready to receive updates");

    // Polling listener that drops pending updates on start, so a restart
    // doesn't replay stale uploads or confirmations.
    use teloxide::update_listeners::Polling;
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}
