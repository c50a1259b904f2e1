use std::sync::Arc;

use futures::StreamExt;

use miralunas::channels::TelegramChannel;
use miralunas::chart::ChartCommand;
use miralunas::config::Config;
use miralunas::dialogue::{Dialogue, SessionStore};
use miralunas::llm::OpenAiProvider;
use miralunas::logbook::Logbook;
use miralunas::orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export TELEGRAM_BOT_TOKEN=123:ABC...");
        eprintln!("  export OPENAI_API_KEY=sk-...");
        std::process::exit(1);
    });

    eprintln!("🌙 Miralunas v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Chart command: {}", config.chart_command);
    eprintln!("   Log: {}", config.log_path.display());

    let telegram = Arc::new(TelegramChannel::new(config.bot_token.clone()));
    telegram
        .health_check()
        .await
        .map_err(|e| anyhow::anyhow!("Telegram token check failed: {e}"))?;

    let chart = Arc::new(ChartCommand::new(
        config.chart_command.clone(),
        config.chart_image,
    ));
    let llm = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.model.clone(),
    ));
    let orchestrator = Arc::new(Orchestrator::new(chart, llm, config.report_width));
    let logbook = Arc::new(Logbook::new(config.log_path.clone()));

    let transport: Arc<dyn miralunas::channels::Transport> = telegram.clone();
    let dialogue = Arc::new(Dialogue::new(
        transport,
        orchestrator,
        logbook,
        config.pacing,
    ));
    let sessions = SessionStore::new(dialogue);

    let mut updates = telegram.start();
    while let Some(update) = updates.next().await {
        sessions.dispatch(update).await;
    }

    Ok(())
}
