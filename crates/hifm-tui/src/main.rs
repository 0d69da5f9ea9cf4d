mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod speech;
mod theme;
mod widgets;
mod workspace;

use std::path::PathBuf;

use clap::Parser;

use hifm_core::config::Config;
use hifm_core::generator::Draft;
use hifm_core::narration::{Narrator, SpeechBackend};
use hifm_core::{platform, Session};

/// Human Interest FM — browse, generate and listen to human-interest stories.
#[derive(Parser, Debug)]
#[command(name = "hifm", version, about)]
struct Args {
    /// Topic to start on (also the generator's default topic)
    #[arg(long)]
    topic: Option<String>,

    /// Read settings from this file instead of ~/.config/hifm/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Never speak, even if a speech program is installed
    #[arg(long)]
    no_speech: bool,

    /// Print the composed feed as JSON and exit
    #[arg(long)]
    print_feed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("hifm.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    if !args.print_feed {
        // Print log path to stderr so the operator can tail it immediately.
        eprintln!("hifm log: {}", log_path.display());
    }
    tracing::info!("hifm starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config: {}; using defaults", e);
        Config::default()
    });

    // ── Session ──────────────────────────────────────────────────────────────
    let topic = args
        .topic
        .clone()
        .unwrap_or_else(|| config.session.default_topic.clone());
    let session = Session::new(config.catalog.load(), Some(topic));

    if args.print_feed {
        println!("{}", serde_json::to_string_pretty(&session.compose_feed())?);
        return Ok(());
    }

    // ── Narration ────────────────────────────────────────────────────────────
    let backend: Option<Box<dyn SpeechBackend>> = if args.no_speech {
        tracing::info!("speech: disabled by --no-speech");
        None
    } else {
        speech::ProcessSpeech::from_config(&config.speech)
            .map(|b| Box::new(b) as Box<dyn SpeechBackend>)
    };
    let (narrator, narration_rx) = Narrator::new(backend);

    // Generator form starts from the selected topic and the configured tone/length.
    let mut draft = Draft::new(session.selected_topic());
    draft.tone = config.session.tone();
    draft.length = config.session.default_length;
    draft.bump_length(0);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(session, narrator, draft, log_path);
    app.run(narration_rx).await?;

    Ok(())
}
