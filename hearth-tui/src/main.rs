use anyhow::{Context, Result};
use clap::Parser;
use hearth::app::App;
use hearth::fixtures::Fixtures;
use hearth::logging::{self, LogConfig};
use hearth::settings::Settings;
use hearth::terminal::{self, Tui};
use hearth::ui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Hearth - a keyboard-driven community feed with a rich post composer
#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "A terminal community feed with a rich post composer")]
#[command(version)]
struct Cli {
    /// Settings file layered over ~/.hearth/hearth.toml and ./hearth.toml
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// JSON file with the posts, profile and welcome banner to display
    #[arg(long, short)]
    fixtures: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Disable the log file entirely
    #[arg(long, conflicts_with = "verbose")]
    no_log: bool,

    /// Log file path (default: ./hearth.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Lets HEARTH_* overrides live in a local .env file
    let _ = dotenv::dotenv();

    let mut log_config = LogConfig::from_flags(cli.verbose, cli.no_log)
        .with_env_level(std::env::var(logging::LEVEL_ENV).ok().as_deref());
    if let Some(path) = cli.log_file {
        log_config = log_config.with_log_file(path);
    }
    logging::init_logging(&log_config)?;

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let fixtures_path = cli.fixtures.or_else(|| settings.fixtures.path.clone());
    let fixtures = Fixtures::load_optional(fixtures_path.as_deref()).context("Failed to load fixtures")?;
    log::info!(
        "Starting with {} posts, color scheme {}",
        fixtures.posts.len(),
        settings.ui.color_scheme.as_str()
    );

    let mut app = App::new(settings, fixtures, log_config);
    let mut tui = terminal::init()?;

    let result = run(&mut tui, &mut app);

    // Restore even when the loop failed so the shell is usable
    terminal::restore()?;
    if let Err(e) = &result {
        log::error!("Exited with error: {:#}", e);
    }
    result
}

fn run(tui: &mut Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick(Instant::now());
        tui.draw(|frame| ui::render(app, frame))?;
        app.poll_event(POLL_INTERVAL)?;
    }
    log::info!("Shutting down");
    Ok(())
}
