mod command;
mod metrics;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{
    load_config, validate_config, BrowseController, BrowseSettings, Config, FavoritesStore,
    FetchOutcome, MovieCatalog, RecordStore, SanitizedConfig, SqliteRecordStore, TmdbClient,
};

use command::{Command, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "marquee", version, about = "Browse TMDB movies and keep a list of favorites")]
struct Args {
    /// Configuration file.
    #[arg(long, env = "MARQUEE_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        eprintln!("marquee: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_format);

    // Load configuration
    info!("Loading configuration from {:?}", args.config);
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Database path: {:?}", config.storage.path);
    info!("Language: {}", config.tmdb.language);

    // Favorites
    let record_store: Arc<dyn RecordStore> = Arc::new(
        SqliteRecordStore::new(&config.storage.path).context("Failed to open favorites store")?,
    );
    let favorites = FavoritesStore::load(record_store, config.storage.favorites_key.clone());

    // Catalog
    let catalog: Arc<dyn MovieCatalog> =
        Arc::new(TmdbClient::new(config.tmdb.clone()).context("Failed to create TMDB client")?);
    info!("TMDB client initialized");

    let settings = BrowseSettings::from_config(&config);
    let controller = BrowseController::new(catalog, favorites, settings);

    controller.on_filters_changed().await;
    println!("{}", render::snapshot(&controller.snapshot().await, config.tmdb.image_base_url()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let command = match Command::parse(&line, controller.settings().default_years) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        metrics::COMMANDS_TOTAL
            .with_label_values(&[command.name()])
            .inc();

        if command == Command::Quit {
            break;
        }

        let output = handle(&controller, &config, command).await;
        println!("{}", output);
    }

    info!("Goodbye");
    Ok(())
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Run one command and return the text to print.
async fn handle(controller: &BrowseController, config: &Config, command: Command) -> String {
    let image_base_url = config.tmdb.image_base_url();

    match command {
        Command::Intent(intent) => {
            if let FetchOutcome::Unchanged = controller.dispatch(intent).await {
                return "Nothing changed.".to_string();
            }
            render::snapshot(&controller.snapshot().await, image_base_url)
        }
        Command::Favorite(id) => match controller.toggle_favorite_by_id(id).await {
            Ok(Some(true)) => format!("Added {} to favorites.", id),
            Ok(Some(false)) => format!("Removed {} from favorites.", id),
            Ok(None) => format!("Movie {} is not on screen or in your favorites.", id),
            Err(e) => {
                warn!("Failed to save favorites: {}", e);
                format!("Could not update favorites: {}", e)
            }
        },
        Command::Trailer(id) => {
            let movie = controller.find_movie(id).await;
            let video = controller.trailer(id).await;
            render::trailer(movie.as_ref(), id, video.as_ref())
        }
        Command::Random => match controller.random_pick().await {
            Some(movie) => format!("How about {} ({})?", movie.title, movie.id),
            None => "Nothing on screen to pick from.".to_string(),
        },
        Command::Genres => render::genres(),
        Command::Show => render::snapshot(&controller.snapshot().await, image_base_url),
        Command::Config => serde_json::to_string_pretty(&SanitizedConfig::from(config))
            .unwrap_or_else(|e| format!("Could not serialize config: {}", e)),
        Command::Stats => metrics::encode_metrics(),
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    }
}
