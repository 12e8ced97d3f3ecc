use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carousel_core::{load_manifest, AppConfig, Slide, ViewSource};

mod commands;

#[derive(Parser)]
#[command(name = "carousel")]
#[command(author, version, about = "Browse images as a carousel in the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    view: ViewArgs,

    /// Use this config file instead of ~/.config/carousel/config.toml
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ViewArgs {
    /// Image paths or http(s) URLs
    sources: Vec<String>,

    /// JSON manifest of slides (source, title, caption)
    #[arg(short = 'm', long)]
    manifest: Option<PathBuf>,

    /// Wrap around at both ends
    #[arg(short = 'i', long)]
    infinite: bool,

    /// Index of the first slide shown
    #[arg(short = 's', long)]
    start: Option<usize>,

    /// Treat the terminal as touch capable (controls start hidden)
    #[arg(long)]
    touch: bool,

    /// Start in fullscreen
    #[arg(short = 'f', long)]
    fullscreen: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show images (default)
    View(ViewArgs),
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::InitConfig { force }) => {
            let path = cli.config.unwrap_or_else(AppConfig::config_path);
            commands::init_config::run(&config, &path, force)
        }
        Some(Commands::View(args)) => view(&mut config, args),
        None => view(&mut config, cli.view),
    }
}

fn view(config: &mut AppConfig, args: ViewArgs) -> Result<()> {
    init_logging(config)?;
    apply_overrides(config, &args);
    let slides = collect_slides(&args)?;
    tracing::info!(count = slides.len(), "Starting carousel");
    commands::run::run(config, slides)
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut AppConfig, args: &ViewArgs) {
    let settings = &mut config.carousel;
    if args.infinite {
        settings.infinite = true;
    }
    if let Some(start) = args.start {
        settings.start_index = start;
    }
    if args.touch {
        settings.touch = true;
    }
    if args.fullscreen {
        settings.fullscreen = true;
    }
}

fn collect_slides(args: &ViewArgs) -> Result<Vec<Slide>> {
    let mut slides = match args.manifest {
        Some(ref path) => load_manifest(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?,
        None => Vec::new(),
    };
    for source in &args.sources {
        let source = ViewSource::parse(source)?;
        slides.push(Slide::new(source));
    }
    Ok(slides)
}

/// Log to a file in the data dir, the terminal belongs to the UI
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
