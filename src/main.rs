//! Topic Tracker - terminal front end for tutorial progress
//!
//! Run with `topic-tracker` or `topic-tracker --help` for usage.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use topic_tracker::{
    APP_NAME, Catalog, Config, PageTracker, TopicId, VERSION, open_tracker, tui::App,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Track completed tutorial topics from the terminal")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive TUI (default)
    Tui,

    /// List topics and their completion state
    List {
        /// Only show completed topics
        #[arg(short, long)]
        completed: bool,
    },

    /// Show whether a topic is completed
    Status {
        /// Topic id
        topic: String,
    },

    /// Flip a topic between completed and not completed
    Toggle {
        /// Topic id
        topic: String,
    },

    /// Forget all completed topics
    Reset,

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if log_file.is_some() {
        EnvFilter::new("info").add_directive("tokio=warn".parse()?)
    } else {
        // One-shot commands print their own output; only surface problems
        EnvFilter::new("warn")
    };

    if let Some(path) = log_file {
        // Keep logs off the screen while the TUI owns the terminal
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

fn print_topics(tracker: &PageTracker, completed_only: bool) {
    let page = tracker.view();

    if page.sidebar().is_empty() {
        println!("No topics in the catalog.");
        return;
    }

    for entry in page.sidebar() {
        if completed_only && !entry.is_completed() {
            continue;
        }
        let marker = if entry.is_completed() { "✓" } else { " " };
        println!("  [{}] {:<20} {}", marker, entry.topic, entry.title);
    }

    let done = page.sidebar().iter().filter(|e| e.is_completed()).count();
    println!();
    println!("Completed: {}/{}", done, page.sidebar().len());

    if !tracker.is_storage_available() {
        println!("(storage unavailable: progress is not being saved)");
    }
}

fn show_config(config: &Config, path: Option<PathBuf>, init: bool) -> Result<()> {
    let config_path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };

    if init {
        config.save_to(&config_path)?;
        println!("Configuration initialized at {:?}", config_path);
    } else {
        println!("Configuration:");
        println!("{}", toml::to_string_pretty(config)?);
        println!("\nConfig file: {:?}", config_path);
        println!("Storage file: {:?}", config.storage_file()?);
        println!("Catalog file: {:?}", config.catalog_file()?);
    }

    Ok(())
}

/// Load the catalog and run the initial progress load
fn open(config: &Config) -> Result<(Catalog, PageTracker)> {
    let catalog = Catalog::load_from(&config.catalog_file()?)?;
    let tracker = open_tracker(config, &catalog);
    Ok((catalog, tracker))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    let debug = cli.debug || config.debug;

    let command = cli.command.unwrap_or(Commands::Tui);
    let log_file = matches!(command, Commands::Tui).then(|| config.log_file());
    setup_logging(debug, log_file)?;

    match command {
        Commands::Tui => {
            info!("Starting Topic Tracker TUI v{}", VERSION);
            let (catalog, tracker) = open(&config)?;
            let mut app = App::new(&config, catalog, tracker);
            app.run().await?;
        }

        Commands::List { completed } => {
            let (_, tracker) = open(&config)?;
            print_topics(&tracker, completed);
        }

        Commands::Status { topic } => {
            let (_, tracker) = open(&config)?;
            println!("{}: {}", topic, tracker.topic_state(&topic));
        }

        Commands::Toggle { topic } => {
            let (catalog, mut tracker) = open(&config)?;
            if !tracker.is_storage_available() {
                eprintln!("Storage unavailable: '{}' was not changed.", topic);
                return Ok(());
            }
            if !catalog.contains(&topic) {
                eprintln!("Note: '{}' is not in the topic catalog.", topic);
            }

            let state = tracker.toggle(&TopicId::new(topic.as_str()))?;
            println!("{}: {}", topic, state);
        }

        Commands::Reset => {
            let (_, mut tracker) = open(&config)?;
            if !tracker.is_storage_available() {
                eprintln!("Storage unavailable: nothing to reset.");
                return Ok(());
            }
            tracker.reset()?;
            println!("Progress reset.");
        }

        Commands::Config { init } => show_config(&config, cli.config, init)?,
    }

    Ok(())
}
