use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use cliclack::{confirm, intro, log, note, outro, spinner};

mod cache;
mod config;
mod error;
mod import;
mod playlist;
mod resolver;
mod source;
mod track;
mod youtube;

#[cfg(test)]
mod testing;

use cache::{CacheGateway, RedisCache};
use import::Populator;
use youtube::YouTubeClient;

#[derive(Parser, Debug)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config(config::ConfigArgs),
    /// Import the tracks of a CSV export into a YouTube playlist
    Import {
        /// CSV file to import (prompts for one in the CSV directory if omitted)
        #[clap(short = 'c', long = "csv", value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Playlist title (defaults to the name derived from the CSV file)
        #[clap(short = 'p', long = "playlist", value_name = "TITLE")]
        playlist: Option<String>,
        /// Resolve tracks and report, without creating or inserting anything
        #[clap(short = 'd', long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install rustls crypto provider")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => handle_config(args)?,
        Commands::Import {
            csv,
            playlist,
            dry_run,
        } => run_import(csv, playlist, dry_run).await?,
    }

    Ok(())
}

fn handle_config(args: config::ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    intro("📝 Import Configuration")?;

    let mut cfg = config::Config::read().unwrap_or_default();

    if args.reset {
        let confirmed = confirm("Are you sure you want to reset the configuration?").interact()?;

        if confirmed {
            cfg = config::Config::default();
            cfg.write()?;
            outro("✅ Configuration reset successfully")?;
        }
        return Ok(());
    }

    if cfg.apply(&args) {
        cfg.write()?;
        log::success("Configuration updated")?;
    }

    if args.list {
        note(
            "OAuth2 JSON path",
            cfg.oauth2_json.as_deref().unwrap_or("<not set>"),
        )?;
        note("Redis URL", &cfg.redis_url)?;
        note("CSV directory", &cfg.csv_dir)?;
        note("New playlist privacy", &cfg.privacy_status)?;
    }

    outro("✅ Done")?;
    Ok(())
}

/// Import one CSV export into its playlist, then exit.
async fn run_import(
    csv: Option<PathBuf>,
    playlist: Option<String>,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    intro(if dry_run {
        "🔍 Playlist Import (Dry Run)"
    } else {
        "📥 Playlist Import"
    })?;

    let cfg = config::Config::read().unwrap_or_default();

    let Some(oauth2_json) = cfg.oauth2_json.as_deref() else {
        outro("❌ The path to the OAuth2 JSON file is not set. Run `config --oauth2-json <PATH>` first.")?;
        return Err("OAuth2 JSON path is not set".into());
    };

    let csv_path = match csv {
        Some(path) => path,
        None => match source::ask_for_csv_file(Path::new(&cfg.csv_dir))? {
            Some(path) => path,
            None => {
                outro(format!("❌ No CSV files found in {}", cfg.csv_dir))?;
                return Ok(());
            }
        },
    };

    let loaded = source::load_track_records(&csv_path)?;
    let title = playlist.unwrap_or(loaded.display_name);
    if title.is_empty() {
        outro("❌ Could not derive a playlist title, pass one with --playlist")?;
        return Err("playlist title is empty".into());
    }
    log::step(format!(
        "Loaded {} tracks from {}",
        loaded.records.len(),
        csv_path.display()
    ))?;

    let sp = spinner();
    sp.start("Authorizing with YouTube");
    let youtube = match YouTubeClient::new(oauth2_json, &cfg.privacy_status).await {
        Ok(client) => client,
        Err(e) => {
            sp.error(e.to_string());
            outro("❌ Authorization failed")?;
            return Err(e.into());
        }
    };
    sp.stop("Authorized");

    let store = RedisCache::connect(&cfg.redis_url).await?;
    let gateway = CacheGateway::new(Arc::new(store));

    let populator = Populator::new(&gateway, &youtube, &youtube).dry_run(dry_run);
    let summary = match populator.populate(&title, &loaded.records).await {
        Ok(summary) => summary,
        Err(e) => {
            outro(format!("❌ {}", e))?;
            return Err(e.into());
        }
    };

    outro(format!(
        "{} '{}': {} tracks, {} added, {} already present, {} planned, {} failed",
        if dry_run { "✅ Dry run of" } else { "✅ Imported" },
        title,
        summary.attempted(),
        summary.added,
        summary.skipped,
        summary.planned,
        summary.failed
    ))?;
    Ok(())
}
