#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::catalog::{AnimeDocument, MoviesDocument, StreamsDocument};

pub mod catalog;
pub mod config;
pub mod html;
pub mod playlist;
pub mod source;
pub mod telegram;
pub mod util;
pub mod youtube;

/// Resolves live TV and Telegram video sources into a static site:
/// an M3U8 playlist, JSON catalogs and self-contained player pages
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve live channels and write playlist.m3u8, streams.json and index.html
    Scrape {
        /// Channel configuration file
        #[arg(long, default_value = "channels.json")]
        channels: PathBuf,

        /// Output directory for generated artifacts
        #[arg(short, long, default_value = "public")]
        out: PathBuf,

        /// Fetch every resolved stream URL and verify it parses as M3U8
        #[arg(long)]
        check: bool,

        /// Parallel URL checks when --check is set
        #[arg(long, default_value_t = 8)]
        parallelism: usize,
    },

    /// Convert Telegram links in library files and write anime.json, movies.json and videos.html
    Library {
        /// Anime library input file (`{"anime": [...]}`)
        #[arg(long)]
        anime: Option<PathBuf>,

        /// Movie library input file (`{"movies": [...]}`)
        #[arg(long)]
        movies: Option<PathBuf>,

        /// Output directory for generated artifacts
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    match args.command {
        Command::Scrape {
            channels,
            out,
            check,
            parallelism,
        } => run_scrape(&channels, &out, check, parallelism).await,
        Command::Library { anime, movies, out } => {
            run_library(anime.as_deref(), movies.as_deref(), &out)
        }
    }
}

async fn run_scrape(
    channels_path: &Path,
    out_dir: &Path,
    check: bool,
    parallelism: usize,
) -> Result<()> {
    let channels = config::load_channels(channels_path)?.channels;
    let client = util::init_http_client();

    let streams = catalog::resolve_channels(&client, &channels).await;

    if check {
        let ok = playlist::check_streams(&client, &streams, parallelism).await;
        info!("{ok} stream URLs verified as M3U8");
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Creating output directory {}", out_dir.display()))?;

    let now = Utc::now();
    write_text(&out_dir.join("playlist.m3u8"), &playlist::render(&streams))?;
    write_text(&out_dir.join("index.html"), &html::render_index(&streams, now))?;

    let document = StreamsDocument {
        last_updated: now,
        total_streams: streams.len(),
        streams,
    };
    write_json(&out_dir.join("streams.json"), &document)?;

    info!(
        "Generated {} streams into {}",
        document.total_streams,
        out_dir.display()
    );
    Ok(())
}

fn run_library(
    anime_path: Option<&Path>,
    movies_path: Option<&Path>,
    out_dir: &Path,
) -> Result<()> {
    if anime_path.is_none() && movies_path.is_none() {
        warn!("No library input files given; writing empty catalogs");
    }

    let mut anime = match anime_path {
        Some(path) => config::load_titles(path, "anime")?,
        None => Vec::new(),
    };
    let mut movies = match movies_path {
        Some(path) => config::load_titles(path, "movies")?,
        None => Vec::new(),
    };

    for title in anime.iter_mut().chain(movies.iter_mut()) {
        catalog::convert_title(title);
        info!("Added: {}", title.name);
    }

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Creating output directory {}", out_dir.display()))?;

    let now = Utc::now();
    let anime_doc = AnimeDocument {
        last_updated: now,
        total_anime: anime.len(),
        anime,
    };
    let movies_doc = MoviesDocument {
        last_updated: now,
        total_movies: movies.len(),
        movies,
    };

    write_json(&out_dir.join("anime.json"), &anime_doc)?;
    write_json(&out_dir.join("movies.json"), &movies_doc)?;
    write_text(&out_dir.join("videos.html"), &html::render_library())?;

    info!(
        "Saved {} anime and {} movies into {}",
        anime_doc.total_anime,
        movies_doc.total_movies,
        out_dir.display()
    );
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("Writing {}", path.display()))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Serializing {}", path.display()))?;
    std::fs::write(path, body).with_context(|| format!("Writing {}", path.display()))
}
