//! Binary entrypoint for the gallery.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use photo_gallery::config::Configuration;
use photo_gallery::model::SizeBucket;
use photo_gallery::session::GallerySession;
use photo_gallery::source::HttpPhotoSource;
use photo_gallery::store::{FileBackend, PreferenceStore};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "photo-gallery", about = "Terminal frontend for the picsum gallery core")]
struct Cli {
    /// Path to YAML config file; built-in defaults apply when absent
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Keep only photos whose author contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,

    /// Keep only photos in one size bucket: all, small, medium or large
    #[arg(long, value_name = "BUCKET")]
    size: Option<SizeBucket>,

    /// Show favorited photos only
    #[arg(long, action = ArgAction::SetTrue)]
    favorites_only: bool,

    /// Toggle the favorite flag on a photo id from the fetched page
    #[arg(long, value_name = "ID")]
    toggle_favorite: Option<String>,

    /// Flip the persisted light/dark theme flag
    #[arg(long, action = ArgAction::SetTrue)]
    toggle_theme: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photo_gallery={}", level).parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = if cli.config.exists() {
        Configuration::from_yaml_file(&cli.config)
            .with_context(|| format!("loading config from {}", cli.config.display()))?
    } else {
        info!(path = %cli.config.display(), "config file absent; using defaults");
        Configuration::default()
    };
    let cfg = cfg.validated().context("validating configuration")?;

    let source = HttpPhotoSource::new(&cfg.source).context("building photo source")?;
    let store = PreferenceStore::new(FileBackend::new(&cfg.storage.path));
    let session = GallerySession::new(source, store);

    session.initialize().await;

    if let Some(text) = cli.search {
        session.set_search_text(text);
    }
    if let Some(bucket) = cli.size {
        session.set_size_bucket(bucket);
    }
    session.set_favorites_only(cli.favorites_only);

    if let Some(id) = cli.toggle_favorite {
        match session.find_photo(&id) {
            Some(photo) => {
                session.toggle_favorite(&photo);
                let favorite = session.with_state(|state| state.is_favorite(&id));
                info!(id = %id, favorite, "favorite toggled");
            }
            None => warn!(id = %id, "photo id not in the fetched page; nothing toggled"),
        }
    }

    if cli.toggle_theme {
        let dark = session.toggle_theme();
        info!(dark, "theme toggled");
    }

    let visible = session.visible_photos();
    let (favorite_count, theme_dark) = session.with_state(|state| {
        (state.favorites().len(), state.theme_dark())
    });
    println!(
        "{} photos shown | {} favorites | {} theme",
        visible.len(),
        favorite_count,
        if theme_dark { "dark" } else { "light" }
    );
    for photo in &visible {
        let marker = if session.with_state(|state| state.is_favorite(&photo.id)) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:>4}  {:<28} {:>5}x{:<5} {}",
            photo.id,
            photo.author,
            photo.width,
            photo.height,
            SizeBucket::classify(photo.area())
        );
    }

    session.flush_writes().await;
    Ok(())
}
