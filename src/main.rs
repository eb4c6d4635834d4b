//! tracksplit command line front end.
//!
//! One invocation = one request:
//! 1. evict stale session directories under the work dir
//! 2. create a fresh session directory, stage the source (and cover)
//! 3. parse the tracklist
//! 4. split + encode + tag every track
//! 5. print a JSON manifest on stdout (logs go to stderr)

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracksplit::core::codec::{Bitrate, SymphoniaLame};
use tracksplit::core::types::AlbumMetadata;
use tracksplit::core::{parse_tracklist_detailed, split_and_tag};
use tracksplit::manifest::Manifest;
use tracksplit::session::{Session, evict_stale};

/// Command-line arguments for tracksplit
#[derive(Parser, Debug)]
#[command(name = "tracksplit")]
#[command(about = "Split one audio file into tagged MP3 tracks using a timestamped tracklist")]
#[command(version)]
struct Args {
    /// Source audio file
    audio: PathBuf,

    /// Tracklist text file ("-" reads stdin)
    #[arg(short, long, env = "TRACKSPLIT_TRACKLIST")]
    tracklist: PathBuf,

    /// Cover image embedded into every track
    #[arg(short, long, env = "TRACKSPLIT_COVER")]
    cover: Option<PathBuf>,

    #[arg(long, env = "TRACKSPLIT_ARTIST")]
    artist: Option<String>,

    /// Defaults to --artist
    #[arg(long, env = "TRACKSPLIT_ALBUM_ARTIST")]
    album_artist: Option<String>,

    #[arg(long, env = "TRACKSPLIT_ALBUM")]
    album: Option<String>,

    #[arg(long, env = "TRACKSPLIT_YEAR")]
    year: Option<i32>,

    /// MP3 bitrate, e.g. 192 or 192k
    #[arg(short, long, default_value = "192k", env = "TRACKSPLIT_BITRATE")]
    bitrate: Bitrate,

    /// Directory holding per-run session directories
    #[arg(short, long, default_value = "temp", env = "TRACKSPLIT_WORK_DIR")]
    work_dir: PathBuf,

    /// Session directories older than this are removed before each run
    #[arg(long, default_value = "6", env = "TRACKSPLIT_MAX_AGE_HOURS")]
    max_age_hours: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracksplit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let started = Instant::now();
    info!("=== begin split ===");
    info!(
        artist = ?args.artist,
        album = ?args.album,
        year = ?args.year,
        audio = %args.audio.display(),
        "parameters"
    );

    evict_stale(&args.work_dir, max_age(args.max_age_hours));

    let session = Session::create(&args.work_dir)
        .with_context(|| format!("failed to create session under {}", args.work_dir.display()))?;

    let source = session
        .stage(&args.audio, &file_name(&args.audio)?)
        .context("failed to stage source audio")?;

    let cover = match &args.cover {
        Some(path) => stage_cover(&session, path)?,
        None => None,
    };

    let text = read_tracklist(&args.tracklist)?;
    let parsed = parse_tracklist_detailed(&text);
    info!(
        tracks = parsed.tracks.len(),
        skipped = parsed.skipped(),
        "tracklist parsed"
    );

    let album = AlbumMetadata {
        album_artist: args.album_artist.clone().or_else(|| args.artist.clone()),
        artist: args.artist.clone(),
        album: args.album.clone(),
        year: args.year,
        cover: cover.clone(),
    };

    let report = split_and_tag(
        &SymphoniaLame,
        &source,
        session.dir(),
        &parsed.tracks,
        &album,
        args.bitrate,
    )
    .context("split failed")?;

    let mut manifest = Manifest::new(&session.id().to_string(), session.dir(), &report.file_names());
    manifest.album = args.album.clone();
    manifest.cover = cover.map(|p| p.display().to_string());
    manifest.year = args.year;

    println!("{}", manifest.to_json()?);

    info!(
        session = %session.id(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "=== end split ==="
    );
    Ok(())
}

/// Eviction age from hours; saturates instead of overflowing on huge values.
fn max_age(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

/// Copy the cover into the session as `cover.<ext>`. A missing cover is not fatal:
/// tracks are produced without artwork.
fn stage_cover(session: &Session, path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        warn!(cover = %path.display(), "cover not found, continuing without artwork");
        return Ok(None);
    }

    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let staged = session
        .stage(path, &format!("cover{ext}"))
        .with_context(|| format!("failed to stage cover {}", path.display()))?;
    Ok(Some(staged))
}

fn file_name(path: &Path) -> Result<String> {
    match path.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => bail!("{} has no file name", path.display()),
    }
}

fn read_tracklist(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read tracklist from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tracklist {}", path.display()))
}
