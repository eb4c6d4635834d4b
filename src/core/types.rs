//! Core data types shared between the parser, the splitter and the front end.
//!
//! Rule of thumb:
//! - These structs should be "boring bags of data"
//! - No filesystem code
//! - No codec code
//! - No tag writing code
//!
//! `TrackDescriptor` represents ONE parsed tracklist line: a title plus the time range
//! it covers in the source audio.

use std::path::PathBuf;

use super::error::TagError;

/// One parsed track: title + `[start_ms, end_ms)` in the source audio.
///
/// `end_ms == None` means "to the end of the source".
/// Within a parsed sequence, `end_ms` is always copied from the next track's `start_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    /// Never empty. Falls back to "Track N" when the line had no title text.
    pub title: String,

    /// Start offset in milliseconds.
    pub start_ms: u64,

    /// End offset in milliseconds, or `None` for the last track.
    pub end_ms: Option<u64>,
}

/// What happened to one non-blank tracklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Line produced the track at `track` (0-based index into `TracklistParse::tracks`).
    Accepted { line: usize, track: usize },
    /// Line was dropped. Not an error.
    Skipped {
        line: usize,
        text: String,
        reason: SkipReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoTimestamp,
    TimestampOverflow,
}

/// Full parser output: tracks + per-line record (1-based line numbers over non-blank lines).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracklistParse {
    pub tracks: Vec<TrackDescriptor>,
    pub lines: Vec<LineOutcome>,
}

impl TracklistParse {
    pub fn skipped(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, LineOutcome::Skipped { .. }))
            .count()
    }
}

/// Album-level metadata applied uniformly to every produced track.
///
/// We use Option because every field is optional; empty strings are
/// treated the same as `None` when tagging.
#[derive(Debug, Clone, Default)]
pub struct AlbumMetadata {
    /// ID3 Artist (TPE1)
    pub artist: Option<String>,

    /// ID3 Album artist (TPE2)
    pub album_artist: Option<String>,

    /// ID3 Album (TALB)
    pub album: Option<String>,

    /// Release year (TDRC)
    pub year: Option<i32>,

    /// Cover image on disk. Checked for existence at tagging time, per track.
    pub cover: Option<PathBuf>,
}

/// Result for one produced file.
#[derive(Debug)]
pub struct TrackOutcome {
    /// 1-based position in the tracklist.
    pub index: usize,

    /// Title written into TIT2.
    pub title: String,

    /// File name inside the output directory.
    pub file_name: String,

    pub start_ms: u64,

    /// Effective end (source duration for the last track).
    pub end_ms: u64,

    /// Tagging is best-effort: the file exists either way.
    pub tagging: Result<(), TagError>,
}

/// Aggregate result of a split-and-tag run.
#[derive(Debug, Default)]
pub struct SplitReport {
    pub source_duration_ms: u64,
    pub outcomes: Vec<TrackOutcome>,
}

impl SplitReport {
    /// Produced file names, in tracklist order.
    pub fn file_names(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.file_name.clone()).collect()
    }

    /// Number of files that were encoded but could not be (fully) tagged.
    pub fn tag_failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.tagging.is_err()).count()
    }
}
