//! core/tracklist.rs
//! Turn free-text tracklists into ordered `TrackDescriptor`s.
//!
//! Accepted line shapes (timestamp anywhere on the line, first one wins):
//! - "00:00 Intro"
//! - "1:02:03 - Long Track"
//! - "Song Title | 04:15"
//! - "02:15" (no title -> "Track N")
//!
//! Lines without a timestamp are skipped with a warning; they never fail the parse.
//! Timestamps are not range-checked and not required to increase.

use std::sync::LazyLock;
use std::time::Instant;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use super::naming::strip_leading_decoration;
use super::types::{LineOutcome, SkipReason, TrackDescriptor, TracklistParse};

/// `[[hours:]minutes:]seconds`, minutes and seconds required.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?P<h>[0-9]+):)?(?P<m>[0-9]+):(?P<s>[0-9]+)")
        .expect("timestamp pattern is valid")
});

/// Parse a tracklist into descriptors. Convenience over [`parse_tracklist_detailed`].
pub fn parse_tracklist(text: &str) -> Vec<TrackDescriptor> {
    parse_tracklist_detailed(text).tracks
}

/// Parse a tracklist, keeping a per-line record of what was accepted or skipped.
///
/// Only the first timestamp on a line is removed from the title; any later timestamp
/// stays in the title text ("00:30 Live at 9:45 pm" -> "Live at 9:45 pm").
pub fn parse_tracklist_detailed(text: &str) -> TracklistParse {
    let started = Instant::now();
    let mut out = TracklistParse::default();

    let lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    for (idx, line) in lines.enumerate() {
        let line_no = idx + 1;

        let Some(caps) = TIMESTAMP.captures(line) else {
            warn!(line = line_no, text = line, "line skipped (no timestamp)");
            out.lines.push(skipped(line_no, line, SkipReason::NoTimestamp));
            continue;
        };

        let Some(start_ms) = timestamp_ms(&caps) else {
            warn!(line = line_no, text = line, "line skipped (timestamp out of range)");
            out.lines.push(skipped(line_no, line, SkipReason::TimestampOverflow));
            continue;
        };

        // Group 0 is the whole match.
        let span = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        let remainder = format!("{}{}", &line[..span.start], &line[span.end..]);
        let title = title_from_remainder(&remainder);

        let track_no = out.tracks.len() + 1;
        let title = if title.is_empty() {
            format!("Track {track_no}")
        } else {
            title
        };

        debug!(track = track_no, %title, start_ms, "track accepted");

        out.lines.push(LineOutcome::Accepted {
            line: line_no,
            track: out.tracks.len(),
        });
        out.tracks.push(TrackDescriptor {
            title,
            start_ms,
            end_ms: None,
        });
    }

    link_track_ends(&mut out.tracks);

    debug!(
        tracks = out.tracks.len(),
        skipped = out.skipped(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "tracklist parsed"
    );
    out
}

/// Each track ends where the next one starts; the last one runs to the end of the source.
fn link_track_ends(tracks: &mut [TrackDescriptor]) {
    let next_starts: Vec<Option<u64>> = tracks
        .iter()
        .skip(1)
        .map(|t| Some(t.start_ms))
        .chain(std::iter::once(None))
        .collect();

    for (track, end) in tracks.iter_mut().zip(next_starts) {
        track.end_ms = end;
    }
}

/// `((h*60 + m)*60 + s) * 1000`, or `None` on overflow.
fn timestamp_ms(caps: &Captures<'_>) -> Option<u64> {
    let field = |name: &str| -> Option<u64> {
        match caps.name(name) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let h = field("h")?;
    let m = field("m")?;
    let s = field("s")?;

    h.checked_mul(60)?
        .checked_add(m)?
        .checked_mul(60)?
        .checked_add(s)?
        .checked_mul(1000)
}

/// Strip separator decoration left around the removed timestamp.
fn title_from_remainder(remainder: &str) -> String {
    let trimmed = remainder.trim_matches(|c: char| c == ' ' || c == '-');
    strip_leading_decoration(trimmed).trim().to_string()
}

fn skipped(line: usize, text: &str, reason: SkipReason) -> LineOutcome {
    LineOutcome::Skipped {
        line,
        text: text.to_string(),
        reason,
    }
}
