//! core/splitter.rs
//! Slice a decoded source at tracklist boundaries, encode each slice, tag each file.
//!
//! Failure policy:
//! - decode failure: fatal, nothing is returned
//! - encode failure: fatal (the batch stops at that track)
//! - tag failure: logged, recorded on the track's outcome, batch continues

use std::path::Path;
use std::time::Instant;

use tracing::{debug, error, info};

use super::codec::{AudioCodec, Bitrate};
use super::error::SplitError;
use super::naming::{clean_title, track_file_name};
use super::tags::{TrackTags, write_track_tags};
use super::types::{AlbumMetadata, SplitReport, TrackDescriptor, TrackOutcome};

/// Split `source` into one MP3 per descriptor inside `output_dir`, then tag each file.
///
/// Returns one outcome per descriptor, in order. Degenerate ranges
/// (`start >= end`) are not corrected: they become empty slices and are handed
/// to the codec as-is.
pub fn split_and_tag<C: AudioCodec + ?Sized>(
    codec: &C,
    source: &Path,
    output_dir: &Path,
    tracks: &[TrackDescriptor],
    album: &AlbumMetadata,
    bitrate: Bitrate,
) -> Result<SplitReport, SplitError> {
    let started = Instant::now();
    info!(source = %source.display(), tracks = tracks.len(), %bitrate, "loading source audio");

    let timeline = codec.decode(source).map_err(SplitError::Decode)?;
    let total_ms = timeline.duration_ms();
    info!(duration_s = total_ms as f64 / 1000.0, "source decoded");

    let mut report = SplitReport {
        source_duration_ms: total_ms,
        outcomes: Vec::with_capacity(tracks.len()),
    };

    for (i, track) in tracks.iter().enumerate() {
        let index = i + 1;
        let start_ms = track.start_ms;
        let end_ms = track.end_ms.unwrap_or(total_ms);

        info!(
            track = index,
            start_ms,
            end_ms,
            duration_s = (end_ms as f64 - start_ms as f64) / 1000.0,
            "slicing"
        );

        let title = clean_title(&track.title);
        let file_name = track_file_name(index, &title);
        let out_path = output_dir.join(&file_name);

        let segment = timeline.slice(start_ms, end_ms);
        let encode_started = Instant::now();
        codec
            .encode(&segment, &out_path, bitrate)
            .map_err(|source| SplitError::Encode {
                index,
                file_name: file_name.clone(),
                source,
            })?;
        debug!(
            file = %file_name,
            elapsed_ms = encode_started.elapsed().as_secs_f64() * 1000.0,
            "exported"
        );

        let tag_started = Instant::now();
        let tagging = write_track_tags(&out_path, &track_tags(&title, index, album));
        match &tagging {
            Ok(()) => debug!(
                file = %file_name,
                elapsed_ms = tag_started.elapsed().as_secs_f64() * 1000.0,
                "tagged"
            ),
            Err(e) => error!(file = %file_name, error = %e, "failed to tag"),
        }

        report.outcomes.push(TrackOutcome {
            index,
            title,
            file_name,
            start_ms,
            end_ms,
            tagging,
        });
    }

    info!(
        files = report.outcomes.len(),
        tag_failures = report.tag_failures(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "split and tag completed"
    );
    Ok(report)
}

fn track_tags<'a>(title: &'a str, index: usize, album: &'a AlbumMetadata) -> TrackTags<'a> {
    TrackTags {
        title,
        track_number: u32::try_from(index).unwrap_or(u32::MAX),
        artist: album.artist.as_deref(),
        album_artist: album.album_artist.as_deref(),
        album: album.album.as_deref(),
        year: album.year,
        cover: album.cover.as_deref(),
    }
}

#[cfg(test)]
mod tests;
