//! core/mod.rs
//!
//! The brain of the crate:
//! - Parse a free-text tracklist into time ranges
//! - Decode the source once, slice it, encode each slice to MP3
//! - Tag every produced file (title, track number, album fields, cover)
//!
//! The pipeline is explicit and modular:
//!   (A) text -> Vec<TrackDescriptor>          (`tracklist`)
//!   (B) descriptors + audio -> SplitReport    (`splitter`, via `codec` + `tags`)
//!
//! Everything here is synchronous and single-threaded; callers isolate
//! concurrent requests by giving each its own output directory.

pub mod codec;
pub mod error;
pub mod naming;
pub mod splitter;
pub mod tags;
pub mod tracklist;
pub mod types;

use std::path::Path;

use codec::Bitrate;
use error::SplitError;
use types::{AlbumMetadata, TrackDescriptor};

pub use splitter::split_and_tag;
pub use tracklist::{parse_tracklist, parse_tracklist_detailed};

/// Convenience: parse + split with the default Symphonia/LAME codec and
/// return the produced file names.
pub fn split_tracklist(
    source: &Path,
    output_dir: &Path,
    tracklist: &str,
    album: &AlbumMetadata,
    bitrate: Bitrate,
) -> Result<Vec<String>, SplitError> {
    let tracks: Vec<TrackDescriptor> = parse_tracklist(tracklist);
    let report = split_and_tag(
        &codec::SymphoniaLame,
        source,
        output_dir,
        &tracks,
        album,
        bitrate,
    )?;
    Ok(report.file_names())
}
