//! core/tags/mod.rs
//!
//! ID3 tag writing for produced tracks.
//! Public API:
//! - [`write_track_tags`] writes title/track/artist/album/year/cover onto one file.
//! - [`load_cover`] / [`cover_mime`] read a cover image and derive its MIME type.

mod art;
mod write;

pub use art::{Cover, cover_mime, load_cover};
pub use write::{TrackTags, write_track_tags};
