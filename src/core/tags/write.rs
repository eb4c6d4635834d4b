//! Write ID3 tags onto a freshly encoded track.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};

use super::art::load_cover;
use crate::core::error::TagError;

/// Everything we put into one file's tag.
#[derive(Debug, Clone, Default)]
pub struct TrackTags<'a> {
    pub title: &'a str,
    pub track_number: u32,
    pub artist: Option<&'a str>,
    pub album_artist: Option<&'a str>,
    pub album: Option<&'a str>,
    pub year: Option<i32>,
    pub cover: Option<&'a Path>,
}

/// Helper: set a plain text frame (T***) only when a non-blank value was supplied.
fn set_text_opt(tag: &mut Tag, id: &str, v: Option<&str>) {
    if let Some(s) = v.map(str::trim).filter(|s| !s.is_empty()) {
        tag.set_text(id, s.to_string());
    }
}

/// Open the file's tag, or start a fresh one when the file has none.
///
/// Any other read failure (I/O, corrupt header) is reported rather than silently
/// replaced, so we never clobber a tag we could not parse.
fn open_tag(path: &Path) -> Result<Tag, TagError> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(Tag::new()),
        Err(e) => Err(TagError::Read(e)),
    }
}

/// Write tags for a single file.
///
/// - Title and track number are always written.
/// - Optional fields are written only when supplied (blank counts as missing,
///   as does a year of 0).
/// - The cover is skipped when its path does not exist at call time.
pub fn write_track_tags(path: &Path, tags: &TrackTags<'_>) -> Result<(), TagError> {
    let mut tag = open_tag(path)?;

    tag.set_title(tags.title);
    tag.set_track(tags.track_number);

    set_text_opt(&mut tag, "TPE1", tags.artist); // artist
    set_text_opt(&mut tag, "TPE2", tags.album_artist); // album artist
    set_text_opt(&mut tag, "TALB", tags.album); // album

    if let Some(y) = tags.year.filter(|&y| y != 0) {
        tag.set_text("TDRC", y.to_string());
    }

    if let Some(cover) = tags.cover.map(load_cover).transpose()?.flatten() {
        let _ = tag.add_frame(Picture {
            mime_type: cover.mime,
            picture_type: PictureType::CoverFront,
            description: "Cover".to_string(),
            data: cover.data,
        });
    }

    tag.write_to_path(path, Version::Id3v24)
        .map_err(TagError::Write)
}
