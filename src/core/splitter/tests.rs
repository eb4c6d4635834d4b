use std::cell::RefCell;
use std::fs;
use std::path::Path;

use id3::{Tag, TagLike};

use super::*;
use crate::core::codec::{Segment, Timeline};
use crate::core::error::{CodecError, TagError};
use crate::core::naming::display_title;
use crate::core::tracklist::parse_tracklist;

/// In-memory codec: 1 frame per millisecond, mono.
/// Encoding writes a tiny fake MP3 and records what it was asked to encode.
#[derive(Default)]
struct FakeCodec {
    duration_ms: u64,
    fail_decode: bool,
    fail_encode_at: Option<String>,
    /// File names for which `encode` "succeeds" without creating the file.
    skip_write: Vec<String>,
    encoded: RefCell<Vec<(String, usize)>>,
}

impl FakeCodec {
    fn with_duration(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    fn encoded(&self) -> Vec<(String, usize)> {
        self.encoded.borrow().clone()
    }
}

impl AudioCodec for FakeCodec {
    fn decode(&self, path: &Path) -> Result<Timeline, CodecError> {
        if self.fail_decode {
            return Err(CodecError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad source"),
            });
        }
        Ok(Timeline::new(vec![0.0; self.duration_ms as usize], 1000, 1))
    }

    fn encode(&self, segment: &Segment<'_>, path: &Path, _bitrate: Bitrate) -> Result<(), CodecError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if self.fail_encode_at.as_deref() == Some(name.as_str()) {
            return Err(CodecError::Encode("boom".to_string()));
        }

        self.encoded.borrow_mut().push((name.clone(), segment.frames()));

        if !self.skip_write.contains(&name) {
            fs::write(path, [0xFFu8, 0xFB, 0x90, 0x00]).map_err(|source| CodecError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

fn run(
    codec: &FakeCodec,
    dir: &Path,
    tracks: &[TrackDescriptor],
    album: &AlbumMetadata,
) -> Result<SplitReport, SplitError> {
    split_and_tag(
        codec,
        &dir.join("source.wav"),
        dir,
        tracks,
        album,
        Bitrate::default(),
    )
}

fn read_tag(dir: &Path, name: &str) -> Tag {
    Tag::read_from_path(dir.join(name)).expect("read tag")
}

#[test]
fn produces_one_file_per_track_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(240_000);
    let tracks = parse_tracklist("00:00 Intro\n01:30 Track Two\n03:00 Outro");

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    assert_eq!(
        report.file_names(),
        ["01 - Intro.mp3", "02 - Track Two.mp3", "03 - Outro.mp3"]
    );
    assert_eq!(report.source_duration_ms, 240_000);
    assert_eq!(report.tag_failures(), 0);

    // Last track runs to the end of the source.
    assert_eq!(
        codec.encoded(),
        vec![
            ("01 - Intro.mp3".to_string(), 90_000),
            ("02 - Track Two.mp3".to_string(), 90_000),
            ("03 - Outro.mp3".to_string(), 60_000),
        ]
    );
    assert_eq!(report.outcomes[2].end_ms, 240_000);

    for name in report.file_names() {
        assert!(dir.path().join(&name).is_file(), "{name} missing");
    }
}

#[test]
fn title_and_track_number_are_always_tagged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(10_000);
    let tracks = parse_tracklist("00:00 - First\n00:05");

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    let first = read_tag(dir.path(), &report.outcomes[0].file_name);
    assert_eq!(first.title(), Some("First"));
    assert_eq!(first.track(), Some(1));
    assert_eq!(first.artist(), None);

    let second = read_tag(dir.path(), &report.outcomes[1].file_name);
    assert_eq!(second.title(), Some("Track 2"));
    assert_eq!(second.track(), Some(2));
}

#[test]
fn artist_only_metadata() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(10_000);
    let tracks = parse_tracklist("00:00 Only");
    let album = AlbumMetadata {
        artist: Some("Somebody".to_string()),
        ..AlbumMetadata::default()
    };

    let report = run(&codec, dir.path(), &tracks, &album).expect("split");
    assert_eq!(report.tag_failures(), 0);

    let tag = read_tag(dir.path(), "01 - Only.mp3");
    assert_eq!(tag.artist(), Some("Somebody"));
    assert_eq!(tag.album(), None);
    assert!(tag.get("TDRC").is_none());
    assert_eq!(tag.pictures().count(), 0);
}

#[test]
fn full_album_metadata_with_cover() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cover = dir.path().join("cover.png");
    fs::write(&cover, b"\x89PNG fake").expect("cover");

    let codec = FakeCodec::with_duration(10_000);
    let tracks = parse_tracklist("00:00 A\n00:04 B");
    let album = AlbumMetadata {
        artist: Some("Band".to_string()),
        album_artist: Some("Band".to_string()),
        album: Some("Record".to_string()),
        year: Some(2024),
        cover: Some(cover),
    };

    let report = run(&codec, dir.path(), &tracks, &album).expect("split");
    assert_eq!(report.tag_failures(), 0);

    for outcome in &report.outcomes {
        let tag = read_tag(dir.path(), &outcome.file_name);
        assert_eq!(tag.album(), Some("Record"));
        assert_eq!(tag.album_artist(), Some("Band"));
        let pics: Vec<_> = tag.pictures().collect();
        assert_eq!(pics.len(), 1);
        assert_eq!(pics[0].mime_type, "image/png");
    }
}

#[test]
fn missing_cover_does_not_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(5_000);
    let tracks = parse_tracklist("00:00 Solo");
    let album = AlbumMetadata {
        cover: Some(dir.path().join("gone.jpg")),
        ..AlbumMetadata::default()
    };

    let report = run(&codec, dir.path(), &tracks, &album).expect("split");
    assert_eq!(report.tag_failures(), 0);

    let tag = read_tag(dir.path(), "01 - Solo.mp3");
    assert_eq!(tag.pictures().count(), 0);
}

#[test]
fn tag_failure_is_recorded_and_batch_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec {
        duration_ms: 10_000,
        skip_write: vec!["01 - Broken.mp3".to_string()],
        ..FakeCodec::default()
    };
    let tracks = parse_tracklist("00:00 Broken\n00:05 Fine");

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    assert_eq!(report.file_names(), ["01 - Broken.mp3", "02 - Fine.mp3"]);
    assert_eq!(report.tag_failures(), 1);
    assert!(matches!(report.outcomes[0].tagging, Err(TagError::Read(_))));
    assert!(report.outcomes[1].tagging.is_ok());
    assert_eq!(read_tag(dir.path(), "02 - Fine.mp3").title(), Some("Fine"));
}

#[test]
fn decode_failure_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec {
        fail_decode: true,
        ..FakeCodec::default()
    };
    let tracks = parse_tracklist("00:00 A");

    let err = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect_err("decode");
    assert!(matches!(err, SplitError::Decode(_)));
    assert!(codec.encoded().is_empty());
}

#[test]
fn encode_failure_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec {
        duration_ms: 10_000,
        fail_encode_at: Some("02 - B.mp3".to_string()),
        ..FakeCodec::default()
    };
    let tracks = parse_tracklist("00:00 A\n00:03 B\n00:06 C");

    let err = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect_err("encode");
    assert!(matches!(err, SplitError::Encode { index: 2, .. }));
    assert_eq!(codec.encoded().len(), 1);
}

#[test]
fn empty_tracklist_produces_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(10_000);

    let report = run(&codec, dir.path(), &[], &AlbumMetadata::default()).expect("split");
    assert!(report.file_names().is_empty());
}

#[test]
fn out_of_order_timestamps_yield_empty_slices() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(300_000);
    let tracks = parse_tracklist("02:00 Late\n01:00 Early");

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    // [120000, 60000) is degenerate and passed through as an empty slice.
    assert_eq!(report.outcomes[0].start_ms, 120_000);
    assert_eq!(report.outcomes[0].end_ms, 60_000);
    assert_eq!(
        codec.encoded(),
        vec![
            ("01 - Late.mp3".to_string(), 0),
            ("02 - Early.mp3".to_string(), 240_000),
        ]
    );
}

#[test]
fn titles_are_sanitized_for_file_names_but_not_tags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(5_000);
    let tracks = vec![TrackDescriptor {
        title: "- What? / Why:".to_string(),
        start_ms: 0,
        end_ms: None,
    }];

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    assert_eq!(report.file_names(), ["01 - What  Why.mp3"]);
    let tag = read_tag(dir.path(), "01 - What  Why.mp3");
    assert_eq!(tag.title(), Some("What? / Why:"));
}

#[test]
fn display_titles_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let codec = FakeCodec::with_duration(60_000);
    let tracks = parse_tracklist("00:00 Intro\n00:10 Artist - Song\n00:20 Track Three");

    let report = run(&codec, dir.path(), &tracks, &AlbumMetadata::default()).expect("split");

    let names = report.file_names();
    let displayed: Vec<&str> = names.iter().map(|n| display_title(n)).collect();
    assert_eq!(displayed, ["Intro", "Artist - Song", "Track Three"]);
}
