//! Error types for the split/tag pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures from the audio codec capability (decode or encode).
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised container format: {0}")]
    UnknownFormat(#[source] symphonia::core::errors::Error),

    #[error("no supported audio track found")]
    NoTrack,

    #[error("decoder init failed: {0}")]
    DecoderInit(#[source] symphonia::core::errors::Error),

    #[error("decode error: {0}")]
    Decode(#[source] symphonia::core::errors::Error),

    #[error("unsupported bitrate {0} kbit/s")]
    UnsupportedBitrate(u32),

    #[error("unsupported channel layout ({0} channels)")]
    UnsupportedChannels(u16),

    #[error("MP3 encoder error: {0}")]
    Encode(String),

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while building or saving an ID3 tag. Never fatal for a batch.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read existing tag: {0}")]
    Read(#[source] id3::Error),

    #[error("failed to read cover {path:?}: {source}")]
    Cover {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write tag: {0}")]
    Write(#[source] id3::Error),
}

/// Request-level failures. Anything here aborts the whole split.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("failed to decode source audio: {0}")]
    Decode(#[source] CodecError),

    #[error("failed to encode track {index} ({file_name}): {source}")]
    Encode {
        index: usize,
        file_name: String,
        #[source]
        source: CodecError,
    },
}
