//! core/codec/mod.rs
//! Audio codec capability: decode a whole source once, slice by milliseconds, encode slices.
//!
//! The splitter only talks to [`AudioCodec`]. The default implementation is
//! [`SymphoniaLame`] (Symphonia for decoding, LAME for MP3 encoding); tests plug in
//! an in-memory codec instead.

mod decode;
mod encode;
mod timeline;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use timeline::{Segment, Timeline};

use super::error::CodecError;

/// Decode/encode capability used by the splitter.
pub trait AudioCodec {
    /// Decode the full source into memory.
    fn decode(&self, path: &Path) -> Result<Timeline, CodecError>;

    /// Encode one slice to `path` as MP3.
    fn encode(&self, segment: &Segment<'_>, path: &Path, bitrate: Bitrate) -> Result<(), CodecError>;
}

/// Symphonia decode + LAME encode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaLame;

impl AudioCodec for SymphoniaLame {
    fn decode(&self, path: &Path) -> Result<Timeline, CodecError> {
        decode::decode_file(path)
    }

    fn encode(&self, segment: &Segment<'_>, path: &Path, bitrate: Bitrate) -> Result<(), CodecError> {
        encode::encode_mp3(segment, path, bitrate)
    }
}

/// Constant MP3 bitrate in kbit/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitrate(pub u32);

impl Bitrate {
    pub const DEFAULT: Bitrate = Bitrate(192);

    pub fn kbps(self) -> u32 {
        self.0
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.0)
    }
}

/// Accepts "192" or "192k" (case-insensitive `k`).
impl FromStr for Bitrate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_suffix('k')
            .or_else(|| s.strip_suffix('K'))
            .unwrap_or(s);

        match digits.parse::<u32>() {
            Ok(0) => Err("bitrate must be greater than zero".to_string()),
            Ok(kbps) => Ok(Bitrate(kbps)),
            Err(e) => Err(format!("invalid bitrate {s:?}: {e}")),
        }
    }
}
