//! tracksplit
//!
//! # What this crate is
//! Split one long audio file (a DJ mix, a full album rip, a live set) into one tagged
//! MP3 per track, driven by a human-written tracklist such as:
//!
//! ```text
//! 00:00 Intro
//! 01:30 - Track Two
//! 1:03:00 | Outro
//! ```
//!
//! # Layout
//! - [`core`]: tracklist parsing, slicing/encoding, ID3 tagging (the interesting part)
//! - [`session`]: per-request working directories and their eviction
//! - [`manifest`]: the JSON summary handed back to whoever asked for the split
//!
//! The `tracksplit` binary wires these together for command line use.

pub mod core;
pub mod manifest;
pub mod session;
