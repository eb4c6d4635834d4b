//! core/codec/encode.rs
//! Encode a `Segment` to a CBR MP3 file (LAME).

use std::fs;
use std::path::Path;

use mp3lame_encoder::{Builder, DualPcm, FlushNoGap, MonoPcm};

use super::{Bitrate, Segment};
use crate::core::error::CodecError;

/// Samples handed to LAME per call.
const CHUNK_FRAMES: usize = 8192;

pub(super) fn encode_mp3(segment: &Segment<'_>, path: &Path, bitrate: Bitrate) -> Result<(), CodecError> {
    let brate = lame_bitrate(bitrate)?;
    let out_channels: u8 = match segment.channels {
        0 => return Err(CodecError::UnsupportedChannels(0)),
        1 => 1,
        _ => 2,
    };

    let mut builder =
        Builder::new().ok_or_else(|| CodecError::Encode("failed to create LAME encoder".to_string()))?;
    builder
        .set_num_channels(out_channels)
        .map_err(|e| CodecError::Encode(format!("set channels: {e:?}")))?;
    builder
        .set_sample_rate(segment.sample_rate)
        .map_err(|e| CodecError::Encode(format!("set sample rate: {e:?}")))?;
    builder
        .set_brate(brate)
        .map_err(|e| CodecError::Encode(format!("set bitrate: {e:?}")))?;
    let mut encoder = builder
        .build()
        .map_err(|e| CodecError::Encode(format!("init: {e:?}")))?;

    let (left, right) = split_channels(segment);

    let mut mp3: Vec<u8> = Vec::new();
    for start in (0..left.len()).step_by(CHUNK_FRAMES) {
        let end = (start + CHUNK_FRAMES).min(left.len());

        let result = if out_channels == 1 {
            encoder.encode_to_vec(MonoPcm(&left[start..end]), &mut mp3)
        } else {
            let input = DualPcm {
                left: &left[start..end],
                right: &right[start..end],
            };
            encoder.encode_to_vec(input, &mut mp3)
        };
        result.map_err(|e| CodecError::Encode(format!("encode: {e:?}")))?;
    }

    encoder
        .flush_to_vec::<FlushNoGap>(&mut mp3)
        .map_err(|e| CodecError::Encode(format!("flush: {e:?}")))?;

    fs::write(path, &mp3).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn lame_bitrate(bitrate: Bitrate) -> Result<mp3lame_encoder::Bitrate, CodecError> {
    use mp3lame_encoder::Bitrate as B;

    Ok(match bitrate.kbps() {
        8 => B::Kbps8,
        16 => B::Kbps16,
        24 => B::Kbps24,
        32 => B::Kbps32,
        40 => B::Kbps40,
        48 => B::Kbps48,
        64 => B::Kbps64,
        80 => B::Kbps80,
        96 => B::Kbps96,
        112 => B::Kbps112,
        128 => B::Kbps128,
        160 => B::Kbps160,
        192 => B::Kbps192,
        224 => B::Kbps224,
        256 => B::Kbps256,
        320 => B::Kbps320,
        other => return Err(CodecError::UnsupportedBitrate(other)),
    })
}

/// Planar i16 channels. Mono yields (samples, empty); more than two channels are
/// folded down to stereo (even channels left, odd channels right).
fn split_channels(segment: &Segment<'_>) -> (Vec<i16>, Vec<i16>) {
    let chans = usize::from(segment.channels.max(1));
    let frames = segment.frames();

    if chans == 1 {
        return (segment.samples.iter().map(|&s| to_i16(s)).collect(), Vec::new());
    }

    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);

    for frame in segment.samples.chunks_exact(chans) {
        let (mut l, mut r) = (0.0f32, 0.0f32);
        let (mut nl, mut nr) = (0u16, 0u16);
        for (c, &s) in frame.iter().enumerate() {
            if c % 2 == 0 {
                l += s;
                nl += 1;
            } else {
                r += s;
                nr += 1;
            }
        }
        left.push(to_i16(l / f32::from(nl.max(1))));
        right.push(to_i16(r / f32::from(nr.max(1))));
    }

    (left, right)
}

fn to_i16(s: f32) -> i16 {
    (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}
