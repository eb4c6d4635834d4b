//! core/codec/decode.rs
//! Decode a whole file (Symphonia) into an in-memory `Timeline`.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, SampleBuffer, Signal, SignalSpec};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use super::Timeline;
use crate::core::error::CodecError;

pub(super) fn decode_file(path: &Path) -> Result<Timeline, CodecError> {
    let file = File::open(path).map_err(|source| CodecError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let detected = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(CodecError::UnknownFormat)?;

    let mut format = detected.format;

    let track = format
        .default_track()
        .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(CodecError::NoTrack)?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(CodecError::DecoderInit)?;

    // Fallbacks until the first decoded buffer tells us the real spec.
    let mut sample_rate = codec_params.sample_rate.unwrap_or(44_100);
    let mut channels = codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(2);

    let mut samples: Vec<f32> = Vec::new();
    let mut skipped_packets: usize = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            // End of stream.
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(CodecError::Decode(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::IoError(_)) => break,
            Err(SymphoniaError::DecodeError(_)) => {
                // Corrupt packet; skip.
                skipped_packets += 1;
                continue;
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(CodecError::Decode(e)),
        };

        let spec = SignalSpec::new(decoded.spec().rate, decoded.spec().channels);
        sample_rate = spec.rate;
        channels = spec.channels.count() as u16;

        append_interleaved(decoded, spec, &mut samples);
    }

    if skipped_packets > 0 {
        warn!(path = %path.display(), skipped_packets, "corrupt packets skipped while decoding");
    }

    let timeline = Timeline::new(samples, sample_rate, channels);
    debug!(
        path = %path.display(),
        sample_rate,
        channels,
        duration_ms = timeline.duration_ms(),
        "source decoded"
    );
    Ok(timeline)
}

fn append_interleaved(decoded: AudioBufferRef<'_>, spec: SignalSpec, out: &mut Vec<f32>) {
    let frames = decoded.frames();
    let chans = spec.channels.count();

    match decoded {
        AudioBufferRef::F32(buf) => {
            out.reserve(frames * chans);
            for f in 0..frames {
                for c in 0..chans {
                    out.push(buf.chan(c)[f]);
                }
            }
        }
        other => {
            let mut sbuf = SampleBuffer::<f32>::new(frames as u64, spec);
            sbuf.copy_interleaved_ref(other);
            out.extend_from_slice(sbuf.samples());
        }
    }
}
