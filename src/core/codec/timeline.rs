//! In-memory decoded audio, addressable by millisecond offset.

/// Interleaved f32 PCM for a whole source file.
#[derive(Debug, Clone)]
pub struct Timeline {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

/// A borrowed `[start, end)` excerpt of a [`Timeline`].
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub samples: &'a [f32],
    pub sample_rate: u32,
    pub channels: u16,
}

impl Timeline {
    /// `samples` is interleaved; a trailing partial frame is dropped.
    pub fn new(mut samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        let chans = usize::from(channels.max(1));
        samples.truncate(samples.len() - samples.len() % chans);
        Self {
            samples,
            sample_rate,
            channels: channels.max(1),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> u64 {
        (self.samples.len() / usize::from(self.channels)) as u64
    }

    /// Total length in milliseconds (rounded down).
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() * 1000 / u64::from(self.sample_rate)
    }

    /// Slice `[start_ms, end_ms)`, clamped to the timeline.
    ///
    /// `start_ms >= end_ms` gives an empty segment rather than an error.
    pub fn slice(&self, start_ms: u64, end_ms: u64) -> Segment<'_> {
        let total = self.frames();
        let start = self.ms_to_frame(start_ms).min(total);
        let end = self.ms_to_frame(end_ms).min(total).max(start);

        let chans = u64::from(self.channels);
        let (lo, hi) = ((start * chans) as usize, (end * chans) as usize);

        Segment {
            samples: &self.samples[lo..hi],
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    fn ms_to_frame(&self, ms: u64) -> u64 {
        let frames = u128::from(ms) * u128::from(self.sample_rate) / 1000;
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}

impl Segment<'_> {
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.frames() as u64 * 1000 / u64::from(self.sample_rate)
    }
}
