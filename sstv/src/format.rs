use crate::GetSampleRate;

/// Output format of an encoded signal.
///
/// The signal itself is always mono. `channels` only tells the sinks how many
/// times to write each sample, and `bit_depth` sets the peak amplitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
}

impl AudioFormat {
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    pub const DEFAULT_BIT_DEPTH: u16 = 16;

    pub const fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bit_depth: Self::DEFAULT_BIT_DEPTH,
        }
    }

    pub const fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub const fn with_bit_depth(mut self, bit_depth: u16) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Largest signed value representable with `bit_depth` bits, e.g. 32767
    /// for 16 bit.
    pub fn peak_amplitude(&self) -> f32 {
        if self.bit_depth == 0 {
            0.0
        }
        else {
            (2.0f64.powi(i32::from(self.bit_depth) - 1) - 1.0) as f32
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_RATE)
    }
}

impl GetSampleRate for AudioFormat {
    #[inline]
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
