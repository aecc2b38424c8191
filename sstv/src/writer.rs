//! Tone sequencing.
//!
//! Encoders describe a transmission as a sequence of [`Pulse`]s written to a
//! [`WritePulse`]. [`ToneWriter`] synthesizes them into a [`SampleBuffer`],
//! a `Vec<Pulse>` just records them.

use std::time::Duration;

use crate::{
    CHANNEL_HIGH_TONE,
    CHANNEL_LOW_TONE,
    GetSampleRate,
    LEADER_BREAK_TIME,
    LEADER_TIME,
    LEADER_TONE,
    SYNC_TONE,
    VIS_BIT_TIME,
    VIS_HIGH_TONE,
    VIS_LOW_TONE,
    format::AudioFormat,
    modes::VisCode,
    oscillator::Oscillator,
    util::{
        lerp,
        num_samples,
    },
};

/// A tone of `frequency` Hz lasting `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub frequency: f32,
    pub duration: f32,
}

impl Pulse {
    #[inline]
    pub fn new(frequency: f32, duration: f32) -> Self {
        Self {
            frequency,
            duration,
        }
    }

    #[inline]
    pub fn num_samples(&self, sample_rate: u32) -> usize {
        num_samples(self.duration, sample_rate)
    }
}

pub trait WritePulse {
    fn write_pulse(&mut self, pulse: Pulse);

    #[inline]
    fn write(&mut self, frequency: f32, duration: f32) {
        self.write_pulse(Pulse::new(frequency, duration));
    }

    /// Calibration header: leader, break, leader.
    fn write_header(&mut self) {
        self.write(LEADER_TONE, LEADER_TIME);
        self.write(SYNC_TONE, LEADER_BREAK_TIME);
        self.write(LEADER_TONE, LEADER_TIME);
    }

    fn write_bit(&mut self, bit: bool) {
        let frequency = if bit { VIS_HIGH_TONE } else { VIS_LOW_TONE };
        self.write(frequency, VIS_BIT_TIME);
    }

    /// Start bit, 7 data bits LSB first, parity bit, stop bit.
    fn write_vis(&mut self, vis_code: VisCode) {
        self.write(SYNC_TONE, VIS_BIT_TIME);
        for bit in 0..7 {
            self.write_bit(vis_code.get_bit(bit));
        }
        self.write_bit(vis_code.parity());
        self.write(SYNC_TONE, VIS_BIT_TIME);
    }

    /// Writes an intensity in `[0, 1]` as a tone between black (1500 Hz) and
    /// white (2300 Hz).
    #[inline]
    fn write_value(&mut self, value: f32, duration: f32) {
        self.write(lerp(value, CHANNEL_LOW_TONE, CHANNEL_HIGH_TONE), duration);
    }
}

impl<W> WritePulse for &mut W
where
    W: WritePulse + ?Sized,
{
    #[inline]
    fn write_pulse(&mut self, pulse: Pulse) {
        (&mut **self).write_pulse(pulse);
    }
}

impl WritePulse for Vec<Pulse> {
    #[inline]
    fn write_pulse(&mut self, pulse: Pulse) {
        self.push(pulse);
    }
}

/// Mono samples of an encoded transmission.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    format: AudioFormat,
    samples: Vec<f32>,
}

impl SampleBuffer {
    pub fn new(format: AudioFormat) -> Self {
        Self::with_capacity(format, 0)
    }

    pub fn with_capacity(format: AudioFormat, capacity: usize) -> Self {
        Self {
            format,
            samples: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration. Zero if the sample rate is zero.
    pub fn duration(&self) -> Duration {
        if self.format.sample_rate == 0 {
            Duration::ZERO
        }
        else {
            Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.format.sample_rate))
        }
    }
}

impl AsRef<[f32]> for SampleBuffer {
    #[inline]
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}

impl GetSampleRate for SampleBuffer {
    #[inline]
    fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }
}

/// Synthesizes pulses into samples with a single phase-continuous oscillator.
#[derive(Clone, Debug)]
pub struct ToneWriter {
    oscillator: Oscillator,
    buffer: SampleBuffer,
}

impl ToneWriter {
    pub fn new(format: AudioFormat) -> Self {
        Self::with_capacity(format, 0)
    }

    pub fn with_capacity(format: AudioFormat, capacity: usize) -> Self {
        Self {
            oscillator: Oscillator::new(format.sample_rate, format.peak_amplitude()),
            buffer: SampleBuffer::with_capacity(format, capacity),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    #[inline]
    pub fn finish(self) -> SampleBuffer {
        self.buffer
    }
}

impl WritePulse for ToneWriter {
    #[inline]
    fn write_pulse(&mut self, pulse: Pulse) {
        self.buffer
            .samples
            .extend(self.oscillator.signal(pulse.frequency, pulse.duration));
    }
}

impl GetSampleRate for ToneWriter {
    #[inline]
    fn sample_rate(&self) -> u32 {
        self.oscillator.sample_rate()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{
        format::AudioFormat,
        modes::VisCode,
        writer::{
            Pulse,
            ToneWriter,
            WritePulse,
        },
    };

    #[test]
    fn header_is_leader_break_leader() {
        let mut pulses: Vec<Pulse> = vec![];
        pulses.write_header();
        assert_eq!(
            pulses,
            [
                Pulse::new(1900.0, 0.300),
                Pulse::new(1200.0, 0.010),
                Pulse::new(1900.0, 0.300),
            ]
        );
    }

    #[test]
    fn vis_is_framed_by_start_and_stop_bits() {
        let mut pulses: Vec<Pulse> = vec![];
        // 0x2c = 0b0101100
        pulses.write_vis(VisCode::new_unchecked(0x2c));

        let frequencies = pulses.iter().map(|pulse| pulse.frequency).collect::<Vec<_>>();
        assert_eq!(
            frequencies,
            [1200.0, 1300.0, 1300.0, 1100.0, 1100.0, 1300.0, 1100.0, 1300.0, 1100.0, 1200.0]
        );
        assert!(pulses.iter().all(|pulse| pulse.duration == 0.030));
    }

    #[test]
    fn vis_parity_keeps_true_bits_even() {
        for value in 0..0x80 {
            let mut pulses: Vec<Pulse> = vec![];
            pulses.write_vis(VisCode::new_unchecked(value));
            assert_eq!(pulses.len(), 10);

            let ones = pulses[1..9]
                .iter()
                .filter(|pulse| pulse.frequency == 1100.0)
                .count();
            assert_eq!(ones % 2, 0, "vis code {value:#04x}");
        }
    }

    #[test]
    fn value_maps_onto_black_to_white() {
        let mut pulses: Vec<Pulse> = vec![];
        pulses.write_value(0.0, 0.5e-3);
        pulses.write_value(1.0, 0.5e-3);
        pulses.write_value(0.25, 0.5e-3);
        assert_eq!(pulses[0], Pulse::new(1500.0, 0.5e-3));
        assert_eq!(pulses[1], Pulse::new(2300.0, 0.5e-3));
        assert_abs_diff_eq!(pulses[2].frequency, 1700.0);
    }

    #[test]
    fn tone_writer_appends_rounded_samples() {
        let format = AudioFormat::new(8000);
        let mut writer = ToneWriter::new(format);
        writer.write_header();
        // 2400 + 80 + 2400
        assert_eq!(writer.buffer().len(), 4880);

        writer.write(1500.0, 0.2083e-3);
        assert_eq!(writer.buffer().len(), 4882);

        writer.write(1500.0, 0.0);
        let buffer = writer.finish();
        assert_eq!(buffer.len(), 4882);
        assert_eq!(buffer.format(), format);
        assert_abs_diff_eq!(buffer.duration().as_secs_f64(), 0.61025, epsilon = 1e-9);
    }

    #[test]
    fn zero_rate_buffer_has_no_duration() {
        let mut writer = ToneWriter::new(AudioFormat::new(0));
        writer.write_header();
        let buffer = writer.finish();
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration(), std::time::Duration::ZERO);
    }

    #[test]
    fn tone_writer_amplitude_follows_bit_depth() {
        let mut writer = ToneWriter::new(AudioFormat::new(8000).with_bit_depth(8));
        writer.write(2000.0, 0.1);
        let peak = writer
            .finish()
            .samples()
            .iter()
            .fold(0.0f32, |peak, sample| peak.max(sample.abs()));
        assert_abs_diff_eq!(peak, 127.0, epsilon = 1e-3);
    }

    #[test]
    fn writing_through_mutable_reference() {
        fn write_twice(mut writer: impl WritePulse) {
            writer.write(1200.0, 0.001);
            writer.write(1500.0, 0.001);
        }

        let mut pulses: Vec<Pulse> = vec![];
        write_twice(&mut pulses);
        assert_eq!(pulses.len(), 2);
    }
}
