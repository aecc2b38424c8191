use std::f64::consts::TAU;

use crate::{
    GetSampleRate,
    util::num_samples,
};

#[inline]
fn step_from_frequency_and_sample_rate(frequency: f32, sample_rate: u32) -> f64 {
    TAU * f64::from(frequency) / f64::from(sample_rate)
}

/// Phase-continuous sine oscillator.
///
/// The frequency is chosen per sample, and the phase carries over between
/// calls, so consecutive tones of different frequencies join without a jump.
/// The phase is kept in `[0, 2π)`.
#[derive(Clone, Copy, Debug)]
pub struct Oscillator {
    sample_rate: u32,
    amplitude: f32,
    phase: f64,
}

impl Oscillator {
    pub fn new(sample_rate: u32, amplitude: f32) -> Self {
        Self {
            sample_rate,
            amplitude,
            phase: 0.0,
        }
    }

    #[inline]
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Advances the phase by one sample at `frequency` and returns the new
    /// value.
    #[inline]
    pub fn sample(&mut self, frequency: f32) -> f32 {
        self.phase += step_from_frequency_and_sample_rate(frequency, self.sample_rate);
        if self.phase >= TAU || self.phase < 0.0 {
            self.phase = self.phase.rem_euclid(TAU);
        }
        (self.phase.sin() as f32) * self.amplitude
    }

    /// Lazily produces a tone of `frequency` lasting `duration` seconds.
    pub fn signal(&mut self, frequency: f32, duration: f32) -> Signal<'_> {
        let remaining = num_samples(duration, self.sample_rate);
        Signal {
            oscillator: self,
            frequency,
            remaining,
        }
    }
}

impl GetSampleRate for Oscillator {
    #[inline]
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Samples of a single tone, see [`Oscillator::signal`].
#[derive(Debug)]
pub struct Signal<'a> {
    oscillator: &'a mut Oscillator,
    frequency: f32,
    remaining: usize,
}

impl Iterator for Signal<'_> {
    type Item = f32;

    #[inline]
    fn next(&mut self) -> Option<f32> {
        if self.remaining > 0 {
            self.remaining -= 1;
            Some(self.oscillator.sample(self.frequency))
        }
        else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Signal<'_> {}
