use std::time::Duration;

use crate::{
    GetSampleRate,
    LEADER_BREAK_TIME,
    LEADER_TIME,
    VIS_BIT_TIME,
    format::AudioFormat,
    image::FrameBuffer,
    modes::{
        Mode,
        Protocol,
        Resolution,
        VisCode,
    },
    protocol::Timing,
    util::num_samples,
    writer::{
        Pulse,
        SampleBuffer,
        ToneWriter,
        WritePulse,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("{protocol} has no mode with vis code {vis_code}")]
    InvalidMode {
        protocol: Protocol,
        vis_code: VisCode,
    },
    #[error("image is {actual}, but {expected} is required")]
    DimensionMismatch {
        expected: Resolution,
        actual: Resolution,
    },
    #[error("can't synthesize {format:?}: sample rate and channels must be non-zero")]
    UnsupportedFormat {
        format: AudioFormat,
    },
}

/// Encodes images in one mode of one protocol.
///
/// The encoder holds no state between calls. Each [`encode`][Self::encode]
/// creates its own oscillator and buffer, so one encoder can be shared between
/// threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SstvEncoder {
    protocol: Protocol,
    vis_code: VisCode,
    format: AudioFormat,
}

impl SstvEncoder {
    /// Creates an encoder for `protocol` sending `vis_code`.
    ///
    /// A VIS code the protocol doesn't define is only reported when encoding.
    pub fn new(protocol: Protocol, vis_code: VisCode, format: AudioFormat) -> Self {
        Self {
            protocol,
            vis_code,
            format,
        }
    }

    pub fn from_mode(mode: Mode, format: AudioFormat) -> Self {
        Self::new(mode.protocol(), mode.vis_code(), format)
    }

    #[inline]
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    #[inline]
    pub fn vis_code(&self) -> VisCode {
        self.vis_code
    }

    #[inline]
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Standard resolution of the protocol.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.protocol.resolution()
    }

    pub fn mode(&self) -> Result<Mode, EncodeError> {
        Mode::from_vis_code(self.vis_code)
            .filter(|mode| mode.protocol() == self.protocol)
            .ok_or_else(|| self.invalid_mode())
    }

    pub fn timing(&self) -> Result<Timing, EncodeError> {
        self.protocol
            .timing(self.vis_code)
            .ok_or_else(|| self.invalid_mode())
    }

    /// Checks that the audio format can be synthesized.
    pub fn check_format(&self) -> Result<(), EncodeError> {
        if self.format.sample_rate == 0 || self.format.channels == 0 {
            Err(EncodeError::UnsupportedFormat {
                format: self.format,
            })
        }
        else {
            Ok(())
        }
    }

    fn invalid_mode(&self) -> EncodeError {
        EncodeError::InvalidMode {
            protocol: self.protocol,
            vis_code: self.vis_code,
        }
    }

    /// Checks that a frame has the standard resolution.
    ///
    /// [`encode`][Self::encode] accepts frames of any size and scans exactly
    /// the frame's bounds, which most decoders won't be able to follow.
    pub fn check_dimensions<F>(&self, frame_buffer: &F) -> Result<(), EncodeError>
    where
        F: FrameBuffer + ?Sized,
    {
        let expected = self.resolution();
        let actual = Resolution::of(frame_buffer);
        if expected == actual {
            Ok(())
        }
        else {
            Err(EncodeError::DimensionMismatch { expected, actual })
        }
    }

    /// Nominal length of the transmission of a frame with `resolution`,
    /// including header and VIS code.
    pub fn transmission_time(&self, resolution: Resolution) -> Result<Duration, EncodeError> {
        let timing = self.timing()?;
        let header = 2.0 * f64::from(LEADER_TIME) + f64::from(LEADER_BREAK_TIME);
        let vis = 10.0 * f64::from(VIS_BIT_TIME);
        Ok(Duration::from_secs_f64(
            header + vis + timing.image_duration(resolution),
        ))
    }

    /// Writes the complete transmission of a frame as pulses.
    ///
    /// Fails without writing anything if the VIS code is not a mode of the
    /// protocol.
    pub fn encode_into<F, W>(&self, frame_buffer: &F, writer: &mut W) -> Result<(), EncodeError>
    where
        F: FrameBuffer + ?Sized,
        W: WritePulse + ?Sized,
    {
        let timing = self.timing()?;

        writer.write_header();
        writer.write_vis(self.vis_code);
        timing.scan(writer, frame_buffer);

        Ok(())
    }

    /// Encodes a frame into samples.
    pub fn encode<F>(&self, frame_buffer: &F) -> Result<SampleBuffer, EncodeError>
    where
        F: FrameBuffer + ?Sized,
    {
        let mode = self.mode()?;
        self.check_format()?;
        let resolution = Resolution::of(frame_buffer);
        tracing::debug!(%mode, %resolution, format = ?self.format, "encoding");

        let capacity = self
            .transmission_time(resolution)
            .map(|duration| num_samples(duration.as_secs_f32(), self.format.sample_rate))?;
        let mut writer = ToneWriter::with_capacity(self.format, capacity);
        self.encode_into(frame_buffer, &mut writer)?;
        let buffer = writer.finish();

        tracing::debug!(
            num_samples = buffer.len(),
            duration = ?buffer.duration(),
            "encoded"
        );
        Ok(buffer)
    }

    /// Encodes a frame into the pulses making up the transmission, without
    /// synthesizing them.
    pub fn encode_pulses<F>(&self, frame_buffer: &F) -> Result<Vec<Pulse>, EncodeError>
    where
        F: FrameBuffer + ?Sized,
    {
        let mut pulses = vec![];
        self.encode_into(frame_buffer, &mut pulses)?;
        Ok(pulses)
    }
}

impl GetSampleRate for SstvEncoder {
    #[inline]
    fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }
}
