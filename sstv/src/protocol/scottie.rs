//! Scottie modes, designed by Eddie Murphy (GM3SBC).
//!
//! Unlike Martin, the horizontal sync sits between the blue and red channel.
//! Only the very first line is preceded by an extra sync pulse.

use crate::{
    PORCH_TONE,
    SYNC_TONE,
    image::FrameBuffer,
    protocol::{
        Channel,
        write_channel,
    },
    writer::WritePulse,
};

pub const SYNC_TIME: f32 = 9e-3;
pub const SEPARATOR_TIME: f32 = 1.5e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScottieTiming {
    pub pixel_time: f32,
}

impl ScottieTiming {
    pub const S1: Self = Self {
        pixel_time: 0.4320e-3,
    };

    pub const S2: Self = Self {
        pixel_time: 0.2752e-3,
    };

    pub const DX: Self = Self {
        pixel_time: 1.08e-3,
    };

    /// Duration of every line, not counting the sync pulse before the first.
    pub fn line_duration(&self, width: usize) -> f32 {
        SYNC_TIME + 3.0 * (SEPARATOR_TIME + width as f32 * self.pixel_time)
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        for y in 0..frame_buffer.height() {
            tracing::trace!(y, "scottie line");
            if y == 0 {
                writer.write(SYNC_TONE, SYNC_TIME);
            }

            for channel in Channel::SCAN_ORDER {
                writer.write(PORCH_TONE, SEPARATOR_TIME);
                write_channel(writer, frame_buffer, y, channel, self.pixel_time);
                if channel == Channel::Blue {
                    writer.write(SYNC_TONE, SYNC_TIME);
                }
            }
        }
    }
}
