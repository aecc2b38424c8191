//! Martin modes, designed by Martin Emmerson (G3OQD).
//!
//! Each line starts with a sync pulse and sends green, blue and red, each
//! enclosed by separator pulses.

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

pub const SYNC_TIME: f32 = 4.862e-3;
pub const SEPARATOR_TIME: f32 = 0.572e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MartinTiming {
    pub pixel_time: f32,
}

impl MartinTiming {
    pub const M1: Self = Self {
        pixel_time: 0.4576e-3,
    };

    pub const M2: Self = Self {
        pixel_time: 0.2288e-3,
    };

    pub fn line_duration(&self, width: usize) -> f32 {
        SYNC_TIME + 3.0 * (2.0 * SEPARATOR_TIME + width as f32 * self.pixel_time)
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        for y in 0..frame_buffer.height() {
            tracing::trace!(y, "martin line");
            writer.write(SYNC_TONE, SYNC_TIME);

            for channel in Channel::SCAN_ORDER {
                writer.write(PORCH_TONE, SEPARATOR_TIME);
                write_channel(writer, frame_buffer, y, channel, self.pixel_time);
                writer.write(PORCH_TONE, SEPARATOR_TIME);
            }
        }
    }
}
