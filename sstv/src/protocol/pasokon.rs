//! Pasokon ("P") modes, high resolution RGB.

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

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PasokonTiming {
    pub sync_time: f32,
    pub separator_time: f32,
    pub pixel_time: f32,
}

impl PasokonTiming {
    pub const P3: Self = Self {
        sync_time: 5.208e-3,
        separator_time: 1.042e-3,
        pixel_time: 0.2083e-3,
    };

    pub const P5: Self = Self {
        sync_time: 7.813e-3,
        separator_time: 1.563e-3,
        pixel_time: 0.3125e-3,
    };

    pub const P7: Self = Self {
        sync_time: 10.417e-3,
        separator_time: 2.083e-3,
        pixel_time: 0.4167e-3,
    };

    pub fn line_duration(&self, width: usize) -> f32 {
        self.sync_time
            + 4.0 * self.separator_time
            + 3.0 * width as f32 * self.pixel_time
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        for y in 0..frame_buffer.height() {
            tracing::trace!(y, "pasokon line");
            writer.write(SYNC_TONE, self.sync_time);

            for channel in Channel::SCAN_ORDER {
                writer.write(PORCH_TONE, self.separator_time);
                write_channel(writer, frame_buffer, y, channel, self.pixel_time);
            }

            writer.write(PORCH_TONE, self.separator_time);
        }
    }
}
