//! Wraase SC-2 modes. The three channels follow each other without
//! separators.

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
pub struct WraaseTiming {
    pub sync_time: f32,
    pub porch_time: f32,
    pub pixel_time: f32,
}

impl WraaseTiming {
    pub const SC2_180: Self = Self {
        sync_time: 5.5225e-3,
        porch_time: 0.5e-3,
        pixel_time: 0.7344e-3,
    };

    pub fn line_duration(&self, width: usize) -> f32 {
        self.sync_time + self.porch_time + 3.0 * width as f32 * self.pixel_time
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        for y in 0..frame_buffer.height() {
            tracing::trace!(y, "wraase line");
            writer.write(SYNC_TONE, self.sync_time);
            writer.write(PORCH_TONE, self.porch_time);

            for channel in Channel::SCAN_ORDER {
                write_channel(writer, frame_buffer, y, channel, self.pixel_time);
            }
        }
    }
}
