//! Robot color modes, sending luma and chroma (YUV) instead of RGB.
//!
//! Robot 36 sends full luma on every line, but only one chroma channel per
//! line, alternating between U on even and V on odd lines. The chroma is
//! averaged over 2x2 pixels first. Robot 72 sends Y, U and V on every line.

use crate::{
    PORCH_TONE,
    SYNC_TONE,
    color::to_yuv,
    image::FrameBuffer,
    writer::WritePulse,
};

pub const SYNC_TIME: f32 = 9e-3;
pub const PORCH_TIME: f32 = 3e-3;

pub const SEPARATOR_TIME: f32 = 4.5e-3;
pub const EVEN_SEPARATOR_TONE: f32 = 1500.0;
pub const ODD_SEPARATOR_TONE: f32 = 2300.0;

pub const CHROMA_PORCH_TIME: f32 = 1.5e-3;
pub const CHROMA_PORCH_TONE: f32 = 1900.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChromaScan {
    /// U on even, V on odd lines, averaged over 2x2 pixels.
    Alternating,
    /// U and V on every line.
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobotTiming {
    pub luma_pixel_time: f32,
    pub chroma_pixel_time: f32,
    pub chroma_scan: ChromaScan,
}

impl RobotTiming {
    pub const R36: Self = Self {
        luma_pixel_time: 0.275e-3,
        chroma_pixel_time: 0.1375e-3,
        chroma_scan: ChromaScan::Alternating,
    };

    pub const R72: Self = Self {
        luma_pixel_time: 0.43125e-3,
        chroma_pixel_time: 0.215625e-3,
        chroma_scan: ChromaScan::Full,
    };

    pub fn line_duration(&self, width: usize) -> f32 {
        let width = width as f32;
        let chroma = SEPARATOR_TIME + CHROMA_PORCH_TIME + width * self.chroma_pixel_time;
        let num_chroma = match self.chroma_scan {
            ChromaScan::Alternating => 1.0,
            ChromaScan::Full => 2.0,
        };
        SYNC_TIME + PORCH_TIME + width * self.luma_pixel_time + num_chroma * chroma
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        match self.chroma_scan {
            ChromaScan::Alternating => self.scan_alternating(writer, frame_buffer),
            ChromaScan::Full => self.scan_full(writer, frame_buffer),
        }
    }

    fn scan_alternating<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        let yuv_map = YuvMap::averaged(frame_buffer);

        for y in 0..yuv_map.height {
            tracing::trace!(y, "robot line");
            writer.write(SYNC_TONE, SYNC_TIME);
            writer.write(PORCH_TONE, PORCH_TIME);

            let even = y % 2 == 0;

            for x in 0..yuv_map.width {
                let [luma, _, _] = yuv_map.get(x, y);
                writer.write_value(normalize(luma), self.luma_pixel_time);
            }

            let separator_tone = if even {
                EVEN_SEPARATOR_TONE
            }
            else {
                ODD_SEPARATOR_TONE
            };
            writer.write(separator_tone, SEPARATOR_TIME);
            writer.write(CHROMA_PORCH_TONE, CHROMA_PORCH_TIME);

            for x in 0..yuv_map.width {
                let [_, u, v] = yuv_map.get(x, y);
                let chroma = if even { u } else { v };
                writer.write_value(normalize(chroma), self.chroma_pixel_time);
            }
        }
    }

    fn scan_full<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        let width = frame_buffer.width();

        for y in 0..frame_buffer.height() {
            tracing::trace!(y, "robot line");
            writer.write(SYNC_TONE, SYNC_TIME);
            writer.write(PORCH_TONE, PORCH_TIME);

            for x in 0..width {
                let [luma, _, _] = to_yuv(frame_buffer.pixel(x, y));
                writer.write_value(normalize(luma), self.luma_pixel_time);
            }

            writer.write(EVEN_SEPARATOR_TONE, SEPARATOR_TIME);
            writer.write(CHROMA_PORCH_TONE, CHROMA_PORCH_TIME);

            for x in 0..width {
                let [_, u, _] = to_yuv(frame_buffer.pixel(x, y));
                writer.write_value(normalize(u), self.chroma_pixel_time);
            }

            writer.write(ODD_SEPARATOR_TONE, SEPARATOR_TIME);
            writer.write(PORCH_TONE, CHROMA_PORCH_TIME);

            for x in 0..width {
                let [_, _, v] = to_yuv(frame_buffer.pixel(x, y));
                writer.write_value(normalize(v), self.chroma_pixel_time);
            }
        }
    }
}

#[inline]
fn normalize(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// YUV values of a whole frame, computed once per encode.
#[derive(Clone, Debug)]
struct YuvMap {
    width: usize,
    height: usize,
    values: Vec<[u8; 3]>,
}

impl YuvMap {
    /// Luma per pixel, chroma as the truncated mean over the pixel, its right,
    /// lower and lower right neighbour. Neighbours past the edge are whatever
    /// the frame buffer returns for them.
    fn averaged<F>(frame_buffer: &F) -> Self
    where
        F: FrameBuffer + ?Sized,
    {
        let width = frame_buffer.width();
        let height = frame_buffer.height();
        let mut values = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let [luma, u00, v00] = to_yuv(frame_buffer.pixel(x, y));
                let [_, u10, v10] = to_yuv(frame_buffer.pixel(x + 1, y));
                let [_, u01, v01] = to_yuv(frame_buffer.pixel(x, y + 1));
                let [_, u11, v11] = to_yuv(frame_buffer.pixel(x + 1, y + 1));

                let mean = |a: u8, b: u8, c: u8, d: u8| {
                    ((u16::from(a) + u16::from(b) + u16::from(c) + u16::from(d)) / 4) as u8
                };
                values.push([luma, mean(u00, u10, u01, u11), mean(v00, v10, v01, v11)]);
            }
        }

        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.values[y * self.width + x]
    }
}
