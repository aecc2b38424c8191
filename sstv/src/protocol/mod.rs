//! Line scanners and timing records of the supported protocol families.

pub mod martin;
pub mod pasokon;
pub mod robot;
pub mod scottie;
pub mod wraase;

use crate::{
    image::FrameBuffer,
    modes::Resolution,
    writer::WritePulse,
};

/// Timing of one mode, tagged by protocol family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timing {
    Martin(martin::MartinTiming),
    Scottie(scottie::ScottieTiming),
    Pasokon(pasokon::PasokonTiming),
    Robot(robot::RobotTiming),
    Wraase(wraase::WraaseTiming),
}

impl Timing {
    /// Nominal duration in seconds of the scan lines of an image, i.e. without
    /// header and VIS code.
    pub fn image_duration(&self, resolution: Resolution) -> f64 {
        let lines = resolution.height as f64;
        let line = |duration: f32| f64::from(duration) * lines;
        match self {
            Self::Martin(timing) => line(timing.line_duration(resolution.width)),
            Self::Scottie(timing) => {
                let start = if resolution.height > 0 {
                    f64::from(scottie::SYNC_TIME)
                }
                else {
                    0.0
                };
                start + line(timing.line_duration(resolution.width))
            }
            Self::Pasokon(timing) => line(timing.line_duration(resolution.width)),
            Self::Robot(timing) => line(timing.line_duration(resolution.width)),
            Self::Wraase(timing) => line(timing.line_duration(resolution.width)),
        }
    }

    pub(crate) fn scan<W, F>(&self, writer: &mut W, frame_buffer: &F)
    where
        W: WritePulse + ?Sized,
        F: FrameBuffer + ?Sized,
    {
        match self {
            Self::Martin(timing) => timing.scan(writer, frame_buffer),
            Self::Scottie(timing) => timing.scan(writer, frame_buffer),
            Self::Pasokon(timing) => timing.scan(writer, frame_buffer),
            Self::Robot(timing) => timing.scan(writer, frame_buffer),
            Self::Wraase(timing) => timing.scan(writer, frame_buffer),
        }
    }
}

/// Color channels in the order the RGB protocols send them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Green,
    Blue,
    Red,
}

impl Channel {
    pub const SCAN_ORDER: [Self; 3] = [Self::Green, Self::Blue, Self::Red];

    /// Picks this channel out of normalized `[r, g, b]` values.
    #[inline]
    pub fn select(self, [r, g, b]: [f32; 3]) -> f32 {
        match self {
            Channel::Green => g,
            Channel::Blue => b,
            Channel::Red => r,
        }
    }
}

/// Writes one channel of row `y` as pixel tones, used by all RGB protocols.
fn write_channel<W, F>(writer: &mut W, frame_buffer: &F, y: usize, channel: Channel, pixel_time: f32)
where
    W: WritePulse + ?Sized,
    F: FrameBuffer + ?Sized,
{
    for x in 0..frame_buffer.width() {
        let rgb = crate::color::to_rgb(frame_buffer.pixel(x, y));
        writer.write_value(channel.select(rgb), pixel_time);
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::Channel;

    #[test]
    fn select_picks_channel() {
        let rgb = [0.1, 0.2, 0.3];
        assert_eq!(Channel::Green.select(rgb), 0.2);
        assert_eq!(Channel::Blue.select(rgb), 0.3);
        assert_eq!(Channel::Red.select(rgb), 0.1);
    }
}
