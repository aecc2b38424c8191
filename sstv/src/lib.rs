//! Slow-Scan Television encoder.
//!
//! Turns a raster image into the audio signal of one of the Martin, Scottie,
//! Pasokon, Robot or Wraase transmission modes.
//!
//! ```no_run
//! use sstv::{
//!     AudioFormat,
//!     Mode,
//!     SstvEncoder,
//! };
//!
//! let image = image::RgbImage::new(320, 256);
//! let encoder = SstvEncoder::from_mode(Mode::Martin1, AudioFormat::default());
//! let buffer = encoder.encode(&image).unwrap();
//! sstv::sink::write_wav("martin1.wav", &buffer).unwrap();
//! ```
//!
//! # References
//!
//! - <http://lionel.cordesses.free.fr/gpages/sstv.html>
//! - <http://www.barberdsp.com/downloads/Dayton%20Paper.pdf>
//! - <https://web.archive.org/web/20120313215600/http://lionel.cordesses.free.fr/gpages/Cordesses.pdf>

pub mod color;
mod encoder;
mod format;
pub mod image;
pub mod modes;
pub mod oscillator;
pub mod protocol;
pub mod sink;
pub mod util;
pub mod writer;

pub use crate::{
    encoder::{
        EncodeError,
        SstvEncoder,
    },
    format::AudioFormat,
    modes::{
        Mode,
        Protocol,
        Resolution,
        VisCode,
    },
    writer::{
        Pulse,
        SampleBuffer,
        ToneWriter,
        WritePulse,
    },
};

pub const LEADER_TONE: f32 = 1900.0;
pub const LEADER_TIME: f32 = 0.300;

pub const LEADER_BREAK_TIME: f32 = 0.010;

pub const VIS_BIT_TIME: f32 = 0.030;
pub const VIS_LOW_TONE: f32 = 1300.0;
pub const VIS_HIGH_TONE: f32 = 1100.0;

// sync, leader break, vis start/stop
pub const SYNC_TONE: f32 = 1200.0;

pub const PORCH_TONE: f32 = 1500.0;

pub const CHANNEL_LOW_TONE: f32 = 1500.0;
pub const CHANNEL_HIGH_TONE: f32 = 2300.0;

pub trait GetSampleRate {
    fn sample_rate(&self) -> u32;
}
