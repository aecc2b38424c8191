//! Mode specifications
//!
//! Timings as published by N7CXI (2000) and KB4YZ (1999). [Vis codes][1]
//!
//! [1]: https://web.archive.org/web/20050306193820/http://www.tima.com/~djones/vis.txt

use std::{
    fmt::{
        Display,
        Formatter,
    },
    str::FromStr,
};

use crate::{
    image::FrameBuffer,
    protocol::Timing,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct VisCode(u8);

impl VisCode {
    #[inline]
    pub const fn new(value: u8) -> Option<Self> {
        if value & 0x80 == 0 {
            Some(Self(value))
        }
        else {
            None
        }
    }

    #[inline]
    pub const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get_bit(&self, bit: u8) -> bool {
        assert!(bit < 7);
        (self.0 >> bit) & 1 != 0
    }

    /// Even parity bit: set if an odd number of the 7 data bits is set.
    #[inline]
    pub fn parity(&self) -> bool {
        let parity = (self.0 >> 6)
            ^ (self.0 >> 5)
            ^ (self.0 >> 4)
            ^ (self.0 >> 3)
            ^ (self.0 >> 2)
            ^ (self.0 >> 1)
            ^ self.0;
        parity & 1 != 0
    }
}

impl Display for VisCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

impl From<Mode> for VisCode {
    #[inline]
    fn from(mode: Mode) -> Self {
        mode.vis_code()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn of<F>(frame_buffer: &F) -> Self
    where
        F: FrameBuffer + ?Sized,
    {
        Self::new(frame_buffer.width(), frame_buffer.height())
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Protocol families. Modes of one family share the line structure and only
/// differ in timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Martin,
    Scottie,
    Pasokon,
    Robot,
    Wraase,
}

impl Protocol {
    pub const ALL: [Self; 5] = [
        Self::Martin,
        Self::Scottie,
        Self::Pasokon,
        Self::Robot,
        Self::Wraase,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Martin => "Martin",
            Self::Scottie => "Scottie",
            Self::Pasokon => "Pasokon",
            Self::Robot => "Robot",
            Self::Wraase => "Wraase",
        }
    }

    /// Standard resolution. Decoders generally expect images of exactly this
    /// size.
    pub fn resolution(&self) -> Resolution {
        match self {
            Self::Martin | Self::Scottie | Self::Wraase => Resolution::new(320, 256),
            Self::Pasokon => Resolution::new(640, 496),
            Self::Robot => Resolution::new(320, 240),
        }
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        Mode::ALL
            .into_iter()
            .filter(move |mode| mode.protocol() == *self)
    }

    /// Looks up the timing of the mode identified by `vis_code`, if this
    /// protocol defines one.
    pub fn timing(&self, vis_code: VisCode) -> Option<Timing> {
        Mode::from_vis_code(vis_code)
            .filter(|mode| mode.protocol() == *self)
            .map(Mode::timing)
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Martin1 = 0x2c,
    Martin2 = 0x28,
    Scottie1 = 0x3c,
    Scottie2 = 0x38,
    ScottieDx = 0x4c,
    Pasokon3 = 0x71,
    Pasokon5 = 0x72,
    Pasokon7 = 0x73,
    Robot36 = 0x08,
    Robot72 = 0x0c,
    WraaseSc2180 = 0x37,
}

impl Mode {
    pub const ALL: [Self; 11] = [
        Self::Martin1,
        Self::Martin2,
        Self::Scottie1,
        Self::Scottie2,
        Self::ScottieDx,
        Self::Pasokon3,
        Self::Pasokon5,
        Self::Pasokon7,
        Self::Robot36,
        Self::Robot72,
        Self::WraaseSc2180,
    ];

    #[inline]
    pub fn vis_code(self) -> VisCode {
        VisCode(self as u8)
    }

    pub fn from_vis_code(vis_code: VisCode) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.vis_code() == vis_code)
    }

    pub fn protocol(self) -> Protocol {
        match self {
            Self::Martin1 | Self::Martin2 => Protocol::Martin,
            Self::Scottie1 | Self::Scottie2 | Self::ScottieDx => Protocol::Scottie,
            Self::Pasokon3 | Self::Pasokon5 | Self::Pasokon7 => Protocol::Pasokon,
            Self::Robot36 | Self::Robot72 => Protocol::Robot,
            Self::WraaseSc2180 => Protocol::Wraase,
        }
    }

    #[inline]
    pub fn resolution(self) -> Resolution {
        self.protocol().resolution()
    }

    pub fn timing(self) -> Timing {
        use crate::protocol::{
            martin::MartinTiming,
            pasokon::PasokonTiming,
            robot::RobotTiming,
            scottie::ScottieTiming,
            wraase::WraaseTiming,
        };

        match self {
            Self::Martin1 => Timing::Martin(MartinTiming::M1),
            Self::Martin2 => Timing::Martin(MartinTiming::M2),
            Self::Scottie1 => Timing::Scottie(ScottieTiming::S1),
            Self::Scottie2 => Timing::Scottie(ScottieTiming::S2),
            Self::ScottieDx => Timing::Scottie(ScottieTiming::DX),
            Self::Pasokon3 => Timing::Pasokon(PasokonTiming::P3),
            Self::Pasokon5 => Timing::Pasokon(PasokonTiming::P5),
            Self::Pasokon7 => Timing::Pasokon(PasokonTiming::P7),
            Self::Robot36 => Timing::Robot(RobotTiming::R36),
            Self::Robot72 => Timing::Robot(RobotTiming::R72),
            Self::WraaseSc2180 => Timing::Wraase(WraaseTiming::SC2_180),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Martin1 => "Martin M1",
            Self::Martin2 => "Martin M2",
            Self::Scottie1 => "Scottie S1",
            Self::Scottie2 => "Scottie S2",
            Self::ScottieDx => "Scottie DX",
            Self::Pasokon3 => "Pasokon P3",
            Self::Pasokon5 => "Pasokon P5",
            Self::Pasokon7 => "Pasokon P7",
            Self::Robot36 => "Robot 36",
            Self::Robot72 => "Robot 72",
            Self::WraaseSc2180 => "Wraase SC-2 180",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::Martin1 => "m1",
            Self::Martin2 => "m2",
            Self::Scottie1 => "s1",
            Self::Scottie2 => "s2",
            Self::ScottieDx => "sdx",
            Self::Pasokon3 => "p3",
            Self::Pasokon5 => "p5",
            Self::Pasokon7 => "p7",
            Self::Robot36 => "r36",
            Self::Robot72 => "r72",
            Self::WraaseSc2180 => "w2180",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<VisCode> for Mode {
    type Error = UnknownVisCode;

    fn try_from(vis_code: VisCode) -> Result<Self, Self::Error> {
        Self::from_vis_code(vis_code).ok_or(UnknownVisCode { vis_code })
    }
}

#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("no mode with vis code {vis_code}")]
pub struct UnknownVisCode {
    pub vis_code: VisCode,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("unknown mode: {name}")]
pub struct ParseModeError {
    pub name: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let mode = match name.as_str() {
            "wrsc2-180" | "wsc2-180" | "sc2-180" => Some(Self::WraaseSc2180),
            name => {
                Self::ALL.into_iter().find(|mode| {
                    mode.short_name() == name
                        || mode.name().eq_ignore_ascii_case(name)
                        || format!("{mode:?}").eq_ignore_ascii_case(name)
                })
            }
        };
        mode.ok_or_else(|| ParseModeError { name: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use crate::modes::{
        Mode,
        Protocol,
        Resolution,
        VisCode,
    };

    #[test]
    fn correct_vis_codes() {
        assert_eq!(Mode::Robot36.vis_code(), VisCode(0x08));
        assert_eq!(Mode::Robot72.vis_code(), VisCode(0x0c));
        assert_eq!(Mode::Martin2.vis_code(), VisCode(0x28));
        assert_eq!(Mode::Martin1.vis_code(), VisCode(0x2c));
        assert_eq!(Mode::WraaseSc2180.vis_code(), VisCode(0x37));
        assert_eq!(Mode::Scottie2.vis_code(), VisCode(0x38));
        assert_eq!(Mode::Scottie1.vis_code(), VisCode(0x3c));
        assert_eq!(Mode::ScottieDx.vis_code(), VisCode(0x4c));
        assert_eq!(Mode::Pasokon3.vis_code(), VisCode(0x71));
        assert_eq!(Mode::Pasokon5.vis_code(), VisCode(0x72));
        assert_eq!(Mode::Pasokon7.vis_code(), VisCode(0x73));
    }

    #[test]
    fn vis_code_must_fit_7_bits() {
        assert_eq!(VisCode::new(0x7f), Some(VisCode(0x7f)));
        assert_eq!(VisCode::new(0x80), None);
    }

    #[test]
    fn vis_code_bits_are_lsb_first() {
        let vis_code = VisCode(0x2c);
        let bits = (0..7).map(|bit| vis_code.get_bit(bit)).collect::<Vec<_>>();
        assert_eq!(bits, [false, false, true, true, false, true, false]);
    }

    #[test]
    fn parity_is_even() {
        for value in 0..0x80u8 {
            let vis_code = VisCode(value);
            let ones = value.count_ones() + u32::from(vis_code.parity());
            assert_eq!(ones % 2, 0, "vis code {vis_code}");
        }
    }

    #[test]
    fn modes_round_trip_through_vis_code() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_vis_code(mode.vis_code()), Some(mode));
            assert_eq!(Mode::try_from(mode.vis_code()).ok(), Some(mode));
        }
        assert_eq!(Mode::from_vis_code(VisCode(0)), None);
    }

    #[test]
    fn protocol_timing_only_for_own_modes() {
        for protocol in Protocol::ALL {
            for mode in Mode::ALL {
                let timing = protocol.timing(mode.vis_code());
                assert_eq!(timing.is_some(), mode.protocol() == protocol);
            }
            assert!(protocol.timing(VisCode(0)).is_none());
        }
    }

    #[test]
    fn every_protocol_has_modes() {
        let count = Protocol::ALL
            .iter()
            .map(|protocol| protocol.modes().count())
            .collect::<Vec<_>>();
        assert_eq!(count, [2, 3, 3, 2, 1]);
    }

    #[test]
    fn standard_resolutions() {
        assert_eq!(Mode::Martin1.resolution(), Resolution::new(320, 256));
        assert_eq!(Mode::ScottieDx.resolution(), Resolution::new(320, 256));
        assert_eq!(Mode::Pasokon7.resolution(), Resolution::new(640, 496));
        assert_eq!(Mode::Robot36.resolution(), Resolution::new(320, 240));
        assert_eq!(Mode::WraaseSc2180.resolution(), Resolution::new(320, 256));
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!("m1".parse::<Mode>().unwrap(), Mode::Martin1);
        assert_eq!("SDX".parse::<Mode>().unwrap(), Mode::ScottieDx);
        assert_eq!("Robot 72".parse::<Mode>().unwrap(), Mode::Robot72);
        assert_eq!("pasokon5".parse::<Mode>().unwrap(), Mode::Pasokon5);
        assert_eq!("wrsc2-180".parse::<Mode>().unwrap(), Mode::WraaseSc2180);
        assert!("pd120".parse::<Mode>().is_err());
    }
}
