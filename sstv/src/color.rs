//! Pixel color conversions used by the line scanners.

use image::Rgb;

/// Normalizes the channels of a pixel to `[0, 1)`.
#[inline]
pub fn to_rgb(pixel: Rgb<u8>) -> [f32; 3] {
    pixel.0.map(|channel| f32::from(channel) / 256.0)
}

/// Converts a pixel to Y, U and V bytes.
///
/// Uses the BT.601 coefficients with studio-swing offsets (Y in `16..=235`,
/// U and V centered on 128). Results are clamped to the byte range before
/// rounding.
pub fn to_yuv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);

    let y = 16.0 + 0.003906 * (65.738 * r + 129.057 * g + 25.064 * b);
    let u = 128.0 + 0.003906 * (-37.945 * r - 74.494 * g + 112.439 * b);
    let v = 128.0 + 0.003906 * (112.439 * r - 94.154 * g - 18.285 * b);

    [y, u, v].map(to_byte)
}

#[inline]
fn to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use image::Rgb;

    use crate::color::{
        to_byte,
        to_rgb,
        to_yuv,
    };

    fn from_yuv([y, u, v]: [u8; 3]) -> [i32; 3] {
        let c = f32::from(y) - 16.0;
        let d = f32::from(u) - 128.0;
        let e = f32::from(v) - 128.0;
        [
            1.164 * c + 1.596 * e,
            1.164 * c - 0.392 * d - 0.813 * e,
            1.164 * c + 2.017 * d,
        ]
        .map(|x| x.round() as i32)
    }

    #[test]
    fn rgb_is_normalized_by_256() {
        let [r, g, b] = to_rgb(Rgb([0, 128, 255]));
        assert_eq!(r, 0.0);
        assert_eq!(g, 0.5);
        assert_abs_diff_eq!(b, 255.0 / 256.0);
    }

    #[test]
    fn yuv_of_black_and_white() {
        assert_eq!(to_yuv(Rgb([0, 0, 0])), [16, 128, 128]);
        assert_eq!(to_yuv(Rgb([255, 255, 255])), [235, 128, 128]);
    }

    #[test]
    fn yuv_of_primaries() {
        let [_, u, v] = to_yuv(Rgb([255, 0, 0]));
        assert!(u < 128);
        assert_eq!(v, 240);

        let [_, u, _] = to_yuv(Rgb([0, 0, 255]));
        assert_eq!(u, 240);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(to_byte(-12.0), 0);
        assert_eq!(to_byte(300.0), 255);
        assert_eq!(to_byte(127.6), 128);
    }

    #[test]
    fn yuv_round_trip_within_quantization() {
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(5) {
                for b in (0..=255).step_by(5) {
                    let original = [r, g, b];
                    let decoded = from_yuv(to_yuv(Rgb(original)));
                    for (expected, actual) in original.iter().zip(decoded) {
                        assert!(
                            (i32::from(*expected) - actual).abs() <= 2,
                            "rgb {original:?} decoded as {decoded:?}"
                        );
                    }
                }
            }
        }
    }
}
