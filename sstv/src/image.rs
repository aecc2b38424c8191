use image::{
    DynamicImage,
    GenericImageView,
    ImageBuffer,
    Rgb,
    RgbImage,
    RgbaImage,
};

/// Read-only pixel grid an encoder scans.
///
/// `pixel` must return a value for any coordinate. The implementations in
/// this crate clamp coordinates past the right and bottom edges to the edge
/// pixel, which the Robot 36 chroma averaging relies on.
pub trait FrameBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8>;
}

impl<F> FrameBuffer for &F
where
    F: FrameBuffer + ?Sized,
{
    #[inline]
    fn width(&self) -> usize {
        (&**self).width()
    }

    #[inline]
    fn height(&self) -> usize {
        (&**self).height()
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        (&**self).pixel(x, y)
    }
}

#[inline]
fn clamp_to_edge(x: usize, y: usize, width: u32, height: u32) -> (u32, u32) {
    let clamp = |value: usize, size: u32| {
        u32::try_from(value)
            .unwrap_or(u32::MAX)
            .min(size.saturating_sub(1))
    };
    (clamp(x, width), clamp(y, height))
}

/// Keeps the high byte of each 16 bit channel.
#[inline]
fn narrow([r, g, b]: [u16; 3]) -> Rgb<u8> {
    Rgb([r, g, b].map(|channel| (channel >> 8) as u8))
}

impl FrameBuffer for RgbImage {
    #[inline]
    fn width(&self) -> usize {
        RgbImage::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        RgbImage::height(self) as usize
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        let (x, y) = clamp_to_edge(x, y, RgbImage::width(self), RgbImage::height(self));
        *self.get_pixel(x, y)
    }
}

impl FrameBuffer for RgbaImage {
    #[inline]
    fn width(&self) -> usize {
        RgbaImage::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        RgbaImage::height(self) as usize
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        let (x, y) = clamp_to_edge(x, y, RgbaImage::width(self), RgbaImage::height(self));
        let [r, g, b, _alpha] = self.get_pixel(x, y).0;
        Rgb([r, g, b])
    }
}

impl FrameBuffer for ImageBuffer<Rgb<u16>, Vec<u16>> {
    #[inline]
    fn width(&self) -> usize {
        ImageBuffer::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        ImageBuffer::height(self) as usize
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        let (x, y) = clamp_to_edge(x, y, ImageBuffer::width(self), ImageBuffer::height(self));
        narrow(self.get_pixel(x, y).0)
    }
}

impl FrameBuffer for DynamicImage {
    #[inline]
    fn width(&self) -> usize {
        GenericImageView::width(self) as usize
    }

    #[inline]
    fn height(&self) -> usize {
        GenericImageView::height(self) as usize
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        let (x, y) = clamp_to_edge(
            x,
            y,
            GenericImageView::width(self),
            GenericImageView::height(self),
        );
        match self {
            DynamicImage::ImageRgb16(image) => narrow(image.get_pixel(x, y).0),
            DynamicImage::ImageRgba16(image) => {
                let [r, g, b, _alpha] = image.get_pixel(x, y).0;
                narrow([r, g, b])
            }
            DynamicImage::ImageLuma16(image) => {
                let [luma] = image.get_pixel(x, y).0;
                narrow([luma; 3])
            }
            DynamicImage::ImageLumaA16(image) => {
                let [luma, _alpha] = image.get_pixel(x, y).0;
                narrow([luma; 3])
            }
            _ => {
                let [r, g, b, _alpha] = self.get_pixel(x, y).0;
                Rgb([r, g, b])
            }
        }
    }
}
