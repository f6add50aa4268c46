use super::{ImageF64, ImageViewMut};

/// Borrowed 8-bit grayscale view over a strided buffer.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Convert to an owned plane with every intensity divided by 255.
    pub fn to_unit_f64(&self) -> ImageF64 {
        let mut out = ImageF64::new(self.w, self.h);
        for y in 0..self.h {
            let src = &self.data[y * self.stride..y * self.stride + self.w];
            for (d, &s) in out.row_mut(y).iter_mut().zip(src) {
                *d = f64::from(s) / 255.0;
            }
        }
        out
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
