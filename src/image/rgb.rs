/// Borrowed interleaved 8-bit RGB image.
#[derive(Clone, Copy, Debug)]
pub struct ImageRgbU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows, at least 3 * w
    pub data: &'a [u8],
}

impl<'a> ImageRgbU8<'a> {
    /// Tightly packed view over `data` (`stride == 3 * w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: 3 * w,
            data,
        }
    }

    /// Number of bytes the view addresses.
    pub fn required_len(&self) -> usize {
        if self.h == 0 {
            0
        } else {
            (self.h - 1) * self.stride + 3 * self.w
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = y * self.stride + 3 * x;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + 3 * self.w]
    }
}
