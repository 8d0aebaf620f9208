use image::{DynamicImage, GenericImageView, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::foundation::error::{VidpipeError, VidpipeResult};

/// An image the converter can read one row at a time.
///
/// Rows are produced in the canonical order: straight-alpha RGBA8.
pub trait SourceImage {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill `out` (exactly `width * 4` bytes) with row `y` as straight RGBA8.
    fn read_row_rgba8(&self, y: u32, out: &mut [u8]);
}

/// Memory layout of one pixel in a [`RawImage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// R, G, B.
    Rgb8,
    /// B, G, R.
    Bgr8,
    /// R, G, B, A (straight alpha).
    Rgba8,
    /// B, G, R, A (straight alpha), the usual screen-capture layout.
    Bgra8,
    /// A, R, G, B (straight alpha).
    Argb8,
    /// Single luma byte.
    Gray8,
    /// Luma, alpha.
    GrayAlpha8,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Argb8 => 4,
        }
    }
}

/// Expand one row of `layout` pixels into RGBA8.
pub(crate) fn expand_row(layout: PixelLayout, src: &[u8], out: &mut [u8]) {
    let bpp = layout.bytes_per_pixel();
    for (d, s) in out.chunks_exact_mut(4).zip(src.chunks_exact(bpp)) {
        let rgba = match layout {
            PixelLayout::Rgb8 => [s[0], s[1], s[2], 255],
            PixelLayout::Bgr8 => [s[2], s[1], s[0], 255],
            PixelLayout::Rgba8 => [s[0], s[1], s[2], s[3]],
            PixelLayout::Bgra8 => [s[2], s[1], s[0], s[3]],
            PixelLayout::Argb8 => [s[1], s[2], s[3], s[0]],
            PixelLayout::Gray8 => [s[0], s[0], s[0], 255],
            PixelLayout::GrayAlpha8 => [s[0], s[0], s[0], s[1]],
        };
        d.copy_from_slice(&rgba);
    }
}

/// Borrowed pixel bytes with an explicit layout and row stride.
#[derive(Clone, Copy, Debug)]
pub struct RawImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
}

impl<'a> RawImage<'a> {
    /// Wrap `data`, checking that every row fits.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
    ) -> VidpipeResult<Self> {
        if width == 0 || height == 0 {
            return Err(VidpipeError::config(format!(
                "raw image must be non-empty, got {width}x{height}"
            )));
        }
        let row_bytes = width as usize * layout.bytes_per_pixel();
        if stride < row_bytes {
            return Err(VidpipeError::config(format!(
                "raw image stride {stride} is smaller than row size {row_bytes}"
            )));
        }
        let needed = stride
            .checked_mul(height as usize - 1)
            .and_then(|v| v.checked_add(row_bytes))
            .ok_or_else(|| VidpipeError::config("raw image size overflows usize"))?;
        if data.len() < needed {
            return Err(VidpipeError::config(format!(
                "raw image needs {needed} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            layout,
        })
    }

    /// Wrap tightly packed rows (`stride == width * bytes_per_pixel`).
    pub fn packed(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> VidpipeResult<Self> {
        Self::new(
            data,
            width,
            height,
            width as usize * layout.bytes_per_pixel(),
            layout,
        )
    }

    /// Pixel layout.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }
}

impl SourceImage for RawImage<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_row_rgba8(&self, y: u32, out: &mut [u8]) {
        let start = y as usize * self.stride;
        let len = self.width as usize * self.layout.bytes_per_pixel();
        expand_row(self.layout, &self.data[start..start + len], out);
    }
}

macro_rules! buffer_source {
    ($ty:ty, $layout:expr) => {
        impl SourceImage for $ty {
            fn size(&self) -> (u32, u32) {
                (self.width(), self.height())
            }

            fn read_row_rgba8(&self, y: u32, out: &mut [u8]) {
                let len = self.width() as usize * $layout.bytes_per_pixel();
                let start = y as usize * len;
                expand_row($layout, &self.as_raw()[start..start + len], out);
            }
        }
    };
}

buffer_source!(RgbImage, PixelLayout::Rgb8);
buffer_source!(RgbaImage, PixelLayout::Rgba8);
buffer_source!(GrayImage, PixelLayout::Gray8);
buffer_source!(GrayAlphaImage, PixelLayout::GrayAlpha8);

impl SourceImage for DynamicImage {
    fn size(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn read_row_rgba8(&self, y: u32, out: &mut [u8]) {
        match self {
            DynamicImage::ImageRgb8(img) => img.read_row_rgba8(y, out),
            DynamicImage::ImageRgba8(img) => img.read_row_rgba8(y, out),
            DynamicImage::ImageLuma8(img) => img.read_row_rgba8(y, out),
            DynamicImage::ImageLumaA8(img) => img.read_row_rgba8(y, out),
            // 16-bit and float variants: per-pixel conversion, no intermediate buffer.
            other => {
                for (x, d) in out.chunks_exact_mut(4).enumerate() {
                    d.copy_from_slice(&other.get_pixel(x as u32, y).0);
                }
            }
        }
    }
}

impl<T: SourceImage + ?Sized> SourceImage for &T {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn read_row_rgba8(&self, y: u32, out: &mut [u8]) {
        (**self).read_row_rgba8(y, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/source.rs"]
mod tests;
