//! RGB(A) to planar 4:2:0 conversion.
//!
//! Luma is computed per pixel. Chroma uses a 2x2 box average of the (alpha-flattened) RGB
//! samples, rounded half up, and then applies the matrix to the averaged colour. Odd widths and
//! heights clamp the missing right column / bottom row to the last one.

use crate::config::options::Options;
use crate::convert::matrix::ColorMatrix;
use crate::convert::source::SourceImage;
use crate::foundation::core::{Csp, chroma_dims};
use crate::foundation::error::{VidpipeError, VidpipeResult};
use crate::foundation::math::{avg4, mul_div255_u16};
use crate::picture::Picture;

/// Converts source images into a [`Picture`] of fixed geometry.
///
/// Holds a two-row RGBA scratch buffer allocated at construction; conversion itself does not
/// allocate.
#[derive(Debug)]
pub struct PixelConverter {
    width: u32,
    height: u32,
    csp: Csp,
    matrix: ColorMatrix,
    background: [u8; 3],
    rows: Vec<u8>,
}

impl PixelConverter {
    /// Create a converter for `width x height` pictures in `csp`.
    pub fn new(
        width: u32,
        height: u32,
        csp: Csp,
        matrix: ColorMatrix,
        background: [u8; 3],
    ) -> VidpipeResult<Self> {
        if width == 0 || height == 0 {
            return Err(VidpipeError::config(format!(
                "converter width/height must be non-zero, got {width}x{height}"
            )));
        }
        let len = (width as usize)
            .checked_mul(8)
            .ok_or_else(|| VidpipeError::alloc("converter scratch size overflows usize"))?;
        let mut rows = Vec::new();
        rows.try_reserve_exact(len)
            .map_err(|e| VidpipeError::alloc(format!("cannot allocate converter scratch: {e}")))?;
        rows.resize(len, 0);

        Ok(Self {
            width,
            height,
            csp,
            matrix,
            background,
            rows,
        })
    }

    /// Create a converter matching the geometry and colour settings of `opts`.
    pub fn from_options(opts: &Options) -> VidpipeResult<Self> {
        Self::new(
            opts.width,
            opts.height,
            opts.csp,
            opts.matrix,
            opts.background,
        )
    }

    /// Configured `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Convert `src` into `dst`.
    ///
    /// Both must match the configured geometry; a mismatch is reported before any sample is
    /// written.
    pub fn convert<S: SourceImage + ?Sized>(
        &mut self,
        src: &S,
        dst: &mut Picture,
    ) -> VidpipeResult<()> {
        let (sw, sh) = src.size();
        if (sw, sh) != (self.width, self.height) {
            return Err(VidpipeError::config(format!(
                "source image is {sw}x{sh}, expected {}x{}",
                self.width, self.height
            )));
        }
        if (dst.width(), dst.height(), dst.csp()) != (self.width, self.height, self.csp) {
            return Err(VidpipeError::config(format!(
                "picture is {}x{} {:?}, expected {}x{} {:?}",
                dst.width(),
                dst.height(),
                dst.csp(),
                self.width,
                self.height,
                self.csp
            )));
        }

        let w = self.width as usize;
        let h = self.height as usize;
        let (cw, ch) = chroma_dims(self.width, self.height);
        let layout = self.csp.chroma_layout();
        let matrix = self.matrix;
        let bg = self.background;
        let (top, bottom) = self.rows.split_at_mut(w * 4);
        let planes = dst.planes_mut();

        for cy in 0..ch as usize {
            let y0 = cy * 2;
            let y1 = (y0 + 1).min(h - 1);

            src.read_row_rgba8(y0 as u32, top);
            flatten_row(top, bg);
            write_luma_row(matrix, top, planes[0].row_mut(y0));

            if y1 != y0 {
                src.read_row_rgba8(y1 as u32, bottom);
                flatten_row(bottom, bg);
                write_luma_row(matrix, bottom, planes[0].row_mut(y1));
            } else {
                bottom.copy_from_slice(top);
            }

            for cx in 0..cw as usize {
                let x0 = cx * 2 * 4;
                let x1 = (cx * 2 + 1).min(w - 1) * 4;
                let r = avg4(top[x0], top[x1], bottom[x0], bottom[x1]);
                let g = avg4(top[x0 + 1], top[x1 + 1], bottom[x0 + 1], bottom[x1 + 1]);
                let b = avg4(top[x0 + 2], top[x1 + 2], bottom[x0 + 2], bottom[x1 + 2]);
                let (cb, cr) = matrix.chroma(r, g, b);

                let at = cx * layout.step;
                planes[layout.cb.0].row_mut(cy)[layout.cb.1 + at] = cb;
                planes[layout.cr.0].row_mut(cy)[layout.cr.1 + at] = cr;
            }
        }

        Ok(())
    }
}

/// Composite straight-alpha RGBA over an opaque background, in place.
fn flatten_row(rgba: &mut [u8], bg: [u8; 3]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255_u16(u16::from(px[c]), a) + mul_div255_u16(u16::from(bg[c]), inv);
            px[c] = v.min(255) as u8;
        }
        px[3] = 255;
    }
}

fn write_luma_row(matrix: ColorMatrix, rgba: &[u8], out: &mut [u8]) {
    for (y, px) in out.iter_mut().zip(rgba.chunks_exact(4)) {
        *y = matrix.luma(px[0], px[1], px[2]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/converter.rs"]
mod tests;
