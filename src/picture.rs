use crate::foundation::core::Csp;
use crate::foundation::error::{VidpipeError, VidpipeResult};
use crate::foundation::math::align_up;

/// Row alignment of every plane, in bytes.
pub const PLANE_ALIGN: usize = 16;

/// One 2-D sample buffer.
#[derive(Clone, Debug)]
pub struct Plane {
    data: Vec<u8>,
    stride: usize,
    row_bytes: usize,
    rows: usize,
}

impl Plane {
    fn alloc(row_bytes: usize, rows: usize, fill: u8) -> VidpipeResult<Self> {
        let stride = align_up(row_bytes, PLANE_ALIGN)
            .ok_or_else(|| VidpipeError::alloc("plane stride overflows usize"))?;
        let len = stride
            .checked_mul(rows)
            .ok_or_else(|| VidpipeError::alloc("plane size overflows usize"))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| VidpipeError::alloc(format!("cannot allocate {len} byte plane: {e}")))?;
        data.resize(len, fill);

        Ok(Self {
            data,
            stride,
            row_bytes,
            rows,
        })
    }

    /// Bytes between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Meaningful bytes per row (excludes stride padding).
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whole buffer, `stride * rows` bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Row `y` without padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes]
    }

    /// Mutable row `y` without padding.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.row_bytes]
    }
}

/// Reusable picture submitted to an engine: the planes of one frame plus its timestamp.
///
/// A picture is allocated once per encoder and overwritten in place for every frame.
#[derive(Debug)]
pub struct Picture {
    csp: Csp,
    width: u32,
    height: u32,
    planes: Vec<Plane>,
    pts: i64,
}

impl Picture {
    /// Allocate planes for a `width x height` picture in `csp`.
    ///
    /// Luma starts black and chroma neutral.
    pub fn alloc(csp: Csp, width: u32, height: u32) -> VidpipeResult<Self> {
        if width == 0 || height == 0 {
            return Err(VidpipeError::alloc(format!(
                "cannot allocate {width}x{height} picture"
            )));
        }

        let mut planes = Vec::with_capacity(csp.plane_count());
        for i in 0..csp.plane_count() {
            let (row_bytes, rows) = csp.plane_geometry(i, width, height)?;
            let fill = if i == 0 { 0 } else { 128 };
            planes.push(Plane::alloc(row_bytes, rows, fill)?);
        }

        Ok(Self {
            csp,
            width,
            height,
            planes,
            pts: 0,
        })
    }

    /// Pixel format.
    pub fn csp(&self) -> Csp {
        self.csp
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Presentation timestamp.
    pub fn pts(&self) -> i64 {
        self.pts
    }

    /// Set the presentation timestamp.
    pub fn set_pts(&mut self, pts: i64) {
        self.pts = pts;
    }

    /// All planes in format order.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Mutable planes in format order.
    pub fn planes_mut(&mut self) -> &mut [Plane] {
        &mut self.planes
    }

    /// Plane `i`.
    pub fn plane(&self, i: usize) -> &Plane {
        &self.planes[i]
    }

    /// Number of bytes [`Picture::copy_planar_to`] appends.
    pub fn planar_len(&self) -> usize {
        let (cw, ch) = crate::foundation::core::chroma_dims(self.width, self.height);
        self.width as usize * self.height as usize + 2 * cw as usize * ch as usize
    }

    /// Append the samples as tightly packed Y, Cb, Cr planes.
    ///
    /// Stride padding is dropped and interleaved or swapped chroma is put back in Cb, Cr order.
    pub fn copy_planar_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.planar_len());

        let luma = &self.planes[0];
        for y in 0..luma.rows() {
            out.extend_from_slice(luma.row(y));
        }

        let layout = self.csp.chroma_layout();
        for (plane, offset) in [layout.cb, layout.cr] {
            let p = &self.planes[plane];
            for y in 0..p.rows() {
                let row = p.row(y);
                if layout.step == 1 {
                    out.extend_from_slice(row);
                } else {
                    out.extend(row[offset..].iter().step_by(layout.step));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/picture.rs"]
mod tests;
