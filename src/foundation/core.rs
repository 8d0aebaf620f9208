use crate::foundation::error::{VidpipeError, VidpipeResult};

/// Planar 4:2:0 pixel formats accepted by engines.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Csp {
    /// Y, Cb, Cr planes.
    #[default]
    I420,
    /// Y, Cr, Cb planes.
    Yv12,
    /// Y plane plus one interleaved CbCr plane.
    Nv12,
}

impl Csp {
    /// Number of planes a picture in this format holds.
    pub fn plane_count(self) -> usize {
        match self {
            Self::I420 | Self::Yv12 => 3,
            Self::Nv12 => 2,
        }
    }

    /// Sample geometry `(row_bytes, rows)` of plane `index` for a `width x height` picture.
    pub fn plane_geometry(
        self,
        index: usize,
        width: u32,
        height: u32,
    ) -> VidpipeResult<(usize, usize)> {
        let (cw, ch) = chroma_dims(width, height);
        let geom = match (self, index) {
            (_, 0) => (width as usize, height as usize),
            (Self::I420 | Self::Yv12, 1 | 2) => (cw as usize, ch as usize),
            (Self::Nv12, 1) => (cw as usize * 2, ch as usize),
            _ => {
                return Err(VidpipeError::config(format!(
                    "{self:?} has no plane {index}"
                )));
            }
        };
        Ok(geom)
    }

    /// Where the Cb and Cr samples of this format live.
    pub fn chroma_layout(self) -> ChromaLayout {
        match self {
            Self::I420 => ChromaLayout {
                cb: (1, 0),
                cr: (2, 0),
                step: 1,
            },
            Self::Yv12 => ChromaLayout {
                cb: (2, 0),
                cr: (1, 0),
                step: 1,
            },
            // Cb at even bytes, Cr at odd bytes of plane 1.
            Self::Nv12 => ChromaLayout {
                cb: (1, 0),
                cr: (1, 1),
                step: 2,
            },
        }
    }
}

/// Location of chroma samples inside a picture's planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromaLayout {
    /// `(plane, byte offset within a row)` of the first Cb sample.
    pub cb: (usize, usize),
    /// `(plane, byte offset within a row)` of the first Cr sample.
    pub cr: (usize, usize),
    /// Bytes between consecutive samples of one component.
    pub step: usize,
}

/// Chroma plane dimensions for 4:2:0 sampling, rounding odd sizes up.
pub fn chroma_dims(width: u32, height: u32) -> (u32, u32) {
    (width.div_ceil(2), height.div_ceil(2))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
