//! RGB to YCbCr coefficient sets.
//!
//! All matrices use 16.16 fixed point with round-to-nearest and clamp to `0..=255`.

/// Colour matrix used for RGB to YCbCr conversion.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMatrix {
    /// ITU-R BT.601, full range (JFIF).
    ///
    /// Y = 0.299 R + 0.587 G + 0.114 B
    #[default]
    Bt601,
    /// ITU-R BT.709, full range.
    ///
    /// Y = 0.2126 R + 0.7152 G + 0.0722 B
    Bt709,
    /// ITU-R BT.601, studio range (Y: 16-235, Cb/Cr: 16-240).
    Bt601Limited,
}

const HALF: i32 = 1 << 15;

impl ColorMatrix {
    /// `true` unless samples are squeezed into studio range.
    pub const fn is_full_range(self) -> bool {
        !matches!(self, Self::Bt601Limited)
    }

    #[inline]
    const fn y_coefficients(self) -> (i32, i32, i32, i32) {
        match self {
            Self::Bt601 => (19595, 38470, 7471, 0),
            Self::Bt709 => (13933, 46871, 4732, 0),
            // 66/256, 129/256, 25/256
            Self::Bt601Limited => (16896, 33024, 6400, 16 << 16),
        }
    }

    #[inline]
    const fn cb_coefficients(self) -> (i32, i32, i32) {
        match self {
            Self::Bt601 => (-11056, -21712, 32768),
            Self::Bt709 => (-7508, -25260, 32768),
            Self::Bt601Limited => (-9728, -18944, 28672),
        }
    }

    #[inline]
    const fn cr_coefficients(self) -> (i32, i32, i32) {
        match self {
            Self::Bt601 => (32768, -27440, -5328),
            Self::Bt709 => (32768, -29764, -3004),
            Self::Bt601Limited => (28672, -24064, -4608),
        }
    }

    /// Luma of one RGB sample.
    #[inline]
    pub fn luma(self, r: u8, g: u8, b: u8) -> u8 {
        let (kr, kg, kb, off) = self.y_coefficients();
        fixed_to_u8(kr * i32::from(r) + kg * i32::from(g) + kb * i32::from(b) + off)
    }

    /// `(Cb, Cr)` of one RGB sample.
    #[inline]
    pub fn chroma(self, r: u8, g: u8, b: u8) -> (u8, u8) {
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
        let (ur, ug, ub) = self.cb_coefficients();
        let (vr, vg, vb) = self.cr_coefficients();
        (
            fixed_to_u8(ur * r + ug * g + ub * b + (128 << 16)),
            fixed_to_u8(vr * r + vg * g + vb * b + (128 << 16)),
        )
    }
}

#[inline]
fn fixed_to_u8(v: i32) -> u8 {
    ((v + HALF) >> 16).clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/convert/matrix.rs"]
mod tests;
