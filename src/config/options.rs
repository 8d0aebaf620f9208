use std::{fmt, str::FromStr};

use crate::config::params::Params;
use crate::convert::matrix::ColorMatrix;
use crate::foundation::core::Csp;
use crate::foundation::error::{VidpipeError, VidpipeResult};

/// Smallest output-unit list capacity an encoder is created with.
pub const MIN_UNIT_CAPACITY: usize = 3;

/// Engine log verbosity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No engine diagnostics.
    None = -1,
    /// Errors only.
    Error = 0,
    /// Errors and warnings.
    Warning = 1,
    /// Informational messages.
    #[default]
    Info = 2,
    /// Everything.
    Debug = 3,
}

impl LogLevel {
    /// Matching `tracing` level, or `None` when logging is off.
    pub fn as_tracing_level(self) -> Option<tracing::Level> {
        match self {
            Self::None => None,
            Self::Error => Some(tracing::Level::ERROR),
            Self::Warning => Some(tracing::Level::WARN),
            Self::Info => Some(tracing::Level::INFO),
            Self::Debug => Some(tracing::Level::DEBUG),
        }
    }
}

macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// All accepted values, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical lowercase name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = VidpipeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(VidpipeError::config(format!(
                        concat!("invalid ", $what, " name '{}'"),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum!(
    /// Speed/quality trade-off presets, fastest first.
    Preset, "preset", {
        Ultrafast => "ultrafast",
        Superfast => "superfast",
        Veryfast => "veryfast",
        Faster => "faster",
        Fast => "fast",
        Medium => "medium",
        Slow => "slow",
        Slower => "slower",
        Veryslow => "veryslow",
        Placebo => "placebo",
    }
);

named_enum!(
    /// Content tunings.
    Tune, "tune", {
        Film => "film",
        Animation => "animation",
        Grain => "grain",
        Stillimage => "stillimage",
        Psnr => "psnr",
        Ssim => "ssim",
        Fastdecode => "fastdecode",
        Zerolatency => "zerolatency",
    }
);

named_enum!(
    /// Bitstream profiles.
    Profile, "profile", {
        Baseline => "baseline",
        Main => "main",
        High => "high",
        High10 => "high10",
        High422 => "high422",
        High444 => "high444",
    }
);

/// User-level encoding options.
///
/// Width, height and `csp` are fixed for the lifetime of an encoder opened from these options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Options {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second, `0` when unspecified.
    pub frame_rate: u32,
    /// Tuning name, empty for none.
    pub tune: String,
    /// Preset name, empty for engine defaults.
    pub preset: String,
    /// Profile name, empty for none.
    pub profile: String,
    /// Engine log level.
    pub log_level: LogLevel,
    /// Target pixel format.
    pub csp: Csp,
    /// Presentation timestamp of the first submitted frame.
    pub pts: i64,
    /// Initial capacity of the reused output-unit list (at least 3).
    pub unit_capacity: usize,
    /// RGB to YCbCr coefficients.
    pub matrix: ColorMatrix,
    /// Colour straight-alpha sources are flattened over.
    pub background: [u8; 3],
    /// Pre-built engine configuration; built from the fields above when `None`.
    pub params: Option<Params>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            frame_rate: 0,
            tune: Tune::Zerolatency.to_string(),
            preset: Preset::Veryfast.to_string(),
            profile: Profile::Baseline.to_string(),
            log_level: LogLevel::Info,
            csp: Csp::I420,
            pts: 0,
            unit_capacity: MIN_UNIT_CAPACITY,
            matrix: ColorMatrix::default(),
            background: [0, 0, 0],
            params: None,
        }
    }
}

impl Options {
    /// Low-latency defaults for a `width x height` stream at `fps`.
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            frame_rate: fps,
            ..Self::default()
        }
    }

    /// Build [`Params`] from the current fields and store them in `params`.
    pub fn with_default_params(mut self) -> VidpipeResult<Self> {
        self.params = Some(Params::from_options(&self)?);
        Ok(self)
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> VidpipeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| VidpipeError::config(format!("invalid options json: {e}")))
    }

    /// Reject dimensions no picture can be allocated for.
    pub fn validate(&self) -> VidpipeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(VidpipeError::config(format!(
                "width/height must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub(crate) fn parsed_preset(&self) -> VidpipeResult<Option<Preset>> {
        parse_optional(&self.preset)
    }

    pub(crate) fn parsed_tune(&self) -> VidpipeResult<Option<Tune>> {
        parse_optional(&self.tune)
    }

    pub(crate) fn parsed_profile(&self) -> VidpipeResult<Option<Profile>> {
        parse_optional(&self.profile)
    }
}

fn parse_optional<T: FromStr<Err = VidpipeError>>(s: &str) -> VidpipeResult<Option<T>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    s.parse().map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
