use crate::config::options::{LogLevel, Options, Preset, Profile, Tune};
use crate::foundation::core::Csp;
use crate::foundation::error::{VidpipeError, VidpipeResult};

const DEFAULT_FPS_NUM: u32 = 25;
const DEFAULT_KEYINT_MAX: u32 = 250;
const DEFAULT_BFRAMES: u32 = 3;
const DEFAULT_RC_LOOKAHEAD: u32 = 40;

/// Engine-native configuration, derived once from [`Options`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Params {
    /// Picture width in pixels.
    pub width: u32,
    /// Picture height in pixels.
    pub height: u32,
    /// Input pixel format.
    pub csp: Csp,
    /// Frame rate numerator.
    pub fps_num: u32,
    /// Frame rate denominator.
    pub fps_den: u32,
    /// Maximum distance between keyframes.
    pub keyint_max: u32,
    /// Periodic intra refresh instead of keyframes.
    pub intra_refresh: bool,
    /// Variable frame rate input (timestamps drive rate control).
    pub vfr_input: bool,
    /// Repeat parameter sets before every keyframe.
    pub repeat_headers: bool,
    /// Start-code delimited output units.
    pub annexb: bool,
    /// Consecutive bidirectional frames.
    pub bframes: u32,
    /// Frames of rate-control lookahead.
    pub rc_lookahead: u32,
    /// Profile the stream is constrained to.
    pub profile: Option<Profile>,
    /// Full-range samples (0-255) rather than studio range.
    pub full_range: bool,
    /// Engine log verbosity.
    pub log_level: LogLevel,
}

impl Params {
    /// Engine defaults for a `width x height` picture, before any preset.
    pub fn engine_default(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            csp: Csp::I420,
            fps_num: DEFAULT_FPS_NUM,
            fps_den: 1,
            keyint_max: DEFAULT_KEYINT_MAX,
            intra_refresh: false,
            vfr_input: true,
            repeat_headers: false,
            annexb: true,
            bframes: DEFAULT_BFRAMES,
            rc_lookahead: DEFAULT_RC_LOOKAHEAD,
            profile: None,
            full_range: false,
            log_level: LogLevel::Info,
        }
    }

    /// Translate user options into engine configuration.
    ///
    /// Preset and tune are applied only when both a preset and a profile are named; the
    /// profile is applied last and may override preset choices.
    pub fn from_options(opts: &Options) -> VidpipeResult<Self> {
        opts.validate()?;

        let preset = opts.parsed_preset()?;
        let tune = opts.parsed_tune()?;
        let profile = opts.parsed_profile()?;

        let mut p = Self::engine_default(opts.width, opts.height);
        if let (Some(preset), Some(_)) = (preset, profile) {
            p.apply_preset(preset);
            if let Some(tune) = tune {
                p.apply_tune(tune);
            }
        }

        p.csp = opts.csp;
        p.vfr_input = false;
        p.repeat_headers = true;
        p.annexb = true;
        p.log_level = opts.log_level;
        p.full_range = opts.matrix.is_full_range();

        if opts.frame_rate > 0 {
            p.fps_num = opts.frame_rate;
            p.fps_den = 1;
            p.keyint_max = opts.frame_rate;
            p.intra_refresh = true;
        }

        if let Some(profile) = profile {
            p.apply_profile(profile);
        }
        Ok(p)
    }

    /// Frames the engine may hold before it starts emitting output.
    pub fn frame_delay(&self) -> usize {
        (self.bframes + self.rc_lookahead) as usize
    }

    /// Check that these params describe the picture geometry in `opts`.
    pub fn ensure_matches(&self, opts: &Options) -> VidpipeResult<()> {
        if self.width != opts.width || self.height != opts.height || self.csp != opts.csp {
            return Err(VidpipeError::config(format!(
                "params describe {}x{} {:?}, options describe {}x{} {:?}",
                self.width, self.height, self.csp, opts.width, opts.height, opts.csp
            )));
        }
        if self.fps_num == 0 || self.fps_den == 0 {
            return Err(VidpipeError::config("params fps must be non-zero"));
        }
        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json_string(&self) -> VidpipeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VidpipeError::config(format!("serialize params: {e}")))
    }

    /// Parse from JSON.
    pub fn from_json_str(s: &str) -> VidpipeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| VidpipeError::config(format!("invalid params json: {e}")))
    }

    fn apply_preset(&mut self, preset: Preset) {
        let (bframes, lookahead) = match preset {
            Preset::Ultrafast => (0, 0),
            Preset::Superfast => (3, 0),
            Preset::Veryfast => (3, 10),
            Preset::Faster => (3, 20),
            Preset::Fast => (3, 30),
            Preset::Medium => (3, 40),
            Preset::Slow => (3, 50),
            Preset::Slower | Preset::Veryslow => (8, 60),
            Preset::Placebo => (16, 60),
        };
        self.bframes = bframes;
        self.rc_lookahead = lookahead;
    }

    fn apply_tune(&mut self, tune: Tune) {
        match tune {
            Tune::Zerolatency => {
                self.bframes = 0;
                self.rc_lookahead = 0;
            }
            Tune::Animation if self.bframes > 1 => self.bframes += 2,
            _ => {}
        }
    }

    fn apply_profile(&mut self, profile: Profile) {
        // Baseline has no B-slices.
        if profile == Profile::Baseline {
            self.bframes = 0;
        }
        self.profile = Some(profile);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
