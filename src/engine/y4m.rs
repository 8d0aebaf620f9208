//! Uncompressed YUV4MPEG2 output behind the [`Engine`] contract.
//!
//! The stream header is emitted as the single header unit. Every picture becomes two units,
//! the `FRAME` marker and the packed Y, Cb, Cr samples. Pictures are held back until more than
//! `delay` are buffered, which models the frame latency of a lookahead encoder.

use std::collections::VecDeque;

use crate::config::options::LogLevel;
use crate::config::params::Params;
use crate::engine::units::UnitList;
use crate::engine::{Backend, Engine};
use crate::foundation::error::{VidpipeError, VidpipeResult};
use crate::picture::Picture;

const FRAME_MARKER: &[u8] = b"FRAME\n";

/// Opens [`Y4mEngine`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Y4mBackend {
    delay: Option<usize>,
}

impl Y4mBackend {
    /// Backend whose engines hold [`Params::frame_delay`] pictures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose engines hold exactly `delay` pictures, whatever the params say.
    pub fn with_delay(delay: usize) -> Self {
        Self { delay: Some(delay) }
    }
}

impl Backend for Y4mBackend {
    type Engine = Y4mEngine;

    fn open(&self, params: &Params) -> VidpipeResult<Y4mEngine> {
        if params.width == 0 || params.height == 0 {
            return Err(VidpipeError::alloc(
                "y4m: cannot open engine for an empty picture",
            ));
        }
        if params.fps_num == 0 || params.fps_den == 0 {
            return Err(VidpipeError::alloc(
                "y4m: cannot open engine without a frame rate",
            ));
        }
        let delay = self.delay.unwrap_or_else(|| params.frame_delay());
        Ok(Y4mEngine {
            params: params.clone(),
            delay,
            queue: VecDeque::with_capacity(delay + 1),
            free: Vec::with_capacity(delay + 1),
            last_pts: None,
            frames_in: 0,
            frames_out: 0,
        })
    }
}

struct PendingFrame {
    pts: i64,
    samples: Vec<u8>,
}

/// YUV4MPEG2 engine handle.
pub struct Y4mEngine {
    params: Params,
    delay: usize,
    queue: VecDeque<PendingFrame>,
    free: Vec<Vec<u8>>,
    last_pts: Option<i64>,
    frames_in: u64,
    frames_out: u64,
}

impl Y4mEngine {
    /// Stream header line, including the trailing newline.
    pub fn header_line(&self) -> String {
        let p = &self.params;
        let range = if p.full_range { "FULL" } else { "LIMITED" };
        format!(
            "YUV4MPEG2 W{} H{} F{}:{} Ip A1:1 C420jpeg XCOLORRANGE={range}\n",
            p.width, p.height, p.fps_num, p.fps_den
        )
    }

    fn emit(&mut self, frame: PendingFrame, units: &mut UnitList) {
        units.push(FRAME_MARKER);
        units.push(&frame.samples);
        self.frames_out += 1;
        if self.params.log_level >= LogLevel::Debug {
            tracing::debug!(pts = frame.pts, "y4m: emitted frame");
        }
        self.free.push(frame.samples);
    }
}

impl Engine for Y4mEngine {
    fn headers(&mut self, units: &mut UnitList) -> VidpipeResult<usize> {
        units.clear();
        units.push(self.header_line().as_bytes());
        Ok(units.len())
    }

    fn encode(&mut self, picture: Option<&Picture>, units: &mut UnitList) -> VidpipeResult<usize> {
        units.clear();

        let Some(pic) = picture else {
            if let Some(frame) = self.queue.pop_front() {
                self.emit(frame, units);
            }
            return Ok(units.len());
        };

        let p = &self.params;
        if (pic.width(), pic.height(), pic.csp()) != (p.width, p.height, p.csp) {
            return Err(VidpipeError::engine(format!(
                "y4m: picture is {}x{} {:?}, engine expects {}x{} {:?}",
                pic.width(),
                pic.height(),
                pic.csp(),
                p.width,
                p.height,
                p.csp
            )));
        }
        if let Some(last) = self.last_pts
            && pic.pts() <= last
        {
            return Err(VidpipeError::engine(format!(
                "y4m: non-monotonic pts {} after {last}",
                pic.pts()
            )));
        }
        self.last_pts = Some(pic.pts());

        let mut samples = self.free.pop().unwrap_or_default();
        samples.clear();
        pic.copy_planar_to(&mut samples);
        self.queue.push_back(PendingFrame {
            pts: pic.pts(),
            samples,
        });
        self.frames_in += 1;

        if self.queue.len() > self.delay
            && let Some(frame) = self.queue.pop_front()
        {
            self.emit(frame, units);
        }
        Ok(units.len())
    }

    fn delayed_frames(&self) -> usize {
        self.queue.len()
    }

    fn close(self) {
        if !self.queue.is_empty() {
            tracing::warn!(
                dropped = self.queue.len(),
                "y4m: engine closed with buffered frames"
            );
        }
        if self.params.log_level >= LogLevel::Debug {
            tracing::debug!(
                frames_in = self.frames_in,
                frames_out = self.frames_out,
                "y4m: engine closed"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/y4m.rs"]
mod tests;
