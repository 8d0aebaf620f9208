use std::io::Write;

use crate::config::options::{MIN_UNIT_CAPACITY, Options};
use crate::config::params::Params;
use crate::convert::converter::PixelConverter;
use crate::convert::source::SourceImage;
use crate::encode::writer::UnitWriter;
use crate::engine::units::UnitList;
use crate::engine::{Backend, Engine};
use crate::foundation::error::{VidpipeError, VidpipeResult};
use crate::picture::Picture;

/// Counters for one encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncoderStats {
    /// Frames accepted by the engine.
    pub frames_submitted: u64,
    /// Drain calls made by [`Encoder::flush`].
    pub drain_calls: u64,
    /// Units written to the sink, headers included.
    pub units_written: u64,
    /// Payload bytes written to the sink, headers included.
    pub bytes_written: u64,
}

/// Streams images through a compression engine into a byte sink.
///
/// An encoder owns one [`Picture`] and one engine handle for its whole life. Images are
/// converted into the picture, stamped with consecutive timestamps and submitted; whatever the
/// engine returns is written to the sink before the call returns. Calls must be sequential.
///
/// Dropping an encoder releases the picture and closes the engine, exactly as
/// [`Encoder::close`] does.
pub struct Encoder<B: Backend, W: Write> {
    backend: B,
    engine: Option<B::Engine>,
    picture: Option<Picture>,
    converter: PixelConverter,
    units: UnitList,
    writer: UnitWriter<W>,
    params: Params,
    pts: i64,
    frames_submitted: u64,
    drain_calls: u64,
}

impl<B: Backend, W: Write> Encoder<B, W> {
    /// Allocate the picture, open the engine and write the stream headers to `sink`.
    ///
    /// On failure everything already acquired is released before returning.
    #[tracing::instrument(skip_all, fields(width = opts.width, height = opts.height))]
    pub fn open(backend: B, opts: &Options, sink: W) -> VidpipeResult<Self> {
        opts.validate()?;
        let params = match &opts.params {
            Some(p) => p.clone(),
            None => Params::from_options(opts)?,
        };
        params.ensure_matches(opts)?;
        let converter = PixelConverter::from_options(opts)?;

        let picture = backend
            .alloc_picture(opts.csp, opts.width, opts.height)
            .map_err(|e| match e {
                VidpipeError::Alloc(_) => e,
                other => VidpipeError::alloc(format!("cannot allocate picture: {other}")),
            })?;

        let engine = match backend.open(&params) {
            Ok(engine) => engine,
            Err(e) => {
                backend.release_picture(picture);
                return Err(match e {
                    VidpipeError::Alloc(_) => e,
                    other => VidpipeError::alloc(format!("cannot open the engine: {other}")),
                });
            }
        };

        let mut enc = Self {
            backend,
            engine: Some(engine),
            picture: Some(picture),
            converter,
            units: UnitList::with_capacity(opts.unit_capacity.max(MIN_UNIT_CAPACITY)),
            writer: UnitWriter::new(sink),
            params,
            pts: opts.pts,
            frames_submitted: 0,
            drain_calls: 0,
        };

        // Dropping `enc` on error runs the same release path as `close`.
        let engine = enc
            .engine
            .as_mut()
            .ok_or_else(|| VidpipeError::engine("encoder is already closed"))?;
        let n = engine
            .headers(&mut enc.units)
            .map_err(|e| VidpipeError::engine(format!("cannot encode headers: {e}")))?;
        if n > 0 {
            enc.writer.write_units(&enc.units)?;
        }
        tracing::debug!(header_units = n, "encoder open");
        Ok(enc)
    }

    /// Convert `image`, submit it, and write whatever units the engine returns.
    ///
    /// Returns the number of units written; zero means the engine buffered the frame. An image
    /// that does not match the configured size fails before the engine is called.
    pub fn encode<S: SourceImage + ?Sized>(&mut self, image: &S) -> VidpipeResult<usize> {
        let Some(picture) = self.picture.as_mut() else {
            return Err(VidpipeError::engine("encoder is already closed"));
        };
        let next_pts = self.pts.checked_add(1).ok_or_else(|| {
            VidpipeError::config(format!("pts {} cannot be followed by another frame", self.pts))
        })?;
        self.converter.convert(image, picture)?;

        picture.set_pts(self.pts);
        self.pts = next_pts;

        let engine = self
            .engine
            .as_mut()
            .ok_or_else(|| VidpipeError::engine("encoder is already closed"))?;
        let n = engine
            .encode(Some(&*picture), &mut self.units)
            .map_err(|e| VidpipeError::engine(format!("cannot encode picture: {e}")))?;
        self.frames_submitted += 1;
        tracing::debug!(pts = picture.pts(), units = n, "submitted frame");

        if n > 0 {
            self.writer.write_units(&self.units)?;
        }
        Ok(n)
    }

    /// Drain every frame the engine still holds and write its units.
    ///
    /// Returns the number of units written. With nothing pending this makes no engine calls.
    /// A failed drain call aborts the flush with [`VidpipeError::PartialFlush`]; frames the
    /// engine still held at that point are lost.
    pub fn flush(&mut self) -> VidpipeResult<usize> {
        let mut written = 0;
        loop {
            let engine = self
                .engine
                .as_mut()
                .ok_or_else(|| VidpipeError::engine("encoder is already closed"))?;
            let pending = engine.delayed_frames();
            if pending == 0 {
                break;
            }

            let res = engine.encode(None, &mut self.units);
            self.drain_calls += 1;
            let n = match res {
                Ok(n) => n,
                Err(e) => {
                    let pending = engine.delayed_frames();
                    tracing::warn!(pending, error = %e, "flush aborted");
                    return Err(VidpipeError::PartialFlush {
                        pending,
                        reason: e.to_string(),
                    });
                }
            };
            if n > 0 {
                written += self.writer.write_units(&self.units)?;
            }
        }
        self.writer.flush()?;
        tracing::debug!(units = written, "flush complete");
        Ok(written)
    }

    /// Release the picture and close the engine, in that order.
    pub fn close(mut self) {
        self.release();
    }

    /// Timestamp the next submitted frame will carry.
    pub fn next_pts(&self) -> i64 {
        self.pts
    }

    /// Frames the engine holds that have not produced output yet.
    pub fn delayed_frames(&self) -> usize {
        self.engine.as_ref().map_or(0, |e| e.delayed_frames())
    }

    /// Engine configuration this encoder was opened with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Counters so far.
    pub fn stats(&self) -> EncoderStats {
        EncoderStats {
            frames_submitted: self.frames_submitted,
            drain_calls: self.drain_calls,
            units_written: self.writer.units_written(),
            bytes_written: self.writer.bytes_written(),
        }
    }

    fn release(&mut self) {
        if let Some(picture) = self.picture.take() {
            self.backend.release_picture(picture);
        }
        if let Some(engine) = self.engine.take() {
            engine.close();
            tracing::debug!(
                frames = self.frames_submitted,
                units = self.writer.units_written(),
                "encoder closed"
            );
        }
    }
}

impl<B: Backend, W: Write> Drop for Encoder<B, W> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;
