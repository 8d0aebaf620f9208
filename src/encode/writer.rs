use std::io::Write;

use crate::engine::units::UnitList;
use crate::foundation::error::{VidpipeError, VidpipeResult};

/// Copies unit payloads out to a byte sink.
///
/// Each unit is handed to the sink with a single `write` call; a sink that accepts fewer
/// bytes than the unit holds is a [`VidpipeError::ShortWrite`], one that claims more is an
/// [`VidpipeError::Io`], and the remaining units of that call are not written.
/// Nothing is retried.
#[derive(Debug)]
pub struct UnitWriter<W: Write> {
    sink: W,
    units_written: u64,
    bytes_written: u64,
}

impl<W: Write> UnitWriter<W> {
    /// Wrap `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            units_written: 0,
            bytes_written: 0,
        }
    }

    /// Write every unit in `units`, in order. Returns the number of units written.
    pub fn write_units(&mut self, units: &UnitList) -> VidpipeResult<usize> {
        for unit in units.iter() {
            let payload = unit.payload();
            let n = self.sink.write(payload)?;
            if n > payload.len() {
                return Err(VidpipeError::Io(std::io::Error::other(format!(
                    "sink reported {n} bytes written for a {} byte unit",
                    payload.len()
                ))));
            }
            if n < payload.len() {
                return Err(VidpipeError::ShortWrite {
                    expected: payload.len(),
                    written: n,
                });
            }
            self.units_written += 1;
            self.bytes_written += n as u64;
            tracing::trace!(len = n, "wrote unit");
        }
        Ok(units.len())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> VidpipeResult<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Units written so far.
    pub fn units_written(&self) -> u64 {
        self.units_written
    }

    /// Payload bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
