use super::*;
use crate::foundation::error::ErrorKind;

/// Accepts at most `limit` bytes per call after `full_writes` complete writes.
struct Stingy {
    out: Vec<u8>,
    full_writes: usize,
    limit: usize,
    calls: usize,
}

impl Write for Stingy {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.calls += 1;
        let n = if self.calls > self.full_writes {
            buf.len().min(self.limit)
        } else {
            buf.len()
        };
        self.out.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Boastful;

impl Write for Boastful {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len() + 1)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("pipe closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn units(payloads: &[&str]) -> UnitList {
    let mut list = UnitList::with_capacity(3);
    for p in payloads {
        list.push(p.as_bytes());
    }
    list
}

#[test]
fn writes_units_in_order() {
    let mut w = UnitWriter::new(Vec::new());
    assert_eq!(w.write_units(&units(&["ab", "", "cde"])).unwrap(), 3);
    assert_eq!(w.get_ref().as_slice(), b"abcde");
    assert_eq!(w.units_written(), 3);
    assert_eq!(w.bytes_written(), 5);
}

#[test]
fn short_write_stops_remaining_units() {
    let sink = Stingy {
        out: Vec::new(),
        full_writes: 1,
        limit: 1,
        calls: 0,
    };
    let mut w = UnitWriter::new(sink);
    let err = w
        .write_units(&units(&["one", "two", "three"]))
        .unwrap_err();
    assert!(matches!(
        err,
        VidpipeError::ShortWrite {
            expected: 3,
            written: 1
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Io);
    // Third unit never reached the sink.
    assert_eq!(w.get_ref().calls, 2);
    assert_eq!(w.get_ref().out, b"onet");
    assert_eq!(w.units_written(), 1);
}

#[test]
fn sink_errors_are_io_errors() {
    let mut w = UnitWriter::new(Broken);
    let err = w.write_units(&units(&["x"])).unwrap_err();
    assert!(matches!(err, VidpipeError::Io(_)));
}

#[test]
fn empty_list_writes_nothing() {
    let mut w = UnitWriter::new(Broken);
    assert_eq!(w.write_units(&UnitList::default()).unwrap(), 0);
}

#[test]
fn over_reported_write_is_io_not_short_write() {
    let mut w = UnitWriter::new(Boastful);
    let err = w.write_units(&units(&["ab", "cd"])).unwrap_err();
    assert!(matches!(err, VidpipeError::Io(_)));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!err.to_string().contains("short write"));
    assert_eq!(w.units_written(), 0);
}
