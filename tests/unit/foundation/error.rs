use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VidpipeError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        VidpipeError::alloc("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(VidpipeError::engine("x").to_string().contains("engine error:"));
    assert!(
        VidpipeError::ShortWrite {
            expected: 10,
            written: 4
        }
        .to_string()
        .contains("io error:")
    );
}

#[test]
fn kinds_separate_io_from_engine() {
    let short = VidpipeError::ShortWrite {
        expected: 3,
        written: 1,
    };
    assert_eq!(short.kind(), ErrorKind::Io);
    assert_eq!(
        VidpipeError::from(std::io::Error::other("pipe closed")).kind(),
        ErrorKind::Io
    );
    assert_eq!(VidpipeError::engine("x").kind(), ErrorKind::Engine);
    assert_eq!(
        VidpipeError::PartialFlush {
            pending: 2,
            reason: "boom".to_string()
        }
        .kind(),
        ErrorKind::Engine
    );
    assert_eq!(VidpipeError::config("x").kind(), ErrorKind::Configuration);
    assert_eq!(VidpipeError::alloc("x").kind(), ErrorKind::Allocation);
}

#[test]
fn partial_flush_reports_pending_count() {
    let err = VidpipeError::PartialFlush {
        pending: 4,
        reason: "drain failed".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("4 frame(s) still pending"));
    assert!(msg.contains("drain failed"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VidpipeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
