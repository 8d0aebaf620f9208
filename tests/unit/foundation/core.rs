use super::*;

#[test]
fn chroma_dims_round_odd_sizes_up() {
    assert_eq!(chroma_dims(352, 288), (176, 144));
    assert_eq!(chroma_dims(5, 3), (3, 2));
    assert_eq!(chroma_dims(1, 1), (1, 1));
}

#[test]
fn plane_geometry_per_format() {
    assert_eq!(Csp::I420.plane_geometry(0, 6, 4).unwrap(), (6, 4));
    assert_eq!(Csp::I420.plane_geometry(1, 6, 4).unwrap(), (3, 2));
    assert_eq!(Csp::Yv12.plane_geometry(2, 6, 4).unwrap(), (3, 2));
    assert_eq!(Csp::Nv12.plane_geometry(1, 6, 4).unwrap(), (6, 2));
    assert!(Csp::Nv12.plane_geometry(2, 6, 4).is_err());
}

#[test]
fn chroma_layout_per_format() {
    assert_eq!(Csp::I420.chroma_layout().cb, (1, 0));
    assert_eq!(Csp::I420.chroma_layout().cr, (2, 0));
    assert_eq!(Csp::Yv12.chroma_layout().cb, (2, 0));
    let nv12 = Csp::Nv12.chroma_layout();
    assert_eq!((nv12.cb, nv12.cr, nv12.step), ((1, 0), (1, 1), 2));
    assert_eq!(Csp::Nv12.plane_count(), 2);
}

#[test]
fn csp_serde_names_are_lowercase() {
    assert_eq!(serde_json::to_string(&Csp::Nv12).unwrap(), "\"nv12\"");
    let csp: Csp = serde_json::from_str("\"yv12\"").unwrap();
    assert_eq!(csp, Csp::Yv12);
}
