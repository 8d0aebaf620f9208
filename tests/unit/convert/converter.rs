use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::*;
use crate::convert::source::{PixelLayout, RawImage};

fn converter(w: u32, h: u32, csp: Csp) -> PixelConverter {
    PixelConverter::new(w, h, csp, ColorMatrix::Bt601, [0, 0, 0]).unwrap()
}

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb(rgb))
}

#[test]
fn plane_sizes_for_even_dimensions() {
    for (w, h) in [(2, 2), (16, 8), (352, 288), (34, 6)] {
        let mut conv = converter(w, h, Csp::I420);
        let mut pic = Picture::alloc(Csp::I420, w, h).unwrap();
        conv.convert(&solid(w, h, [10, 200, 30]), &mut pic).unwrap();

        let luma: usize = (0..pic.plane(0).rows())
            .map(|y| pic.plane(0).row(y).len())
            .sum();
        assert_eq!(luma, (w * h) as usize);
        for i in 1..3 {
            let p = pic.plane(i);
            assert_eq!(p.row_bytes() * p.rows(), (w / 2 * h / 2) as usize);
        }
    }
}

#[test]
fn solid_colour_matches_matrix() {
    let mut conv = converter(4, 4, Csp::I420);
    let mut pic = Picture::alloc(Csp::I420, 4, 4).unwrap();
    conv.convert(&solid(4, 4, [255, 0, 0]), &mut pic).unwrap();

    let y = ColorMatrix::Bt601.luma(255, 0, 0);
    let (cb, cr) = ColorMatrix::Bt601.chroma(255, 0, 0);
    assert!(pic.plane(0).row(3).iter().all(|&v| v == y));
    assert_eq!(pic.plane(1).row(1), &[cb, cb]);
    assert_eq!(pic.plane(2).row(0), &[cr, cr]);
}

#[test]
fn chroma_is_box_average_of_rgb() {
    // Left column white, right column black: each 2x2 block averages to mid grey.
    let img = RgbImage::from_fn(2, 2, |x, _| if x == 0 { Rgb([255; 3]) } else { Rgb([0; 3]) });
    let mut conv = converter(2, 2, Csp::I420);
    let mut pic = Picture::alloc(Csp::I420, 2, 2).unwrap();
    conv.convert(&img, &mut pic).unwrap();

    assert_eq!(pic.plane(0).row(0), &[255, 0]);
    let (cb, cr) = ColorMatrix::Bt601.chroma(128, 128, 128);
    assert_eq!(pic.plane(1).row(0), &[cb]);
    assert_eq!(pic.plane(2).row(0), &[cr]);
}

#[test]
fn odd_dimensions_clamp_to_edge() {
    let img = RgbImage::from_fn(3, 3, |x, y| {
        if x == 2 || y == 2 {
            Rgb([0, 0, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let mut conv = converter(3, 3, Csp::I420);
    let mut pic = Picture::alloc(Csp::I420, 3, 3).unwrap();
    conv.convert(&img, &mut pic).unwrap();

    assert_eq!(pic.plane(1).row_bytes(), 2);
    assert_eq!(pic.plane(1).rows(), 2);
    // The bottom-right block only sees the blue edge pixel, replicated.
    let (cb_blue, _) = ColorMatrix::Bt601.chroma(0, 0, 255);
    assert_eq!(pic.plane(1).row(1)[1], cb_blue);
    let (cb_black, _) = ColorMatrix::Bt601.chroma(0, 0, 0);
    assert_eq!(pic.plane(1).row(0)[0], cb_black);
    assert_eq!(pic.plane(0).row(2), &[29, 29, 29]);
}

#[test]
fn yv12_swaps_and_nv12_interleaves_chroma() {
    let img = solid(4, 2, [0, 0, 255]);
    let (cb, cr) = ColorMatrix::Bt601.chroma(0, 0, 255);

    let mut conv = converter(4, 2, Csp::Yv12);
    let mut pic = Picture::alloc(Csp::Yv12, 4, 2).unwrap();
    conv.convert(&img, &mut pic).unwrap();
    assert_eq!(pic.plane(1).row(0), &[cr, cr]);
    assert_eq!(pic.plane(2).row(0), &[cb, cb]);

    let mut conv = converter(4, 2, Csp::Nv12);
    let mut pic = Picture::alloc(Csp::Nv12, 4, 2).unwrap();
    conv.convert(&img, &mut pic).unwrap();
    assert_eq!(pic.plane(1).row(0), &[cb, cr, cb, cr]);
}

#[test]
fn channel_order_does_not_change_output() {
    let rgb = solid(2, 2, [12, 34, 56]);
    let bgra = [56u8, 34, 12, 255].repeat(4);
    let raw = RawImage::packed(&bgra, 2, 2, PixelLayout::Bgra8).unwrap();

    let mut conv = converter(2, 2, Csp::I420);
    let mut a = Picture::alloc(Csp::I420, 2, 2).unwrap();
    let mut b = Picture::alloc(Csp::I420, 2, 2).unwrap();
    conv.convert(&rgb, &mut a).unwrap();
    conv.convert(&raw, &mut b).unwrap();
    for i in 0..3 {
        assert_eq!(a.plane(i).as_slice(), b.plane(i).as_slice());
    }
}

#[test]
fn alpha_is_flattened_over_background() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
    let mut conv = PixelConverter::new(2, 2, Csp::I420, ColorMatrix::Bt601, [0, 0, 255]).unwrap();
    let mut pic = Picture::alloc(Csp::I420, 2, 2).unwrap();
    conv.convert(&img, &mut pic).unwrap();
    assert_eq!(pic.plane(0).row(0)[0], ColorMatrix::Bt601.luma(0, 0, 255));
}

#[test]
fn size_mismatch_fails_before_writing() {
    let mut conv = converter(4, 4, Csp::I420);
    let mut pic = Picture::alloc(Csp::I420, 4, 4).unwrap();
    let err = conv
        .convert(&solid(4, 2, [255, 255, 255]), &mut pic)
        .unwrap_err();
    assert!(matches!(err, VidpipeError::Config(_)));
    assert!(pic.plane(0).as_slice().iter().all(|&v| v == 0));

    let mut wrong = Picture::alloc(Csp::Nv12, 4, 4).unwrap();
    assert!(conv.convert(&solid(4, 4, [1, 2, 3]), &mut wrong).is_err());
}

#[test]
fn zero_size_converter_is_rejected() {
    assert!(PixelConverter::new(0, 2, Csp::I420, ColorMatrix::Bt601, [0; 3]).is_err());
}

#[cfg(feature = "alloc-track")]
#[test]
fn steady_state_conversion_does_not_allocate() {
    use crate::foundation::alloc_track::count_allocations;

    let img = image::DynamicImage::ImageRgb8(solid(64, 48, [1, 2, 3]));
    let mut conv = converter(64, 48, Csp::I420);
    let mut pic = Picture::alloc(Csp::I420, 64, 48).unwrap();
    conv.convert(&img, &mut pic).unwrap();

    let (res, counts) = count_allocations(|| conv.convert(&img, &mut pic));
    res.unwrap();
    assert_eq!(counts.allocations, 0);
}
