//! End-to-end properties of the hue transform and preview scaler.

use approx::assert_abs_diff_eq;
use hueshift_core::{hue_distance, ChannelLayout, Hsv, PixelBuffer};
use hueshift_ops::{hue, preview, resize};

/// Deterministic 16x16 RGB image covering the hue wheel at varied
/// saturation and brightness, plus a gray column.
fn gradient() -> PixelBuffer {
    let (w, h) = (16u32, 16u32);
    let mut data = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            if x == 0 {
                let g = (y * 17) as u8;
                data.extend_from_slice(&[g, g, g]);
                continue;
            }
            let hsv = Hsv::new(
                x as f32 / w as f32,
                0.3 + 0.7 * (y as f32 / h as f32),
                0.4 + 0.6 * ((x + y) % 4) as f32 / 3.0,
            );
            data.extend(hsv.to_rgb().map(hueshift_core::quantize));
        }
    }
    PixelBuffer::from_raw(w, h, 3, data).unwrap()
}

fn max_channel_diff(a: &PixelBuffer, b: &PixelBuffer) -> u8 {
    a.data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| x.abs_diff(y))
        .max()
        .unwrap_or(0)
}

#[test]
fn test_red_to_green_end_to_end() {
    let src = PixelBuffer::filled(3, 3, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
    let out = hue::apply(&src, 0.333).unwrap();
    for px in out.pixels() {
        assert!(px[0] <= 1);
        assert_eq!(px[1], 255);
        assert_eq!(px[2], 0);
    }
}

#[test]
fn test_primaries_and_secondaries_roundtrip() {
    let colors: [[u8; 3]; 8] = [
        [0, 0, 0],
        [255, 255, 255],
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [0, 255, 255],
        [255, 0, 255],
    ];
    for rgb in colors {
        // Substituting a pixel's own hue must give the pixel back
        let own = Hsv::from_rgb8(rgb).h;
        let back = hue::remap_pixel(rgb, own);
        for c in 0..3 {
            assert!(back[c].abs_diff(rgb[c]) <= 1, "{rgb:?} -> {back:?}");
        }
    }
}

#[test]
fn test_grays_unchanged_for_any_hue() {
    let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
    let src = PixelBuffer::from_raw(256, 1, 3, data).unwrap();
    for step in 0..20 {
        let h = step as f32 / 20.0;
        let out = hue::apply(&src, h).unwrap();
        assert_eq!(out, src, "gray tinted at hue {h}");
    }
}

#[test]
fn test_output_has_target_hue_and_source_sv() {
    let src = gradient();
    for target in [0.0f32, 0.1, 0.45, 0.8] {
        let out = hue::apply(&src, target).unwrap();
        for (a, b) in src.pixels().zip(out.pixels()) {
            let before = Hsv::from_rgb8([a[0], a[1], a[2]]);
            let after = Hsv::from_rgb8([b[0], b[1], b[2]]);
            assert_abs_diff_eq!(after.v, before.v, epsilon = 1.0 / 255.0);
            assert_abs_diff_eq!(after.s, before.s, epsilon = 0.02);
            if before.s > 0.25 {
                assert!(hue_distance(after.h, target) < 0.01, "hue {} != {}", after.h, target);
            }
        }
    }
}

#[test]
fn test_apply_is_idempotent() {
    let src = gradient();
    for target in [0.05f32, 0.5, 0.95] {
        let once = hue::apply(&src, target).unwrap();
        let twice = hue::apply(&once, target).unwrap();
        assert!(max_channel_diff(&once, &twice) <= 1);
    }
}

#[test]
fn test_preview_small_image_blocks() {
    let src = gradient();
    let small = PixelBuffer::new(10, 10, ChannelLayout::Rgb, {
        let mut rows = Vec::new();
        for y in 0..10 {
            rows.extend_from_slice(&src.row(y)[..30]);
        }
        rows
    })
    .unwrap();

    let out = preview::scale_for_preview(&small, 400, 400).unwrap();
    assert_eq!(out.dimensions(), (400, 400));
    for y in 0..400 {
        for x in 0..400 {
            assert_eq!(out.pixel(x, y), small.pixel(x / 40, y / 40));
        }
    }
}

#[test]
fn test_preview_large_image_smoothed() {
    let mut data = Vec::with_capacity(800 * 600 * 3);
    for y in 0..600u32 {
        for x in 0..800u32 {
            data.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 90]);
        }
    }
    let src = PixelBuffer::from_raw(800, 600, 3, data).unwrap();
    let out = preview::scale_for_preview(&src, 400, 400).unwrap();
    assert_eq!(out.dimensions(), (400, 400));
    assert_eq!(out.layout(), ChannelLayout::Rgb);
    // Constant channel survives the filter
    assert!(out.pixels().all(|p| p[2].abs_diff(90) <= 1));
}

#[test]
fn test_preview_flattens_transparency_to_white() {
    let mut data = Vec::new();
    for i in 0..(20 * 20) {
        if i % 2 == 0 {
            data.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            data.extend_from_slice(&[30, 60, 90, 255]);
        }
    }
    let src = PixelBuffer::from_raw(20, 20, 4, data).unwrap();
    let out = preview::scale_for_preview(&src, 40, 40).unwrap();
    assert_eq!(out.layout(), ChannelLayout::Rgb);
    assert_eq!(out.dimensions(), (40, 40));
    assert_eq!(out.pixel(0, 0), &[255, 255, 255]);
    assert_eq!(out.pixel(2, 0), &[30, 60, 90]);
}

#[test]
fn test_preview_does_not_mutate_input() {
    let src = gradient();
    let copy = src.clone();
    let _ = preview::scale_for_preview(&src, 64, 64).unwrap();
    let _ = resize::resize(&src, 4, 4, resize::Filter::Bicubic).unwrap();
    assert_eq!(src, copy);
}
