use super::*;

#[test]
fn rgba_mix_endpoints_and_midpoint() {
    let a = Rgba::BLACK;
    let b = Rgba::WHITE;
    assert_eq!(a.mix(b, 0.0), a);
    assert_eq!(a.mix(b, 1.0), b);
    let m = a.mix(b, 0.5);
    assert!((m.r - 0.5).abs() < 1e-12);
}

#[test]
fn fade_clamps_alpha() {
    let c = Rgba::WHITE.fade(3.0);
    assert_eq!(c.a, 1.0);
    let c = Rgba::WHITE.fade(0.25);
    assert!((c.a - 0.25).abs() < 1e-12);
}

#[test]
fn straight_conversion_undoes_premultiply() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba();
    assert_eq!(&straight[..4], &[255, 0, 0, 128]);
    assert_eq!(&straight[4..], &[0, 0, 0, 0]);
}

#[test]
fn fingerprint_tracks_content() {
    let a = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 4],
        premultiplied: true,
    };
    let mut b = a.clone();
    assert_eq!(a.fingerprint(), b.fingerprint());
    b.data[0] = 9;
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.pixel(0, 0), Some([1, 2, 3, 4]));
    assert_eq!(a.pixel(1, 0), None);
}
