use super::*;
use crate::color::css::parse_css_color;

#[test]
fn css_strings_are_clamped() {
    let c = Hsl::new(-30.0, 180.0, -10.0, 2.0);
    assert_eq!(c.css(), "hsla(330.0, 100.0%, 0.0%, 1.000)");
    let c = Hsl::new(720.0, 50.0, 140.0, 0.5);
    assert_eq!(c.css(), "hsla(0.0, 50.0%, 100.0%, 0.500)");
}

#[test]
fn css_string_parses_back_to_same_rgba() {
    let c = Hsl::new(210.0, 60.0, 40.0, 0.8);
    let entry = PaletteColor::from(c);
    let parsed = parse_css_color(entry.css()).unwrap();
    let rgba = entry.rgba();
    assert!((parsed.r - rgba.r).abs() < 2e-3);
    assert!((parsed.g - rgba.g).abs() < 2e-3);
    assert!((parsed.b - rgba.b).abs() < 2e-3);
    assert!((parsed.a - rgba.a).abs() < 1e-3);
}

#[test]
fn shape_is_linear_then_multiplicative() {
    let shape = PaletteShape {
        sat_k: 80.0,
        light_base: 40.0,
        light_k: 30.0,
    };
    let base = shape.base(100.0, 0.5, 0.5, MaterialAdjust::new(20.0, 0.5, 2.0));
    assert_eq!(base.h, 120.0);
    assert_eq!(base.s, 20.0);
    assert_eq!(base.l, 110.0);
    assert_eq!(base.clamped().l, 100.0);
}

#[test]
fn non_finite_channels_fall_back() {
    let c = Hsl::new(f64::NAN, f64::INFINITY, 50.0, f64::NAN).clamped();
    assert_eq!(c.h, 0.0);
    assert_eq!(c.s, 0.0);
    assert_eq!(c.a, 1.0);
}
