use super::*;

fn close(a: Rgba, b: Rgba) -> bool {
    (a.r - b.r).abs() < 1e-3
        && (a.g - b.g).abs() < 1e-3
        && (a.b - b.b).abs() < 1e-3
        && (a.a - b.a).abs() < 1e-3
}

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#ff0000").unwrap(), Rgba::rgba(1.0, 0.0, 0.0, 1.0));
    assert_eq!(parse_css_color("#f00").unwrap(), Rgba::rgba(1.0, 0.0, 0.0, 1.0));
    let c = parse_css_color("#0000ff80").unwrap();
    assert!((c.a - 128.0 / 255.0).abs() < 1e-9);
    assert!(parse_css_color("#12345").is_err());
    assert!(parse_css_color("#zzzzzz").is_err());
}

#[test]
fn parses_functional_forms() {
    let c = parse_css_color("rgba(255, 0, 0, 0.5)").unwrap();
    assert!(close(c, Rgba::rgba(1.0, 0.0, 0.0, 0.5)));

    let c = parse_css_color("hsl(0, 100%, 50%)").unwrap();
    assert!(close(c, Rgba::rgba(1.0, 0.0, 0.0, 1.0)));

    let c = parse_css_color("hsla(120deg 100% 25% / 40%)").unwrap();
    assert!(close(c, Rgba::rgba(0.0, 0.5, 0.0, 0.4)));
}

#[test]
fn parses_names_and_rejects_garbage() {
    assert_eq!(parse_css_color("transparent").unwrap(), Rgba::TRANSPARENT);
    assert_eq!(parse_css_color(" White ").unwrap(), Rgba::WHITE);
    assert!(parse_css_color("").is_err());
    assert!(parse_css_color("not-a-color").is_err());
    assert!(parse_css_color("rgb(1,2)").is_err());
}

#[test]
fn hue_wraps_negative_and_large() {
    let a = hsla_to_rgba(-120.0, 1.0, 0.5, 1.0);
    let b = hsla_to_rgba(240.0, 1.0, 0.5, 1.0);
    let c = hsla_to_rgba(600.0, 1.0, 0.5, 1.0);
    assert!(close(a, b));
    assert!(close(b, c));
}
