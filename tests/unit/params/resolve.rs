use super::*;
use crate::params::schema::ParameterDefinition as Def;
use serde_json::json;

fn schema() -> ParameterSchema {
    ParameterSchema::new(350.0)
        .with("foo", Def::slider("Foo", 0.0, 10.0, 1.0, 3.0))
        .with("angle", Def::slider("Angle", 0.0, 360.0, 1.0, 90.0).degrees())
        .with(
            "mode",
            Def::select("Mode", &[("a", "A"), ("b", "B")], "a"),
        )
        .with("tint", Def::color("Tint", "#ff0000"))
        .with("glow", Def::toggle("Glow", false))
        .with("fillColor", Def::color("Fill", "#123456"))
        .with("animationSpeed", Def::slider("Speed", 0.0, 5.0, 0.1, 1.0))
}

#[test]
fn empty_bag_takes_every_default() {
    let s = schema();
    let r = resolve(&json!({}), &s, 400.0, 300.0, 0.0);
    assert_eq!(r.number("foo"), Some(3.0));
    assert_eq!(r.number("angle"), Some(90f64.to_radians()));
    assert_eq!(r.text("mode"), Some("a"));
    assert_eq!(r.text("tint"), Some("#ff0000"));
    assert!(!r.flag_or("glow", true));
    for (name, _) in s.iter() {
        assert!(r.contains_key(name), "missing {name}");
    }
}

#[test]
fn sliders_clamp_to_bounds() {
    let s = schema();
    let r = resolve(&json!({"foo": -4, "angle": 720}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number("foo"), Some(0.0));
    assert_eq!(r.number("angle"), Some(360f64.to_radians()));
    let r = resolve(&json!({"foo": 99}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number("foo"), Some(10.0));
}

#[test]
fn later_groups_override_and_legacy_never_overwrites() {
    let s = schema();
    let r = resolve(&json!({"foo": 5, "custom": {"foo": 7}}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number("foo"), Some(7.0));

    let r = resolve(
        &json!({"foo": 5, "customParameters": {"foo": 7}}),
        &s,
        100.0,
        100.0,
        0.0,
    );
    assert_eq!(r.number("foo"), Some(5.0));

    let r = resolve(&json!({"customParameters": {"foo": 7}}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number("foo"), Some(7.0));

    let r = resolve(
        &json!({
            "core": {"foo": 1},
            "style": {"foo": 2},
            "custom": {"foo": 4},
            "content": {"foo": 6},
        }),
        &s,
        100.0,
        100.0,
        0.0,
    );
    assert_eq!(r.number("foo"), Some(6.0));
}

#[test]
fn legacy_alias_falls_back_only_when_top_level_missing() {
    let s = schema();
    let r = resolve(
        &json!({"customParameters": {"fillColor": "#00ff00"}}),
        &s,
        10.0,
        10.0,
        0.0,
    );
    assert_eq!(r.text("fillColor"), Some("#00ff00"));
    assert_eq!(r.theme.fill_color, "#00ff00");

    let r = resolve(
        &json!({"fillColor": "#0000ff", "customParameters": {"fillColor": "#00ff00"}}),
        &s,
        10.0,
        10.0,
        0.0,
    );
    assert_eq!(r.text("fillColor"), Some("#0000ff"));
}

#[test]
fn zero_is_a_value_not_unset() {
    let s = schema();
    let r = resolve(&json!({"animationSpeed": 0}), &s, 100.0, 100.0, 12.0);
    assert_eq!(r.anim_time, 0.0);
    assert_eq!(r.number_or("foo", 9.0), 3.0);
    let r = resolve(&json!({"foo": 0}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number_or("foo", 9.0), 0.0);
}

#[test]
fn invalid_values_repair_to_defaults() {
    let s = schema();
    let r = resolve(
        &json!({"foo": "abc", "mode": "zzz", "tint": "nope", "glow": [1]}),
        &s,
        100.0,
        100.0,
        0.0,
    );
    assert_eq!(r.number("foo"), Some(3.0));
    assert_eq!(r.text("mode"), Some("a"));
    assert_eq!(r.text("tint"), Some("#ff0000"));
    assert!(!r.flag_or("glow", true));

    let r = resolve(&json!({"foo": "7.5", "glow": 1, "foo2": null}), &s, 100.0, 100.0, 0.0);
    assert_eq!(r.number("foo"), Some(7.5));
    assert!(r.flag_or("glow", false));
    assert!(!r.contains_key("foo2"));
}

#[test]
fn unknown_keys_pass_through() {
    let s = schema();
    let r = resolve(
        &json!({"adHoc": 4.5, "label": "hi", "nested": {"k": 1}}),
        &s,
        100.0,
        100.0,
        0.0,
    );
    assert_eq!(r.number("adHoc"), Some(4.5));
    assert_eq!(r.text("label"), Some("hi"));
    assert_eq!(r.get("nested"), Some(&ParamValue::Json(json!({"k": 1}))));
    assert!(!r.contains_key("custom"));
}

#[test]
fn derived_fields_are_pure_in_size_and_time() {
    let s = schema();
    let r = resolve(&json!({"animationSpeed": 2}), &s, 700.0, 350.0, 3.0);
    assert_eq!(r.center_x, 350.0);
    assert_eq!(r.center_y, 175.0);
    assert_eq!(r.base_scale, 1.0);
    assert_eq!(r.anim_time, 6.0);
    assert!((r.breathing_phase - 2.4).abs() < 1e-12);
    assert_eq!(r.theme.stroke_color, "#000000");
    assert_eq!(r.theme.fill_opacity, 1.0);
}

#[test]
fn non_object_bag_is_treated_as_empty() {
    let s = schema();
    let r = resolve(&json!(42), &s, 10.0, 10.0, 0.0);
    assert_eq!(r.number("foo"), Some(3.0));
    let r = resolve(&Value::Null, &s, 10.0, 10.0, 0.0);
    assert_eq!(r.text("mode"), Some("a"));
}

#[test]
fn viewport_is_parsed_and_sanitized() {
    let s = schema();
    let r = resolve(
        &json!({"_viewport": {"offsetX": 10, "offsetY": -5, "zoom": 0, "viewWidth": 100}}),
        &s,
        10.0,
        10.0,
        0.0,
    );
    let vp = r.viewport.expect("viewport");
    assert_eq!(vp.offset_x, 10.0);
    assert_eq!(vp.zoom, 1.0);
    assert_eq!(vp.view_height, 0.0);
    assert!(!r.contains_key("_viewport"));
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    A,
    B,
    C,
}

impl Variant for Shape {
    const ALL: &'static [Self] = &[Shape::A, Shape::B, Shape::C];
}

#[test]
fn variants_round_and_clamp() {
    assert_eq!(Shape::from_slider(0.4), Shape::A);
    assert_eq!(Shape::from_slider(0.6), Shape::B);
    assert_eq!(Shape::from_slider(7.0), Shape::C);
    assert_eq!(Shape::from_slider(-2.0), Shape::A);
    assert_eq!(Shape::from_slider(f64::NAN), Shape::A);
}

#[test]
fn resolved_serializes_flat_with_derived_fields() {
    let s = schema();
    let r = resolve(&json!({}), &s, 100.0, 50.0, 0.0);
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["foo"], json!(3.0));
    assert_eq!(v["centerX"], json!(50.0));
    assert_eq!(v["theme"]["fillColor"], json!("#123456"));
}
