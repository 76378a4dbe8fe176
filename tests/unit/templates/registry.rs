use super::*;
use crate::params::resolve::resolve;
use crate::raster::record::RecordingCanvas;
use crate::foundation::rng::FixedSequence;

#[test]
fn builtin_registers_seven_unique_templates() {
    let reg = TemplateRegistry::builtin();
    let ids: Vec<_> = reg.ids().collect();
    assert_eq!(
        ids,
        ["crystal", "diamond", "fluid", "bark", "sketch", "minimal", "neon"]
    );
    assert_eq!(reg.len(), 7);
}

#[test]
fn unknown_id_lists_the_known_ones() {
    let reg = TemplateRegistry::builtin();
    let err = reg.get("teapot").err().unwrap();
    let msg = err.to_string();
    assert!(msg.contains("teapot"));
    assert!(msg.contains("crystal"));
}

#[test]
fn later_registration_shadows_earlier() {
    let mut reg = TemplateRegistry::new();
    assert!(reg.is_empty());
    reg.register(crystal::CrystalLattice::new());
    reg.register(crystal::CrystalLattice::new());
    assert_eq!(reg.len(), 1);
}

#[test]
fn every_builtin_schema_validates_and_defaults_are_complete() {
    for t in TemplateRegistry::builtin().iter() {
        let schema = t.schema();
        schema.validate().unwrap();
        let defaults = t.default_params();
        assert_eq!(defaults.len(), schema.len(), "{}", t.metadata().id);
        for (name, _) in schema.iter() {
            assert!(defaults.contains_key(name), "{} misses {name}", t.metadata().id);
        }
    }
}

#[test]
fn entries_serialize_with_flattened_metadata() {
    let reg = TemplateRegistry::builtin();
    let v = serde_json::to_value(reg.entries()).unwrap();
    let first = &v[0];
    assert_eq!(first["id"], "crystal");
    assert_eq!(first["name"], "Crystal Lattice");
    assert!(first["defaultParams"]["facetCount"].is_number());
    assert!(first["parameters"].is_array() || first["parameters"].is_object());
}

#[test]
fn every_template_renders_its_defaults_without_leaking_state() {
    for t in TemplateRegistry::builtin().iter() {
        let raw = serde_json::Value::Object(t.default_params());
        let r = resolve(&raw, t.schema(), 320.0, 240.0, 1.5);
        let mut ctx = RecordingCanvas::new(320.0, 240.0);
        let report = t.render(&mut ctx, &r, &mut FixedSequence::new([0.3, 0.6]));
        assert!(!report.executed.is_empty(), "{}", t.metadata().id);
        assert_eq!(ctx.save_depth(), 0);
        assert!(ctx.state().current().is_pristine(), "{}", t.metadata().id);
    }
}

#[test]
fn paint_body_layers_native_then_universal() {
    let schema = ParameterSchema::default().with_universal();
    let r = resolve(
        &serde_json::json!({"fillType": "solid", "strokeType": "solid"}),
        &schema,
        100.0,
        100.0,
        0.0,
    );
    let mut ctx = RecordingCanvas::new(100.0, 100.0);
    let path = crate::geometry::path::circle_path(kurbo::Point::new(50.0, 50.0), 20.0);
    paint_body(&mut ctx, &path, &Paint::Solid(Rgba::WHITE), &r);
    let kinds: Vec<_> = ctx
        .ops()
        .iter()
        .map(|op| match op.call {
            crate::raster::record::DrawCall::FillPath { .. } => "fill",
            crate::raster::record::DrawCall::StrokePath { .. } => "stroke",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["fill", "fill", "stroke"]);
}
