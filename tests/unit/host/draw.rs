use super::*;
use crate::foundation::rng::FixedSequence;
use crate::raster::record::{DrawCall, RecordingCanvas};
use crate::templates::TemplateRegistry;
use serde_json::json;

#[test]
fn viewport_maps_offset_to_origin() {
    let vp = Viewport {
        offset_x: 10.0,
        offset_y: -4.0,
        zoom: 2.0,
        view_width: 100.0,
        view_height: 100.0,
    };
    let p = viewport_transform(&vp) * kurbo::Point::new(10.0, -4.0);
    assert!(p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
    let q = viewport_transform(&vp) * kurbo::Point::new(11.0, -4.0);
    assert!((q.x - 2.0).abs() < 1e-12);
}

#[test]
fn background_comes_first_and_state_is_restored() {
    let reg = TemplateRegistry::builtin();
    let mut ctx = RecordingCanvas::new(200.0, 200.0);
    let raw = json!({"backgroundType": "solid", "backgroundColor": "#112233"});
    let report = draw(
        reg.get("crystal").unwrap(),
        &mut ctx,
        200.0,
        200.0,
        &raw,
        0.5,
        &mut FixedSequence::new([0.5]),
    );
    assert!(report.ran("body"));
    assert!(matches!(ctx.ops()[0].call, DrawCall::ClearRect { .. }));
    assert!(matches!(ctx.ops()[1].call, DrawCall::FillRect { .. }));
    assert_eq!(ctx.save_depth(), 0);
    assert!(ctx.state().current().is_pristine());
}

#[test]
fn only_viewport_templates_see_the_viewport() {
    let reg = TemplateRegistry::builtin();
    let raw = json!({"_viewport": {"offsetX": 30, "offsetY": 0, "zoom": 1.5}});
    let want = viewport_transform(&Viewport {
        offset_x: 30.0,
        offset_y: 0.0,
        zoom: 1.5,
        view_width: 0.0,
        view_height: 0.0,
    });

    let mut neon = RecordingCanvas::new(200.0, 200.0);
    let mut rng = FixedSequence::new([0.5]);
    draw(reg.get("neon").unwrap(), &mut neon, 200.0, 200.0, &raw, 0.0, &mut rng);
    let mut crystal = RecordingCanvas::new(200.0, 200.0);
    draw(reg.get("crystal").unwrap(), &mut crystal, 200.0, 200.0, &raw, 0.0, &mut rng);

    let template_ops = |c: &RecordingCanvas| {
        c.ops()
            .iter()
            .filter(|op| !matches!(op.call, DrawCall::ClearRect { .. } | DrawCall::FillRect { .. }))
            .map(|op| op.state.transform)
            .collect::<Vec<_>>()
    };
    assert!(template_ops(&neon).iter().all(|t| *t == want));
    assert!(template_ops(&crystal).iter().all(|t| *t == Affine::IDENTITY));
    assert!(neon.ops()[0].state.transform == Affine::IDENTITY);
}

#[test]
fn same_inputs_same_ops() {
    let reg = TemplateRegistry::builtin();
    for t in reg.iter() {
        let raw = json!({});
        let mut a = RecordingCanvas::new(160.0, 160.0);
        let mut b = RecordingCanvas::new(160.0, 160.0);
        draw(t, &mut a, 160.0, 160.0, &raw, 2.0, &mut FixedSequence::new([0.1, 0.9]));
        draw(t, &mut b, 160.0, 160.0, &raw, 2.0, &mut FixedSequence::new([0.1, 0.9]));
        assert_eq!(a.fingerprint(), b.fingerprint(), "{}", t.metadata().id);
    }
}

#[test]
fn dashes_never_leak_across_draws() {
    let reg = TemplateRegistry::builtin();
    let crystal = reg.get("crystal").unwrap();
    let mut ctx = RecordingCanvas::new(200.0, 200.0);
    let mut rng = FixedSequence::new([0.5]);
    draw(crystal, &mut ctx, 200.0, 200.0, &json!({"strokeType": "dashed"}), 0.0, &mut rng);
    draw(crystal, &mut ctx, 200.0, 200.0, &json!({"strokeType": "none"}), 0.0, &mut rng);
    ctx.clear_log();
    draw(crystal, &mut ctx, 200.0, 200.0, &json!({"strokeType": "solid"}), 0.0, &mut rng);
    let strokes: Vec<_> = ctx
        .ops()
        .iter()
        .filter(|op| matches!(op.call, DrawCall::StrokePath { .. }))
        .collect();
    assert!(!strokes.is_empty());
    assert!(strokes.iter().all(|op| op.state.line_dash.is_empty()));
}
