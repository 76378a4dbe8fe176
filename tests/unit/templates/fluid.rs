use super::*;
use crate::foundation::rng::FixedSequence;
use crate::geometry::ring::closure_gap;
use crate::params::resolve::resolve;
use crate::raster::record::{DrawCall, RecordingCanvas};
use serde_json::json;

fn params(raw: serde_json::Value) -> FluidParams {
    FluidParams::from_resolved(&resolve(&raw, &schema(), 400.0, 400.0, 0.0))
}

fn spread(p: &FluidParams) -> f64 {
    let radii: Vec<f64> = (0..360)
        .map(|d| radius_at(p, 100.0, f64::from(d).to_radians(), 0.4))
        .collect();
    let max = radii.iter().cloned().fold(f64::MIN, f64::max);
    let min = radii.iter().cloned().fold(f64::MAX, f64::min);
    max - min
}

#[test]
fn schema_is_valid() {
    schema().validate().unwrap();
}

#[test]
fn wave_complexity_sets_the_point_count() {
    assert_eq!(params(json!({"waveComplexity": 0})).point_count(), 24);
    assert_eq!(params(json!({"waveComplexity": 1})).point_count(), 72);
    assert_eq!(params(json!({"waveComplexity": 0.25})).point_count(), 36);
}

#[test]
fn surface_closes_for_every_phase() {
    let p = params(json!({"turbulence": 1, "viscosity": 0}));
    for phase in [0.0, 0.9, 2.5, 11.0] {
        assert!(closure_gap(|a| radius_at(&p, 120.0, a, phase)) < 1e-9);
    }
}

#[test]
fn viscosity_damps_turbulence() {
    let thin = params(json!({"turbulence": 1, "viscosity": 0}));
    let thick = params(json!({"turbulence": 1, "viscosity": 1}));
    assert!(spread(&thick) < spread(&thin) * 0.5);
    assert!(spread(&params(json!({"turbulence": 0}))) < 1e-12);
}

#[test]
fn stroke_defaults_to_none() {
    let r = resolve(&json!({"bubbleAmount": 0}), &schema(), 400.0, 400.0, 0.0);
    assert_eq!(r.text("strokeType"), Some("none"));
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    let report = LiquidFluid::new().render(&mut ctx, &r, &mut FixedSequence::new([0.4]));
    assert!(report.ran("body"));
    let body_strokes = ctx
        .ops()
        .iter()
        .filter(|op| op.depth == 1 && matches!(op.call, DrawCall::StrokePath { .. }))
        .count();
    assert_eq!(body_strokes, 3, "only the flow lines stroke at pass depth");
}

#[test]
fn bubbles_are_the_only_random_pass() {
    let r = resolve(&json!({"bubbleAmount": 0.5}), &schema(), 400.0, 400.0, 0.0);
    let mut rng = FixedSequence::new([0.2, 0.7]);
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    LiquidFluid::new().render(&mut ctx, &r, &mut rng);
    assert_eq!(rng.draws(), 7 * 3);
}

#[test]
fn empty_geometry_renders_without_panicking() {
    for (w, h) in [(0.0, 0.0), (1.0, 1.0)] {
        let r = resolve(&json!({}), &schema(), w, h, 0.0);
        let p = FluidParams::from_resolved(&r);
        let pal = palette(&p);
        let frame = Frame {
            params: &p,
            resolved: &r,
            geometry: &[],
            palette: &pal,
            center: r.center(),
            radius: 0.0,
            phase: 0.0,
            time: 0.0,
        };
        let mut ctx = RecordingCanvas::new(w, h);
        render(&mut ctx, &frame, &mut FixedSequence::new([0.5]));
        assert_eq!(ctx.save_depth(), 0);
        assert!(ctx.state().current().is_pristine());
    }
}

#[test]
fn droplet_highlights_follow_the_life_envelope() {
    let highlight_alpha = |time: f64| {
        let r = resolve(&json!({}), &schema(), 400.0, 400.0, time);
        let p = FluidParams::from_resolved(&r);
        let (center, radius, phase) = layout(&r, &p);
        let geometry = generate(&p, center, radius, phase);
        let pal = palette(&p);
        let frame = Frame {
            params: &p,
            resolved: &r,
            geometry: &geometry,
            palette: &pal,
            center,
            radius,
            phase,
            time: r.anim_time,
        };
        let mut ctx = RecordingCanvas::new(400.0, 400.0);
        draw_droplets(&mut ctx, &frame);
        let DrawCall::FillPath { paint: Paint::Solid(c), .. } = &ctx.ops()[1].call else {
            panic!("expected the first droplet highlight");
        };
        (c.a, pal.highlight.rgba().a)
    };
    // first droplet: phase = time * dropletSpeed
    let (faded, _) = highlight_alpha(1.5 * std::f64::consts::PI);
    assert!(faded < 1e-9);
    let (full, base) = highlight_alpha(0.5 * std::f64::consts::PI);
    assert!((full - base * 0.7 * 0.4).abs() < 1e-9);
}
