use super::*;
use crate::foundation::rng::FixedSequence;
use crate::geometry::ring::closure_gap;
use crate::params::resolve::resolve;
use crate::raster::record::RecordingCanvas;
use serde_json::json;

fn resolved(raw: serde_json::Value) -> ResolvedParams {
    resolve(&raw, &schema(), 400.0, 400.0, 0.0)
}

#[test]
fn schema_is_valid() {
    schema().validate().unwrap();
}

#[test]
fn cut_precision_sets_the_facet_count() {
    for (cut, n) in [(0.0, 8), (0.5, 20), (1.0, 32)] {
        let p = DiamondParams::from_resolved(&resolved(json!({"cutPrecision": cut})));
        assert_eq!(p.point_count(), n);
        assert_eq!(generate(&p, Point::ZERO, 50.0, 0.0).len(), n);
    }
}

#[test]
fn every_cut_closes() {
    for style in 0..5 {
        let p = DiamondParams::from_resolved(&resolved(json!({"diamondStyle": style})));
        for phase in [0.0, 1.3, 4.0] {
            assert!(closure_gap(|a| radius_at(&p, 100.0, a, phase)) < 1e-9);
        }
    }
}

#[test]
fn marquise_is_longer_than_it_is_wide() {
    let p = DiamondParams::from_resolved(&resolved(json!({"diamondStyle": 3})));
    assert_eq!(p.style, DiamondStyle::Marquise);
    let long = radius_at(&p, 100.0, 0.0, 0.0);
    let short = radius_at(&p, 100.0, std::f64::consts::FRAC_PI_2, 0.0);
    assert!(long > short * 1.5);
}

#[test]
fn gem_type_picks_the_hue() {
    let ruby = palette(&DiamondParams::from_resolved(&resolved(json!({"gemType": 1}))));
    let topaz = palette(&DiamondParams::from_resolved(&resolved(json!({"gemType": 4}))));
    assert!(ruby.primary.css().starts_with("hsla(350.0"));
    assert!(topaz.primary.css().starts_with("hsla(38.0"));
}

#[test]
fn passes_run_in_canonical_order() {
    let r = resolved(json!({"clarityFlaws": 0.5}));
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    let mut rng = FixedSequence::new([0.1, 0.6, 0.9]);
    let report = DynamicDiamond::new().render(&mut ctx, &r, &mut rng);
    assert_eq!(
        report.executed.as_slice(),
        &["fire-halo", "body", "crown-facets", "table", "fire", "clarity-flaws"]
    );
    assert!(rng.draws() > 0);
    assert_eq!(ctx.save_depth(), 0);
}

#[test]
fn flawless_stone_draws_no_randomness() {
    let r = resolved(json!({"clarityFlaws": 0}));
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    let mut rng = FixedSequence::new([0.5]);
    let report = DynamicDiamond::new().render(&mut ctx, &r, &mut rng);
    assert_eq!(report.skipped.as_slice(), &["clarity-flaws"]);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn empty_geometry_renders_without_panicking() {
    for (w, h) in [(0.0, 0.0), (1.0, 1.0)] {
        let r = resolve(&json!({}), &schema(), w, h, 0.0);
        let p = DiamondParams::from_resolved(&r);
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
