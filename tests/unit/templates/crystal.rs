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
fn facet_count_drives_the_point_count() {
    let r = resolved(json!({
        "frequency": 0.8,
        "amplitude": 120,
        "latticeType": 2,
        "facetCount": 12,
    }));
    let p = CrystalParams::from_resolved(&r);
    assert_eq!(p.lattice, Lattice::Trigonal);
    let pts = generate(&p, r.center(), 120.0 * r.base_scale, 0.0);
    assert_eq!(pts.len(), 12);
    assert_eq!((r.center_x, r.center_y), (200.0, 200.0));
}

#[test]
fn every_lattice_closes() {
    for lattice in 0..5 {
        let r = resolved(json!({"latticeType": lattice, "order": 1.0}));
        let p = CrystalParams::from_resolved(&r);
        for phase in [0.0, 0.77, 3.1] {
            assert!(closure_gap(|a| radius_at(&p, 100.0, a, phase)) < 1e-9);
        }
    }
}

#[test]
fn facet_intensity_follows_symmetry() {
    let r = resolved(json!({"facetCount": 4, "symmetry": 2}));
    let p = CrystalParams::from_resolved(&r);
    let pts = generate(&p, Point::ZERO, 50.0, 0.0);
    for pt in &pts {
        let want = 0.3 + (pt.angle * 2.0).sin() * 0.7;
        assert!((pt.extra.intensity - want).abs() < 1e-12);
    }
}

#[test]
fn zero_radius_and_empty_geometry_are_safe() {
    let r = resolved(json!({}));
    let p = CrystalParams::from_resolved(&r);
    let pts = generate(&p, r.center(), 0.0, 0.0);
    assert!(pts.iter().all(|pt| pt.pos() == r.center()));

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
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    let report = render(&mut ctx, &frame, &mut FixedSequence::new([0.5]));
    assert!(report.ran("body"));
    assert_eq!(ctx.save_depth(), 0);
}

#[test]
fn zero_strengths_skip_their_passes() {
    let r = resolved(json!({
        "dispersionStrength": 0,
        "sparkleIntensity": 0.05,
        "inclusionAmount": 0,
    }));
    let mut ctx = RecordingCanvas::new(400.0, 400.0);
    let mut rng = FixedSequence::new([0.3]);
    let report = CrystalLattice::new().render(&mut ctx, &r, &mut rng);
    assert_eq!(report.skipped.as_slice(), &["dispersion", "sparkle", "inclusions"]);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn material_shifts_the_palette_hue() {
    let quartz = palette(&CrystalParams::from_resolved(&resolved(json!({"crystalMaterial": 0}))));
    let amethyst = palette(&CrystalParams::from_resolved(&resolved(json!({"crystalMaterial": 1}))));
    assert_ne!(quartz.primary, amethyst.primary);
    assert!(amethyst.primary.css().starts_with("hsla(280.0"));
}
