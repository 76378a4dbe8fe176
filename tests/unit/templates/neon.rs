use super::*;
use crate::foundation::rng::FixedSequence;
use crate::params::resolve::resolve;
use crate::raster::record::RecordingCanvas;
use serde_json::json;

fn resolved(raw: serde_json::Value) -> ResolvedParams {
    resolve(&raw, &schema(), 400.0, 300.0, 0.0)
}

#[test]
fn schema_is_valid() {
    schema().validate().unwrap();
}

#[test]
fn detail_sets_the_sample_count() {
    assert_eq!(NeonParams::from_resolved(&resolved(json!({"detail": 0}))).point_count(), 32);
    assert_eq!(NeonParams::from_resolved(&resolved(json!({"detail": 1}))).point_count(), 192);
}

#[test]
fn path_spans_the_requested_width() {
    let r = resolved(json!({"waveWidth": 0.5}));
    let p = NeonParams::from_resolved(&r);
    let pts = generate(&p, r.center(), r.width, 40.0, 0.0);
    let first = pts.first().unwrap();
    let last = pts.last().unwrap();
    assert!((first.x - 100.0).abs() < 1e-9);
    assert!((last.x - 300.0).abs() < 1e-9);
    assert_eq!(first.extra.t, 0.0);
    assert_eq!(last.extra.t, 1.0);
    assert!(pts.iter().all(|pt| (pt.y - 150.0).abs() <= 40.0 + 1e-9));
}

#[test]
fn every_waveform_stays_in_unit_range() {
    for w in Waveform::ALL {
        for k in 0..200 {
            let v = w.sample(f64::from(k) * 0.1 - 3.0);
            assert!((-1.0 - 1e-12..=1.0 + 1e-12).contains(&v), "{w:?} -> {v}");
        }
    }
    assert!((Waveform::Square.sample(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-12);
    assert!((Waveform::Pulse.sample(std::f64::consts::PI) - 1.0).abs() < 1e-12);
}

#[test]
fn hue_drift_moves_the_palette_over_time() {
    let p = NeonParams::from_resolved(&resolved(json!({"hueDrift": 1})));
    assert_ne!(palette(&p, 0.0).primary, palette(&p, 2.0).primary);
    let still = NeonParams::from_resolved(&resolved(json!({"hueDrift": 0})));
    assert_eq!(palette(&still, 0.0).primary, palette(&still, 2.0).primary);
}

#[test]
fn open_path_has_no_ring_radius() {
    let neon = NeonWave::new();
    let r = resolved(json!({}));
    assert!(neon.supports_viewport());
    assert_eq!(neon.radius_at(&r, 0.3), None);
    assert_eq!(neon.outline(&r).len(), 112);
}

#[test]
fn defaults_draw_on_a_dark_backdrop() {
    let r = resolved(json!({}));
    assert_eq!(r.text("backgroundType"), Some("solid"));
    let mut ctx = RecordingCanvas::new(400.0, 300.0);
    let report = NeonWave::new().render(&mut ctx, &r, &mut FixedSequence::new([0.5]));
    assert_eq!(
        report.executed.as_slice(),
        &["glow", "tube", "hot-core", "sparks", "flicker"]
    );
    assert_eq!(ctx.save_depth(), 0);
}

#[test]
fn empty_geometry_renders_without_panicking() {
    for (w, h) in [(0.0, 0.0), (1.0, 1.0)] {
        let r = resolve(&json!({}), &schema(), w, h, 0.0);
        let p = NeonParams::from_resolved(&r);
        let pal = palette(&p, 0.0);
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
