use super::*;
use crate::foundation::core::Rgba;
use crate::foundation::rng::FixedSequence;
use crate::raster::context::{Blend, Paint};
use crate::raster::record::RecordingCanvas;

struct Probe;

fn mark(ctx: &mut dyn RasterContext, _: &Probe) {
    let r = ctx.bounds();
    ctx.fill_rect(r, &Paint::Solid(Rgba::WHITE));
}

fn leaky(ctx: &mut dyn RasterContext, _: &Probe) {
    ctx.set_global_alpha(0.2);
    ctx.set_line_dash(&[2.0, 2.0]);
    ctx.set_blend(Blend::Plus);
    ctx.save();
    ctx.save();
    let r = ctx.bounds();
    ctx.fill_rect(r, &Paint::Solid(Rgba::BLACK));
}

fn textured(ctx: &mut dyn RasterContext, _: &Probe, rng: &mut dyn RandomSource) {
    let a = rng.next_f64();
    ctx.set_global_alpha(a);
    let r = ctx.bounds();
    ctx.fill_rect(r, &Paint::Solid(Rgba::BLACK));
}

#[test]
fn passes_run_in_canonical_order() {
    let mut c = RecordingCanvas::new(4.0, 4.0);
    let passes = vec![
        PassSpec::imperfection("flaws", 1.0, textured),
        PassSpec::always(PassKind::Accent, "sparkle", mark),
        PassSpec::always(PassKind::Ambient, "halo", mark),
        PassSpec::always(PassKind::Body, "body", mark),
        PassSpec::always(PassKind::Body, "body-outline", mark),
    ];
    let report = run_passes(&mut c, &Probe, passes, &mut FixedSequence::new([0.5]));
    assert_eq!(
        report.executed.as_slice(),
        &["halo", "body", "body-outline", "sparkle", "flaws"]
    );
}

#[test]
fn weak_passes_are_skipped_not_faded() {
    let mut c = RecordingCanvas::new(4.0, 4.0);
    let passes = vec![
        PassSpec::new(PassKind::Highlight, "weak", 0.09, mark),
        PassSpec::new(PassKind::Highlight, "edge", PASS_EPSILON, mark),
        PassSpec::new(PassKind::Highlight, "nan", f64::NAN, mark),
    ];
    let report = run_passes(&mut c, &Probe, passes, &mut FixedSequence::default());
    assert_eq!(report.executed.as_slice(), &["edge"]);
    assert_eq!(report.skipped.as_slice(), &["weak", "nan"]);
    assert_eq!(c.ops().len(), 1);
    assert!(report.ran("edge"));
}

#[test]
fn state_never_leaks_between_passes() {
    let mut c = RecordingCanvas::new(4.0, 4.0);
    let passes = vec![
        PassSpec::always(PassKind::Body, "leaky", leaky),
        PassSpec::always(PassKind::Structure, "after", mark),
    ];
    run_passes(&mut c, &Probe, passes, &mut FixedSequence::default());
    let after = &c.ops()[1];
    assert!(after.state.is_pristine());
    assert_eq!(after.depth, 1);
    assert_eq!(c.save_depth(), 0);
    assert_eq!(c.global_alpha(), 1.0);
    assert!(c.line_dash().is_empty());
}

#[test]
fn only_the_imperfection_pass_draws_from_the_source() {
    let mut c = RecordingCanvas::new(4.0, 4.0);
    let mut rng = FixedSequence::new([0.25, 0.75]);
    let passes = vec![
        PassSpec::always(PassKind::Body, "body", mark),
        PassSpec::imperfection("flaws", 0.5, textured),
    ];
    run_passes(&mut c, &Probe, passes, &mut rng);
    assert_eq!(rng.draws(), 1);
    assert_eq!(c.ops()[1].state.global_alpha, 0.25);
}

#[test]
fn life_envelope_stays_in_unit_range() {
    assert_eq!(life(-std::f64::consts::FRAC_PI_2), 0.0);
    assert_eq!(life(std::f64::consts::FRAC_PI_2), 1.0);
    for i in 0..50 {
        let v = life(accent_phase(1.3, 2.0, i, 0.7));
        assert!((0.0..=1.0).contains(&v));
    }
}
