use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn unit_samples_stay_in_range() {
    let mut r = Rng64::new(7);
    for _ in 0..1000 {
        let v = r.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn ring_noise_closes_and_is_bounded() {
    for cells in [1u32, 3, 8, 17] {
        for rot in [0.0, 0.3, 2.75, -1.2] {
            let a = ring_noise(42, cells, 0.0, rot);
            let b = ring_noise(42, cells, TAU, rot);
            assert!((a - b).abs() < 1e-9, "cells={cells} rot={rot}");
            for i in 0..64 {
                let v = ring_fbm(42, cells, f64::from(i) * 0.1, rot);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
}

#[test]
fn smoothstep_endpoints() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert_eq!(smoothstep(-3.0), 0.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
}
