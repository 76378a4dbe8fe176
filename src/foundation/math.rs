use std::f64::consts::TAU;

/// SplitMix64 generator. Small, fast, and bit-stable across platforms.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a raw seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Hash a lattice coordinate to `[0, 1)`.
pub fn hash01(seed: u64, x: u64) -> f64 {
    let mut rng = Rng64::new(seed ^ x.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01()
}

/// Cubic Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Value noise on a ring of `cells` lattice points, in `[-1, 1]`.
///
/// `angle` is in radians; `rotation` shifts the lattice in cell units. The lattice index wraps
/// modulo `cells`, so `ring_noise(0) == ring_noise(TAU)` for every rotation.
pub fn ring_noise(seed: u64, cells: u32, angle: f64, rotation: f64) -> f64 {
    let cells = cells.max(1);
    let n = f64::from(cells);
    let x = (angle / TAU * n + rotation).rem_euclid(n);
    let i0 = x.floor();
    let t = smoothstep(x - i0);
    let i0 = (i0 as u64) % u64::from(cells);
    let i1 = (i0 + 1) % u64::from(cells);
    let a = hash01(seed, i0) * 2.0 - 1.0;
    let b = hash01(seed, i1) * 2.0 - 1.0;
    lerp(a, b, t)
}

/// Two octaves of [`ring_noise`], still exactly periodic in `angle`.
pub fn ring_fbm(seed: u64, cells: u32, angle: f64, rotation: f64) -> f64 {
    let lo = ring_noise(seed, cells, angle, rotation);
    let hi = ring_noise(seed ^ 0xA5A5_A5A5, cells.saturating_mul(2), angle, rotation * 2.0);
    (lo * 0.67 + hi * 0.33).clamp(-1.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
