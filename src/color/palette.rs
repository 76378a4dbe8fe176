use crate::color::css::hsla_to_rgba;
use crate::foundation::core::Rgba;

/// HSL color with alpha: hue in degrees, saturation/lightness in percent, alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees (any value; wrapped on output).
    pub h: f64,
    /// Saturation percent.
    pub s: f64,
    /// Lightness percent.
    pub l: f64,
    /// Alpha.
    pub a: f64,
}

impl Hsl {
    /// Build a color; channels are clamped only when converted.
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Shift hue by `dh` degrees.
    pub fn rotate(self, dh: f64) -> Self {
        Self {
            h: self.h + dh,
            ..self
        }
    }

    /// Add `dl` percentage points of lightness.
    pub fn lighten(self, dl: f64) -> Self {
        Self {
            l: self.l + dl,
            ..self
        }
    }

    /// Multiply saturation by `k`.
    pub fn saturate(self, k: f64) -> Self {
        Self {
            s: self.s * k,
            ..self
        }
    }

    /// Replace alpha.
    pub fn alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Channels with saturation and lightness clamped into `[0, 100]`, hue into `[0, 360)`.
    pub fn clamped(self) -> Self {
        let fin = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };
        Self {
            h: fin(self.h, 0.0).rem_euclid(360.0),
            s: fin(self.s, 0.0).clamp(0.0, 100.0),
            l: fin(self.l, 0.0).clamp(0.0, 100.0),
            a: fin(self.a, 1.0).clamp(0.0, 1.0),
        }
    }

    /// CSS `hsla()` string of the clamped channels.
    pub fn css(self) -> String {
        let c = self.clamped();
        format!("hsla({:.1}, {:.1}%, {:.1}%, {:.3})", c.h, c.s, c.l, c.a)
    }

    /// Straight-alpha RGBA of the clamped channels.
    pub fn to_rgba(self) -> Rgba {
        let c = self.clamped();
        hsla_to_rgba(c.h, c.s / 100.0, c.l / 100.0, c.a)
    }
}

/// Per-material adjustment record applied to the base HSL values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialAdjust {
    /// Degrees added to the hue.
    pub hue_shift: f64,
    /// Saturation multiplier.
    pub sat_mult: f64,
    /// Lightness multiplier.
    pub light_mult: f64,
}

impl MaterialAdjust {
    /// Identity adjustment.
    pub const NEUTRAL: Self = Self::new(0.0, 1.0, 1.0);

    /// Build an adjustment record.
    pub const fn new(hue_shift: f64, sat_mult: f64, light_mult: f64) -> Self {
        Self {
            hue_shift,
            sat_mult,
            light_mult,
        }
    }
}

/// Linear coefficients that turn `(purity, transparency)` into base saturation/lightness.
///
/// `saturation = purity * sat_k`, `lightness = light_base + transparency * light_k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteShape {
    /// Saturation per unit purity.
    pub sat_k: f64,
    /// Lightness at zero transparency.
    pub light_base: f64,
    /// Lightness per unit transparency.
    pub light_k: f64,
}

impl PaletteShape {
    /// Base color for a hue after the material adjustment.
    pub fn base(&self, hue: f64, purity: f64, transparency: f64, adjust: MaterialAdjust) -> Hsl {
        let s = purity * self.sat_k;
        let l = self.light_base + transparency * self.light_k;
        Hsl::new(
            hue + adjust.hue_shift,
            s * adjust.sat_mult,
            l * adjust.light_mult,
            1.0,
        )
    }
}

/// One palette entry: the CSS string and its parsed RGBA.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaletteColor {
    css: String,
    #[serde(skip)]
    rgba: Rgba,
}

impl PaletteColor {
    /// The CSS color string.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Straight-alpha RGBA.
    pub fn rgba(&self) -> Rgba {
        self.rgba
    }
}

impl From<Hsl> for PaletteColor {
    fn from(c: Hsl) -> Self {
        Self {
            css: c.css(),
            rgba: c.to_rgba(),
        }
    }
}

/// Fixed-shape set of derived colors consumed by a template's passes.
///
/// `special` is the template-specific extra (fire, caustic, lichen, glow).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Palette {
    /// Main body color.
    pub primary: PaletteColor,
    /// Lighter companion.
    pub light: PaletteColor,
    /// Darker companion.
    pub dark: PaletteColor,
    /// Contrasting accent.
    pub accent: PaletteColor,
    /// Near-white highlight.
    pub highlight: PaletteColor,
    /// Template-specific extra tone.
    pub special: PaletteColor,
}

impl Palette {
    /// Standard derivation from a base color: light/dark by lightness offset, accent by hue
    /// rotation, highlight near white, and a caller-provided special tone.
    pub fn derive(base: Hsl, accent_rotation: f64, special: Hsl) -> Self {
        Self {
            primary: base.into(),
            light: base.lighten(20.0).into(),
            dark: base.lighten(-25.0).into(),
            accent: base.rotate(accent_rotation).into(),
            highlight: Hsl::new(base.h, base.s * 0.3, 95.0, 1.0).into(),
            special: special.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
