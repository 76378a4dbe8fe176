use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::css::parse_css_color;
use crate::foundation::core::{Point, Rgba};
use crate::params::schema::{ParamKind, ParameterDefinition, ParameterSchema, Unit};
use crate::params::value::ParamValue;

/// Nested groups flattened over the top level, in increasing precedence.
pub const PARAM_GROUPS: [&str; 4] = ["core", "style", "custom", "content"];
/// Legacy group whose keys only fill top-level gaps.
pub const LEGACY_GROUP: &str = "customParameters";
/// Host-injected viewport record.
pub const VIEWPORT_KEY: &str = "_viewport";

const BREATHING_RATE: f64 = 0.8;

/// Theme colors every template can rely on.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Main fill color.
    pub fill_color: String,
    /// Main stroke color.
    pub stroke_color: String,
    /// Fill opacity in `[0, 1]`.
    pub fill_opacity: f64,
    /// Stroke opacity in `[0, 1]`.
    pub stroke_opacity: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fill_color: "#000000".to_owned(),
            stroke_color: "#000000".to_owned(),
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
        }
    }
}

/// Infinite-canvas viewport injected by pan/zoom hosts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal pan offset in canvas pixels.
    #[serde(default)]
    pub offset_x: f64,
    /// Vertical pan offset in canvas pixels.
    #[serde(default)]
    pub offset_y: f64,
    /// Zoom factor; non-positive values are treated as `1`.
    #[serde(default = "one")]
    pub zoom: f64,
    /// Visible width in canvas pixels.
    #[serde(default)]
    pub view_width: f64,
    /// Visible height in canvas pixels.
    #[serde(default)]
    pub view_height: f64,
}

fn one() -> f64 {
    1.0
}

/// Closed enumeration decoded from an integer-valued slider.
pub trait Variant: Copy + 'static {
    /// Every variant, in slider order.
    const ALL: &'static [Self];

    /// Round and clamp a slider value onto a variant. Non-finite input selects the first.
    fn from_slider(v: f64) -> Self {
        let last = Self::ALL.len().saturating_sub(1);
        let idx = if v.is_finite() {
            v.round().clamp(0.0, last as f64) as usize
        } else {
            0
        };
        Self::ALL[idx]
    }
}

/// Flat, fully-defaulted, range-clamped parameters for one draw.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParams {
    #[serde(flatten)]
    values: BTreeMap<String, ParamValue>,
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Host clock.
    pub time: f64,
    /// `width / 2`.
    pub center_x: f64,
    /// `height / 2`.
    pub center_y: f64,
    /// `min(width, height) / nominal_size`.
    pub base_scale: f64,
    /// `time * animationSpeed`.
    pub anim_time: f64,
    /// `time * 0.8`.
    pub breathing_phase: f64,
    /// Theme colors.
    pub theme: Theme,
    /// Optional pan/zoom viewport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl ResolvedParams {
    /// Raw value lookup.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Whether `name` has a value.
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// All resolved names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Numeric value, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ParamValue::as_number)
    }

    /// Numeric value or `fallback` when unset. `0` is a value, not "unset".
    pub fn number_or(&self, name: &str, fallback: f64) -> f64 {
        self.number(name).unwrap_or(fallback)
    }

    /// Boolean value or `fallback` when unset.
    pub fn flag_or(&self, name: &str, fallback: bool) -> bool {
        self.get(name)
            .and_then(ParamValue::as_bool)
            .unwrap_or(fallback)
    }

    /// Text value, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }

    /// Parsed color or `fallback` when unset or unparsable.
    pub fn color_or(&self, name: &str, fallback: Rgba) -> Rgba {
        self.text(name)
            .and_then(|s| parse_css_color(s).ok())
            .unwrap_or(fallback)
    }

    /// Decode a style selector slider.
    pub fn variant<T: Variant>(&self, name: &str) -> T {
        T::from_slider(self.number_or(name, 0.0))
    }

    /// Canvas center.
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Override one value. Used by hosts that tweak a single knob between frames.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_owned(), value.into());
    }
}

fn is_unset(v: Option<&Value>) -> bool {
    matches!(v, None | Some(Value::Null))
}

fn is_reserved(key: &str) -> bool {
    key == LEGACY_GROUP || key == VIEWPORT_KEY || PARAM_GROUPS.contains(&key)
}

/// Merge a raw parameter bag with `schema` into a [`ResolvedParams`].
///
/// Never fails: missing keys take schema defaults, unusable values are repaired (with a `warn!`),
/// and unknown keys pass through unchanged.
#[tracing::instrument(level = "debug", skip(raw, schema))]
pub fn resolve(
    raw: &Value,
    schema: &ParameterSchema,
    width: f64,
    height: f64,
    time: f64,
) -> ResolvedParams {
    let empty = Map::new();
    let top = raw.as_object().unwrap_or(&empty);

    // Legacy bag fills gaps only; fillColor/strokeColor/backgroundColor/textColor go through the
    // same rule, so an explicit top-level value always wins.
    let mut merged = top.clone();
    if let Some(legacy) = top.get(LEGACY_GROUP).and_then(Value::as_object) {
        for (k, v) in legacy {
            if is_unset(merged.get(k)) && !v.is_null() {
                merged.insert(k.clone(), v.clone());
            }
        }
    }

    let mut flat: BTreeMap<String, Value> = merged
        .iter()
        .filter(|(k, v)| !is_reserved(k) && !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for group in PARAM_GROUPS {
        if let Some(obj) = merged.get(group).and_then(Value::as_object) {
            for (k, v) in obj {
                if !v.is_null() {
                    flat.insert(k.clone(), v.clone());
                }
            }
        }
    }

    let mut values = BTreeMap::new();
    for (name, def) in schema.iter() {
        let supplied = flat.remove(name);
        values.insert(name.to_owned(), coerce(name, def, supplied.as_ref()));
    }
    for (name, v) in flat {
        if let Some(pv) = ParamValue::from_json(&v) {
            values.insert(name, pv);
        }
    }

    let viewport = top
        .get(VIEWPORT_KEY)
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value::<Viewport>(v.clone()).ok())
        .map(|mut vp| {
            if !(vp.zoom.is_finite() && vp.zoom > 0.0) {
                vp.zoom = 1.0;
            }
            vp
        });

    let mut out = ResolvedParams {
        values,
        width,
        height,
        time,
        center_x: width / 2.0,
        center_y: height / 2.0,
        base_scale: width.min(height) / schema.nominal_size(),
        anim_time: 0.0,
        breathing_phase: time * BREATHING_RATE,
        theme: Theme::default(),
        viewport,
    };
    out.anim_time = time * out.number_or("animationSpeed", 1.0);
    let defaults = Theme::default();
    out.theme = Theme {
        fill_color: out
            .text("fillColor")
            .map_or(defaults.fill_color, str::to_owned),
        stroke_color: out
            .text("strokeColor")
            .map_or(defaults.stroke_color, str::to_owned),
        fill_opacity: out.number_or("fillOpacity", defaults.fill_opacity),
        stroke_opacity: out.number_or("strokeOpacity", defaults.stroke_opacity),
    };
    out
}

fn number_from_json(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn coerce(name: &str, def: &ParameterDefinition, supplied: Option<&Value>) -> ParamValue {
    match &def.kind {
        ParamKind::Slider { min, max, .. } => {
            let fallback = def.default.as_number().unwrap_or(*min);
            let v = match supplied {
                None => fallback,
                Some(raw) => number_from_json(raw).unwrap_or_else(|| {
                    tracing::warn!(
                        param = name,
                        value = %raw,
                        "non-numeric slider value, using default"
                    );
                    fallback
                }),
            };
            let (v, lo, hi) = match def.unit {
                Some(Unit::Degrees) => (v.to_radians(), min.to_radians(), max.to_radians()),
                None => (v, *min, *max),
            };
            ParamValue::Number(v.clamp(lo, hi))
        }
        ParamKind::Toggle => match supplied {
            None => def.default.clone(),
            Some(Value::Bool(b)) => ParamValue::Bool(*b),
            Some(Value::Number(n)) => ParamValue::Bool(n.as_f64().is_some_and(|v| v != 0.0)),
            Some(Value::String(s)) if s == "true" || s == "false" => ParamValue::Bool(s == "true"),
            Some(raw) => {
                tracing::warn!(param = name, value = %raw, "invalid toggle value, using default");
                def.default.clone()
            }
        },
        ParamKind::Select { options } => {
            let Some(raw) = supplied else {
                return def.default.clone();
            };
            let hit = options.iter().find(|o| match (&o.value, raw) {
                (ParamValue::Text(t), Value::String(s)) => t == s,
                (ParamValue::Number(n), other) => {
                    number_from_json(other).is_some_and(|v| (v - n).abs() < 1e-9)
                }
                (ParamValue::Bool(b), Value::Bool(r)) => b == r,
                _ => false,
            });
            match hit {
                Some(o) => o.value.clone(),
                None => {
                    tracing::warn!(
                        param = name,
                        value = %raw,
                        "unknown select option, using default"
                    );
                    def.default.clone()
                }
            }
        }
        ParamKind::Color => match supplied {
            None => def.default.clone(),
            Some(Value::String(s)) if parse_css_color(s).is_ok() => ParamValue::Text(s.clone()),
            Some(raw) => {
                tracing::warn!(param = name, value = %raw, "invalid color, using default");
                def.default.clone()
            }
        },
        ParamKind::Text => match supplied {
            None => def.default.clone(),
            Some(Value::String(s)) => ParamValue::Text(s.clone()),
            Some(Value::Number(n)) => ParamValue::Text(n.to_string()),
            Some(Value::Bool(b)) => ParamValue::Text(b.to_string()),
            Some(raw) => {
                tracing::warn!(param = name, value = %raw, "invalid text value, using default");
                def.default.clone()
            }
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/resolve.rs"]
mod tests;
