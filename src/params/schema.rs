use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::css::parse_css_color;
use crate::foundation::error::{LogoError, LogoResult};
use crate::params::resolve::ResolvedParams;
use crate::params::value::ParamValue;

/// Nominal design size most templates lay out against.
pub const DEFAULT_NOMINAL_SIZE: f64 = 350.0;

/// Kind of control and its type-specific constraints.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    /// Numeric slider with inclusive bounds and a UI quantization step.
    Slider {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// UI step; the resolver does not quantize.
        step: f64,
    },
    /// One of a fixed, ordered option list.
    Select {
        /// Options in UI order.
        options: Vec<SelectOption>,
    },
    /// CSS color string.
    Color,
    /// Boolean switch.
    Toggle,
    /// Free text.
    Text,
}

/// One entry of a select control.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectOption {
    /// Stored value.
    pub value: ParamValue,
    /// UI label.
    pub label: String,
}

impl SelectOption {
    /// Build an option.
    pub fn new(value: impl Into<ParamValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declared unit of a numeric parameter.
///
/// Only degrees exist; the resolver converts degree-tagged values to radians. Deserialization
/// accepts every spelling the tag has been written with, including the mis-encoded `"Â°"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Angle in degrees.
    #[serde(rename = "deg", alias = "degrees", alias = "°", alias = "Â°")]
    Degrees,
}

/// UI visibility predicate evaluated over resolved parameters.
pub type ShowIf = fn(&ResolvedParams) -> bool;

/// Describes one tunable knob.
#[derive(Clone, Debug)]
pub struct ParameterDefinition {
    /// Control kind and constraints.
    pub kind: ParamKind,
    /// Default value, type-consistent with `kind`, in the declared unit.
    pub default: ParamValue,
    /// UI label.
    pub label: String,
    /// UI grouping label; no effect on rendering.
    pub category: String,
    /// Declared unit, if any.
    pub unit: Option<Unit>,
    /// UI-only visibility hint. Never gates whether a value is honored.
    pub show_if: Option<ShowIf>,
}

impl ParameterDefinition {
    fn new(kind: ParamKind, label: &str, default: ParamValue) -> Self {
        Self {
            kind,
            default,
            label: label.to_owned(),
            category: "General".to_owned(),
            unit: None,
            show_if: None,
        }
    }

    /// Numeric slider.
    pub fn slider(label: &str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self::new(
            ParamKind::Slider { min, max, step },
            label,
            ParamValue::Number(default),
        )
    }

    /// Integer-valued slider used as a style selector.
    pub fn selector(label: &str, variants: usize, default: usize) -> Self {
        let max = variants.saturating_sub(1) as f64;
        Self::slider(label, 0.0, max, 1.0, default as f64)
    }

    /// Select over `(value, label)` pairs.
    pub fn select<V: Into<ParamValue> + Clone>(
        label: &str,
        options: &[(V, &str)],
        default: V,
    ) -> Self {
        let options = options
            .iter()
            .map(|(v, l)| SelectOption::new(v.clone(), *l))
            .collect();
        Self::new(ParamKind::Select { options }, label, default.into())
    }

    /// CSS color.
    pub fn color(label: &str, default: &str) -> Self {
        Self::new(ParamKind::Color, label, ParamValue::Text(default.to_owned()))
    }

    /// Boolean toggle.
    pub fn toggle(label: &str, default: bool) -> Self {
        Self::new(ParamKind::Toggle, label, ParamValue::Bool(default))
    }

    /// Free text.
    pub fn text(label: &str, default: &str) -> Self {
        Self::new(ParamKind::Text, label, ParamValue::Text(default.to_owned()))
    }

    /// Set the UI category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Tag the value as degrees.
    pub fn degrees(mut self) -> Self {
        self.unit = Some(Unit::Degrees);
        self
    }

    /// Attach a visibility predicate.
    pub fn show_if(mut self, pred: ShowIf) -> Self {
        self.show_if = Some(pred);
        self
    }

    /// Whether the UI should show this control for `resolved`.
    pub fn is_visible(&self, resolved: &ResolvedParams) -> bool {
        self.show_if.is_none_or(|pred| pred(resolved))
    }

    /// Bounds of a slider, or `None`.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.kind {
            ParamKind::Slider { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        match &self.kind {
            ParamKind::Slider { min, max, step } => {
                if !(min.is_finite() && max.is_finite()) || min > max {
                    return Err(format!("'{name}': slider bounds must satisfy min <= max"));
                }
                if !(*step > 0.0) {
                    return Err(format!("'{name}': slider step must be > 0"));
                }
                let ParamValue::Number(d) = self.default else {
                    return Err(format!("'{name}': slider default must be a number"));
                };
                if d < *min || d > *max {
                    return Err(format!("'{name}': default {d} outside [{min}, {max}]"));
                }
            }
            ParamKind::Select { options } => {
                if options.is_empty() {
                    return Err(format!("'{name}': select needs at least one option"));
                }
                if !options.iter().any(|o| o.value == self.default) {
                    return Err(format!("'{name}': select default is not one of its options"));
                }
            }
            ParamKind::Color => {
                let ok = self
                    .default
                    .as_text()
                    .is_some_and(|s| parse_css_color(s).is_ok());
                if !ok {
                    return Err(format!("'{name}': color default must be a CSS color"));
                }
            }
            ParamKind::Toggle => {
                if !matches!(self.default, ParamValue::Bool(_)) {
                    return Err(format!("'{name}': toggle default must be a boolean"));
                }
            }
            ParamKind::Text => {
                if self.default.as_text().is_none() {
                    return Err(format!("'{name}': text default must be a string"));
                }
            }
        }
        if self.unit.is_some() && self.bounds().is_none() {
            return Err(format!("'{name}': units are only meaningful on sliders"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct DefinitionView<'a> {
    name: &'a str,
    #[serde(flatten)]
    kind: &'a ParamKind,
    default: &'a ParamValue,
    label: &'a str,
    category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<Unit>,
    conditional: bool,
}

/// Ordered map from parameter name to definition, plus the template's nominal design size.
///
/// Built once per template and read for every draw.
#[derive(Clone, Debug)]
pub struct ParameterSchema {
    nominal_size: f64,
    entries: Vec<(String, ParameterDefinition)>,
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINAL_SIZE)
    }
}

impl ParameterSchema {
    /// Empty schema laid out against `nominal_size` design units.
    pub fn new(nominal_size: f64) -> Self {
        Self {
            nominal_size,
            entries: Vec::new(),
        }
    }

    /// Append a definition. Later duplicates are reported by [`ParameterSchema::validate`].
    pub fn with(mut self, name: &str, def: ParameterDefinition) -> Self {
        self.entries.push((name.to_owned(), def));
        self
    }

    /// Replace the default of an existing entry. Unknown names are ignored.
    pub fn with_default(mut self, name: &str, default: impl Into<ParamValue>) -> Self {
        if let Some((_, def)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            def.default = default.into();
        }
        self
    }

    /// Nominal design size used for `baseScale`.
    pub fn nominal_size(&self) -> f64 {
        self.nominal_size
    }

    /// Look up a definition.
    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterDefinition)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check structural invariants of every entry.
    pub fn validate(&self) -> LogoResult<()> {
        if !(self.nominal_size.is_finite() && self.nominal_size > 0.0) {
            return Err(LogoError::validation("nominal size must be > 0"));
        }
        let mut seen = HashSet::new();
        let mut errors = Vec::new();
        for (name, def) in &self.entries {
            if !seen.insert(name.as_str()) {
                errors.push(format!("'{name}': duplicate parameter name"));
            }
            if let Err(e) = def.validate(name) {
                errors.push(e);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(LogoError::validation(errors.join("; ")))
        }
    }

    /// The template's `defaultParams`: every default in its declared unit.
    pub fn defaults_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(n, d)| (n.clone(), d.default.to_json()))
            .collect()
    }

    /// Names whose visibility predicate currently hides them.
    pub fn hidden(&self, resolved: &ResolvedParams) -> Vec<&str> {
        self.iter()
            .filter(|(_, d)| !d.is_visible(resolved))
            .map(|(n, _)| n)
            .collect()
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (name, def) in &self.entries {
            seq.serialize_element(&DefinitionView {
                name,
                kind: &def.kind,
                default: &def.default,
                label: &def.label,
                category: &def.category,
                unit: def.unit,
                conditional: def.show_if.is_some(),
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/schema.rs"]
mod tests;
