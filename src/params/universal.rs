//! Background, fill, stroke and animation knobs shared by every template.

use crate::params::resolve::ResolvedParams;
use crate::params::schema::{ParameterDefinition as Def, ParameterSchema};

fn gradient_background(p: &ResolvedParams) -> bool {
    p.text("backgroundType") == Some("gradient")
}

fn gradient_mid(p: &ResolvedParams) -> bool {
    gradient_background(p) && p.flag_or("backgroundGradientUseMid", false)
}

fn solid_background(p: &ResolvedParams) -> bool {
    p.text("backgroundType") == Some("solid")
}

fn fill_solid(p: &ResolvedParams) -> bool {
    p.text("fillType") == Some("solid")
}

fn fill_gradient(p: &ResolvedParams) -> bool {
    p.text("fillType") == Some("gradient")
}

fn fill_any(p: &ResolvedParams) -> bool {
    p.text("fillType") != Some("none")
}

fn stroke_any(p: &ResolvedParams) -> bool {
    p.text("strokeType") != Some("none")
}

impl ParameterSchema {
    /// Append the universal background/fill/stroke/animation entries.
    pub fn with_universal(self) -> Self {
        self.with(
            "backgroundType",
            Def::select(
                "Background",
                &[
                    ("transparent", "Transparent"),
                    ("solid", "Solid"),
                    ("gradient", "Gradient"),
                ],
                "transparent",
            )
            .category("Background"),
        )
        .with(
            "backgroundColor",
            Def::color("Background Color", "#ffffff")
                .category("Background")
                .show_if(solid_background),
        )
        .with(
            "backgroundGradientStart",
            Def::color("Gradient Start", "#ffffff")
                .category("Background")
                .show_if(gradient_background),
        )
        .with(
            "backgroundGradientEnd",
            Def::color("Gradient End", "#dbe4f0")
                .category("Background")
                .show_if(gradient_background),
        )
        .with(
            "backgroundGradientUseMid",
            Def::toggle("Gradient Midpoint", false)
                .category("Background")
                .show_if(gradient_background),
        )
        .with(
            "backgroundGradientMid",
            Def::color("Gradient Mid", "#eef2f7")
                .category("Background")
                .show_if(gradient_mid),
        )
        .with(
            "backgroundGradientDirection",
            Def::slider("Gradient Direction", 0.0, 360.0, 1.0, 135.0)
                .degrees()
                .category("Background")
                .show_if(gradient_background),
        )
        .with(
            "fillType",
            Def::select(
                "Fill",
                &[("none", "None"), ("solid", "Solid"), ("gradient", "Gradient")],
                "none",
            )
            .category("Fill"),
        )
        .with(
            "fillColor",
            Def::color("Fill Color", "#3b82f6")
                .category("Fill")
                .show_if(fill_solid),
        )
        .with(
            "fillOpacity",
            Def::slider("Fill Opacity", 0.0, 1.0, 0.01, 1.0)
                .category("Fill")
                .show_if(fill_any),
        )
        .with(
            "fillGradientStart",
            Def::color("Fill Start", "#3b82f6")
                .category("Fill")
                .show_if(fill_gradient),
        )
        .with(
            "fillGradientEnd",
            Def::color("Fill End", "#8b5cf6")
                .category("Fill")
                .show_if(fill_gradient),
        )
        .with(
            "fillGradientDirection",
            Def::slider("Fill Direction", 0.0, 360.0, 1.0, 90.0)
                .degrees()
                .category("Fill")
                .show_if(fill_gradient),
        )
        .with(
            "strokeType",
            Def::select(
                "Stroke",
                &[
                    ("none", "None"),
                    ("solid", "Solid"),
                    ("dashed", "Dashed"),
                    ("dotted", "Dotted"),
                ],
                "solid",
            )
            .category("Stroke"),
        )
        .with(
            "strokeColor",
            Def::color("Stroke Color", "#1e293b")
                .category("Stroke")
                .show_if(stroke_any),
        )
        .with(
            "strokeWidth",
            Def::slider("Stroke Width", 0.0, 20.0, 0.5, 2.0)
                .category("Stroke")
                .show_if(stroke_any),
        )
        .with(
            "strokeOpacity",
            Def::slider("Stroke Opacity", 0.0, 1.0, 0.01, 1.0)
                .category("Stroke")
                .show_if(stroke_any),
        )
        .with(
            "animationSpeed",
            Def::slider("Animation Speed", 0.0, 5.0, 0.1, 1.0).category("Animation"),
        )
    }
}
