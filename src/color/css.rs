use crate::foundation::core::Rgba;

/// Parse a CSS color string.
///
/// Supports `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`, `hsl()`/`hsla()` (comma or
/// space separated, optional `/ alpha`), `transparent` and a handful of named colors.
pub fn parse_css_color(s: &str) -> Result<Rgba, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty color string".to_owned());
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
        return parse_rgb_args(args);
    }
    if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
        return parse_hsl_args(args);
    }
    named(&lower).ok_or_else(|| format!("unrecognized color \"{s}\""))
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(s: &str) -> Result<Rgba, String> {
    fn nibble(c: u8) -> Result<u8, String> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| format!("invalid hex digit '{}'", c as char))
    }
    let b = s.as_bytes();
    let mut out = [255u8; 4];
    match b.len() {
        3 | 4 => {
            for (i, &c) in b.iter().enumerate() {
                let v = nibble(c)?;
                out[i] = v * 17;
            }
        }
        6 | 8 => {
            for i in 0..b.len() / 2 {
                out[i] = nibble(b[i * 2])? * 16 + nibble(b[i * 2 + 1])?;
            }
        }
        _ => {
            return Err(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned(),
            );
        }
    }
    Ok(Rgba::rgba(
        f64::from(out[0]) / 255.0,
        f64::from(out[1]) / 255.0,
        f64::from(out[2]) / 255.0,
        f64::from(out[3]) / 255.0,
    ))
}

fn split_args(args: &str) -> Vec<&str> {
    args.split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_number(part: &str) -> Result<(f64, bool), String> {
    let (num, pct) = match part.strip_suffix('%') {
        Some(n) => (n, true),
        None => (part.strip_suffix("deg").unwrap_or(part), false),
    };
    let v: f64 = num
        .trim()
        .parse()
        .map_err(|_| format!("invalid color component \"{part}\""))?;
    if !v.is_finite() {
        return Err(format!("non-finite color component \"{part}\""));
    }
    Ok((v, pct))
}

fn parse_alpha(part: Option<&&str>) -> Result<f64, String> {
    match part {
        None => Ok(1.0),
        Some(p) => {
            let (v, pct) = parse_number(p)?;
            Ok(if pct { v / 100.0 } else { v }.clamp(0.0, 1.0))
        }
    }
}

fn parse_rgb_args(args: &str) -> Result<Rgba, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb() expects 3 or 4 components".to_owned());
    }
    let mut ch = [0.0f64; 3];
    for (i, p) in parts.iter().take(3).enumerate() {
        let (v, pct) = parse_number(p)?;
        ch[i] = if pct { v / 100.0 } else { v / 255.0 }.clamp(0.0, 1.0);
    }
    Ok(Rgba::rgba(ch[0], ch[1], ch[2], parse_alpha(parts.get(3))?))
}

fn parse_hsl_args(args: &str) -> Result<Rgba, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("hsl() expects 3 or 4 components".to_owned());
    }
    let (h, _) = parse_number(parts[0])?;
    let (s, _) = parse_number(parts[1])?;
    let (l, _) = parse_number(parts[2])?;
    Ok(hsla_to_rgba(
        h,
        s / 100.0,
        l / 100.0,
        parse_alpha(parts.get(3))?,
    ))
}

/// Standard HSL -> RGB conversion. `h` in degrees, `s`/`l`/`a` in `[0, 1]`.
pub fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let a = a.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgba::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgba::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

fn named(s: &str) -> Option<Rgba> {
    let c = match s {
        "transparent" => return Some(Rgba::TRANSPARENT),
        "black" => Rgba::from_rgb8(0, 0, 0),
        "white" => Rgba::from_rgb8(255, 255, 255),
        "red" => Rgba::from_rgb8(255, 0, 0),
        "green" => Rgba::from_rgb8(0, 128, 0),
        "blue" => Rgba::from_rgb8(0, 0, 255),
        "yellow" => Rgba::from_rgb8(255, 255, 0),
        "cyan" => Rgba::from_rgb8(0, 255, 255),
        "magenta" => Rgba::from_rgb8(255, 0, 255),
        "gray" | "grey" => Rgba::from_rgb8(128, 128, 128),
        "orange" => Rgba::from_rgb8(255, 165, 0),
        "purple" => Rgba::from_rgb8(128, 0, 128),
        "gold" => Rgba::from_rgb8(255, 215, 0),
        "silver" => Rgba::from_rgb8(192, 192, 192),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/color/css.rs"]
mod tests;
