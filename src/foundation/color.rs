use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MatrixError, MatrixResult};

/// Opaque 8-bit RGB sample, as driven onto one LED.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// All channels off.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Build a sample from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamped to `[0, 1]`.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u8| (f64::from(c) * f).round() as u8;
        Self {
            r: ch(self.r),
            g: ch(self.g),
            b: ch(self.b),
        }
    }
}

/// A pixel color as authored by the user.
///
/// The textual form is kept verbatim so exported documents reproduce exactly what was
/// painted or imported (`#ff00aa`, `rgb(1, 2, 3)`, `hsl(60, 100%, 50%)`), while the parsed
/// [`Rgb8`] drives raster output.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    repr: String,
    rgb: Rgb8,
}

impl Color {
    /// Parse a CSS-style color string.
    ///
    /// Accepted forms: `#rgb`, `#rrggbb`, `#rrggbbaa` (alpha ignored), `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` (alpha ignored), `hsl(h, s%, l%)` and `hsla(h, s%, l%, a)`.
    pub fn parse(s: &str) -> MatrixResult<Self> {
        let rgb = parse_rgb(s.trim()).map_err(MatrixError::validation)?;
        Ok(Self {
            repr: s.trim().to_owned(),
            rgb,
        })
    }

    /// `#000000`.
    pub fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    /// `#ffffff`.
    pub fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }

    /// Lowercase `#rrggbb` color.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            repr: format!("#{r:02x}{g:02x}{b:02x}"),
            rgb: Rgb8::new(r, g, b),
        }
    }

    /// `rgb(r, g, b)` color, the form produced by image import.
    pub fn css_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            repr: format!("rgb({r}, {g}, {b})"),
            rgb: Rgb8::new(r, g, b),
        }
    }

    /// Highlight color for the `n`-th area: `hsl(60*n, 100%, 50%)`.
    pub fn area_hue(n: usize) -> Self {
        let hue = 60 * n;
        Self {
            repr: format!("hsl({hue}, 100%, 50%)"),
            rgb: hsl_to_rgb(hue as f64, 1.0, 0.5),
        }
    }

    /// The color text as authored.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Parsed channel values.
    pub fn rgb(&self) -> Rgb8 {
        self.rgb
    }

    /// True when the color drives no LED channel.
    pub fn is_black(&self) -> bool {
        self.rgb == Rgb8::BLACK
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for Color {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.repr)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_rgb(s: &str) -> Result<Rgb8, String> {
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    let (func, args) = lower
        .split_once('(')
        .and_then(|(func, rest)| rest.strip_suffix(')').map(|args| (func.trim(), args)))
        .ok_or_else(|| format!("unrecognized color \"{s}\""))?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    match (func, parts.len()) {
        ("rgb", 3) | ("rgba", 4) => {
            let ch = |p: &str| -> Result<u8, String> {
                let v: f64 = p
                    .parse()
                    .map_err(|_| format!("invalid rgb channel \"{p}\""))?;
                if !v.is_finite() {
                    return Err(format!("invalid rgb channel \"{p}\""));
                }
                Ok(v.clamp(0.0, 255.0).round() as u8)
            };
            Ok(Rgb8::new(ch(parts[0])?, ch(parts[1])?, ch(parts[2])?))
        }
        ("hsl", 3) | ("hsla", 4) => {
            let h = parse_number(parts[0].trim_end_matches("deg"))?;
            let sat = parse_percent(parts[1])?;
            let light = parse_percent(parts[2])?;
            Ok(hsl_to_rgb(h, sat, light))
        }
        _ => Err(format!(
            "color must be #hex, rgb(), rgba(), hsl() or hsla(); got \"{s}\""
        )),
    }
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex byte \"{pair}\""));
        }
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    match s.len() {
        3 => {
            let nib = |i: usize| hex_byte(&s[i..=i]).map(|v| v * 17);
            Ok(Rgb8::new(nib(0)?, nib(1)?, nib(2)?))
        }
        6 | 8 => {
            if s.len() == 8 {
                // Alpha is validated but not kept.
                hex_byte(&s[6..8])?;
            }
            Ok(Rgb8::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            ))
        }
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number \"{s}\""))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("invalid number \"{s}\""))
    }
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let v = parse_number(s.trim_end_matches('%'))?;
    Ok((v / 100.0).clamp(0.0, 1.0))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb8 {
    // Standard HSL -> RGB conversion, hue in degrees, s/l normalized.
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        return Rgb8::new(to_u8(l), to_u8(l), to_u8(l));
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

    Rgb8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
