use crate::foundation::core::Rgba8;
use serde::{Deserialize, Serialize};

/// A configuration color.
///
/// Deserializes from `"#rgb"`, `"#rrggbb"`, `"#rrggbbaa"`, `{r,g,b[,a]}` / `{h,s,l[,a]}` objects
/// with `0..=1` channels, or `[r,g,b(,a)]` arrays. Always serializes as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorDef(pub Rgba8);

impl ColorDef {
    /// Parse a hex color string.
    pub fn hex(s: &str) -> Result<Self, String> {
        parse_hex(s).map(Self)
    }

    /// Straight-alpha RGBA8 value.
    pub fn rgba8(self) -> Rgba8 {
        self.0
    }

    fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        fn to_u8(x: f64) -> u8 {
            if x.is_finite() {
                (x.clamp(0.0, 1.0) * 255.0).round() as u8
            } else {
                0
            }
        }
        Self(Rgba8::rgba(to_u8(r), to_u8(g), to_u8(b), to_u8(a)))
    }
}

impl From<Rgba8> for ColorDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let Rgba8 { r, g, b, a } = self.0;
        let s = if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        };
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            HslaObj {
                h: f64,
                s: f64,
                l: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => ColorDef::hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::from_unit(r, g, b, a)),
            Repr::HslaObj { h, s, l, a } => Ok(hsla_to_color(h, s, l, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::from_unit(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::from_unit(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            let nibble = |i: usize| hex_byte(&s[i..i + 1].repeat(2));
            Ok(Rgba8::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

fn hsla_to_color(h: f64, s: f64, l: f64, a: f64) -> ColorDef {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return ColorDef::from_unit(l, l, l, a);
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

    ColorDef::from_unit(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
