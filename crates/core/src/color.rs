//! Translucent sRGB colors for gradient stops.
//!
//! [`Rgba`] stores straight (non-premultiplied) components in [0, 1] and
//! serializes as a CSS color string, so the same value can be written into a
//! JSON config, handed to a browser canvas as a `fillStyle` stop, or
//! composited by the CPU rasterizer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HaloError;

/// sRGB color with straight alpha, all components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Builds a color from 8-bit channels and a [0, 1] alpha, like CSS `rgba()`.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parses `rgba(r, g, b, a)`, `rgb(r, g, b)` or `#rrggbb`.
    ///
    /// Channels are 0-255 integers, alpha a number in [0, 1]. Whitespace
    /// around tokens is ignored and function names are case insensitive.
    pub fn from_css(input: &str) -> Result<Self, HaloError> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(HaloError::InvalidColor(format!("unrecognized color '{s}'")));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| HaloError::InvalidColor(format!("missing ')' in '{s}'")))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(HaloError::InvalidColor(format!(
                "expected {expected} components in '{s}', got {}",
                parts.len()
            )));
        }

        let channel = |name: &str, text: &str| {
            text.parse::<u8>()
                .map_err(|e| HaloError::InvalidColor(format!("invalid {name} channel '{text}': {e}")))
        };
        let r = channel("red", parts[0])?;
        let g = channel("green", parts[1])?;
        let b = channel("blue", parts[2])?;
        let a = if has_alpha {
            let a: f64 = parts[3]
                .parse()
                .map_err(|e| HaloError::InvalidColor(format!("invalid alpha '{}': {e}", parts[3])))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(HaloError::InvalidColor(format!("alpha {a} outside [0, 1]")));
            }
            a
        } else {
            1.0
        };
        Ok(Self::from_rgba8(r, g, b, a))
    }

    fn from_hex(hex: &str) -> Result<Self, HaloError> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HaloError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| HaloError::InvalidColor(format!("invalid hex '{hex}': {e}")))
        };
        Ok(Self::from_rgba8(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0))
    }

    /// Formats the color as `rgba(r, g, b, a)` with 8-bit channels and alpha
    /// rounded to three decimals.
    pub fn to_css(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {a})")
    }

    /// Premultiplied `[r*a, g*a, b*a, a]`.
    pub fn premultiplied(self) -> [f64; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_css(&s).map_err(serde::de::Error::custom)
    }
}
