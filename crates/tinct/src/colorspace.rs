//! HSV colorspace conversions and color manipulation.
//!
//! All manipulation functions take and return hex color strings so they
//! compose directly with markup tags and palette generation. Channel math is
//! done in HSV, where "lighten" and "saturate" map onto single components,
//! instead of in RGB where they would couple all three channels.

use crate::error::Error;
use tinct_markup::{hex_to_rgb, rgb_to_hex};

/// A color in HSV space, all components in `0.0..=1.0`.
///
/// Hue wraps: `h = 0.0` and `h = 1.0` are both red.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Parses a hex color string into HSV.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let (r, g, b) = hex_to_rgb(hex)?;
        Ok(rgb_to_hsv(r, g, b))
    }

    /// Converts to a lowercase hex string.
    pub fn to_hex(self) -> String {
        let (r, g, b) = hsv_to_rgb(self);
        rgb_to_hex(r, g, b)
    }
}

/// Converts 8-bit RGB to HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let range = max - min;

    let v = max;
    if range == 0.0 {
        return Hsv::new(0.0, 0.0, v);
    }
    let s = range / max;

    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (h / 6.0).rem_euclid(1.0);

    Hsv::new(h, s, v)
}

/// Converts HSV back to 8-bit RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let Hsv { h, s, v } = hsv;
    if s == 0.0 {
        let c = (v * 255.0).round() as u8;
        return (c, c, c);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// WCAG 2.1 relative luminance of an 8-bit RGB color.
///
/// Uses the 0.03928 sRGB linearization knee, which makes the white/black
/// contrast ratio come out to exactly 21.0.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linearize(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Increases brightness (HSV value) by `amount`, clamped to 1.0.
pub fn lighten(color: &str, amount: f64) -> Result<String, Error> {
    let mut hsv = Hsv::from_hex(color)?;
    hsv.v = (hsv.v + amount).min(1.0);
    Ok(hsv.to_hex())
}

/// Decreases brightness (HSV value) by `amount`, clamped to 0.0.
pub fn darken(color: &str, amount: f64) -> Result<String, Error> {
    let mut hsv = Hsv::from_hex(color)?;
    hsv.v = (hsv.v - amount).max(0.0);
    Ok(hsv.to_hex())
}

/// Increases saturation by `amount`, clamped to 1.0.
pub fn saturate(color: &str, amount: f64) -> Result<String, Error> {
    let mut hsv = Hsv::from_hex(color)?;
    hsv.s = (hsv.s + amount).min(1.0);
    Ok(hsv.to_hex())
}

/// Decreases saturation by `amount`, clamped to 0.0.
pub fn desaturate(color: &str, amount: f64) -> Result<String, Error> {
    let mut hsv = Hsv::from_hex(color)?;
    hsv.s = (hsv.s - amount).max(0.0);
    Ok(hsv.to_hex())
}

/// Rotates hue by `degrees` (negative rotates the other way).
pub fn shift_hue(color: &str, degrees: f64) -> Result<String, Error> {
    let mut hsv = Hsv::from_hex(color)?;
    hsv.h = (hsv.h + degrees / 360.0).rem_euclid(1.0);
    Ok(hsv.to_hex())
}

/// Inverts each RGB channel.
pub fn invert(color: &str) -> Result<String, Error> {
    let (r, g, b) = hex_to_rgb(color)?;
    Ok(rgb_to_hex(255 - r, 255 - g, 255 - b))
}

/// Mixes two colors; `weight` is the share of the first color.
pub fn mix(color1: &str, color2: &str, weight: f64) -> Result<String, Error> {
    let (r1, g1, b1) = hex_to_rgb(color1)?;
    let (r2, g2, b2) = hex_to_rgb(color2)?;

    let blend = |a: u8, b: u8| (a as f64 * weight + b as f64 * (1.0 - weight)) as u8;
    Ok(rgb_to_hex(blend(r1, r2), blend(g1, g2), blend(b1, b2)))
}
