//! WCAG contrast checks and color-blindness simulation.

use crate::colorspace::{relative_luminance, Hsv};
use crate::error::Error;
use tinct_markup::{hex_to_rgb, rgb_to_hex};

/// Value-adjustment steps tried before falling back to pure white/black.
const MAX_ADJUST_STEPS: usize = 20;

/// Default RGB distance below which simulated colors count as colliding.
pub const DEFAULT_MIN_DIFFERENCE: f64 = 30.0;

/// WCAG 2.1 conformance levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WcagLevel {
    Aa,
    Aaa,
}

impl WcagLevel {
    /// The minimum contrast ratio this level requires.
    pub fn required_ratio(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (WcagLevel::Aa, false) => 4.5,
            (WcagLevel::Aa, true) => 3.0,
            (WcagLevel::Aaa, false) => 7.0,
            (WcagLevel::Aaa, true) => 4.5,
        }
    }
}

/// WCAG 2.1 contrast ratio between two hex colors, in `1.0..=21.0`.
pub fn contrast_ratio(color1: &str, color2: &str) -> Result<f64, Error> {
    let (r1, g1, b1) = hex_to_rgb(color1)?;
    let (r2, g2, b2) = hex_to_rgb(color2)?;

    let l1 = relative_luminance(r1, g1, b1);
    let l2 = relative_luminance(r2, g2, b2);

    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    Ok((lighter + 0.05) / (darker + 0.05))
}

/// Whether a color pair meets the given WCAG level.
pub fn meets_wcag(
    color1: &str,
    color2: &str,
    level: WcagLevel,
    large_text: bool,
) -> Result<bool, Error> {
    Ok(contrast_ratio(color1, color2)? >= level.required_ratio(large_text))
}

/// Adjusts `foreground` until it reaches `min_ratio` contrast against
/// `background`.
///
/// Moves the HSV value toward light or dark depending on the background's
/// brightness, in 0.05 steps. If the target is still unreachable after
/// [`MAX_ADJUST_STEPS`], returns pure white or black.
pub fn ensure_contrast(
    foreground: &str,
    background: &str,
    min_ratio: f64,
) -> Result<String, Error> {
    if contrast_ratio(foreground, background)? >= min_ratio {
        return Ok(foreground.to_string());
    }

    let mut fg = Hsv::from_hex(foreground)?;
    let bg = Hsv::from_hex(background)?;
    let should_lighten = bg.v < 0.5;

    for _ in 0..MAX_ADJUST_STEPS {
        fg.v = if should_lighten {
            (fg.v + 0.05).min(1.0)
        } else {
            (fg.v - 0.05).max(0.0)
        };

        let adjusted = fg.to_hex();
        if contrast_ratio(&adjusted, background)? >= min_ratio {
            return Ok(adjusted);
        }
    }

    Ok(if should_lighten { "#ffffff" } else { "#000000" }.to_string())
}

/// Color vision deficiency types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBlindness {
    /// Red-blind.
    Protanopia,
    /// Green-blind.
    Deuteranopia,
    /// Blue-blind.
    Tritanopia,
    /// Red-weak.
    Protanomaly,
    /// Green-weak.
    Deuteranomaly,
    /// Blue-weak.
    Tritanomaly,
}

impl ColorBlindness {
    /// The RGB transformation matrix for this deficiency.
    fn matrix(self) -> [[f64; 3]; 3] {
        match self {
            ColorBlindness::Protanopia => [
                [0.567, 0.433, 0.000],
                [0.558, 0.442, 0.000],
                [0.000, 0.242, 0.758],
            ],
            ColorBlindness::Deuteranopia => [
                [0.625, 0.375, 0.000],
                [0.700, 0.300, 0.000],
                [0.000, 0.300, 0.700],
            ],
            ColorBlindness::Tritanopia => [
                [0.950, 0.050, 0.000],
                [0.000, 0.433, 0.567],
                [0.000, 0.475, 0.525],
            ],
            ColorBlindness::Protanomaly => [
                [0.817, 0.183, 0.000],
                [0.333, 0.667, 0.000],
                [0.000, 0.125, 0.875],
            ],
            ColorBlindness::Deuteranomaly => [
                [0.800, 0.200, 0.000],
                [0.258, 0.742, 0.000],
                [0.000, 0.142, 0.858],
            ],
            ColorBlindness::Tritanomaly => [
                [0.967, 0.033, 0.000],
                [0.000, 0.733, 0.267],
                [0.000, 0.183, 0.817],
            ],
        }
    }
}

/// Simulates how a color appears under a given color vision deficiency.
pub fn simulate_colorblindness(hex: &str, kind: ColorBlindness) -> Result<String, Error> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let m = kind.matrix();

    let transform = |row: [f64; 3]| {
        let v = row[0] * r as f64 + row[1] * g as f64 + row[2] * b as f64;
        v.round().clamp(0.0, 255.0) as u8
    };

    Ok(rgb_to_hex(transform(m[0]), transform(m[1]), transform(m[2])))
}

/// Finds palette color pairs that become indistinguishable under `kind`.
///
/// Each color is simulated, then every pair is compared by Euclidean RGB
/// distance; pairs closer than `min_difference` are returned as index pairs.
/// An empty result means the palette is safe for that deficiency.
pub fn colorblind_collisions(
    colors: &[String],
    kind: ColorBlindness,
    min_difference: f64,
) -> Result<Vec<(usize, usize)>, Error> {
    let simulated: Vec<(u8, u8, u8)> = colors
        .iter()
        .map(|c| {
            let simulated = simulate_colorblindness(c, kind)?;
            hex_to_rgb(&simulated).map_err(Error::from)
        })
        .collect::<Result<_, Error>>()?;

    let mut problems = Vec::new();
    for i in 0..simulated.len() {
        for j in (i + 1)..simulated.len() {
            let (r1, g1, b1) = simulated[i];
            let (r2, g2, b2) = simulated[j];
            let distance = ((r2 as f64 - r1 as f64).powi(2)
                + (g2 as f64 - g1 as f64).powi(2)
                + (b2 as f64 - b1 as f64).powi(2))
            .sqrt();
            if distance < min_difference {
                problems.push((i, j));
            }
        }
    }
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_on_black_is_maximum_contrast() {
        let ratio = contrast_ratio("#FFFFFF", "#000000").unwrap();
        assert!((ratio - 21.0).abs() < 1e-9);
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = contrast_ratio("#3498db", "#1a1a1a").unwrap();
        let b = contrast_ratio("#1a1a1a", "#3498db").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_colors_have_unit_contrast() {
        assert!((contrast_ratio("#808080", "#808080").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn wcag_levels() {
        assert!(meets_wcag("#FFFFFF", "#000000", WcagLevel::Aaa, false).unwrap());
        assert!(!meets_wcag("#777777", "#888888", WcagLevel::Aa, false).unwrap());
        // Large text threshold is looser than normal text.
        assert!(WcagLevel::Aa.required_ratio(true) < WcagLevel::Aa.required_ratio(false));
    }

    #[test]
    fn ensure_contrast_keeps_passing_colors() {
        assert_eq!(
            ensure_contrast("#ffffff", "#000000", 4.5).unwrap(),
            "#ffffff"
        );
    }

    #[test]
    fn ensure_contrast_reaches_target() {
        let adjusted = ensure_contrast("#888888", "#999999", 4.5).unwrap();
        assert!(contrast_ratio(&adjusted, "#999999").unwrap() >= 4.5);
    }

    #[test]
    fn ensure_contrast_lightens_on_dark_backgrounds() {
        let adjusted = ensure_contrast("#222222", "#1a1a1a", 4.5).unwrap();
        let before = Hsv::from_hex("#222222").unwrap().v;
        let after = Hsv::from_hex(&adjusted).unwrap().v;
        assert!(after > before);
    }

    #[test]
    fn simulation_preserves_grayscale_axis() {
        // Every matrix row sums to 1.0, so pure white maps to itself.
        for kind in [
            ColorBlindness::Protanopia,
            ColorBlindness::Deuteranopia,
            ColorBlindness::Tritanopia,
            ColorBlindness::Protanomaly,
            ColorBlindness::Deuteranomaly,
            ColorBlindness::Tritanomaly,
        ] {
            assert_eq!(
                simulate_colorblindness("#ffffff", kind).unwrap(),
                "#ffffff"
            );
            assert_eq!(
                simulate_colorblindness("#808080", kind).unwrap(),
                "#808080"
            );
            assert_eq!(
                simulate_colorblindness("#000000", kind).unwrap(),
                "#000000"
            );
        }
    }

    #[test]
    fn deuteranopia_confuses_red_and_green() {
        let red = simulate_colorblindness("#ff0000", ColorBlindness::Deuteranopia).unwrap();
        assert_ne!(red, "#ff0000");

        let colors = vec!["#ff0000".to_string(), "#b30000".to_string()];
        let problems =
            colorblind_collisions(&colors, ColorBlindness::Deuteranopia, 200.0).unwrap();
        assert!(!problems.is_empty());
    }

    #[test]
    fn distinct_palette_has_no_collisions() {
        let colors = vec![
            "#000000".to_string(),
            "#ffffff".to_string(),
            "#0000ff".to_string(),
        ];
        let problems = colorblind_collisions(
            &colors,
            ColorBlindness::Deuteranopia,
            DEFAULT_MIN_DIFFERENCE,
        )
        .unwrap();
        assert!(problems.is_empty());
    }
}
