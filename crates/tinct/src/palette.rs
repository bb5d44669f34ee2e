//! Color palette generation from color-harmony schemes.
//!
//! Palettes are derived geometrically on the hue wheel: each scheme places
//! colors at fixed hue offsets from a base color, with optional random
//! jitter for more natural-looking results.

use crate::accessibility::ensure_contrast;
use crate::colorspace::Hsv;
use crate::error::Error;
use crate::styler::Styler;
use rand::Rng;
use std::collections::BTreeMap;
use tinct_markup::StyleSpec;

const ANALOGOUS_SPREAD: f64 = 60.0;
const TRIADIC_SPREAD: f64 = 120.0;
const TETRADIC_OFFSETS: [f64; 4] = [0.0, 60.0, 180.0, 240.0];
const SQUARE_OFFSETS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
const SPLIT_COMPLEMENTARY_OFFSETS: [f64; 3] = [0.0, 150.0, 210.0];

/// Color harmony schemes for palette generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteScheme {
    /// One hue, varying saturation and value.
    Monochromatic,
    /// Hues spread across 60 degrees around the base.
    Analogous,
    /// Base hue plus its 180-degree opposite.
    Complementary,
    /// Base hue plus the two hues adjacent to its complement.
    SplitComplementary,
    /// Three hues 120 degrees apart.
    Triadic,
    /// Four hues in two complementary pairs.
    Tetradic,
    /// Four hues 90 degrees apart.
    Square,
    /// Unrelated random hues.
    #[default]
    Random,
}

/// Configuration for [`generate_palette`].
///
/// ```rust
/// use tinct::palette::{PaletteConfig, PaletteScheme};
///
/// let colors = tinct::palette::generate_palette(
///     &PaletteConfig::new()
///         .base_color("#3498db")
///         .scheme(PaletteScheme::Complementary)
///         .count(5)
///         .randomize(false),
/// )?;
/// assert_eq!(colors.len(), 5);
/// # Ok::<(), tinct::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PaletteConfig {
    base_color: Option<String>,
    scheme: PaletteScheme,
    count: usize,
    saturation_range: (f64, f64),
    value_range: (f64, f64),
    randomize: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base_color: None,
            scheme: PaletteScheme::Random,
            count: 5,
            saturation_range: (0.4, 0.9),
            value_range: (0.5, 0.95),
            randomize: true,
        }
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting hex color. Without one, a random base is drawn from the
    /// saturation and value ranges.
    pub fn base_color(mut self, hex: impl Into<String>) -> Self {
        self.base_color = Some(hex.into());
        self
    }

    pub fn scheme(mut self, scheme: PaletteScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn saturation_range(mut self, min: f64, max: f64) -> Self {
        self.saturation_range = (min, max);
        self
    }

    pub fn value_range(mut self, min: f64, max: f64) -> Self {
        self.value_range = (min, max);
        self
    }

    /// Random jitter on hue, saturation, and value. On by default; turn off
    /// for reproducible palettes from a fixed base color.
    pub fn randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }
}

fn jitter(rng: &mut impl Rng, on: bool, spread: f64) -> f64 {
    if on {
        rng.gen_range(-spread..=spread)
    } else {
        0.0
    }
}

/// Generates a list of hex colors according to the config's scheme.
pub fn generate_palette(config: &PaletteConfig) -> Result<Vec<String>, Error> {
    let mut rng = rand::thread_rng();
    let count = config.count;

    let base = match &config.base_color {
        Some(hex) => Hsv::from_hex(hex)?,
        None => Hsv::new(
            rng.gen::<f64>(),
            rng.gen_range(config.saturation_range.0..=config.saturation_range.1),
            rng.gen_range(config.value_range.0..=config.value_range.1),
        ),
    };
    let Hsv { h, s, v } = base;
    let randomize = config.randomize;

    let mut colors = Vec::with_capacity(count);

    match config.scheme {
        PaletteScheme::Monochromatic => {
            colors.push(base.to_hex());
            for i in 1..count {
                let new_s = s * (0.6 + 0.8 * i as f64 / count as f64)
                    + jitter(&mut rng, randomize, 0.1);
                let new_v = v * (0.7 + 0.6 * i as f64 / count as f64)
                    + jitter(&mut rng, randomize, 0.1);
                colors.push(
                    Hsv::new(h, new_s.clamp(0.2, 1.0), new_v.clamp(0.3, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::Analogous => {
            let step = ANALOGOUS_SPREAD / (count.saturating_sub(1).max(1)) as f64;
            for i in 0..count {
                let offset = -30.0 + i as f64 * step + jitter(&mut rng, randomize, 5.0);
                let new_h = (h + offset / 360.0).rem_euclid(1.0);
                let new_s = s + jitter(&mut rng, randomize, 0.1);
                let new_v = v + jitter(&mut rng, randomize, 0.1);
                colors.push(
                    Hsv::new(new_h, new_s.clamp(0.3, 1.0), new_v.clamp(0.4, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::Complementary => {
            colors.push(base.to_hex());
            let complement_h = (h + 0.5).rem_euclid(1.0);
            if count > 1 {
                colors.push(Hsv::new(complement_h, s, v).to_hex());
            }
            for i in 2..count {
                let base_h = if i % 2 == 0 { h } else { complement_h };
                let new_h = (base_h + jitter(&mut rng, randomize, 0.1)).rem_euclid(1.0);
                let new_s = s + jitter(&mut rng, randomize, 0.15);
                let new_v = v + jitter(&mut rng, randomize, 0.15);
                colors.push(
                    Hsv::new(new_h, new_s.clamp(0.3, 1.0), new_v.clamp(0.4, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::SplitComplementary => {
            for i in 0..count {
                let offset = SPLIT_COMPLEMENTARY_OFFSETS[i % 3]
                    + jitter(&mut rng, randomize, 10.0);
                let new_h = (h + offset / 360.0).rem_euclid(1.0);
                let variation = (i / 3) as f64 * 0.1;
                let new_s = s - variation + jitter(&mut rng, randomize, 0.1);
                let new_v = v - variation * 0.5 + jitter(&mut rng, randomize, 0.1);
                colors.push(
                    Hsv::new(new_h, new_s.clamp(0.3, 1.0), new_v.clamp(0.4, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::Triadic => {
            for i in 0..count {
                let offset = (i % 3) as f64 * TRIADIC_SPREAD + jitter(&mut rng, randomize, 10.0);
                let new_h = (h + offset / 360.0).rem_euclid(1.0);
                let variation = (i / 3) as f64 * 0.15;
                let new_s = s - variation + jitter(&mut rng, randomize, 0.1);
                let new_v = v - variation * 0.5 + jitter(&mut rng, randomize, 0.1);
                colors.push(
                    Hsv::new(new_h, new_s.clamp(0.3, 1.0), new_v.clamp(0.4, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::Tetradic | PaletteScheme::Square => {
            let offsets = if config.scheme == PaletteScheme::Tetradic {
                TETRADIC_OFFSETS
            } else {
                SQUARE_OFFSETS
            };
            let spread = if config.scheme == PaletteScheme::Tetradic {
                10.0
            } else {
                8.0
            };
            for i in 0..count {
                let offset = offsets[i % 4] + jitter(&mut rng, randomize, spread);
                let new_h = (h + offset / 360.0).rem_euclid(1.0);
                let variation = (i / 4) as f64 * 0.1;
                let new_s = s - variation + jitter(&mut rng, randomize, 0.08);
                let new_v = v - variation * 0.5 + jitter(&mut rng, randomize, 0.08);
                colors.push(
                    Hsv::new(new_h, new_s.clamp(0.3, 1.0), new_v.clamp(0.4, 1.0)).to_hex(),
                );
            }
        }
        PaletteScheme::Random => {
            for _ in 0..count {
                colors.push(
                    Hsv::new(
                        rng.gen::<f64>(),
                        rng.gen_range(config.saturation_range.0..=config.saturation_range.1),
                        rng.gen_range(config.value_range.0..=config.value_range.1),
                    )
                    .to_hex(),
                );
            }
        }
    }

    colors.truncate(count);
    Ok(colors)
}

/// Configuration for [`generate_theme_palette`].
#[derive(Debug, Clone, Default)]
pub struct ThemePaletteConfig {
    scheme: PaletteScheme,
    base_color: Option<String>,
    include_neutrals: bool,
    force_semantic_colors: bool,
}

impl ThemePaletteConfig {
    pub fn new() -> Self {
        Self {
            include_neutrals: true,
            ..Self::default()
        }
    }

    pub fn scheme(mut self, scheme: PaletteScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn base_color(mut self, hex: impl Into<String>) -> Self {
        self.base_color = Some(hex.into());
        self
    }

    /// Add grayscale background/foreground/muted/border slots.
    pub fn include_neutrals(mut self, include: bool) -> Self {
        self.include_neutrals = include;
        self
    }

    /// Pin success/warning/error to recognizable green/yellow/red instead of
    /// drawing them from the harmony scheme.
    pub fn force_semantic_colors(mut self, force: bool) -> Self {
        self.force_semantic_colors = force;
        self
    }
}

fn semantic_green() -> String {
    Hsv::new(0.33, 0.7, 0.8).to_hex()
}

fn semantic_yellow() -> String {
    Hsv::new(0.15, 0.8, 0.9).to_hex()
}

fn semantic_red() -> String {
    Hsv::new(0.0, 0.8, 0.85).to_hex()
}

/// Generates a complete theme palette with semantic slots
/// (primary/secondary/accent plus success/warning/error/info and optional
/// neutrals), as a name-to-hex mapping.
pub fn generate_theme_palette(config: &ThemePaletteConfig) -> Result<BTreeMap<String, String>, Error> {
    let mut palette_config = PaletteConfig::new().scheme(config.scheme).count(7);
    if let Some(base) = &config.base_color {
        palette_config = palette_config.base_color(base.clone());
    }
    let colors = generate_palette(&palette_config)?;

    let slot = |i: usize| colors.get(i).unwrap_or(&colors[0]).clone();

    let mut theme = BTreeMap::new();
    theme.insert("primary".to_string(), slot(0));
    theme.insert("secondary".to_string(), slot(1));
    theme.insert("accent".to_string(), slot(2));

    if config.force_semantic_colors || colors.len() <= 3 {
        theme.insert("success".to_string(), semantic_green());
        theme.insert("warning".to_string(), semantic_yellow());
        theme.insert("error".to_string(), semantic_red());
        theme.insert("info".to_string(), slot(0));
    } else {
        theme.insert("success".to_string(), slot(3));
        theme.insert(
            "warning".to_string(),
            colors.get(4).cloned().unwrap_or_else(semantic_yellow),
        );
        theme.insert(
            "error".to_string(),
            colors.get(5).cloned().unwrap_or_else(semantic_red),
        );
        theme.insert("info".to_string(), slot(6));
    }

    if config.include_neutrals {
        theme.insert("background".to_string(), "#1a1a1a".to_string());
        theme.insert("foreground".to_string(), "#e0e0e0".to_string());
        theme.insert("muted".to_string(), "#666666".to_string());
        theme.insert("border".to_string(), "#333333".to_string());
    }

    Ok(theme)
}

/// Generates a theme palette whose foreground slots all meet `min_contrast`
/// against `background`. Semantic colors are pinned, then each slot is run
/// through [`ensure_contrast`].
pub fn generate_accessible_theme(
    base_color: &str,
    scheme: PaletteScheme,
    background: &str,
    min_contrast: f64,
) -> Result<BTreeMap<String, String>, Error> {
    let mut theme = generate_theme_palette(
        &ThemePaletteConfig::new()
            .scheme(scheme)
            .base_color(base_color)
            .force_semantic_colors(true),
    )?;

    for key in [
        "primary",
        "secondary",
        "accent",
        "error",
        "warning",
        "success",
        "info",
    ] {
        if let Some(original) = theme.get(key).cloned() {
            theme.insert(
                key.to_string(),
                ensure_contrast(&original, background, min_contrast)?,
            );
        }
    }

    theme.insert("background".to_string(), background.to_string());
    theme.insert(
        "foreground".to_string(),
        ensure_contrast("#e0e0e0", background, min_contrast)?,
    );

    Ok(theme)
}

/// Renders a text preview of a palette: one numbered swatch line per color,
/// optionally annotated with HSV components.
pub fn preview_palette(
    styler: &Styler,
    colors: &[String],
    width: usize,
    show_info: bool,
) -> Result<String, Error> {
    let mut lines = Vec::with_capacity(colors.len());
    for (i, color) in colors.iter().enumerate() {
        let block = "█".repeat(width);
        let swatch = styler.style(&block, &StyleSpec::new().fg(color.as_str()))?;
        let mut line = format!("{}. {:8} {}", i + 1, color, swatch);

        if show_info {
            let hsv = Hsv::from_hex(color)?;
            line.push_str(&format!(
                "  H:{:3.0}° S:{:3.0}% V:{:3.0}%",
                hsv.h * 360.0,
                hsv.s * 100.0,
                hsv.v * 100.0
            ));
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "#3498db";

    fn fixed(scheme: PaletteScheme, count: usize) -> PaletteConfig {
        PaletteConfig::new()
            .base_color(BASE)
            .scheme(scheme)
            .count(count)
            .randomize(false)
    }

    #[test]
    fn all_schemes_honor_count() {
        for scheme in [
            PaletteScheme::Monochromatic,
            PaletteScheme::Analogous,
            PaletteScheme::Complementary,
            PaletteScheme::SplitComplementary,
            PaletteScheme::Triadic,
            PaletteScheme::Tetradic,
            PaletteScheme::Square,
            PaletteScheme::Random,
        ] {
            for count in [1, 3, 5, 8] {
                let colors = generate_palette(&fixed(scheme, count)).unwrap();
                assert_eq!(colors.len(), count, "{:?} x{}", scheme, count);
                for c in &colors {
                    assert!(Hsv::from_hex(c).is_ok());
                }
            }
        }
    }

    #[test]
    fn base_color_leads_the_palette() {
        for scheme in [PaletteScheme::Monochromatic, PaletteScheme::Complementary] {
            let colors = generate_palette(&fixed(scheme, 4)).unwrap();
            assert_eq!(colors[0], BASE);
        }
    }

    #[test]
    fn complementary_second_color_is_opposite() {
        let colors = generate_palette(&fixed(PaletteScheme::Complementary, 2)).unwrap();
        let base_h = Hsv::from_hex(&colors[0]).unwrap().h;
        let comp_h = Hsv::from_hex(&colors[1]).unwrap().h;
        let diff = (comp_h - base_h).rem_euclid(1.0);
        assert!((diff - 0.5).abs() < 0.02);
    }

    #[test]
    fn triadic_hues_are_evenly_spaced() {
        let colors = generate_palette(&fixed(PaletteScheme::Triadic, 3)).unwrap();
        let hues: Vec<f64> = colors
            .iter()
            .map(|c| Hsv::from_hex(c).unwrap().h)
            .collect();
        let d1 = (hues[1] - hues[0]).rem_euclid(1.0);
        let d2 = (hues[2] - hues[1]).rem_euclid(1.0);
        assert!((d1 - 1.0 / 3.0).abs() < 0.02);
        assert!((d2 - 1.0 / 3.0).abs() < 0.02);
    }

    #[test]
    fn random_palette_without_base_still_validates() {
        let colors = generate_palette(
            &PaletteConfig::new().scheme(PaletteScheme::Random).count(6),
        )
        .unwrap();
        assert_eq!(colors.len(), 6);
        // 8-bit quantization perturbs the drawn ranges slightly.
        for c in &colors {
            let hsv = Hsv::from_hex(c).unwrap();
            assert!(hsv.s <= 0.95);
        }
    }

    #[test]
    fn theme_palette_has_all_slots() {
        let theme = generate_theme_palette(
            &ThemePaletteConfig::new()
                .base_color(BASE)
                .scheme(PaletteScheme::Complementary),
        )
        .unwrap();
        for slot in [
            "primary",
            "secondary",
            "accent",
            "success",
            "warning",
            "error",
            "info",
            "background",
            "foreground",
            "muted",
            "border",
        ] {
            assert!(theme.contains_key(slot), "missing {}", slot);
        }
    }

    #[test]
    fn forced_semantics_are_recognizable() {
        let theme = generate_theme_palette(
            &ThemePaletteConfig::new()
                .base_color(BASE)
                .force_semantic_colors(true),
        )
        .unwrap();
        // Error slot pins to the fixed red regardless of scheme.
        assert_eq!(theme["error"], semantic_red());
        assert_eq!(theme["success"], semantic_green());
    }

    #[test]
    fn accessible_theme_meets_contrast() {
        use crate::accessibility::contrast_ratio;

        let theme = generate_accessible_theme(
            BASE,
            PaletteScheme::Complementary,
            "#1a1a1a",
            4.5,
        )
        .unwrap();
        for key in ["primary", "error", "foreground"] {
            let ratio = contrast_ratio(&theme[key], "#1a1a1a").unwrap();
            assert!(ratio >= 4.5, "{} ratio {}", key, ratio);
        }
    }

    #[test]
    fn preview_contains_every_color() {
        let styler = Styler::new();
        let colors = vec!["#ff0000".to_string(), "#00ff00".to_string()];
        let preview = preview_palette(&styler, &colors, 10, true).unwrap();
        assert!(preview.contains("#ff0000"));
        assert!(preview.contains("#00ff00"));
        assert!(preview.contains("H:"));
        assert_eq!(preview.lines().count(), 2);
    }

    #[test]
    fn bad_base_color_errors() {
        let result = generate_palette(
            &PaletteConfig::new().base_color("not-a-color").count(3),
        );
        assert!(result.is_err());
    }
}
