//! # Tinct - Terminal Text Styling Toolkit
//!
//! `tinct` styles terminal output through inline markup tags, named styles,
//! and themes, with color-theory helpers for building palettes that actually
//! work on screen.
//!
//! ## Core Concepts
//!
//! - [`Styler`]: the styling context holding the registry and enable switch
//! - [`StyleSpec`]: a color/background/looks bundle, built fluently
//! - [`Theme`]: named style collections (builtin `dark` and `light`)
//! - Markup syntax: `<name>content</name>`, plus `<#hex>`, `<@#hex>`, and
//!   `<@name>` for ad hoc colors
//! - [`palette`]: harmony-based palette generation with WCAG validation
//! - [`tabular`] / [`progress`]: styled tables and progress bars
//!
//! ## Quick Start
//!
//! ```rust
//! use tinct::{Styler, StyleSpec};
//!
//! let mut styler = Styler::new();
//! styler.create("alert", StyleSpec::new().fg("red").look("bold"))?;
//!
//! let line = styler.format("<alert>disk full</alert> on <cyan>/dev/sda1</cyan>");
//! assert_eq!(
//!     line,
//!     "\x1b[31;1mdisk full\x1b[0m on \x1b[36m/dev/sda1\x1b[0m"
//! );
//! # Ok::<(), tinct::Error>(())
//! ```
//!
//! ## Tag-Based Styling
//!
//! All 16 ANSI colors, their `bg_` variants, and the text looks (`bold`,
//! `dim`, `italic`, ...) are predefined tags. Tags nest, and the outer style
//! is reapplied when an inner tag closes:
//!
//! ```rust
//! use tinct::Styler;
//!
//! let styler = Styler::new();
//! let out = styler.format("<red>error: <bold>code 7</bold> aborting</red>");
//! assert!(out.contains("\x1b[31;1mcode 7\x1b[0m\x1b[31m aborting"));
//! ```
//!
//! Malformed markup never fails; unknown or unterminated tags render as
//! literal text, and `\<` / `\>` escape the delimiters.
//!
//! ## Enable/Disable
//!
//! [`Styler::from_env`] honors `NO_COLOR`, `FORCE_COLOR`, and whether stdout
//! is a terminal. A disabled styler strips tags instead of rendering them,
//! so the visible text is identical either way.

// Internal modules
pub mod accessibility;
pub mod colorspace;
mod error;
pub mod palette;
pub mod persist;
pub mod prelude;
pub mod progress;
mod styler;
pub mod tabular;
mod theme;

// Error type
pub use error::Error;

// Context and registry
pub use styler::Styler;
pub use theme::Theme;

// Markup building blocks, re-exported from the parser crate
pub use tinct_markup::{
    clean, fg_code, bg_code, hex_to_rgb, look_code, rgb_to_hex, strip, visible_len,
    ColorFormatError, ColorSpec, MarkupRenderer, StyleSpec,
};

// Color theory
pub use accessibility::{
    colorblind_collisions, contrast_ratio, ensure_contrast, meets_wcag,
    simulate_colorblindness, ColorBlindness, WcagLevel,
};
pub use colorspace::{
    darken, desaturate, invert, lighten, mix, saturate, shift_hue, Hsv,
};
pub use palette::{
    generate_accessible_theme, generate_palette, generate_theme_palette, preview_palette,
    PaletteConfig, PaletteScheme, ThemePaletteConfig,
};

// Persistence
pub use persist::{load_palette, load_theme, save_palette, save_theme};
