//! Convenient one-line imports for common usage.
//!
//! ```rust
//! use tinct::prelude::*;
//!
//! let mut styler = Styler::new();
//! styler.create("ok", StyleSpec::new().fg("green"))?;
//! styler.set_theme(Theme::dark())?;
//! # Ok::<(), Error>(())
//! ```

// Context, registry, and specs
pub use crate::{Error, StyleSpec, Styler, Theme};

// Palette generation
pub use crate::palette::{PaletteConfig, PaletteScheme, ThemePaletteConfig};

// Consumers
pub use crate::progress::ProgressBar;
pub use crate::tabular::{BoxStyle, Column, Justify, Table};
