//! Error types for styling operations.
//!
//! This module provides [`Error`], the primary error type for registry,
//! color-theory, table, and persistence operations. Markup rendering itself
//! never fails; only explicit operations (creating styles, parsing colors,
//! file I/O) surface errors.

use std::fmt;
use tinct_markup::ColorFormatError;

/// Error type for styling operations.
#[derive(Debug)]
pub enum Error {
    /// A hex color string was malformed.
    InvalidColorFormat(String),

    /// A style was registered under an empty name.
    EmptyName,

    /// A style was registered with no color, background, or looks.
    EmptySpec(String),

    /// A named theme was requested that does not exist.
    UnknownTheme(String),

    /// A table row carried more cells than there are columns.
    TooManyCells { expected: usize, got: usize },

    /// A cell update addressed a position outside the table.
    CellOutOfBounds { row: usize, col: usize },

    /// I/O error (e.g., reading a palette file).
    Io(std::io::Error),

    /// Palette/theme (de)serialization error.
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidColorFormat(value) => {
                write!(f, "invalid color format '{}' (expected #rgb or #rrggbb)", value)
            }
            Error::EmptyName => write!(f, "style name cannot be empty"),
            Error::EmptySpec(name) => {
                write!(f, "style '{}' must define a color, background, or look", name)
            }
            Error::UnknownTheme(name) => write!(f, "unknown theme: {}", name),
            Error::TooManyCells { expected, got } => {
                write!(f, "too many cells: expected {}, got {}", expected, got)
            }
            Error::CellOutOfBounds { row, col } => {
                write!(f, "cell position ({}, {}) out of bounds", row, col)
            }
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<ColorFormatError> for Error {
    fn from(err: ColorFormatError) -> Self {
        Error::InvalidColorFormat(err.value)
    }
}
