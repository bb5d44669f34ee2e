//! JSON persistence for palettes and theme mappings.
//!
//! Palette files carry a `colors` array, theme files a `theme` mapping; both
//! carry a free-form `metadata` object for names, descriptions, or scheme
//! provenance.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct PaletteFile {
    colors: Vec<String>,
    #[serde(default)]
    metadata: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: BTreeMap<String, String>,
    #[serde(default)]
    metadata: Value,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Saves a color list to a JSON palette file, creating parent directories.
pub fn save_palette(
    path: impl AsRef<Path>,
    colors: &[String],
    metadata: Option<Value>,
) -> Result<(), Error> {
    let file = PaletteFile {
        colors: colors.to_vec(),
        metadata: metadata.unwrap_or_else(|| Value::Object(Default::default())),
    };
    write_json(path.as_ref(), &file)
}

/// Loads a palette file, returning the colors and their metadata.
pub fn load_palette(path: impl AsRef<Path>) -> Result<(Vec<String>, Value), Error> {
    let json = fs::read_to_string(path)?;
    let file: PaletteFile = serde_json::from_str(&json)?;
    Ok((file.colors, file.metadata))
}

/// Saves a name-to-hex theme mapping to a JSON theme file.
pub fn save_theme(
    path: impl AsRef<Path>,
    theme: &BTreeMap<String, String>,
    metadata: Option<Value>,
) -> Result<(), Error> {
    let file = ThemeFile {
        theme: theme.clone(),
        metadata: metadata.unwrap_or_else(|| Value::Object(Default::default())),
    };
    write_json(path.as_ref(), &file)
}

/// Loads a theme file, returning the mapping and its metadata.
pub fn load_theme(path: impl AsRef<Path>) -> Result<(BTreeMap<String, String>, Value), Error> {
    let json = fs::read_to_string(path)?;
    let file: ThemeFile = serde_json::from_str(&json)?;
    Ok((file.theme, file.metadata))
}
