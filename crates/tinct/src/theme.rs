//! Named style collections.
//!
//! A [`Theme`] is a mapping from semantic names (`error`, `success`, ...) to
//! style specs. Two builtin themes ship with the crate, tuned for dark and
//! light terminal backgrounds; arbitrary themes come from
//! [`Theme::from_styles`] or from generated palettes.

use crate::error::Error;
use std::collections::BTreeMap;
use tinct_markup::StyleSpec;

/// A named collection of styles applied as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    styles: BTreeMap<String, StyleSpec>,
}

impl Theme {
    /// Builtin theme for dark terminal backgrounds: bright semantic colors.
    pub fn dark() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(
            "error".to_string(),
            StyleSpec::new().fg("bright_red").look("bold"),
        );
        styles.insert(
            "success".to_string(),
            StyleSpec::new().fg("bright_green").look("bold"),
        );
        styles.insert(
            "warning".to_string(),
            StyleSpec::new().fg("bright_yellow").look("bold"),
        );
        styles.insert("info".to_string(), StyleSpec::new().fg("bright_cyan"));
        styles.insert("debug".to_string(), StyleSpec::new().fg("bright_black"));
        styles.insert(
            "critical".to_string(),
            StyleSpec::new().fg("white").bg("red").look("bold"),
        );
        Self { styles }
    }

    /// Builtin theme for light terminal backgrounds: standard-intensity colors.
    pub fn light() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(
            "error".to_string(),
            StyleSpec::new().fg("red").look("bold"),
        );
        styles.insert(
            "success".to_string(),
            StyleSpec::new().fg("green").look("bold"),
        );
        styles.insert(
            "warning".to_string(),
            StyleSpec::new().fg("yellow").look("bold"),
        );
        styles.insert("info".to_string(), StyleSpec::new().fg("blue"));
        styles.insert("debug".to_string(), StyleSpec::new().fg("magenta"));
        styles.insert(
            "critical".to_string(),
            StyleSpec::new().fg("white").bg("red").look("bold"),
        );
        Self { styles }
    }

    /// Resolves a builtin theme by name (`"dark"` or `"light"`).
    pub fn named(name: &str) -> Result<Self, Error> {
        match name {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }

    /// Builds a theme from an explicit name-to-spec mapping.
    pub fn from_styles(styles: BTreeMap<String, StyleSpec>) -> Self {
        Self { styles }
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&StyleSpec> {
        self.styles.get(name)
    }

    /// Iterates over all (name, spec) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleSpec)> {
        self.styles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub(crate) fn into_styles(self) -> BTreeMap<String, StyleSpec> {
        self.styles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_cover_same_names() {
        let dark = Theme::dark();
        let light = Theme::light();
        let dark_names: Vec<_> = dark.iter().map(|(n, _)| n.clone()).collect();
        let light_names: Vec<_> = light.iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(dark_names, light_names);
        assert!(dark.get("error").is_some());
        assert!(dark.get("critical").is_some());
    }

    #[test]
    fn named_rejects_unknown() {
        assert!(Theme::named("dark").is_ok());
        assert!(Theme::named("light").is_ok());
        assert!(matches!(
            Theme::named("solarized"),
            Err(Error::UnknownTheme(name)) if name == "solarized"
        ));
    }

    #[test]
    fn dark_uses_bright_variants() {
        let spec = Theme::dark().get("error").cloned().unwrap();
        assert_eq!(spec.sgr_codes().unwrap(), vec!["91", "1"]);
        let spec = Theme::light().get("error").cloned().unwrap();
        assert_eq!(spec.sgr_codes().unwrap(), vec!["31", "1"]);
    }
}
