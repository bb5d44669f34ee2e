//! The styling context: registry, enable state, and formatting entry points.

use crate::error::Error;
use crate::theme::Theme;
use std::collections::{BTreeMap, HashMap};
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use tinct_markup::{strip, MarkupRenderer, StyleSpec, BG_COLORS, FG_COLORS, LOOKS};

/// Styling context: style registry plus the global enable switch.
///
/// Styles live in three namespaces. Lookup order is custom, then the active
/// theme, then the predefined color/look names, so user styles shadow theme
/// entries and both shadow the builtins.
///
/// A `Styler` has no interior synchronization. It is `Send`, so it can be
/// moved between threads or shared behind a `Mutex`, but concurrent use
/// requires the caller to provide the locking.
///
/// # Example
///
/// ```rust
/// use tinct::{Styler, StyleSpec};
///
/// let mut styler = Styler::new();
/// styler.create("warn", StyleSpec::new().fg("yellow").look("bold"))?;
/// assert_eq!(
///     styler.format("<warn>careful</warn>"),
///     "\x1b[33;1mcareful\x1b[0m"
/// );
/// # Ok::<(), tinct::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Styler {
    enabled: bool,
    predefined: BTreeMap<String, StyleSpec>,
    theme: BTreeMap<String, StyleSpec>,
    custom: BTreeMap<String, StyleSpec>,
}

impl Default for Styler {
    fn default() -> Self {
        Self::new()
    }
}

impl Styler {
    /// Creates an enabled styler with the predefined namespace populated:
    /// one tag per foreground color, background color, and look name.
    pub fn new() -> Self {
        let mut predefined = BTreeMap::new();
        for (name, _) in FG_COLORS {
            predefined.insert(name.to_string(), StyleSpec::new().fg(*name));
        }
        for (name, _) in BG_COLORS {
            predefined.insert(name.to_string(), StyleSpec::new().bg(*name));
        }
        for (name, _) in LOOKS {
            predefined.insert(name.to_string(), StyleSpec::new().look(*name));
        }

        Self {
            enabled: true,
            predefined,
            theme: BTreeMap::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Creates a styler whose enable state follows the environment.
    ///
    /// `NO_COLOR` (any value) disables styling; otherwise `FORCE_COLOR`
    /// enables it unconditionally; otherwise styling is enabled only when
    /// stdout is attached to a terminal. Terminal detection goes through
    /// `console`, which also turns on VT processing on Windows.
    pub fn from_env() -> Self {
        let mut styler = Self::new();
        styler.enabled = if std::env::var_os("NO_COLOR").is_some() {
            false
        } else if std::env::var_os("FORCE_COLOR").is_some() {
            true
        } else {
            console::user_attended()
        };
        styler
    }

    /// Whether styling is currently applied.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns styling on, overriding any environment-derived state.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turns styling off. `format` strips tags, `style` passes text through.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    // ==================== Registry ====================

    /// Registers a custom style, overwriting any existing one of that name.
    ///
    /// The name must be non-empty and the spec must define at least one of
    /// color, background, or looks.
    pub fn create(&mut self, name: &str, spec: StyleSpec) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if spec.is_empty() {
            return Err(Error::EmptySpec(name.to_string()));
        }
        self.custom.insert(name.to_string(), spec);
        Ok(())
    }

    /// Removes a custom style. Returns whether a style was removed; theme and
    /// predefined entries are never touched, so deleting a shadowing custom
    /// style re-exposes them.
    pub fn delete(&mut self, name: &str) -> bool {
        self.custom.remove(name).is_some()
    }

    /// Looks up a style through the namespace chain.
    pub fn resolve(&self, name: &str) -> Option<&StyleSpec> {
        self.custom
            .get(name)
            .or_else(|| self.theme.get(name))
            .or_else(|| self.predefined.get(name))
    }

    /// Installs a theme: the theme namespace is replaced wholesale, and every
    /// entry is also registered as a custom style so later themes do not
    /// silently unregister names users already rely on.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), Error> {
        let styles = theme.into_styles();
        for (name, spec) in &styles {
            self.create(name, spec.clone())?;
        }
        self.theme = styles;
        Ok(())
    }

    /// Installs a generated palette (name to hex color mapping) as the active
    /// theme, with the same dual registration as [`set_theme`](Self::set_theme).
    pub fn apply_palette_theme(&mut self, palette: &BTreeMap<String, String>) -> Result<(), Error> {
        let styles: BTreeMap<String, StyleSpec> = palette
            .iter()
            .map(|(name, color)| (name.clone(), StyleSpec::new().fg(color.as_str())))
            .collect();
        self.set_theme(Theme::from_styles(styles))
    }

    /// Runs `f` with a custom style registered under `name`, removing it
    /// afterwards. Removal happens on normal return and on panic.
    ///
    /// Scopes reusing one name must unwind in LIFO order; an inner scope's
    /// cleanup removes whatever is registered under the name at that point.
    pub fn with_temporary<R>(
        &mut self,
        name: &str,
        spec: StyleSpec,
        f: impl FnOnce(&mut Styler) -> R,
    ) -> Result<R, Error> {
        self.create(name, spec)?;
        let result = catch_unwind(AssertUnwindSafe(|| f(self)));
        self.delete(name);
        match result {
            Ok(value) => Ok(value),
            Err(payload) => resume_unwind(payload),
        }
    }

    // ==================== Formatting ====================

    /// Applies a style spec directly to text, without markup.
    ///
    /// When disabled, returns the text verbatim. Malformed hex colors in the
    /// spec surface as errors here (unlike the tag path, which drops them).
    pub fn style(&self, text: &str, spec: &StyleSpec) -> Result<String, Error> {
        if !self.enabled {
            return Ok(text.to_string());
        }
        Ok(spec.paint(text)?)
    }

    /// Renders markup tags in `text`.
    ///
    /// When disabled, all tag-shaped substrings are stripped instead, so both
    /// paths yield the same visible characters. Never fails: unknown tags and
    /// malformed markup pass through as literal text.
    pub fn format(&self, text: &str) -> String {
        if !self.enabled {
            return strip(text);
        }

        let merged = self.merged_styles();
        MarkupRenderer::new(&merged).render(text)
    }

    /// Formats markup and writes it to stdout without a trailing newline.
    pub fn print(&self, text: &str) {
        print!("{}", self.format(text));
    }

    /// Formats markup and writes it to stdout with a trailing newline.
    pub fn println(&self, text: &str) {
        println!("{}", self.format(text));
    }

    /// Flattens the namespaces for the renderer, custom winning over theme
    /// winning over predefined.
    fn merged_styles(&self) -> HashMap<String, StyleSpec> {
        let mut merged: HashMap<String, StyleSpec> = HashMap::new();
        for source in [&self.predefined, &self.theme, &self.custom] {
            for (name, spec) in source {
                merged.insert(name.clone(), spec.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod registry {
        use super::*;

        #[test]
        fn create_and_format() {
            let mut styler = Styler::new();
            styler
                .create("warn", StyleSpec::new().fg("yellow").look("bold"))
                .unwrap();
            assert_eq!(
                styler.format("<warn>careful</warn>"),
                "\x1b[33;1mcareful\x1b[0m"
            );
        }

        #[test]
        fn create_rejects_empty_name() {
            let mut styler = Styler::new();
            assert!(matches!(
                styler.create("", StyleSpec::new().fg("red")),
                Err(Error::EmptyName)
            ));
        }

        #[test]
        fn create_rejects_empty_spec() {
            let mut styler = Styler::new();
            assert!(matches!(
                styler.create("void", StyleSpec::new()),
                Err(Error::EmptySpec(_))
            ));
        }

        #[test]
        fn create_overwrites() {
            let mut styler = Styler::new();
            styler.create("x", StyleSpec::new().fg("red")).unwrap();
            styler.create("x", StyleSpec::new().fg("blue")).unwrap();
            assert_eq!(
                styler.resolve("x").unwrap().sgr_codes().unwrap(),
                vec!["34"]
            );
        }

        #[test]
        fn delete_only_touches_custom() {
            let mut styler = Styler::new();
            styler.set_theme(Theme::dark()).unwrap();

            assert!(!styler.delete("red")); // predefined
            assert!(styler.resolve("red").is_some());

            // "error" was dual-registered into custom; deleting it re-exposes
            // the theme entry.
            assert!(styler.delete("error"));
            assert!(styler.resolve("error").is_some());
            assert!(!styler.delete("error"));
        }

        #[test]
        fn custom_shadows_theme_shadows_predefined() {
            let mut styler = Styler::new();
            styler.set_theme(Theme::dark()).unwrap();
            styler.create("error", StyleSpec::new().fg("magenta")).unwrap();

            assert_eq!(
                styler.resolve("error").unwrap().sgr_codes().unwrap(),
                vec!["35"]
            );
            styler.delete("error");
            // Theme's bright_red bold shows through again.
            assert_eq!(
                styler.resolve("error").unwrap().sgr_codes().unwrap(),
                vec!["91", "1"]
            );
        }

        #[test]
        fn predefined_names_work_as_tags() {
            let styler = Styler::new();
            assert_eq!(styler.format("<red>x</red>"), "\x1b[31mx\x1b[0m");
            assert_eq!(styler.format("<bold>x</bold>"), "\x1b[1mx\x1b[0m");
            assert_eq!(styler.format("<bg_blue>x</bg_blue>"), "\x1b[44mx\x1b[0m");
        }
    }

    mod themes {
        use super::*;

        #[test]
        fn set_theme_replaces_namespace() {
            let mut styler = Styler::new();
            styler.set_theme(Theme::dark()).unwrap();
            styler.set_theme(Theme::light()).unwrap();
            // Theme namespace now carries light's standard red...
            assert!(styler.delete("error")); // drops the dual-written custom
            assert_eq!(
                styler.resolve("error").unwrap().sgr_codes().unwrap(),
                vec!["31", "1"]
            );
        }

        #[test]
        fn palette_theme_registers_fg_styles() {
            let mut styler = Styler::new();
            let mut palette = BTreeMap::new();
            palette.insert("primary".to_string(), "#3498db".to_string());
            styler.apply_palette_theme(&palette).unwrap();

            let out = styler.format("<primary>x</primary>");
            assert_eq!(out, "\x1b[38;2;52;152;219mx\x1b[0m");
        }
    }

    mod temporary {
        use super::*;

        #[test]
        fn removed_after_scope() {
            let mut styler = Styler::new();
            let out = styler
                .with_temporary("flash", StyleSpec::new().fg("cyan"), |s| {
                    s.format("<flash>now</flash>")
                })
                .unwrap();
            assert_eq!(out, "\x1b[36mnow\x1b[0m");
            assert!(styler.resolve("flash").is_none());
        }

        #[test]
        fn removed_after_panic() {
            let mut styler = Styler::new();
            let result = catch_unwind(AssertUnwindSafe(|| {
                let _ = styler.with_temporary("flash", StyleSpec::new().fg("cyan"), |_| {
                    panic!("boom")
                });
            }));
            assert!(result.is_err());
            assert!(styler.resolve("flash").is_none());
        }
    }

    mod enable_disable {
        use super::*;

        #[test]
        fn disabled_format_strips() {
            let mut styler = Styler::new();
            styler.disable();
            assert_eq!(styler.format("<red>x</red>"), "x");
            assert_eq!(styler.format("<nope>y</nope>"), "y");
        }

        #[test]
        fn disabled_style_is_identity() {
            let mut styler = Styler::new();
            styler.disable();
            let spec = StyleSpec::new().fg("red");
            assert_eq!(styler.style("x", &spec).unwrap(), "x");
        }

        #[test]
        fn reenable_restores_styling() {
            let mut styler = Styler::new();
            styler.disable();
            styler.enable();
            assert_eq!(styler.format("<red>x</red>"), "\x1b[31mx\x1b[0m");
        }

        #[test]
        fn style_surfaces_bad_hex() {
            let styler = Styler::new();
            let spec = StyleSpec::new().fg("#nope12");
            assert!(matches!(
                styler.style("x", &spec),
                Err(Error::InvalidColorFormat(_))
            ));
        }
    }

    #[test]
    fn styler_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Styler>();
    }
}
