//! Markup-tag parser and ANSI SGR code generation for terminal styling.
//!
//! This crate turns inline markup like `<red>error</red>` into ANSI escape
//! sequences. It handles nested tags with style inheritance, hex colors, and
//! background variants, and it degrades to literal text on any malformed
//! input rather than failing.
//!
//! # Example
//!
//! ```rust
//! use tinct_markup::{MarkupRenderer, StyleSpec};
//! use std::collections::HashMap;
//!
//! let mut styles = HashMap::new();
//! styles.insert("alert".to_string(), StyleSpec::new().fg("red").look("bold"));
//!
//! let renderer = MarkupRenderer::new(&styles);
//! let output = renderer.render("<alert>disk full</alert>");
//! assert_eq!(output, "\x1b[31;1mdisk full\x1b[0m");
//!
//! // Hex foreground, hex background, and named background tags need no
//! // registered style:
//! let output = renderer.render("<#FF5733><@black>hot</@black></#FF5733>");
//! assert!(output.contains("38;2;255;87;51"));
//! ```
//!
//! # Tag Syntax
//!
//! - Named style: `<name>text</name>` (looked up in the style map)
//! - Hex foreground: `<#FF5733>text</#FF5733>` (3- or 6-digit)
//! - Hex background: `<@#FF5733>text</@#FF5733>`
//! - Named background: `<@red>text</@red>`
//!
//! A close tag must repeat the open tag's name exactly, sigils included.
//! `\<` and `\>` escape literal angle brackets anywhere in the input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

// ==================== SGR code tables ====================

/// ANSI foreground color codes, in table order.
pub const FG_COLORS: &[(&str, u8)] = &[
    ("black", 30),
    ("red", 31),
    ("green", 32),
    ("yellow", 33),
    ("blue", 34),
    ("magenta", 35),
    ("cyan", 36),
    ("white", 37),
    ("bright_black", 90),
    ("bright_red", 91),
    ("bright_green", 92),
    ("bright_yellow", 93),
    ("bright_blue", 94),
    ("bright_magenta", 95),
    ("bright_cyan", 96),
    ("bright_white", 97),
];

/// ANSI background color codes, in table order.
pub const BG_COLORS: &[(&str, u8)] = &[
    ("bg_black", 40),
    ("bg_red", 41),
    ("bg_green", 42),
    ("bg_yellow", 43),
    ("bg_blue", 44),
    ("bg_magenta", 45),
    ("bg_cyan", 46),
    ("bg_white", 47),
    ("bg_bright_black", 100),
    ("bg_bright_red", 101),
    ("bg_bright_green", 102),
    ("bg_bright_yellow", 103),
    ("bg_bright_blue", 104),
    ("bg_bright_magenta", 105),
    ("bg_bright_cyan", 106),
    ("bg_bright_white", 107),
];

/// ANSI text attribute ("look") codes, in table order.
pub const LOOKS: &[(&str, u8)] = &[
    ("bold", 1),
    ("dim", 2),
    ("italic", 3),
    ("underline", 4),
    ("blink", 5),
    ("reverse", 7),
    ("hidden", 8),
    ("strikethrough", 9),
];

fn table_lookup(table: &[(&str, u8)], name: &str) -> Option<u8> {
    table.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

/// Looks up a foreground color name in the fixed table.
pub fn fg_code(name: &str) -> Option<u8> {
    table_lookup(FG_COLORS, name)
}

/// Looks up a background color name.
///
/// Bare names are tried with the `bg_` prefix first, then verbatim, so both
/// `red` and `bg_red` resolve to 41. The foreground table is never consulted.
pub fn bg_code(name: &str) -> Option<u8> {
    if name.starts_with("bg_") {
        table_lookup(BG_COLORS, name)
    } else {
        table_lookup(BG_COLORS, &format!("bg_{}", name)).or_else(|| table_lookup(BG_COLORS, name))
    }
}

/// Looks up a text attribute name.
pub fn look_code(name: &str) -> Option<u8> {
    table_lookup(LOOKS, name)
}

// ==================== Hex color codec ====================

/// Error returned when a hex color string is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFormatError {
    /// The offending input.
    pub value: String,
}

impl fmt::Display for ColorFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color format '{}' (expected #rgb or #rrggbb)",
            self.value
        )
    }
}

impl std::error::Error for ColorFormatError {}

/// Parses `#RGB` or `#RRGGBB` (leading `#` optional) into an RGB triple.
///
/// Three-digit shorthand expands by duplicating each nibble: `#abc` becomes
/// `(0xaa, 0xbb, 0xcc)`.
pub fn hex_to_rgb(text: &str) -> Result<(u8, u8, u8), ColorFormatError> {
    let err = || ColorFormatError {
        value: text.to_string(),
    };
    let hex = text.strip_prefix('#').unwrap_or(text);
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let nibble = c.to_digit(16).ok_or_else(err)? as u8;
                channels[i] = nibble * 17;
            }
            Ok((channels[0], channels[1], channels[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err())?;
            let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err())?;
            let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err())?;
            Ok((r, g, b))
        }
        _ => Err(err()),
    }
}

/// Formats an RGB triple as a lowercase 6-digit hex string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Emits the 24-bit true color SGR parameter fragment for an RGB triple.
///
/// `38;2;r;g;b` for foreground, `48;2;r;g;b` for background.
pub fn rgb_sgr_fragment(r: u8, g: u8, b: u8, background: bool) -> String {
    let prefix = if background { 48 } else { 38 };
    format!("{};2;{};{};{}", prefix, r, g, b)
}

// ==================== Color and style specs ====================

/// A color request: a name (which may itself be a hex string) or an
/// explicit RGB triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// Named color (`"red"`, `"bright_cyan"`) or hex literal (`"#ff6b35"`).
    Name(String),
    /// Explicit 24-bit color.
    Rgb(u8, u8, u8),
}

impl ColorSpec {
    /// Resolves this color to an SGR parameter fragment.
    ///
    /// Unknown names resolve to `None` (absence of color is a valid, silent
    /// no-op); only a malformed hex literal is an error.
    pub fn resolve(&self, background: bool) -> Result<Option<String>, ColorFormatError> {
        match self {
            ColorSpec::Rgb(r, g, b) => Ok(Some(rgb_sgr_fragment(*r, *g, *b, background))),
            ColorSpec::Name(name) => {
                let table_hit = if background {
                    bg_code(name)
                } else {
                    fg_code(name)
                };
                if let Some(code) = table_hit {
                    return Ok(Some(code.to_string()));
                }
                if name.starts_with('#') {
                    let (r, g, b) = hex_to_rgb(name)?;
                    return Ok(Some(rgb_sgr_fragment(r, g, b, background)));
                }
                Ok(None)
            }
        }
    }

    /// Tag-path resolution: malformed hex yields no code instead of an error,
    /// preserving the renderer's no-fail contract.
    fn resolve_lenient(&self, background: bool) -> Option<String> {
        self.resolve(background).ok().flatten()
    }
}

impl From<&str> for ColorSpec {
    fn from(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> Self {
        ColorSpec::Name(name)
    }
}

impl From<(u8, u8, u8)> for ColorSpec {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorSpec::Rgb(r, g, b)
    }
}

/// A resolved style request: optional foreground, optional background, and
/// an ordered list of text attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSpec {
    color: Option<ColorSpec>,
    bg: Option<ColorSpec>,
    looks: Vec<String>,
}

impl StyleSpec {
    /// Creates an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the foreground color.
    pub fn fg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the background color.
    pub fn bg(mut self, color: impl Into<ColorSpec>) -> Self {
        self.bg = Some(color.into());
        self
    }

    /// Appends a text attribute. Unrecognized names are kept here and
    /// silently dropped at code-collection time.
    pub fn look(mut self, name: impl Into<String>) -> Self {
        self.looks.push(name.into());
        self
    }

    /// Whether the spec requests nothing at all.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.bg.is_none() && self.looks.is_empty()
    }

    /// The foreground color, if set.
    pub fn color(&self) -> Option<&ColorSpec> {
        self.color.as_ref()
    }

    /// The background color, if set.
    pub fn background(&self) -> Option<&ColorSpec> {
        self.bg.as_ref()
    }

    /// The attribute names, in the order supplied.
    pub fn looks(&self) -> &[String] {
        &self.looks
    }

    /// Collects SGR parameters: foreground first, background second, then
    /// one code per recognized attribute in supplied order.
    ///
    /// An empty result means "no styling"; callers must not emit escape
    /// sequences for it.
    pub fn sgr_codes(&self) -> Result<Vec<String>, ColorFormatError> {
        let mut codes = Vec::new();
        if let Some(color) = &self.color {
            if let Some(code) = color.resolve(false)? {
                codes.push(code);
            }
        }
        if let Some(bg) = &self.bg {
            if let Some(code) = bg.resolve(true)? {
                codes.push(code);
            }
        }
        for name in &self.looks {
            if let Some(code) = look_code(name) {
                codes.push(code.to_string());
            }
        }
        Ok(codes)
    }

    /// Like [`sgr_codes`](Self::sgr_codes), but malformed hex colors produce
    /// no code instead of an error. Used by the tag path.
    pub fn sgr_codes_lenient(&self) -> Vec<String> {
        let mut codes = Vec::new();
        if let Some(color) = &self.color {
            if let Some(code) = color.resolve_lenient(false) {
                codes.push(code);
            }
        }
        if let Some(bg) = &self.bg {
            if let Some(code) = bg.resolve_lenient(true) {
                codes.push(code);
            }
        }
        for name in &self.looks {
            if let Some(code) = look_code(name) {
                codes.push(code.to_string());
            }
        }
        codes
    }

    /// Wraps `text` in this spec's escape sequence, or returns it unchanged
    /// when the spec resolves to no codes.
    pub fn paint(&self, text: &str) -> Result<String, ColorFormatError> {
        let codes = self.sgr_codes()?;
        if codes.is_empty() {
            Ok(text.to_string())
        } else {
            Ok(format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text))
        }
    }
}

// ==================== Escape preprocessing ====================

/// One unit of preprocessed input. Escaped angle brackets are distinct from
/// literal ones so they can never participate in tag matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Literal(char),
    EscapedLt,
    EscapedGt,
}

fn tokenize_escapes(input: &str) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('<') => {
                    chars.next();
                    glyphs.push(Glyph::EscapedLt);
                    continue;
                }
                Some('>') => {
                    chars.next();
                    glyphs.push(Glyph::EscapedGt);
                    continue;
                }
                _ => {}
            }
        }
        glyphs.push(Glyph::Literal(c));
    }
    glyphs
}

fn push_glyph(out: &mut String, glyph: Glyph) {
    match glyph {
        Glyph::Literal(c) => out.push(c),
        Glyph::EscapedLt => out.push('<'),
        Glyph::EscapedGt => out.push('>'),
    }
}

// ==================== Tag classification ====================

/// The four tag shapes, produced by a single classification step.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TagKind<'a> {
    /// `<#FF5733>` — hex foreground (name retains the `#`).
    HexFg(&'a str),
    /// `<@#FF5733>` — hex background (hex digits only).
    HexBg(&'a str),
    /// `<@red>` — named background (`@` stripped).
    NamedBg(&'a str),
    /// `<warn>` — named style resolved against the merged registry.
    Named(&'a str),
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '#' || c == '-'
}

// ==================== Markup renderer ====================

/// Recursive-descent renderer for markup tags.
///
/// Borrows a flattened `name -> StyleSpec` map (custom and theme entries
/// already merged over the predefined ones by the caller). Rendering never
/// fails: malformed or unknown tags fall back to literal text.
#[derive(Debug)]
pub struct MarkupRenderer<'a> {
    styles: &'a HashMap<String, StyleSpec>,
}

impl<'a> MarkupRenderer<'a> {
    /// Creates a renderer over a merged style map.
    pub fn new(styles: &'a HashMap<String, StyleSpec>) -> Self {
        Self { styles }
    }

    /// Renders markup to an ANSI-annotated string.
    pub fn render(&self, input: &str) -> String {
        let glyphs = tokenize_escapes(input);
        self.process(&glyphs, &[])
    }

    fn process(&self, glyphs: &[Glyph], inherited: &[String]) -> String {
        let mut out = String::with_capacity(glyphs.len());
        let mut i = 0;

        while i < glyphs.len() {
            if glyphs[i] == Glyph::Literal('<')
                && matches!(glyphs.get(i + 1), Some(Glyph::Literal(c)) if *c != '/')
            {
                if let Some((name, tag_len)) = scan_tag_name(glyphs, i) {
                    if let Some(kind) = self.classify(&name) {
                        let content_start = i + tag_len;
                        if let Some(close_pos) = find_close(glyphs, content_start, &name) {
                            let own = self.tag_codes(&kind);
                            let mut combined = inherited.to_vec();
                            combined.extend(own);

                            let inner =
                                self.process(&glyphs[content_start..close_pos], &combined);

                            if combined.is_empty() {
                                out.push_str(&inner);
                            } else {
                                out.push_str("\x1b[");
                                out.push_str(&combined.join(";"));
                                out.push('m');
                                out.push_str(&inner);
                                out.push_str("\x1b[0m");
                                // Restore the enclosing style for whatever
                                // follows inside the parent tag.
                                if !inherited.is_empty() {
                                    out.push_str("\x1b[");
                                    out.push_str(&inherited.join(";"));
                                    out.push('m');
                                }
                            }

                            // Skip past the closing tag: "</name>"
                            i = close_pos + name.chars().count() + 3;
                            continue;
                        }
                    }
                }
            }

            push_glyph(&mut out, glyphs[i]);
            i += 1;
        }

        out
    }

    /// Classifies a tag name by fixed precedence. Bare names that are absent
    /// from the style map do not classify at all, so the `<` stays literal.
    fn classify<'n>(&self, name: &'n str) -> Option<TagKind<'n>> {
        if let Some(hex) = name.strip_prefix("@#") {
            Some(TagKind::HexBg(hex))
        } else if name.starts_with('#') {
            Some(TagKind::HexFg(name))
        } else if let Some(bg_name) = name.strip_prefix('@') {
            Some(TagKind::NamedBg(bg_name))
        } else if self.styles.contains_key(name) {
            Some(TagKind::Named(name))
        } else {
            None
        }
    }

    fn tag_codes(&self, kind: &TagKind<'_>) -> Vec<String> {
        match kind {
            TagKind::HexFg(hex) => StyleSpec::new().fg(*hex).sgr_codes_lenient(),
            TagKind::HexBg(hex) => StyleSpec::new()
                .bg(format!("#{}", hex))
                .sgr_codes_lenient(),
            TagKind::NamedBg(name) => StyleSpec::new().bg(*name).sgr_codes_lenient(),
            TagKind::Named(name) => self.styles[*name].sgr_codes_lenient(),
        }
    }
}

/// Scans a tag name at `glyphs[at] == '<'`: optional `@`, then one or more
/// identifier characters (which include `#`), then `>`. Returns the captured
/// name and the glyph length of the full open tag.
fn scan_tag_name(glyphs: &[Glyph], at: usize) -> Option<(String, usize)> {
    let mut j = at + 1;
    let mut name = String::new();

    if let Some(Glyph::Literal('@')) = glyphs.get(j) {
        name.push('@');
        j += 1;
    }

    let ident_start = j;
    while let Some(Glyph::Literal(c)) = glyphs.get(j) {
        if !is_ident_char(*c) {
            break;
        }
        name.push(*c);
        j += 1;
    }
    if j == ident_start {
        return None;
    }

    match glyphs.get(j) {
        Some(Glyph::Literal('>')) => Some((name, j + 1 - at)),
        _ => None,
    }
}

/// Finds the matching close tag for `name`, tracking nesting depth. Returns
/// the position where depth first reaches zero, or `None` if the tag is
/// unterminated.
fn find_close(glyphs: &[Glyph], from: usize, name: &str) -> Option<usize> {
    let open: Vec<Glyph> = format!("<{}>", name).chars().map(Glyph::Literal).collect();
    let close: Vec<Glyph> = format!("</{}>", name)
        .chars()
        .map(Glyph::Literal)
        .collect();

    let mut depth = 1usize;
    let mut i = from;
    while i < glyphs.len() {
        if glyphs[i..].starts_with(&open) {
            depth += 1;
            i += open.len();
        } else if glyphs[i..].starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
            i += close.len();
        } else {
            i += 1;
        }
    }
    None
}

// ==================== Plain-text utilities ====================

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?@?[\w#-]+>").expect("tag pattern is valid")
});

static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("ANSI pattern is valid")
});

/// Removes every tag-shaped substring, known style or not.
///
/// This is a purely syntactic pass, independent of any style registry.
pub fn strip(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Removes ANSI escape sequences (two-byte escapes and CSI sequences).
pub fn clean(text: &str) -> String {
    ANSI_PATTERN.replace_all(text, "").into_owned()
}

/// Visible width of `text`: the character count after ANSI stripping.
///
/// Each remaining character is assumed to occupy one display column; there is
/// no wide-character or combining-mark awareness.
pub fn visible_len(text: &str) -> usize {
    clean(text).chars().count()
}
