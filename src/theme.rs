//! Page themes for exported markup
//!
//! A theme maps every `token-*` class to a color and supplies the page
//! colors used by `--format page`. Themes are YAML, either embedded in the
//! binary or placed by the user in the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/clearcode/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::fmt::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::syntax::TokenKind;

pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// Theme used when none is requested
pub const DEFAULT_THEME: &str = "light";

/// A built-in theme entry
pub struct BuiltinTheme {
    pub id: &'static str,
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// `~/.config/clearcode/themes/`
pub fn user_themes_dir() -> Option<PathBuf> {
    crate::config_paths::config_dir().map(|dir| dir.join("themes"))
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = user_themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// CSS color literal
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub page: PageThemeData,
    pub syntax: SyntaxThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageThemeData {
    pub background: String,
    pub foreground: String,
    pub gutter: String,
}

/// One color per token class. Missing entries inherit the foreground.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyntaxThemeData {
    pub comment: Option<String>,
    pub doctype: Option<String>,
    pub string: Option<String>,
    pub keyword: Option<String>,
    pub tag: Option<String>,
    pub tag_name: Option<String>,
    pub attribute: Option<String>,
    pub function: Option<String>,
    pub property: Option<String>,
    pub value: Option<String>,
    pub number: Option<String>,
}

/// Resolved theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub foreground: Color,
    pub gutter: Color,
    /// `(class suffix, color)` for every styled token class
    pub classes: Vec<(&'static str, Color)>,
}

impl Default for Theme {
    fn default() -> Self {
        // The embedded light theme always parses
        Self::from_yaml(LIGHT_YAML).unwrap_or_else(|_| Self {
            name: "Fallback".to_string(),
            background: Color::rgb(255, 255, 255),
            foreground: Color::rgb(0, 0, 0),
            gutter: Color::rgb(128, 128, 128),
            classes: Vec::new(),
        })
    }
}

impl Theme {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse theme: {}", e))?;
        Self::from_data(data)
    }

    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let builtin = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme: {}", id))?;
        Self::from_yaml(builtin.yaml)
    }

    fn from_data(data: ThemeData) -> Result<Self, String> {
        let foreground = Color::from_hex(&data.page.foreground)?;
        let syntax = &data.syntax;
        let entries = [
            (TokenKind::Comment.class_name(), &syntax.comment),
            (TokenKind::Doctype.class_name(), &syntax.doctype),
            (TokenKind::String.class_name(), &syntax.string),
            (TokenKind::Keyword.class_name(), &syntax.keyword),
            (TokenKind::Tag.class_name(), &syntax.tag),
            ("tag-name", &syntax.tag_name),
            ("attribute", &syntax.attribute),
            (TokenKind::Function.class_name(), &syntax.function),
            (TokenKind::Property.class_name(), &syntax.property),
            (TokenKind::Value.class_name(), &syntax.value),
            (TokenKind::Number.class_name(), &syntax.number),
        ];

        let mut classes = Vec::with_capacity(entries.len());
        for (class, hex) in entries {
            let color = match hex {
                Some(hex) => Color::from_hex(hex)?,
                None => foreground,
            };
            classes.push((class, color));
        }

        Ok(Self {
            name: data.name,
            background: Color::from_hex(&data.page.background)?,
            foreground,
            gutter: Color::from_hex(&data.page.gutter)?,
            classes,
        })
    }

    /// Stylesheet for composed markup inside `.clearcode`
    pub fn stylesheet(&self) -> String {
        let mut css = String::new();
        let _ = writeln!(
            css,
            ".clearcode {{ background: {}; color: {}; }}",
            self.background.to_css(),
            self.foreground.to_css()
        );
        let _ = writeln!(
            css,
            ".clearcode .gutter {{ color: {}; }}",
            self.gutter.to_css()
        );
        for (class, color) in &self.classes {
            let _ = writeln!(
                css,
                ".clearcode .token-{} {{ color: {}; }}",
                class,
                color.to_css()
            );
        }
        css
    }
}
