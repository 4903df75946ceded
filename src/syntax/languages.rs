//! Language identification and detection
//!
//! Maps file extensions to language IDs and provides language metadata.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    #[default]
    PlainText,
    JavaScript,
    Html,
    Css,
    // Detected so files keep their identity, but no scanners yet
    Python,
}

impl LanguageId {
    /// Detect language from a bare file extension (without the dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "ts" | "tsx" | "json" => LanguageId::JavaScript,
            "html" | "htm" => LanguageId::Html,
            "css" | "scss" | "sass" => LanguageId::Css,
            "py" => LanguageId::Python,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from a file name.
    ///
    /// Only the text after the last `.` is considered, so `archive.tar.js`
    /// is JavaScript and `.css` (a bare dotfile) is still CSS. Names without
    /// a dot are plain text.
    pub fn from_filename(name: &str) -> Self {
        name.rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(LanguageId::PlainText)
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(Self::from_filename)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Parse a user-facing language tag (`--language css`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "javascript" | "js" => Some(LanguageId::JavaScript),
            "html" => Some(LanguageId::Html),
            "css" => Some(LanguageId::Css),
            "python" | "py" => Some(LanguageId::Python),
            "plaintext" | "text" | "txt" => Some(LanguageId::PlainText),
            _ => None,
        }
    }

    /// Stable lowercase tag, as used in config files and CSS classes
    pub fn tag(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "plaintext",
            LanguageId::JavaScript => "javascript",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::Python => "python",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Html => "HTML",
            LanguageId::Css => "CSS",
            LanguageId::Python => "Python",
        }
    }

    /// Check if this language has syntax highlighting support
    pub fn has_highlighting(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }
}
