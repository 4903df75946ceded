//! Command-line argument parsing for the highlighter
//!
//! Supports:
//! - Highlighting files, or stdin when no paths are given
//! - Three output formats: markup fragments, token JSON, standalone pages
//! - Forcing a language instead of detecting it from the file name
//! - Watch mode that re-highlights files as they change on disk

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::syntax::LanguageId;
use crate::theme::DEFAULT_THEME;

/// Regex-driven syntax highlighting for JavaScript, HTML and CSS
#[derive(Parser, Debug)]
#[command(
    name = "clearcode",
    version,
    about = "Highlight JavaScript, HTML and CSS as token markup"
)]
pub struct CliArgs {
    /// Files to highlight (reads stdin when omitted)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Markup)]
    pub format: OutputFormat,

    /// Language to use instead of detecting it from the file name
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<String>,

    /// Emit escaped plain text without token markup
    #[arg(long)]
    pub no_syntax: bool,

    /// Re-highlight files whenever they change
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Theme for `--format page`
    #[arg(long, value_name = "THEME", default_value = DEFAULT_THEME)]
    pub theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Escaped text with `token-*` spans
    Markup,
    /// Token spans as JSON
    Tokens,
    /// Standalone HTML page with a theme stylesheet
    Page,
}

/// Where the text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Files(Vec<PathBuf>),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    pub format: OutputFormat,
    /// Forced language, `None` to detect per file
    pub language: Option<LanguageId>,
    pub syntax_enabled: bool,
    pub watch: bool,
    pub theme: String,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let language = match &self.language {
            Some(tag) => Some(
                LanguageId::from_tag(tag).ok_or_else(|| format!("Unknown language: {}", tag))?,
            ),
            None => None,
        };

        let input = if self.paths.is_empty() {
            if self.watch {
                return Err("--watch needs at least one file".to_string());
            }
            InputSource::Stdin
        } else {
            if let Some(dir) = self.paths.iter().find(|p| p.is_dir()) {
                return Err(format!("Not a file: {}", dir.display()));
            }
            InputSource::Files(self.paths)
        };

        Ok(RunConfig {
            input,
            format: self.format,
            language,
            syntax_enabled: !self.no_syntax,
            watch: self.watch,
            theme: self.theme,
        })
    }
}

impl RunConfig {
    /// File paths to read, empty for stdin
    pub fn file_paths(&self) -> &[PathBuf] {
        match &self.input {
            InputSource::Stdin => &[],
            InputSource::Files(paths) => paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: &[&str]) -> CliArgs {
        CliArgs {
            paths: paths.iter().map(PathBuf::from).collect(),
            format: OutputFormat::Markup,
            language: None,
            no_syntax: false,
            watch: false,
            theme: DEFAULT_THEME.to_string(),
        }
    }

    #[test]
    fn test_no_paths_reads_stdin() {
        let config = args(&[]).into_config().unwrap();
        assert_eq!(config.input, InputSource::Stdin);
        assert!(config.file_paths().is_empty());
        assert!(config.syntax_enabled);
    }

    #[test]
    fn test_files_are_kept_in_order() {
        let config = args(&["b.css", "a.js"]).into_config().unwrap();
        assert_eq!(
            config.file_paths(),
            &[PathBuf::from("b.css"), PathBuf::from("a.js")]
        );
    }

    #[test]
    fn test_language_tag() {
        let mut cli = args(&["notes"]);
        cli.language = Some("CSS".to_string());
        assert_eq!(cli.into_config().unwrap().language, Some(LanguageId::Css));

        let mut cli = args(&["notes"]);
        cli.language = Some("cobol".to_string());
        assert_eq!(cli.into_config().unwrap_err(), "Unknown language: cobol");
    }

    #[test]
    fn test_watch_requires_files() {
        let mut cli = args(&[]);
        cli.watch = true;
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = std::env::temp_dir();
        let cli = args(&[dir.to_str().unwrap()]);
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_no_syntax_flag() {
        let mut cli = args(&[]);
        cli.no_syntax = true;
        assert!(!cli.into_config().unwrap().syntax_enabled);
    }

    #[test]
    fn test_parse_from_command_line() {
        let cli = CliArgs::try_parse_from([
            "clearcode",
            "--format",
            "tokens",
            "-l",
            "js",
            "app.txt",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Tokens);
        assert_eq!(cli.language.as_deref(), Some("js"));
        assert_eq!(cli.theme, "light");
    }
}
