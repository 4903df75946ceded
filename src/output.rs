//! Rendering the active document for the command line
//!
//! The binary drives the same model as an interactive session; this module
//! turns the model's state into one of the `--format` outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::model::{line_count, AppModel};
use crate::syntax::{escape_html, shared_tokenizers, LanguageId, Span};
use crate::theme::Theme;

/// Everything needed to print one document
#[derive(Debug, Clone)]
pub struct Highlighted {
    pub name: String,
    pub text: String,
    pub language: LanguageId,
    /// Composed markup, `None` when highlighting was disabled for this text
    pub markup: Option<String>,
}

impl Highlighted {
    /// Capture the active document as the model last rendered it
    pub fn from_model(model: &AppModel) -> Option<Self> {
        let doc = model.active_document()?;
        let markup = model
            .surface
            .highlight_enabled
            .then(|| model.overlay.markup.clone());
        Some(Self {
            name: doc.name.clone(),
            text: model.text().to_string(),
            language: doc.language,
            markup,
        })
    }

    /// Markup with a plain escaped fallback
    pub fn markup(&self) -> String {
        match &self.markup {
            Some(markup) => markup.clone(),
            None => escape_html(&self.text),
        }
    }

    fn spans(&self) -> Vec<Span> {
        if self.markup.is_none() {
            return Vec::new();
        }
        shared_tokenizers().tokenize(&self.text, self.language)
    }

    pub fn render(&self, format: OutputFormat, theme: &Theme) -> Result<String, String> {
        match format {
            OutputFormat::Markup => Ok(self.markup()),
            OutputFormat::Tokens => self.render_tokens(),
            OutputFormat::Page => Ok(self.render_page(theme)),
        }
    }

    /// JSON document listing every span
    pub fn render_tokens(&self) -> Result<String, String> {
        #[derive(Serialize)]
        struct TokenDump<'a> {
            name: &'a str,
            language: LanguageId,
            highlighted: bool,
            spans: Vec<Span>,
        }

        let dump = TokenDump {
            name: &self.name,
            language: self.language,
            highlighted: self.markup.is_some(),
            spans: self.spans(),
        };
        serde_json::to_string_pretty(&dump).map_err(|e| format!("Failed to encode tokens: {}", e))
    }

    /// Standalone HTML page with a line-number gutter
    pub fn render_page(&self, theme: &Theme) -> String {
        let mut gutter = String::new();
        for n in 1..=line_count(&self.text) {
            let _ = writeln!(gutter, "{}", n);
        }

        let mut page = String::with_capacity(self.text.len() * 3);
        page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(page, "<title>{}</title>", escape_html(&self.name));
        page.push_str("<style>\n");
        page.push_str(".clearcode { display: flex; font-family: monospace; }\n");
        page.push_str(".clearcode pre { margin: 0; padding: 0 1em; }\n");
        page.push_str(&theme.stylesheet());
        page.push_str("</style>\n</head>\n<body>\n");
        let _ = writeln!(
            page,
            "<div class=\"clearcode language-{}\">",
            self.language.tag()
        );
        let _ = writeln!(page, "<pre class=\"gutter\">{}</pre>", gutter.trim_end());
        let _ = writeln!(page, "<pre><code>{}</code></pre>", self.markup());
        page.push_str("</div>\n</body>\n</html>\n");
        page
    }
}
