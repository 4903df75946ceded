//! Highlight overlay synchronization
//!
//! The editor shows a plain, editable text surface with a read-only overlay
//! stacked on top that carries the highlight markup. Both share font metrics
//! and wrapping, so keeping them aligned comes down to installing fresh
//! markup after edits and copying scroll offsets on every scroll.

use serde::{Deserialize, Serialize};

use crate::syntax::{compose, LanguageId, Tokenizers};

/// Minimum trimmed length (in chars) before highlighting is shown
pub const MIN_HIGHLIGHT_CHARS: usize = 2;

/// Scroll position of a surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

impl ScrollOffset {
    pub fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }
}

/// Read-only surface that displays highlight markup
pub trait OverlayTarget {
    fn set_markup(&mut self, markup: String);
    fn clear(&mut self);
    fn set_scroll(&mut self, offset: ScrollOffset);
}

/// The editable plain-text surface the overlay follows
pub trait EditSurface {
    fn scroll(&self) -> ScrollOffset;
    /// Toggle the surface between normal text and "text shown by overlay"
    fn set_highlight_enabled(&mut self, enabled: bool);
}

/// In-memory overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightOverlay {
    pub markup: String,
    pub scroll: ScrollOffset,
    /// Number of markup installs, for diagnostics and tests
    pub renders: u64,
}

impl OverlayTarget for HighlightOverlay {
    fn set_markup(&mut self, markup: String) {
        self.markup = markup;
        self.renders += 1;
    }

    fn clear(&mut self) {
        self.markup.clear();
    }

    fn set_scroll(&mut self, offset: ScrollOffset) {
        self.scroll = offset;
    }
}

/// In-memory editable surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSurface {
    pub text: String,
    pub scroll: ScrollOffset,
    pub highlight_enabled: bool,
    /// Selected byte range (caret when empty)
    pub selection: std::ops::Range<usize>,
}

impl EditorSurface {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the text, clamping the selection into the new bounds
    pub fn set_text(&mut self, text: String) {
        let len = text.len();
        let clamp = |pos: usize| floor_char_boundary(&text, pos.min(len));
        self.selection = clamp(self.selection.start)..clamp(self.selection.end);
        self.text = text;
    }

    pub fn select(&mut self, range: std::ops::Range<usize>) {
        self.selection = range;
    }
}

impl EditSurface for EditorSurface {
    fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_highlight_enabled(&mut self, enabled: bool) {
        self.highlight_enabled = enabled;
    }
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Why a pass showed no highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    FeatureOff,
    PlainText,
    TooShort,
}

/// Result of one [`render_highlight`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightOutcome {
    /// Overlay or surface missing; nothing was touched
    Skipped,
    Disabled(DisabledReason),
    Rendered { spans: usize, markup_len: usize },
}

/// Decide whether `text` gets highlighted at all
pub fn disabled_reason(text: &str, language: LanguageId, enabled: bool) -> Option<DisabledReason> {
    if !enabled {
        Some(DisabledReason::FeatureOff)
    } else if !language.has_highlighting() {
        Some(DisabledReason::PlainText)
    } else if text.trim().chars().count() < MIN_HIGHLIGHT_CHARS {
        Some(DisabledReason::TooShort)
    } else {
        None
    }
}

/// Run one highlight pass and install the result into `overlay`.
///
/// When highlighting is disabled the overlay is cleared and the surface is
/// switched back to showing its own text. Otherwise the overlay receives
/// fresh markup and the surface's scroll offsets.
pub fn render_highlight<O, S>(
    overlay: Option<&mut O>,
    surface: Option<&mut S>,
    text: &str,
    language: LanguageId,
    enabled: bool,
    tokenizers: &Tokenizers,
) -> HighlightOutcome
where
    O: OverlayTarget + ?Sized,
    S: EditSurface + ?Sized,
{
    let (Some(overlay), Some(surface)) = (overlay, surface) else {
        tracing::debug!("highlight pass skipped: overlay or surface missing");
        return HighlightOutcome::Skipped;
    };

    if let Some(reason) = disabled_reason(text, language, enabled) {
        surface.set_highlight_enabled(false);
        overlay.clear();
        tracing::debug!(?reason, language = language.tag(), "highlighting disabled");
        return HighlightOutcome::Disabled(reason);
    }

    let spans = tokenizers.tokenize(text, language);
    let markup = compose(text, &spans);
    let outcome = HighlightOutcome::Rendered {
        spans: spans.len(),
        markup_len: markup.len(),
    };

    overlay.set_markup(markup);
    surface.set_highlight_enabled(true);
    overlay.set_scroll(surface.scroll());

    tracing::debug!(
        language = language.tag(),
        bytes = text.len(),
        spans = spans.len(),
        "highlight pass rendered"
    );
    outcome
}

/// Copy the surface's scroll offsets onto the overlay. Called on every
/// scroll event, never debounced.
pub fn sync_scroll<O, S>(overlay: Option<&mut O>, surface: &S)
where
    O: OverlayTarget + ?Sized,
    S: EditSurface + ?Sized,
{
    if let Some(overlay) = overlay {
        overlay.set_scroll(surface.scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        overlay: &mut HighlightOverlay,
        surface: &mut EditorSurface,
        text: &str,
        language: LanguageId,
        enabled: bool,
    ) -> HighlightOutcome {
        render_highlight(
            Some(overlay),
            Some(surface),
            text,
            language,
            enabled,
            &Tokenizers::new(),
        )
    }

    #[test]
    fn test_render_installs_markup_and_scroll() {
        let mut overlay = HighlightOverlay::default();
        let mut surface = EditorSurface::with_text("let x = 1;");
        surface.scroll = ScrollOffset::new(120.0, 8.0);

        let outcome = render(
            &mut overlay,
            &mut surface,
            "let x = 1;",
            LanguageId::JavaScript,
            true,
        );

        assert!(matches!(outcome, HighlightOutcome::Rendered { spans: 2, .. }));
        assert!(overlay.markup.contains("token-keyword"));
        assert_eq!(overlay.scroll, ScrollOffset::new(120.0, 8.0));
        assert!(surface.highlight_enabled);
    }

    #[test]
    fn test_disabled_cases_clear_overlay() {
        let cases = [
            ("let x = 1;", LanguageId::JavaScript, false, DisabledReason::FeatureOff),
            ("let x = 1;", LanguageId::PlainText, true, DisabledReason::PlainText),
            ("  x \n", LanguageId::JavaScript, true, DisabledReason::TooShort),
            ("", LanguageId::Css, true, DisabledReason::TooShort),
        ];

        for (text, language, enabled, reason) in cases {
            let mut overlay = HighlightOverlay {
                markup: "stale".to_string(),
                ..HighlightOverlay::default()
            };
            let mut surface = EditorSurface {
                highlight_enabled: true,
                ..EditorSurface::default()
            };

            let outcome = render(&mut overlay, &mut surface, text, language, enabled);

            assert_eq!(outcome, HighlightOutcome::Disabled(reason));
            assert!(overlay.markup.is_empty());
            assert!(!surface.highlight_enabled);
            assert_eq!(overlay.renders, 0);
        }
    }

    #[test]
    fn test_two_chars_is_enough() {
        assert_eq!(disabled_reason(" ab ", LanguageId::Html, true), None);
        assert_eq!(
            disabled_reason(" é ", LanguageId::Html, true),
            Some(DisabledReason::TooShort)
        );
    }

    #[test]
    fn test_missing_targets_are_a_no_op() {
        let mut surface = EditorSurface::default();
        let outcome = render_highlight::<HighlightOverlay, _>(
            None,
            Some(&mut surface),
            "let x = 1;",
            LanguageId::JavaScript,
            true,
            &Tokenizers::new(),
        );
        assert_eq!(outcome, HighlightOutcome::Skipped);
        assert!(!surface.highlight_enabled);

        let mut overlay = HighlightOverlay::default();
        let outcome = render_highlight::<_, EditorSurface>(
            Some(&mut overlay),
            None,
            "let x = 1;",
            LanguageId::JavaScript,
            true,
            &Tokenizers::new(),
        );
        assert_eq!(outcome, HighlightOutcome::Skipped);
        assert!(overlay.markup.is_empty());
    }

    #[test]
    fn test_sync_scroll_copies_both_axes() {
        let mut overlay = HighlightOverlay::default();
        let surface = EditorSurface {
            scroll: ScrollOffset::new(40.0, 12.5),
            ..EditorSurface::default()
        };
        sync_scroll(Some(&mut overlay), &surface);
        assert_eq!(overlay.scroll, ScrollOffset::new(40.0, 12.5));
        sync_scroll::<HighlightOverlay, _>(None, &surface);
    }

    #[test]
    fn test_set_text_clamps_selection() {
        let mut surface = EditorSurface::with_text("hello world");
        surface.select(6..11);
        surface.set_text("hé".to_string());
        // "hé" is 3 bytes; 3 is a boundary
        assert_eq!(surface.selection, 3..3);
        surface.select(2..2);
        surface.set_text("é".to_string());
        assert_eq!(surface.selection, 2..2);
        surface.set_text("éa".to_string());
        surface.select(1..1);
        surface.set_text("é".to_string());
        assert_eq!(surface.selection, 0..0);
    }
}
