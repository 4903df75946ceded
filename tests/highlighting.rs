//! Highlighting properties across all tokenizers
//!
//! These check what must hold for any input: spans never overlap, markup
//! always strips back to the source, and a pass is a pure function of the
//! text.

mod common;

use clearcode::overlay::{
    render_highlight, DisabledReason, EditorSurface, HighlightOutcome, HighlightOverlay,
    ScrollOffset,
};
use clearcode::syntax::{
    compose, highlight, markup_text, shared_tokenizers, split_tag, tokenize, LanguageId,
    TagPartKind, TokenKind,
};
use common::{all_samples, assert_well_formed};

// ========================================================================
// Span invariants
// ========================================================================

#[test]
fn test_spans_never_overlap() {
    for (language, text) in all_samples() {
        assert_well_formed(text, &tokenize(text, language));
    }
}

#[test]
fn test_markup_strips_back_to_source() {
    for (language, text) in all_samples() {
        assert_eq!(markup_text(&highlight(text, language)), text, "{:?}", language);
    }
}

#[test]
fn test_highlight_is_idempotent() {
    for (language, text) in all_samples() {
        assert_eq!(highlight(text, language), highlight(text, language));
    }
}

#[test]
fn test_plain_text_has_no_spans() {
    assert!(tokenize("const a = 1;", LanguageId::PlainText).is_empty());
    assert!(tokenize("def f(): pass", LanguageId::Python).is_empty());
}

#[test]
fn test_empty_text() {
    for language in [LanguageId::JavaScript, LanguageId::Html, LanguageId::Css] {
        assert!(tokenize("", language).is_empty());
        assert_eq!(highlight("", language), "");
    }
}

// ========================================================================
// Priority
// ========================================================================

#[test]
fn test_comment_hides_keywords_and_strings() {
    let text = "// return \"x\" 42";
    let spans = tokenize(text, LanguageId::JavaScript);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, TokenKind::Comment);
}

#[test]
fn test_string_hides_keywords() {
    let text = "let s = \"if else return\";";
    let kinds: Vec<_> = tokenize(text, LanguageId::JavaScript)
        .into_iter()
        .map(|s| (s.kind, s.text))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (TokenKind::Keyword, "let".to_string()),
            (TokenKind::String, "\"if else return\"".to_string()),
        ]
    );
}

#[test]
fn test_html_comment_hides_tags() {
    let spans = tokenize("<!-- <p>x</p> --><b>", LanguageId::Html);
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].kind, TokenKind::Comment);
    assert_eq!(spans[1].text, "<b>");
}

#[test]
fn test_css_comment_hides_declarations() {
    let spans = tokenize("/* color: red; */", LanguageId::Css);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, TokenKind::Comment);
}

// ========================================================================
// HTML tags
// ========================================================================

#[test]
fn test_tag_markup_keeps_whitespace() {
    let text = "<div   class=\"x\"\n  id='y' >";
    let markup = highlight(text, LanguageId::Html);
    assert_eq!(markup_text(&markup), text);
    assert!(markup.contains("<span class=\"token-tag-name\">div</span>   "));
    assert!(markup.contains("<span class=\"token-attribute\">id</span>"));
}

#[test]
fn test_split_tag_parts_tile_the_tag() {
    for tag in ["<a>", "</p>", "<img src=\"x.png\" alt=''/>", "<input  disabled >"] {
        let parts = split_tag(tag).unwrap();
        let rebuilt: String = parts.iter().map(|p| &tag[p.range.clone()]).collect();
        assert_eq!(rebuilt, tag);
        assert!(parts.iter().any(|p| p.kind == TagPartKind::Name));
    }
}

#[test]
fn test_css_property_and_value_are_separate() {
    let spans = tokenize("a { margin : 0 auto ; }", LanguageId::Css);
    let kinds: Vec<_> = spans.iter().map(|s| (s.kind, s.text.as_str())).collect();
    assert_eq!(
        kinds,
        vec![(TokenKind::Property, "margin"), (TokenKind::Value, "0 auto")]
    );
}

// ========================================================================
// Overlay
// ========================================================================

#[test]
fn test_render_disables_short_and_plain_text() {
    let mut overlay = HighlightOverlay::default();
    let mut surface = EditorSurface::with_text("x");

    let outcome = render_highlight(
        Some(&mut overlay),
        Some(&mut surface),
        " x ",
        LanguageId::JavaScript,
        true,
        shared_tokenizers(),
    );
    assert_eq!(outcome, HighlightOutcome::Disabled(DisabledReason::TooShort));
    assert!(overlay.markup.is_empty());
    assert!(!surface.highlight_enabled);

    let outcome = render_highlight(
        Some(&mut overlay),
        Some(&mut surface),
        "some notes",
        LanguageId::PlainText,
        true,
        shared_tokenizers(),
    );
    assert_eq!(outcome, HighlightOutcome::Disabled(DisabledReason::PlainText));
}

#[test]
fn test_render_copies_scroll_and_markup() {
    let text = "let a = 1;";
    let mut overlay = HighlightOverlay::default();
    let mut surface = EditorSurface::with_text(text);
    surface.scroll = ScrollOffset::new(40.0, 8.0);

    let outcome = render_highlight(
        Some(&mut overlay),
        Some(&mut surface),
        text,
        LanguageId::JavaScript,
        true,
        shared_tokenizers(),
    );
    assert!(matches!(outcome, HighlightOutcome::Rendered { spans: 2, .. }));
    assert_eq!(overlay.scroll, surface.scroll);
    assert_eq!(
        overlay.markup,
        compose(text, &tokenize(text, LanguageId::JavaScript))
    );
    assert!(surface.highlight_enabled);
}

#[test]
fn test_render_without_overlay_is_skipped() {
    let mut surface = EditorSurface::with_text("let a = 1;");
    let outcome = render_highlight::<HighlightOverlay, _>(
        None,
        Some(&mut surface),
        "let a = 1;",
        LanguageId::JavaScript,
        true,
        shared_tokenizers(),
    );
    assert_eq!(outcome, HighlightOutcome::Skipped);
}
