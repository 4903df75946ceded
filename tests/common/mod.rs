//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use clearcode::config::EditorConfig;
use clearcode::messages::{DocumentMsg, EditorMsg, Msg};
use clearcode::model::AppModel;
use clearcode::runtime::Runtime;
use clearcode::storage::WorkspaceStore;
use clearcode::syntax::{LanguageId, Span};

/// Inputs that exercise every scanner, including awkward ones
pub const JS_SAMPLES: &[&str] = &[
    "const a = 1;",
    "// comment \"with string\"\nlet x = 'y';",
    "x = \"http://not\"; /* block\n comment */ y(2.5)",
    "if (a) { return fn (b, `t${c}`); }",
    "let s = \"unterminated\nlet t = 10.;",
    "function greet(name) { return \"Hello, \" + name; }",
    "a /* x // y */ b // z /* w */",
    "é = \"ü\"; ñ(1)",
];

pub const HTML_SAMPLES: &[&str] = &[
    "<!DOCTYPE html>\n<html><body></body></html>",
    "<!-- <b>hidden</b> -->\n<p class=\"x\">hi</p>",
    "<div   class=\"x\"   id='y' >text</div>",
    "<input disabled>\n<br/>",
    "<!-- open <br>",
    "a < b > c",
];

pub const CSS_SAMPLES: &[&str] = &[
    "a { color: red; }",
    "@media screen { .x { margin : 0 auto ; } }",
    "/* color: blue; */ b { --gap: 4px }",
    "p { content: \"x: y;\"; }",
    "DIV { Color: #FFF; }",
];

/// Every sample paired with its language
pub fn all_samples() -> Vec<(LanguageId, &'static str)> {
    let mut samples = Vec::new();
    samples.extend(JS_SAMPLES.iter().map(|s| (LanguageId::JavaScript, *s)));
    samples.extend(HTML_SAMPLES.iter().map(|s| (LanguageId::Html, *s)));
    samples.extend(CSS_SAMPLES.iter().map(|s| (LanguageId::Css, *s)));
    samples
}

/// Panic unless spans are sorted, in bounds and non-overlapping
pub fn assert_well_formed(text: &str, spans: &[Span]) {
    let mut last_end = 0;
    for span in spans {
        assert!(
            span.start >= last_end,
            "span {:?} overlaps previous end {} in {:?}",
            span,
            last_end,
            text
        );
        assert!(span.start < span.end, "empty span {:?}", span);
        assert!(span.end <= text.len());
        assert_eq!(span.text, &text[span.start..span.end]);
        last_end = span.end;
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Config with auto-save off so tests control every write
pub fn quiet_config() -> EditorConfig {
    EditorConfig {
        auto_save: false,
        ..EditorConfig::default()
    }
}

/// Runtime over a fresh welcome session
pub fn test_runtime(config: EditorConfig, store: Option<WorkspaceStore>) -> Runtime {
    Runtime::new(AppModel::new(config), store)
}

pub fn type_text(runtime: &mut Runtime, text: &str, now: Instant) {
    runtime.dispatch(Msg::Editor(EditorMsg::TextChanged(text.to_string())), now);
}

pub fn open_file(runtime: &mut Runtime, name: &str, content: &str, now: Instant) {
    runtime.dispatch(
        Msg::Document(DocumentMsg::Open {
            name: name.to_string(),
            content: content.to_string(),
        }),
        now,
    );
}
