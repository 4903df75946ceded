//! Span compositor
//!
//! Interleaves tokenizer spans with the untouched text between them and
//! produces escaped markup wrapped in `<span class="token-*">` elements.

use super::highlights::{Span, TokenKind};
use super::html::{split_tag, TagPartKind};

/// Escape text for inclusion in markup.
///
/// Converts `&`, `<`, `>`, `"` and `'`. Apply exactly once per piece of text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Reverse [`escape_html`]. Unknown entities are left as they are.
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let entity = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
        ]
        .into_iter()
        .find(|(name, _)| rest.starts_with(name));
        match entity {
            Some((name, ch)) => {
                out.push(ch);
                rest = &rest[name.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn push_wrapped(out: &mut String, class: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str("<span class=\"token-");
    out.push_str(class);
    out.push_str("\">");
    push_escaped(out, text);
    out.push_str("</span>");
}

/// Render a whole tag with nested name / attribute / value wrappers
fn push_tag(out: &mut String, tag: &str) {
    let Some(parts) = split_tag(tag) else {
        push_wrapped(out, TokenKind::Tag.class_name(), tag);
        return;
    };

    out.push_str("<span class=\"token-tag\">");
    for part in parts {
        let text = &tag[part.range];
        match part.kind {
            TagPartKind::Text => push_escaped(out, text),
            TagPartKind::Name => push_wrapped(out, "tag-name", text),
            TagPartKind::Attribute => push_wrapped(out, "attribute", text),
            TagPartKind::Value => push_wrapped(out, "string", text),
        }
    }
    out.push_str("</span>");
}

/// Build markup for `text` from its sorted, non-overlapping `spans`.
///
/// Gaps become `token-plain` wrappers. Empty gaps produce nothing.
pub fn compose(text: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;

    for span in spans {
        if span.start < last || span.end > text.len() {
            tracing::warn!(
                start = span.start,
                end = span.end,
                "skipping span outside the composable range"
            );
            continue;
        }
        push_wrapped(&mut out, TokenKind::Plain.class_name(), &text[last..span.start]);
        if span.kind == TokenKind::Tag {
            push_tag(&mut out, &span.text);
        } else {
            push_wrapped(&mut out, span.kind.class_name(), &span.text);
        }
        last = span.end;
    }

    push_wrapped(&mut out, TokenKind::Plain.class_name(), &text[last..]);
    out
}

/// Strip all markup from composed output and unescape it.
///
/// Only understands the markup [`compose`] produces: every `<` in it starts
/// a wrapper tag, since text `<` is always escaped.
pub fn markup_text(markup: &str) -> String {
    let mut stripped = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }
    unescape_html(&stripped)
}
