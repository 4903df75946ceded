//! JavaScript scanners
//!
//! Priority: comment > string > keyword > function > number.

use super::highlights::{Span, TokenKind};
use super::tokenizer::{Scanner, SpanCollector, Tokenizer};

/// Reserved words highlighted as keywords
pub const KEYWORDS: &[&str] = &[
    "const",
    "let",
    "var",
    "function",
    "return",
    "if",
    "else",
    "for",
    "while",
    "do",
    "switch",
    "case",
    "break",
    "continue",
    "class",
    "extends",
    "import",
    "export",
    "default",
    "async",
    "await",
    "try",
    "catch",
    "finally",
    "throw",
    "new",
    "this",
    "super",
    "typeof",
    "instanceof",
    "delete",
    "void",
    "yield",
    "in",
    "of",
    "with",
    "debugger",
];

const COMMENT: &str = r"//[^\r\n]*|(?s:/\*.*?\*/)";
const STRING: &str =
    r#""(?:\\[^\r\n]|[^"\\\r\n])*"|'(?:\\[^\r\n]|[^'\\\r\n])*'|`(?:\\[^\r\n]|[^`\\\r\n])*`"#;
// Word boundaries are ASCII so letters like `é` do not glue onto a token.
// The call parenthesis is matched but left out of the captured span.
const FUNCTION: &str = r"(?-u:\b)([a-zA-Z_$][a-zA-Z0-9_$]*\s*)\(";
const NUMBER: &str = r"(?-u:\b)(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?-u:\b)";

#[derive(Debug)]
pub struct JavaScriptTokenizer {
    scanners: [Scanner; 5],
}

impl JavaScriptTokenizer {
    pub fn new() -> Self {
        let keywords = format!(r"(?-u:\b)(?:{})(?-u:\b)", KEYWORDS.join("|"));
        Self {
            scanners: [
                Scanner::new(COMMENT, TokenKind::Comment),
                Scanner::new(STRING, TokenKind::String),
                Scanner::new(&keywords, TokenKind::Keyword),
                Scanner::with_group(FUNCTION, TokenKind::Function, 1),
                Scanner::new(NUMBER, TokenKind::Number),
            ],
        }
    }
}

impl Default for JavaScriptTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for JavaScriptTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Span> {
        let mut collector = SpanCollector::new(text);
        for scanner in &self.scanners {
            scanner.run(&mut collector);
        }
        let spans = collector.into_spans();
        tracing::trace!(spans = spans.len(), "tokenized javascript");
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<(TokenKind, String)> {
        JavaScriptTokenizer::new()
            .tokenize(text)
            .into_iter()
            .map(|s| (s.kind, s.text))
            .collect()
    }

    fn span(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn test_comment_swallows_string() {
        assert_eq!(
            spans(r#"// a "b""#),
            vec![span(TokenKind::Comment, r#"// a "b""#)]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let text = "/* one\n two */ x";
        assert_eq!(spans(text), vec![span(TokenKind::Comment, "/* one\n two */")]);
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        assert_eq!(
            spans("// note\nreturn"),
            vec![
                span(TokenKind::Comment, "// note"),
                span(TokenKind::Keyword, "return"),
            ]
        );
    }

    #[test]
    fn test_string_clipped_by_earlier_comment() {
        // The comment scanner runs first and claims `//not";`, so the string
        // that started earlier is clipped at the comment boundary.
        let text = r#"x = "http://not";"#;
        let result = spans(text);
        assert_eq!(result[0], span(TokenKind::String, r#""http:"#));
        assert_eq!(result[1], span(TokenKind::Comment, r#"//not";"#));
    }

    #[test]
    fn test_strings_with_escapes() {
        assert_eq!(
            spans(r#"'it\'s' "q\"q" `t`"#),
            vec![
                span(TokenKind::String, r"'it\'s'"),
                span(TokenKind::String, r#""q\"q""#),
                span(TokenKind::String, "`t`"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_falls_through() {
        let result = spans("let s = \"open\nlet t = 1;");
        assert!(result.iter().all(|(kind, _)| *kind != TokenKind::String));
        assert!(result.contains(&span(TokenKind::Number, "1")));
    }

    #[test]
    fn test_keyword_beats_function() {
        assert_eq!(
            spans("if(x) { foo (1); }"),
            vec![
                span(TokenKind::Keyword, "if"),
                span(TokenKind::Function, "foo "),
                span(TokenKind::Number, "1"),
            ]
        );
    }

    #[test]
    fn test_function_declaration_and_call_alike() {
        assert_eq!(
            spans("function greet(name) { return greet2(); }"),
            vec![
                span(TokenKind::Keyword, "function"),
                span(TokenKind::Function, "greet"),
                span(TokenKind::Keyword, "return"),
                span(TokenKind::Function, "greet2"),
            ]
        );
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert!(spans("constant iffy forEach").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_are_not_word_characters() {
        assert_eq!(
            spans("ñame(x) + é1 + ü2.5; éreturn"),
            vec![
                span(TokenKind::Function, "ame"),
                span(TokenKind::Number, "1"),
                span(TokenKind::Number, "2.5"),
                span(TokenKind::Keyword, "return"),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            spans("1 2.5 10. x9"),
            vec![
                span(TokenKind::Number, "1"),
                span(TokenKind::Number, "2.5"),
                // a trailing dot has no word boundary after it
                span(TokenKind::Number, "10"),
            ]
        );
    }

    #[test]
    fn test_spans_sorted_by_start() {
        let result = JavaScriptTokenizer::new().tokenize("const a = f(1); // done");
        for pair in result.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}
