//! Line gutter and line-oriented editing helpers

use std::ops::Range;

/// Number of `\n`-separated lines. Empty text is one line.
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Status bar label, e.g. "1 line" or "12 lines"
pub fn line_label(count: usize) -> String {
    if count == 1 {
        "1 line".to_string()
    } else {
        format!("{} lines", count)
    }
}

/// Byte range of a 1-based line, excluding its newline
pub fn line_range(text: &str, line_number: usize) -> Option<Range<usize>> {
    let index = line_number.checked_sub(1)?;
    let mut start = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i == index {
            return Some(start..start + line.len());
        }
        start += line.len() + 1;
    }
    None
}

/// Line-number gutter state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineNumbers {
    pub count: usize,
    /// One number per line, each followed by a newline
    pub gutter: String,
    /// Follows the editable surface's vertical scroll
    pub scroll_top: f32,
}

impl LineNumbers {
    pub fn for_text(text: &str) -> Self {
        let mut lines = Self::default();
        lines.refresh(text);
        lines
    }

    /// Rebuild the gutter for `text`
    pub fn refresh(&mut self, text: &str) {
        use std::fmt::Write;

        let count = line_count(text);
        if count == self.count && !self.gutter.is_empty() {
            return;
        }
        self.count = count;
        self.gutter.clear();
        for n in 1..=count {
            let _ = writeln!(self.gutter, "{}", n);
        }
    }

    pub fn label(&self) -> String {
        line_label(self.count)
    }
}

/// Result of toggling a line comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToggle {
    pub text: String,
    pub selection: Range<usize>,
    /// True when a comment marker was added
    pub commented: bool,
}

/// Toggle a `//` comment on the lines touched by `selection`.
///
/// The lines are treated as one block: when the block (ignoring leading
/// whitespace) starts with `//`, the first `//` and one space after it are
/// removed. Otherwise `// ` is inserted after the block's indentation. The
/// selection shifts by the number of bytes added or removed.
pub fn toggle_line_comment(text: &str, selection: Range<usize>) -> CommentToggle {
    let start = selection.start.min(text.len());
    let end = selection.end.clamp(start, text.len());

    let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[end..].find('\n').map_or(text.len(), |i| end + i);
    let block = &text[line_start..line_end];

    let body = block.trim_start();
    let indent = &block[..block.len() - body.len()];

    let (replacement, delta, commented) = if body.starts_with("//") {
        let slash = indent.len();
        let after = &block[slash + 2..];
        let after = after.strip_prefix(' ').unwrap_or(after);
        let replacement = format!("{}{}", indent, after);
        let removed = block.len() - replacement.len();
        (replacement, -(removed as isize), false)
    } else {
        (format!("{}// {}", indent, body), 3, true)
    };

    let mut out = String::with_capacity(text.len() + 3);
    out.push_str(&text[..line_start]);
    out.push_str(&replacement);
    out.push_str(&text[line_end..]);

    let shift = |pos: usize| -> usize {
        let mut moved = ((pos as isize + delta).max(line_start as isize) as usize).min(out.len());
        while !out.is_char_boundary(moved) {
            moved -= 1;
        }
        moved
    };
    let selection = shift(start)..shift(end);

    CommentToggle {
        text: out,
        selection,
        commented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a"), 1);
        assert_eq!(line_count("a\n"), 2);
        assert_eq!(line_count("a\nb\nc"), 3);
    }

    #[test]
    fn test_line_label() {
        assert_eq!(line_label(1), "1 line");
        assert_eq!(line_label(7), "7 lines");
    }

    #[test]
    fn test_gutter() {
        let lines = LineNumbers::for_text("a\nb\nc");
        assert_eq!(lines.count, 3);
        assert_eq!(lines.gutter, "1\n2\n3\n");
        assert_eq!(lines.label(), "3 lines");
    }

    #[test]
    fn test_line_range() {
        let text = "one\ntwo\n\nfour";
        assert_eq!(line_range(text, 1), Some(0..3));
        assert_eq!(line_range(text, 2), Some(4..7));
        assert_eq!(line_range(text, 3), Some(8..8));
        assert_eq!(line_range(text, 4), Some(9..13));
        assert_eq!(line_range(text, 5), None);
        assert_eq!(line_range(text, 0), None);
    }

    // ========================================================================
    // Comment toggling
    // ========================================================================

    #[test]
    fn test_toggle_adds_comment_after_indent() {
        let text = "a;\n    let x = 1;\nb;";
        let result = toggle_line_comment(text, 10..10);
        assert_eq!(result.text, "a;\n    // let x = 1;\nb;");
        assert_eq!(result.selection, 13..13);
        assert!(result.commented);
    }

    #[test]
    fn test_toggle_removes_comment_and_one_space() {
        let text = "    //  let x = 1;";
        let result = toggle_line_comment(text, 8..8);
        assert_eq!(result.text, "     let x = 1;");
        assert_eq!(result.selection, 5..5);
        assert!(!result.commented);
    }

    #[test]
    fn test_toggle_round_trip() {
        let text = "first\nsecond\nthird";
        let on = toggle_line_comment(text, 8..8);
        assert_eq!(on.text, "first\n// second\nthird");
        let off = toggle_line_comment(&on.text, on.selection);
        assert_eq!(off.text, text);
        assert_eq!(off.selection, 8..8);
    }

    #[test]
    fn test_toggle_treats_selected_lines_as_one_block() {
        let result = toggle_line_comment("a\nb\nc", 0..3);
        assert_eq!(result.text, "// a\nb\nc");
        assert_eq!(result.selection, 3..6);

        let off = toggle_line_comment("// a\n// b", 0..8);
        assert_eq!(off.text, "a\n// b");
    }

    #[test]
    fn test_toggle_uncomment_never_moves_before_line() {
        let result = toggle_line_comment("x\n// y", 2..2);
        assert_eq!(result.text, "x\ny");
        assert_eq!(result.selection, 2..2);
    }
}
