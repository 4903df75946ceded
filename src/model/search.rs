//! Literal find & replace over the active buffer

use std::ops::Range;

use regex::{NoExpand, Regex, RegexBuilder};

/// Find/replace panel state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub open: bool,
    pub query: String,
    pub replacement: String,
    pub match_case: bool,
    /// Byte ranges of every match in the last searched text
    pub matches: Vec<Range<usize>>,
    /// Index into `matches` of the selected match
    pub current: Option<usize>,
    /// Set when the query could not be compiled
    pub invalid: bool,
    pattern: Option<Regex>,
}

impl SearchState {
    fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&regex::escape(&self.query))
            .case_insensitive(!self.match_case)
            .build()
    }

    /// Find every match of the query in `text`, selecting the first one.
    /// An empty query clears all matches.
    pub fn search(&mut self, text: &str) {
        self.matches.clear();
        self.current = None;
        self.invalid = false;
        self.pattern = None;

        if self.query.is_empty() {
            return;
        }

        match self.compile() {
            Ok(pattern) => {
                self.matches = pattern.find_iter(text).map(|m| m.range()).collect();
                self.pattern = Some(pattern);
                if !self.matches.is_empty() {
                    self.current = Some(0);
                }
            }
            Err(e) => {
                tracing::warn!("Invalid search query {:?}: {}", self.query, e);
                self.invalid = true;
            }
        }
    }

    pub fn current_match(&self) -> Option<Range<usize>> {
        self.current.and_then(|i| self.matches.get(i).cloned())
    }

    /// Advance to the next match, wrapping to the first
    pub fn next(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.matches.len());
        self.current = Some(next);
        self.current_match()
    }

    /// Step back to the previous match, wrapping to the last
    pub fn previous(&mut self) -> Option<Range<usize>> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let prev = match self.current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.current = Some(prev);
        self.current_match()
    }

    /// Re-run the query over `text`, keeping the selected index when it is
    /// still in range. Matches go stale whenever the buffer changes.
    pub fn refresh(&mut self, text: &str) {
        let index = self.current;
        self.search(text);
        if let Some(index) = index {
            if !self.matches.is_empty() {
                self.current = Some(index.min(self.matches.len() - 1));
            }
        }
    }

    /// Replace the selected match in `text`, returning the new text.
    ///
    /// Matches are refreshed against `text` first, then recomputed
    /// afterwards; the selection stays at the same index, wrapping to the
    /// first match when it fell off the end.
    pub fn replace_current(&mut self, text: &str) -> Option<String> {
        self.refresh(text);
        let index = self.current?;
        let range = self.matches.get(index)?.clone();
        let before = text.get(..range.start)?;
        let after = text.get(range.end..)?;

        let mut out = String::with_capacity(text.len() + self.replacement.len());
        out.push_str(before);
        out.push_str(&self.replacement);
        out.push_str(after);

        self.search(&out);
        if !self.matches.is_empty() {
            self.current = Some(if index >= self.matches.len() { 0 } else { index });
        }
        Some(out)
    }

    /// Replace every match in `text`. Returns the new text and the number of
    /// replacements, or `None` when nothing matched.
    pub fn replace_all(&mut self, text: &str) -> Option<(String, usize)> {
        self.refresh(text);
        let count = self.matches.len();
        if count == 0 {
            return None;
        }
        let pattern = self.pattern.clone()?;
        let out = pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned();
        self.search(&out);
        Some((out, count))
    }

    /// Forget matches and close the panel. The query is kept for next time.
    pub fn close(&mut self) {
        self.open = false;
        self.matches.clear();
        self.current = None;
        self.pattern = None;
    }

    /// Match counter text, e.g. "2 of 5"
    pub fn label(&self) -> String {
        if self.invalid {
            return "Invalid search".to_string();
        }
        match self.current {
            Some(i) if !self.matches.is_empty() => format!("{} of {}", i + 1, self.matches.len()),
            _ => "No results".to_string(),
        }
    }
}

/// "Replaced 1 occurrence" / "Replaced 4 occurrences"
pub fn replaced_message(count: usize) -> String {
    if count == 1 {
        "Replaced 1 occurrence".to_string()
    } else {
        format!("Replaced {} occurrences", count)
    }
}
