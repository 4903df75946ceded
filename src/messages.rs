//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::ops::Range;

use crate::model::DocumentId;
use crate::overlay::ScrollOffset;
use crate::storage::WorkspaceSnapshot;
use crate::syntax::LanguageId;

/// Editable surface events
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMsg {
    /// The buffer text changed (every keystroke, paste, cut)
    TextChanged(String),
    /// The surface scrolled; overlay and gutter follow synchronously
    Scrolled(ScrollOffset),
    /// Selection moved (byte range, caret when empty)
    SetSelection(Range<usize>),
    /// Toggle a `//` comment on the selected lines
    ToggleLineComment,
    /// Select a 1-based line
    GoToLine(usize),
}

/// Document list operations
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentMsg {
    /// Create a document; defaults to `untitled-{id}.txt` with a comment line
    New {
        name: Option<String>,
        content: Option<String>,
    },
    /// Open an existing file's contents as a new document
    Open { name: String, content: String },
    SwitchTo(DocumentId),
    Close(DocumentId),
    CloseActive,
    /// Rename the active document
    Rename(String),
    /// Override the language detected from the active document's name
    SetLanguage(LanguageId),
}

/// Undo/redo history
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryMsg {
    /// Debounced snapshot of a document's text at edit time
    Snapshot {
        document_id: DocumentId,
        content: String,
    },
    Undo,
    Redo,
}

/// Highlighting and gutter refreshes
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxMsg {
    /// Debounce elapsed; run a highlight pass over the live text
    HighlightReady,
    /// Debounce elapsed; rebuild the line-number gutter
    RefreshLineNumbers,
    SetEnabled(bool),
    Toggle,
}

/// Find & replace
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMsg {
    Open,
    SetQuery(String),
    SetReplacement(String),
    SetMatchCase(bool),
    FindNext,
    FindPrevious,
    ReplaceNext,
    ReplaceAll,
    Close,
}

/// Session-level messages
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Auto-save debounce elapsed
    AutoSaveReady,
    /// Save the workspace now
    SaveAll,
    ToggleAutoSave,
    /// Result of a workspace write
    SaveCompleted(Result<(), String>),
    /// Replace the open documents with a stored workspace
    Restore(WorkspaceSnapshot),
    /// Return a transient status to "Ready"
    ClearStatus,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Editor(EditorMsg),
    Document(DocumentMsg),
    History(HistoryMsg),
    Syntax(SyntaxMsg),
    Search(SearchMsg),
    App(AppMsg),
}
