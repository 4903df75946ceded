//! Application model - the complete state of one editor session
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod history;
pub mod lines;
pub mod search;
pub mod status;

pub use document::{Document, DocumentId, Documents, NEW_FILE_CONTENT};
pub use history::{SnapshotHistory, DEFAULT_HISTORY_LIMIT};
pub use lines::{line_count, line_label, line_range, toggle_line_comment, LineNumbers};
pub use search::SearchState;
pub use status::{Status, StatusKind};

use crate::config::EditorConfig;
use crate::overlay::{render_highlight, EditorSurface, HighlightOutcome, HighlightOverlay};
use crate::storage::{StoredFile, WorkspaceSnapshot};
use crate::syntax::{shared_tokenizers, LanguageId};

/// Name of the buffer a fresh session starts with
pub const WELCOME_FILE_NAME: &str = "welcome.js";

pub const WELCOME_CONTENT: &str = r#"// Welcome to Clearcode
console.log("Hello World!");

function greet(name) {
    return "Hello, " + name + "!";
}

greet("Developer");"#;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Open documents; the active one mirrors `surface.text`
    pub documents: Documents,
    /// Editable plain-text surface
    pub surface: EditorSurface,
    /// Highlight overlay stacked on the surface
    pub overlay: HighlightOverlay,
    /// Line-number gutter
    pub lines: LineNumbers,
    pub status: Status,
    pub search: SearchState,
    pub config: EditorConfig,
    /// Outcome of the most recent highlight pass
    pub last_highlight: Option<HighlightOutcome>,
}

impl AppModel {
    /// Create a session holding only the welcome buffer
    pub fn new(config: EditorConfig) -> Self {
        let mut model = Self::empty(config);
        let id = model.documents.create(
            Some(WELCOME_FILE_NAME.to_string()),
            Some(WELCOME_CONTENT.to_string()),
        );
        model.activate(id);
        model
    }

    /// Create a session with no documents at all
    pub fn empty(config: EditorConfig) -> Self {
        Self {
            documents: Documents::new(config.history_limit),
            surface: EditorSurface::default(),
            overlay: HighlightOverlay::default(),
            lines: LineNumbers::for_text(""),
            status: Status::ready(),
            search: SearchState::default(),
            config,
            last_highlight: None,
        }
    }

    #[inline]
    pub fn active_document(&self) -> Option<&Document> {
        self.documents.active()
    }

    #[inline]
    pub fn active_document_mut(&mut self) -> Option<&mut Document> {
        self.documents.active_mut()
    }

    pub fn active_language(&self) -> LanguageId {
        self.active_document()
            .map(|d| d.language)
            .unwrap_or_default()
    }

    /// Live text of the editable surface
    #[inline]
    pub fn text(&self) -> &str {
        &self.surface.text
    }

    /// Copy the live surface text into the active document
    pub fn store_surface_text(&mut self) {
        let text = self.surface.text.clone();
        if let Some(doc) = self.documents.active_mut() {
            if doc.content != text {
                doc.content = text;
                doc.dirty = true;
            }
        }
    }

    /// Replace the buffer text in both the surface and the active document
    pub fn set_text(&mut self, text: String) {
        if let Some(doc) = self.documents.active_mut() {
            doc.content.clone_from(&text);
            doc.dirty = true;
        }
        self.surface.set_text(text);
    }

    /// Make `id` the active document and show it immediately.
    ///
    /// The outgoing document keeps the current surface text. Line numbers
    /// and highlighting are refreshed right away, not debounced.
    pub fn activate(&mut self, id: DocumentId) -> bool {
        if !self.documents.contains(id) {
            return false;
        }
        self.store_surface_text();
        self.documents.set_active(id);

        let content = self
            .documents
            .get(id)
            .map(|d| d.content.clone())
            .unwrap_or_default();
        self.surface.set_text(content);
        self.surface.select(0..0);

        self.refresh_line_numbers();
        self.refresh_highlight();
        true
    }

    pub fn refresh_line_numbers(&mut self) {
        self.lines.refresh(&self.surface.text);
        self.lines.scroll_top = self.surface.scroll.top;
    }

    /// Run a highlight pass over the live text right now
    pub fn refresh_highlight(&mut self) -> HighlightOutcome {
        let language = self.active_language();
        let text = self.surface.text.clone();
        let outcome = render_highlight(
            Some(&mut self.overlay),
            Some(&mut self.surface),
            &text,
            language,
            self.config.syntax_enabled,
            shared_tokenizers(),
        );
        self.last_highlight = Some(outcome);
        outcome
    }

    pub fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Status::new(message, kind);
    }

    /// Persistable view of every open document
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let active = self.documents.active_id();
        WorkspaceSnapshot {
            files: self
                .documents
                .iter()
                .map(|doc| StoredFile {
                    id: doc.id,
                    name: doc.name.clone(),
                    // The active buffer's live text wins over a stale copy
                    content: if Some(doc.id) == active {
                        self.surface.text.clone()
                    } else {
                        doc.content.clone()
                    },
                })
                .collect(),
            active_id: active,
        }
    }

    /// Replace all documents with a stored workspace.
    ///
    /// Returns false and changes nothing when the snapshot has no files.
    /// Activates the stored active id, or the first file when that id is
    /// missing.
    pub fn restore(&mut self, snapshot: WorkspaceSnapshot) -> bool {
        let Some(first) = snapshot.files.first().map(|f| f.id) else {
            return false;
        };

        self.documents.clear();
        for file in snapshot.files {
            self.documents.insert_with_id(file.id, file.name, file.content);
        }

        let active = snapshot
            .active_id
            .filter(|id| self.documents.contains(*id))
            .unwrap_or(first);
        self.activate(active);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_shows_welcome_file() {
        let model = AppModel::new(EditorConfig::default());
        let doc = model.active_document().unwrap();
        assert_eq!(doc.name, WELCOME_FILE_NAME);
        assert_eq!(doc.language, LanguageId::JavaScript);
        assert_eq!(model.text(), WELCOME_CONTENT);
        assert_eq!(model.lines.count, 8);
        assert!(model.surface.highlight_enabled);
        assert!(model.overlay.markup.contains("token-comment"));
        assert!(model.status.is_ready());
    }

    #[test]
    fn test_activate_stores_outgoing_text() {
        let mut model = AppModel::new(EditorConfig::default());
        let welcome = model.documents.active_id().unwrap();
        let other = model.documents.create(Some("b.css".into()), Some("a { color: red; }".into()));

        model.surface.set_text("edited".into());
        assert!(model.activate(other));
        assert_eq!(model.documents.get(welcome).unwrap().content, "edited");
        assert_eq!(model.text(), "a { color: red; }");
        assert!(model.overlay.markup.contains("token-property"));
    }

    #[test]
    fn test_restore_empty_snapshot_keeps_welcome() {
        let mut model = AppModel::new(EditorConfig::default());
        assert!(!model.restore(WorkspaceSnapshot::default()));
        assert_eq!(model.active_document().unwrap().name, WELCOME_FILE_NAME);
    }

    #[test]
    fn test_restore_falls_back_to_first_file() {
        let mut model = AppModel::new(EditorConfig::default());
        let snapshot = WorkspaceSnapshot {
            files: vec![
                StoredFile {
                    id: DocumentId(7),
                    name: "a.html".into(),
                    content: "<p>hi</p>".into(),
                },
                StoredFile {
                    id: DocumentId(9),
                    name: "b.js".into(),
                    content: "let b;".into(),
                },
            ],
            active_id: Some(DocumentId(99)),
        };

        assert!(model.restore(snapshot));
        assert_eq!(model.documents.len(), 2);
        assert_eq!(model.documents.active_id(), Some(DocumentId(7)));
        assert_eq!(model.text(), "<p>hi</p>");
        assert_eq!(model.documents.next_id(), DocumentId(10));
    }

    #[test]
    fn test_snapshot_uses_live_text() {
        let mut model = AppModel::new(EditorConfig::default());
        model.surface.set_text("live".into());
        let snapshot = model.snapshot();
        assert_eq!(snapshot.files.len(), 1);
        assert_eq!(snapshot.files[0].content, "live");
        assert_eq!(snapshot.active_id, model.documents.active_id());
    }
}
