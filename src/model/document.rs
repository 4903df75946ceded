//! Open documents and their collection

use serde::{Deserialize, Serialize};

use super::history::SnapshotHistory;
use crate::syntax::LanguageId;

/// Content of a freshly created file
pub const NEW_FILE_CONTENT: &str = "// New file\n";

/// Unique identifier for a document. Ids only grow within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single open buffer
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub content: String,
    /// Detected from `name`, re-detected on rename
    pub language: LanguageId,
    pub history: SnapshotHistory,
    /// Edited since the workspace was last written
    pub dirty: bool,
}

impl Document {
    pub fn new(id: DocumentId, name: String, content: String, history_limit: usize) -> Self {
        let language = LanguageId::from_filename(&name);
        let history = SnapshotHistory::with_limit(content.as_str(), history_limit);
        Self {
            id,
            name,
            content,
            language,
            history,
            dirty: false,
        }
    }

    /// Set the name and re-detect the language
    pub fn rename(&mut self, name: String) {
        self.language = LanguageId::from_filename(&name);
        self.name = name;
    }
}

/// Ordered collection of open documents with one active entry
#[derive(Debug, Default)]
pub struct Documents {
    docs: Vec<Document>,
    active: Option<DocumentId>,
    next_id: u64,
    history_limit: usize,
}

impl Documents {
    pub fn new(history_limit: usize) -> Self {
        Self {
            docs: Vec::new(),
            active: None,
            next_id: 1,
            history_limit,
        }
    }

    fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a document and return its id. Does not activate it.
    ///
    /// Unnamed documents become `untitled-{id}.txt`; missing content becomes
    /// [`NEW_FILE_CONTENT`].
    pub fn create(&mut self, name: Option<String>, content: Option<String>) -> DocumentId {
        let id = self.allocate_id();
        let name = name.unwrap_or_else(|| format!("untitled-{}.txt", id.0));
        let content = content.unwrap_or_else(|| NEW_FILE_CONTENT.to_string());
        self.docs
            .push(Document::new(id, name, content, self.history_limit));
        id
    }

    /// Insert a document with a known id, as when restoring a workspace.
    /// Keeps the id counter above every inserted id.
    pub fn insert_with_id(&mut self, id: DocumentId, name: String, content: String) {
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
        self.docs
            .push(Document::new(id, name, content, self.history_limit));
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.docs.iter_mut().find(|d| d.id == id)
    }

    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.docs.iter().position(|d| d.id == id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Document> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Mark `id` as active. Returns false for unknown ids.
    pub fn set_active(&mut self, id: DocumentId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Remove a document, returning its former position and the document.
    /// Clears the active id when it pointed at the removed document.
    pub fn remove(&mut self, id: DocumentId) -> Option<(usize, Document)> {
        let index = self.index_of(id)?;
        let doc = self.docs.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        Some((index, doc))
    }

    /// Drop everything. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.docs.clear();
        self.active = None;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.docs.iter_mut()
    }

    pub fn at(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// The id the next created document will get
    pub fn next_id(&self) -> DocumentId {
        DocumentId(self.next_id)
    }

    pub fn is_dirty(&self) -> bool {
        self.docs.iter().any(|d| d.dirty)
    }

    pub fn mark_all_clean(&mut self) {
        for doc in &mut self.docs {
            doc.dirty = false;
        }
    }
}
