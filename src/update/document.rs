//! Document list handlers: create, open, switch, close, rename

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::{AppModel, DocumentId, StatusKind};

/// Handle document list messages
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::New { name, content } => {
            let id = model.documents.create(name, content);
            model.activate(id);
            model.set_status("New file created", StatusKind::Success);
            Some(Cmd::Redraw)
        }

        DocumentMsg::Open { name, content } => {
            let id = model.documents.create(Some(name), Some(content));
            model.activate(id);
            model.set_status("File opened", StatusKind::Success);
            Some(Cmd::Redraw)
        }

        DocumentMsg::SwitchTo(id) => {
            if model.documents.active_id() == Some(id) {
                return None;
            }
            if !model.activate(id) {
                tracing::warn!("update_document: no document {} to switch to", id);
                return None;
            }
            Some(Cmd::Redraw)
        }

        DocumentMsg::Close(id) => close_document(model, id),

        DocumentMsg::CloseActive => {
            let id = model.documents.active_id()?;
            close_document(model, id)
        }

        DocumentMsg::Rename(name) => rename_active(model, &name),

        DocumentMsg::SetLanguage(language) => {
            let doc = model.documents.active_mut()?;
            if doc.language == language {
                return None;
            }
            doc.language = language;
            model.refresh_highlight();
            Some(Cmd::Redraw)
        }
    }
}

/// Remove a document. Closing the active one moves to its previous
/// neighbour, or to a fresh file when it was the last.
fn close_document(model: &mut AppModel, id: DocumentId) -> Option<Cmd> {
    let was_active = model.documents.active_id() == Some(id);
    let (index, closed) = model.documents.remove(id)?;
    tracing::debug!("Closed {} ({})", closed.name, id);

    if was_active {
        let next = model
            .documents
            .at(index.saturating_sub(1))
            .map(|doc| doc.id);
        match next {
            Some(next) => {
                model.activate(next);
            }
            None => {
                let fresh = model.documents.create(None, None);
                model.activate(fresh);
                model.set_status("New file created", StatusKind::Success);
            }
        }
    }
    Some(Cmd::Redraw)
}

fn rename_active(model: &mut AppModel, name: &str) -> Option<Cmd> {
    let Some(doc) = model.documents.active_mut() else {
        model.set_status("No file open to rename", StatusKind::Error);
        return Some(Cmd::Redraw);
    };

    let name = name.trim();
    if name.is_empty() || name == doc.name {
        return None;
    }

    let old_language = doc.language;
    doc.rename(name.to_string());
    doc.dirty = true;
    tracing::debug!(
        "Renamed {} to {} ({:?} -> {:?})",
        doc.id,
        doc.name,
        old_language,
        doc.language
    );

    // The extension may have changed the language
    model.refresh_highlight();
    model.set_status(format!("File renamed to: {}", name), StatusKind::Success);
    Some(Cmd::Redraw)
}
