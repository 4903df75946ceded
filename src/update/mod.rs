//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. None of them
//! sleep or touch the disk; delays and writes are returned as [`Cmd`]s for
//! the runtime to carry out.

mod app;
mod document;
mod editor;
mod history;
mod search;
mod syntax;

use tracing::{debug, span, Level};

use crate::commands::Cmd;
use crate::messages::{AppMsg, DocumentMsg, EditorMsg, HistoryMsg, Msg, SearchMsg};
use crate::model::AppModel;
use crate::scheduler::TaskKey;

pub use app::update_app;
pub use document::update_document;
pub use editor::{schedule_edit_tasks, update_editor};
pub use history::update_history;
pub use search::update_search;
pub use syntax::update_syntax;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let status_before = model.status.clone();

    let result = match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Document(m) => document::update_document(model, m),
        Msg::History(m) => history::update_history(model, m),
        Msg::Syntax(m) => syntax::update_syntax(model, m),
        Msg::Search(m) => search::update_search(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    if model.status != status_before && model.status.kind.is_transient() {
        let clear = Cmd::debounce(
            TaskKey::StatusClear,
            model.config.delays.for_task(TaskKey::StatusClear),
            Msg::App(AppMsg::ClearStatus),
        );
        return Some(result.unwrap_or_default().and(clear));
    }

    result
}

/// Short display name for a message, e.g. `Editor::Scrolled(..)`.
///
/// Variants that carry buffer text or whole workspaces log their name only,
/// so nothing is formatted in proportion to the document size.
fn msg_type_name(msg: &Msg) -> String {
    let bare = match msg {
        Msg::Editor(EditorMsg::TextChanged(_)) => "Editor::TextChanged",
        Msg::Document(DocumentMsg::New { .. }) => "Document::New",
        Msg::Document(DocumentMsg::Open { .. }) => "Document::Open",
        Msg::Document(DocumentMsg::Rename(_)) => "Document::Rename",
        Msg::History(HistoryMsg::Snapshot { document_id, .. }) => {
            return format!("History::Snapshot({})", document_id.0);
        }
        Msg::Search(SearchMsg::SetQuery(_)) => "Search::SetQuery",
        Msg::Search(SearchMsg::SetReplacement(_)) => "Search::SetReplacement",
        Msg::App(AppMsg::Restore(_)) => "App::Restore",
        Msg::Editor(m) => return format!("Editor::{:?}", m),
        Msg::Document(m) => return format!("Document::{:?}", m),
        Msg::History(m) => return format!("History::{:?}", m),
        Msg::Syntax(m) => return format!("Syntax::{:?}", m),
        Msg::Search(m) => return format!("Search::{:?}", m),
        Msg::App(m) => return format!("App::{:?}", m),
    };
    bare.to_string()
}
