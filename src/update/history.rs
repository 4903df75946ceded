//! Undo/redo handlers

use crate::commands::Cmd;
use crate::messages::HistoryMsg;
use crate::model::{AppModel, StatusKind};
use crate::scheduler::TaskKey;

/// Handle history messages
pub fn update_history(model: &mut AppModel, msg: HistoryMsg) -> Option<Cmd> {
    match msg {
        HistoryMsg::Snapshot {
            document_id,
            content,
        } => {
            let Some(doc) = model.documents.get_mut(document_id) else {
                tracing::debug!("Dropping snapshot for closed document {}", document_id);
                return None;
            };
            if doc.history.record(&content) {
                tracing::debug!(
                    "Recorded snapshot {} for {}",
                    doc.history.index(),
                    document_id
                );
            }
            None
        }
        HistoryMsg::Undo => step(model, Step::Undo),
        HistoryMsg::Redo => step(model, Step::Redo),
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Undo,
    Redo,
}

fn step(model: &mut AppModel, step: Step) -> Option<Cmd> {
    let live = model.surface.text.clone();
    let doc = model.documents.active_mut()?;

    // An edit whose snapshot is still pending becomes its own undo step
    if let Step::Undo = step {
        doc.history.record(&live);
    }

    let restored = match step {
        Step::Undo => doc.history.undo(),
        Step::Redo => doc.history.redo(),
    }
    .map(str::to_owned);

    let Some(content) = restored else {
        let message = match step {
            Step::Undo => "Nothing to undo",
            Step::Redo => "Nothing to redo",
        };
        model.set_status(message, StatusKind::Error);
        return Some(Cmd::Redraw);
    };

    // set_text clamps the selection into the restored text
    model.set_text(content);
    let caret = model.surface.selection.start;
    model.surface.select(caret..caret);

    model.refresh_line_numbers();
    model.refresh_highlight();

    let message = match step {
        Step::Undo => "Undo",
        Step::Redo => "Redo",
    };
    model.set_status(message, StatusKind::Success);

    Some(Cmd::batch(vec![
        Cmd::CancelDebounce(TaskKey::HistorySnapshot),
        Cmd::Redraw,
    ]))
}
