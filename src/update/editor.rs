//! Editable surface handlers: text changes, scrolling, selection

use std::ops::Range;

use crate::commands::Cmd;
use crate::messages::{AppMsg, EditorMsg, HistoryMsg, Msg, SyntaxMsg};
use crate::model::{line_range, toggle_line_comment, AppModel, StatusKind};
use crate::overlay::sync_scroll;
use crate::scheduler::TaskKey;

/// Handle editor surface messages
pub fn update_editor(model: &mut AppModel, msg: EditorMsg) -> Option<Cmd> {
    match msg {
        EditorMsg::TextChanged(text) => {
            // Persist first so a document switch before any timer fires
            // still sees the edit
            model.set_text(text);
            Some(schedule_edit_tasks(model))
        }

        EditorMsg::Scrolled(offset) => {
            model.surface.scroll = offset;
            sync_scroll(Some(&mut model.overlay), &model.surface);
            model.lines.scroll_top = offset.top;
            Some(Cmd::Redraw)
        }

        EditorMsg::SetSelection(range) => {
            let range = clamp_range(&model.surface.text, range);
            model.surface.select(range);
            Some(Cmd::Redraw)
        }

        EditorMsg::ToggleLineComment => {
            let toggled =
                toggle_line_comment(&model.surface.text, model.surface.selection.clone());
            model.set_text(toggled.text);
            model.surface.select(toggled.selection);
            model.refresh_line_numbers();
            Some(schedule_edit_tasks(model).and(Cmd::Redraw))
        }

        EditorMsg::GoToLine(line) => {
            match line_range(&model.surface.text, line) {
                Some(range) => {
                    model.surface.select(range);
                    model.set_status(format!("Jumped to line {}", line), StatusKind::Success);
                }
                None => model.set_status("Invalid line number", StatusKind::Error),
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Debounced follow-up work for an edit of the active document.
///
/// Schedules the gutter refresh, the highlight pass and the history
/// snapshot, plus the auto-save when it is enabled. Each is keyed, so a
/// burst of edits collapses into one run per task reflecting the last edit.
pub fn schedule_edit_tasks(model: &mut AppModel) -> Cmd {
    let delays = &model.config.delays;
    let mut cmds = vec![
        Cmd::debounce(
            TaskKey::LineNumbers,
            delays.for_task(TaskKey::LineNumbers),
            Msg::Syntax(SyntaxMsg::RefreshLineNumbers),
        ),
        Cmd::debounce(
            TaskKey::Highlight,
            delays.for_task(TaskKey::Highlight),
            Msg::Syntax(SyntaxMsg::HighlightReady),
        ),
    ];

    if let Some(document_id) = model.documents.active_id() {
        cmds.push(Cmd::debounce(
            TaskKey::HistorySnapshot,
            delays.for_task(TaskKey::HistorySnapshot),
            Msg::History(HistoryMsg::Snapshot {
                document_id,
                content: model.surface.text.clone(),
            }),
        ));
    }

    if model.config.auto_save {
        cmds.push(Cmd::debounce(
            TaskKey::AutoSave,
            delays.for_task(TaskKey::AutoSave),
            Msg::App(AppMsg::AutoSaveReady),
        ));
        model.set_status("Saving...", StatusKind::Saving);
    }

    Cmd::batch(cmds)
}

fn clamp_range(text: &str, range: Range<usize>) -> Range<usize> {
    let floor = |mut pos: usize| {
        pos = pos.min(text.len());
        while !text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    };
    let start = floor(range.start);
    let end = floor(range.end.max(range.start));
    start..end
}
