//! Find & replace handlers

use crate::commands::Cmd;
use crate::messages::SearchMsg;
use crate::model::search::replaced_message;
use crate::model::{AppModel, StatusKind};

use super::editor::schedule_edit_tasks;

/// Handle find & replace messages
pub fn update_search(model: &mut AppModel, msg: SearchMsg) -> Option<Cmd> {
    match msg {
        SearchMsg::Open => {
            model.search.open = true;
            if !model.search.query.is_empty() {
                run_search(model);
            }
            Some(Cmd::Redraw)
        }

        SearchMsg::SetQuery(query) => {
            model.search.query = query;
            run_search(model);
            Some(Cmd::Redraw)
        }

        SearchMsg::SetReplacement(replacement) => {
            model.search.replacement = replacement;
            None
        }

        SearchMsg::SetMatchCase(match_case) => {
            model.search.match_case = match_case;
            run_search(model);
            Some(Cmd::Redraw)
        }

        SearchMsg::FindNext => {
            if model.search.matches.is_empty() {
                run_search(model);
                return Some(Cmd::Redraw);
            }
            model.search.refresh(&model.surface.text);
            if let Some(range) = model.search.next() {
                model.surface.select(range);
            }
            Some(Cmd::Redraw)
        }

        SearchMsg::FindPrevious => {
            if model.search.matches.is_empty() {
                run_search(model);
                return Some(Cmd::Redraw);
            }
            model.search.refresh(&model.surface.text);
            if let Some(range) = model.search.previous() {
                model.surface.select(range);
            }
            Some(Cmd::Redraw)
        }

        SearchMsg::ReplaceNext => {
            let text = model.surface.text.clone();
            let replaced = model.search.replace_current(&text)?;
            model.set_text(replaced);
            if let Some(range) = model.search.current_match() {
                model.surface.select(range);
            }
            model.refresh_line_numbers();
            let cmd = schedule_edit_tasks(model);
            model.set_status(replaced_message(1), StatusKind::Success);
            Some(cmd.and(Cmd::Redraw))
        }

        SearchMsg::ReplaceAll => {
            let text = model.surface.text.clone();
            let (replaced, count) = model.search.replace_all(&text)?;
            model.set_text(replaced);
            model.refresh_line_numbers();
            let cmd = schedule_edit_tasks(model);
            model.set_status(replaced_message(count), StatusKind::Success);
            Some(cmd.and(Cmd::Redraw))
        }

        SearchMsg::Close => {
            model.search.close();
            Some(Cmd::Redraw)
        }
    }
}

/// Search the live text and select the first match
fn run_search(model: &mut AppModel) {
    model.search.search(&model.surface.text);
    if let Some(range) = model.search.current_match() {
        model.surface.select(range);
    }
    tracing::debug!(
        "Search {:?}: {}",
        model.search.query,
        model.search.label()
    );
}
