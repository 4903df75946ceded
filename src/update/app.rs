//! Session-level handlers: saving, restoring, status

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{AppModel, Status, StatusKind};
use crate::scheduler::TaskKey;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::AutoSaveReady => {
            if !model.config.auto_save {
                tracing::debug!("Auto-save fired after being disabled, skipping");
                return None;
            }
            Some(Cmd::SaveWorkspace(model.snapshot()))
        }

        AppMsg::SaveAll => {
            model.set_status("Saving...", StatusKind::Saving);
            Some(Cmd::batch(vec![
                Cmd::CancelDebounce(TaskKey::AutoSave),
                Cmd::SaveWorkspace(model.snapshot()),
            ]))
        }

        AppMsg::ToggleAutoSave => {
            model.config.auto_save = !model.config.auto_save;
            let state = if model.config.auto_save {
                "enabled"
            } else {
                "disabled"
            };
            model.set_status(format!("Auto-save {}", state), StatusKind::Success);
            if model.config.auto_save {
                Some(Cmd::Redraw)
            } else {
                Some(Cmd::CancelDebounce(TaskKey::AutoSave).and(Cmd::Redraw))
            }
        }

        AppMsg::SaveCompleted(Ok(())) => {
            model.documents.mark_all_clean();
            model.set_status("Saved", StatusKind::Success);
            Some(Cmd::Redraw)
        }

        AppMsg::SaveCompleted(Err(e)) => {
            tracing::warn!("Workspace save failed: {}", e);
            model.set_status("Save failed", StatusKind::Error);
            Some(Cmd::Redraw)
        }

        AppMsg::Restore(snapshot) => {
            let count = snapshot.files.len();
            if !model.restore(snapshot) {
                tracing::debug!("Nothing to restore");
                return None;
            }
            tracing::info!("Restored {} files", count);
            Some(Cmd::Redraw)
        }

        AppMsg::ClearStatus => {
            if !model.status.kind.is_transient() {
                return None;
            }
            model.status = Status::ready();
            Some(Cmd::Redraw)
        }
    }
}
