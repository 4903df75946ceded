//! Syntax highlighting update handlers
//!
//! Handles syntax-related messages for the Elm architecture.

use crate::commands::Cmd;
use crate::messages::SyntaxMsg;
use crate::model::AppModel;
use crate::overlay::HighlightOutcome;

/// Handle syntax-related messages
pub fn update_syntax(model: &mut AppModel, msg: SyntaxMsg) -> Option<Cmd> {
    match msg {
        SyntaxMsg::HighlightReady => {
            let outcome = model.refresh_highlight();
            tracing::debug!(
                "update_syntax: HighlightReady for doc={:?} -> {:?}",
                model.documents.active_id(),
                outcome
            );
            Some(Cmd::Redraw)
        }

        SyntaxMsg::RefreshLineNumbers => {
            model.refresh_line_numbers();
            Some(Cmd::Redraw)
        }

        SyntaxMsg::SetEnabled(enabled) => set_enabled(model, enabled),

        SyntaxMsg::Toggle => {
            let enabled = !model.config.syntax_enabled;
            set_enabled(model, enabled)
        }
    }
}

fn set_enabled(model: &mut AppModel, enabled: bool) -> Option<Cmd> {
    if model.config.syntax_enabled == enabled {
        return None;
    }
    model.config.syntax_enabled = enabled;
    let outcome = model.refresh_highlight();
    if let HighlightOutcome::Disabled(reason) = outcome {
        tracing::debug!("Syntax highlighting off ({:?})", reason);
    }
    Some(Cmd::Redraw)
}
