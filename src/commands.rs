//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::time::Duration;

use crate::messages::Msg;
use crate::scheduler::TaskKey;
use crate::storage::WorkspaceSnapshot;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the surface, overlay and gutter
    Redraw,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Deliver `msg` once `delay` passes without another debounce under `key`
    Debounce {
        key: TaskKey,
        delay: Duration,
        msg: Box<Msg>,
    },
    /// Drop whatever is pending under `key`
    CancelDebounce(TaskKey),
    /// Write the workspace; the result comes back as `AppMsg::SaveCompleted`
    SaveWorkspace(WorkspaceSnapshot),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn debounce(key: TaskKey, delay: Duration, msg: Msg) -> Self {
        Cmd::Debounce {
            key,
            delay,
            msg: Box::new(msg),
        }
    }

    /// Append another command, flattening into a batch
    pub fn and(self, other: Cmd) -> Cmd {
        match (self, other) {
            (Cmd::None, cmd) | (cmd, Cmd::None) => cmd,
            (Cmd::Batch(mut cmds), cmd) => {
                cmds.push(cmd);
                Cmd::Batch(cmds)
            }
            (cmd, other) => Cmd::Batch(vec![cmd, other]),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // The delivered message decides when it fires
            Cmd::Debounce { .. } => false,
            Cmd::CancelDebounce(_) => false,
            Cmd::SaveWorkspace(_) => false,
        }
    }

    /// Keys scheduled anywhere inside this command
    pub fn debounced_keys(&self) -> Vec<TaskKey> {
        match self {
            Cmd::Debounce { key, .. } => vec![*key],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.debounced_keys()).collect(),
            _ => Vec::new(),
        }
    }
}
