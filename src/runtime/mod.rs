//! Runtime - owns the model and carries out commands
//!
//! - [`Runtime`] runs `update`, keeps the debounce timers and performs saves
//! - `watch` - file watching for the binary's `--watch` mode
//!
//! Everything happens on the caller's thread. Time is passed in explicitly:
//! callers hand in `now` when dispatching and call [`Runtime::advance`] once
//! [`Runtime::next_deadline`] has passed.

pub mod watch;

use std::collections::VecDeque;
use std::time::Instant;

use anyhow::Result;

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg};
use crate::model::AppModel;
use crate::scheduler::{Debouncer, TaskKey};
use crate::storage::{WorkspaceSnapshot, WorkspaceStore};
use crate::update::update;

pub use watch::FileWatcher;

/// One editor session: the model, its timers and where it saves
pub struct Runtime {
    pub model: AppModel,
    scheduler: Debouncer<TaskKey, Msg>,
    store: Option<WorkspaceStore>,
    redraw_requested: bool,
}

impl Runtime {
    /// `store` is where workspace saves go; without one, saves fail with a
    /// status message.
    pub fn new(model: AppModel, store: Option<WorkspaceStore>) -> Self {
        Self {
            model,
            scheduler: Debouncer::new(),
            store,
            redraw_requested: true,
        }
    }

    pub fn store(&self) -> Option<&WorkspaceStore> {
        self.store.as_ref()
    }

    /// Restore the stored workspace, if any. Returns whether documents were
    /// replaced.
    pub fn restore(&mut self, now: Instant) -> Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let Some(snapshot) = store.load()? else {
            return Ok(false);
        };
        if snapshot.is_empty() {
            return Ok(false);
        }
        self.dispatch(Msg::App(AppMsg::Restore(snapshot)), now);
        Ok(true)
    }

    /// Run `msg` and everything it triggers synchronously
    pub fn dispatch(&mut self, msg: Msg, now: Instant) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd, now, &mut queue);
            }
        }
    }

    fn process_cmd(&mut self, cmd: Cmd, now: Instant, queue: &mut VecDeque<Msg>) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraw_requested = true,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, now, queue);
                }
            }
            Cmd::Debounce { key, delay, msg } => {
                tracing::trace!(?key, ?delay, "debounce scheduled");
                self.scheduler.schedule(now, key, delay, *msg);
            }
            Cmd::CancelDebounce(key) => {
                if self.scheduler.cancel(&key).is_some() {
                    tracing::debug!(?key, "debounce cancelled");
                }
            }
            Cmd::SaveWorkspace(snapshot) => {
                let result = self.save(&snapshot);
                queue.push_back(Msg::App(AppMsg::SaveCompleted(result)));
            }
        }
    }

    fn save(&self, snapshot: &WorkspaceSnapshot) -> Result<(), String> {
        let Some(store) = &self.store else {
            return Err("No workspace location configured".to_string());
        };
        store.save(snapshot).map_err(|e| format!("{:#}", e))
    }

    /// Deliver every debounced message due at `now`, in deadline order.
    /// Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        let fired = due.len();
        for (key, msg) in due {
            tracing::debug!(?key, "debounce fired");
            self.dispatch(msg, now);
        }
        fired
    }

    /// When the next debounced message is due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.scheduler.is_pending(&key)
    }

    /// No debounced work is waiting
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }

    /// Whether anything asked for a redraw since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Sleep through pending deadlines until `key` has nothing pending
    pub fn run_until_settled(&mut self, key: TaskKey) {
        while self.is_pending(key) {
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.advance(Instant::now());
        }
    }
}
