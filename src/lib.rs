//! Clearcode - regex syntax highlighting behind an Elm-style editor core
//!
//! This crate provides the tokenizers, the highlight overlay and the
//! debounced editor session (documents, history, search, auto-save) that
//! drive them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod output;
pub mod overlay;
pub mod runtime;
pub mod scheduler;
pub mod storage;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Runtime;
pub use theme::Theme;
