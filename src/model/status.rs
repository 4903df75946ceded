//! Status line message

/// Text shown when nothing else is going on
pub const READY: &str = "Ready";

/// Visual category of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Saving,
    Success,
    Error,
}

impl StatusKind {
    /// Success and error messages fall back to "Ready" after a while
    pub fn is_transient(&self) -> bool {
        matches!(self, StatusKind::Success | StatusKind::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Default for Status {
    fn default() -> Self {
        Self::ready()
    }
}

impl Status {
    pub fn ready() -> Self {
        Self {
            message: READY.to_string(),
            kind: StatusKind::Info,
        }
    }

    pub fn new(message: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.kind == StatusKind::Info && self.message == READY
    }
}
