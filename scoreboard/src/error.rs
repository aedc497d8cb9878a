use thiserror::Error;

use crate::runtime::events::WindowId;

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("no live scoreboard with number {0}")]
    UnknownWindowIndex(usize),

    #[error("{0} is not tracked by the registry")]
    UnknownWindow(WindowId),

    #[error("control window already exists")]
    DuplicateControlWindow,

    #[error("close confirmation already pending for {0}")]
    ConfirmationAlreadyPending(WindowId),

    #[error("no close confirmation is pending")]
    NoPendingConfirmation,

    #[error("control window has not been created yet")]
    ControlWindowMissing,

    #[error("window host error: {0}")]
    Host(#[from] HostError),
}

impl CoordinatorError {
    /// Programming errors and host failures are logged as errors; the rest
    /// are stale or out-of-range requests that only warrant a warning.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateControlWindow | Self::Host(_))
    }
}

#[derive(Error, Debug)]
pub enum HostError {
    #[error("host has no window {0}")]
    UnknownWindow(WindowId),

    #[error("failed to build window: {0}")]
    WindowBuild(String),

    #[error("web view error: {0}")]
    WebView(String),

    #[error("content unavailable: {0}")]
    Content(String),

    #[error("event loop closed")]
    EventLoopClosed,

    #[error(transparent)]
    Message(#[from] MessageError),
}

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("invalid window message '{message}': {source}")]
    Parse {
        message: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize window message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid shutdown code {0}")]
    InvalidShutdownCode(i64),

    #[error("unknown accelerator key '{0}'")]
    UnknownKey(String),
}
