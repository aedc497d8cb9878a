use std::fmt;

use super::menu::MenuCommand;
use super::messages::InboundMessage;

/// Host-assigned identity of a window. Stable for the window's lifetime and
/// never reused by the hosts in this crate.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfirmChoice {
    Quit,
    Cancel,
}

/// Everything the coordination thread reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    AppReady,
    ReadyToShow(WindowId),
    CloseRequested(WindowId),
    /// The window went away without the coordinator asking for it.
    Destroyed(WindowId),
    Message {
        sender: WindowId,
        message: InboundMessage,
    },
    ConfirmationResolved {
        window: WindowId,
        choice: ConfirmChoice,
    },
    Menu {
        window: WindowId,
        command: MenuCommand,
    },
}
