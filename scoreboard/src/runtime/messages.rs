use serde::{Deserialize, Serialize};

use super::menu::Accelerator;
use crate::error::MessageError;

/// Typed form of the integer `shutdown` payload sent by window content.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(try_from = "i64", into = "i64")]
pub enum ShutdownCommand {
    /// `-2`: put away the pending confirmation prompt and cancel it.
    Minimize,
    /// `-1`: destroy the sending window.
    DestroySelf,
    /// `0`: destroy everything and terminate.
    QuitAll,
    DestroyIndex(usize),
}

impl TryFrom<i64> for ShutdownCommand {
    type Error = MessageError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            -2 => Ok(Self::Minimize),
            -1 => Ok(Self::DestroySelf),
            0 => Ok(Self::QuitAll),
            n if n > 0 => usize::try_from(n)
                .map(Self::DestroyIndex)
                .map_err(|_| MessageError::InvalidShutdownCode(n)),
            n => Err(MessageError::InvalidShutdownCode(n)),
        }
    }
}

impl From<ShutdownCommand> for i64 {
    fn from(command: ShutdownCommand) -> Self {
        match command {
            ShutdownCommand::Minimize => -2,
            ShutdownCommand::DestroySelf => -1,
            ShutdownCommand::QuitAll => 0,
            ShutdownCommand::DestroyIndex(n) => {
                i64::try_from(n).unwrap_or(i64::MAX)
            }
        }
    }
}

/// Window content -> coordinator.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum InboundMessage {
    CreateScoreboard,
    Shutdown(ShutdownCommand),
    Close(usize),
    OpenAbout,
    /// Key press caught by the page, looked up in the sender's menu.
    Accelerator(Accelerator),
}

/// Coordinator -> window content.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
pub enum OutboundMessage {
    TitleSet(String),
    CreateScoreboard(usize),
    DestroyScoreboard(usize),
}

pub fn parse_window_message(message: &str) -> Result<InboundMessage, MessageError> {
    serde_json::from_str(message).map_err(|source| MessageError::Parse {
        message: message.to_string(),
        source,
    })
}

pub fn to_window_message(message: &OutboundMessage) -> Result<String, MessageError> {
    serde_json::to_string(message).map_err(MessageError::Serialize)
}

/// Script that hands `message` to the page's `message` listeners.
pub fn to_window_script(message: &OutboundMessage) -> Result<String, MessageError> {
    Ok(format!(
        "window.postMessage({}, '*');",
        to_window_message(message)?
    ))
}
