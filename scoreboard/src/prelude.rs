pub use crate::error::{CoordinatorError, HostError, MessageError};
pub use crate::framework::config::{AppConfig, Args};
pub use crate::framework::logging::init_logger;
pub use crate::framework::logging::{debug, error, info, trace, warn};
pub use crate::runtime::close_gate::{CloseGate, GateState};
pub use crate::runtime::coordinator::Coordinator;
pub use crate::runtime::events::{ConfirmChoice, HostEvent, WindowId};
pub use crate::runtime::host::{
    AboutInfo, ConfirmPrompt, ContentRef, WindowHost, WindowOptions,
};
pub use crate::runtime::menu::{Accelerator, Key, MenuCommand, MenuRole};
pub use crate::runtime::messages::{
    InboundMessage, OutboundMessage, ShutdownCommand, parse_window_message,
};
pub use crate::runtime::recording_host::{HostCall, RecordingHost};
pub use crate::runtime::registry::{WindowRegistry, WindowRole};
