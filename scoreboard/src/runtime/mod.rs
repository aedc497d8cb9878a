pub mod close_gate;
pub mod coordinator;
#[cfg(feature = "desktop")]
pub mod desktop;
pub mod events;
pub mod host;
pub mod menu;
pub mod messages;
pub mod recording_host;
pub mod registry;
