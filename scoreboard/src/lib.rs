pub mod error;
pub mod framework;
pub mod prelude;
pub mod runtime;

pub use runtime::coordinator::Coordinator;
#[cfg(feature = "desktop")]
pub use runtime::desktop::run;
