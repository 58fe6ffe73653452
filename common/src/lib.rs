//! Shared building blocks for `portsweep`.
//!
//! Holds the scan input model (address ranges and port lists), the runtime
//! [`config::Config`] and the logging macros used by every crate in the
//! workspace.

pub mod config;
pub mod error;
pub mod network;

/// Log target for status messages that should be rendered with the `[+]` symbol.
pub const SUCCESS_TARGET: &str = "portsweep::success";

#[doc(hidden)]
pub use tracing as __tracing;

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
