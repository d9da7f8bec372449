//! FILENAME: core/chart-engine/src/logging.rs
// PURPOSE: Category logging macros over the `log` facade.
// CONTEXT: The category becomes the log target ("AGG", "FILTER", "WIDGET"),
//          so hosts can filter engine chatter per subsystem. The engine never
//          installs a logger itself.

#[doc(hidden)]
pub use log;

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::log::warn!(target: $cat, $($arg)*)
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_info;
pub use log_warn;
