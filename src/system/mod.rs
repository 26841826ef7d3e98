//! System-level modules
//!
//! Process-wide setup that is not part of the shortener itself.

pub mod logging;

pub use logging::init_logging;
