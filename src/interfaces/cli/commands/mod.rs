//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod config_gen;
mod open;
mod purge;
mod shorten;
mod stats;

pub use config_gen::*;
pub use open::*;
pub use purge::*;
pub use shorten::*;
pub use stats::*;
