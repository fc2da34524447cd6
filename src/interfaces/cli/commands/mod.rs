//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod classify;
mod config_gen;
mod report;
mod run;

pub use classify::*;
pub use config_gen::*;
pub use report::*;
pub use run::*;
