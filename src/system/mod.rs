//! System-level modules
//!
//! This module contains process-wide setup shared by every command:
//! - Logging initialization

pub mod logging;

pub use logging::init_logging;
