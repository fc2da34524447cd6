//! Channelizer - marketing channel attribution for web-tracking logs
//!
//! This library fetches tracking events from an analytics API, classifies each
//! event into exactly one marketing channel and loads raw and derived rows into
//! a relational store with a per-channel aggregation view.
//!
//! # Architecture
//! - `attribution`: URL query decomposition and the ordered channel rules
//! - `tracking`: tracking events and their storage rows
//! - `fetch`: paginated log retrieval
//! - `storage`: SeaORM persistence (full refresh + aggregation view)
//! - `pipeline`: fetch → classify → store orchestration
//! - `config`: TOML/environment configuration
//! - `interfaces`: command-line handlers
//! - `system`: logging

pub mod attribution;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod interfaces;
pub mod pipeline;
pub mod storage;
pub mod system;
pub mod tracking;
pub mod utils;
