//! linkpad - a small local URL shortener
//!
//! Turns long URLs into short codes, resolves codes while recording clicks,
//! reports statistics and sweeps expired codes. All state sits under one key
//! of a local key-value store; structured events are shipped to a remote
//! collector on a best-effort basis.
//!
//! # Architecture
//! - `storage`: key-value backends (file, memory) and the record schema
//! - `repository`: the URL registry (create, lookup, clicks, expiry)
//! - `services`: create / statistics / redirect flows built on the registry
//! - `remote_log`: fire-and-forget remote log sink
//! - `utils`: validation and shortcode generation
//! - `config`: TOML + environment configuration
//! - `interfaces`: command-line front end
//! - `system`: local logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod remote_log;
pub mod repository;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
