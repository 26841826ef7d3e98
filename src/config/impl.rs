use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config` was never called.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Load configuration once and install it as the global instance.
///
/// `path` overrides the default `linkpad.toml`; an explicit path must exist.
/// Calling this again replaces the stored configuration.
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    let config = Arc::new(StaticConfig::load(path)?);
    CONFIG
        .get_or_init(|| ArcSwap::new(config.clone()))
        .store(config.clone());
    Ok(config)
}
