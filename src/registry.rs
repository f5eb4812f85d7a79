//! The default-document registry.
//!
//! Keys read and written without an explicit document go through a
//! [`DefaultConfig`]. Applications can own one and pass it around
//! (`Source::Registry` / `Target::Registry`), or use the process-wide instance
//! managed by [`set_default_config`] and friends (`Source::Global`).
//!
//! The slot is an `ArcSwapOption`: readers never block, and the last
//! [`set`](DefaultConfig::set) wins. Keyless operations lock the registered
//! document for the duration of one call, so a caller must not hold that lock
//! while performing them.

use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::ConfigError;
use crate::file::ConfigFile;

/// A config file that can be shared between threads and registered as the
/// default document.
pub type SharedConfigFile = Arc<Mutex<ConfigFile>>;

#[derive(Debug, Default)]
pub struct DefaultConfig {
    slot: ArcSwapOption<Mutex<ConfigFile>>,
}

impl DefaultConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `file` as the default document, returning the one it replaces.
    pub fn set(&self, file: SharedConfigFile) -> Option<SharedConfigFile> {
        let previous = self.slot.swap(Some(file));
        debug!(replaced = previous.is_some(), "registered default config");
        previous
    }

    pub fn get(&self) -> Option<SharedConfigFile> {
        self.slot.load_full()
    }

    pub fn is_set(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Empty the slot, returning whatever was registered.
    pub fn reset(&self) -> Option<SharedConfigFile> {
        self.slot.swap(None)
    }

    /// The registered document, or [`ConfigError::NoDefaultConfig`] naming the
    /// key that needed it.
    pub(crate) fn require(&self, key: &str) -> Result<SharedConfigFile, ConfigError> {
        self.get().ok_or_else(|| ConfigError::NoDefaultConfig {
            key: key.to_string(),
        })
    }
}

pub(crate) fn global() -> &'static DefaultConfig {
    static GLOBAL: OnceLock<DefaultConfig> = OnceLock::new();
    GLOBAL.get_or_init(DefaultConfig::new)
}

/// Register `file` as the process-wide default document.
///
/// Set it once during start-up, before other threads start reading keys.
pub fn set_default_config(file: SharedConfigFile) -> Option<SharedConfigFile> {
    global().set(file)
}

pub fn default_config() -> Option<SharedConfigFile> {
    global().get()
}

pub fn has_default_config() -> bool {
    global().is_set()
}

pub fn clear_default_config() -> Option<SharedConfigFile> {
    global().reset()
}
