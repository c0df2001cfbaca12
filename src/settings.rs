// src/settings.rs

//! Narrow port to the host's scalar settings store, plus the preference
//! writeback that records the user's chosen mode.

use std::collections::HashMap;

use anyhow::Result;
use log::warn;

use crate::mode::Mode;

/// Settings key for the width of the user's preferred mode.
pub const PREFERRED_WIDTH_KEY: &str = "user_preferred_resolution_width";
/// Settings key for the height of the user's preferred mode.
pub const PREFERRED_HEIGHT_KEY: &str = "user_preferred_resolution_height";
/// Settings key for the refresh rate of the user's preferred mode.
pub const PREFERRED_REFRESH_RATE_KEY: &str = "user_preferred_refresh_rate";

/// Write access to named scalar settings owned by the host platform.
pub trait SettingsStore {
    fn put_int(&mut self, key: &str, value: i32) -> Result<()>;
    fn put_float(&mut self, key: &str, value: f32) -> Result<()>;
}

/// Persists `mode` as the user's preferred resolution and refresh rate.
///
/// Three independent writes, always of the mode's true physical values.
/// A failed write is logged and the remaining writes still happen; readers
/// of these keys treat them as best-effort hints and tolerate a torn state.
pub fn write_preferred_mode(store: &mut dyn SettingsStore, mode: &Mode) {
    if let Err(err) = store.put_int(PREFERRED_WIDTH_KEY, mode.physical_width) {
        warn!("failed to persist {}: {:#}", PREFERRED_WIDTH_KEY, err);
    }
    if let Err(err) = store.put_int(PREFERRED_HEIGHT_KEY, mode.physical_height) {
        warn!("failed to persist {}: {:#}", PREFERRED_HEIGHT_KEY, err);
    }
    if let Err(err) = store.put_float(PREFERRED_REFRESH_RATE_KEY, mode.refresh_rate) {
        warn!("failed to persist {}: {:#}", PREFERRED_REFRESH_RATE_KEY, err);
    }
}

/// In-memory `SettingsStore` used by tests and host-free wiring.
#[derive(Debug, Default)]
pub struct MemorySettings {
    ints: HashMap<String, i32>,
    floats: HashMap<String, f32>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn int(&self, key: &str) -> Option<i32> {
        self.ints.get(key).copied()
    }

    pub fn float(&self, key: &str) -> Option<f32> {
        self.floats.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.floats.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn put_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.ints.insert(key.to_string(), value);
        Ok(())
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<()> {
        self.floats.insert(key.to_string(), value);
        Ok(())
    }
}
