// src/config.rs

//! Configuration for the shim.
//!
//! A deployment describes the platform it runs against and which rewrites
//! apply there, instead of the logic probing the platform at each call
//! site. All values carry defaults matching the observed device, so an
//! empty configuration file yields a working shim for it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::alias::{AliasTable, ResolutionAlias, BUILTIN_ALIASES};
use crate::normalizer::NormalizePolicy;

// --- Top-Level Configuration Structure ---

/// Complete shim configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Facts about the host platform.
    pub platform: PlatformConfig,
    /// Which rewrites apply, and with which strategy.
    pub gating: GatingConfig,
    /// Width aliases the UI paths translate through.
    pub aliases: Vec<ResolutionAlias>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            platform: PlatformConfig::default(),
            gating: GatingConfig::default(),
            aliases: BUILTIN_ALIASES.entries().to_vec(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file. Missing fields fall back to
    /// the defaults.
    pub fn load_from_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// The alias table this configuration describes.
    pub fn alias_table(&self) -> AliasTable {
        AliasTable::new(self.aliases.clone())
    }
}

// --- Platform Facts ---

/// Facts about the platform the shim runs against, supplied once at
/// construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Host platform API level.
    pub api_level: i32,
    /// Logical display id of the device's internal panel.
    pub primary_display_id: i32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig {
            api_level: 33,
            primary_display_id: 0,
        }
    }
}

// --- Gating Thresholds ---

/// Thresholds and strategy choices for the per-request decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GatingConfig {
    /// Lowest API level on which the stock settings app removes the
    /// resolution preference, making the key rewrite necessary to keep it
    /// visible.
    pub min_api_for_key_rewrite: i32,
    /// API level whose stock settings logic needs the availability
    /// override.
    pub legacy_behavior_api: i32,
    /// Mode-list normalization strategy for system-server queries.
    pub normalize_policy: NormalizePolicy,
}

impl Default for GatingConfig {
    fn default() -> Self {
        GatingConfig {
            min_api_for_key_rewrite: 34,
            legacy_behavior_api: 33,
            normalize_policy: NormalizePolicy::TieredSort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_observed_deployment() {
        let config = Config::default();
        assert_eq!(config.platform.api_level, 33);
        assert_eq!(config.platform.primary_display_id, 0);
        assert_eq!(config.gating.min_api_for_key_rewrite, 34);
        assert_eq!(config.gating.legacy_behavior_api, 33);
        assert_eq!(config.gating.normalize_policy, NormalizePolicy::TieredSort);
        assert_eq!(config.aliases.len(), 2);
    }

    #[test]
    fn partial_json_overrides_keep_remaining_defaults() {
        let config: Config = serde_json::from_str(
            r#"{
                "platform": { "api_level": 34 },
                "gating": { "normalize_policy": "active_to_front" }
            }"#,
        )
        .expect("partial config must deserialize");
        assert_eq!(config.platform.api_level, 34);
        assert_eq!(config.platform.primary_display_id, 0);
        assert_eq!(
            config.gating.normalize_policy,
            NormalizePolicy::ActiveToFront
        );
        assert_eq!(config.gating.min_api_for_key_rewrite, 34);
        assert_eq!(config.aliases, AliasTable::default().entries().to_vec());
    }

    #[test]
    fn alias_entries_deserialize_from_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "aliases": [
                    { "physical_width": 1096, "physical_height": 2560, "display_width": 1080 }
                ]
            }"#,
        )
        .expect("alias config must deserialize");
        let table = config.alias_table();
        assert_eq!(table.to_display_width(1096), 1080);
        assert_eq!(table.to_display_width(1644), 1644);
    }
}
