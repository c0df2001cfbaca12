// src/gateway/mod.rs

//! Per-request decision logic.
//!
//! One method per intercepted host operation. Every method returns
//! `Option`: `Some` carries the replacement value the adapter installs into
//! the intercepted call, `None` means the host's original result or
//! argument stands. No path in here can make the host call fail; a shim
//! that cannot apply steps aside.

use std::borrow::Cow;

use log::{debug, warn};

use crate::alias::{format_resolution, AliasTable};
use crate::caller::CallerIdentity;
use crate::config::Config;
use crate::mode::{DisplayInfoSnapshot, Mode};
use crate::normalizer::{normalize, NormalizePolicy};
use crate::settings::{write_preferred_mode, SettingsStore};

/// Preference key the stock settings app files the resolution choice under.
pub const SCREEN_RESOLUTION_KEY: &str = "screen_resolution";

/// Replacement key for the resolution preference. The stock removal logic
/// matches on the public name, so a preference filed under this name stays
/// visible.
pub const PRIVATE_SCREEN_RESOLUTION_KEY: &str = "screen_resolution_1145141919";

/// Outcome of extracting one value from the host's internals.
///
/// Hosts get updated and their internals renamed; an extraction that no
/// longer lines up is an expected state, not an error. Adapters report what
/// they found and the gateway collapses anything short of `Found` into
/// leaving the host result untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLookup<T> {
    /// The value was found and has the expected shape.
    Found(T),
    /// The class, field, or method is gone.
    Missing,
    /// Present, but not the shape this logic was written against.
    TypeMismatch,
}

impl<T> HostLookup<T> {
    /// Collapses to the boundary behavior: a failed extraction becomes
    /// `None`, logged here and nowhere else.
    fn found(self, what: &str) -> Option<T> {
        match self {
            HostLookup::Found(value) => Some(value),
            HostLookup::Missing => {
                warn!("host internal missing: {}; leaving original behavior", what);
                None
            }
            HostLookup::TypeMismatch => {
                warn!(
                    "host internal has unexpected shape: {}; leaving original behavior",
                    what
                );
                None
            }
        }
    }
}

/// Availability of the resolution preference controller, mirroring the
/// host's status constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AvailabilityStatus {
    Available = 0,
}

impl AvailabilityStatus {
    /// Raw status value handed back to the host.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Replacement state for the resolution settings fragment when it attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSetup {
    /// Resolution choice labels, formatted from true physical values.
    pub summaries: Vec<String>,
    /// The stock preview image depicts the aliased resolution, so the
    /// fragment hides it.
    pub hide_preview_image: bool,
}

/// Decision table deciding, per intercepted host operation, whether the
/// alias table or the normalizer applies and with which parameters.
#[derive(Debug, Clone)]
pub struct Gateway {
    api_level: i32,
    primary_display_id: i32,
    min_api_for_key_rewrite: i32,
    legacy_behavior_api: i32,
    policy: NormalizePolicy,
    aliases: AliasTable,
}

impl Gateway {
    pub fn new(config: &Config) -> Self {
        Gateway {
            api_level: config.platform.api_level,
            primary_display_id: config.platform.primary_display_id,
            min_api_for_key_rewrite: config.gating.min_api_for_key_rewrite,
            legacy_behavior_api: config.gating.legacy_behavior_api,
            policy: config.gating.normalize_policy,
            aliases: config.alias_table(),
        }
    }

    /// Settings UI: a "remove preference" element is being constructed. A
    /// target key naming the resolution preference is retargeted to the
    /// private name so the removal never matches it.
    pub fn rewrite_remove_preference_key(
        &self,
        target_key: HostLookup<&str>,
    ) -> Option<&'static str> {
        if self.api_level < self.min_api_for_key_rewrite {
            return None;
        }
        let key = target_key.found("remove-preference target key")?;
        if key == SCREEN_RESOLUTION_KEY {
            debug!("retargeting remove-preference for {}", key);
            Some(PRIVATE_SCREEN_RESOLUTION_KEY)
        } else {
            None
        }
    }

    /// Settings UI: the stock controller reports the resolution preference
    /// unavailable on the legacy platform. Forced available there.
    pub fn availability_override(&self) -> Option<AvailabilityStatus> {
        (self.api_level == self.legacy_behavior_api).then_some(AvailabilityStatus::Available)
    }

    /// Settings UI read path: the true width the controller is about to
    /// show, mapped to its presented value. `None` when the width has no
    /// alias and the host value stands.
    pub fn display_width_for_ui(&self, physical_width: HostLookup<i32>) -> Option<i32> {
        let width = physical_width.found("controller display width")?;
        let mapped = self.aliases.to_display_width(width);
        (mapped != width).then_some(mapped)
    }

    /// Settings UI write path: a width argument arriving from the UI,
    /// mapped back to the true value before the host resolves a mode with
    /// it. `None` when the width has no alias.
    pub fn physical_width_for_host(&self, requested_width: i32) -> Option<i32> {
        let mapped = self.aliases.to_physical_width(requested_width);
        (mapped != requested_width).then_some(mapped)
    }

    /// Settings UI: summary line for the active mode, formatted from its
    /// true physical values.
    pub fn resolution_summary(&self, active_mode: HostLookup<&Mode>) -> Option<String> {
        let mode = active_mode.found("active display mode")?;
        Some(format_resolution(mode.physical_width, mode.physical_height))
    }

    /// Settings UI: replacement state for the resolution fragment when it
    /// attaches.
    pub fn fragment_setup(&self) -> FragmentSetup {
        FragmentSetup {
            summaries: self.aliases.physical_summaries(),
            hide_preview_image: true,
        }
    }

    /// Settings UI: the user picked a resolution by its presented width.
    /// Resolves the real mode and persists it as the user's preference.
    /// Returns the resolved mode, or `None` when no mode matches, in which
    /// case nothing is persisted.
    pub fn mode_selected(
        &self,
        requested_display_width: i32,
        available_modes: &[Mode],
        store: &mut dyn SettingsStore,
    ) -> Option<Mode> {
        let mode = self
            .aliases
            .resolve_mode_for_display_width(requested_display_width, available_modes)?;
        debug!(
            "user selected width {}, resolved mode {} ({}x{} @ {} Hz)",
            requested_display_width,
            mode.mode_id,
            mode.physical_width,
            mode.physical_height,
            mode.refresh_rate
        );
        write_preferred_mode(store, mode);
        Some(*mode)
    }

    /// System server: a display-info query result is about to leave the
    /// server. Produces the replacement mode list, or `None` when the
    /// original list should go out as-is. Only the internal panel is
    /// touched; external displays pass through.
    pub fn normalized_display_modes(
        &self,
        info: HostLookup<&DisplayInfoSnapshot>,
        caller_uid: i32,
    ) -> Option<Vec<Mode>> {
        let info = info.found("display info query result")?;
        if info.display_id != self.primary_display_id {
            return None;
        }
        let caller = CallerIdentity::from_uid(caller_uid);
        match normalize(
            &info.supported_modes,
            info.active_mode_id,
            caller,
            self.policy,
        ) {
            Cow::Borrowed(_) => None,
            Cow::Owned(modes) => {
                debug!(
                    "normalized mode list for display {} ({} modes)",
                    info.display_id,
                    modes.len()
                );
                Some(modes)
            }
        }
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Gateway::new(&Config::default())
    }
}

#[cfg(test)]
mod tests;
