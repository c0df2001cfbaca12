// src/gateway/tests.rs

//! Unit tests for the per-request decision table.

use crate::config::Config;
use crate::gateway::{
    AvailabilityStatus, Gateway, HostLookup, PRIVATE_SCREEN_RESOLUTION_KEY, SCREEN_RESOLUTION_KEY,
};
use crate::mode::{DisplayInfoSnapshot, Mode};
use crate::normalizer::NormalizePolicy;
use crate::settings::{
    MemorySettings, PREFERRED_HEIGHT_KEY, PREFERRED_REFRESH_RATE_KEY, PREFERRED_WIDTH_KEY,
};

fn mode(id: i32, w: i32, h: i32, rate: f32) -> Mode {
    Mode {
        mode_id: id,
        physical_width: w,
        physical_height: h,
        refresh_rate: rate,
    }
}

fn xperia_modes() -> Vec<Mode> {
    vec![
        mode(1, 1096, 2560, 60.0),
        mode(2, 1644, 3840, 60.0),
        mode(3, 1096, 2560, 90.0),
    ]
}

fn gateway_at_api(api_level: i32) -> Gateway {
    let mut config = Config::default();
    config.platform.api_level = api_level;
    Gateway::new(&config)
}

fn gateway_with_policy(policy: NormalizePolicy) -> Gateway {
    let mut config = Config::default();
    config.gating.normalize_policy = policy;
    Gateway::new(&config)
}

// --- Preference key rewrite ---

#[test]
fn rewrites_resolution_key_on_new_platform() {
    let gateway = gateway_at_api(34);
    assert_eq!(
        gateway.rewrite_remove_preference_key(HostLookup::Found(SCREEN_RESOLUTION_KEY)),
        Some(PRIVATE_SCREEN_RESOLUTION_KEY)
    );
}

#[test]
fn leaves_other_keys_alone() {
    let gateway = gateway_at_api(34);
    assert_eq!(
        gateway.rewrite_remove_preference_key(HostLookup::Found("screen_timeout")),
        None
    );
}

#[test]
fn no_key_rewrite_below_threshold() {
    let gateway = gateway_at_api(33);
    assert_eq!(
        gateway.rewrite_remove_preference_key(HostLookup::Found(SCREEN_RESOLUTION_KEY)),
        None
    );
}

#[test_log::test]
fn failed_key_extraction_passes_through() {
    let gateway = gateway_at_api(34);
    assert_eq!(gateway.rewrite_remove_preference_key(HostLookup::Missing), None);
    assert_eq!(
        gateway.rewrite_remove_preference_key(HostLookup::TypeMismatch),
        None
    );
}

// --- Availability override ---

#[test]
fn forces_availability_on_legacy_platform() {
    let gateway = gateway_at_api(33);
    let status = gateway.availability_override();
    assert_eq!(status, Some(AvailabilityStatus::Available));
    assert_eq!(status.unwrap().as_raw(), 0);
}

#[test]
fn no_availability_override_elsewhere() {
    assert_eq!(gateway_at_api(34).availability_override(), None);
    assert_eq!(gateway_at_api(32).availability_override(), None);
}

// --- Width mapping, read and write paths ---

#[test]
fn maps_physical_widths_for_display() {
    let gateway = Gateway::default();
    assert_eq!(
        gateway.display_width_for_ui(HostLookup::Found(1096)),
        Some(1080)
    );
    assert_eq!(
        gateway.display_width_for_ui(HostLookup::Found(1644)),
        Some(1440)
    );
}

#[test]
fn unaliased_width_leaves_host_result() {
    let gateway = Gateway::default();
    assert_eq!(gateway.display_width_for_ui(HostLookup::Found(1437)), None);
    assert_eq!(gateway.physical_width_for_host(1437), None);
}

#[test]
fn missing_width_leaves_host_result() {
    let gateway = Gateway::default();
    assert_eq!(gateway.display_width_for_ui(HostLookup::Missing), None);
}

#[test]
fn maps_selected_widths_back_to_physical() {
    let gateway = Gateway::default();
    assert_eq!(gateway.physical_width_for_host(1080), Some(1096));
    assert_eq!(gateway.physical_width_for_host(1440), Some(1644));
}

// --- Summary and fragment state ---

#[test]
fn summary_uses_true_physical_values() {
    let gateway = Gateway::default();
    let active = mode(2, 1644, 3840, 60.0);
    assert_eq!(
        gateway.resolution_summary(HostLookup::Found(&active)),
        Some("1644×3840".to_string())
    );
}

#[test]
fn summary_passes_through_without_a_mode() {
    let gateway = Gateway::default();
    assert_eq!(gateway.resolution_summary(HostLookup::Missing), None);
    assert_eq!(gateway.resolution_summary(HostLookup::TypeMismatch), None);
}

#[test]
fn fragment_setup_lists_aliased_resolutions() {
    let setup = Gateway::default().fragment_setup();
    assert_eq!(setup.summaries, vec!["1096×2560", "1644×3840"]);
    assert!(setup.hide_preview_image);
}

// --- Mode selection and writeback ---

#[test]
fn selecting_a_display_width_persists_the_true_mode() {
    let gateway = Gateway::default();
    let mut store = MemorySettings::new();
    let resolved = gateway
        .mode_selected(1080, &xperia_modes(), &mut store)
        .expect("1080 must resolve against the inventory");
    assert_eq!(resolved.mode_id, 1);
    assert_eq!(store.int(PREFERRED_WIDTH_KEY), Some(1096));
    assert_eq!(store.int(PREFERRED_HEIGHT_KEY), Some(2560));
    assert_eq!(store.float(PREFERRED_REFRESH_RATE_KEY), Some(60.0));
}

#[test]
fn unresolvable_selection_persists_nothing() {
    let gateway = Gateway::default();
    let mut store = MemorySettings::new();
    assert_eq!(gateway.mode_selected(999, &xperia_modes(), &mut store), None);
    assert!(store.is_empty());
}

// --- Display-info normalization ---

fn snapshot(display_id: i32, active_mode_id: i32) -> DisplayInfoSnapshot {
    DisplayInfoSnapshot {
        display_id,
        active_mode_id,
        supported_modes: xperia_modes(),
    }
}

fn ids(modes: &[Mode]) -> Vec<i32> {
    modes.iter().map(|m| m.mode_id).collect()
}

#[test]
fn normalizes_primary_display_queries() {
    let gateway = gateway_with_policy(NormalizePolicy::TieredSort);
    let info = snapshot(0, 2);
    let out = gateway
        .normalized_display_modes(HostLookup::Found(&info), 1000)
        .expect("out-of-order list must be replaced");
    assert_eq!(ids(&out), vec![2, 1, 3]);
}

#[test]
fn external_displays_pass_through() {
    let gateway = gateway_with_policy(NormalizePolicy::TieredSort);
    let info = snapshot(2, 2);
    assert_eq!(
        gateway.normalized_display_modes(HostLookup::Found(&info), 10_123),
        None
    );
}

#[test]
fn well_ordered_list_passes_through() {
    let gateway = gateway_with_policy(NormalizePolicy::TieredSort);
    let info = DisplayInfoSnapshot {
        display_id: 0,
        active_mode_id: 1,
        supported_modes: vec![
            mode(1, 1096, 2560, 60.0),
            mode(3, 1096, 2560, 90.0),
            mode(2, 1644, 3840, 60.0),
        ],
    };
    assert_eq!(
        gateway.normalized_display_modes(HostLookup::Found(&info), 10_123),
        None
    );
}

#[test]
fn targeted_policy_ignores_trusted_callers() {
    let gateway = gateway_with_policy(NormalizePolicy::ActiveToFront);
    let info = snapshot(0, 2);
    assert_eq!(
        gateway.normalized_display_modes(HostLookup::Found(&info), 1000),
        None
    );
}

#[test]
fn targeted_policy_reorders_for_applications() {
    let gateway = gateway_with_policy(NormalizePolicy::ActiveToFront);
    let info = snapshot(0, 2);
    let out = gateway
        .normalized_display_modes(HostLookup::Found(&info), 10_123)
        .expect("application query must see the active mode first");
    assert_eq!(ids(&out), vec![2, 1, 3]);
}

#[test]
fn stale_active_mode_passes_through() {
    let gateway = gateway_with_policy(NormalizePolicy::TieredSort);
    let info = snapshot(0, 42);
    assert_eq!(
        gateway.normalized_display_modes(HostLookup::Found(&info), 10_123),
        None
    );
}

#[test_log::test]
fn missing_display_info_passes_through() {
    let gateway = Gateway::default();
    assert_eq!(gateway.normalized_display_modes(HostLookup::Missing, 10_123), None);
    assert_eq!(
        gateway.normalized_display_modes(HostLookup::TypeMismatch, 10_123),
        None
    );
}
