// src/normalizer/mod.rs

//! Mode-list normalization.
//!
//! Some applications read the first entry of a display's mode list as the
//! active mode. The host makes no such guarantee, so a query result whose
//! list happens to lead with an inactive mode breaks those callers. The
//! normalizer reorders a mode list around the active mode before it leaves
//! the server boundary.
//!
//! Two reordering strategies are in use; see [`NormalizePolicy`]. Both are
//! cosmetic fixes: a list that cannot be normalized (active id absent,
//! empty input) is returned unchanged rather than turned into an error,
//! because the intercepted host call must never fail on account of this
//! layer.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::caller::CallerIdentity;
use crate::mode::Mode;

/// Strategy for reordering a mode list around the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizePolicy {
    /// Three-tier stable sort: the active mode first, then the remaining
    /// refresh rates of the active resolution, then everything else.
    /// Applies to every caller.
    #[default]
    TieredSort,
    /// Move the active mode to the front and keep every other mode in its
    /// original relative order. Applies only to application callers, and
    /// only when the list does not already lead with the active resolution.
    ActiveToFront,
}

/// Reorders `modes` so the active mode leads the list, per `policy`.
///
/// The input is never mutated: the result is either the original slice
/// borrowed back (nothing to do) or a reordered copy. Lists that are empty,
/// contain a single mode, or do not contain `active_mode_id` come back
/// unchanged.
pub fn normalize<'a>(
    modes: &'a [Mode],
    active_mode_id: i32,
    caller: CallerIdentity,
    policy: NormalizePolicy,
) -> Cow<'a, [Mode]> {
    if modes.len() < 2 {
        return Cow::Borrowed(modes);
    }
    let Some(active) = modes.iter().find(|m| m.mode_id == active_mode_id) else {
        return Cow::Borrowed(modes);
    };
    let active = *active;
    match policy {
        NormalizePolicy::TieredSort => tiered_sort(modes, &active),
        NormalizePolicy::ActiveToFront => active_to_front(modes, &active, caller),
    }
}

/// Sort tier of a mode relative to the active mode: 0 for the active mode
/// itself, 1 for the same resolution at another refresh rate, 2 for the
/// rest.
fn tier(mode: &Mode, active: &Mode) -> u8 {
    if mode.mode_id == active.mode_id {
        0
    } else if mode.same_resolution(active) {
        1
    } else {
        2
    }
}

fn tiered_sort<'a>(modes: &'a [Mode], active: &Mode) -> Cow<'a, [Mode]> {
    // A list that is already tier-ordered goes back borrowed; the copy is
    // only paid when the order actually changes.
    let ordered = modes
        .windows(2)
        .all(|pair| tier(&pair[0], active) <= tier(&pair[1], active));
    if ordered {
        return Cow::Borrowed(modes);
    }
    let mut sorted = modes.to_vec();
    // sort_by_key is stable, so input order survives within each tier.
    sorted.sort_by_key(|m| tier(m, active));
    Cow::Owned(sorted)
}

fn active_to_front<'a>(
    modes: &'a [Mode],
    active: &Mode,
    caller: CallerIdentity,
) -> Cow<'a, [Mode]> {
    if !caller.is_application() {
        return Cow::Borrowed(modes);
    }
    // First entry already showing the active resolution satisfies the
    // callers this exists for; skip the copy.
    if modes[0].same_resolution(active) {
        return Cow::Borrowed(modes);
    }
    let mut reordered = Vec::with_capacity(modes.len());
    reordered.push(*active);
    reordered.extend(
        modes
            .iter()
            .filter(|m| m.mode_id != active.mode_id)
            .copied(),
    );
    Cow::Owned(reordered)
}
