// src/mode.rs

//! Display-mode data model shared by the other modules.
//!
//! Values of these types are snapshots handed in from the host display
//! subsystem. Nothing in this crate fabricates a mode id; mode lists are
//! only copied, reordered, and filtered.

use serde::{Deserialize, Serialize};

/// One supported combination of physical resolution and refresh rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Identifier unique within one mode list, assigned by the host.
    pub mode_id: i32,
    /// True panel width in pixels.
    pub physical_width: i32,
    /// True panel height in pixels.
    pub physical_height: i32,
    /// Refresh rate in Hz.
    pub refresh_rate: f32,
}

impl Mode {
    /// Whether `other` has the same physical resolution, ignoring refresh
    /// rate.
    pub fn same_resolution(&self, other: &Mode) -> bool {
        self.physical_width == other.physical_width
            && self.physical_height == other.physical_height
    }
}

/// A display-info query result: the mode inventory of one logical display at
/// one point in time, plus which mode is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfoSnapshot {
    /// Logical display this snapshot belongs to.
    pub display_id: i32,
    /// Mode id of the currently active mode.
    pub active_mode_id: i32,
    /// Supported modes in host order. The host attaches no meaning to the
    /// order, but buggy callers read the first entry as the active mode.
    pub supported_modes: Vec<Mode>,
}

impl DisplayInfoSnapshot {
    /// The active mode, if the host's active id is present in the list.
    pub fn active_mode(&self) -> Option<&Mode> {
        self.supported_modes
            .iter()
            .find(|m| m.mode_id == self.active_mode_id)
    }
}
