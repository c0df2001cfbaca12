// src/alias.rs

//! Width aliasing between the panel's true resolutions and the values the
//! settings UI presents.
//!
//! The shimmed device reports panel widths the vendor UI was not written
//! for, so the UI shows the nearest marketing value instead. Reads map a
//! true width to its presented value, writes map a selected value back
//! before it is used to locate a mode. Widths without an alias entry map to
//! themselves in both directions.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// One width alias: a true panel resolution paired with the width the UI
/// presents for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionAlias {
    /// True panel width in pixels.
    pub physical_width: i32,
    /// True panel height belonging to `physical_width`. Kept in the entry
    /// so a label never combines the height of one alias with the width of
    /// another.
    pub physical_height: i32,
    /// Width the UI shows and accepts for this resolution.
    pub display_width: i32,
}

/// The fixed alias set of the shimmed device.
pub static BUILTIN_ALIASES: Lazy<AliasTable> = Lazy::new(AliasTable::default);

/// Bidirectional width mapping over a small fixed alias set.
///
/// The table is intentionally tiny and symmetric. It is not meant to
/// generalize past the known aliases; new panels get new entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    entries: Vec<ResolutionAlias>,
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable {
            entries: vec![
                ResolutionAlias {
                    physical_width: 1096,
                    physical_height: 2560,
                    display_width: 1080,
                },
                ResolutionAlias {
                    physical_width: 1644,
                    physical_height: 3840,
                    display_width: 1440,
                },
            ],
        }
    }
}

impl AliasTable {
    pub fn new(entries: Vec<ResolutionAlias>) -> Self {
        AliasTable { entries }
    }

    pub fn entries(&self) -> &[ResolutionAlias] {
        &self.entries
    }

    /// Maps a true panel width to the width the UI shows. Identity for
    /// widths outside the table.
    pub fn to_display_width(&self, width: i32) -> i32 {
        self.entries
            .iter()
            .find(|a| a.physical_width == width)
            .map_or(width, |a| a.display_width)
    }

    /// Maps a width the UI handed back to the true panel width. Identity
    /// for widths outside the table.
    pub fn to_physical_width(&self, width: i32) -> i32 {
        self.entries
            .iter()
            .find(|a| a.display_width == width)
            .map_or(width, |a| a.physical_width)
    }

    /// Finds the real mode behind a width selected in the UI.
    ///
    /// The selected width is translated to its true value first; height and
    /// refresh rate then come from the matched mode itself.
    pub fn resolve_mode_for_display_width<'a>(
        &self,
        requested_display_width: i32,
        available_modes: &'a [Mode],
    ) -> Option<&'a Mode> {
        let physical = self.to_physical_width(requested_display_width);
        available_modes
            .iter()
            .find(|m| m.physical_width == physical)
    }

    /// Labels for every aliased resolution, in table order, formatted from
    /// the true physical values.
    pub fn physical_summaries(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|a| format_resolution(a.physical_width, a.physical_height))
            .collect()
    }
}

/// Formats a resolution label as `"{width}×{height}"`.
pub fn format_resolution(width: i32, height: i32) -> String {
    format!("{}×{}", width, height)
}
