// src/lib.rs

//! Compatibility decision core for a device whose display-mode inventory
//! disagrees with what two of its consumers expect.
//!
//! Third-party applications assume the first entry of a display's mode list
//! is the active mode, and the vendor settings UI presents resolution widths
//! that differ from the panel's true pixel widths. This crate holds the
//! decision logic that reconciles both: reordering a mode list around the
//! active mode, translating widths between their true and presented values,
//! and persisting the user's chosen mode. The interception mechanism that
//! feeds host values in and installs replacements is a separate adapter; the
//! functions here take already-extracted values and return replacements, or
//! nothing when the host result should stand.

pub mod alias;
pub mod caller;
pub mod config;
pub mod gateway;
pub mod mode;
pub mod normalizer;
pub mod settings;

// Re-export the types an adapter wires together.
pub use alias::{AliasTable, ResolutionAlias, BUILTIN_ALIASES};
pub use caller::{CallerIdentity, FIRST_APPLICATION_UID};
pub use config::{Config, GatingConfig, PlatformConfig};
pub use gateway::{AvailabilityStatus, FragmentSetup, Gateway, HostLookup};
pub use mode::{DisplayInfoSnapshot, Mode};
pub use normalizer::{normalize, NormalizePolicy};
pub use settings::{
    write_preferred_mode, MemorySettings, SettingsStore, PREFERRED_HEIGHT_KEY,
    PREFERRED_REFRESH_RATE_KEY, PREFERRED_WIDTH_KEY,
};
