// src/caller.rs

//! Caller trust classification for system-server requests.

use serde::{Deserialize, Serialize};

/// Uids at or above this value belong to ordinary applications; anything
/// below is a system component.
pub const FIRST_APPLICATION_UID: i32 = 10_000;

/// Trust classification of the originator of a system-server request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallerIdentity {
    /// A system component.
    TrustedSystem,
    /// An ordinary application, identified by its uid.
    Application { uid: i32 },
}

impl CallerIdentity {
    /// Classifies a raw caller uid.
    pub fn from_uid(uid: i32) -> Self {
        if uid >= FIRST_APPLICATION_UID {
            CallerIdentity::Application { uid }
        } else {
            CallerIdentity::TrustedSystem
        }
    }

    pub fn is_application(&self) -> bool {
        matches!(self, CallerIdentity::Application { .. })
    }
}
