//! Shared primitive types used across the decision engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Simulated time, in milliseconds since the owning session opened.
pub type Millis = u64;

/// The canonical session identifier.
pub type SessionId = String;

/// Opaque handle for a submitted application. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Build an id from 16 bytes drawn from a deterministic stream.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app-{}", self.0.simple())
    }
}

impl std::str::FromStr for ApplicationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("app-").unwrap_or(s);
        Uuid::parse_str(raw).map(Self)
    }
}
