//! Network lifecycle states

use serde::{Deserialize, Serialize};

/// The two states of a resonance network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkState {
    /// Created, no participants yet
    #[default]
    Uninitialized,
    /// Participants registered, field may be updated
    Initialized,
}

impl std::fmt::Display for NetworkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NetworkState::Uninitialized => "UNINITIALIZED",
            NetworkState::Initialized => "INITIALIZED",
        };
        write!(f, "{}", name)
    }
}
