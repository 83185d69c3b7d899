//! Resonance network: participant set plus one scalar field
//!
//! State transitions:
//! - UNINITIALIZED → INITIALIZED: initialize(participants)
//! - INITIALIZED → UNINITIALIZED: reset()
//!
//! update_field overwrites the field (field = coherence * ratio); repeated
//! calls never accumulate.

use std::collections::HashSet;

use tracing::debug;

use crate::types::{NetworkState, ResonanceError, Result};

/// Caller-owned resonance network
#[derive(Debug, Default)]
pub struct ResonanceNetwork {
    /// Current state
    state: NetworkState,
    /// Participant names, in registration order, unique
    participants: Vec<String>,
    /// Field value, last written by update_field
    field: f64,
}

impl ResonanceNetwork {
    /// Create new, uninitialized network
    pub fn new() -> Self {
        Self::default()
    }

    /// Register participants; only allowed once until reset
    pub fn initialize<I, S>(&mut self, participants: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.state != NetworkState::Uninitialized {
            return Err(ResonanceError::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }

        let names: Vec<String> = participants.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ResonanceError::invalid(
                    "participants",
                    format!("duplicate participant {:?}", name),
                ));
            }
        }

        debug!(count = names.len(), "network initialized");
        self.participants = names;
        self.state = NetworkState::Initialized;
        Ok(())
    }

    /// Overwrite the field with `coherence * ratio_constant`, return it
    pub fn update_field(&mut self, coherence: f64, ratio_constant: f64) -> Result<f64> {
        if self.state != NetworkState::Initialized {
            return Err(ResonanceError::InvalidState {
                operation: "update field",
                state: self.state,
            });
        }

        self.field = coherence * ratio_constant;
        debug!(field = self.field, "field updated");
        Ok(self.field)
    }

    /// `field * participant_count * ratio_constant`, recomputed each call
    pub fn field_strength(&self, ratio_constant: f64) -> f64 {
        self.field * self.participants.len() as f64 * ratio_constant
    }

    /// Back to UNINITIALIZED with an empty participant set and zero field
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Get current state
    pub fn state(&self) -> NetworkState {
        self.state
    }

    /// Get current field
    pub fn field(&self) -> f64 {
        self.field
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
