//! Simulation error types.

use thiserror::Error;

/// Invalid network configuration. Raised before any participant is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Fewer participants than the protocol needs.
    #[error("need at least {min} participants, got {actual}")]
    TooFewParticipants {
        /// Smallest supported network.
        min: usize,
        /// Requested network size.
        actual: usize,
    },

    /// Network larger than the simulation supports.
    #[error("network of {actual} participants exceeds simulation cap of {max}")]
    TooManyParticipants {
        /// Largest supported network.
        max: usize,
        /// Requested network size.
        actual: usize,
    },

    /// Corrupt count must be strictly less than the network size.
    #[error("corrupt count {corrupt} must be less than participant count {participants}")]
    TooManyCorrupt {
        /// Requested corrupt count.
        corrupt: usize,
        /// Requested network size.
        participants: usize,
    },

    /// Input bit outside `{0, 1}`.
    #[error("input bit must be 0 or 1, got {value}")]
    InvalidBit {
        /// Rejected value.
        value: u8,
    },
}

/// Errors surfaced by the simulation API.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration rejected up front.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The network has already executed its single run.
    #[error("simulation already ran; build a new network for another run")]
    AlreadyRun,
}

impl SimulationError {
    /// Returns true if the error comes from configuration validation.
    ///
    /// Configuration errors are raised before any participant exists, so no
    /// simulation state needs to be discarded.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
