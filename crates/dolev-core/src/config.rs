//! Network configuration.

use crate::{adversary::AdversaryPolicy, error::ConfigError, message::Bit};

/// Smallest network the protocol runs on (a sender and one relay).
pub const MIN_PARTICIPANTS: usize = 2;

/// Largest network the simulation accepts.
pub const MAX_PARTICIPANTS: usize = 50;

/// Parameters of a single broadcast run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Total number of participants, sender included.
    pub num_participants: usize,
    /// Number of corrupt participants.
    pub num_corrupt: usize,
    /// Bit the sender broadcasts.
    pub input_bit: Bit,
    /// Whether the sender should be one of the corrupt participants.
    pub corrupt_sender: bool,
    /// Strategy assignment for corrupt participants.
    pub adversary: AdversaryPolicy,
}

impl NetworkConfig {
    /// Configuration with `floor(n / 3)` corrupt relays and an honest sender.
    pub fn new(num_participants: usize, input_bit: Bit) -> Self {
        Self {
            num_participants,
            num_corrupt: num_participants / 3,
            input_bit,
            corrupt_sender: false,
            adversary: AdversaryPolicy::default(),
        }
    }

    /// Override the number of corrupt participants.
    pub fn with_corrupt(mut self, num_corrupt: usize) -> Self {
        self.num_corrupt = num_corrupt;
        self
    }

    /// Request a corrupt sender.
    pub fn with_corrupt_sender(mut self, corrupt_sender: bool) -> Self {
        self.corrupt_sender = corrupt_sender;
        self
    }

    /// Override how corrupt participants pick their strategy.
    pub fn with_adversary(mut self, adversary: AdversaryPolicy) -> Self {
        self.adversary = adversary;
        self
    }

    /// Number of rounds a run executes: one more than the corrupt count.
    pub fn max_rounds(&self) -> usize {
        self.num_corrupt + 1
    }

    /// Check the configuration against the simulation bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_participants < MIN_PARTICIPANTS {
            return Err(ConfigError::TooFewParticipants {
                min: MIN_PARTICIPANTS,
                actual: self.num_participants,
            });
        }

        if self.num_participants > MAX_PARTICIPANTS {
            return Err(ConfigError::TooManyParticipants {
                max: MAX_PARTICIPANTS,
                actual: self.num_participants,
            });
        }

        if self.num_corrupt >= self.num_participants {
            return Err(ConfigError::TooManyCorrupt {
                corrupt: self.num_corrupt,
                participants: self.num_participants,
            });
        }

        Ok(())
    }
}
