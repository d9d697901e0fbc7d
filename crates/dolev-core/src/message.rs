//! Certified-bit messages.
//!
//! Signatures are modeled as participant identifiers. A message carries the
//! bit being broadcast and the ordered set of participants that have signed
//! it, starting with the sender.

use std::{collections::BTreeSet, fmt};

use crate::error::ConfigError;

/// Participant identifier (1-indexed, the sender is always `1`).
pub type ParticipantId = u32;

/// Id of the designated sender.
pub const SENDER_ID: ParticipantId = 1;

/// Signatures attached to a message, ordered for stable hashing and output.
pub type SignerSet = BTreeSet<ParticipantId>;

/// The single bit being broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    /// Bit value `0`. Also the default output when no single bit is certified.
    Zero,
    /// Bit value `1`.
    One,
}

impl Bit {
    /// The opposite bit.
    pub fn flip(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Numeric value of the bit.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

impl TryFrom<u8> for Bit {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            other => Err(ConfigError::InvalidBit { value: other }),
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A bit together with the chain of signatures certifying it.
///
/// Two messages are the same message iff bit and signer set are equal,
/// regardless of when or from whom they arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message {
    /// Certified bit.
    pub bit: Bit,
    /// Participants that signed this bit.
    pub signers: SignerSet,
}

impl Message {
    /// Create a message from a bit and signer set.
    pub fn new(bit: Bit, signers: SignerSet) -> Self {
        Self { bit, signers }
    }

    /// The round-0 message: `bit` signed by the sender alone.
    pub fn from_sender(bit: Bit) -> Self {
        Self { bit, signers: BTreeSet::from([SENDER_ID]) }
    }

    /// Number of signatures carried.
    pub fn signature_count(&self) -> usize {
        self.signers.len()
    }

    /// Whether `id` has already signed this message.
    pub fn is_signed_by(&self, id: ParticipantId) -> bool {
        self.signers.contains(&id)
    }

    /// Copy of this message re-certified for `bit` with `id` appended.
    pub fn endorse(&self, bit: Bit, id: ParticipantId) -> Self {
        let mut signers = self.signers.clone();
        signers.insert(id);
        Self { bit, signers }
    }
}

/// Number of signatures a message must carry to be actionable in `round`.
///
/// Round 0 carries the sender's lone signature, and each later round adds
/// exactly one more.
pub const fn required_signatures(round: usize) -> usize {
    round + 1
}
