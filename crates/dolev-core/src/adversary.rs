//! Adversary strategies for corrupt participants.
//!
//! Each corrupt participant is assigned one [`Strategy`] when the network is
//! built. The strategy is policy, not protocol: it decides which bit (if any)
//! a corrupt participant certifies, while the participant state machine keeps
//! doing the bookkeeping.
//!
//! # Unforgeability
//!
//! The adversary is a coordinated coalition. It can sign on behalf of any
//! corrupt participant but never on behalf of an honest one, so an
//! equivocating relay can only change the bit of a certificate whose existing
//! signers are all corrupt.

use rand::Rng;

use crate::message::Bit;

/// Behavior of a corrupt participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Never sends anything.
    Silent,
    /// Follows the protocol exactly like an honest participant.
    FaithfulRelay,
    /// Certifies a locally chosen bit, possibly the opposite of what it got.
    /// As sender, picks the bit independently for every recipient.
    Equivocate,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 3] = [Self::Silent, Self::FaithfulRelay, Self::Equivocate];

    /// Bit a corrupt sender sends to a single recipient in round 0.
    ///
    /// Called once per recipient so that equivocation can split the network.
    pub fn seed_bit<R: Rng + ?Sized>(self, input: Bit, rng: &mut R) -> Option<Bit> {
        match self {
            Self::Silent => None,
            Self::FaithfulRelay => Some(input),
            Self::Equivocate => Some(random_bit(rng)),
        }
    }

    /// Bit a corrupt relay certifies after accepting `received`.
    ///
    /// `can_forge` is true when every signature already on the certificate
    /// belongs to the coalition.
    pub fn relay_bit<R: Rng + ?Sized>(
        self,
        received: Bit,
        can_forge: bool,
        rng: &mut R,
    ) -> Option<Bit> {
        match self {
            Self::Silent => None,
            Self::FaithfulRelay => Some(received),
            Self::Equivocate => {
                let chosen = random_bit(rng);
                if chosen != received && !can_forge { Some(received) } else { Some(chosen) }
            },
        }
    }
}

/// How strategies are assigned to corrupt participants at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdversaryPolicy {
    /// Each corrupt participant draws a strategy uniformly at random.
    #[default]
    Mixed,

    /// Every corrupt participant uses the same strategy.
    Fixed(Strategy),
}

impl AdversaryPolicy {
    /// Strategy for the next corrupt participant.
    pub fn assign<R: Rng + ?Sized>(self, rng: &mut R) -> Strategy {
        match self {
            Self::Fixed(strategy) => strategy,
            Self::Mixed => Strategy::ALL[rng.gen_range(0..Strategy::ALL.len())],
        }
    }
}

fn random_bit<R: Rng + ?Sized>(rng: &mut R) -> Bit {
    if rng.gen_bool(0.5) { Bit::One } else { Bit::Zero }
}
