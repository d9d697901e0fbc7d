//! Participant state machine.
//!
//! A participant is purely reactive: the network calls [`Participant::receive`]
//! once per delivered message, collects whatever the participant queued with
//! [`Participant::drain_outgoing`] at the start of the next round, and reads
//! [`Participant::decide`] once all rounds are over.
//!
//! # Invariants
//!
//! - A message identity is processed at most once; redeliveries are no-ops
//! - A message is only acted upon when its signer count matches the round
//! - Queued messages carry exactly one more signature than the message that
//!   produced them
//! - Each participant relays at most once per extracted bit

use std::collections::{BTreeSet, HashSet};

use rand::Rng;

use crate::{
    adversary::Strategy,
    message::{Bit, Message, ParticipantId, SENDER_ID, required_signatures},
    tally::History,
};

/// Whether a participant originates the broadcast or relays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The designated sender.
    Sender,
    /// Any other participant.
    Relay,
}

/// Whether a participant follows the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    /// Follows the protocol.
    Honest,
    /// Controlled by the adversary.
    Corrupt {
        /// Strategy assigned at construction.
        strategy: Strategy,
        /// Every corrupt participant, including this one.
        coalition: BTreeSet<ParticipantId>,
    },
}

/// Outcome of the extracted set once the protocol is over.
///
/// [`Participant::decide`] maps both non-certified outcomes to [`Bit::Zero`];
/// this type keeps them apart for callers that care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Exactly one bit was certified.
    Certified(Bit),
    /// No certificate was ever accepted.
    NoCertificate,
    /// Certificates for both bits were accepted.
    Conflicting,
}

impl Decision {
    /// Output bit, defaulting to `0` when no single bit is certified.
    pub fn bit(self) -> Bit {
        match self {
            Self::Certified(bit) => bit,
            Self::NoCertificate | Self::Conflicting => Bit::Zero,
        }
    }
}

/// A single node running the Dolev-Strong protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    id: ParticipantId,
    position: Position,
    behavior: Behavior,
    /// Bits accepted as validly certified. Decision-relevant.
    extracted: BTreeSet<Bit>,
    /// Message identities already handled.
    processed: HashSet<Message>,
    /// Messages queued for the next round.
    pending: Vec<Message>,
    /// Accepted messages per round, for observability.
    tally: History,
}

impl Participant {
    /// Create an honest participant.
    pub fn new(id: ParticipantId, position: Position) -> Self {
        Self {
            id,
            position,
            behavior: Behavior::Honest,
            extracted: BTreeSet::new(),
            processed: HashSet::new(),
            pending: Vec::new(),
            tally: History::new(),
        }
    }

    /// Hand this participant to the adversary.
    pub fn corrupt(&mut self, strategy: Strategy, coalition: BTreeSet<ParticipantId>) {
        self.behavior = Behavior::Corrupt { strategy, coalition };
    }

    /// Participant identifier.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Sender or relay.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Honest or corrupt.
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Whether this is the designated sender.
    pub fn is_sender(&self) -> bool {
        self.position == Position::Sender
    }

    /// Whether this participant is controlled by the adversary.
    pub fn is_corrupt(&self) -> bool {
        matches!(self.behavior, Behavior::Corrupt { .. })
    }

    /// Adversary strategy, if corrupt.
    pub fn strategy(&self) -> Option<Strategy> {
        match &self.behavior {
            Behavior::Honest => None,
            Behavior::Corrupt { strategy, .. } => Some(*strategy),
        }
    }

    /// Bits accepted so far.
    pub fn extracted(&self) -> &BTreeSet<Bit> {
        &self.extracted
    }

    /// Messages queued for the next round.
    pub fn pending(&self) -> &[Message] {
        &self.pending
    }

    /// Accepted messages per round.
    pub fn tally(&self) -> &History {
        &self.tally
    }

    /// Whether this message identity has already been handled.
    pub fn has_processed(&self, message: &Message) -> bool {
        self.processed.contains(message)
    }

    /// Accept `bit` without a certificate. Used for the honest sender's own
    /// input. Returns true if the bit was new.
    pub fn extract(&mut self, bit: Bit) -> bool {
        self.extracted.insert(bit)
    }

    /// Process a message delivered in `round`.
    ///
    /// Duplicates, certificates of the wrong length and certificates missing
    /// the sender's signature are dropped without error.
    pub fn receive<R: Rng + ?Sized>(&mut self, message: &Message, round: usize, rng: &mut R) {
        if self.processed.contains(message) {
            return;
        }

        if message.signature_count() != required_signatures(round) {
            tracing::trace!(
                participant = self.id,
                round,
                signatures = message.signature_count(),
                "dropping certificate of wrong length"
            );
            return;
        }

        if !message.is_signed_by(SENDER_ID) {
            tracing::trace!(participant = self.id, round, "dropping certificate without sender");
            return;
        }

        self.processed.insert(message.clone());
        self.tally.entry(round).or_default().record(message.bit);

        let newly_extracted = self.extracted.insert(message.bit);
        if !newly_extracted || message.is_signed_by(self.id) {
            return;
        }

        let relay_bit = match &self.behavior {
            Behavior::Honest => Some(message.bit),
            Behavior::Corrupt { strategy, coalition } => {
                let can_forge = message.signers.is_subset(coalition);
                strategy.relay_bit(message.bit, can_forge, rng)
            },
        };

        if let Some(bit) = relay_bit {
            self.pending.push(message.endorse(bit, self.id));
        }
    }

    /// Take every queued message that is valid for broadcast in `round`.
    ///
    /// The queue is always left empty.
    pub fn drain_outgoing(&mut self, round: usize) -> Vec<Message> {
        let queued = std::mem::take(&mut self.pending);
        let before = queued.len();

        let outgoing: Vec<_> = queued
            .into_iter()
            .filter(|message| message.signature_count() == required_signatures(round))
            .collect();

        if outgoing.len() != before {
            tracing::trace!(
                participant = self.id,
                round,
                discarded = before - outgoing.len(),
                "discarding stale outgoing certificates"
            );
        }

        outgoing
    }

    /// Classify the extracted set.
    pub fn decision(&self) -> Decision {
        let mut bits = self.extracted.iter();
        match (bits.next(), bits.next()) {
            (None, _) => Decision::NoCertificate,
            (Some(bit), None) => Decision::Certified(*bit),
            (Some(_), Some(_)) => Decision::Conflicting,
        }
    }

    /// Output bit: the single extracted bit, or `0` otherwise.
    pub fn decide(&self) -> Bit {
        self.decision().bit()
    }
}
