//! Round orchestrator.
//!
//! Builds the participant set, picks the corrupt coalition, and drives the
//! synchronous rounds of the protocol.
//!
//! ## Round model
//!
//! ```text
//! round 0      sender ──(bit, {1})──▶ every other participant
//! round r ≥ 1  collect: drain every participant's queue
//!              deliver: fan each message out to every other participant
//! ```
//!
//! Collection for round `r` finishes before any delivery of round `r`, so a
//! message produced while handling round `r` is never seen before round
//! `r + 1`.

use std::collections::BTreeMap;

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::NetworkConfig,
    error::{ConfigError, SimulationError},
    message::{Bit, Message, ParticipantId, SENDER_ID},
    participant::{Participant, Position},
    tally::History,
};

/// Participant id to decided bit.
pub type Outputs = BTreeMap<ParticipantId, Bit>;

/// A single-use simulated network.
///
/// All randomness, from corrupt-set selection to every adversary choice, is
/// drawn from the injected `rng`.
#[derive(Debug)]
pub struct Network<R> {
    config: NetworkConfig,
    participants: BTreeMap<ParticipantId, Participant>,
    rng: R,
    history: History,
    rounds_completed: usize,
    has_run: bool,
}

impl<R: Rng> Network<R> {
    /// Validate `config` and build every participant.
    ///
    /// Nothing is built if the configuration is rejected.
    pub fn new(config: NetworkConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let last_id = ParticipantId::try_from(config.num_participants).map_err(|_| {
            ConfigError::TooManyParticipants {
                max: crate::config::MAX_PARTICIPANTS,
                actual: config.num_participants,
            }
        })?;

        let mut participants: BTreeMap<_, _> = (SENDER_ID..=last_id)
            .map(|id| {
                let position = if id == SENDER_ID { Position::Sender } else { Position::Relay };
                (id, Participant::new(id, position))
            })
            .collect();

        let coalition = select_corrupt(&config, last_id, &mut rng);
        for id in &coalition {
            let strategy = config.adversary.assign(&mut rng);
            if let Some(participant) = participants.get_mut(id) {
                participant.corrupt(strategy, coalition.clone());
            }
        }

        if let Some(sender) = participants.get_mut(&SENDER_ID) {
            if !sender.is_corrupt() {
                sender.extract(config.input_bit);
            }
        }

        tracing::debug!(corrupt = ?coalition, "selected corrupt coalition");
        tracing::info!(
            participants = config.num_participants,
            corrupt = config.num_corrupt,
            corrupt_sender = coalition.contains(&SENDER_ID),
            input = %config.input_bit,
            "network built"
        );

        Ok(Self {
            config,
            participants,
            rng,
            history: History::new(),
            rounds_completed: 0,
            has_run: false,
        })
    }

    /// Execute all `num_corrupt + 1` rounds and return the per-round tallies.
    ///
    /// A network runs once; later calls fail with
    /// [`SimulationError::AlreadyRun`].
    pub fn run(&mut self) -> Result<History, SimulationError> {
        if self.has_run {
            return Err(SimulationError::AlreadyRun);
        }
        self.has_run = true;

        let seed = self.seed_round();
        self.deliver(0, seed);

        for round in 1..self.config.max_rounds() {
            let batch = self.collect_round(round);
            self.deliver(round, batch);
        }

        tracing::info!(
            rounds = self.rounds_completed,
            messages = self.history.values().map(|t| t.total()).sum::<usize>(),
            "broadcast complete"
        );

        Ok(self.history.clone())
    }

    /// Round-0 deliveries from the sender.
    fn seed_round(&mut self) -> Vec<(ParticipantId, Message)> {
        let input = self.config.input_bit;
        let recipients = self.participants.keys().copied().filter(|&id| id != SENDER_ID);

        match self.participants.get(&SENDER_ID).and_then(Participant::strategy) {
            None => recipients.map(|id| (id, Message::from_sender(input))).collect(),
            Some(strategy) => recipients
                .filter_map(|id| {
                    strategy
                        .seed_bit(input, &mut self.rng)
                        .map(|bit| (id, Message::from_sender(bit)))
                })
                .collect(),
        }
    }

    /// Drain every queue and address each message to everyone but its relayer.
    fn collect_round(&mut self, round: usize) -> Vec<(ParticipantId, Message)> {
        let ids: Vec<_> = self.participants.keys().copied().collect();
        let mut batch = Vec::new();

        for (&from, participant) in &mut self.participants {
            for message in participant.drain_outgoing(round) {
                for &to in ids.iter().filter(|&&to| to != from) {
                    batch.push((to, message.clone()));
                }
            }
        }

        batch
    }

    fn deliver(&mut self, round: usize, batch: Vec<(ParticipantId, Message)>) {
        let tally = self.history.entry(round).or_default();

        for (to, message) in batch {
            tally.record(message.bit);
            if let Some(participant) = self.participants.get_mut(&to) {
                participant.receive(&message, round, &mut self.rng);
            }
        }

        tracing::debug!(round, bit0 = tally.bit0, bit1 = tally.bit1, "round delivered");
        self.rounds_completed += 1;
    }

    /// Decided bit of every participant.
    pub fn outputs(&self) -> Outputs {
        self.participants.iter().map(|(&id, participant)| (id, participant.decide())).collect()
    }

    /// Ids of honest participants, ascending.
    pub fn honest_ids(&self) -> Vec<ParticipantId> {
        self.participants.values().filter(|p| !p.is_corrupt()).map(Participant::id).collect()
    }

    /// Ids of corrupt participants, ascending.
    pub fn corrupt_ids(&self) -> Vec<ParticipantId> {
        self.participants.values().filter(|p| p.is_corrupt()).map(Participant::id).collect()
    }

    /// Look up a participant.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// All participants, ordered by id.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    /// Configuration this network was built from.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Rounds executed so far.
    pub fn rounds_completed(&self) -> usize {
        self.rounds_completed
    }

    /// Per-round delivery tallies recorded so far.
    pub fn history(&self) -> &History {
        &self.history
    }
}

/// Pick the corrupt ids. A requested corrupt sender takes one of the slots.
fn select_corrupt<R: Rng + ?Sized>(
    config: &NetworkConfig,
    last_id: ParticipantId,
    rng: &mut R,
) -> std::collections::BTreeSet<ParticipantId> {
    let mut chosen = std::collections::BTreeSet::new();
    if config.num_corrupt == 0 {
        return chosen;
    }

    let mut remaining = config.num_corrupt;
    if config.corrupt_sender {
        chosen.insert(SENDER_ID);
        remaining -= 1;
    }

    let relays: Vec<ParticipantId> = (SENDER_ID + 1..=last_id).collect();
    chosen.extend(relays.choose_multiple(rng, remaining).copied());
    chosen
}
