//! Dolev-Strong Byzantine Broadcast simulation.
//!
//! A designated sender broadcasts one bit to a network in which up to `f`
//! participants are controlled by an adversary. After exactly `f + 1`
//! synchronous rounds every honest participant outputs the same bit, and if
//! the sender is honest that bit is the sender's input.
//!
//! ## Architecture
//!
//! ```text
//! dolev-core
//!   ├─ Message       (bit + signer set, the certificate)
//!   ├─ Participant   (per-node state machine, Sans-IO)
//!   ├─ Strategy      (adversary behavior for corrupt participants)
//!   ├─ Network       (round orchestrator, corrupt-set selection)
//!   └─ run_simulation (config in, outputs + history out)
//! ```
//!
//! Signatures are modeled as participant ids. All randomness comes from a
//! caller-supplied [`rand::Rng`], so a seeded generator reproduces a run
//! exactly.
//!
//! # Example
//!
//! ```
//! use dolev_core::{Bit, NetworkConfig, run_simulation};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = NetworkConfig::new(10, Bit::One).with_corrupt(3);
//! let (outputs, history) = run_simulation(config, StdRng::seed_from_u64(7))?;
//!
//! assert_eq!(outputs.len(), 10);
//! assert_eq!(history.len(), 4);
//! # Ok::<(), dolev_core::SimulationError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adversary;
pub mod config;
mod error;
pub mod message;
pub mod network;
pub mod participant;
pub mod tally;

pub use adversary::{AdversaryPolicy, Strategy};
pub use config::{MAX_PARTICIPANTS, MIN_PARTICIPANTS, NetworkConfig};
pub use error::{ConfigError, SimulationError};
pub use message::{Bit, Message, ParticipantId, SENDER_ID, SignerSet};
pub use network::{Network, Outputs};
pub use participant::{Behavior, Decision, Participant, Position};
use rand::Rng;
pub use tally::{History, RoundTally};

/// Build a network from `config`, run it to completion, and return every
/// participant's decision with the per-round message tallies.
///
/// # Errors
///
/// Returns [`SimulationError::Config`] if the configuration is rejected. No
/// participant is built in that case.
pub fn run_simulation<R: Rng>(
    config: NetworkConfig,
    rng: R,
) -> Result<(Outputs, History), SimulationError> {
    let mut network = Network::new(config, rng)?;
    let history = network.run()?;
    Ok((network.outputs(), history))
}
