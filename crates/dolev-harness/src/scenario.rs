//! Scenario builder.
//!
//! A scenario is one configuration, one seed, and a list of oracles. Running
//! it builds the network, executes every round, and checks each oracle in
//! order against the outcome.
//!
//! ```
//! use dolev_core::{Bit, NetworkConfig};
//! use dolev_harness::{Scenario, oracle};
//!
//! let outcome = Scenario::new(NetworkConfig::new(7, Bit::Zero))
//!     .with_seed(3)
//!     .oracle(Box::new(oracle::agreement))
//!     .run()?;
//!
//! assert_eq!(outcome.history().len(), 3);
//! # Ok::<(), dolev_harness::ScenarioError>(())
//! ```

use dolev_core::{Bit, History, Network, NetworkConfig, Outputs, ParticipantId, SimulationError};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::{
    oracle::{self, Oracle},
    sim_env::SimEnv,
};

/// Failure of a scenario run.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The network could not be built or run.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// An oracle rejected the outcome.
    #[error("oracle {index} failed (seed {seed}): {reason}")]
    OracleFailed {
        /// Position of the oracle in registration order.
        index: usize,
        /// Seed of the failing run.
        seed: u64,
        /// What the oracle observed.
        reason: String,
    },
}

/// A finished run.
#[derive(Debug)]
pub struct Outcome {
    network: Network<ChaCha8Rng>,
    history: History,
    seed: u64,
}

impl Outcome {
    /// The network after its run.
    pub fn network(&self) -> &Network<ChaCha8Rng> {
        &self.network
    }

    /// Per-round tallies returned by the run.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Seed the run was driven by.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Decisions of every participant.
    pub fn outputs(&self) -> Outputs {
        self.network.outputs()
    }

    /// Decisions of honest participants, ordered by id.
    pub fn honest_outputs(&self) -> Vec<(ParticipantId, Bit)> {
        let outputs = self.network.outputs();
        self.network
            .honest_ids()
            .into_iter()
            .filter_map(|id| outputs.get(&id).map(|&bit| (id, bit)))
            .collect()
    }
}

/// Builder for a single seeded run.
pub struct Scenario {
    config: NetworkConfig,
    env: SimEnv,
    oracles: Vec<Oracle>,
}

impl Scenario {
    /// Scenario for `config` with the default seed and no oracles.
    pub fn new(config: NetworkConfig) -> Self {
        Self { config, env: SimEnv::new(), oracles: Vec::new() }
    }

    /// Drive the run from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.env = SimEnv::with_seed(seed);
        self
    }

    /// Add an oracle checked after the run.
    pub fn oracle(mut self, oracle: Oracle) -> Self {
        self.oracles.push(oracle);
        self
    }

    /// Add termination, agreement, validity and extraction consistency.
    pub fn with_standard_oracles(mut self) -> Self {
        self.oracles.extend(oracle::standard());
        self
    }

    /// Build the network, run it, and check every oracle.
    pub fn run(self) -> Result<Outcome, ScenarioError> {
        let seed = self.env.seed();
        let mut network = Network::new(self.config, self.env.rng()).map_err(SimulationError::from)?;
        let history = network.run()?;
        let outcome = Outcome { network, history, seed };

        for (index, oracle) in self.oracles.iter().enumerate() {
            if let Err(reason) = oracle(&outcome) {
                tracing::warn!(index, seed, %reason, "oracle failed");
                return Err(ScenarioError::OracleFailed { index, seed, reason });
            }
        }

        Ok(outcome)
    }
}
