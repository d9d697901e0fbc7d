//! Deterministic simulation harness for the Dolev-Strong broadcast.
//!
//! Seeded runs plus oracles that check the protocol's guarantees on every
//! outcome.
//!
//! # Oracles
//!
//! - Termination: exactly `f + 1` rounds ran
//! - Agreement: honest participants output the same bit
//! - Validity: with an honest sender, that bit is the input
//! - Consistent extraction: honest participants extracted the same set

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod oracle;
pub mod scenario;
pub mod sim_env;

pub use oracle::Oracle;
pub use scenario::{Outcome, Scenario, ScenarioError};
pub use sim_env::{DEFAULT_SEED, SimEnv};
