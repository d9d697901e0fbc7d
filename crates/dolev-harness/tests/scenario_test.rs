//! Named broadcast scenarios.
//!
//! Each test drives one configuration through the harness and relies on the
//! oracles for the protocol guarantees, adding scenario-specific checks on
//! top.

use dolev_core::{
    AdversaryPolicy, Bit, ConfigError, Decision, NetworkConfig, SENDER_ID, SimulationError,
    Strategy, run_simulation,
};
use dolev_harness::{Outcome, Scenario, ScenarioError, SimEnv, oracle};

#[test]
fn honest_sender_ten_participants_three_corrupt() {
    let config = NetworkConfig::new(10, Bit::One).with_corrupt(3);
    assert_eq!(config.max_rounds(), 4);

    for seed in 0..25 {
        let outcome = Scenario::new(config.clone())
            .with_seed(seed)
            .with_standard_oracles()
            .run()
            .expect("honest sender scenario should satisfy every oracle");

        let honest = outcome.honest_outputs();
        assert_eq!(honest.len(), 7);
        assert!(honest.iter().all(|(_, bit)| *bit == Bit::One));
        assert_eq!(outcome.network().rounds_completed(), 4);
    }
}

#[test]
fn corrupt_sender_four_participants_agree() {
    let config = NetworkConfig::new(4, Bit::One).with_corrupt(1).with_corrupt_sender(true);

    for seed in 0..50 {
        let outcome = Scenario::new(config.clone())
            .with_seed(seed)
            .with_standard_oracles()
            .run()
            .expect("corrupt sender scenario should still reach agreement");

        assert_eq!(outcome.network().corrupt_ids(), vec![SENDER_ID]);
        assert_eq!(outcome.honest_outputs().len(), 3);
    }
}

#[test]
fn corrupt_count_equal_to_network_is_rejected() {
    let result = Scenario::new(NetworkConfig::new(6, Bit::One).with_corrupt(6)).run();

    match result {
        Err(ScenarioError::Simulation(SimulationError::Config(err))) => {
            assert_eq!(err, ConfigError::TooManyCorrupt { corrupt: 6, participants: 6 });
        },
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn oversized_network_is_rejected() {
    let result = run_simulation(NetworkConfig::new(51, Bit::Zero), SimEnv::new().rng());
    assert!(result.is_err_and(|err| err.is_config()));
}

#[test]
fn invalid_input_bit_is_rejected() {
    assert_eq!(Bit::try_from(2u8), Err(ConfigError::InvalidBit { value: 2 }));
}

#[test]
fn run_simulation_defaults_to_a_third_corrupt() {
    let config = NetworkConfig::new(10, Bit::One);
    assert_eq!(config.num_corrupt, 3);

    let (outputs, history) = run_simulation(config, SimEnv::with_seed(5).rng()).unwrap();

    assert_eq!(outputs.len(), 10);
    assert_eq!(history.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(history[&0].bit1, 9);
    assert_eq!(history[&0].bit0, 0);
}

#[test]
fn minimum_network_without_corruption() {
    for input in [Bit::Zero, Bit::One] {
        let outcome = Scenario::new(NetworkConfig::new(2, input).with_corrupt(0))
            .with_standard_oracles()
            .run()
            .unwrap();

        assert_eq!(outcome.history().len(), 1);
        assert!(outcome.outputs().values().all(|&bit| bit == input));
    }
}

#[test]
fn every_pinned_strategy_with_corrupt_sender() {
    for strategy in Strategy::ALL {
        let config = NetworkConfig::new(13, Bit::One)
            .with_corrupt(4)
            .with_corrupt_sender(true)
            .with_adversary(AdversaryPolicy::Fixed(strategy));

        for seed in 0..10 {
            Scenario::new(config.clone())
                .with_seed(seed)
                .with_standard_oracles()
                .run()
                .unwrap_or_else(|err| panic!("{strategy:?}: {err}"));
        }
    }
}

#[test]
fn every_pinned_strategy_with_honest_sender() {
    for strategy in Strategy::ALL {
        let config = NetworkConfig::new(16, Bit::Zero)
            .with_corrupt(5)
            .with_adversary(AdversaryPolicy::Fixed(strategy));

        for seed in 0..10 {
            let outcome = Scenario::new(config.clone())
                .with_seed(seed)
                .with_standard_oracles()
                .run()
                .unwrap_or_else(|err| panic!("{strategy:?}: {err}"));

            assert!(outcome.honest_outputs().iter().all(|(_, bit)| *bit == Bit::Zero));
        }
    }
}

#[test]
fn silent_sender_defaults_to_zero() {
    let config = NetworkConfig::new(8, Bit::One)
        .with_corrupt(2)
        .with_corrupt_sender(true)
        .with_adversary(AdversaryPolicy::Fixed(Strategy::Silent));

    let outcome = Scenario::new(config).with_standard_oracles().run().unwrap();

    for id in outcome.network().honest_ids() {
        let participant = outcome.network().participant(id).unwrap();
        assert_eq!(participant.decision(), Decision::NoCertificate);
    }
    assert!(outcome.honest_outputs().iter().all(|(_, bit)| *bit == Bit::Zero));
}

#[test]
fn equivocating_sender_conflicts_are_shared() {
    let config = NetworkConfig::new(10, Bit::One)
        .with_corrupt(3)
        .with_corrupt_sender(true)
        .with_adversary(AdversaryPolicy::Fixed(Strategy::Equivocate));

    let mut saw_conflict = false;
    for seed in 0..40 {
        let outcome =
            Scenario::new(config.clone()).with_seed(seed).with_standard_oracles().run().unwrap();

        let decisions: Vec<_> = outcome
            .network()
            .honest_ids()
            .into_iter()
            .filter_map(|id| outcome.network().participant(id).map(|p| p.decision()))
            .collect();
        saw_conflict |= decisions.iter().all(|d| *d == Decision::Conflicting);
    }

    assert!(saw_conflict, "equivocation should split the sender's bit in some run");
}

#[test]
fn failing_oracle_reports_seed() {
    let result = Scenario::new(NetworkConfig::new(4, Bit::One))
        .with_seed(77)
        .oracle(Box::new(|_: &Outcome| -> Result<(), String> { Err("always fails".to_string()) }))
        .run();

    match result {
        Err(ScenarioError::OracleFailed { index, seed, reason }) => {
            assert_eq!(index, 0);
            assert_eq!(seed, 77);
            assert_eq!(reason, "always fails");
        },
        other => panic!("expected oracle failure, got {other:?}"),
    }
}

#[test]
fn agreement_oracle_alone() {
    let outcome = Scenario::new(NetworkConfig::new(7, Bit::Zero))
        .oracle(Box::new(oracle::agreement))
        .run()
        .unwrap();
    assert_eq!(outcome.seed(), dolev_harness::DEFAULT_SEED);
}
