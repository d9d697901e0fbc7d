//! Oracles over a finished run.
//!
//! Each oracle checks one protocol property against an [`Outcome`] and
//! returns a human-readable reason when the property is violated.

use dolev_core::{Bit, SENDER_ID};

use crate::scenario::Outcome;

/// Boxed oracle as accepted by [`crate::Scenario::oracle`].
pub type Oracle = Box<dyn Fn(&Outcome) -> Result<(), String>>;

/// All honest participants output the same bit.
pub fn agreement(outcome: &Outcome) -> Result<(), String> {
    let decided = outcome.honest_outputs();
    let mut bits = decided.iter().map(|(_, bit)| *bit);

    match bits.next() {
        Some(first) if bits.any(|bit| bit != first) => {
            Err(format!("honest participants disagree: {decided:?}"))
        },
        _ => Ok(()),
    }
}

/// With an honest sender, every honest participant outputs the input bit.
pub fn validity(outcome: &Outcome) -> Result<(), String> {
    let network = outcome.network();
    if network.corrupt_ids().contains(&SENDER_ID) {
        return Ok(());
    }

    let input: Bit = network.config().input_bit;
    let wrong: Vec<_> =
        outcome.honest_outputs().into_iter().filter(|(_, bit)| *bit != input).collect();

    if wrong.is_empty() {
        Ok(())
    } else {
        Err(format!("honest sender broadcast {input}, but {wrong:?} decided otherwise"))
    }
}

/// Exactly `num_corrupt + 1` rounds ran, each with a history entry.
pub fn termination(outcome: &Outcome) -> Result<(), String> {
    let network = outcome.network();
    let expected = network.config().max_rounds();

    if network.rounds_completed() != expected {
        return Err(format!("ran {} rounds, expected {expected}", network.rounds_completed()));
    }

    if outcome.history().len() != expected {
        return Err(format!(
            "history has {} rounds, expected {expected}",
            outcome.history().len()
        ));
    }

    Ok(())
}

/// All honest participants end with the same extracted set.
///
/// Stronger than [`agreement`]: it also catches runs where honest
/// participants only agree because of the default output.
pub fn consistent_extraction(outcome: &Outcome) -> Result<(), String> {
    let network = outcome.network();
    let sets: Vec<_> = network
        .participants()
        .filter(|p| !p.is_corrupt())
        .map(|p| (p.id(), p.extracted().clone()))
        .collect();

    match sets.split_first() {
        Some(((_, first), rest)) if rest.iter().any(|(_, set)| set != first) => {
            Err(format!("honest extracted sets differ: {sets:?}"))
        },
        _ => Ok(()),
    }
}

/// Every oracle above, in a fixed order.
pub fn standard() -> Vec<Oracle> {
    let oracles: [Oracle; 4] = [
        Box::new(termination),
        Box::new(agreement),
        Box::new(validity),
        Box::new(consistent_extraction),
    ];
    oracles.into()
}
