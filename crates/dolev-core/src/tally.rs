//! Per-round message counters. Observability only.

use std::collections::BTreeMap;

use crate::message::Bit;

/// Count of bit-0 and bit-1 messages in one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTally {
    /// Messages carrying `0`.
    pub bit0: usize,
    /// Messages carrying `1`.
    pub bit1: usize,
}

impl RoundTally {
    /// Count one message.
    pub fn record(&mut self, bit: Bit) {
        match bit {
            Bit::Zero => self.bit0 += 1,
            Bit::One => self.bit1 += 1,
        }
    }

    /// Count for a single bit value.
    pub fn count(&self, bit: Bit) -> usize {
        match bit {
            Bit::Zero => self.bit0,
            Bit::One => self.bit1,
        }
    }

    /// Messages of either bit.
    pub fn total(&self) -> usize {
        self.bit0 + self.bit1
    }
}

/// Round number to message tally, ordered by round.
pub type History = BTreeMap<usize, RoundTally>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_each_bit() {
        let mut tally = RoundTally::default();
        tally.record(Bit::One);
        tally.record(Bit::One);
        tally.record(Bit::Zero);

        assert_eq!(tally, RoundTally { bit0: 1, bit1: 2 });
        assert_eq!(tally.count(Bit::One), 2);
        assert_eq!(tally.total(), 3);
    }
}
