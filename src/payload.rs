//! Randomized transaction payloads.
//!
//! A payload is a single synthetic interbank transfer: a sender, a
//! distinct receiver, and a sum drawn uniformly from a configured range.
//! Sender and receiver come from an immutable roster of bank names fixed
//! at startup.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SpamError;

/// The ten largest US banks, the default sender/receiver domain.
pub const DEFAULT_BANKS: [&str; 10] = [
    "JP Morgan Chase",
    "Bank of America",
    "Wells Fargo",
    "Citigroup",
    "U.S. Bancorp",
    "Truist Financial",
    "PNC Financial Services Group",
    "TD Group US",
    "Bank of New York Mellon",
    "Capital One Financial",
];

/// A single synthetic transfer, serialized as the POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub sender: String,
    pub receiver: String,
    pub sum: i64,
}

/// Immutable set of bank names eligible as sender or receiver.
#[derive(Debug, Clone)]
pub struct BankRoster {
    banks: Vec<String>,
}

impl BankRoster {
    /// Rejects rosters with fewer than two banks: receiver selection
    /// redraws until it differs from the sender, which never terminates
    /// on a singleton roster.
    pub fn new(banks: Vec<String>) -> Result<Self, SpamError> {
        if banks.len() < 2 {
            return Err(SpamError::InvalidConfiguration(format!(
                "bank roster needs at least 2 entries, got {}",
                banks.len()
            )));
        }
        Ok(Self { banks })
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

impl Default for BankRoster {
    fn default() -> Self {
        Self {
            banks: DEFAULT_BANKS.iter().map(|b| b.to_string()).collect(),
        }
    }
}

/// Produces payloads over a validated roster and sum range.
#[derive(Debug, Clone)]
pub struct PayloadGenerator {
    roster: BankRoster,
    lo: i64,
    hi: i64,
}

impl PayloadGenerator {
    pub fn new(roster: BankRoster, lo: i64, hi: i64) -> Result<Self, SpamError> {
        if lo > hi {
            return Err(SpamError::InvalidConfiguration(format!(
                "sum range is inverted: lo {lo} > hi {hi}"
            )));
        }
        Ok(Self { roster, lo, hi })
    }

    /// Draws one payload. Sender is uniform over the roster; receiver is
    /// redrawn until distinct (expected attempts N/(N-1) for roster size
    /// N); sum is uniform over `[lo, hi]` inclusive.
    pub fn generate(&self) -> Payload {
        let mut rng = rand::thread_rng();
        let banks = &self.roster.banks;

        let sender = banks[rng.gen_range(0..banks.len())].clone();
        // Terminates because the roster holds at least two banks.
        let receiver = loop {
            let candidate = &banks[rng.gen_range(0..banks.len())];
            if *candidate != sender {
                break candidate.clone();
            }
        };

        Payload {
            sender,
            receiver,
            sum: rng.gen_range(self.lo..=self.hi),
        }
    }

    pub fn batch(&self, n: usize) -> Vec<Payload> {
        (0..n).map(|_| self.generate()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn generator(lo: i64, hi: i64) -> PayloadGenerator {
        PayloadGenerator::new(BankRoster::default(), lo, hi).unwrap()
    }

    #[test]
    fn default_roster_has_ten_banks() {
        assert_eq!(BankRoster::default().len(), 10);
    }

    #[test]
    fn sender_never_equals_receiver() {
        let gen = generator(1, 1000);
        for _ in 0..5_000 {
            let p = gen.generate();
            assert_ne!(p.sender, p.receiver);
        }
    }

    #[test]
    fn two_bank_roster_still_terminates() {
        let roster = BankRoster::new(vec!["Alpha".into(), "Beta".into()]).unwrap();
        let gen = PayloadGenerator::new(roster, 1, 10).unwrap();
        for _ in 0..1_000 {
            let p = gen.generate();
            assert_ne!(p.sender, p.receiver);
        }
    }

    #[rstest]
    #[case(1, 1000)]
    #[case(0, 0)]
    #[case(-50, 50)]
    #[case(42, 42)]
    fn sum_stays_in_closed_range(#[case] lo: i64, #[case] hi: i64) {
        let gen = generator(lo, hi);
        for _ in 0..2_000 {
            let p = gen.generate();
            assert!(p.sum >= lo && p.sum <= hi, "sum {} outside [{lo}, {hi}]", p.sum);
        }
    }

    #[test]
    fn sum_distribution_is_roughly_uniform() {
        let gen = generator(1, 10);
        let mut counts: HashMap<i64, usize> = HashMap::new();
        let samples = 10_000;
        for _ in 0..samples {
            *counts.entry(gen.generate().sum).or_default() += 1;
        }
        assert_eq!(counts.len(), 10, "every value in range should appear");
        for (value, count) in counts {
            // Expected 1000 per bucket; allow a generous band.
            assert!(
                (700..=1300).contains(&count),
                "value {value} drawn {count} times, expected ~1000"
            );
        }
    }

    #[test]
    fn singleton_roster_is_rejected() {
        let err = BankRoster::new(vec!["Lone Bank".into()]).unwrap_err();
        assert!(matches!(err, SpamError::InvalidConfiguration(_)));
    }

    #[test]
    fn empty_roster_is_rejected() {
        let err = BankRoster::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SpamError::InvalidConfiguration(_)));
    }

    #[test]
    fn inverted_sum_range_is_rejected() {
        let err = PayloadGenerator::new(BankRoster::default(), 10, 1).unwrap_err();
        assert!(matches!(err, SpamError::InvalidConfiguration(_)));
    }

    #[test]
    fn payload_serializes_with_expected_fields() {
        let p = Payload {
            sender: "Alpha".into(),
            receiver: "Beta".into(),
            sum: 250,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sender": "Alpha", "receiver": "Beta", "sum": 250})
        );
    }
}
