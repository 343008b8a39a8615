use core::fmt;

use tracing::warn;

use super::message::{InitiatorTranscript, ResponderTranscript};
use crate::crypto::PairingEngine;
use crate::{Error, Result};

/// One terminal equality between the initiator's and the responder's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Check {
    /// `t == t'`
    T,
    /// `rA == rA'`
    RandomA,
    /// `rB == rB'`
    RandomB,
    /// `otiB` reproduces from `rB'`
    OtiB,
    /// `tidA == tidA'`
    TidA,
    /// `message == message'`
    Message,
    /// `sharedKey == sharedKey'`
    SharedKey,
    /// `sign == sign'`
    Sign,
}

impl Check {
    /// All checks in evaluation order.
    pub const ALL: [Check; 8] = [
        Check::T,
        Check::RandomA,
        Check::RandomB,
        Check::OtiB,
        Check::TidA,
        Check::Message,
        Check::SharedKey,
        Check::Sign,
    ];
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::T => "t",
            Check::RandomA => "rA",
            Check::RandomB => "rB",
            Check::OtiB => "otiB",
            Check::TidA => "tidA",
            Check::Message => "message",
            Check::SharedKey => "sharedKey",
            Check::Sign => "sign",
        };
        f.write_str(name)
    }
}

/// Outcome of every terminal check of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    results: [(Check, bool); 8],
}

impl VerificationReport {
    /// Compares both views of a run check by check.
    pub fn compare<E: PairingEngine>(
        initiator: &InitiatorTranscript<E>,
        responder: &ResponderTranscript<E>,
    ) -> Self {
        let results = Check::ALL.map(|check| {
            let passed = match check {
                Check::T => initiator.t == responder.t,
                Check::RandomA => initiator.r_a == responder.r_a,
                Check::RandomB => initiator.r_b == responder.r_b,
                Check::OtiB => initiator.oti_b == responder.oti_b,
                Check::TidA => initiator.tid_a == responder.tid_a,
                Check::Message => initiator.message == responder.message,
                Check::SharedKey => initiator.shared_key == responder.shared_key,
                Check::Sign => initiator.sign == responder.sign,
            };
            if !passed {
                warn!(%check, "verification check failed");
            }
            (check, passed)
        });
        Self { results }
    }

    /// Whether a single check held.
    pub fn passed(&self, check: Check) -> bool {
        self.results
            .iter()
            .any(|(c, passed)| *c == check && *passed)
    }

    /// Whether every check held.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, passed)| *passed)
    }

    /// Checks that did not hold, in evaluation order.
    pub fn failures(&self) -> Vec<Check> {
        self.results
            .iter()
            .filter(|(_, passed)| !passed)
            .map(|(check, _)| *check)
            .collect()
    }

    /// Iterates over `(check, passed)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Check, bool)> + '_ {
        self.results.iter().copied()
    }

    /// Fails with the first broken check.
    pub fn into_result(self) -> Result<()> {
        match self.failures().first() {
            Some(check) => Err(Error::ProtocolVerification { check: *check }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (check, passed) in self.iter() {
            writeln!(f, "{check}: {}", if passed { "ok" } else { "ERROR" })?;
        }
        Ok(())
    }
}
