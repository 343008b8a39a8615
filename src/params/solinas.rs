//! Search for Type-A pairing parameters with a Solinas-form group order.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{PairingParameters, Sign};
use crate::crypto::prime::is_probably_prime;
use crate::crypto::SeededRng;
use crate::{Error, Result};

/// Miller-Rabin rounds used for both `r` and `q` (error below 4^-50).
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 50;

/// Cofactor draws per prime `r` before a fresh `r` is searched.
pub const DEFAULT_COFACTOR_ATTEMPTS: u32 = 10;

/// Outer iterations before the search gives up.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;

/// Knobs of the Solinas search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Miller-Rabin rounds per primality test.
    pub rounds: usize,
    /// Cofactor draws per prime `r`.
    pub cofactor_attempts: u32,
    /// Bound on the number of `r` candidates.
    pub max_iterations: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_PRIMALITY_ROUNDS,
            cofactor_attempts: DEFAULT_COFACTOR_ATTEMPTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Generator of [`PairingParameters`].
///
/// Each outer iteration draws a Solinas shape `r = 2^exp2 + sign1 * 2^exp1 + sign0`
/// and, once `r` is probably prime, tries a bounded number of cofactors
/// `h = 12 * u` until `q = h * r - 1` is probably prime too.
#[derive(Clone, Debug, Default)]
pub struct SolinasGenerator {
    config: SearchConfig,
}

impl SolinasGenerator {
    /// Creates a generator with the given search configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search on a stream seeded with `seed`.
    ///
    /// The same `(rbits, qbits, seed)` always yields the same parameters.
    pub fn generate(&self, rbits: u32, qbits: u32, seed: u64) -> Result<PairingParameters> {
        let mut rng = SeededRng::from_seed(seed);
        self.generate_with_rng(rbits, qbits, &mut rng)
    }

    /// Runs the search on a caller-provided stream.
    pub fn generate_with_rng(
        &self,
        rbits: u32,
        qbits: u32,
        rng: &mut SeededRng,
    ) -> Result<PairingParameters> {
        self.check_sizes(rbits, qbits)?;

        // avoid a too small bound, which would lead to a tiny h
        let bit = qbits.saturating_sub(rbits + 3).max(3);
        let cofactor_bound = BigUint::one() << bit;

        for iteration in 1..=self.config.max_iterations {
            let (exp2, sign1) = if rng.unit_f64() < 0.5 {
                (rbits - 1, Sign::Plus)
            } else {
                (rbits, Sign::Minus)
            };
            let exp1 = rng.range_u32(1, exp2);
            let sign0 = if rng.unit_f64() < 0.5 {
                Sign::Plus
            } else {
                Sign::Minus
            };

            let r = solinas_prime_candidate(exp2, exp1, sign1, sign0);
            trace!(iteration, exp2, exp1, %sign1, %sign0, "testing r candidate");

            if !is_probably_prime(&r, self.config.rounds) {
                continue;
            }
            debug!(iteration, exp2, exp1, "found prime r, searching cofactor");

            for attempt in 0..self.config.cofactor_attempts {
                let h = rng.below(&cofactor_bound) * 12u32;
                if h.is_zero() {
                    continue;
                }

                let q = &h * &r - 1u32;
                if is_probably_prime(&q, self.config.rounds) {
                    info!(
                        iteration,
                        attempt,
                        rbits = r.bits(),
                        qbits = q.bits(),
                        "pairing parameters found"
                    );
                    return Ok(PairingParameters {
                        q,
                        r,
                        h,
                        exp1,
                        exp2,
                        sign0,
                        sign1,
                    });
                }
            }
        }

        Err(Error::ParameterSearchExhausted {
            iterations: self.config.max_iterations,
        })
    }

    fn check_sizes(&self, rbits: u32, qbits: u32) -> Result<()> {
        if rbits < 3 {
            return Err(Error::InvalidParams(format!(
                "rbits must be at least 3, got {rbits}"
            )));
        }
        if qbits <= rbits {
            return Err(Error::InvalidParams(format!(
                "qbits ({qbits}) must exceed rbits ({rbits})"
            )));
        }
        if self.config.rounds == 0 || self.config.cofactor_attempts == 0 {
            return Err(Error::InvalidParams(
                "rounds and cofactor attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs the default search; see [`SolinasGenerator::generate`].
pub fn generate(rbits: u32, qbits: u32, seed: u64) -> Result<PairingParameters> {
    SolinasGenerator::default().generate(rbits, qbits, seed)
}

/// `2^exp2 + sign1 * 2^exp1 + sign0` for `1 <= exp1 < exp2`, always positive.
fn solinas_prime_candidate(exp2: u32, exp1: u32, sign1: Sign, sign0: Sign) -> BigUint {
    let mut r = BigUint::one() << exp2;
    let low = BigUint::one() << exp1;
    match sign1 {
        Sign::Plus => r += low,
        Sign::Minus => r -= low,
    }
    match sign0 {
        Sign::Plus => r += 1u32,
        Sign::Minus => r -= 1u32,
    }
    r
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;

    #[test]
    fn candidate_matches_signed_formula() {
        for (exp2, exp1, sign1, sign0) in [
            (10, 3, Sign::Plus, Sign::Minus),
            (10, 9, Sign::Minus, Sign::Minus),
            (64, 1, Sign::Minus, Sign::Plus),
        ] {
            assert_eq!(
                BigInt::from(solinas_prime_candidate(exp2, exp1, sign1, sign0)),
                PairingParameters::solinas_value(exp2, exp1, sign1, sign0)
            );
        }
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(generate(2, 40, 1), Err(Error::InvalidParams(_))));
        assert!(matches!(generate(40, 40, 1), Err(Error::InvalidParams(_))));
        assert!(matches!(generate(40, 30, 1), Err(Error::InvalidParams(_))));
    }

    #[test]
    fn generates_consistent_small_parameters() {
        let params = generate(32, 96, 1).unwrap();

        params.validate().unwrap();
        assert!(is_probably_prime(&params.r, 50));
        assert!(is_probably_prime(&params.q, 50));
        assert_eq!(&params.h * &params.r - 1u32, params.q);
        assert!((&params.h % 12u32).is_zero());
        assert!(params.exp2 == 31 || params.exp2 == 32);
        assert!(params.r.bits() == 31 || params.r.bits() == 32);
    }

    #[test]
    fn deterministic_per_seed() {
        let a = generate(40, 120, 42).unwrap();
        let b = generate(40, 120, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exhaustion_is_reported() {
        // seed 5 finds no prime pair on its single candidate
        let generator = SolinasGenerator::new(SearchConfig {
            rounds: 50,
            cofactor_attempts: 1,
            max_iterations: 1,
        });
        assert!(matches!(
            generator.generate(256, 2048, 5),
            Err(Error::ParameterSearchExhausted { iterations: 1 })
        ));
    }

    #[test]
    fn sign_shape_is_consistent() {
        for seed in 0..4 {
            let params = generate(24, 64, seed).unwrap();
            match params.sign1 {
                Sign::Plus => assert_eq!(params.exp2, 23),
                Sign::Minus => assert_eq!(params.exp2, 24),
            }
            assert!(params.exp1 >= 1 && params.exp1 < params.exp2);
        }
    }
}
