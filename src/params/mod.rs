//! Type-A pairing parameters: data model, text block format and Solinas search.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Text block (de)serialization.
pub mod block;
/// Solinas-prime parameter search.
pub mod solinas;

pub use solinas::{generate, SearchConfig, SolinasGenerator};

/// Sign of a term in the Solinas shape of `r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// `-1`
    Minus,
    /// `+1`
    Plus,
}

impl Sign {
    /// Returns `-1` or `1`.
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Minus => -1,
            Sign::Plus => 1,
        }
    }

    /// Parses `1`, `+1` or `-1`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" | "+1" => Some(Sign::Plus),
            "-1" => Some(Sign::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Domain parameters of a symmetric Type-A pairing.
///
/// `r = 2^exp2 + sign1 * 2^exp1 + sign0` is the (prime) group order, and
/// `q = h * r - 1` is the (prime) base field characteristic with `h` a multiple
/// of 12.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingParameters {
    /// Base field characteristic.
    pub q: BigUint,
    /// Prime order of G1, G2 and GT.
    pub r: BigUint,
    /// Cofactor, `q + 1 = h * r`.
    pub h: BigUint,
    /// Low exponent of the Solinas shape.
    pub exp1: u32,
    /// High exponent of the Solinas shape.
    pub exp2: u32,
    /// Sign of the constant term.
    pub sign0: Sign,
    /// Sign of the `2^exp1` term.
    pub sign1: Sign,
}

impl PairingParameters {
    /// Evaluates `2^exp2 + sign1 * 2^exp1 + sign0`.
    pub fn solinas_value(exp2: u32, exp1: u32, sign1: Sign, sign0: Sign) -> BigInt {
        let high = BigInt::one() << exp2;
        let low = BigInt::one() << exp1;
        high + BigInt::from(sign1.as_i8()) * low + BigInt::from(sign0.as_i8())
    }

    /// Checks the structural identities binding the fields together.
    ///
    /// Primality is not re-tested here; it is established by the generator.
    pub fn validate(&self) -> Result<()> {
        if self.exp1 == 0 || self.exp1 >= self.exp2 {
            return Err(Error::InvalidParams(format!(
                "exponents must satisfy 1 <= exp1 < exp2, got exp1={} exp2={}",
                self.exp1, self.exp2
            )));
        }

        let expected = Self::solinas_value(self.exp2, self.exp1, self.sign1, self.sign0);
        if BigInt::from(self.r.clone()) != expected {
            return Err(Error::InvalidParams(
                "r does not match its Solinas shape".to_string(),
            ));
        }

        if self.h.is_zero() || !(&self.h % 12u32).is_zero() {
            return Err(Error::InvalidParams(
                "cofactor h must be a non-zero multiple of 12".to_string(),
            ));
        }

        if &self.h * &self.r != &self.q + BigUint::one() {
            return Err(Error::InvalidParams("q must equal h * r - 1".to_string()));
        }

        Ok(())
    }
}

/// 2^7 + 2^2 - 1 = 131 (prime), h = 12, q = 1571 (prime, 3 mod 4).
#[cfg(test)]
pub(crate) fn tiny_params() -> PairingParameters {
    PairingParameters {
        q: BigUint::from(1571u32),
        r: BigUint::from(131u32),
        h: BigUint::from(12u32),
        exp1: 2,
        exp2: 7,
        sign0: Sign::Minus,
        sign1: Sign::Plus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_parsing() {
        assert_eq!(Sign::parse("1"), Some(Sign::Plus));
        assert_eq!(Sign::parse("+1"), Some(Sign::Plus));
        assert_eq!(Sign::parse("-1"), Some(Sign::Minus));
        assert_eq!(Sign::parse("0"), None);
        assert_eq!(Sign::Minus.to_string(), "-1");
    }

    #[test]
    fn solinas_value_matches_shape() {
        assert_eq!(
            PairingParameters::solinas_value(7, 2, Sign::Plus, Sign::Minus),
            BigInt::from(131)
        );
        assert_eq!(
            PairingParameters::solinas_value(8, 3, Sign::Minus, Sign::Plus),
            BigInt::from(249)
        );
    }

    #[test]
    fn valid_tiny_params() {
        tiny_params().validate().unwrap();
    }

    #[test]
    fn rejects_broken_identities() {
        let mut params = tiny_params();
        params.q += 2u32;
        assert!(params.validate().is_err());

        let mut params = tiny_params();
        params.exp1 = 7;
        assert!(params.validate().is_err());

        let mut params = tiny_params();
        params.sign0 = Sign::Plus;
        assert!(params.validate().is_err());
    }
}
