//! `type a` parameter block, one `key value` pair per line.

use core::fmt;
use core::str::FromStr;

use num_bigint::BigUint;

use super::{PairingParameters, Sign};
use crate::{Error, Result};

/// Block type tag for symmetric Type-A pairings.
pub const TYPE_A: &str = "a";

/// Upper bound on the block size accepted by the parser.
const MAX_BLOCK_LEN: usize = 64 * 1024;

impl PairingParameters {
    /// Renders the parameters as a newline-separated `type a` block.
    pub fn to_block(&self) -> String {
        format!(
            "type {TYPE_A}\nq {}\nr {}\nh {}\nexp1 {}\nexp2 {}\nsign0 {}\nsign1 {}\n",
            self.q, self.r, self.h, self.exp1, self.exp2, self.sign0, self.sign1
        )
    }

    /// Parses a `type a` block and checks its structural identities.
    ///
    /// Keys may come in any order and blank lines are ignored. A missing,
    /// duplicated or unknown key is a [`Error::MalformedParameterBlock`].
    pub fn from_block(text: &str) -> Result<Self> {
        if text.len() > MAX_BLOCK_LEN {
            return Err(Error::MalformedParameterBlock(format!(
                "block too large: {} bytes",
                text.len()
            )));
        }

        let mut fields = BlockFields::default();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or_default();
            let value = parts.next().ok_or_else(|| {
                Error::MalformedParameterBlock(format!("line {}: missing value for {key}", lineno + 1))
            })?;
            if parts.next().is_some() {
                return Err(Error::MalformedParameterBlock(format!(
                    "line {}: trailing data after {key}",
                    lineno + 1
                )));
            }

            fields.set(key, value)?;
        }

        let params = fields.finish()?;
        params
            .validate()
            .map_err(|e| Error::MalformedParameterBlock(e.to_string()))?;
        Ok(params)
    }
}

impl fmt::Display for PairingParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_block())
    }
}

impl FromStr for PairingParameters {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_block(s)
    }
}

#[derive(Default)]
struct BlockFields {
    kind: Option<String>,
    q: Option<BigUint>,
    r: Option<BigUint>,
    h: Option<BigUint>,
    exp1: Option<u32>,
    exp2: Option<u32>,
    sign0: Option<Sign>,
    sign1: Option<Sign>,
}

impl BlockFields {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "type" => store(&mut self.kind, key, value.to_string()),
            "q" => store(&mut self.q, key, parse_integer(key, value)?),
            "r" => store(&mut self.r, key, parse_integer(key, value)?),
            "h" => store(&mut self.h, key, parse_integer(key, value)?),
            "exp1" => store(&mut self.exp1, key, parse_exponent(key, value)?),
            "exp2" => store(&mut self.exp2, key, parse_exponent(key, value)?),
            "sign0" => store(&mut self.sign0, key, parse_sign(key, value)?),
            "sign1" => store(&mut self.sign1, key, parse_sign(key, value)?),
            other => Err(Error::MalformedParameterBlock(format!(
                "unknown key: {other}"
            ))),
        }
    }

    fn finish(self) -> Result<PairingParameters> {
        let kind = require(self.kind, "type")?;
        if kind != TYPE_A {
            return Err(Error::MalformedParameterBlock(format!(
                "unsupported pairing type: {kind}"
            )));
        }

        Ok(PairingParameters {
            q: require(self.q, "q")?,
            r: require(self.r, "r")?,
            h: require(self.h, "h")?,
            exp1: require(self.exp1, "exp1")?,
            exp2: require(self.exp2, "exp2")?,
            sign0: require(self.sign0, "sign0")?,
            sign1: require(self.sign1, "sign1")?,
        })
    }
}

fn store<T>(slot: &mut Option<T>, key: &str, value: T) -> Result<()> {
    if slot.is_some() {
        return Err(Error::MalformedParameterBlock(format!(
            "duplicate key: {key}"
        )));
    }
    *slot = Some(value);
    Ok(())
}

fn require<T>(slot: Option<T>, key: &str) -> Result<T> {
    slot.ok_or_else(|| Error::MalformedParameterBlock(format!("missing key: {key}")))
}

fn parse_integer(key: &str, value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        Error::MalformedParameterBlock(format!("{key}: not a decimal integer: {value}"))
    })
}

fn parse_exponent(key: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|e| {
        Error::MalformedParameterBlock(format!("{key}: invalid exponent {value}: {e}"))
    })
}

fn parse_sign(key: &str, value: &str) -> Result<Sign> {
    Sign::parse(value).ok_or_else(|| {
        Error::MalformedParameterBlock(format!("{key}: expected 1, +1 or -1, got {value}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::tiny_params;

    const TINY_BLOCK: &str = "type a\nq 1571\nr 131\nh 12\nexp1 2\nexp2 7\nsign0 -1\nsign1 1\n";

    #[test]
    fn renders_expected_layout() {
        assert_eq!(tiny_params().to_block(), TINY_BLOCK);
        assert_eq!(tiny_params().to_string(), TINY_BLOCK);
    }

    #[test]
    fn parses_rendered_block() {
        let parsed = PairingParameters::from_block(TINY_BLOCK).unwrap();
        assert_eq!(parsed, tiny_params());
    }

    #[test]
    fn tolerates_order_blank_lines_and_plus_sign() {
        let text = "\ntype a\nsign1 +1\nr 131\n\nq 1571\nh 12\nexp2 7\nexp1 2\nsign0 -1";
        let parsed: PairingParameters = text.parse().unwrap();
        assert_eq!(parsed, tiny_params());
    }

    #[test]
    fn rejects_missing_key() {
        let text = TINY_BLOCK.replace("h 12\n", "");
        let err = PairingParameters::from_block(&text).unwrap_err();
        assert!(matches!(err, Error::MalformedParameterBlock(msg) if msg.contains("missing key: h")));
    }

    #[test]
    fn rejects_duplicate_and_unknown_keys() {
        let dup = format!("{TINY_BLOCK}q 1571\n");
        assert!(matches!(
            PairingParameters::from_block(&dup),
            Err(Error::MalformedParameterBlock(_))
        ));

        let unknown = format!("{TINY_BLOCK}genus 1\n");
        assert!(matches!(
            PairingParameters::from_block(&unknown),
            Err(Error::MalformedParameterBlock(_))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        for text in [
            TINY_BLOCK.replace("q 1571", "q 15x1"),
            TINY_BLOCK.replace("sign0 -1", "sign0 0"),
            TINY_BLOCK.replace("exp1 2", "exp1 -2"),
            TINY_BLOCK.replace("type a", "type d"),
            TINY_BLOCK.replace("r 131", "r"),
        ] {
            assert!(
                matches!(
                    PairingParameters::from_block(&text),
                    Err(Error::MalformedParameterBlock(_))
                ),
                "block should be rejected:\n{text}"
            );
        }
    }

    #[test]
    fn rejects_inconsistent_values() {
        let text = TINY_BLOCK.replace("q 1571", "q 1573");
        assert!(matches!(
            PairingParameters::from_block(&text),
            Err(Error::MalformedParameterBlock(_))
        ));
    }
}
