//! Values exchanged between vehicles and the per-role views of one run.

use crate::crypto::PairingEngine;
use crate::{Error, Result};

/// Message sent by the initiator to the responder.
///
/// Wire layout: `tidA ‖ otiA ‖ otiB ‖ paramsA ‖ paramsB ‖ cyphertext ‖ sign`, each
/// element at its fixed per-group length.
#[derive(Clone, Debug)]
pub struct Envelope<E: PairingEngine> {
    /// Initiator pseudonym for this session.
    pub tid_a: E::G1,
    /// Blinded initiator pseudonym, `tidA^rA`.
    pub oti_a: E::G1,
    /// `g^rB`.
    pub oti_b: E::G1,
    /// `rA + H(t)`.
    pub params_a: E::Scalar,
    /// `rB + H(t)`.
    pub params_b: E::Scalar,
    /// `encode(m) + H(sharedKey)`.
    pub cyphertext: E::Scalar,
    /// `H(sharedKey, encode(m))`.
    pub sign: E::Scalar,
}

impl<E: PairingEngine> Envelope<E> {
    /// Encoded length for `engine`.
    pub fn byte_len(engine: &E) -> usize {
        3 * engine.g1_len() + 4 * engine.scalar_len()
    }

    /// Serializes the envelope.
    pub fn to_bytes(&self, engine: &E) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::byte_len(engine));
        for point in [&self.tid_a, &self.oti_a, &self.oti_b] {
            out.extend_from_slice(&engine.g1_to_bytes(point));
        }
        for scalar in [&self.params_a, &self.params_b, &self.cyphertext, &self.sign] {
            out.extend_from_slice(&engine.scalar_to_bytes(scalar));
        }
        out
    }

    /// Deserializes and validates every element of an envelope.
    pub fn from_bytes(engine: &E, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::byte_len(engine) {
            return Err(Error::InvalidParams(format!(
                "Expected {} envelope bytes, got {}",
                Self::byte_len(engine),
                bytes.len()
            )));
        }

        let mut reader = Reader { bytes };
        Ok(Self {
            tid_a: engine.g1_from_bytes(reader.take(engine.g1_len()))?,
            oti_a: engine.g1_from_bytes(reader.take(engine.g1_len()))?,
            oti_b: engine.g1_from_bytes(reader.take(engine.g1_len()))?,
            params_a: engine.scalar_from_bytes(reader.take(engine.scalar_len()))?,
            params_b: engine.scalar_from_bytes(reader.take(engine.scalar_len()))?,
            cyphertext: engine.scalar_from_bytes(reader.take(engine.scalar_len()))?,
            sign: engine.scalar_from_bytes(reader.take(engine.scalar_len()))?,
        })
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> &'a [u8] {
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        head
    }
}

/// The initiator's record of one data exchange.
#[derive(Clone, Debug)]
pub struct InitiatorTranscript<E: PairingEngine> {
    /// `e(tidB, pubGW)^rB`.
    pub t: E::Gt,
    /// Blinding scalar for `tidA`.
    pub r_a: E::Scalar,
    /// Exponent of `otiB`.
    pub r_b: E::Scalar,
    /// `g^rB`.
    pub oti_b: E::G1,
    /// Initiator pseudonym.
    pub tid_a: E::G1,
    /// Encoded plaintext.
    pub message: E::Scalar,
    /// `e(privKeyA, tidB^nA)`.
    pub shared_key: E::Gt,
    /// `H(sharedKey, message)`.
    pub sign: E::Scalar,
}

/// The responder's recomputation of the same values from an [`Envelope`].
#[derive(Clone, Debug)]
pub struct ResponderTranscript<E: PairingEngine> {
    /// `e(privKeyB, otiB^nB)`.
    pub t: E::Gt,
    /// `paramsA - H(t)`.
    pub r_a: E::Scalar,
    /// `paramsB - H(t)`.
    pub r_b: E::Scalar,
    /// `g^rB` recomputed from the recovered `rB`.
    pub oti_b: E::G1,
    /// `otiA^(1/rA)`.
    pub tid_a: E::G1,
    /// `cyphertext - H(sharedKey)`.
    pub message: E::Scalar,
    /// `e(tidA^nB, privKeyB)`.
    pub shared_key: E::Gt,
    /// `H(sharedKey, message)`.
    pub sign: E::Scalar,
}

impl<E: PairingEngine> ResponderTranscript<E> {
    /// Checks the recomputed values against the envelope alone.
    ///
    /// This is what the responder can verify without the initiator's transcript:
    /// `otiB` reproduces from the recovered `rB` and the recomputed signature matches.
    ///
    /// # Errors
    /// Returns [`Error::ProtocolVerification`] naming the first failed check.
    pub fn authenticate(&self, envelope: &Envelope<E>) -> Result<()> {
        use super::report::Check;

        if self.oti_b != envelope.oti_b {
            return Err(Error::ProtocolVerification { check: Check::OtiB });
        }
        if self.sign != envelope.sign {
            return Err(Error::ProtocolVerification { check: Check::Sign });
        }
        Ok(())
    }
}
