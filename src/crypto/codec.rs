//! Fixed-width encoding of byte strings as scalar field elements.
//!
//! Messages are padded on the right with [`PADDING_BYTE`] to the codec width and
//! read as big-endian integers. No length prefix is embedded: `decode` returns the
//! padded buffer and callers trim to a length they already know.

use num_bigint::BigUint;

use super::group::PairingEngine;
use crate::{Error, Result};

/// Byte appended to messages shorter than the codec width.
pub const PADDING_BYTE: u8 = 0x00;

/// Encoder between byte strings and integers below `2^field_order_bits`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldCodec {
    field_order_bits: u64,
}

impl FieldCodec {
    /// Creates a codec with the given bit capacity.
    pub fn new(field_order_bits: u64) -> Self {
        Self { field_order_bits }
    }

    /// Creates a codec whose encodings always stay strictly below `order`.
    pub fn for_order(order: &BigUint) -> Self {
        Self::new(order.bits().saturating_sub(1))
    }

    /// Bit capacity of the codec.
    pub fn field_order_bits(&self) -> u64 {
        self.field_order_bits
    }

    /// Width in bytes of every padded message.
    pub fn width(&self) -> usize {
        (self.field_order_bits / 8) as usize
    }

    /// Pads `message` on the right to [`FieldCodec::width`] bytes.
    pub fn pad(&self, message: &[u8]) -> Result<Vec<u8>> {
        if (message.len() as u64).saturating_mul(8) > self.field_order_bits {
            return Err(Error::MessageTooLong {
                len: message.len(),
                capacity_bits: self.field_order_bits,
            });
        }

        let mut padded = Vec::with_capacity(self.width());
        padded.extend_from_slice(message);
        padded.resize(self.width(), PADDING_BYTE);
        Ok(padded)
    }

    /// Encodes `message` as an unsigned integer.
    pub fn encode(&self, message: &[u8]) -> Result<BigUint> {
        Ok(BigUint::from_bytes_be(&self.pad(message)?))
    }

    /// Decodes an integer back into its padded, fixed-width byte string.
    pub fn decode(&self, value: &BigUint) -> Result<Vec<u8>> {
        let bytes = value.to_bytes_be();
        let width = self.width();
        if value.bits() > (width as u64) * 8 {
            return Err(Error::InvalidScalar(format!(
                "value of {} bits does not fit a {width}-byte message",
                value.bits()
            )));
        }

        let mut out = vec![0u8; width];
        // zero exports as a single byte
        let start = width.saturating_sub(bytes.len());
        out[start..].copy_from_slice(&bytes[bytes.len() - (width - start)..]);
        Ok(out)
    }

    /// Encodes `message` straight into a scalar of `engine`.
    pub fn encode_scalar<E: PairingEngine>(&self, engine: &E, message: &[u8]) -> Result<E::Scalar> {
        let value = self.encode(message)?;
        if &value >= engine.order() {
            return Err(Error::MessageTooLong {
                len: message.len(),
                capacity_bits: engine.order().bits().saturating_sub(1),
            });
        }
        Ok(engine.scalar_from_biguint(&value))
    }

    /// Decodes a scalar of `engine` into its padded byte string.
    pub fn decode_scalar<E: PairingEngine>(&self, engine: &E, scalar: &E::Scalar) -> Result<Vec<u8>> {
        self.decode(&engine.scalar_to_biguint(scalar))
    }
}

/// Trims a decoded buffer to a plaintext length known out of band.
pub fn trim(decoded: &[u8], len: usize) -> Result<&[u8]> {
    decoded.get(..len).ok_or_else(|| {
        Error::InvalidParams(format!(
            "plaintext length {len} exceeds decoded width {}",
            decoded.len()
        ))
    })
}
