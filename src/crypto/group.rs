use core::fmt::{self, Debug};

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::Result;

/// Trait for symmetric bilinear groups used by the authentication protocol.
///
/// The engine owns the pairing context (field sizes, group order) and exposes the
/// operations valid per group: scalars (`Zr`) add, subtract, multiply and invert;
/// `G1` and `GT` elements combine and exponentiate; only `G1 x G1` pairs into `GT`.
/// Every element has a fixed-length big-endian byte form whose length is derived
/// from the field order.
pub trait PairingEngine: Clone + Debug + Send + Sync + 'static {
    /// Scalar type (exponents, nonces, encoded messages).
    ///
    /// Scalars must be zeroizable for security.
    type Scalar: Clone + Debug + Eq + PartialEq + Zeroize + Send + Sync;

    /// Source group element (G1 = G2 for a symmetric pairing).
    type G1: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Target group element.
    type Gt: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Returns the name of this engine.
    fn name(&self) -> &'static str;

    /// Returns the prime order `r` shared by G1, GT and the scalar field.
    fn order(&self) -> &BigUint;

    /// Byte length of a serialized scalar.
    fn scalar_len(&self) -> usize;

    /// Byte length of a serialized G1 element.
    fn g1_len(&self) -> usize;

    /// Byte length of a serialized GT element.
    fn gt_len(&self) -> usize;

    /// Generates a uniformly random non-zero scalar.
    fn random_scalar<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Scalar;

    /// Generates a uniformly random non-identity G1 element.
    fn random_g1<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::G1;

    /// Generates a uniformly random GT element.
    fn random_gt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Self::Gt;

    /// Sets a scalar from an integer, reducing modulo `r`.
    fn scalar_from_biguint(&self, value: &BigUint) -> Self::Scalar;

    /// Returns the canonical integer value of a scalar, in `[0, r)`.
    fn scalar_to_biguint(&self, s: &Self::Scalar) -> BigUint;

    /// Adds two scalars: `a + b`.
    fn scalar_add(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Subtracts two scalars: `a - b`.
    fn scalar_sub(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Multiplies two scalars: `a * b`.
    fn scalar_mul(&self, a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Computes the multiplicative inverse of a scalar.
    ///
    /// Returns `None` for zero.
    fn scalar_invert(&self, s: &Self::Scalar) -> Option<Self::Scalar>;

    /// Checks if a scalar is zero.
    fn scalar_is_zero(&self, s: &Self::Scalar) -> bool;

    /// Returns the identity element of G1.
    fn g1_identity(&self) -> Self::G1;

    /// Checks if a G1 element is the identity.
    fn g1_is_identity(&self, e: &Self::G1) -> bool;

    /// Group operation in G1.
    fn g1_add(&self, a: &Self::G1, b: &Self::G1) -> Self::G1;

    /// Exponentiation in G1: `e^s`.
    fn g1_mul(&self, e: &Self::G1, s: &Self::Scalar) -> Self::G1;

    /// Returns the identity element of GT.
    fn gt_identity(&self) -> Self::Gt;

    /// Group operation in GT.
    fn gt_mul(&self, a: &Self::Gt, b: &Self::Gt) -> Self::Gt;

    /// Exponentiation in GT: `e^s`.
    fn gt_pow(&self, e: &Self::Gt, s: &Self::Scalar) -> Self::Gt;

    /// Evaluates the bilinear map `e: G1 x G1 -> GT`.
    fn pairing(&self, a: &Self::G1, b: &Self::G1) -> Self::Gt;

    /// Serializes a scalar to exactly [`PairingEngine::scalar_len`] bytes.
    fn scalar_to_bytes(&self, s: &Self::Scalar) -> Vec<u8>;

    /// Deserializes a scalar, rejecting wrong lengths and values `>= r`.
    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Self::Scalar>;

    /// Serializes a G1 element to exactly [`PairingEngine::g1_len`] bytes.
    fn g1_to_bytes(&self, e: &Self::G1) -> Vec<u8>;

    /// Deserializes and validates a G1 element.
    fn g1_from_bytes(&self, bytes: &[u8]) -> Result<Self::G1>;

    /// Serializes a GT element to exactly [`PairingEngine::gt_len`] bytes.
    fn gt_to_bytes(&self, e: &Self::Gt) -> Vec<u8>;

    /// Deserializes and validates a GT element.
    fn gt_from_bytes(&self, bytes: &[u8]) -> Result<Self::Gt>;

    /// Derives a scalar deterministically from a hash seed.
    fn scalar_from_hash(&self, seed: &[u8]) -> Self::Scalar;

    /// Derives a G1 element deterministically from a hash seed.
    fn g1_from_hash(&self, seed: &[u8]) -> Self::G1;

    /// Derives a GT element deterministically from a hash seed.
    fn gt_from_hash(&self, seed: &[u8]) -> Self::Gt;
}

/// The algebraic group an element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// First source group.
    G1,
    /// Second source group; coincides with G1 for symmetric pairings.
    G2,
    /// Target group.
    Gt,
    /// Scalar field.
    Zr,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::G1 => "G1",
            GroupKind::G2 => "G2",
            GroupKind::Gt => "GT",
            GroupKind::Zr => "Zr",
        };
        f.write_str(name)
    }
}

/// Borrowed element of any group of an engine, tagged by its group.
pub enum ElementRef<'a, E: PairingEngine> {
    /// A scalar.
    Scalar(&'a E::Scalar),
    /// A source group element.
    G1(&'a E::G1),
    /// A target group element.
    Gt(&'a E::Gt),
}

impl<'a, E: PairingEngine> ElementRef<'a, E> {
    /// Returns the group tag.
    pub fn kind(&self) -> GroupKind {
        match self {
            ElementRef::Scalar(_) => GroupKind::Zr,
            ElementRef::G1(_) => GroupKind::G1,
            ElementRef::Gt(_) => GroupKind::Gt,
        }
    }

    /// Returns the fixed-length canonical encoding.
    pub fn to_bytes(&self, engine: &E) -> Vec<u8> {
        match self {
            ElementRef::Scalar(s) => engine.scalar_to_bytes(s),
            ElementRef::G1(e) => engine.g1_to_bytes(e),
            ElementRef::Gt(e) => engine.gt_to_bytes(e),
        }
    }

    /// Returns the encoded length for this element's group.
    pub fn byte_len(&self, engine: &E) -> usize {
        match self {
            ElementRef::Scalar(_) => engine.scalar_len(),
            ElementRef::G1(_) => engine.g1_len(),
            ElementRef::Gt(_) => engine.gt_len(),
        }
    }
}

impl<E: PairingEngine> Clone for ElementRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: PairingEngine> Copy for ElementRef<'_, E> {}

impl<E: PairingEngine> Debug for ElementRef<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            ElementRef::G1(e) => f.debug_tuple("G1").field(e).finish(),
            ElementRef::Gt(e) => f.debug_tuple("Gt").field(e).finish(),
        }
    }
}
