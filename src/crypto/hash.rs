//! SHA-256 based derivation of scalars and group elements.
//!
//! Multi-input hashing concatenates the fixed-length encodings of all inputs in
//! argument order and hashes once, so every participant rederives the same digest
//! from the same logical inputs.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use super::group::{ElementRef, PairingEngine};

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash-to-scalar and hash-to-element derivation over a pairing engine.
#[derive(Clone, Debug)]
pub struct DomainHash<E: PairingEngine> {
    engine: E,
}

impl<E: PairingEngine> DomainHash<E> {
    /// Creates a hasher bound to an engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Returns the engine used for element encodings.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// SHA-256 of raw bytes.
    pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
        Sha256::digest(bytes).into()
    }

    /// SHA-256 of the decimal string of `value`, read as a big-endian integer.
    pub fn hash_integer(value: &BigUint) -> BigUint {
        let decimal = value.to_str_radix(10);
        BigUint::from_bytes_be(&Self::digest(decimal.as_bytes()))
    }

    /// Concatenated canonical encoding of `parts`.
    pub fn encode_parts(&self, parts: &[ElementRef<'_, E>]) -> Vec<u8> {
        let total = parts.iter().map(|p| p.byte_len(&self.engine)).sum();
        let mut buf = Vec::with_capacity(total);
        for part in parts {
            buf.extend_from_slice(&part.to_bytes(&self.engine));
        }
        buf
    }

    /// Hashes raw bytes into a scalar.
    pub fn hash_bytes_to_scalar(&self, bytes: &[u8]) -> E::Scalar {
        self.engine.scalar_from_hash(&Self::digest(bytes))
    }

    /// Hashes one or more elements into a scalar.
    pub fn hash_to_scalar(&self, parts: &[ElementRef<'_, E>]) -> E::Scalar {
        self.hash_bytes_to_scalar(&self.encode_parts(parts))
    }

    /// Hashes one or more elements into G1.
    pub fn hash_to_g1(&self, parts: &[ElementRef<'_, E>]) -> E::G1 {
        self.engine
            .g1_from_hash(&Self::digest(&self.encode_parts(parts)))
    }

    /// Hashes raw bytes into G1.
    pub fn hash_bytes_to_g1(&self, bytes: &[u8]) -> E::G1 {
        self.engine.g1_from_hash(&Self::digest(bytes))
    }

    /// Hashes one or more elements into GT.
    pub fn hash_to_gt(&self, parts: &[ElementRef<'_, E>]) -> E::Gt {
        self.engine
            .gt_from_hash(&Self::digest(&self.encode_parts(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SeededRng;
    use crate::groups::TypeA;
    use crate::params::tiny_params;

    fn hasher() -> DomainHash<TypeA> {
        DomainHash::new(TypeA::new(&tiny_params()).unwrap())
    }

    #[test]
    fn digest_of_known_vector() {
        let digest = DomainHash::<TypeA>::digest(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_integer_uses_decimal_string() {
        let value = BigUint::from(12_345u32);
        let expected = BigUint::from_bytes_be(&DomainHash::<TypeA>::digest(b"12345"));
        assert_eq!(DomainHash::<TypeA>::hash_integer(&value), expected);
        assert!(expected.bits() <= 256);
    }

    #[test]
    fn element_hashes_are_pure() {
        let hash = hasher();
        let engine = hash.engine().clone();
        let mut rng = SeededRng::from_seed(9);
        let p = engine.random_g1(&mut rng);
        let s = engine.random_scalar(&mut rng);

        let parts = [ElementRef::G1(&p), ElementRef::Scalar(&s)];
        assert_eq!(hash.hash_to_scalar(&parts), hash.hash_to_scalar(&parts));
        assert_eq!(hash.hash_to_g1(&parts), hash.hash_to_g1(&parts));
        assert_eq!(hash.hash_to_gt(&parts), hash.hash_to_gt(&parts));
    }

    #[test]
    fn multi_input_concatenates_instead_of_chaining() {
        let hash = hasher();
        let engine = hash.engine().clone();
        let mut rng = SeededRng::from_seed(10);
        let p = engine.random_g1(&mut rng);
        let s = engine.random_scalar(&mut rng);

        let mut joined = engine.g1_to_bytes(&p);
        joined.extend_from_slice(&engine.scalar_to_bytes(&s));

        let parts = [ElementRef::G1(&p), ElementRef::Scalar(&s)];
        assert_eq!(hash.encode_parts(&parts), joined);
        assert_eq!(hash.hash_to_scalar(&parts), hash.hash_bytes_to_scalar(&joined));
        assert_eq!(hash.hash_to_g1(&parts), hash.hash_bytes_to_g1(&joined));
    }

    #[test]
    fn hash_to_g1_lands_in_group() {
        let hash = hasher();
        let h = hash.hash_bytes_to_g1(b"vehicle-42");
        let engine = hash.engine();
        assert!(!engine.g1_is_identity(&h));
        let roundtrip = engine.g1_from_bytes(&engine.g1_to_bytes(&h)).unwrap();
        assert_eq!(roundtrip, h);
    }
}
