//! Symmetric Type-A pairing on `y^2 = x^3 + x` over `F_q`, `q = 3 (mod 4)`.
//!
//! G1 is the order-`r` subgroup of `E(F_q)`. GT is the order-`r` subgroup of
//! `F_q^2*`. The pairing is the reduced Tate pairing composed with the distortion
//! map `(x, y) -> (-x, i*y)`.

use std::sync::Arc;

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

mod curve;
mod field;

use self::curve::{Curve, Point};
use self::field::{Fq2, PrimeField};
use crate::crypto::prime::is_probably_prime;
use crate::crypto::PairingEngine;
use crate::params::solinas::DEFAULT_PRIMALITY_ROUNDS;
use crate::params::PairingParameters;
use crate::{Error, Result};

/// Extra bytes drawn before reducing a hash expansion modulo `q`.
const HASH_EXPANSION_MARGIN: usize = 16;

/// Type-A pairing engine. Cloning is cheap; the context is shared.
#[derive(Clone, Debug)]
pub struct TypeA {
    inner: Arc<Context>,
}

#[derive(Debug)]
struct Context {
    params: PairingParameters,
    curve: Curve,
    q_len: usize,
    r_len: usize,
}

/// Scalar modulo `r`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zr(BigUint);

impl Zeroize for Zr {
    fn zeroize(&mut self) {
        self.0.set_zero();
    }
}

impl Drop for Zr {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Point of the order-`r` subgroup of `E(F_q)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct G1(Point);

/// Element of the order-`r` subgroup of `F_q^2*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gt(Fq2);

impl TypeA {
    /// Builds an engine from validated parameters.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParams`] if the parameters are inconsistent,
    /// `r` or `q` is composite, or `q` is not `3 (mod 4)`.
    pub fn new(params: &PairingParameters) -> Result<Self> {
        params.validate()?;
        if (&params.q % 4u32) != BigUint::from(3u32) {
            return Err(Error::InvalidParams("q must be 3 mod 4".to_string()));
        }
        if !is_probably_prime(&params.r, DEFAULT_PRIMALITY_ROUNDS) {
            return Err(Error::InvalidParams("group order r is not prime".to_string()));
        }
        if !is_probably_prime(&params.q, DEFAULT_PRIMALITY_ROUNDS) {
            return Err(Error::InvalidParams(
                "field characteristic q is not prime".to_string(),
            ));
        }

        let field = PrimeField::new(params.q.clone());
        let q_len = field.byte_len();
        let r_len = params.r.bits().div_ceil(8) as usize;

        Ok(Self {
            inner: Arc::new(Context {
                params: params.clone(),
                curve: Curve::new(field),
                q_len,
                r_len,
            }),
        })
    }

    /// Parses a parameter block and builds the engine from it.
    ///
    /// # Errors
    /// Returns [`Error::MalformedParameterBlock`] if the block does not parse or
    /// describes parameters no engine can be built from.
    pub fn from_block(block: &str) -> Result<Self> {
        Self::new(&PairingParameters::from_block(block)?).map_err(|e| match e {
            Error::InvalidParams(reason) => Error::MalformedParameterBlock(reason),
            other => other,
        })
    }

    /// The parameters this engine was built from.
    pub fn params(&self) -> &PairingParameters {
        &self.inner.params
    }

    fn field(&self) -> &PrimeField {
        self.inner.curve.field()
    }

    fn curve(&self) -> &Curve {
        &self.inner.curve
    }

    fn q(&self) -> &BigUint {
        &self.inner.params.q
    }

    fn r(&self) -> &BigUint {
        &self.inner.params.r
    }

    /// `f^((q^2 - 1) / r) = (f^(q-1))^h`, with `f^(q-1) = conj(f) / f`.
    fn final_exponentiation(&self, f: &Fq2) -> Fq2 {
        let field = self.field();
        let inv = field
            .fq2_inv(f)
            .unwrap_or_else(|| unreachable!("Miller values are non-zero"));
        let unitary = field.fq2_mul(&field.fq2_conj(f), &inv);
        field.fq2_pow(&unitary, &self.inner.params.h)
    }

    /// Clears the cofactor of a point of `E(F_q)`.
    fn into_subgroup(&self, p: &Point) -> Point {
        self.curve().mul(p, &self.inner.params.h)
    }

    /// SHA-256 counter-mode expansion of `seed` into `len` bytes.
    fn expand(seed: &[u8], domain: u8, len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(len + 32);
        let mut counter = 0u32;
        while out.len() < len {
            let mut hasher = Sha256::new();
            hasher.update([domain]);
            hasher.update(counter.to_be_bytes());
            hasher.update(seed);
            out.extend_from_slice(&hasher.finalize());
            counter += 1;
        }
        out.truncate(len);
        out
    }

    fn fixed_bytes(value: &BigUint, len: usize) -> Vec<u8> {
        let bytes = value.to_bytes_be();
        let mut out = vec![0u8; len];
        if value.is_zero() {
            return out;
        }
        out[len - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    fn check_len(bytes: &[u8], expected: usize, what: &str) -> Result<()> {
        if bytes.len() != expected {
            return Err(Error::InvalidGroupElement(format!(
                "Expected {expected} bytes for {what}, got {}",
                bytes.len()
            )));
        }
        Ok(())
    }
}

impl PairingEngine for TypeA {
    type Scalar = Zr;
    type G1 = G1;
    type Gt = Gt;

    fn name(&self) -> &'static str {
        "type-a"
    }

    fn order(&self) -> &BigUint {
        self.r()
    }

    fn scalar_len(&self) -> usize {
        self.inner.r_len
    }

    fn g1_len(&self) -> usize {
        2 * self.inner.q_len
    }

    fn gt_len(&self) -> usize {
        2 * self.inner.q_len
    }

    fn random_scalar<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Zr {
        loop {
            let value = rng.gen_biguint_below(self.r());
            if !value.is_zero() {
                return Zr(value);
            }
        }
    }

    fn random_g1<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> G1 {
        let field = self.field();
        loop {
            let x = rng.gen_biguint_below(self.q());
            let Some(y) = self.curve().lift_x(&x) else {
                continue;
            };
            let y = if rng.gen::<bool>() { field.neg(&y) } else { y };
            let point = self.into_subgroup(&Point::Affine { x, y });
            if !point.is_infinity() {
                return G1(point);
            }
        }
    }

    fn random_gt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Gt {
        loop {
            let candidate = Fq2::new(
                rng.gen_biguint_below(self.q()),
                rng.gen_biguint_below(self.q()),
            );
            if !candidate.is_zero() {
                return Gt(self.final_exponentiation(&candidate));
            }
        }
    }

    fn scalar_from_biguint(&self, value: &BigUint) -> Zr {
        Zr(value % self.r())
    }

    fn scalar_to_biguint(&self, s: &Zr) -> BigUint {
        s.0.clone()
    }

    fn scalar_add(&self, a: &Zr, b: &Zr) -> Zr {
        Zr((&a.0 + &b.0) % self.r())
    }

    fn scalar_sub(&self, a: &Zr, b: &Zr) -> Zr {
        Zr(((&a.0 + self.r()) - &b.0) % self.r())
    }

    fn scalar_mul(&self, a: &Zr, b: &Zr) -> Zr {
        Zr((&a.0 * &b.0) % self.r())
    }

    fn scalar_invert(&self, s: &Zr) -> Option<Zr> {
        if s.0.is_zero() {
            return None;
        }
        s.0.modinv(self.r()).map(Zr)
    }

    fn scalar_is_zero(&self, s: &Zr) -> bool {
        s.0.is_zero()
    }

    fn g1_identity(&self) -> G1 {
        G1(Point::Infinity)
    }

    fn g1_is_identity(&self, e: &G1) -> bool {
        e.0.is_infinity()
    }

    fn g1_add(&self, a: &G1, b: &G1) -> G1 {
        G1(self.curve().add(&a.0, &b.0))
    }

    fn g1_mul(&self, e: &G1, s: &Zr) -> G1 {
        G1(self.curve().mul(&e.0, &s.0))
    }

    fn gt_identity(&self) -> Gt {
        Gt(Fq2::one())
    }

    fn gt_mul(&self, a: &Gt, b: &Gt) -> Gt {
        Gt(self.field().fq2_mul(&a.0, &b.0))
    }

    fn gt_pow(&self, e: &Gt, s: &Zr) -> Gt {
        Gt(self.field().fq2_pow(&e.0, &s.0))
    }

    fn pairing(&self, a: &G1, b: &G1) -> Gt {
        if a.0.is_infinity() || b.0.is_infinity() {
            return self.gt_identity();
        }
        let f = self.curve().miller(&a.0, &b.0, self.r());
        Gt(self.final_exponentiation(&f))
    }

    fn scalar_to_bytes(&self, s: &Zr) -> Vec<u8> {
        Self::fixed_bytes(&s.0, self.inner.r_len)
    }

    fn scalar_from_bytes(&self, bytes: &[u8]) -> Result<Zr> {
        if bytes.len() != self.inner.r_len {
            return Err(Error::InvalidScalar(format!(
                "Expected {} bytes, got {}",
                self.inner.r_len,
                bytes.len()
            )));
        }
        let value = BigUint::from_bytes_be(bytes);
        if &value >= self.r() {
            return Err(Error::InvalidScalar(
                "Scalar value must be less than group order".to_string(),
            ));
        }
        Ok(Zr(value))
    }

    fn g1_to_bytes(&self, e: &G1) -> Vec<u8> {
        let len = self.inner.q_len;
        match &e.0 {
            Point::Infinity => vec![0u8; 2 * len],
            Point::Affine { x, y } => {
                let mut out = Self::fixed_bytes(x, len);
                out.extend_from_slice(&Self::fixed_bytes(y, len));
                out
            }
        }
    }

    fn g1_from_bytes(&self, bytes: &[u8]) -> Result<G1> {
        Self::check_len(bytes, self.g1_len(), "G1")?;
        if bytes.iter().all(|b| *b == 0) {
            return Ok(G1(Point::Infinity));
        }

        let (xb, yb) = bytes.split_at(self.inner.q_len);
        let point = Point::Affine {
            x: BigUint::from_bytes_be(xb),
            y: BigUint::from_bytes_be(yb),
        };
        if !self.curve().is_on_curve(&point) {
            return Err(Error::InvalidGroupElement(
                "Point is not on the curve".to_string(),
            ));
        }
        if !self.curve().mul(&point, self.r()).is_infinity() {
            return Err(Error::InvalidGroupElement(
                "Point is not in the order-r subgroup".to_string(),
            ));
        }
        Ok(G1(point))
    }

    fn gt_to_bytes(&self, e: &Gt) -> Vec<u8> {
        let len = self.inner.q_len;
        let mut out = Self::fixed_bytes(&e.0.re, len);
        out.extend_from_slice(&Self::fixed_bytes(&e.0.im, len));
        out
    }

    fn gt_from_bytes(&self, bytes: &[u8]) -> Result<Gt> {
        Self::check_len(bytes, self.gt_len(), "GT")?;
        let (reb, imb) = bytes.split_at(self.inner.q_len);
        let value = Fq2::new(BigUint::from_bytes_be(reb), BigUint::from_bytes_be(imb));
        if &value.re >= self.q() || &value.im >= self.q() {
            return Err(Error::InvalidGroupElement(
                "Coordinate exceeds field modulus".to_string(),
            ));
        }
        if value.is_zero() || !self.field().fq2_pow(&value, self.r()).is_one() {
            return Err(Error::InvalidGroupElement(
                "Element is not in the order-r subgroup".to_string(),
            ));
        }
        Ok(Gt(value))
    }

    fn scalar_from_hash(&self, seed: &[u8]) -> Zr {
        self.scalar_from_biguint(&BigUint::from_bytes_be(seed))
    }

    fn g1_from_hash(&self, seed: &[u8]) -> G1 {
        let field = self.field();
        let wide = Self::expand(seed, b'G', self.inner.q_len + HASH_EXPANSION_MARGIN);
        let mut x = field.reduce(&BigUint::from_bytes_be(&wide));
        loop {
            if let Some(y) = self.curve().lift_x(&x) {
                let other = field.neg(&y);
                let y = if other < y { other } else { y };
                let point = self.into_subgroup(&Point::Affine { x: x.clone(), y });
                if !point.is_infinity() {
                    return G1(point);
                }
            }
            x = field.add(&x, &BigUint::one());
        }
    }

    fn gt_from_hash(&self, seed: &[u8]) -> Gt {
        let field = self.field();
        let len = self.inner.q_len + HASH_EXPANSION_MARGIN;
        let wide = Self::expand(seed, b'T', 2 * len);
        let (re, im) = wide.split_at(len);
        let mut candidate = Fq2::new(
            field.reduce(&BigUint::from_bytes_be(re)),
            field.reduce(&BigUint::from_bytes_be(im)),
        );
        if candidate.is_zero() {
            candidate = Fq2::one();
        }
        Gt(self.final_exponentiation(&candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SeededRng;
    use crate::params::tiny_params;

    fn engine() -> TypeA {
        TypeA::new(&tiny_params()).unwrap()
    }

    #[test]
    fn encoding_lengths_follow_field_sizes() {
        let e = engine();
        assert_eq!(e.name(), "type-a");
        assert_eq!(e.scalar_len(), 1);
        assert_eq!(e.g1_len(), 4);
        assert_eq!(e.gt_len(), 4);
    }

    #[test]
    fn rejects_inconsistent_characteristic() {
        let mut params = tiny_params();
        params.q = BigUint::from(1573u32);
        assert!(TypeA::new(&params).is_err());
    }

    #[test]
    fn rejects_composite_order_and_characteristic() {
        // 133 = 7 * 19 and 1595 = 5 * 11 * 29 satisfy every structural identity
        let block = "type a\nq 1595\nr 133\nh 12\nexp1 2\nexp2 7\nsign0 1\nsign1 1\n";
        let params = PairingParameters::from_block(block).unwrap();
        params.validate().unwrap();

        assert!(matches!(TypeA::new(&params), Err(Error::InvalidParams(_))));
        assert!(matches!(
            TypeA::from_block(block),
            Err(Error::MalformedParameterBlock(_))
        ));
        assert!(TypeA::from_block(&tiny_params().to_block()).is_ok());
    }

    #[test]
    fn random_points_have_order_r() {
        let e = engine();
        let mut rng = SeededRng::from_seed(1);
        for _ in 0..8 {
            let p = e.random_g1(&mut rng);
            assert!(!e.g1_is_identity(&p));
            assert!(e.curve().mul(&p.0, e.r()).is_infinity());
        }
    }

    #[test]
    fn pairing_is_bilinear() {
        let e = engine();
        let mut rng = SeededRng::from_seed(2);
        let p = e.random_g1(&mut rng);
        let q = e.random_g1(&mut rng);
        let a = e.random_scalar(&mut rng);
        let b = e.random_scalar(&mut rng);

        let lhs = e.pairing(&e.g1_mul(&p, &a), &e.g1_mul(&q, &b));
        let rhs = e.gt_pow(&e.pairing(&p, &q), &e.scalar_mul(&a, &b));
        assert_eq!(lhs, rhs);

        let sum = e.pairing(&e.g1_add(&p, &q), &q);
        let split = e.gt_mul(&e.pairing(&p, &q), &e.pairing(&q, &q));
        assert_eq!(sum, split);
    }

    #[test]
    fn pairing_is_symmetric_and_non_degenerate() {
        let e = engine();
        let mut rng = SeededRng::from_seed(3);
        let p = e.random_g1(&mut rng);
        let q = e.random_g1(&mut rng);

        assert_eq!(e.pairing(&p, &q), e.pairing(&q, &p));
        let pp = e.pairing(&p, &p);
        assert_ne!(pp, e.gt_identity());
        assert!(e.field().fq2_pow(&pp.0, e.r()).is_one());
        assert_eq!(e.pairing(&e.g1_identity(), &p), e.gt_identity());
    }

    #[test]
    fn scalar_arithmetic() {
        let e = engine();
        let a = e.scalar_from_biguint(&BigUint::from(200u32));
        assert_eq!(e.scalar_to_biguint(&a), BigUint::from(69u32));

        let b = e.scalar_from_biguint(&BigUint::from(100u32));
        assert_eq!(e.scalar_to_biguint(&e.scalar_sub(&a, &b)), BigUint::from(100u32));
        let inv = e.scalar_invert(&b).unwrap();
        assert_eq!(e.scalar_to_biguint(&e.scalar_mul(&b, &inv)), BigUint::one());
        assert!(e.scalar_invert(&Zr(BigUint::zero())).is_none());
    }

    #[test]
    fn element_encodings_round_trip() {
        let e = engine();
        let mut rng = SeededRng::from_seed(4);
        let s = e.random_scalar(&mut rng);
        let p = e.random_g1(&mut rng);
        let t = e.random_gt(&mut rng);

        assert_eq!(e.scalar_from_bytes(&e.scalar_to_bytes(&s)).unwrap(), s);
        assert_eq!(e.g1_from_bytes(&e.g1_to_bytes(&p)).unwrap(), p);
        assert_eq!(e.gt_from_bytes(&e.gt_to_bytes(&t)).unwrap(), t);
        assert_eq!(
            e.g1_from_bytes(&e.g1_to_bytes(&e.g1_identity())).unwrap(),
            e.g1_identity()
        );
    }

    #[test]
    fn decoding_rejects_invalid_elements() {
        let e = engine();
        assert!(e.scalar_from_bytes(&[131]).is_err());
        assert!(e.scalar_from_bytes(&[1, 2]).is_err());
        assert!(e.g1_from_bytes(&[0, 1, 0, 1]).is_err());
        assert!(e.g1_from_bytes(&[0, 0, 0]).is_err());
        assert!(e.gt_from_bytes(&[0, 0, 0, 0]).is_err());
        // 2 is in F_q but not in the order-r subgroup of F_q^2
        assert!(e.gt_from_bytes(&[0, 2, 0, 0]).is_err());
    }

    #[test]
    fn hashing_is_deterministic() {
        let e = engine();
        assert_eq!(e.g1_from_hash(b"seed"), e.g1_from_hash(b"seed"));
        assert_eq!(e.gt_from_hash(b"seed"), e.gt_from_hash(b"seed"));
        assert!(!e.g1_is_identity(&e.g1_from_hash(b"seed")));
    }
}
