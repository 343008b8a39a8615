use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Prime field `F_q` with `q = 3 (mod 4)`.
#[derive(Clone, Debug)]
pub(crate) struct PrimeField {
    modulus: BigUint,
    sqrt_exp: BigUint,
}

/// Element `re + im * i` of `F_q^2 = F_q[i] / (i^2 + 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Fq2 {
    pub(crate) re: BigUint,
    pub(crate) im: BigUint,
}

impl Fq2 {
    pub(crate) fn new(re: BigUint, im: BigUint) -> Self {
        Self { re, im }
    }

    pub(crate) fn one() -> Self {
        Self::new(BigUint::one(), BigUint::zero())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }
}

impl PrimeField {
    pub(crate) fn new(modulus: BigUint) -> Self {
        let sqrt_exp = (&modulus + 1u32) >> 2u32;
        Self { modulus, sqrt_exp }
    }

    pub(crate) fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.modulus.bits().div_ceil(8) as usize
    }

    pub(crate) fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    pub(crate) fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub(crate) fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        ((a + &self.modulus) - b) % &self.modulus
    }

    pub(crate) fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub(crate) fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    pub(crate) fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    pub(crate) fn inv(&self, a: &BigUint) -> Option<BigUint> {
        if a.is_zero() {
            return None;
        }
        a.modinv(&self.modulus)
    }

    /// Square root via `a^((q+1)/4)`, valid because `q = 3 (mod 4)`.
    pub(crate) fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let root = a.modpow(&self.sqrt_exp, &self.modulus);
        if self.square(&root) == self.reduce(a) {
            Some(root)
        } else {
            None
        }
    }

    pub(crate) fn fq2_mul(&self, a: &Fq2, b: &Fq2) -> Fq2 {
        // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
        let ac = self.mul(&a.re, &b.re);
        let bd = self.mul(&a.im, &b.im);
        let ad = self.mul(&a.re, &b.im);
        let bc = self.mul(&a.im, &b.re);
        Fq2::new(self.sub(&ac, &bd), self.add(&ad, &bc))
    }

    pub(crate) fn fq2_square(&self, a: &Fq2) -> Fq2 {
        // (a + bi)^2 = (a + b)(a - b) + 2ab i
        let sum = self.add(&a.re, &a.im);
        let diff = self.sub(&a.re, &a.im);
        let cross = self.mul(&a.re, &a.im);
        Fq2::new(self.mul(&sum, &diff), self.add(&cross, &cross))
    }

    /// Frobenius `a^q`, which is conjugation for `q = 3 (mod 4)`.
    pub(crate) fn fq2_conj(&self, a: &Fq2) -> Fq2 {
        Fq2::new(a.re.clone(), self.neg(&a.im))
    }

    pub(crate) fn fq2_inv(&self, a: &Fq2) -> Option<Fq2> {
        let norm = self.add(&self.square(&a.re), &self.square(&a.im));
        let norm_inv = self.inv(&norm)?;
        Some(Fq2::new(
            self.mul(&a.re, &norm_inv),
            self.mul(&self.neg(&a.im), &norm_inv),
        ))
    }

    pub(crate) fn fq2_pow(&self, base: &Fq2, exp: &BigUint) -> Fq2 {
        let mut acc = Fq2::one();
        for i in (0..exp.bits()).rev() {
            acc = self.fq2_square(&acc);
            if exp.bit(i) {
                acc = self.fq2_mul(&acc, base);
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f1571() -> PrimeField {
        PrimeField::new(BigUint::from(1571u32))
    }

    #[test]
    fn base_field_arithmetic() {
        let f = f1571();
        let a = BigUint::from(1500u32);
        let b = BigUint::from(100u32);
        assert_eq!(f.add(&a, &b), BigUint::from(29u32));
        assert_eq!(f.sub(&b, &a), BigUint::from(171u32));
        assert_eq!(f.neg(&b), BigUint::from(1471u32));
        let inv = f.inv(&a).unwrap();
        assert!(f.mul(&a, &inv).is_one());
        assert!(f.inv(&BigUint::zero()).is_none());
    }

    #[test]
    fn square_roots() {
        let f = f1571();
        let x = BigUint::from(123u32);
        let sq = f.square(&x);
        let root = f.sqrt(&sq).unwrap();
        assert!(root == x || root == f.neg(&x));
        // -1 is a non-residue modulo a prime 3 mod 4
        assert!(f.sqrt(&f.neg(&BigUint::one())).is_none());
    }

    #[test]
    fn extension_field_arithmetic() {
        let f = f1571();
        let a = Fq2::new(BigUint::from(3u32), BigUint::from(7u32));
        let b = Fq2::new(BigUint::from(11u32), BigUint::from(5u32));

        assert_eq!(f.fq2_square(&a), f.fq2_mul(&a, &a));
        let inv = f.fq2_inv(&a).unwrap();
        assert!(f.fq2_mul(&a, &inv).is_one());

        // i^2 = -1
        let i = Fq2::new(BigUint::zero(), BigUint::one());
        assert_eq!(f.fq2_mul(&i, &i), Fq2::new(f.neg(&BigUint::one()), BigUint::zero()));

        // Frobenius is multiplicative and matches a^q
        let q = f.modulus().clone();
        assert_eq!(f.fq2_pow(&a, &q), f.fq2_conj(&a));
        assert_eq!(
            f.fq2_conj(&f.fq2_mul(&a, &b)),
            f.fq2_mul(&f.fq2_conj(&a), &f.fq2_conj(&b))
        );
    }
}
