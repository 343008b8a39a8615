use num_bigint::BigUint;
use num_traits::Zero;

use super::field::{Fq2, PrimeField};

/// Point of `E: y^2 = x^3 + x` over `F_q`, in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub(crate) fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

/// The supersingular curve `y^2 = x^3 + x` with its Tate pairing.
#[derive(Clone, Debug)]
pub(crate) struct Curve {
    field: PrimeField,
}

impl Curve {
    pub(crate) fn new(field: PrimeField) -> Self {
        Self { field }
    }

    pub(crate) fn field(&self) -> &PrimeField {
        &self.field
    }

    /// `x^3 + x`
    pub(crate) fn rhs(&self, x: &BigUint) -> BigUint {
        let f = &self.field;
        f.add(&f.mul(&f.square(x), x), x)
    }

    pub(crate) fn is_on_curve(&self, p: &Point) -> bool {
        match p {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                x < self.field.modulus()
                    && y < self.field.modulus()
                    && self.field.square(y) == self.rhs(x)
            }
        }
    }

    /// Returns a `y` with `(x, y)` on the curve, if `x^3 + x` is a square.
    pub(crate) fn lift_x(&self, x: &BigUint) -> Option<BigUint> {
        self.field.sqrt(&self.rhs(x))
    }

    pub(crate) fn neg(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: self.field.neg(y),
            },
        }
    }

    pub(crate) fn double(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { y, .. } if y.is_zero() => Point::Infinity,
            Point::Affine { x, y } => {
                let lambda = self.tangent_slope(x, y);
                self.chord_result(&lambda, x, x, y)
            }
        }
    }

    pub(crate) fn add(&self, a: &Point, b: &Point) -> Point {
        match (a, b) {
            (Point::Infinity, _) => b.clone(),
            (_, Point::Infinity) => a.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if x1 == x2 {
                    if y1 == y2 {
                        return self.double(a);
                    }
                    return Point::Infinity;
                }
                let lambda = self.chord_slope(x1, y1, x2, y2);
                self.chord_result(&lambda, x1, x2, y1)
            }
        }
    }

    /// Double-and-add multiplication by a non-negative integer.
    pub(crate) fn mul(&self, p: &Point, k: &BigUint) -> Point {
        let mut acc = Point::Infinity;
        for i in (0..k.bits()).rev() {
            acc = self.double(&acc);
            if k.bit(i) {
                acc = self.add(&acc, p);
            }
        }
        acc
    }

    /// Miller function `f_{n,P}` evaluated at the distorted point `psi(Q)`.
    ///
    /// `psi(x, y) = (-x, i*y)` maps `Q` into `E(F_q^2)` so that the result is
    /// non-degenerate for two points of the same order-`n` subgroup. Vertical
    /// lines and denominators take values in `F_q` and vanish under the final
    /// exponentiation, so they are skipped.
    pub(crate) fn miller(&self, p: &Point, q: &Point, n: &BigUint) -> Fq2 {
        let f = &self.field;
        let (Point::Affine { x: xp, y: yp }, Point::Affine { x: xq, y: yq }) = (p, q) else {
            return Fq2::one();
        };

        let mut acc = Fq2::one();
        let mut t = p.clone();

        for i in (0..n.bits().saturating_sub(1)).rev() {
            acc = f.fq2_square(&acc);
            match &t {
                Point::Affine { x: xt, y: yt } if !yt.is_zero() => {
                    let lambda = self.tangent_slope(xt, yt);
                    let line = self.line_at_distorted(&lambda, xt, yt, xq, yq);
                    acc = f.fq2_mul(&acc, &line);
                }
                _ => {}
            }
            t = self.double(&t);

            if n.bit(i) {
                if let Point::Affine { x: xt, y: yt } = &t {
                    if xt != xp {
                        let lambda = self.chord_slope(xt, yt, xp, yp);
                        let line = self.line_at_distorted(&lambda, xt, yt, xq, yq);
                        acc = f.fq2_mul(&acc, &line);
                    }
                }
                t = self.add(&t, p);
            }
        }

        acc
    }

    /// `(3x^2 + 1) / 2y`
    fn tangent_slope(&self, x: &BigUint, y: &BigUint) -> BigUint {
        let f = &self.field;
        let three_x2 = f.mul(&BigUint::from(3u32), &f.square(x));
        let num = f.add(&three_x2, &BigUint::from(1u32));
        let den = f.add(y, y);
        let den_inv = f
            .inv(&den)
            .unwrap_or_else(|| unreachable!("tangent slope requires y != 0"));
        f.mul(&num, &den_inv)
    }

    /// `(y2 - y1) / (x2 - x1)`
    fn chord_slope(&self, x1: &BigUint, y1: &BigUint, x2: &BigUint, y2: &BigUint) -> BigUint {
        let f = &self.field;
        let den_inv = f
            .inv(&f.sub(x2, x1))
            .unwrap_or_else(|| unreachable!("chord slope requires x1 != x2"));
        f.mul(&f.sub(y2, y1), &den_inv)
    }

    /// Third intersection reflected: `x3 = l^2 - x1 - x2`, `y3 = l(x1 - x3) - y1`.
    fn chord_result(&self, lambda: &BigUint, x1: &BigUint, x2: &BigUint, y1: &BigUint) -> Point {
        let f = &self.field;
        let x3 = f.sub(&f.sub(&f.square(lambda), x1), x2);
        let y3 = f.sub(&f.mul(lambda, &f.sub(x1, &x3)), y1);
        Point::Affine { x: x3, y: y3 }
    }

    /// Line `y - yt - l(x - xt)` evaluated at `(-xq, i*yq)`.
    fn line_at_distorted(
        &self,
        lambda: &BigUint,
        xt: &BigUint,
        yt: &BigUint,
        xq: &BigUint,
        yq: &BigUint,
    ) -> Fq2 {
        let f = &self.field;
        let re = f.sub(&f.mul(lambda, &f.add(xq, xt)), yt);
        Fq2::new(re, yq.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> Curve {
        Curve::new(PrimeField::new(BigUint::from(1571u32)))
    }

    fn some_point(curve: &Curve) -> Point {
        let mut x = BigUint::from(2u32);
        loop {
            if let Some(y) = curve.lift_x(&x) {
                return Point::Affine { x, y };
            }
            x += 1u32;
        }
    }

    #[test]
    fn group_law() {
        let c = curve();
        let p = some_point(&c);
        assert!(c.is_on_curve(&p));

        let two_p = c.double(&p);
        assert!(c.is_on_curve(&two_p));
        assert_eq!(c.add(&p, &p), two_p);
        assert_eq!(c.add(&p, &c.neg(&p)), Point::Infinity);
        assert_eq!(c.mul(&p, &BigUint::from(3u32)), c.add(&two_p, &p));
    }

    #[test]
    fn curve_order_is_q_plus_one() {
        // supersingular: #E(F_q) = q + 1 = 1572
        let c = curve();
        let p = some_point(&c);
        assert!(c.mul(&p, &BigUint::from(1572u32)).is_infinity());
    }
}
