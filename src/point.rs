//! Point representations and predicates
//!
//! Points live in two forms: affine `(x, y)` and extended
//! Hisil–Wong–Carter–Dawson coordinates `(X, Y, Z, T)` with `x = X/Z`,
//! `y = Y/Z` and `x·y = T/Z`. The group identity is `(0, 1)` affine and
//! `(0, 1, 1, 0)` extended. All predicates compare affinized
//! coordinates, so they are insensitive to the projective scaling the
//! group-law formulas introduce.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::curve::Curve;
use crate::field;
use crate::DalosResult;

/// A point in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    /// Abscissa, reduced modulo the curve prime.
    pub x: BigInt,
    /// Ordinate, reduced modulo the curve prime.
    pub y: BigInt,
}

/// A point in extended coordinates.
#[derive(Clone, Debug)]
pub struct ExtendedPoint {
    /// X coordinate.
    pub x: BigInt,
    /// Y coordinate.
    pub y: BigInt,
    /// Projective denominator; nonzero for every group-law output.
    pub z: BigInt,
    /// Auxiliary coordinate, `T = X·Y/Z`.
    pub t: BigInt,
}

impl ExtendedPoint {
    /// The group identity `(0, 1, 1, 0)`.
    pub fn infinity() -> Self {
        ExtendedPoint {
            x: BigInt::zero(),
            y: BigInt::one(),
            z: BigInt::one(),
            t: BigInt::zero(),
        }
    }

    /// Projective identity test: `X = 0`, `T = 0` and `Y = Z`.
    ///
    /// Formula outputs representing the identity may carry `Y = Z ≠ 1`;
    /// the comparison is against `Z`, not against the literal constant.
    pub fn is_infinity(&self) -> bool {
        self.x.is_zero() && self.t.is_zero() && self.y == self.z
    }
}

impl Curve {
    /// Lift an affine point into extended coordinates with `Z = 1`.
    pub fn affine_to_extended(&self, p: &AffinePoint) -> ExtendedPoint {
        ExtendedPoint {
            x: p.x.clone(),
            y: p.y.clone(),
            z: BigInt::one(),
            t: field::mul_mod(&self.p, &p.x, &p.y),
        }
    }

    /// Normalize an extended point back to affine coordinates.
    ///
    /// Fails with [`crate::DalosError::DivisionByZero`] if `Z ≡ 0`, which
    /// the group law never produces.
    pub fn extended_to_affine(&self, p: &ExtendedPoint) -> DalosResult<AffinePoint> {
        Ok(AffinePoint {
            x: field::quo_mod(&self.p, &p.x, &p.z)?,
            y: field::quo_mod(&self.p, &p.y, &p.z)?,
        })
    }

    /// Test the curve equation `A·x² + y² ≡ 1 + D·x²·y² (mod P)`.
    ///
    /// Returns `(on_curve, infinity)`; the identity satisfies the
    /// equation and reports `infinity = true`.
    pub fn is_on_curve(&self, p: &ExtendedPoint) -> (bool, bool) {
        let infinity = p.is_infinity();
        let affine = match self.extended_to_affine(p) {
            Ok(affine) => affine,
            Err(_) => return (false, infinity),
        };

        let xx = field::mul_mod(&self.p, &affine.x, &affine.x);
        let yy = field::mul_mod(&self.p, &affine.y, &affine.y);
        let left = field::add_mod(&self.p, &field::mul_mod(&self.p, &self.a, &xx), &yy);

        let xxyy = field::mul_mod(&self.p, &xx, &yy);
        let right = field::add_mod(
            &self.p,
            &BigInt::one(),
            &field::mul_mod(&self.p, &xxyy, &self.d),
        );

        (left == right, infinity)
    }

    /// Affine equality of two extended points.
    pub fn are_points_equal(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> bool {
        match (self.extended_to_affine(p1), self.extended_to_affine(p2)) {
            (Ok(a1), Ok(a2)) => a1 == a2,
            _ => false,
        }
    }

    /// Whether `p2` is the group inverse of `p1`.
    ///
    /// On a twisted Edwards curve the inverse of `(x, y)` is `(−x, y)`,
    /// so the test is `x₁ + x₂ ≡ 0 (mod P)` with equal ordinates.
    pub fn is_inverse_on_curve(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> bool {
        let (a1, a2) = match (self.extended_to_affine(p1), self.extended_to_affine(p2)) {
            (Ok(a1), Ok(a2)) => (a1, a2),
            _ => return false,
        };
        field::add_mod(&self.p, &a1.x, &a2.x).is_zero() && a1.y == a2.y
    }

    /// The group inverse `(−x mod P, y)` of an affine point.
    pub fn negate(&self, p: &AffinePoint) -> AffinePoint {
        AffinePoint {
            x: field::sub_mod(&self.p, &BigInt::zero(), &p.x),
            y: p.y.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::DALOS;

    #[test]
    fn test_infinity_constant() {
        let inf = ExtendedPoint::infinity();
        assert!(inf.is_infinity());
        let (on_curve, infinity) = DALOS.is_on_curve(&inf);
        assert!(on_curve);
        assert!(infinity);
    }

    #[test]
    fn test_scaled_identity_is_still_infinity() {
        // (0, −1, −1, 0) is the identity under a projective scaling of −1.
        let p = &DALOS.p;
        let scaled = ExtendedPoint {
            x: BigInt::zero(),
            y: p - BigInt::one(),
            z: p - BigInt::one(),
            t: BigInt::zero(),
        };
        assert!(scaled.is_infinity());
    }

    #[test]
    fn test_affine_roundtrip() {
        let g = DALOS.affine_to_extended(&DALOS.g);
        let back = DALOS.extended_to_affine(&g).unwrap();
        assert_eq!(back, DALOS.g);
    }

    #[test]
    fn test_negate_is_inverse() {
        let g = DALOS.affine_to_extended(&DALOS.g);
        let neg = DALOS.affine_to_extended(&DALOS.negate(&DALOS.g));
        assert!(DALOS.is_inverse_on_curve(&g, &neg));
        assert!(!DALOS.is_inverse_on_curve(&g, &g));
    }
}
