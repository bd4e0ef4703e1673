//! Modular arithmetic over the curve prime
//!
//! Every operation returns the non-negative residue modulo the supplied
//! prime. The DALOS coefficient `D = −26` is a signed value, so
//! intermediate products can be negative; `mod_floor` keeps results in
//! `[0, p)` regardless of operand sign.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{DalosError, DalosResult};

/// `(a + b) mod p`
pub fn add_mod(p: &BigInt, a: &BigInt, b: &BigInt) -> BigInt {
    (a + b).mod_floor(p)
}

/// `(a − b) mod p`
pub fn sub_mod(p: &BigInt, a: &BigInt, b: &BigInt) -> BigInt {
    (a - b).mod_floor(p)
}

/// `(a · b) mod p`
pub fn mul_mod(p: &BigInt, a: &BigInt, b: &BigInt) -> BigInt {
    (a * b).mod_floor(p)
}

/// `(a / b) mod p`, i.e. `a · b⁻¹ mod p`.
///
/// Fails with [`DalosError::DivisionByZero`] when `b` has no inverse
/// modulo `p`; callers inside the group law guarantee `b ≢ 0`.
pub fn quo_mod(p: &BigInt, a: &BigInt, b: &BigInt) -> DalosResult<BigInt> {
    let inverse = mod_inverse(b, p).ok_or(DalosError::DivisionByZero)?;
    Ok(mul_mod(p, a, &inverse))
}

/// Modular inverse via the extended Euclidean algorithm.
///
/// Returns `None` when `a ≡ 0 (mod p)` or `gcd(a, p) ≠ 1`. The curve
/// prime is odd, so every nonzero residue is invertible there.
pub fn mod_inverse(a: &BigInt, p: &BigInt) -> Option<BigInt> {
    let a = a.mod_floor(p);
    if a.is_zero() {
        return None;
    }

    let (mut t, mut next_t) = (BigInt::zero(), BigInt::one());
    let (mut r, mut next_r) = (p.clone(), a);
    while !next_r.is_zero() {
        let quotient = &r / &next_r;
        let tmp = &t - &quotient * &next_t;
        t = next_t;
        next_t = tmp;
        let tmp = &r - &quotient * &next_r;
        r = next_r;
        next_r = tmp;
    }
    if !r.is_one() {
        return None;
    }
    Some(t.mod_floor(p))
}

impl crate::curve::Curve {
    /// Addition modulo the curve prime.
    pub fn add_mod_p(&self, a: &BigInt, b: &BigInt) -> BigInt {
        add_mod(&self.p, a, b)
    }

    /// Subtraction modulo the curve prime.
    pub fn sub_mod_p(&self, a: &BigInt, b: &BigInt) -> BigInt {
        sub_mod(&self.p, a, b)
    }

    /// Multiplication modulo the curve prime.
    pub fn mul_mod_p(&self, a: &BigInt, b: &BigInt) -> BigInt {
        mul_mod(&self.p, a, b)
    }

    /// Division modulo the curve prime.
    pub fn quo_mod_p(&self, a: &BigInt, b: &BigInt) -> DalosResult<BigInt> {
        quo_mod(&self.p, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> BigInt {
        BigInt::from(1009)
    }

    #[test]
    fn test_add_sub_wrap() {
        assert_eq!(add_mod(&p(), &BigInt::from(1000), &BigInt::from(20)), BigInt::from(11));
        assert_eq!(sub_mod(&p(), &BigInt::from(3), &BigInt::from(7)), BigInt::from(1005));
    }

    #[test]
    fn test_negative_operands_reduce_to_canonical_residue() {
        // D is carried as a negative integer, so products go negative.
        let d = BigInt::from(-26);
        let got = mul_mod(&p(), &d, &BigInt::from(2));
        assert_eq!(got, BigInt::from(1009 - 52));
    }

    #[test]
    fn test_mod_inverse() {
        let inv = mod_inverse(&BigInt::from(3), &BigInt::from(7)).unwrap();
        assert_eq!(inv, BigInt::from(5));
        assert!(mod_inverse(&BigInt::zero(), &p()).is_none());
    }

    #[test]
    fn test_quo_mod_rejects_zero_divisor() {
        let err = quo_mod(&p(), &BigInt::from(4), &BigInt::zero());
        assert!(matches!(err, Err(DalosError::DivisionByZero)));
    }

    #[test]
    fn test_quo_mod_inverts_mul_mod() {
        let a = BigInt::from(123);
        let b = BigInt::from(456);
        let product = mul_mod(&p(), &a, &b);
        assert_eq!(quo_mod(&p(), &product, &b).unwrap(), a);
    }
}
