//! DALOS curve parameters
//!
//! The curve descriptor is an immutable value: the prime field modulus,
//! the generator order, trace and cofactor, the twisted Edwards
//! coefficients and the safe-scalar width. The cofactor is derived from
//! `R·Q = P + 1 − T` rather than stored, and the safe-scalar width is
//! re-derived and checked at construction, so a typo in any constant
//! trips an assertion instead of silently producing keys on the wrong
//! subgroup.

use num_bigint::BigInt;
use num_traits::One;
use once_cell::sync::{Lazy, OnceCell};

use crate::ops::PrecomputeMatrix;
use crate::point::AffinePoint;

/// A prime written as `2^power ± rest`, the shape both DALOS primes take.
struct PowerTwoPrime {
    power: usize,
    rest: &'static str,
    negative: bool,
}

impl PowerTwoPrime {
    fn value(&self) -> BigInt {
        let rest = BigInt::parse_bytes(self.rest.as_bytes(), 10)
            .expect("curve constant must be valid decimal");
        let base = BigInt::one() << self.power;
        if self.negative {
            base - rest
        } else {
            base + rest
        }
    }
}

/// Immutable twisted Edwards curve descriptor: `A·x² + y² = 1 + D·x²·y²`
/// over the prime field `GF(P)`.
pub struct Curve {
    /// Human-readable curve name.
    pub name: &'static str,
    /// Prime defining the field.
    pub p: BigInt,
    /// Order of the generator (prime subgroup order).
    pub q: BigInt,
    /// Trace of the curve.
    pub t: BigInt,
    /// Cofactor, derived as `(P + 1 − T) / Q`.
    pub r: BigInt,
    /// Coefficient of `x²`.
    pub a: BigInt,
    /// Coefficient of `x²·y²` (negative for DALOS).
    pub d: BigInt,
    /// Safe-scalar width in bits; private keys carry this much entropy.
    pub s: u32,
    /// Generator point in affine form.
    pub g: AffinePoint,

    pub(crate) base_table: OnceCell<PrecomputeMatrix>,
}

/// The global DALOS curve instance.
pub static DALOS: Lazy<Curve> = Lazy::new(Curve::dalos);

impl Curve {
    /// Construct the DALOS curve, `TEC_S1600_Pr1605p2315_m26`.
    ///
    /// `P = 2^1605 + 2315`, `Q = 2^1603 + q_rest`, `A = 1`, `D = −26`.
    /// The cofactor works out to 4, which fixes the two-bit clamping
    /// suffix of every private scalar.
    pub fn dalos() -> Self {
        let p_form = PowerTwoPrime {
            power: 1605,
            rest: "2315",
            negative: false,
        };
        let q_form = PowerTwoPrime {
            power: 1603,
            rest: "1258387060301909514024042379046449850251725029634697115619073843890705481440046740552204199635883885272944914904655483501916023678206167596650367826811846862157534952990004386839463386963494516862067933899764941962204635259228497801901380413",
            negative: false,
        };

        let p = p_form.value();
        let q = q_form.value();
        let t = BigInt::parse_bytes(
            b"-5033548241207638056096169516185799401006900118538788462476295375562821925760186962208816798543535541091779659618621934007664094712824670386601471307247387448630139811960017547357853547853978067448271735599059767848818541036913991207605519336",
            10,
        )
        .expect("curve trace must be valid decimal");

        let r = Self::cofactor(&p, &q, &t);
        let s = Self::safe_scalar_bits(&q_form, &r);
        assert_eq!(s, 1600, "DALOS safe-scalar width must derive to 1600");

        let gx = BigInt::from(2);
        let gy = BigInt::parse_bytes(
            b"479577721234741891316129314062096440203224800598561362604776518993348406897758651324205216647014453759416735508511915279509434960064559686580741767201752370055871770203009254182472722342456597752506165983884867351649283353392919401537107130232654743719219329990067668637876645065665284755295099198801899803461121192253205447281506198423683290960014859350933836516450524873032454015597501532988405894858561193893921904896724509904622632232182531698393484411082218273681226753590907472",
            10,
        )
        .expect("generator ordinate must be valid decimal");

        Curve {
            name: "TEC_S1600_Pr1605p2315_m26",
            p,
            q,
            t,
            r,
            a: BigInt::one(),
            d: BigInt::from(-26),
            s,
            g: AffinePoint { x: gx, y: gy },
            base_table: OnceCell::new(),
        }
    }

    /// `R = (P + 1 − T) / Q`; the division must be exact.
    fn cofactor(p: &BigInt, q: &BigInt, t: &BigInt) -> BigInt {
        let order = p + BigInt::one() - t;
        let r = &order / q;
        assert_eq!(&r * q, order, "cofactor division must be exact");
        r
    }

    /// Safe-scalar width from the power-of-two form of Q and the cofactor.
    ///
    /// Clamped scalars are `1 ‖ bits ‖ cofactor-tail`, i.e.
    /// `S + bitlen(R)` bits total, and every such value must stay below
    /// Q. For `Q = 2^power + rest` that allows `power − bitlen(R)` free
    /// bits; for `Q = 2^power − rest` one bit fewer.
    fn safe_scalar_bits(q_form: &PowerTwoPrime, r: &BigInt) -> u32 {
        let r_bits = r.bits() as u32;
        let power = q_form.power as u32;
        if q_form.negative {
            power - 1 - r_bits
        } else {
            power - r_bits
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_dalos_prime_shape() {
        let curve = Curve::dalos();
        let expected = (BigInt::one() << 1605) + BigInt::from(2315);
        assert_eq!(curve.p, expected);
        assert_eq!(curve.p.bits(), 1606);
    }

    #[test]
    fn test_cofactor_is_four() {
        let curve = Curve::dalos();
        assert_eq!(curve.r, BigInt::from(4));
        let order = &curve.p + BigInt::one() - &curve.t;
        assert!((order - &curve.r * &curve.q).is_zero());
    }

    #[test]
    fn test_safe_scalar_width() {
        assert_eq!(Curve::dalos().s, 1600);
    }

    #[test]
    fn test_generator_is_on_curve() {
        let curve = Curve::dalos();
        let g = curve.affine_to_extended(&curve.g);
        let (on_curve, infinity) = curve.is_on_curve(&g);
        assert!(on_curve);
        assert!(!infinity);
    }

    #[test]
    fn test_global_instance_matches_fresh_construction() {
        let fresh = Curve::dalos();
        assert_eq!(DALOS.p, fresh.p);
        assert_eq!(DALOS.q, fresh.q);
        assert_eq!(DALOS.g, fresh.g);
    }
}
