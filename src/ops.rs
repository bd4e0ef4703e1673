//! Twisted Edwards group law and scalar multiplication
//!
//! The group law uses the Hisil–Wong–Carter–Dawson extended-coordinate
//! formulas, selected by the Z-normalization of the operands:
//!
//! - addition `V1` (`mmadd-2008-hwcd`) when both `Z = 1`,
//! - addition `V2` (`madd-2008-hwcd-2`) when only `Z₂ = 1`,
//! - addition `V3` (`add-2008-hwcd`) in the general case,
//! - doubling `V1` (`mdbl-2008-hwcd`) when `Z = 1`, else `V2`
//!   (`dbl-2008-hwcd`),
//! - tripling via `tpl-2015-c`.
//!
//! Scalar multiplication is a base-49 Horner ladder: a 7×7 precompute
//! table of the multiples `1·P … 49·P`, one table addition per digit and
//! one ×49 shift ([`Curve::forty_niner`], `49 = 3·2⁴ + 1`) between
//! digits.
//!
//! # Security
//!
//! The ladder's table lookups are indexed by the scalar's digits, so
//! execution time and cache behavior depend on the scalar. Nothing here
//! is constant-time.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

use crate::base49;
use crate::curve::Curve;
use crate::point::ExtendedPoint;
use crate::{DalosError, DalosResult};

/// Precomputed multiples `1·P … 49·P` of a base point, stored row-major
/// as the 7×7 window table of the base-49 ladder.
pub struct PrecomputeMatrix {
    rows: [[ExtendedPoint; 7]; 7],
}

impl PrecomputeMatrix {
    /// The multiple `digit·P` for a digit in `1..=49`.
    pub fn lookup(&self, digit: u8) -> &ExtendedPoint {
        let index = digit as usize - 1;
        &self.rows[index / 7][index % 7]
    }
}

impl Curve {
    /// Point addition, dispatching on the operands' Z-normalization.
    ///
    /// The identity is short-circuited here so the formula variants only
    /// ever see proper points. The mixed variant's dual formulas
    /// degenerate to `Z₃ = 0` when both operands are the same point;
    /// that case is detected and rerouted through doubling.
    pub fn add(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if p1.is_infinity() {
            return Ok(p2.clone());
        }
        if p2.is_infinity() {
            return Ok(p1.clone());
        }
        if p1.z.is_one() && p2.z.is_one() {
            self.add_v1(p1, p2)
        } else if p2.z.is_one() {
            let sum = self.add_v2(p1, p2)?;
            if sum.z.is_zero() {
                return self.double(p1);
            }
            Ok(sum)
        } else {
            self.add_v3(p1, p2)
        }
    }

    /// Addition variant 1, `mmadd-2008-hwcd`: requires `Z₁ = Z₂ = 1`.
    pub fn add_v1(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if !p1.z.is_one() || !p2.z.is_one() {
            return Err(DalosError::InvalidInput(
                "mmadd addition requires Z1 = Z2 = 1".into(),
            ));
        }
        let one = BigInt::one();
        let a = self.mul_mod_p(&p1.x, &p2.x);
        let b = self.mul_mod_p(&p1.y, &p2.y);
        let c = self.mul_mod_p(&p1.t, &self.mul_mod_p(&self.d, &p2.t));
        let cross = self.mul_mod_p(
            &self.add_mod_p(&p1.x, &p1.y),
            &self.add_mod_p(&p2.x, &p2.y),
        );
        let e = self.sub_mod_p(&self.sub_mod_p(&cross, &a), &b);
        let f = self.sub_mod_p(&one, &c);
        let g = self.add_mod_p(&one, &c);
        let h = self.sub_mod_p(&b, &self.mul_mod_p(&self.a, &a));
        Ok(ExtendedPoint {
            x: self.mul_mod_p(&e, &f),
            y: self.mul_mod_p(&g, &h),
            z: self.sub_mod_p(&one, &self.mul_mod_p(&c, &c)),
            t: self.mul_mod_p(&e, &h),
        })
    }

    /// Addition variant 2, `madd-2008-hwcd-2`: requires `Z₂ = 1`.
    pub fn add_v2(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if !p2.z.is_one() {
            return Err(DalosError::InvalidInput(
                "madd addition requires Z2 = 1".into(),
            ));
        }
        let a = self.mul_mod_p(&p1.x, &p2.x);
        let b = self.mul_mod_p(&p1.y, &p2.y);
        let c = self.mul_mod_p(&p1.z, &p2.t);
        let d = &p1.t;
        let e = self.add_mod_p(&c, d);
        let cross = self.mul_mod_p(
            &self.sub_mod_p(&p1.x, &p1.y),
            &self.add_mod_p(&p2.x, &p2.y),
        );
        let f = self.sub_mod_p(&self.add_mod_p(&cross, &b), &a);
        let g = self.add_mod_p(&b, &self.mul_mod_p(&a, &self.a));
        let h = self.sub_mod_p(d, &c);
        Ok(ExtendedPoint {
            x: self.mul_mod_p(&e, &f),
            y: self.mul_mod_p(&g, &h),
            z: self.mul_mod_p(&f, &g),
            t: self.mul_mod_p(&e, &h),
        })
    }

    /// Addition variant 3, `add-2008-hwcd`: the general case, `Z₂ ≠ 1`.
    pub fn add_v3(&self, p1: &ExtendedPoint, p2: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if p2.z.is_one() {
            return Err(DalosError::InvalidInput(
                "general addition expects Z2 different from 1".into(),
            ));
        }
        let a = self.mul_mod_p(&p1.x, &p2.x);
        let b = self.mul_mod_p(&p1.y, &p2.y);
        let c = self.mul_mod_p(&p1.t, &self.mul_mod_p(&self.d, &p2.t));
        let denom = self.mul_mod_p(&p1.z, &p2.z);
        let cross = self.mul_mod_p(
            &self.add_mod_p(&p1.x, &p1.y),
            &self.add_mod_p(&p2.x, &p2.y),
        );
        let e = self.sub_mod_p(&self.sub_mod_p(&cross, &a), &b);
        let f = self.sub_mod_p(&denom, &c);
        let g = self.add_mod_p(&denom, &c);
        let h = self.sub_mod_p(&b, &self.mul_mod_p(&self.a, &a));
        Ok(ExtendedPoint {
            x: self.mul_mod_p(&e, &f),
            y: self.mul_mod_p(&g, &h),
            z: self.mul_mod_p(&f, &g),
            t: self.mul_mod_p(&e, &h),
        })
    }

    /// Point doubling, dispatching on the Z-normalization.
    pub fn double(&self, p: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if p.is_infinity() {
            return Ok(ExtendedPoint::infinity());
        }
        if p.z.is_one() {
            self.double_v1(p)
        } else {
            self.double_v2(p)
        }
    }

    /// Doubling variant 1, `mdbl-2008-hwcd`: requires `Z = 1`.
    pub fn double_v1(&self, p: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        if !p.z.is_one() {
            return Err(DalosError::InvalidInput(
                "mdbl doubling requires Z = 1".into(),
            ));
        }
        let two = BigInt::from(2);
        let a = self.mul_mod_p(&p.x, &p.x);
        let b = self.mul_mod_p(&p.y, &p.y);
        let d = self.mul_mod_p(&a, &self.a);
        let sum = self.add_mod_p(&p.x, &p.y);
        let e = self.sub_mod_p(&self.sub_mod_p(&self.mul_mod_p(&sum, &sum), &a), &b);
        let g = self.add_mod_p(&d, &b);
        let h = self.sub_mod_p(&d, &b);
        Ok(ExtendedPoint {
            x: self.mul_mod_p(&e, &self.sub_mod_p(&g, &two)),
            y: self.mul_mod_p(&g, &h),
            z: self.sub_mod_p(&self.mul_mod_p(&g, &g), &self.mul_mod_p(&two, &g)),
            t: self.mul_mod_p(&e, &h),
        })
    }

    /// Doubling variant 2, `dbl-2008-hwcd`: the general case.
    pub fn double_v2(&self, p: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        let two = BigInt::from(2);
        let a = self.mul_mod_p(&p.x, &p.x);
        let b = self.mul_mod_p(&p.y, &p.y);
        let c = self.mul_mod_p(&two, &self.mul_mod_p(&p.z, &p.z));
        let d = self.mul_mod_p(&a, &self.a);
        let sum = self.add_mod_p(&p.x, &p.y);
        let e = self.sub_mod_p(&self.sub_mod_p(&self.mul_mod_p(&sum, &sum), &a), &b);
        let g = self.add_mod_p(&d, &b);
        let f = self.sub_mod_p(&g, &c);
        let h = self.sub_mod_p(&d, &b);
        Ok(ExtendedPoint {
            x: self.mul_mod_p(&e, &f),
            y: self.mul_mod_p(&g, &h),
            z: self.mul_mod_p(&f, &g),
            t: self.mul_mod_p(&e, &h),
        })
    }

    /// Point tripling via the `tpl-2015-c` formulas.
    ///
    /// Equivalent to a doubling followed by an addition, in fewer field
    /// multiplications; works for any Z.
    pub fn triple(&self, p: &ExtendedPoint) -> ExtendedPoint {
        if p.is_infinity() {
            return ExtendedPoint::infinity();
        }
        let two = BigInt::from(2);
        let yy = self.mul_mod_p(&p.y, &p.y);
        let xx = self.mul_mod_p(&p.x, &p.x);
        let axx = self.mul_mod_p(&self.a, &xx);
        let ap = self.add_mod_p(&yy, &axx);
        let zz = self.mul_mod_p(&p.z, &p.z);
        let b = self.mul_mod_p(&two, &self.sub_mod_p(&self.mul_mod_p(&two, &zz), &ap));
        let xb = self.mul_mod_p(&axx, &b);
        let yb = self.mul_mod_p(&yy, &b);
        let aa = self.mul_mod_p(&ap, &self.sub_mod_p(&yy, &axx));
        let f = self.sub_mod_p(&aa, &yb);
        let g = self.add_mod_p(&aa, &xb);
        let xe = self.mul_mod_p(&p.x, &self.add_mod_p(&yb, &aa));
        let yh = self.mul_mod_p(&p.y, &self.sub_mod_p(&xb, &aa));
        let zf = self.mul_mod_p(&p.z, &f);
        let zg = self.mul_mod_p(&p.z, &g);
        ExtendedPoint {
            x: self.mul_mod_p(&xe, &zf),
            y: self.mul_mod_p(&yh, &zg),
            z: self.mul_mod_p(&zf, &zg),
            t: self.mul_mod_p(&xe, &yh),
        }
    }

    /// Compute `49·P` as triple, four doublings, one addition
    /// (`49 = 3·16 + 1`). This is the inter-digit shift of the base-49
    /// ladder.
    pub fn forty_niner(&self, p: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        let p3 = self.triple(p);
        let p6 = self.double(&p3)?;
        let p12 = self.double(&p6)?;
        let p24 = self.double(&p12)?;
        let p48 = self.double(&p24)?;
        self.add(&p48, p)
    }

    /// Build the 7×7 table of multiples `1·P … 49·P`.
    ///
    /// Even multiples double the half entry, odd multiples add `P` to the
    /// predecessor, so every entry costs one group operation.
    pub fn precompute_matrix(&self, p: &ExtendedPoint) -> DalosResult<PrecomputeMatrix> {
        let mut multiples: Vec<ExtendedPoint> = Vec::with_capacity(49);
        multiples.push(p.clone());
        for k in 2..=49usize {
            let next = if k % 2 == 0 {
                self.double(&multiples[k / 2 - 1])?
            } else {
                self.add(&multiples[k - 2], p)?
            };
            multiples.push(next);
        }
        let rows =
            std::array::from_fn(|row| std::array::from_fn(|col| multiples[row * 7 + col].clone()));
        Ok(PrecomputeMatrix { rows })
    }

    /// Multiply an arbitrary point by a scalar.
    ///
    /// The scalar is decomposed into base-49 digits (most significant
    /// first) and evaluated Horner-style: one table addition per digit,
    /// one ×49 shift between digits.
    pub fn scalar_mul(&self, scalar: &BigUint, p: &ExtendedPoint) -> DalosResult<ExtendedPoint> {
        let table = self.precompute_matrix(p)?;
        self.scalar_mul_with_table(scalar, &table)
    }

    /// Multiply the generator by a scalar.
    ///
    /// The generator's precompute table depends only on the immutable
    /// curve parameters, so it is built once and memoized.
    pub fn scalar_mul_base(&self, scalar: &BigUint) -> DalosResult<ExtendedPoint> {
        let table = self.base_table.get_or_try_init(|| {
            let g = self.affine_to_extended(&self.g);
            self.precompute_matrix(&g)
        })?;
        self.scalar_mul_with_table(scalar, table)
    }

    fn scalar_mul_with_table(
        &self,
        scalar: &BigUint,
        table: &PrecomputeMatrix,
    ) -> DalosResult<ExtendedPoint> {
        let digits = base49::digits_of(scalar);
        let last = digits.len() - 1;
        let mut acc = ExtendedPoint::infinity();
        for (i, &digit) in digits.iter().enumerate() {
            if digit != 0 {
                acc = self.add(&acc, table.lookup(digit))?;
            }
            if i != last {
                acc = self.forty_niner(&acc)?;
            }
        }
        Ok(acc)
    }
}
