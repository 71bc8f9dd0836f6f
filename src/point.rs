//! Points on the secp256k1 curve, in affine and Jacobian coordinates.
//!
//! Jacobian addition uses the `add-1998-cmo-2` formulas and doubling the
//! `dbl-2009-l` formulas from the Explicit-Formulas Database:
//!
//! <https://hyperelliptic.org/EFD/g1p/auto-shortw-jacobian-0.html>
//!
//! All operations take their operands by reference and return freshly
//! allocated results; nothing mutates a caller-owned point. The identity
//! short-circuits inside addition are ordinary branches, so raw point
//! addition must not be fed secret-dependent coordinate data; the
//! multiplication layer in [`crate::mul`] is what balances operation
//! counts.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::field::{self, B, GX, GY, P, SQRT_EXP};

/// A point on the curve in affine coordinates `(x, y)`.
///
/// The group identity (point-at-infinity) is the sentinel `(0, 0)`,
/// which is not a real curve point on secp256k1. Every other value is
/// expected to satisfy `y² ≡ x³ + 7 (mod p)`; the arithmetic does not
/// validate its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub x: BigInt,
    pub y: BigInt,
}

/// A point on the curve in Jacobian coordinates `(X, Y, Z)`,
/// representing the affine point `(X/Z², Y/Z³)`.
///
/// A given affine point has many Jacobian representations; equality
/// compares the projected points. The identity is `(0, 0, 0)` (the
/// arithmetic treats any point with a zero `X` or `Y` as the identity,
/// with `Z = 0` the canonical form).
#[derive(Clone, Debug)]
pub struct JacobianPoint {
    pub x: BigInt,
    pub y: BigInt,
    pub z: BigInt,
}

impl AffinePoint {
    /// Builds a point from raw coordinates, without checking that they
    /// lie on the curve.
    pub fn new(x: BigInt, y: BigInt) -> Self {
        Self { x, y }
    }

    /// The group identity (point-at-infinity), encoded as `(0, 0)`.
    pub fn identity() -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::zero(),
        }
    }

    /// The conventional secp256k1 generator point `G`.
    pub fn generator() -> Self {
        Self {
            x: GX.clone(),
            y: GY.clone(),
        }
    }

    /// Whether this point is the identity sentinel `(0, 0)`.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// Whether the point satisfies the curve equation
    /// `y² ≡ x³ + 7 (mod p)`. The identity sentinel counts as on-curve.
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        on_curve_xy(&self.x, &self.y)
    }

    /// Lifts the point into Jacobian coordinates with `Z = 1` (the
    /// identity maps to the canonical `(0, 0, 0)`).
    pub fn to_jacobian(&self) -> JacobianPoint {
        if self.is_identity() {
            return JacobianPoint::identity();
        }
        JacobianPoint {
            x: self.x.clone(),
            y: self.y.clone(),
            z: BigInt::one(),
        }
    }

    /// Adds two affine points using the slope form of the group law:
    ///
    /// ```text
    /// if P1 == P2:  m = (3·x1²) / (2·y1)       (tangent; a = 0)
    /// else:         m = (y2 − y1) / (x2 − x1)  (chord)
    /// x3 = m² − x1 − x2
    /// y3 = m·(x1 − x3) − y1
    /// ```
    ///
    /// Adding the identity returns the other operand; adding a point to
    /// its negation returns the identity. Each addition pays one field
    /// inversion, which is why the multiplication layer prefers
    /// Jacobian arithmetic.
    pub fn add(&self, rhs: &AffinePoint) -> AffinePoint {
        if self.is_identity() {
            return rhs.clone();
        }
        if rhs.is_identity() {
            return self.clone();
        }

        let x_equal = self.x == rhs.x;
        let y_equal = self.y == rhs.y;

        // Same x but different y: the operands are negations of each
        // other (the only two curve points sharing an x-coordinate).
        if x_equal && !y_equal {
            return AffinePoint::identity();
        }

        let m = if x_equal && y_equal {
            let tangent = (&self.x * &self.x) * 3u32;
            field::reduce(tangent * field::invert(&(&self.y * 2u32)))
        } else {
            let chord = &rhs.y - &self.y;
            field::reduce(chord * field::invert(&(&rhs.x - &self.x)))
        };

        let x3 = field::reduce(&m * &m - &self.x - &rhs.x);
        let y3 = field::reduce(m * (&self.x - &x3) - &self.y);
        AffinePoint { x: x3, y: y3 }
    }

    /// Doubles the point. Same as adding it to itself.
    pub fn double(&self) -> AffinePoint {
        self.add(self)
    }

    /// Subtracts `rhs` from this point.
    pub fn sub(&self, rhs: &AffinePoint) -> AffinePoint {
        self.add(&rhs.neg())
    }

    /// Returns the negation `(x, -y)` of this point. The identity is
    /// its own negation.
    pub fn neg(&self) -> AffinePoint {
        AffinePoint {
            x: self.x.clone(),
            y: field::negate(&self.y),
        }
    }
}

impl JacobianPoint {
    /// The group identity (point-at-infinity), encoded as `(0, 0, 0)`.
    pub fn identity() -> Self {
        Self {
            x: BigInt::zero(),
            y: BigInt::zero(),
            z: BigInt::zero(),
        }
    }

    /// Whether this point represents the identity. Any zero component
    /// marks the identity; no real secp256k1 point has one.
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() || self.y.is_zero() || self.z.is_zero()
    }

    /// Adds two Jacobian points using the `add-1998-cmo-2` formulas:
    ///
    /// ```text
    /// U1 = X1·Z2²  U2 = X2·Z1²
    /// S1 = Y1·Z2³  S2 = Y2·Z1³
    /// H = U2 − U1  r = S2 − S1
    /// X3 = r² − H³ − 2·U1·H²
    /// Y3 = r·(U1·H² − X3) − S1·H³
    /// Z3 = Z1·Z2·H
    /// ```
    ///
    /// `H = 0` means both operands project to the same x-coordinate: if
    /// `r = 0` too they are the same point and the sum is its double,
    /// otherwise they are negations and the sum is the identity.
    pub fn add(&self, rhs: &JacobianPoint) -> JacobianPoint {
        if self.x.is_zero() || self.y.is_zero() {
            return rhs.clone();
        }
        if rhs.x.is_zero() || rhs.y.is_zero() {
            return self.clone();
        }

        let z1z1 = &self.z * &self.z;
        let z2z2 = &rhs.z * &rhs.z;
        let u1 = &self.x * &z2z2;
        let u2 = &rhs.x * &z1z1;
        let s1 = &self.y * z2z2 * &rhs.z;
        let s2 = &rhs.y * z1z1 * &self.z;

        // Reduced so that they can be zero-tested.
        let h = field::reduce(u2 - &u1);
        let r = field::reduce(s2 - &s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return JacobianPoint::identity();
        }

        let hh = &h * &h;
        let hhh = &hh * &h;
        let v = u1 * hh;

        let x3 = field::reduce(&r * &r - &hhh - &v - &v);
        let y3 = field::reduce(r * (v - &x3) - s1 * &hhh);
        let z3 = field::reduce(&self.z * &rhs.z * h);
        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Doubles a Jacobian point using the `dbl-2009-l` formulas:
    ///
    /// ```text
    /// A = X²  B = Y²  C = B²
    /// D = 4·X·B  E = 3·A  F = E²
    /// X3 = F − 2·D
    /// Y3 = E·(D − X3) − 8·C
    /// Z3 = 2·Y·Z
    /// ```
    ///
    /// `D` is the expanded form of the database's `2·((X+B)² − A − C)`,
    /// which saves a squaring. A point with `Y = 0` doubles to `Z3 = 0`,
    /// the identity.
    pub fn double(&self) -> JacobianPoint {
        let a = &self.x * &self.x;
        let b = &self.y * &self.y;
        let c = &b * &b;
        let d = (&self.x * b) * 4u32;
        let e = a * 3u32;
        let f = &e * &e;

        let x3 = field::reduce(f - &d - &d);
        let y3 = field::reduce(e * (d - &x3) - c * 8u32);
        let z3 = field::reduce((&self.y * &self.z) * 2u32);
        JacobianPoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Subtracts `rhs` from this point.
    pub fn sub(&self, rhs: &JacobianPoint) -> JacobianPoint {
        self.add(&rhs.neg())
    }

    /// Returns the negation `(X, -Y, Z)` of this point.
    pub fn neg(&self) -> JacobianPoint {
        JacobianPoint {
            x: self.x.clone(),
            y: field::negate(&self.y),
            z: self.z.clone(),
        }
    }

    /// Converts to affine coordinates, normalizing `Z` to 1.
    ///
    /// The identity converts to the `(0, 0)` sentinel. For any other
    /// point this costs one field inversion:
    /// `x = X·Z⁻²`, `y = Y·Z⁻³`.
    pub fn to_affine(&self) -> AffinePoint {
        if self.z.is_one() {
            return AffinePoint {
                x: self.x.clone(),
                y: self.y.clone(),
            };
        }
        if self.z.is_zero() {
            return AffinePoint::identity();
        }

        let z_inv = field::invert(&self.z);
        let z_inv2 = &z_inv * &z_inv;
        let x = field::reduce(&self.x * &z_inv2);
        let y = field::reduce(&self.y * z_inv2 * z_inv);
        AffinePoint { x, y }
    }

    /// Whether the point satisfies the curve equation. The identity
    /// counts as on-curve.
    ///
    /// For `Z = 1` this is the affine test `y² ≡ x³ + 7`. Otherwise the
    /// equation is checked directly in Jacobian form,
    ///
    /// ```text
    /// (Y/Z³)² = (X/Z²)³ + 7  ⟺  Y² = X³ + Z⁶·7
    /// ```
    ///
    /// which avoids the field inversion an affine conversion would pay.
    pub fn is_on_curve(&self) -> bool {
        if self.x.is_zero() && self.y.is_zero() {
            return true;
        }
        if self.z.is_one() {
            return on_curve_xy(&self.x, &self.y);
        }

        let left = field::reduce(&self.y * &self.y);
        let z6b = self.z.modpow(&BigInt::from(6u32), &P) * &*B;
        let right = field::reduce(&self.x * &self.x * &self.x + z6b);
        left == right
    }
}

fn on_curve_xy(x: &BigInt, y: &BigInt) -> bool {
    let left = field::reduce(y * y);
    let right = field::reduce(x * x * x + &*B);
    left == right
}

impl PartialEq for JacobianPoint {
    /// Tests whether two Jacobian points project to the same affine
    /// point, without converting either (a conversion would pay a field
    /// inversion; cross-multiplying is about 5x faster):
    ///
    /// ```text
    /// X1/Z1² = X2/Z2²  ⟺  X1·Z2² = X2·Z1²
    /// Y1/Z1³ = Y2/Z2³  ⟺  Y1·Z2³ = Y2·Z1³
    /// ```
    ///
    /// The cross-multiplied form only separates non-identity points, so
    /// identities are matched up front.
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return self.is_identity() && other.is_identity();
        }
        if self.z == other.z {
            return self.x == other.x && self.y == other.y;
        }

        let z1z1 = &self.z * &self.z;
        let z2z2 = &other.z * &other.z;
        if field::reduce(&self.x * &z2z2) != field::reduce(&other.x * &z1z1) {
            return false;
        }
        let s1 = field::reduce(&self.y * z2z2 * &other.z);
        let s2 = field::reduce(&other.y * z1z1 * &self.z);
        s1 == s2
    }
}

impl Eq for JacobianPoint {}

/// Solves the curve equation `y² = x³ + 7 (mod p)` for `y`, given an
/// affine x-coordinate.
///
/// Returns the two candidate y-coordinates as `(even_y, odd_y)`, with
/// `odd_y = p − even_y`. This is what uncompresses a public key: a
/// compressed key carries the x-coordinate plus one bit selecting the
/// parity of `y`.
///
/// Special cases:
///
///  - `x = 0` returns the identity pair `(0, 0)`.
///  - `x` outside `[0, p)` returns `None`; no such point exists.
///  - An `x` whose `x³ + 7` is a non-residue returns `None`.
///
/// The square root is computed as `c^((p+1)/4) mod p`, which is valid
/// because `p ≡ 3 (mod 4)`; the result is squared back to weed out
/// non-residues.
pub fn recover_y(x: &BigInt) -> Option<(BigInt, BigInt)> {
    if x.is_zero() {
        return Some((BigInt::zero(), BigInt::zero()));
    }
    if x.is_negative() || *x >= *P {
        return None;
    }

    let c = field::reduce(x * x * x + &*B);
    let y = c.modpow(&SQRT_EXP, &P);
    if field::reduce(&y * &y) != c {
        return None;
    }

    let (even_y, odd_y) = if y.is_even() {
        let odd = field::negate(&y);
        (y, odd)
    } else {
        let even = field::negate(&y);
        (even, y)
    };
    Some((even_y, odd_y))
}

// Operator sugar: additive operators map onto the by-reference methods,
// for every combination of owned and borrowed operands.

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: &AffinePoint) -> AffinePoint {
        AffinePoint::add(self, rhs)
    }
}

impl Add<AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: AffinePoint) -> AffinePoint {
        AffinePoint::add(self, &rhs)
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, rhs)
    }
}

impl Add for AffinePoint {
    type Output = AffinePoint;

    fn add(self, rhs: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &rhs)
    }
}

impl AddAssign<&AffinePoint> for AffinePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = AffinePoint::add(self, rhs);
    }
}

impl AddAssign for AffinePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = AffinePoint::add(self, &rhs);
    }
}

impl Sub<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: &AffinePoint) -> AffinePoint {
        AffinePoint::sub(self, rhs)
    }
}

impl Sub<AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: AffinePoint) -> AffinePoint {
        AffinePoint::sub(self, &rhs)
    }
}

impl Sub<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: &AffinePoint) -> AffinePoint {
        AffinePoint::sub(&self, rhs)
    }
}

impl Sub for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, rhs: AffinePoint) -> AffinePoint {
        AffinePoint::sub(&self, &rhs)
    }
}

impl SubAssign<&AffinePoint> for AffinePoint {
    fn sub_assign(&mut self, rhs: &AffinePoint) {
        *self = AffinePoint::sub(self, rhs);
    }
}

impl SubAssign for AffinePoint {
    fn sub_assign(&mut self, rhs: AffinePoint) {
        *self = AffinePoint::sub(self, &rhs);
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint::neg(self)
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint::neg(&self)
    }
}

impl Add<&JacobianPoint> for &JacobianPoint {
    type Output = JacobianPoint;

    fn add(self, rhs: &JacobianPoint) -> JacobianPoint {
        JacobianPoint::add(self, rhs)
    }
}

impl Add<JacobianPoint> for &JacobianPoint {
    type Output = JacobianPoint;

    fn add(self, rhs: JacobianPoint) -> JacobianPoint {
        JacobianPoint::add(self, &rhs)
    }
}

impl Add<&JacobianPoint> for JacobianPoint {
    type Output = JacobianPoint;

    fn add(self, rhs: &JacobianPoint) -> JacobianPoint {
        JacobianPoint::add(&self, rhs)
    }
}

impl Add for JacobianPoint {
    type Output = JacobianPoint;

    fn add(self, rhs: JacobianPoint) -> JacobianPoint {
        JacobianPoint::add(&self, &rhs)
    }
}

impl AddAssign<&JacobianPoint> for JacobianPoint {
    fn add_assign(&mut self, rhs: &JacobianPoint) {
        *self = JacobianPoint::add(self, rhs);
    }
}

impl AddAssign for JacobianPoint {
    fn add_assign(&mut self, rhs: JacobianPoint) {
        *self = JacobianPoint::add(self, &rhs);
    }
}

impl Sub<&JacobianPoint> for &JacobianPoint {
    type Output = JacobianPoint;

    fn sub(self, rhs: &JacobianPoint) -> JacobianPoint {
        JacobianPoint::sub(self, rhs)
    }
}

impl Sub<JacobianPoint> for &JacobianPoint {
    type Output = JacobianPoint;

    fn sub(self, rhs: JacobianPoint) -> JacobianPoint {
        JacobianPoint::sub(self, &rhs)
    }
}

impl Sub<&JacobianPoint> for JacobianPoint {
    type Output = JacobianPoint;

    fn sub(self, rhs: &JacobianPoint) -> JacobianPoint {
        JacobianPoint::sub(&self, rhs)
    }
}

impl Sub for JacobianPoint {
    type Output = JacobianPoint;

    fn sub(self, rhs: JacobianPoint) -> JacobianPoint {
        JacobianPoint::sub(&self, &rhs)
    }
}

impl SubAssign<&JacobianPoint> for JacobianPoint {
    fn sub_assign(&mut self, rhs: &JacobianPoint) {
        *self = JacobianPoint::sub(self, rhs);
    }
}

impl SubAssign for JacobianPoint {
    fn sub_assign(&mut self, rhs: JacobianPoint) {
        *self = JacobianPoint::sub(self, &rhs);
    }
}

impl Neg for &JacobianPoint {
    type Output = JacobianPoint;

    fn neg(self) -> JacobianPoint {
        JacobianPoint::neg(self)
    }
}

impl Neg for JacobianPoint {
    type Output = JacobianPoint;

    fn neg(self) -> JacobianPoint {
        JacobianPoint::neg(&self)
    }
}

impl From<&AffinePoint> for JacobianPoint {
    fn from(point: &AffinePoint) -> JacobianPoint {
        point.to_jacobian()
    }
}

impl From<&JacobianPoint> for AffinePoint {
    fn from(point: &JacobianPoint) -> AffinePoint {
        point.to_affine()
    }
}
