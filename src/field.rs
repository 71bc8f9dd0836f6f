//! Curve constants and field-arithmetic wrappers.
//!
//! secp256k1 is defined over the prime field of [`P`] = 2²⁵⁶ − 2³² − 977,
//! with a group of prime order [`N`] generated by ([`GX`], [`GY`]). The
//! constants live here as process-wide immutable big integers, together
//! with the small wrappers the point arithmetic builds on: reduction into
//! canonical range, additive inversion, and multiplicative inversion.
//!
//! Reduction is lazy by design. Formula implementations let intermediate
//! values exceed `p` and call [`reduce`] only at designated points
//! (always before a value is zero-tested or returned), which keeps the
//! number of expensive big-integer divisions down.

use hex_literal::hex;
use lazy_static::lazy_static;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::Zero;

lazy_static! {
    /// The secp256k1 field prime `p = 2²⁵⁶ − 2³² − 977`. Point
    /// coordinates are integers modulo `p`.
    pub static ref P: BigInt = BigInt::from_bytes_be(Sign::Plus, &hex!(
        "FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F"));

    /// The secp256k1 group order `n`. Scalars (private keys, nonces,
    /// ECDSA signature halves) are integers modulo `n`.
    pub static ref N: BigInt = BigInt::from_bytes_be(Sign::Plus, &hex!(
        "FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141"));

    /// Half the group order, rounded down. An ECDSA signature is
    /// canonical when its `s` half does not exceed this bound.
    pub static ref N_HALF: BigInt = &*N >> 1;

    /// The curve equation constant `b`; secp256k1 is `y² = x³ + 7`
    /// (the `a` coefficient is zero).
    pub static ref B: BigInt = BigInt::from(7u32);

    /// x-coordinate of the conventional generator point `G`.
    pub static ref GX: BigInt = BigInt::from_bytes_be(Sign::Plus, &hex!(
        "79BE667E F9DCBBAC 55A06295 CE870B07 029BFCDB 2DCE28D9 59F2815B 16F81798"));

    /// y-coordinate of the conventional generator point `G`.
    pub static ref GY: BigInt = BigInt::from_bytes_be(Sign::Plus, &hex!(
        "483ADA77 26A3C465 5DA4FBFC 0E1108A8 FD17B448 A6855419 9C47D08F FB10D4B8"));

    /// `(p + 1) / 4`. Since `p ≡ 3 (mod 4)`, raising a quadratic residue
    /// to this power yields one of its square roots modulo `p`.
    pub(crate) static ref SQRT_EXP: BigInt = BigInt::from_bytes_be(Sign::Plus, &hex!(
        "3FFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF BFFFFF0C"));
}

/// Reduces a coordinate value into the canonical range `[0, p)`.
///
/// Euclidean reduction: the result is non-negative even when the input
/// is, as happens with subtraction-heavy formulas, negative.
pub(crate) fn reduce(n: BigInt) -> BigInt {
    n.mod_floor(&P)
}

/// Returns the additive inverse of the given y-coordinate modulo the
/// field prime `p`: `0` for `0`, otherwise `p − y`.
///
/// This negates a point, because `(x, y) + (x, -y)` is the identity.
/// The input is expected to be in `[0, p)`; applying `negate` twice
/// gives back the original value.
pub fn negate(y: &BigInt) -> BigInt {
    if y.is_zero() {
        BigInt::zero()
    } else {
        &*P - y
    }
}

/// Computes `n⁻¹ mod p`.
///
/// Every nonzero value modulo the prime `p` is invertible, so a failure
/// here cannot be triggered by any curve input; it would mean the
/// modulus itself is corrupted, and the function panics rather than
/// propagate garbage coordinates.
pub(crate) fn invert(n: &BigInt) -> BigInt {
    let n = n.mod_floor(&P);
    match n.modinv(&P) {
        Some(inverse) => inverse,
        None => panic!(
            "cannot invert {:x} modulo the field prime; the modulus is not prime",
            n
        ),
    }
}
