//! Kurv is a low-level elliptic-curve library for secp256k1, the short
//! Weierstraß curve `y² = x³ + 7` used by Bitcoin, Ethereum and many
//! other systems.
//!
//! The crate provides the building blocks for public-key derivation,
//! ECDH and ECDSA: point arithmetic in both affine and Jacobian
//! coordinates, scalar multiplication, and ECDSA signing and
//! verification producing canonical (low-S) signatures.
//!
//! Coordinates and scalars are plain [`num_bigint::BigInt`] values; the
//! big-integer arithmetic itself is delegated entirely to that crate.
//! Coordinates are integers modulo the field prime [`field::P`], scalars
//! are integers modulo the group order [`field::N`]. Operations reduce
//! intermediate values lazily, but every value returned from a public
//! operation is in canonical range.
//!
//! # Coordinate systems
//!
//! An [`AffinePoint`] is the usual `(x, y)` pair. A [`JacobianPoint`]
//! `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)`; one affine
//! point has many Jacobian representations, and [`PartialEq`] on
//! [`JacobianPoint`] compares the points they project to. Jacobian
//! arithmetic avoids the per-operation field inversion that affine
//! arithmetic pays for, so scalar multiplication runs over Jacobian
//! points and converts back once at the end.
//!
//! The group identity (the point-at-infinity) is encoded by the sentinel
//! `(0, 0)` in affine form and `(0, 0, 0)` in Jacobian form. There is no
//! actual curve point with a zero coordinate on secp256k1, so the
//! overload is unambiguous.
//!
//! # Scalar multiplication
//!
//! [`JacobianPoint::multiply`] uses a Montgomery ladder for arbitrary
//! points: one addition and one doubling per scalar bit, whatever the
//! bit's value. For a point that is multiplied many times, a
//! [`PrecomputedTable`] switches it to a windowed scan over 4-bit
//! windows; [`multiply_base_point`] uses a process-wide table for the
//! generator, built on first use. Operation *counts* do not depend on
//! the scalar, but the point-addition primitive itself branches on
//! identity operands, so none of this is hardened against
//! microarchitectural (cache or timing) attackers.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigInt;
//! use kurv::{ecdsa, multiply_base_point};
//!
//! fn int(s: &str) -> BigInt {
//!     BigInt::parse_bytes(s.as_bytes(), 16).unwrap()
//! }
//!
//! // Derive a public key from a private key.
//! let d = int("c370af8c091812ef7f6bfaffb494b1046fb25486c9873243b80826daef3ec583");
//! let public_key = multiply_base_point(&d);
//! assert_eq!(
//!     public_key.x,
//!     int("76cd66c6cca75278ff408ce67290537367719154ae2b96448327fe4033ddcfc7"),
//! );
//!
//! // Sign a message hash with a nonce, then verify.
//! let k = int("2daa9b8a3dbbff2a68498a2a392f866b053c2d0ff0b79a33ec3e1ed7e18bd40b");
//! let z = int("1c5863cd55b5a4413fd59f054af57ba3c75c0698b3851d70f99b8de2d5c7338f");
//! let sig = ecdsa::sign(&d, &k, &z).unwrap();
//! assert!(ecdsa::verify(&z, &sig, &public_key));
//! ```

pub mod ecdsa;
pub mod field;
pub mod mul;
pub mod point;
pub mod scalar;

pub use rand_core::{CryptoRng, RngCore};

pub use ecdsa::{sign, verify, Signature};
pub use field::negate;
pub use mul::{multiply_base_point, PrecomputedTable};
pub use point::{recover_y, AffinePoint, JacobianPoint};
pub use scalar::{invert_scalar, is_valid_scalar, random_scalar};

/// Errors reported by the fallible operations.
///
/// Arithmetic below the multiplication layer is total and reports
/// nothing; these cover scalar validation, curve-membership refusal and
/// scalar inversion.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A private key or nonce scalar is outside the range `[1, n)`.
    #[error("scalar is outside the range [1, n)")]
    InvalidScalar,

    /// Scalar multiplication was requested on a point that does not
    /// satisfy the curve equation. Multiplying an off-curve point could
    /// leak information about the scalar through the invalid-curve
    /// result, so the request is refused instead.
    #[error("point is not on the secp256k1 curve")]
    NotOnCurve,

    /// The value shares a factor with the modulus and has no inverse.
    #[error("value has no modular inverse")]
    NonInvertible,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
