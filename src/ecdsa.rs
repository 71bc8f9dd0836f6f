//! ECDSA signing and verification over secp256k1.
//!
//! Hashing, nonce derivation (e.g. RFC 6979) and signature encoding are
//! the caller's business; this module works on the message hash `z`,
//! the private scalar `d` and the nonce `k` as plain integers, and on
//! signatures as `(r, s)` scalar pairs.

use num_bigint::BigInt;
use num_integer::Integer;

use crate::field::{N, N_HALF};
use crate::mul::multiply_base_point;
use crate::point::AffinePoint;
use crate::scalar::{invert_scalar, is_valid_scalar};
use crate::{Error, Result};

/// An ECDSA signature: the pair of scalars `(r, s)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: BigInt,
    pub s: BigInt,
}

impl Signature {
    /// Whether the signature is canonical, i.e. `s ≤ n/2`.
    ///
    /// [`sign`] only produces canonical signatures; [`verify`] accepts
    /// both forms. Systems that reject signature malleability (notably
    /// Bitcoin consensus rules) require the canonical form.
    pub fn is_low_s(&self) -> bool {
        self.s <= *N_HALF
    }
}

/// Signs the message hash `z` with the private key `d` and nonce `k`.
///
/// ```text
/// (x, _) = k·G
/// r = x mod n
/// s = k⁻¹·(r·d + z) mod n
/// ```
///
/// followed by low-S normalisation: if `s > n/2`, `s` is replaced by
/// `n − s`, so the returned signature is always canonical.
///
/// Both `d` and `k` must lie in `[1, n)`, or the call fails with
/// [`Error::InvalidScalar`]. The nonce must be unique and unpredictable
/// per message: reusing `k` for two messages reveals `d`.
///
/// A pathological nonce whose `r` or `s` comes out zero is *not*
/// retried; the degenerate signature is returned as computed. No known
/// input produces one, but callers deriving nonces deterministically
/// may wish to check `r ≠ 0` and `s ≠ 0` themselves.
pub fn sign(d: &BigInt, k: &BigInt, z: &BigInt) -> Result<Signature> {
    if !is_valid_scalar(k) || !is_valid_scalar(d) {
        return Err(Error::InvalidScalar);
    }

    let point = multiply_base_point(k);
    let r = point.x.mod_floor(&N);

    let mut s = (invert_scalar(k)? * (&r * d + z)).mod_floor(&N);
    if s > *N_HALF {
        s = &*N - s;
    }

    Ok(Signature { r, s })
}

/// Verifies the signature `sig` on the message hash `z` against the
/// public key `public_key`.
///
/// ```text
/// u1 = s⁻¹·z mod n
/// u2 = s⁻¹·r mod n
/// P  = u1·G + u2·Q
/// ```
///
/// The signature is valid when `P` is not the identity and
/// `r ≡ x(P) mod n`. Non-canonical (high-S) signatures verify just like
/// canonical ones. Any degenerate input — a zero or order-divisible
/// `s`, a public key off the curve — yields `false` rather than an
/// error.
pub fn verify(z: &BigInt, sig: &Signature, public_key: &AffinePoint) -> bool {
    let s_inv = match invert_scalar(&sig.s) {
        Ok(s_inv) => s_inv,
        Err(_) => return false,
    };
    let u1 = (&s_inv * z).mod_floor(&N);
    let u2 = (s_inv * &sig.r).mod_floor(&N);

    let u1_g = multiply_base_point(&u1);
    let u2_q = match public_key.multiply(&u2, None) {
        Ok(u2_q) => u2_q,
        Err(_) => return false,
    };

    let sum = u1_g.add(&u2_q);
    if sum.is_identity() {
        return false;
    }
    sum.x.mod_floor(&N) == sig.r
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};
    use sha2::{Digest, Sha256};

    fn int(s: &str) -> BigInt {
        BigInt::parse_bytes(s.as_bytes(), 16).unwrap()
    }

    fn sample() -> (BigInt, BigInt, BigInt) {
        let d = int("7fb11b6086c5de757e97b219a74bf18f1fe2b58a2d7046e86ab24cb4c4a17e12");
        let k = int("2daa9b8a3dbbff2a68498a2a392f866b053c2d0ff0b79a33ec3e1ed7e18bd40b");
        let hash = Sha256::digest(b"i love you");
        let z = BigInt::from_bytes_be(num_bigint::Sign::Plus, &hash);
        (d, k, z)
    }

    #[test]
    fn sign_known_answer() {
        let (d, k, z) = sample();
        assert_eq!(
            z,
            int("1c5863cd55b5a4413fd59f054af57ba3c75c0698b3851d70f99b8de2d5c7338f"),
        );
        let sig = sign(&d, &k, &z).unwrap();
        assert_eq!(
            sig.r,
            int("8b4b364ae021cd599507057d1ca108cd276f969e21e57389ff31785386727db7"),
        );
        assert_eq!(
            sig.s,
            int("21b8c9ec78ff698f718630a73070c119a3960a029da81e1bf2ca1da27a3af81a"),
        );
        assert!(sig.is_low_s());
    }

    #[test]
    fn sign_then_verify() {
        let (d, k, z) = sample();
        let sig = sign(&d, &k, &z).unwrap();
        let public_key = multiply_base_point(&d);
        assert!(verify(&z, &sig, &public_key));
    }

    #[test]
    fn verify_accepts_high_s() {
        let (d, k, z) = sample();
        let sig = sign(&d, &k, &z).unwrap();
        let public_key = multiply_base_point(&d);

        let high = Signature {
            r: sig.r.clone(),
            s: &*N - &sig.s,
        };
        assert!(!high.is_low_s());
        assert!(verify(&z, &high, &public_key));
    }

    #[test]
    fn verify_rejects_tampering() {
        let (d, k, z) = sample();
        let sig = sign(&d, &k, &z).unwrap();
        let public_key = multiply_base_point(&d);

        let bad_r = Signature {
            r: &sig.r + 1u32,
            s: sig.s.clone(),
        };
        assert!(!verify(&z, &bad_r, &public_key));

        let bad_s = Signature {
            r: sig.r.clone(),
            s: &sig.s + 1u32,
        };
        assert!(!verify(&z, &bad_s, &public_key));

        // Wrong message, wrong key.
        assert!(!verify(&(&z + 1u32), &sig, &public_key));
        let other_key = multiply_base_point(&int("2"));
        assert!(!verify(&z, &sig, &other_key));
    }

    #[test]
    fn verify_rejects_degenerate_inputs() {
        let (d, _, z) = sample();
        let public_key = multiply_base_point(&d);

        let zero_s = Signature {
            r: int("1"),
            s: BigInt::zero(),
        };
        assert!(!verify(&z, &zero_s, &public_key));

        // u1·G + u2·Q hitting the identity must not validate: with
        // Q = G, s = 1, z = 1 and r = n − 1 the sum is G + (n−1)·G.
        let cancel = Signature {
            r: &*N - 1,
            s: BigInt::one(),
        };
        assert!(!verify(&BigInt::one(), &cancel, &AffinePoint::generator()));

        let off_curve = AffinePoint::new(int("1"), int("1"));
        let sig = Signature {
            r: int("1"),
            s: int("1"),
        };
        assert!(!verify(&z, &sig, &off_curve));
    }

    #[test]
    fn sign_rejects_invalid_scalars() {
        let (d, k, z) = sample();
        assert_eq!(sign(&BigInt::zero(), &k, &z), Err(Error::InvalidScalar));
        assert_eq!(sign(&d, &BigInt::zero(), &z), Err(Error::InvalidScalar));
        assert_eq!(sign(&N, &k, &z), Err(Error::InvalidScalar));
        assert_eq!(sign(&d, &(&*N + 5), &z), Err(Error::InvalidScalar));
        assert_eq!(sign(&BigInt::from(-4), &k, &z), Err(Error::InvalidScalar));
    }

    #[test]
    fn signatures_are_always_low_s() {
        let (d, _, z) = sample();
        // A handful of nonces, including ones that force normalisation.
        for k in 1u32..=24 {
            let sig = sign(&d, &BigInt::from(k), &z).unwrap();
            assert!(sig.is_low_s());
            assert!(verify(&z, &sig, &multiply_base_point(&d)));
        }
    }
}
