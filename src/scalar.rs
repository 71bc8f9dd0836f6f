//! Scalar helpers: validation, generation and inversion modulo the
//! group order `n`.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use rand_core::{CryptoRng, RngCore};

use crate::field::N;
use crate::{Error, Result};

/// Whether `d` is a valid private-key scalar, i.e. in the range
/// `[1, n)`.
pub fn is_valid_scalar(d: &BigInt) -> bool {
    d.sign() == Sign::Plus && *d < *N
}

/// Draws a scalar uniformly from `[1, n)`.
///
/// Use this to generate private keys and ECDSA nonces. 32-byte values
/// are rejection-sampled below `n − 1` (the order is close enough to
/// 2²⁵⁶ that retries are vanishingly rare), then shifted up by one so
/// that zero is never returned.
pub fn random_scalar<T: CryptoRng + RngCore>(rng: &mut T) -> BigInt {
    let limit = &*N - 1u32;
    let mut buf = [0u8; 32];
    loop {
        rng.fill_bytes(&mut buf);
        let r = BigInt::from_bytes_be(Sign::Plus, &buf);
        if r < limit {
            return r + 1u32;
        }
    }
}

/// Computes `d⁻¹ mod n`.
///
/// Fails with [`Error::NonInvertible`] when `gcd(d, n) ≠ 1`; since `n`
/// is prime that only happens for multiples of `n`, zero included.
pub fn invert_scalar(d: &BigInt) -> Result<BigInt> {
    d.mod_floor(&N).modinv(&N).ok_or(Error::NonInvertible)
}
