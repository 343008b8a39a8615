//! Probabilistic primality testing.

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// Small primes for trial division.
const SMALL_PRIMES: [u32; 54] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Checks if `n` is probably prime.
///
/// Runs trial division by the primes below 256 and then `rounds` Miller-Rabin
/// rounds, so a composite survives with probability at most `4^-rounds`.
///
/// Witnesses come from a ChaCha20 stream keyed by a SHA-256 digest of `n`: the
/// verdict for a given `(n, rounds)` is reproducible and the test never consumes
/// randomness from the caller's stream.
pub fn is_probably_prime(n: &BigUint, rounds: usize) -> bool {
    let two = BigUint::from(2u8);
    if *n < two {
        return false;
    }

    for &p in &SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n - 1 as 2^s * d
    let one = BigUint::one();
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let seed: [u8; 32] = Sha256::digest(n.to_bytes_be()).into();
    let mut rng = ChaCha20Rng::from_seed(seed);
    let upper = n - &one;

    'witness: for _ in 0..rounds {
        // a in [2, n - 2]
        let a = rng.gen_biguint_range(&two, &upper);
        let mut x = a.modpow(&d, n);

        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return false;
            }
        }

        return false;
    }

    true
}
