//! This crate provides deterministic Miller-Rabin primality tests with minimal witness sets,
//! and prime generation with the sieve of Eratosthenes.
//!
//! Candidates can be any unsigned primitive integer, or `BigUint` with the `big-int`
//! feature (enabled by default). Below 2^64 the tests are exact, above it the first 13
//! primes are used as witnesses.
//!
//! # Usage
//! ```
//! use prime_functions::nt_funcs::{generate_primes, is_probable_prime};
//! use prime_functions::WitnessMode;
//!
//! assert!(is_probable_prime(&2147483647u64, WitnessMode::Minimal));
//! assert!(!is_probable_prime(&561u64, false));
//! assert_eq!(generate_primes(20, true), [2, 3, 5, 7, 11, 13, 17, 19]);
//! ```

mod buffer;
mod error;
mod factor;
mod integer;
mod primality;
mod sieve;
mod tables;
mod traits;

pub mod nt_funcs;

pub use buffer::{NaiveBuffer, Primes};
pub use error::PrimeError;
pub use primality::{
    miller_rabin, select_witnesses, PrimalityBase, PrimalityRefBase, PrimalityUtils, Witnesses,
};
pub use traits::{BitTest, ModInt, Primality, PrimalityTestConfig, PrimeBuffer, WitnessMode};

pub mod detail {
    pub use super::tables::{
        DEFAULT_PRIME_PREFIX, MINIMAL_WITNESS_LADDER, PRIME_PREFIX_BOUNDS, SMALL_PRIMES,
    };
}
