use crate::error::PrimeError;
use crate::tables::{DEFAULT_PRIME_PREFIX, SMALL_PRIMES};

/// This trait describes the modular arithmetic needed by the Miller-Rabin test.
/// Implementations must never overflow on intermediate products.
pub trait ModInt<Rhs = Self, Modulus = Self> {
    type Output;

    /// Return (self * rhs) % m
    fn mulm(self, rhs: Rhs, m: Modulus) -> Self::Output;

    /// Return (self ^ exp) % m
    fn powm(self, exp: Rhs, m: Modulus) -> Self::Output;
}

/// Bit level queries on an integer
pub trait BitTest {
    /// Exponent of the factor 2 in the number, zero is reported as zero
    fn trailing_zeros(&self) -> usize;
}

/// Choice of the witness set used by the Miller-Rabin test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WitnessMode {
    /// Smallest known deterministic base set for the magnitude of the candidate.
    /// Falls back to the default prime prefix for candidates not below 2^64.
    Minimal,

    /// The first `k` primes, regardless of the candidate. `k` is clamped into `1..=25`.
    PrimePrefix(usize),
}

impl WitnessMode {
    /// The classic witness set of the first 13 primes
    pub const fn classic() -> Self {
        WitnessMode::PrimePrefix(DEFAULT_PRIME_PREFIX)
    }

    /// Create a prime prefix mode, checking that enough small primes are available
    pub fn prime_prefix(count: usize) -> Result<Self, PrimeError> {
        if count == 0 || count > SMALL_PRIMES.len() {
            return Err(PrimeError::WitnessCount {
                count,
                max: SMALL_PRIMES.len(),
            });
        }
        Ok(WitnessMode::PrimePrefix(count))
    }
}

impl Default for WitnessMode {
    fn default() -> Self {
        WitnessMode::Minimal
    }
}

impl From<bool> for WitnessMode {
    /// `true` selects the minimal ladder, `false` the classic prime prefix
    fn from(minimal: bool) -> Self {
        if minimal {
            WitnessMode::Minimal
        } else {
            WitnessMode::classic()
        }
    }
}

/// Outcome of a primality test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primality {
    /// The number is proven prime
    Yes,
    /// The number is proven composite (or is below 2)
    No,
    /// The number passed all witnesses, carrying a lower bound of the probability of
    /// being a prime
    Probable(f32),
}

impl Primality {
    /// Check whether the result indicates that the number is (very) probably a prime
    #[inline]
    pub fn probably(self) -> bool {
        match self {
            Primality::No => false,
            _ => true,
        }
    }
}

/// Represents a configuration for a primality test
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct PrimalityTestConfig {
    /// Witness set used by the Miller-Rabin rounds
    pub witnesses: WitnessMode,

    /// Screen the candidate with the primes below 100 before the Miller-Rabin rounds.
    /// The screen is always applied with minimal witnesses, whose large bases may
    /// reduce to zero modulo small composites.
    pub trial_division: bool,
}

impl Default for PrimalityTestConfig {
    /// Minimal deterministic witnesses behind the small-prime screen
    fn default() -> Self {
        Self {
            witnesses: WitnessMode::Minimal,
            trial_division: true,
        }
    }
}

impl PrimalityTestConfig {
    /// Test with the classic set of the first 13 primes
    pub fn classic() -> Self {
        Self {
            witnesses: WitnessMode::classic(),
            ..Self::default()
        }
    }

    /// Test with the first `count` primes as witnesses
    pub fn prime_prefix(count: usize) -> Result<Self, PrimeError> {
        Ok(Self {
            witnesses: WitnessMode::prime_prefix(count)?,
            ..Self::default()
        })
    }
}

/// This trait represents a cache of the consecutive primes starting from 2
pub trait PrimeBuffer<'a> {
    type PrimeIter: Iterator<Item = &'a u64>;

    /// Iterate over the cached primes in ascending order
    fn iter(&'a self) -> Self::PrimeIter;

    /// Make sure every prime below `limit` is cached
    fn reserve(&mut self, limit: u64);

    /// Exclusive bound of the cached range, all primes below it are in the cache
    fn bound(&self) -> u64;

    /// Whether `num` is one of the cached primes
    fn contains(&self, num: u64) -> bool;

    /// Drop the cached primes beyond the initial seed
    fn clear(&mut self);
}
