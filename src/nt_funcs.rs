//! Standalone number theoretic functions that can be used without a prime cache

use crate::buffer::Primes;
use crate::error::PrimeError;
use crate::factor::factorize_trial;
use crate::primality::{miller_rabin, PrimalityBase, PrimalityRefBase};
use crate::tables::SMALL_PRIMES;
use crate::traits::{Primality, PrimalityTestConfig, WitnessMode};
use std::collections::BTreeMap;

pub use crate::primality::select_witnesses;
pub use crate::sieve::generate_primes;

/// Compare the target against the primes below 100 and divide by them.
/// Returns None if the target is larger than them and has none of them as a factor.
fn small_prime_screen<T: PrimalityBase>(target: &T) -> Option<Primality> {
    for &p in SMALL_PRIMES.iter() {
        let pt = T::from_u8(p)?;
        if target == &pt {
            return Some(Primality::Yes);
        }
        if target.is_multiple_of(&pt) {
            return Some(Primality::No);
        }
    }

    // without a factor below 101, anything below 101^2 is prime
    match target.to_u64() {
        Some(n) if n < 101 * 101 => Some(Primality::Yes),
        _ => None,
    }
}

/// Test if the target is a prime.
///
/// Integers below 2 are never prime. The result is [Primality::Yes] or [Primality::No] when
/// the selected witness set is proven for the target (always the case for targets below
/// 2^64 with the default config). Otherwise a target passing every witness is reported as
/// [Primality::Probable].
pub fn is_prime<T: PrimalityBase>(target: &T, config: Option<PrimalityTestConfig>) -> Primality
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    let config = config.unwrap_or_default();
    if target < &(T::one() + T::one()) {
        return Primality::No;
    }

    // the large minimal bases can vanish modulo small composites, so the screen is mandatory
    if config.trial_division || config.witnesses == WitnessMode::Minimal {
        if let Some(result) = small_prime_screen(target) {
            return result;
        }
    }

    let witnesses = select_witnesses(target, config.witnesses);
    if !miller_rabin(target, witnesses.bases()) {
        return Primality::No;
    }
    if witnesses.is_deterministic_for(target) {
        Primality::Yes
    } else {
        Primality::Probable(1. - 0.25f32.powi(witnesses.bases().len() as i32))
    }
}

/// Test if the target is a (probable) prime with the chosen witness set.
///
/// `mode` is usually a [WitnessMode], `true` means [WitnessMode::Minimal] and `false` means
/// the first 13 primes. Both give exact answers below 2^64.
pub fn is_probable_prime<T: PrimalityBase, M: Into<WitnessMode>>(target: &T, mode: M) -> bool
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    let config = PrimalityTestConfig {
        witnesses: mode.into(),
        ..PrimalityTestConfig::default()
    };
    is_prime(target, Some(config)).probably()
}

/// This function does a fast deterministic primality test on a u64 integer, using the
/// minimal witness sets.
pub fn is_prime64(target: u64) -> bool {
    is_probable_prime(&target, WitnessMode::Minimal)
}

/// Primality test by trial division with the divisors of form 6k±1.
/// Only practical on small integers, mostly useful as a reference.
pub fn is_prime_trial(target: u64) -> bool {
    if target < 4 {
        return target >= 2;
    }
    if target % 2 == 0 || target % 3 == 0 {
        return false;
    }
    let (mut a, mut b) = (5u64, 2u64);
    while a.saturating_mul(a) <= target {
        if target % a == 0 {
            return false;
        }
        a += b;
        b = 6 - b;
    }
    true
}

/// Count the primes below `limit`
pub fn prime_pi(limit: u64) -> usize {
    generate_primes(limit, true).len()
}

/// Iterate over all primes in ascending order, without an upper bound
pub fn primes_iter() -> Primes {
    Primes::new()
}

/// Prime factors of the target with their multiplicities, found by trial division.
/// 0 and 1 have no prime factors.
pub fn prime_factors(target: u64) -> BTreeMap<u64, usize> {
    factorize_trial(target)
}

/// Number of divisors of the target, including 1 and the target itself
pub fn num_divisors(target: u64) -> Result<u64, PrimeError> {
    if target == 0 {
        return Err(PrimeError::ZeroDivisors);
    }
    Ok(factorize_trial(target)
        .values()
        .map(|&e| e as u64 + 1)
        .product())
}

/// Divisors of the target that are smaller than it, in ascending order.
/// 1 has no proper divisors.
pub fn proper_divisors(target: u64) -> Result<Vec<u64>, PrimeError> {
    if target == 0 {
        return Err(PrimeError::ZeroDivisors);
    }

    let factors = factorize_trial(target);
    let mut result = Vec::with_capacity(factors.values().map(|e| e + 1).product());
    result.push(1);
    for (p, e) in factors {
        // the new divisors are all previous divisors multiplied by p, p^2, .., p^e
        let mut new_result = Vec::with_capacity(result.len() * e);
        for i in 1..=(e as u32) {
            new_result.extend(result.iter().map(|f| f * p.pow(i)));
        }
        result.append(&mut new_result);
    }

    result.sort_unstable();
    result.pop(); // the target itself
    Ok(result)
}
