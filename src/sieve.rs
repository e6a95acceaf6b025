//! Sieve of Eratosthenes over the half-open range `[2, limit)`

use bitvec::prelude::*;
use log::debug;
use num_integer::Roots;

/// Generate all primes below `limit` in ascending order.
///
/// `use_vectorized` selects the odd-only bit buffer with bulk strided marking,
/// otherwise a plain boolean buffer is marked element by element. Both produce
/// identical output.
pub fn generate_primes(limit: u64, use_vectorized: bool) -> Vec<u64> {
    if limit <= 2 {
        return Vec::new();
    }
    debug!(
        "sieving primes below {} with the {} strategy",
        limit,
        if use_vectorized { "vectorized" } else { "scalar" }
    );
    if use_vectorized {
        sieve_vectorized(limit)
    } else {
        sieve_scalar(limit)
    }
}

/// One flag per integer, marked with an explicit scan for each prime
fn sieve_scalar(limit: u64) -> Vec<u64> {
    let len = limit as usize;
    let mut composite = vec![false; len];

    let mut i = 2;
    while i * i < len {
        if !composite[i] {
            // smaller multiples are already marked by smaller primes
            let mut multiple = i * i;
            while multiple < len {
                composite[multiple] = true;
                multiple += i;
            }
        }
        i += 1;
    }

    composite
        .iter()
        .enumerate()
        .skip(2)
        .filter(|(_, c)| !**c)
        .map(|(n, _)| n as u64)
        .collect()
}

/// One bit per odd integer, bit `k` stands for `2k + 1`. Multiples of each odd prime
/// `p` are marked through a strided view of the bit slice starting at `p*p`.
fn sieve_vectorized(limit: u64) -> Vec<u64> {
    let len = (limit / 2) as usize;
    let mut composite = bitvec![0; len];

    let bound = Roots::sqrt(&(limit - 1)) as usize;
    for p in (3..=bound).step_by(2) {
        if composite[p / 2] {
            continue;
        }
        // odd multiples p*p, p*p + 2p, ... are p bits apart
        composite[p * p / 2..]
            .iter_mut()
            .step_by(p)
            .for_each(|mut bit| *bit = true);
    }

    // bit 0 stands for 1, which is replaced by 2
    let mut primes = Vec::with_capacity(estimate_prime_pi(limit));
    primes.push(2);
    primes.extend(composite.iter_zeros().skip(1).map(|k| 2 * k as u64 + 1));
    primes
}

/// Upper estimate of the number of primes below `limit`, used to size outputs
pub(crate) fn estimate_prime_pi(limit: u64) -> usize {
    if limit < 64 {
        return 18;
    }
    // pi(x) < 1.25506 x / ln x for x > 1 (Rosser & Schoenfeld)
    let x = limit as f64;
    (1.25506 * x / x.ln()) as usize + 1
}

/// Mark the multiples of the odd sieving primes in the odd numbers of `[low, high)`
/// and return the primes found there. `low` must be odd, and `primes` has to cover
/// every odd prime up to the square root of `high`.
pub(crate) fn sieve_segment(primes: &[u64], low: u64, high: u64) -> Vec<u64> {
    debug_assert!(low % 2 == 1);
    if high <= low {
        return Vec::new();
    }
    let mut composite = bitvec![0; ((high - low + 1) / 2) as usize];

    for &p in primes.iter().skip_while(|&&p| p == 2) {
        if p * p >= high {
            break;
        }
        let start = if p * p < low {
            p * ((low + p - 1) / p | 1) // first odd multiple not below low
        } else {
            p * p
        };
        if start >= high {
            continue;
        }
        composite[((start - low) / 2) as usize..]
            .iter_mut()
            .step_by(p as usize)
            .for_each(|mut bit| *bit = true);
    }

    composite
        .iter_zeros()
        .map(|k| low + 2 * k as u64)
        .filter(|&n| n != 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIME50: [u64; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

    fn primes_trial(limit: u64) -> Vec<u64> {
        (2..limit)
            .filter(|&n| (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0))
            .collect()
    }

    #[test]
    fn boundary_test() {
        for vectorized in [true, false] {
            assert!(generate_primes(0, vectorized).is_empty());
            assert!(generate_primes(1, vectorized).is_empty());
            assert!(generate_primes(2, vectorized).is_empty());
            assert_eq!(generate_primes(3, vectorized), [2]);
            assert_eq!(generate_primes(4, vectorized), [2, 3]);
            assert_eq!(generate_primes(5, vectorized), [2, 3]);
            assert_eq!(generate_primes(50, vectorized), PRIME50);
            assert_eq!(generate_primes(48, vectorized), PRIME50[..14]);
        }
    }

    #[test]
    fn trial_division_agreement_test() {
        let reference = primes_trial(3000);
        for limit in 0..3000u64 {
            let expected: Vec<u64> = reference.iter().cloned().take_while(|&p| p < limit).collect();
            assert_eq!(generate_primes(limit, true), expected, "limit = {}", limit);
            assert_eq!(generate_primes(limit, false), expected, "limit = {}", limit);
        }
        assert_eq!(generate_primes(10000, true), primes_trial(10000));
    }

    #[test]
    fn large_limit_test() {
        let vectorized = generate_primes(1_000_000, true);
        let scalar = generate_primes(1_000_000, false);
        assert_eq!(vectorized.len(), 78498);
        assert_eq!(vectorized, scalar);
        assert_eq!(vectorized.last(), Some(&999983));

        // limits just past the last prime below 10^6 and at the next one
        assert_eq!(generate_primes(1_000_002, true), vectorized);
        assert_eq!(generate_primes(1_000_004, true).last(), Some(&1_000_003));
        assert!(estimate_prime_pi(1_000_000) >= 78498);
    }

    #[test]
    fn idempotence_test() {
        for vectorized in [true, false] {
            assert_eq!(
                generate_primes(12345, vectorized),
                generate_primes(12345, vectorized)
            );
        }
    }

    #[test]
    fn segment_test() {
        let base = generate_primes(100, true);
        let full = generate_primes(10000, true);
        let expected: Vec<u64> = full.iter().cloned().filter(|&p| p >= 101).collect();
        assert_eq!(sieve_segment(&base, 101, 10000), expected);

        let expected: Vec<u64> = full.iter().cloned().filter(|&p| p > 2 && p < 999).collect();
        assert_eq!(sieve_segment(&base, 1, 999), expected);
        assert!(sieve_segment(&base, 9001, 9001).is_empty());
    }
}
