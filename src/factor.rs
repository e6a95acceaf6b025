//! Factorization by trial division, for the divisor helpers on machine integers.
//!
//! Arbitrary precision factorization is not in the scope of this crate.

use crate::nt_funcs::is_prime64;
use std::collections::BTreeMap;

/// Trial divisors 2, 3, 5, 7, 11, 13, ... skipping multiples of 2 and 3
pub(crate) fn wheel_divisors() -> impl Iterator<Item = u64> {
    let rest = (5u64..).step_by(6).flat_map(|k| IntoIterator::into_iter([k, k + 2]));
    IntoIterator::into_iter([2u64, 3]).chain(rest)
}

/// Complete factorization of a machine integer by trial division.
///
/// The division stops as soon as the residual is known to be prime, so the cost is
/// governed by the second largest prime factor. The factorizations of 0 and 1 are empty.
pub fn factorize_trial(target: u64) -> BTreeMap<u64, usize> {
    let mut result = BTreeMap::new();
    if target < 2 {
        return result;
    }

    let mut residual = target;
    if !is_prime64(residual) {
        for p in wheel_divisors() {
            if p * p > residual {
                break;
            }
            if residual % p != 0 {
                continue;
            }
            while residual % p == 0 {
                residual /= p;
                *result.entry(p).or_insert(0) += 1;
            }
            if is_prime64(residual) {
                break;
            }
        }
    }
    if residual > 1 {
        *result.entry(residual).or_insert(0) += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::random;
    use std::iter::FromIterator;

    #[test]
    fn wheel_test() {
        let first: Vec<u64> = wheel_divisors().take(8).collect();
        assert_eq!(first, [2, 3, 5, 7, 11, 13, 17, 19]);
    }

    #[test]
    fn factorize_trial_test() {
        let fac123456789 = BTreeMap::from_iter([(3, 2), (3803, 1), (3607, 1)]);
        assert_eq!(factorize_trial(123456789), fac123456789);
        assert!(factorize_trial(0).is_empty());
        assert!(factorize_trial(1).is_empty());
        assert_eq!(factorize_trial(97), BTreeMap::from_iter([(97, 1)]));
        assert_eq!(factorize_trial(1 << 20), BTreeMap::from_iter([(2, 20)]));
        assert_eq!(factorize_trial(49), BTreeMap::from_iter([(7, 2)]));

        // large prime cofactor is detected without dividing up to its root
        let p = 18446744073709551557u64;
        assert_eq!(factorize_trial(p), BTreeMap::from_iter([(p, 1)]));
        let q = 4294967291u64; // largest prime below 2^32
        assert_eq!(factorize_trial(6 * q), BTreeMap::from_iter([(2, 1), (3, 1), (q, 1)]));

        for _ in 0..100 {
            let x = random::<u32>() as u64 + 2;
            let fac = factorize_trial(x);
            let mut prod = 1;
            for (p, exp) in fac {
                assert!(
                    is_prime64(p),
                    "factorization result should have prime factors! (get {})",
                    p
                );
                prod *= p.pow(exp as u32);
            }
            assert_eq!(x, prod, "factorization check failed! ({} != {})", x, prod);
        }
    }
}
