//! Witness selection and the strong probable prime (Miller-Rabin) test

use crate::tables::{
    DEFAULT_PRIME_PREFIX, MINIMAL_WITNESS_LADDER, PRIME_PREFIX_BOUNDS, PRIME_WITNESSES,
};
use crate::traits::{BitTest, ModInt, WitnessMode};
use log::trace;
use num_integer::Integer;
use num_traits::{FromPrimitive, NumRef, RefNum, ToPrimitive};

/// An ordered set of Miller-Rabin bases, together with the bound below which
/// the set is proven to classify every integer correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Witnesses {
    bases: &'static [u64],
    bound: u128,
}

impl Witnesses {
    /// The first `count` primes, with `count` clamped into `1..=25`
    pub fn prime_prefix(count: usize) -> Self {
        let count = count.clamp(1, PRIME_WITNESSES.len());
        let bound = PRIME_PREFIX_BOUNDS[count.min(PRIME_PREFIX_BOUNDS.len()) - 1];
        Witnesses {
            bases: &PRIME_WITNESSES[..count],
            bound,
        }
    }

    /// The bases in testing order
    #[inline]
    pub fn bases(&self) -> &'static [u64] {
        self.bases
    }

    /// Exclusive upper bound of the range where these bases give a proof
    #[inline]
    pub fn deterministic_bound(&self) -> u128 {
        self.bound
    }

    /// Whether passing all of the bases proves `target` prime
    pub fn is_deterministic_for<T: ToPrimitive>(&self, target: &T) -> bool {
        target.to_u128().map_or(false, |n| n < self.bound)
    }
}

/// Select the witnesses used to test `target`.
///
/// With [WitnessMode::Minimal] the bases come from the first entry of
/// [MINIMAL_WITNESS_LADDER] whose bound exceeds the target; targets not below 2^64 get
/// the first 13 primes. With [WitnessMode::PrimePrefix] the result doesn't depend on the
/// target at all.
pub fn select_witnesses<T: ToPrimitive, M: Into<WitnessMode>>(target: &T, mode: M) -> Witnesses {
    match mode.into() {
        WitnessMode::Minimal => target
            .to_u128()
            .and_then(|n| MINIMAL_WITNESS_LADDER.iter().find(|(bound, _)| n < *bound))
            .map(|&(bound, bases)| Witnesses { bases, bound })
            .unwrap_or_else(|| Witnesses::prime_prefix(DEFAULT_PRIME_PREFIX)),
        WitnessMode::PrimePrefix(count) => Witnesses::prime_prefix(count),
    }
}

/// The decomposition `n - 1 = 2^shift * odd` of an odd candidate, shared by all bases
struct StrongTest<'a, T> {
    target: &'a T,
    tm1: T,
    shift: usize,
    odd: T,
}

impl<'a, T: PrimalityBase> StrongTest<'a, T>
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    fn new(target: &'a T) -> Self {
        let tm1 = target - T::one();
        let shift = tm1.trailing_zeros();
        let odd = &tm1 >> shift;
        StrongTest {
            target,
            tm1,
            shift,
            odd,
        }
    }

    /// Reduce a base modulo the target, returns None if it vanishes
    fn reduce(&self, base: u64) -> Option<T> {
        let base = match self.target.to_u64() {
            Some(n) => T::from_u64(base % n),
            None => T::from_u64(base),
        }?;
        if base.is_zero() {
            None
        } else {
            Some(base)
        }
    }

    fn passes(&self, base: &T) -> bool {
        let mut x = base.powm(&self.odd, self.target);
        if x.is_one() || x == self.tm1 {
            return true;
        }

        for _ in 1..self.shift {
            x = (&x).mulm(&x, self.target);
            if x == self.tm1 {
                return true;
            }
            if x.is_one() {
                // 1 is a fixed point of squaring, -1 can't be reached any more
                return false;
            }
        }
        false
    }
}

/// Run the Miller-Rabin test on `target` with the given bases.
///
/// Returns false as soon as one base proves the target composite. Bases that are
/// multiples of the target are skipped. Targets below 2 are not prime, 2 and 3 are,
/// and other even targets are not.
pub fn miller_rabin<T: PrimalityBase>(target: &T, bases: &[u64]) -> bool
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    let two = T::one() + T::one();
    if target < &two {
        return false;
    }
    if target == &two || target == &(&two + T::one()) {
        return true;
    }
    if target.is_even() {
        return false;
    }

    let test = StrongTest::new(target);
    for &a in bases {
        let base = match test.reduce(a) {
            Some(b) => b,
            None => continue,
        };
        if !test.passes(&base) {
            trace!("base {} proves the candidate composite", a);
            return false;
        }
    }
    true
}

/// Primality related utilities on a single integer
pub trait PrimalityUtils {
    /// Test if the integer is a (Fermat) probable prime to the given base
    fn is_prp(&self, base: Self) -> bool;

    /// Test if the integer is a strong probable prime to the given base (one round of
    /// the Miller-Rabin test). The integer must be odd and larger than 2.
    fn is_sprp(&self, base: Self) -> bool;
}

impl<T: PrimalityBase> PrimalityUtils for T
where
    for<'r> &'r T: PrimalityRefBase<T>,
{
    fn is_prp(&self, base: Self) -> bool {
        let tm1 = self - T::one();
        (&base).powm(&tm1, self).is_one()
    }

    fn is_sprp(&self, base: Self) -> bool {
        let base = base % self;
        if base.is_zero() {
            return true;
        }
        StrongTest::new(self).passes(&base)
    }
}

pub trait PrimalityBase: Integer + NumRef + Clone + FromPrimitive + ToPrimitive + BitTest {}
impl<T: Integer + NumRef + Clone + FromPrimitive + ToPrimitive + BitTest> PrimalityBase for T {}

pub trait PrimalityRefBase<Base>:
    RefNum<Base> + std::ops::Shr<usize, Output = Base> + for<'r> ModInt<&'r Base, &'r Base, Output = Base>
{
}
impl<T, Base> PrimalityRefBase<Base> for T where
    T: RefNum<Base>
        + std::ops::Shr<usize, Output = Base>
        + for<'r> ModInt<&'r Base, &'r Base, Output = Base>
{
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "num-bigint")]
    use num_bigint::BigUint;
    use rand::random;

    fn is_prime_trial(n: u64) -> bool {
        n > 1 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn select_minimal_test() {
        assert_eq!(select_witnesses(&2u64, true).bases(), &[2]);
        assert_eq!(select_witnesses(&2046u64, true).bases(), &[2]);
        assert_eq!(
            select_witnesses(&2047u64, true).bases(),
            &[9345883071009581737]
        );
        assert_eq!(
            select_witnesses(&1_000_000u32, WitnessMode::Minimal).bases(),
            &[336781006125, 9639812373923155]
        );
        assert_eq!(select_witnesses(&u64::MAX, true).bases().len(), 7);
        assert_eq!(
            select_witnesses(&u64::MAX, true).deterministic_bound(),
            1u128 << 64
        );

        // the ladder is a step function of the target
        let mut last = 0;
        for &(bound, _) in MINIMAL_WITNESS_LADDER.iter() {
            let below = select_witnesses(&(bound - 1), true);
            assert_eq!(below.deterministic_bound(), bound);
            assert!(bound > last);
            last = bound;
        }

        // above 2^64 the minimal mode degrades to the prime prefix
        let big = (1u128 << 64) + 13;
        assert_eq!(select_witnesses(&big, true), select_witnesses(&big, false));
        assert_eq!(
            select_witnesses(&big, true).bases(),
            &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41]
        );
    }

    #[test]
    fn select_prime_prefix_test() {
        for n in [5u64, 2047, 1 << 40, u64::MAX] {
            let w = select_witnesses(&n, false);
            assert_eq!(w.bases().len(), 13);
            assert_eq!(w.deterministic_bound(), 3317044064679887385961981);
        }
        let w = select_witnesses(&5u8, WitnessMode::PrimePrefix(1));
        assert_eq!(w.bases(), &[2]);
        assert_eq!(w.deterministic_bound(), 2047);

        // out of range prefixes are clamped
        assert_eq!(Witnesses::prime_prefix(0).bases(), &[2]);
        assert_eq!(Witnesses::prime_prefix(100).bases().len(), 25);
        assert_eq!(
            Witnesses::prime_prefix(20).deterministic_bound(),
            3317044064679887385961981
        );

        assert!(w.is_deterministic_for(&2046u16));
        assert!(!w.is_deterministic_for(&2047u16));
    }

    #[test]
    fn fermat_prp_test() {
        // 341 is the smallest pseudoprime for base 2
        assert!(341u16.is_prp(2));
        assert!(!340u16.is_prp(2));
        assert!(!105u16.is_prp(2));

        // Carmichael number 561 = 3*11*17 is fermat pseudoprime for any base coprime to 561
        for p in [2, 5, 7, 13, 19] {
            assert!(561u32.is_prp(p));
        }
    }

    #[test]
    fn sprp_test() {
        // strong pseudoprimes of base 2 (OEIS A001262) under 10000
        let spsp: [u16; 5] = [2047, 3277, 4033, 4681, 8321];
        for psp in spsp {
            assert!(psp.is_sprp(2));
            assert!(!psp.is_sprp(3));
        }

        // the strong test is not fooled by Carmichael numbers
        assert!(!561u32.is_sprp(2));
        assert!(97u8.is_sprp(194));
    }

    #[test]
    fn miller_rabin_small_test() {
        let first = PRIME_WITNESSES;
        assert!(!miller_rabin(&0u32, &first));
        assert!(!miller_rabin(&1u32, &first));
        assert!(miller_rabin(&2u32, &first));
        assert!(miller_rabin(&3u32, &first));
        assert!(!miller_rabin(&4u32, &first));

        // bases equal to or larger than the candidate are reduced or skipped
        for n in 2u64..200 {
            assert_eq!(miller_rabin(&n, &first), is_prime_trial(n), "n = {}", n);
            assert_eq!(miller_rabin(&(n as u8), &[2, 3]), is_prime_trial(n), "n = {}", n);
        }
    }

    #[test]
    fn miller_rabin_known_values_test() {
        // strong pseudoprime to the first 11 prime bases
        let n = 3825123056546413051u64;
        assert!(miller_rabin(&n, &PRIME_WITNESSES[..11]));
        assert!(!miller_rabin(&n, &PRIME_WITNESSES[..12]));
        assert!(!miller_rabin(&n, select_witnesses(&n, true).bases()));

        // strong pseudoprime to the first 12 prime bases, beyond 2^64
        let n = 318665857834031151167461u128;
        assert!(miller_rabin(&n, &PRIME_WITNESSES[..12]));
        assert!(!miller_rabin(&n, select_witnesses(&n, true).bases()));

        assert!(miller_rabin(&2147483647u32, select_witnesses(&2147483647u32, true).bases()));
        assert!(miller_rabin(&18446744073709551557u64, &PRIME_WITNESSES[..13]));
        assert!(miller_rabin(&((1u128 << 127) - 1), &PRIME_WITNESSES[..13]));
    }

    #[test]
    fn miller_rabin_random_test() {
        let screened = |n: u64| {
            crate::tables::SMALL_PRIMES
                .iter()
                .all(|&p| n == p as u64 || n % p as u64 != 0)
        };
        for _ in 0..200 {
            let n = random::<u32>() as u64 | 1;
            // the minimal ladder relies on the small-prime screen done by the callers
            if !screened(n) {
                continue;
            }
            let expected = is_prime_trial(n);
            for mode in [WitnessMode::Minimal, WitnessMode::classic()] {
                let w = select_witnesses(&n, mode);
                assert_eq!(miller_rabin(&n, w.bases()), expected, "n = {}", n);
            }
        }
    }

    #[cfg(feature = "num-bigint")]
    #[test]
    fn miller_rabin_biguint_test() {
        let m89 = (BigUint::from(1u8) << 89u32) - 1u8;
        assert!(miller_rabin(&m89, select_witnesses(&m89, true).bases()));
        let m91 = (BigUint::from(1u8) << 91u32) - 1u8; // divisible by 2^7-1
        assert!(!miller_rabin(&m91, select_witnesses(&m91, true).bases()));

        // big integers below 2^64 use the minimal ladder
        let p = BigUint::from(2147483647u32);
        assert_eq!(
            select_witnesses(&p, true),
            select_witnesses(&2147483647u64, true)
        );
        assert!(miller_rabin(&p, select_witnesses(&p, true).bases()));
    }
}
