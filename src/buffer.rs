//! Implementations of the prime cache and the unbounded prime stream

use crate::nt_funcs::is_prime64;
use crate::sieve::sieve_segment;
use crate::tables::SMALL_PRIMES;
use crate::traits::PrimeBuffer;
use log::debug;
use num_integer::Roots;

/// Number of integers covered by a single sieving segment
const SEGMENT_SIZE: u64 = 1 << 18;

/// NaiveBuffer implements a list of primes, extended by sieving consecutive segments
/// above the cached range.
///
/// The buffer is owned by the caller, nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct NaiveBuffer {
    list: Vec<u64>, // list of found prime numbers
    next: u64,      // all primes smaller than this value are in the list, always odd
}

impl NaiveBuffer {
    #[inline]
    pub fn new() -> Self {
        let list = SMALL_PRIMES.iter().map(|&p| p as u64).collect();
        NaiveBuffer { list, next: 101 }
    }

    /// Returns all primes **below** limit. The primes are sorted.
    pub fn primes(&mut self, limit: u64) -> std::iter::Take<std::slice::Iter<'_, u64>> {
        self.reserve(limit);
        let position = match self.list.binary_search(&limit) {
            Ok(p) => p,
            Err(p) => p,
        };
        self.list.iter().take(position)
    }

    /// Returns primes of certain amount counting from 2. The primes are sorted.
    pub fn nprimes(&mut self, count: usize) -> std::iter::Take<std::slice::Iter<'_, u64>> {
        // p_n < n (ln n + ln ln n) for n >= 6 (Rosser's theorem)
        let n = count.max(6) as f64;
        let mut limit = (n * (n.ln() + n.ln().ln())) as u64 + 1;
        while self.list.len() < count {
            self.reserve(limit);
            limit = limit.saturating_mul(2);
        }
        self.list.iter().take(count)
    }

    /// Test if `target` is a prime, by looking up the cache when it's in the cached
    /// range and by the deterministic Miller-Rabin test otherwise.
    pub fn is_prime(&self, target: u64) -> bool {
        if target < self.next {
            self.contains(target)
        } else {
            is_prime64(target)
        }
    }

    /// Number of cached primes
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Default for NaiveBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PrimeBuffer<'a> for NaiveBuffer {
    type PrimeIter = std::slice::Iter<'a, u64>;

    fn iter(&'a self) -> Self::PrimeIter {
        self.list.iter()
    }

    fn reserve(&mut self, limit: u64) {
        let odd_limit = limit | 1; // primes below limit are the primes below odd_limit
        if odd_limit <= self.next {
            return;
        }

        // make sure the sieving primes are available first
        let root = Roots::sqrt(&odd_limit) + 1;
        if root > self.next {
            self.reserve(root);
        }

        debug!("extending prime buffer from {} to {}", self.next, odd_limit);
        while self.next < odd_limit {
            let high = odd_limit.min(self.next.saturating_add(SEGMENT_SIZE));
            let found = sieve_segment(&self.list, self.next, high);
            self.list.extend(found);
            self.next = high;
        }
    }

    fn bound(&self) -> u64 {
        self.next
    }

    fn contains(&self, num: u64) -> bool {
        self.list.binary_search(&num).is_ok()
    }

    fn clear(&mut self) {
        self.list.truncate(SMALL_PRIMES.len());
        self.list.shrink_to_fit();
        self.next = 101;
    }
}

/// An endless ascending stream of primes. The backing cache grows by doubling
/// its bound whenever the cached primes are exhausted.
#[derive(Debug, Clone, Default)]
pub struct Primes {
    buffer: NaiveBuffer,
    position: usize,
}

impl Primes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Primes {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        while self.position >= self.buffer.len() {
            let limit = self.buffer.bound().checked_mul(2)?;
            self.buffer.reserve(limit);
        }
        let p = self.buffer.list[self.position];
        self.position += 1;
        Some(p)
    }
}
