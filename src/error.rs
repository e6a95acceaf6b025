use thiserror::Error;

/// Errors raised by the helpers that reject part of their input domain.
///
/// The primality tests and the sieve never fail, inputs outside their domain
/// are answered with "not prime" or an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimeError {
    /// Divisor functions are undefined on zero, since every integer divides it
    #[error("divisors of zero are not defined")]
    ZeroDivisors,

    /// A prime-prefix witness set must use between 1 and 25 of the primes below 100
    #[error("witness count must be within 1..={max}, got {count}")]
    WitnessCount { count: usize, max: usize },
}
