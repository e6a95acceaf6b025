//! Constant tables used by the witness selector and the small-prime screen

/// All 25 primes below 100, used for the small-prime screen and as the pool
/// of prime-prefix witness sets.
pub const SMALL_PRIMES: [u8; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Number of leading primes used as witnesses when the minimal ladder doesn't apply.
pub const DEFAULT_PRIME_PREFIX: usize = 13;

/// Minimal deterministic witness sets, as pairs of (exclusive bound, bases).
///
/// A candidate `n` uses the bases of the first entry whose bound is strictly
/// greater than `n`. The bases are valid for odd `n` without prime factors below 100,
/// after reducing each base modulo `n` and skipping bases that reduce to zero.
///
/// Reference: <http://miller-rabin.appspot.com/>
pub const MINIMAL_WITNESS_LADDER: [(u128, &[u64]); 8] = [
    (2047, &[2]),
    (341531, &[9345883071009581737]),
    (1050535501, &[336781006125, 9639812373923155]),
    (
        350269456337,
        &[
            4230279247111683200,
            14694767155120705706,
            16641139526367750375,
        ],
    ),
    (
        55245642489451,
        &[
            2,
            141889084524735,
            1199124725622454117,
            11096072698276303650,
        ],
    ),
    (
        7999252175582851,
        &[
            2,
            4130806001517,
            149795463772692060,
            186635894390467037,
            3967304179347715805,
        ],
    ),
    (
        585226005592931977,
        &[
            2,
            123635709730000,
            9233062284813009,
            43835965440333360,
            761179012939631437,
            1263739024124850375,
        ],
    ),
    (
        1u128 << 64,
        &[2, 325, 9375, 28178, 450775, 9780504, 1795265022],
    ),
];

/// The leading primes as `u64` witnesses, so that prefixes can be borrowed statically.
pub const PRIME_WITNESSES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// `PRIME_PREFIX_BOUNDS[k - 1]` is the smallest strong pseudoprime to all of the
/// first `k` prime bases (OEIS A014233). Testing with the first `k` primes is therefore
/// deterministic below this value. Values for k > 13 are unknown, the last entry is
/// used as a lower bound for them.
pub const PRIME_PREFIX_BOUNDS: [u128; 13] = [
    2047,
    1373653,
    25326001,
    3215031751,
    2152302898747,
    3474749660383,
    341550071728321,
    341550071728321,
    3825123056546413051,
    3825123056546413051,
    3825123056546413051,
    318665857834031151167461,
    3317044064679887385961981,
];
