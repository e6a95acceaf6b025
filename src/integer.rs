//! Backend implementations for integers

use crate::traits::{BitTest, ModInt};
use num_modular::{ModularCoreOps, ModularPow};

#[cfg(feature = "num-bigint")]
use num_bigint::BigUint;

macro_rules! impl_prim {
    ($($T:ty)*) => {$(
        impl BitTest for $T {
            #[inline]
            fn trailing_zeros(&self) -> usize {
                if *self == 0 {
                    0
                } else {
                    <$T>::trailing_zeros(*self) as usize
                }
            }
        }

        // num-modular widens the products internally (u128 uses a double word),
        // so no intermediate value can overflow
        impl ModInt<&$T, &$T> for &$T {
            type Output = $T;

            #[inline]
            fn mulm(self, rhs: &$T, m: &$T) -> $T {
                <$T as ModularCoreOps<$T, &$T>>::mulm(*self, *rhs, m)
            }

            #[inline]
            fn powm(self, exp: &$T, m: &$T) -> $T {
                <$T as ModularPow<$T, &$T>>::powm(*self, *exp, m)
            }
        }
    )*}
}
impl_prim!(u8 u16 u32 u64 u128 usize);

#[cfg(feature = "num-bigint")]
impl BitTest for BigUint {
    #[inline]
    fn trailing_zeros(&self) -> usize {
        BigUint::trailing_zeros(self).map_or(0, |z| z as usize)
    }
}

#[cfg(feature = "num-bigint")]
impl ModInt<&BigUint, &BigUint> for &BigUint {
    type Output = BigUint;

    #[inline]
    fn mulm(self, rhs: &BigUint, m: &BigUint) -> BigUint {
        (self * rhs) % m
    }

    #[inline]
    fn powm(self, exp: &BigUint, m: &BigUint) -> BigUint {
        self.modpow(exp, m)
    }
}
