//! Integer widths the sweeps run over.

use std::fmt::Debug;
use std::ops::{Add, BitAnd, Rem, Sub};

/// An integer type a modulo sweep can be instantiated with.
pub trait Lane:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Rem<Output = Self>
    + BitAnd<Output = Self>
{
    const TYPE_NAME: &'static str;
    const ZERO: Self;
    const ONE: Self;

    /// Lossless for every value the sweeps use
    fn from_u32(value: u32) -> Self;
}

macro_rules! impl_lane {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Lane for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline(always)]
                fn from_u32(value: u32) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_lane!(i32, u32, i64, u64);
