//! Modulo kernels and the sweeps timed over them.
//!
//! Every sweep runs `m` over `[1, MAX_MODULO)` and `i` over `[0, MAX_LOOP)`
//! and feeds `i + 1` to a kernel. The bounds go through `black_box` so the
//! loops cannot be folded, and so does every kernel result.

mod lane;

pub use lane::Lane;

use std::hint::black_box;

use crate::harness::LayoutTrial;
use crate::utils::VariantInfo;

pub const MAX_MODULO: u32 = 32;
pub const MAX_LOOP: u32 = 100;
/// Compile-time modulus of the `modulo_const` sweep
pub const CONST_MODULUS: u32 = 0x10;
/// `CONST_MODULUS - 1`; only equivalent to `% CONST_MODULUS` because it is a
/// power of two
pub const MASK: u32 = 0x0F;

/// Kernel evaluations in one sweep
pub const SWEEP_STEPS: usize = ((MAX_MODULO - 1) * MAX_LOOP) as usize;

/// `value % modulus`
#[inline]
pub fn modulo<T: Lane>(value: T, modulus: T) -> T {
    value % modulus
}

/// One conditional subtraction. Equals `value % modulus` only while
/// `value < 2 * modulus`.
#[inline]
pub fn add_if<T: Lane>(value: T, modulus: T) -> T {
    if value >= modulus {
        value - modulus
    } else {
        value
    }
}

/// Subtract until below `modulus`. Equals `value % modulus` for any
/// non-negative `value` and positive `modulus`.
#[inline]
pub fn add_while<T: Lane>(mut value: T, modulus: T) -> T {
    while value >= modulus {
        value = value - modulus;
    }
    value
}

#[inline(always)]
fn sweep<T: Lane, F: Fn(T, T) -> T>(kernel: F) {
    let max_modulo = black_box(T::from_u32(MAX_MODULO));
    let max_loop = black_box(T::from_u32(MAX_LOOP));

    let mut m = T::ONE;
    while m < max_modulo {
        let mut i = T::ZERO;
        while i < max_loop {
            black_box(kernel(i + T::ONE, m));
            i = i + T::ONE;
        }
        m = m + T::ONE;
    }
}

/// `(i + 1) % m` with `m` known only at run time
pub fn sweep_modulo<T: Lane>() {
    sweep(|value: T, m| modulo(value, m));
}

/// `(i + 1) % 16`
pub fn sweep_modulo_const<T: Lane>() {
    sweep(|value: T, _| modulo(value, T::from_u32(CONST_MODULUS)));
}

/// `(i + 1) & 0xF`
pub fn sweep_bitmask<T: Lane>() {
    sweep(|value: T, _| value & T::from_u32(MASK));
}

/// `i + 1`, minus `MAX_MODULO` once if it reaches it
pub fn sweep_add_if<T: Lane>() {
    let bound = black_box(T::from_u32(MAX_MODULO));
    sweep(|value: T, _| add_if(value, bound));
}

/// `i + 1`, minus `MAX_MODULO` while it reaches it
pub fn sweep_add_while<T: Lane>() {
    let bound = black_box(T::from_u32(MAX_MODULO));
    sweep(|value: T, _| add_while(value, bound));
}

pub type SweepFn = fn();

/// One sweep as a timed trial. Has no dataset; the work is fixed.
pub struct SweepTrial {
    sweep: SweepFn,
}

impl SweepTrial {
    pub fn new(sweep: SweepFn) -> Self {
        Self { sweep }
    }
}

impl LayoutTrial for SweepTrial {
    fn elements(&self) -> usize {
        SWEEP_STEPS
    }

    fn run(&mut self) {
        (self.sweep)()
    }
}

macro_rules! lane_variants {
    ($($ty:ty),* $(,)?) => {
        vec![
            $(
                VariantInfo {
                    name: concat!("modulo/", stringify!($ty)),
                    description: "(i + 1) % m, runtime modulus",
                    function: sweep_modulo::<$ty> as SweepFn,
                },
                VariantInfo {
                    name: concat!("modulo_const/", stringify!($ty)),
                    description: "(i + 1) % 16, constant modulus",
                    function: sweep_modulo_const::<$ty> as SweepFn,
                },
                VariantInfo {
                    name: concat!("bitmask/", stringify!($ty)),
                    description: "(i + 1) & 0xF",
                    function: sweep_bitmask::<$ty> as SweepFn,
                },
                VariantInfo {
                    name: concat!("addif/", stringify!($ty)),
                    description: "Single conditional subtraction",
                    function: sweep_add_if::<$ty> as SweepFn,
                },
                VariantInfo {
                    name: concat!("addwhile/", stringify!($ty)),
                    description: "Subtraction loop",
                    function: sweep_add_while::<$ty> as SweepFn,
                },
            )*
        ]
    };
}

/// Get all available variants, five kernels for each width
pub fn available_variants() -> Vec<VariantInfo<SweepFn>> {
    lane_variants!(i32, u32, i64, u64)
}
