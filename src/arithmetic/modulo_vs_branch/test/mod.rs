//! Tests for the modulo kernels

use super::code::{add_if, add_while, modulo, Lane, CONST_MODULUS, MASK, MAX_LOOP, MAX_MODULO};

/// Check the kernels against `%` over the whole sweep domain for one width.
fn verify_lane<T: Lane>() -> Result<(), String> {
    let mask = T::from_u32(MASK);
    let const_modulus = T::from_u32(CONST_MODULUS);

    for m in 1..MAX_MODULO {
        let modulus = T::from_u32(m);
        for i in 0..MAX_LOOP {
            let value = T::from_u32(i + 1);
            let expected = value % modulus;

            let got = add_while(value, modulus);
            if got != expected {
                return Err(format!(
                    "{}: add_while({:?}, {:?}) = {:?}, expected {:?}",
                    T::TYPE_NAME,
                    value,
                    modulus,
                    got,
                    expected
                ));
            }

            // A single subtraction only covers [0, 2m)
            if i + 1 < 2 * m {
                let got = add_if(value, modulus);
                if got != expected {
                    return Err(format!(
                        "{}: add_if({:?}, {:?}) = {:?}, expected {:?}",
                        T::TYPE_NAME,
                        value,
                        modulus,
                        got,
                        expected
                    ));
                }
            }

            if modulo(value, const_modulus) != (value & mask) {
                return Err(format!(
                    "{}: {:?} % {} differs from {:?} & {:#x}",
                    T::TYPE_NAME,
                    value,
                    CONST_MODULUS,
                    value,
                    MASK
                ));
            }
        }
    }

    Ok(())
}

/// Verify every width
pub fn verify_all() -> Result<(), String> {
    verify_lane::<i32>()?;
    verify_lane::<u32>()?;
    verify_lane::<i64>()?;
    verify_lane::<u64>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::modulo_vs_branch::code::{available_variants, SweepTrial, SWEEP_STEPS};
    use crate::arithmetic::modulo_vs_branch::ModuloVsBranchRunner;
    use crate::harness::LayoutTrial;
    use crate::registry::ExperimentRunner;

    #[test]
    fn test_kernels_all_widths() {
        verify_all().expect("kernels should agree with %");
    }

    #[test]
    fn test_add_if_outside_domain() {
        // 40 >= 2 * 16, one subtraction is not enough
        assert_eq!(add_if(40u32, 16), 24);
        assert_eq!(40u32 % 16, 8);
        assert_eq!(add_while(40u32, 16), 8);
        assert_eq!(add_while(99i64, 7), 99 % 7);
    }

    #[test]
    fn test_mask_needs_power_of_two() {
        // 12 is not a power of two, so & 11 is not % 12
        let modulus = 12u32;
        let mask = modulus - 1;
        let mismatch = (1..MAX_LOOP).any(|v| v % modulus != v & mask);
        assert!(mismatch);
        assert_eq!(13 % modulus, 1);
        assert_eq!(13 & mask, 9);
    }

    #[test]
    fn test_variant_names_carry_type() {
        let names: Vec<_> = available_variants().iter().map(|v| v.name).collect();
        assert_eq!(names.len(), 20);
        for kernel in ["modulo", "modulo_const", "bitmask", "addif", "addwhile"] {
            for ty in ["i32", "u32", "i64", "u64"] {
                let name = format!("{}/{}", kernel, ty);
                assert!(names.iter().any(|n| *n == name), "missing {}", name);
            }
        }
    }

    #[test]
    fn test_every_sweep_runs() {
        for variant in available_variants() {
            let mut trial = SweepTrial::new(variant.function);
            assert_eq!(trial.elements(), SWEEP_STEPS);
            trial.run();
        }
    }

    #[test]
    fn test_runner_is_size_independent() {
        let runner = ModuloVsBranchRunner;
        assert!(runner.size_independent());
        assert_eq!(runner.size_plans().len(), 1);
        assert_eq!(runner.size_plans()[0].sizes, vec![1]);

        let mut closure = runner
            .build_variant("addwhile/u64", 1, None)
            .expect("known variant");
        assert_eq!(closure.size, 1);
        assert_eq!(closure.elements, SWEEP_STEPS);
        (closure.run)();
    }
}
