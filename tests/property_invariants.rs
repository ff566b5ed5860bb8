//! Property tests for the invariants of NTF synthesis.
//!
//! Purpose
//! -------
//! - Check, over randomly drawn but valid designs, the guarantees every
//!   caller relies on: stability of the returned NTF, its order, and the
//!   iteration budget.
//! - Check that stability repair is idempotent and always lands inside the
//!   gate.
//!
//! Notes
//! -----
//! - Case counts are kept small; each synthesis case runs a full search.
use num_complex::Complex64;
use proptest::prelude::*;

use deltasigma_ntf::{
    ntf::{
        Architecture, ModulatorSpec, TransferFunction, ZeroPlacement, is_stable, repair,
        synthesize_ntf,
    },
    optimization::OptimizationConfig,
};

fn complex_in_square(half_width: f64) -> impl Strategy<Value = Complex64> {
    (-half_width..half_width, -half_width..half_width).prop_map(|(re, im)| Complex64::new(re, im))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    // Purpose
    // -------
    // Lowpass designs of any order 1..=6 come back stable, of full order,
    // and within the iteration budget.
    fn lowpass_synthesis_respects_invariants(
        order in 1usize..=6,
        osr in 4.0f64..128.0,
        limit in 0usize..30,
        optimal in any::<bool>(),
    ) {
        let placement = if optimal { ZeroPlacement::Optimal } else { ZeroPlacement::Dc };
        let spec = ModulatorSpec::lowpass(order, osr).unwrap().with_zero_placement(placement);
        let config = OptimizationConfig::new(true, limit, false);

        let result = synthesize_ntf(&spec, &config).unwrap();

        prop_assert_eq!(result.transfer_function.poles().len(), order);
        prop_assert_eq!(result.transfer_function.zeros().len(), order);
        prop_assert!(is_stable(&result.transfer_function));
        prop_assert!(result.iterations_used <= limit);
        prop_assert!(result.noise_power.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Bandpass designs obey the same invariants.
    fn bandpass_synthesis_respects_invariants(
        half_order in 1usize..=3,
        osr in 8.0f64..64.0,
        f0 in 0.05f64..0.45,
        limit in 0usize..20,
    ) {
        let order = 2 * half_order;
        let spec = ModulatorSpec::new(order, osr, Architecture::bandpass(f0)).unwrap();
        let config = OptimizationConfig::new(true, limit, false);

        let result = synthesize_ntf(&spec, &config).unwrap();

        prop_assert_eq!(result.transfer_function.poles().len(), order);
        prop_assert!(is_stable(&result.transfer_function));
        prop_assert!(result.iterations_used <= limit);
    }

    #[test]
    // Purpose
    // -------
    // Repair always yields a stable NTF of unchanged order, and repairing a
    // repaired NTF changes nothing.
    fn repair_is_stable_and_idempotent(
        zeros in prop::collection::vec(complex_in_square(1.5), 0..6),
        poles in prop::collection::vec(complex_in_square(2.0), 6),
    ) {
        let tf = TransferFunction::new(zeros, poles, 1.0).unwrap();

        let once = repair(&tf);
        let twice = repair(&once);

        prop_assert!(is_stable(&once), "max modulus {}", once.max_pole_modulus());
        prop_assert_eq!(once.poles().len(), tf.poles().len());
        prop_assert_eq!(once.zeros().len(), tf.zeros().len());
        prop_assert_eq!(once, twice);
    }
}
