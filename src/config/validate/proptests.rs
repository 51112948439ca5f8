//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = AdvTrainSpec> {
    (
        1usize..512,      // batch_size
        1e-6f64..1.0,     // lr
        0.0f64..0.99,     // momentum
        1e-4f32..1.0,     // epsilon
        1usize..16,       // replays
        1usize..100,      // epochs
        0.01f64..1.0,     // gamma
    )
        .prop_map(
            |(batch_size, lr, momentum, epsilon, replays, epochs, gamma)| AdvTrainSpec {
                data: DataSpec {
                    batch_size,
                    ..Default::default()
                },
                optimizer: OptimSpec {
                    lr,
                    momentum,
                    ..Default::default()
                },
                scheduler: SchedulerSpec::MultiStep {
                    milestones: vec![epochs / 2, epochs],
                    gamma,
                },
                adversarial: AdversarialSpec { epsilon, replays },
                training: TrainingParams {
                    epochs,
                    ..Default::default()
                },
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        // epochs / 2 == epochs only when epochs == 0, which the strategy excludes
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.data.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_epsilon_above_one_fails(spec in arb_valid_spec(), eps in 1.001f32..100.0) {
        let mut spec = spec;
        spec.adversarial.epsilon = eps;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn prop_zero_replays_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.adversarial.replays = 0;
        prop_assert_eq!(validate_config(&spec), Err(ValidationError::InvalidReplays(0)));
    }
}
