//! Tests for configuration error handling

use armada::prelude::*;

#[test]
fn test_invalid_epsilon_fails_fast() {
    for epsilon in [-0.1, 1.0001, f64::NAN] {
        let result = Bandit::builder()
            .strategy(StrategyConfig::epsilon_greedy(epsilon))
            .build();
        assert!(matches!(result, Err(BanditError::InvalidEpsilon { .. })));

        let result = Simulation::new(StrategyConfig::nonstationary(true, epsilon), 10, 10);
        assert!(matches!(result, Err(BanditError::InvalidEpsilon { .. })));
    }

    // Boundaries are valid
    assert!(Simulation::new(StrategyConfig::epsilon_greedy(0.0), 1, 1).is_ok());
    assert!(Simulation::new(StrategyConfig::epsilon_greedy(1.0), 1, 1).is_ok());
}

#[test]
fn test_invalid_exploration_constant() {
    for c in [0.0, -2.0, f64::INFINITY, f64::NAN] {
        let result = Simulation::new(StrategyConfig::ucb(c), 10, 10);
        assert!(matches!(
            result,
            Err(BanditError::InvalidExplorationConstant { .. })
        ));
    }
}

#[test]
fn test_invalid_arm_count() {
    let result = Bandit::builder()
        .arms(0)
        .strategy(StrategyConfig::ucb(2.0))
        .build();
    assert_eq!(result.unwrap_err(), BanditError::InvalidArmCount { k: 0 });

    let result = Bandit::builder()
        .true_means(Vec::new())
        .strategy(StrategyConfig::ucb(2.0))
        .build();
    assert_eq!(result.unwrap_err(), BanditError::InvalidArmCount { k: 0 });

    let result = SimulationConfig {
        arms: 0,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        Simulation::from_config(&result),
        Err(BanditError::InvalidArmCount { k: 0 })
    ));
}

#[test]
fn test_invalid_step_size() {
    let strategy = StrategyConfig::Optimistic {
        optimistic_init: 10.0,
        epsilon: 0.0,
        alpha: 1.5,
    };
    let err = Simulation::new(strategy, 10, 10).unwrap_err();
    assert_eq!(err.to_string(), "invalid step size: 1.5 is not within (0, 1]");
}

#[test]
fn test_error_messages_name_the_value() {
    let err = Bandit::builder()
        .strategy(StrategyConfig::epsilon_greedy(1.5))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("1.5"));

    let err = Bandit::builder().build().unwrap_err();
    assert!(err.to_string().contains("strategy not specified"));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_out_of_range_update_is_a_contract_violation() {
    let mut estimator = ValueEstimator::sample_average(3).unwrap();
    estimator.update(3, 1.0);
}
