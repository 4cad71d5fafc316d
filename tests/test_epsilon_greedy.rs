use armada::prelude::*;
use rand::SeedableRng;

#[test]
fn test_epsilon_greedy_selects_valid_arms() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for k in [1, 2, 5, 10, 64] {
        for epsilon in [0.0, 0.01, 0.5, 1.0] {
            let policy = EpsilonGreedy::new(epsilon).unwrap();
            let mut estimator = ValueEstimator::sample_average(k).unwrap();
            for step in 0..200 {
                let arm = policy.select(&estimator, &mut rng);
                assert!(arm < k);
                estimator.update(arm, (step % 7) as f64 - 3.0);
            }
        }
    }
}

#[test]
fn test_pure_exploitation_ties_are_uniform() {
    // No updates yet: every estimate is 0, so every arm ties
    let policy = EpsilonGreedy::new(0.0).unwrap();
    let estimator = ValueEstimator::sample_average(4).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(123);

    let n_samples = 20_000;
    let mut counts = [0usize; 4];
    for _ in 0..n_samples {
        counts[policy.select(&estimator, &mut rng)] += 1;
    }

    for count in counts {
        let proportion = count as f64 / n_samples as f64;
        assert!((proportion - 0.25).abs() < 0.02);
    }
}

#[test]
fn test_pure_exploitation_follows_positive_update() {
    let policy = EpsilonGreedy::new(0.0).unwrap();
    let mut estimator = ValueEstimator::sample_average(3).unwrap();
    estimator.update(1, 0.5);

    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    for _ in 0..100 {
        assert_eq!(policy.select(&estimator, &mut rng), 1);
    }
}

#[test]
fn test_pure_exploitation_avoids_negative_update() {
    let policy = EpsilonGreedy::new(0.0).unwrap();
    let mut estimator = ValueEstimator::sample_average(3).unwrap();
    estimator.update(1, -0.5);

    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    let mut counts = [0usize; 3];
    for _ in 0..2000 {
        counts[policy.select(&estimator, &mut rng)] += 1;
    }

    // The remaining two arms still tie at 0.0
    assert_eq!(counts[1], 0);
    assert!(counts[0] > 800);
    assert!(counts[2] > 800);
}

#[test]
fn test_epsilon_greedy_distribution() {
    // Statistical test of epsilon-greedy behavior
    let policy = EpsilonGreedy::new(0.3).unwrap();
    let mut estimator = ValueEstimator::sample_average(3).unwrap();
    estimator.update(0, 0.2);
    estimator.update(1, 0.9);
    estimator.update(2, 0.1);

    let n_samples = 10_000;
    let mut counts = [0usize; 3];
    let mut rng = rand::rngs::StdRng::seed_from_u64(123);
    for _ in 0..n_samples {
        counts[policy.select(&estimator, &mut rng)] += 1;
    }

    let expected = policy.action_probabilities(&estimator);
    assert!((expected[1] - 0.8).abs() < 1e-12);

    // Arm 1 should be selected approximately 70% + 10% = 80% of the time
    for (arm, count) in counts.iter().enumerate() {
        let proportion = *count as f64 / n_samples as f64;
        assert!((proportion - expected[arm]).abs() < 0.02);
    }
}

#[test]
fn test_bandit_learns_best_arm() {
    let mut bandit = Bandit::builder()
        .true_means(vec![0.0, 0.5, 2.0, -1.0])
        .strategy(StrategyConfig::epsilon_greedy(0.1))
        .seed(17)
        .build()
        .unwrap();
    bandit.pull(3000);

    let counts = bandit.counts();
    let most_pulled = (0..4).max_by_key(|&arm| counts[arm]).unwrap();
    assert_eq!(most_pulled, 2);
    assert!((bandit.estimates()[2] - 2.0).abs() < 0.2);
}
