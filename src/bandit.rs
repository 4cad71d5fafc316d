use crate::config::{DEFAULT_ARMS, StrategyConfig};
use crate::error::{BanditError, Result};
use crate::estimator::ValueEstimator;
use crate::policies::{ActionPolicy, Policy};
use crate::reward::RewardSource;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Random stream owned by each bandit.
pub type TrialRng = Xoshiro256PlusPlus;

/// Lifecycle of a bandit. There is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BanditState {
    /// No pull has happened yet.
    Constructed,
    /// At least one pull has happened.
    Active,
}

/// A k-armed bandit: one reward source, one value estimator and one action
/// policy, plus the private random stream they all draw from.
///
/// Nothing is shared between bandits, so independent instances can be pulled
/// on different threads without coordination.
#[derive(Clone, Debug)]
pub struct Bandit<R = TrialRng> {
    source: RewardSource,
    estimator: ValueEstimator,
    policy: ActionPolicy,
    rng: R,
}

impl<R: Rng> Bandit<R> {
    /// Creates a new bandit from its parts
    pub fn new(
        source: RewardSource,
        estimator: ValueEstimator,
        policy: ActionPolicy,
        rng: R,
    ) -> Result<Self> {
        if source.k() != estimator.k() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "reward source has {} arms, estimator has {}",
                    source.k(),
                    estimator.k()
                ),
            });
        }

        Ok(Self::assemble(source, estimator, policy, rng))
    }

    /// Joins parts already known to agree on `k`.
    pub(crate) fn assemble(
        source: RewardSource,
        estimator: ValueEstimator,
        policy: ActionPolicy,
        rng: R,
    ) -> Self {
        tracing::trace!(
            strategy = policy.name(),
            true_means = ?source.true_means(),
            "bandit constructed"
        );

        Self {
            source,
            estimator,
            policy,
            rng,
        }
    }

    /// Creates a bandit for `strategy` whose `k` true means are drawn from a
    /// standard normal distribution using `rng`.
    pub fn from_strategy(strategy: &StrategyConfig, k: usize, mut rng: R) -> Result<Self> {
        strategy.validate()?;
        let source = RewardSource::sample_means(k, strategy.is_drifting(), &mut rng)?;
        Self::new(source, strategy.estimator(k)?, strategy.policy()?, rng)
    }

    /// Creates a bandit for `strategy` with fixed true means.
    pub fn with_true_means(
        strategy: &StrategyConfig,
        true_means: Vec<f64>,
        rng: R,
    ) -> Result<Self> {
        strategy.validate()?;
        let source = RewardSource::with_means(true_means, strategy.is_drifting())?;
        let estimator = strategy.estimator(source.k())?;
        Self::new(source, estimator, strategy.policy()?, rng)
    }

    /// Pulls one arm chosen by the policy and returns the observed reward
    pub fn pull_once(&mut self) -> f64 {
        let arm = self.policy.select(&self.estimator, &mut self.rng);
        let reward = self.source.sample(arm, &mut self.rng);
        self.estimator.update(arm, reward);
        reward
    }

    /// Pulls `n` times, discarding the rewards
    pub fn pull(&mut self, n: usize) {
        for _ in 0..n {
            self.pull_once();
        }
    }

    /// Selection probabilities for the next pull
    pub fn action_probabilities(&self) -> Vec<f64> {
        self.policy.action_probabilities(&self.estimator)
    }

    /// Gets the lifecycle state, derived from the step count
    pub fn state(&self) -> BanditState {
        if self.estimator.total_steps() == 0 {
            BanditState::Constructed
        } else {
            BanditState::Active
        }
    }

    /// Number of arms
    pub fn k(&self) -> usize {
        self.source.k()
    }

    /// Gets the current true mean of every arm
    pub fn true_means(&self) -> &[f64] {
        self.source.true_means()
    }

    /// Gets the value estimate of every arm
    pub fn estimates(&self) -> &[f64] {
        self.estimator.estimates()
    }

    /// Gets how often each arm was pulled
    pub fn counts(&self) -> &[u64] {
        self.estimator.counts()
    }

    /// Gets the total number of pulls so far
    pub fn total_steps(&self) -> u64 {
        self.estimator.total_steps()
    }

    /// Arm with the highest true mean at this moment
    pub fn best_arm(&self) -> usize {
        self.source.best_arm()
    }

    /// Gets the reward source
    pub fn source(&self) -> &RewardSource {
        &self.source
    }

    /// Gets the value estimator
    pub fn estimator(&self) -> &ValueEstimator {
        &self.estimator
    }

    /// Gets the action policy
    pub fn policy(&self) -> &ActionPolicy {
        &self.policy
    }
}

impl Bandit<TrialRng> {
    /// Creates a bandit for `strategy` with a stream seeded from `seed`
    pub fn seeded(strategy: &StrategyConfig, k: usize, seed: u64) -> Result<Self> {
        Self::from_strategy(strategy, k, TrialRng::seed_from_u64(seed))
    }

    /// Create a new builder for constructing a bandit
    pub fn builder() -> BanditBuilder {
        BanditBuilder::default()
    }
}

/// Builder for creating bandits with a fluent API
#[derive(Clone, Debug, Default)]
pub struct BanditBuilder {
    arms: Option<usize>,
    true_means: Option<Vec<f64>>,
    strategy: Option<StrategyConfig>,
    seed: Option<u64>,
}

impl BanditBuilder {
    /// Set the number of arms (defaults to 10)
    pub fn arms(mut self, k: usize) -> Self {
        self.arms = Some(k);
        self
    }

    /// Fix the true means instead of sampling them
    pub fn true_means(mut self, true_means: Vec<f64>) -> Self {
        self.true_means = Some(true_means);
        self
    }

    /// Set the strategy for the bandit
    pub fn strategy(mut self, strategy: StrategyConfig) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Seed the bandit's random stream
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the bandit
    pub fn build(self) -> Result<Bandit> {
        let strategy = self.strategy.ok_or(BanditError::BuilderError {
            message: "strategy not specified".into(),
        })?;

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let rng = TrialRng::seed_from_u64(seed);

        match self.true_means {
            Some(true_means) => {
                if let Some(k) = self.arms.filter(|&k| k != true_means.len()) {
                    return Err(BanditError::DimensionMismatch {
                        message: format!(
                            "{k} arms requested but {} true means supplied",
                            true_means.len()
                        ),
                    });
                }
                Bandit::with_true_means(&strategy, true_means, rng)
            }
            None => Bandit::from_strategy(&strategy, self.arms.unwrap_or(DEFAULT_ARMS), rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::UpdateRule;
    use crate::policies::{EpsilonGreedy, Ucb};

    #[test]
    fn test_bandit_creation() {
        let bandit = Bandit::seeded(&StrategyConfig::default(), 10, 42).unwrap();
        assert_eq!(bandit.k(), 10);
        assert_eq!(bandit.true_means().len(), 10);
        assert_eq!(bandit.estimates(), &[0.0; 10]);
        assert_eq!(bandit.counts(), &[0; 10]);
        assert_eq!(bandit.state(), BanditState::Constructed);
    }

    #[test]
    fn test_bandit_builder() {
        let bandit = Bandit::builder()
            .true_means(vec![0.0, 1.0, 2.0])
            .strategy(StrategyConfig::ucb(2.0))
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(bandit.k(), 3);
        assert_eq!(bandit.true_means(), &[0.0, 1.0, 2.0]);
        assert!(matches!(bandit.policy(), ActionPolicy::Ucb(_)));
    }

    #[test]
    fn test_builder_errors() {
        let err = Bandit::builder().arms(3).build().unwrap_err();
        assert!(matches!(err, BanditError::BuilderError { .. }));

        let err = Bandit::builder()
            .arms(3)
            .true_means(vec![0.0, 1.0])
            .strategy(StrategyConfig::default())
            .build()
            .unwrap_err();
        assert!(matches!(err, BanditError::DimensionMismatch { .. }));

        let err = Bandit::builder()
            .arms(0)
            .strategy(StrategyConfig::default())
            .build()
            .unwrap_err();
        assert_eq!(err, BanditError::InvalidArmCount { k: 0 });

        let err = Bandit::builder()
            .strategy(StrategyConfig::epsilon_greedy(2.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, BanditError::InvalidEpsilon { .. }));
    }

    #[test]
    fn test_mismatched_parts_rejected() {
        let source = RewardSource::with_means(vec![0.0, 1.0], false).unwrap();
        let estimator = ValueEstimator::sample_average(3).unwrap();
        let policy = ActionPolicy::from(EpsilonGreedy::new(0.1).unwrap());
        let result = Bandit::new(source, estimator, policy, TrialRng::seed_from_u64(1));
        assert!(matches!(result, Err(BanditError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_pull_updates_exactly_one_arm() {
        let mut bandit = Bandit::seeded(&StrategyConfig::default(), 5, 3).unwrap();
        let reward = bandit.pull_once();

        assert_eq!(bandit.state(), BanditState::Active);
        assert_eq!(bandit.total_steps(), 1);
        let pulled: Vec<usize> = (0..5).filter(|&a| bandit.counts()[a] == 1).collect();
        assert_eq!(pulled.len(), 1);
        assert_eq!(bandit.estimates()[pulled[0]], reward);
    }

    #[test]
    fn test_pull_many() {
        let mut bandit = Bandit::seeded(&StrategyConfig::ucb(2.0), 10, 99).unwrap();
        bandit.pull(1000);
        assert_eq!(bandit.total_steps(), 1000);
        assert_eq!(bandit.counts().iter().sum::<u64>(), 1000);
        // UCB tries every arm at least once
        assert!(bandit.counts().iter().all(|&c| c > 0));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let strategy = StrategyConfig::nonstationary(true, 0.1);
        let mut a = Bandit::seeded(&strategy, 4, 1234).unwrap();
        let mut b = Bandit::seeded(&strategy, 4, 1234).unwrap();

        let rewards_a: Vec<f64> = (0..200).map(|_| a.pull_once()).collect();
        let rewards_b: Vec<f64> = (0..200).map(|_| b.pull_once()).collect();
        assert_eq!(rewards_a, rewards_b);
        assert_eq!(a.true_means(), b.true_means());
        assert_eq!(a.estimates(), b.estimates());
    }

    #[test]
    fn test_optimistic_start_forces_exploration() {
        // Rewards around 0 pull any tried arm's estimate well below 10
        let mut bandit = Bandit::builder()
            .true_means(vec![0.0; 5])
            .strategy(StrategyConfig::optimistic(10.0, 0.0))
            .seed(11)
            .build()
            .unwrap();
        bandit.pull(5);
        assert_eq!(bandit.counts(), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_explicit_parts() {
        let source = RewardSource::with_means(vec![0.0, 3.0], false).unwrap();
        let estimator = ValueEstimator::new(2, 0.0, UpdateRule::SampleAverage).unwrap();
        let policy = ActionPolicy::from(Ucb::new(1.0).unwrap());
        let mut bandit =
            Bandit::new(source, estimator, policy, TrialRng::seed_from_u64(8)).unwrap();

        bandit.pull(500);
        assert_eq!(bandit.best_arm(), 1);
        assert!(bandit.counts()[1] > bandit.counts()[0]);
    }
}
