//! Monte-Carlo harness: many independent trials, one averaged reward curve.

use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::bandit::{Bandit, TrialRng};
use crate::config::{DEFAULT_ARMS, SimulationConfig, StrategyConfig};
use crate::error::{BanditError, Result};
use crate::estimator::ValueEstimator;
use crate::policies::ActionPolicy;
use crate::reward::RewardSource;

/// Completed trials between progress events.
const PROGRESS_INTERVAL: usize = 100;

/// Runs `num_trials` fresh bandits for `num_pulls` pulls each and averages the
/// reward obtained at every pull index.
///
/// Trial `i` draws from its own stream seeded with `seed + i`, so
/// [`run`](Self::run) and [`run_parallel`](Self::run_parallel) return the
/// same curve for the same seed.
///
/// ```
/// use armada::{Simulation, StrategyConfig};
///
/// let curve = Simulation::new(StrategyConfig::ucb(2.0), 50, 200)
///     .unwrap()
///     .with_seed(7)
///     .run();
/// assert_eq!(curve.len(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    strategy: StrategyConfig,
    arms: usize,
    num_trials: usize,
    num_pulls: usize,
    seed: u64,
    // Fresh components cloned into every trial.
    estimator: ValueEstimator,
    policy: ActionPolicy,
    // Replaces the per-trial draw of true means when set.
    fixed_source: Option<RewardSource>,
}

impl Simulation {
    /// Validates `strategy` and the trial shape on a 10-armed testbed.
    pub fn new(strategy: StrategyConfig, num_trials: usize, num_pulls: usize) -> Result<Self> {
        Self::build(strategy, DEFAULT_ARMS, num_trials, num_pulls, None)
    }

    /// Builds a simulation from a deserialized configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::build(
            config.strategy.clone(),
            config.arms,
            config.num_trials,
            config.num_pulls,
            config.seed,
        )
    }

    fn build(
        strategy: StrategyConfig,
        arms: usize,
        num_trials: usize,
        num_pulls: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        if num_trials == 0 {
            return Err(BanditError::InvalidTrialCount);
        }
        if num_pulls == 0 {
            return Err(BanditError::InvalidHorizon);
        }
        strategy.validate()?;
        let estimator = strategy.estimator(arms)?;
        let policy = strategy.policy()?;

        Ok(Self {
            strategy,
            arms,
            num_trials,
            num_pulls,
            seed: seed.unwrap_or_else(|| rand::rng().random()),
            estimator,
            policy,
            fixed_source: None,
        })
    }

    /// Changes the number of arms of every trial's bandit.
    ///
    /// Any true means fixed by [`with_true_means`](Self::with_true_means) are
    /// dropped.
    pub fn with_arms(self, arms: usize) -> Result<Self> {
        Self::build(
            self.strategy,
            arms,
            self.num_trials,
            self.num_pulls,
            Some(self.seed),
        )
    }

    /// Starts every trial from the same `true_means` instead of drawing them.
    ///
    /// The arm count becomes `true_means.len()`. A drifting strategy still
    /// random-walks the means within each trial.
    pub fn with_true_means(mut self, true_means: Vec<f64>) -> Result<Self> {
        let source = RewardSource::with_means(true_means, self.strategy.is_drifting())?;
        self.estimator = self.strategy.estimator(source.k())?;
        self.arms = source.k();
        self.fixed_source = Some(source);
        Ok(self)
    }

    /// Fixes the base seed of the per-trial streams.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Gets the strategy every trial runs
    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    /// Gets the number of arms per bandit
    pub fn arms(&self) -> usize {
        self.arms
    }

    /// Gets the number of independent trials
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    /// Gets the number of pulls per trial
    pub fn num_pulls(&self) -> usize {
        self.num_pulls
    }

    /// Gets the base seed of the per-trial streams
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Gets the true means shared by every trial, if fixed
    pub fn true_means(&self) -> Option<&[f64]> {
        self.fixed_source.as_ref().map(RewardSource::true_means)
    }

    /// Fresh bandit for trial `trial`, with newly sampled true means unless
    /// they were fixed.
    pub fn trial_bandit(&self, trial: usize) -> Bandit {
        let mut rng = TrialRng::seed_from_u64(self.seed.wrapping_add(trial as u64));
        let source = match &self.fixed_source {
            Some(source) => source.clone(),
            None => RewardSource::draw(self.arms, self.strategy.is_drifting(), &mut rng),
        };
        Bandit::assemble(source, self.estimator.clone(), self.policy.clone(), rng)
    }

    /// Reward obtained at every pull of trial `trial`.
    pub fn run_trial(&self, trial: usize) -> Vec<f64> {
        let mut bandit = self.trial_bandit(trial);
        (0..self.num_pulls).map(|_| bandit.pull_once()).collect()
    }

    /// Runs every trial on the current thread.
    pub fn run(&self) -> Vec<f64> {
        self.log_start(false);

        let mut totals = vec![0.0; self.num_pulls];
        for trial in 0..self.num_trials {
            let mut bandit = self.trial_bandit(trial);
            for total in &mut totals {
                *total += bandit.pull_once();
            }
            self.log_progress(trial + 1);
        }

        self.finish(totals)
    }

    /// Runs trials on the rayon thread pool.
    ///
    /// Trials are dispatched in batches and each batch's reward vectors are
    /// folded in trial order, so the result matches [`run`](Self::run)
    /// exactly.
    pub fn run_parallel(&self) -> Vec<f64> {
        self.log_start(true);

        let batch = rayon::current_num_threads().max(1) * 4;
        let mut totals = vec![0.0; self.num_pulls];
        let mut completed = 0;

        while completed < self.num_trials {
            let end = (completed + batch).min(self.num_trials);
            let rewards: Vec<Vec<f64>> = (completed..end)
                .into_par_iter()
                .map(|trial| self.run_trial(trial))
                .collect();

            for trial_rewards in rewards {
                for (total, reward) in totals.iter_mut().zip(trial_rewards) {
                    *total += reward;
                }
                completed += 1;
                self.log_progress(completed);
            }
        }

        self.finish(totals)
    }

    fn log_start(&self, parallel: bool) {
        tracing::info!(
            strategy = self.strategy.name(),
            arms = self.arms,
            trials = self.num_trials,
            pulls = self.num_pulls,
            seed = self.seed,
            parallel,
            "starting simulation"
        );
    }

    fn log_progress(&self, completed: usize) {
        if completed % PROGRESS_INTERVAL == 0 {
            tracing::debug!(completed, total = self.num_trials, "trials completed");
        }
    }

    fn finish(&self, totals: Vec<f64>) -> Vec<f64> {
        let trials = self.num_trials as f64;
        let curve: Vec<f64> = totals.into_iter().map(|total| total / trials).collect();

        let mean_reward = curve.iter().sum::<f64>() / curve.len() as f64;
        tracing::info!(
            strategy = self.strategy.name(),
            final_average = curve.last().copied().unwrap_or_default(),
            mean_reward,
            "simulation finished"
        );

        curve
    }
}
