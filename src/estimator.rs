//! Per-arm value estimates and the rules that update them.

use crate::error::{BanditError, Result};

/// Step size used by the constant-step rule when none is configured.
pub const DEFAULT_STEP_SIZE: f64 = 0.1;

/// How an observed reward moves an arm's estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateRule {
    /// Exact running mean: step size `1 / counts[arm]`.
    SampleAverage,
    /// Exponential recency-weighted average with a fixed step size.
    ConstantStep { alpha: f64 },
}

impl UpdateRule {
    /// Constant-step rule, rejecting `alpha` outside `(0, 1]`.
    pub fn constant_step(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(BanditError::InvalidStepSize { alpha });
        }
        Ok(Self::ConstantStep { alpha })
    }

    fn step_size(&self, count: u64) -> f64 {
        match *self {
            Self::SampleAverage => 1.0 / count as f64,
            Self::ConstantStep { alpha } => alpha,
        }
    }
}

/// Current value estimate and pull count for each of the k arms.
///
/// `update` is the only way estimates change after construction.
#[derive(Clone, Debug)]
pub struct ValueEstimator {
    estimates: Vec<f64>,
    counts: Vec<u64>,
    total_steps: u64,
    initial_value: f64,
    rule: UpdateRule,
}

impl ValueEstimator {
    /// Creates an estimator for `k` arms with every estimate at `initial_value`.
    pub fn new(k: usize, initial_value: f64, rule: UpdateRule) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::InvalidArmCount { k });
        }
        if !initial_value.is_finite() {
            return Err(BanditError::InvalidInitialValue {
                value: initial_value,
            });
        }
        if let UpdateRule::ConstantStep { alpha } = rule {
            UpdateRule::constant_step(alpha)?;
        }

        Ok(Self {
            estimates: vec![initial_value; k],
            counts: vec![0; k],
            total_steps: 0,
            initial_value,
            rule,
        })
    }

    /// Zero-initialised sample-average estimator.
    pub fn sample_average(k: usize) -> Result<Self> {
        Self::new(k, 0.0, UpdateRule::SampleAverage)
    }

    /// Folds one observed reward into the estimate of `arm`.
    ///
    /// # Panics
    /// Panics if `arm >= k`.
    pub fn update(&mut self, arm: usize, reward: f64) {
        assert!(
            arm < self.estimates.len(),
            "arm index {arm} out of range for {} arms",
            self.estimates.len()
        );

        self.counts[arm] += 1;
        self.total_steps += 1;

        let step = self.rule.step_size(self.counts[arm]);
        let estimate = &mut self.estimates[arm];
        *estimate += (reward - *estimate) * step;
    }

    /// Restores the initial estimates and clears every count.
    pub fn reset(&mut self) {
        self.estimates.fill(self.initial_value);
        self.counts.fill(0);
        self.total_steps = 0;
    }

    /// Number of arms.
    pub fn k(&self) -> usize {
        self.estimates.len()
    }

    /// Gets the current estimate of every arm
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Gets the pull count of every arm
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Pulls across all arms since construction or the last reset.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Gets the value every estimate starts from
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Gets the update rule
    pub fn rule(&self) -> UpdateRule {
        self.rule
    }
}
