//! Reward sources: the latent arm values a bandit is trying to discover.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::{BanditError, Result};

/// Standard deviation of an observed reward around the arm's true mean.
pub const OBSERVATION_STD: f64 = 1.0;

/// Standard deviation of the per-pull random-walk increment applied to every
/// true mean of a drifting source.
pub const DRIFT_STD: f64 = 0.1;

/// The k latent true mean rewards, optionally drifting after every pull.
#[derive(Clone, Debug)]
pub struct RewardSource {
    true_means: Vec<f64>,
    drifting: bool,
}

impl RewardSource {
    /// Draws `k` true means from a standard normal distribution.
    pub fn sample_means<R: Rng + ?Sized>(k: usize, drifting: bool, rng: &mut R) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::InvalidArmCount { k });
        }
        Ok(Self::draw(k, drifting, rng))
    }

    /// Like `sample_means` for an already validated `k`.
    pub(crate) fn draw<R: Rng + ?Sized>(k: usize, drifting: bool, rng: &mut R) -> Self {
        let true_means: Vec<f64> = (0..k).map(|_| rng.sample(StandardNormal)).collect();
        Self {
            true_means,
            drifting,
        }
    }

    /// Uses the given true means verbatim.
    pub fn with_means(true_means: Vec<f64>, drifting: bool) -> Result<Self> {
        if true_means.is_empty() {
            return Err(BanditError::InvalidArmCount { k: 0 });
        }
        if let Some((arm, &value)) = true_means.iter().enumerate().find(|(_, m)| !m.is_finite()) {
            return Err(BanditError::InvalidMean { arm, value });
        }
        Ok(Self {
            true_means,
            drifting,
        })
    }

    /// Draws one observation for `arm` from `Normal(true_means[arm], 1)`.
    ///
    /// A drifting source first moves every true mean by an independent
    /// `Normal(0, 0.1)` step, then observes the updated mean of `arm`.
    ///
    /// # Panics
    /// Panics if `arm >= k`.
    pub fn sample<R: Rng + ?Sized>(&mut self, arm: usize, rng: &mut R) -> f64 {
        assert!(
            arm < self.true_means.len(),
            "arm index {arm} out of range for {} arms",
            self.true_means.len()
        );

        if self.drifting {
            for mean in &mut self.true_means {
                let step: f64 = rng.sample(StandardNormal);
                *mean += DRIFT_STD * step;
            }
        }

        let noise: f64 = rng.sample(StandardNormal);
        self.true_means[arm] + OBSERVATION_STD * noise
    }

    /// Number of arms.
    pub fn k(&self) -> usize {
        self.true_means.len()
    }

    /// Gets the current true mean of every arm.
    pub fn true_means(&self) -> &[f64] {
        &self.true_means
    }

    /// Whether the means random-walk on every pull.
    pub fn is_drifting(&self) -> bool {
        self.drifting
    }

    /// Index of the arm with the highest true mean right now.
    pub fn best_arm(&self) -> usize {
        self.true_means
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map_or(0, |(idx, _)| idx)
    }
}
