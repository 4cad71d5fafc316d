use super::{Policy, argmax_random_tie, tied_maxima};
use crate::error::{BanditError, Result};
use crate::estimator::ValueEstimator;
use rand::Rng;

/// Epsilon-greedy policy - explores with probability epsilon, exploits otherwise
#[derive(Clone, Debug, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Creates a new EpsilonGreedy policy with the given epsilon
    pub fn new(epsilon: f64) -> Result<Self> {
        Self::check(epsilon)?;
        Ok(Self { epsilon })
    }

    /// Gets the epsilon value
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Sets the epsilon value
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<()> {
        Self::check(epsilon)?;
        self.epsilon = epsilon;
        Ok(())
    }

    fn check(epsilon: f64) -> Result<()> {
        if (0.0..=1.0).contains(&epsilon) {
            Ok(())
        } else {
            Err(BanditError::InvalidEpsilon { epsilon })
        }
    }
}

impl Policy for EpsilonGreedy {
    fn select(&self, estimator: &ValueEstimator, rng: &mut dyn rand::RngCore) -> usize {
        // Explore with probability epsilon
        let r: f64 = rng.random_range(0.0..1.0);
        if r < self.epsilon {
            rng.random_range(0..estimator.k())
        } else {
            argmax_random_tie(estimator.estimates().iter().copied(), rng)
        }
    }

    fn action_probabilities(&self, estimator: &ValueEstimator) -> Vec<f64> {
        let k = estimator.k();
        let mut probabilities = vec![self.epsilon / k as f64; k];

        let greedy = tied_maxima(estimator.estimates().iter().copied());
        let share = (1.0 - self.epsilon) / greedy.len() as f64;
        for arm in greedy {
            probabilities[arm] += share;
        }

        probabilities
    }
}
