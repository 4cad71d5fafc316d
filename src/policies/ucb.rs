use super::{Policy, argmax_random_tie, tied_maxima};
use crate::error::{BanditError, Result};
use crate::estimator::ValueEstimator;

/// Upper Confidence Bound policy with +1 smoothing
///
/// Selects the arm maximising
/// `estimate + c * sqrt(ln(total_steps + 1) / (count + 1))`.
/// The smoothing keeps the bonus finite on the very first pulls while still
/// giving never-pulled arms the largest bonus.
#[derive(Clone, Debug, PartialEq)]
pub struct Ucb {
    /// Exploration constant (the classic experiments use 2.0)
    c: f64,
}

impl Ucb {
    /// Creates a new UCB policy with the given exploration constant
    ///
    /// # Arguments
    /// * `c` - Exploration constant, must be finite and positive.
    ///   Higher values encourage more exploration
    pub fn new(c: f64) -> Result<Self> {
        Self::check(c)?;
        Ok(Self { c })
    }

    /// Gets the exploration constant
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Sets the exploration constant
    pub fn set_c(&mut self, c: f64) -> Result<()> {
        Self::check(c)?;
        self.c = c;
        Ok(())
    }

    /// Upper confidence score of a single arm.
    pub fn score(&self, estimate: f64, count: u64, total_steps: u64) -> f64 {
        let bonus = ((total_steps as f64 + 1.0).ln() / (count as f64 + 1.0)).sqrt();
        estimate + self.c * bonus
    }

    /// Scores of every arm of `estimator`.
    pub fn scores(&self, estimator: &ValueEstimator) -> Vec<f64> {
        self.score_iter(estimator).collect()
    }

    fn score_iter<'a>(&'a self, estimator: &'a ValueEstimator) -> impl Iterator<Item = f64> + 'a {
        let total_steps = estimator.total_steps();
        estimator
            .estimates()
            .iter()
            .zip(estimator.counts())
            .map(move |(&estimate, &count)| self.score(estimate, count, total_steps))
    }

    fn check(c: f64) -> Result<()> {
        if c.is_finite() && c > 0.0 {
            Ok(())
        } else {
            Err(BanditError::InvalidExplorationConstant { c })
        }
    }
}

impl Policy for Ucb {
    fn select(&self, estimator: &ValueEstimator, rng: &mut dyn rand::RngCore) -> usize {
        argmax_random_tie(self.score_iter(estimator), rng)
    }

    fn action_probabilities(&self, estimator: &ValueEstimator) -> Vec<f64> {
        let mut probabilities = vec![0.0; estimator.k()];
        let maxima = tied_maxima(self.score_iter(estimator));
        let share = 1.0 / maxima.len() as f64;
        for arm in maxima {
            probabilities[arm] = share;
        }
        probabilities
    }
}
