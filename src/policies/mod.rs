mod epsilon_greedy;
mod ucb;

use rand::Rng;

use crate::estimator::ValueEstimator;

pub use epsilon_greedy::EpsilonGreedy;
pub use ucb::Ucb;

/// Core trait for action-selection strategies
///
/// Note: This trait uses `dyn rand::RngCore` instead of a generic parameter
/// to maintain object-safety, allowing `Box<dyn Policy>` to be used.
/// Policies hold only their hyperparameters; everything they learn lives in
/// the [`ValueEstimator`] they are handed.
pub trait Policy: Send + Sync {
    /// Select the next arm to pull, in `0..estimator.k()`
    fn select(&self, estimator: &ValueEstimator, rng: &mut dyn rand::RngCore) -> usize;

    /// Probability that the next `select` call returns each arm
    fn action_probabilities(&self, estimator: &ValueEstimator) -> Vec<f64>;
}

/// The strategy a bandit pulls with, fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionPolicy {
    EpsilonGreedy(EpsilonGreedy),
    Ucb(Ucb),
}

impl ActionPolicy {
    /// Short strategy name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EpsilonGreedy(_) => "epsilon_greedy",
            Self::Ucb(_) => "ucb",
        }
    }
}

impl Policy for ActionPolicy {
    fn select(&self, estimator: &ValueEstimator, rng: &mut dyn rand::RngCore) -> usize {
        match self {
            Self::EpsilonGreedy(policy) => policy.select(estimator, rng),
            Self::Ucb(policy) => policy.select(estimator, rng),
        }
    }

    fn action_probabilities(&self, estimator: &ValueEstimator) -> Vec<f64> {
        match self {
            Self::EpsilonGreedy(policy) => policy.action_probabilities(estimator),
            Self::Ucb(policy) => policy.action_probabilities(estimator),
        }
    }
}

impl From<EpsilonGreedy> for ActionPolicy {
    fn from(policy: EpsilonGreedy) -> Self {
        Self::EpsilonGreedy(policy)
    }
}

impl From<Ucb> for ActionPolicy {
    fn from(policy: Ucb) -> Self {
        Self::Ucb(policy)
    }
}

/// Index of a maximal score, chosen uniformly among all tied maxima.
///
/// Single pass reservoir sampling: the j-th tie replaces the current pick
/// with probability 1/j.
pub(crate) fn argmax_random_tie<I>(scores: I, rng: &mut dyn rand::RngCore) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let mut best = f64::NEG_INFINITY;
    let mut chosen = 0;
    let mut ties = 0u32;

    for (idx, score) in scores.into_iter().enumerate() {
        if score > best {
            best = score;
            chosen = idx;
            ties = 1;
        } else if score == best {
            ties += 1;
            if rng.random_range(0..ties) == 0 {
                chosen = idx;
            }
        }
    }

    chosen
}

/// Indices of every score equal to the maximum.
pub(crate) fn tied_maxima<I>(scores: I) -> Vec<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best = f64::NEG_INFINITY;
    let mut maxima = Vec::new();

    for (idx, score) in scores.into_iter().enumerate() {
        if score > best {
            best = score;
            maxima.clear();
            maxima.push(idx);
        } else if score == best {
            maxima.push(idx);
        }
    }

    maxima
}
