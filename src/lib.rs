//! Armada: k-armed bandit strategies and a Monte-Carlo simulation harness.
//!
//! A [`Bandit`] composes three independently chosen parts:
//!
//! - a [`RewardSource`] holding the latent true mean of every arm, stationary
//!   or drifting as a random walk,
//! - a [`ValueEstimator`] holding per-arm estimates and pull counts, updated
//!   by a sample-average or constant-step rule,
//! - an [`ActionPolicy`] choosing the next arm (epsilon-greedy or UCB).
//!
//! A [`Simulation`] runs many independent bandits and averages the reward
//! obtained at each pull index into a single curve.
//!
//! # Quick Start
//!
//! ```
//! use armada::prelude::*;
//!
//! // Pull a 10-armed UCB bandit a thousand times
//! let mut bandit = Bandit::builder()
//!     .arms(10)
//!     .strategy(StrategyConfig::ucb(2.0))
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! bandit.pull(1000);
//! assert_eq!(bandit.counts().iter().sum::<u64>(), 1000);
//!
//! // Average reward curve of epsilon-greedy over 100 trials
//! let curve = Simulation::new(StrategyConfig::epsilon_greedy(0.1), 100, 500)
//!     .unwrap()
//!     .with_seed(7)
//!     .run();
//! assert_eq!(curve.len(), 500);
//! ```

mod bandit;
mod config;
mod error;
mod estimator;
pub mod policies;
mod reward;
mod simulation;

// Re-export main types
pub use bandit::{Bandit, BanditBuilder, BanditState, TrialRng};
pub use config::{
    DEFAULT_ARMS, DEFAULT_EPSILON, DEFAULT_EXPLORATION_CONSTANT, DEFAULT_NUM_PULLS,
    DEFAULT_NUM_TRIALS, DEFAULT_OPTIMISTIC_INIT, SimulationConfig, StrategyConfig,
};
pub use error::{BanditError, Result};
pub use estimator::{DEFAULT_STEP_SIZE, UpdateRule, ValueEstimator};
pub use policies::ActionPolicy;
pub use reward::{DRIFT_STD, OBSERVATION_STD, RewardSource};
pub use simulation::Simulation;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use armada::prelude::*;
/// ```
pub mod prelude {
    pub use crate::policies::{ActionPolicy, EpsilonGreedy, Policy, Ucb};
    pub use crate::{
        Bandit, BanditError, BanditState, Result, RewardSource, Simulation, SimulationConfig,
        StrategyConfig, UpdateRule, ValueEstimator,
    };
}
