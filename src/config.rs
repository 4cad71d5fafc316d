//! Strategy and simulation configuration.
//!
//! A [`StrategyConfig`] is the closed set of recognised bandit strategies and
//! their hyperparameters. It decides which value estimator, action policy and
//! reward mode each freshly built [`Bandit`](crate::Bandit) gets:
//!
//! | strategy         | initial estimate  | update rule                       | policy                 | rewards     |
//! |------------------|-------------------|-----------------------------------|------------------------|-------------|
//! | `epsilon_greedy` | 0                 | sample average                    | epsilon-greedy         | stationary  |
//! | `ucb`            | 0                 | sample average                    | UCB (or epsilon-greedy when `ucb = false`) | stationary |
//! | `optimistic`     | `optimistic_init` | constant step `alpha`             | epsilon-greedy         | stationary  |
//! | `nonstationary`  | 0                 | constant step if `constant_alpha` | epsilon-greedy         | random walk |
//!
//! Both types deserialize with serde so experiments can be described in JSON:
//!
//! ```
//! use armada::SimulationConfig;
//!
//! let config: SimulationConfig = serde_json::from_str(
//!     r#"{ "strategy": "ucb", "c": 1.5, "num_trials": 200 }"#,
//! ).unwrap();
//! assert_eq!(config.num_trials, 200);
//! assert_eq!(config.num_pulls, 1000);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::estimator::{DEFAULT_STEP_SIZE, UpdateRule, ValueEstimator};
use crate::policies::{ActionPolicy, EpsilonGreedy, Ucb};

pub const DEFAULT_ARMS: usize = 10;
pub const DEFAULT_EPSILON: f64 = 0.1;
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = 2.0;
pub const DEFAULT_OPTIMISTIC_INIT: f64 = 10.0;
pub const DEFAULT_NUM_TRIALS: usize = 2000;
pub const DEFAULT_NUM_PULLS: usize = 1000;

fn default_arms() -> usize {
    DEFAULT_ARMS
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_c() -> f64 {
    DEFAULT_EXPLORATION_CONSTANT
}

fn default_optimistic_init() -> f64 {
    DEFAULT_OPTIMISTIC_INIT
}

fn default_alpha() -> f64 {
    DEFAULT_STEP_SIZE
}

fn default_true() -> bool {
    true
}

fn default_num_trials() -> usize {
    DEFAULT_NUM_TRIALS
}

fn default_num_pulls() -> usize {
    DEFAULT_NUM_PULLS
}

/// A bandit strategy and its hyperparameters.
///
/// Keys that the tagged strategy does not take are rejected rather than
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case", deny_unknown_fields)]
pub enum StrategyConfig {
    /// Sample-average estimates, epsilon-greedy selection.
    EpsilonGreedy {
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    /// Sample-average estimates, upper-confidence-bound selection.
    Ucb {
        #[serde(default = "default_c")]
        c: f64,
        /// Falls back to epsilon-greedy selection when false.
        #[serde(default = "default_true")]
        ucb: bool,
        /// Only used when `ucb` is false.
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    /// Constant-step estimates starting from `optimistic_init`.
    ///
    /// An `optimistic_init` of 0.0 gives the "realistic" baseline.
    Optimistic {
        #[serde(default = "default_optimistic_init")]
        optimistic_init: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
    /// Random-walk rewards, tracked with a constant step or a sample average.
    Nonstationary {
        #[serde(default = "default_true")]
        constant_alpha: bool,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::epsilon_greedy(DEFAULT_EPSILON)
    }
}

impl StrategyConfig {
    /// Epsilon-greedy over sample-average estimates.
    pub fn epsilon_greedy(epsilon: f64) -> Self {
        Self::EpsilonGreedy { epsilon }
    }

    /// UCB with exploration constant `c`.
    pub fn ucb(c: f64) -> Self {
        Self::Ucb {
            c,
            ucb: true,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Epsilon-greedy over constant-step estimates starting at `optimistic_init`.
    pub fn optimistic(optimistic_init: f64, epsilon: f64) -> Self {
        Self::Optimistic {
            optimistic_init,
            epsilon,
            alpha: DEFAULT_STEP_SIZE,
        }
    }

    /// Epsilon-greedy on random-walk rewards, with a constant step when
    /// `constant_alpha` is set.
    pub fn nonstationary(constant_alpha: bool, epsilon: f64) -> Self {
        Self::Nonstationary {
            constant_alpha,
            epsilon,
            alpha: DEFAULT_STEP_SIZE,
        }
    }

    /// Tag of the strategy as it appears in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EpsilonGreedy { .. } => "epsilon_greedy",
            Self::Ucb { .. } => "ucb",
            Self::Optimistic { .. } => "optimistic",
            Self::Nonstationary { .. } => "nonstationary",
        }
    }

    /// Checks every hyperparameter against its documented domain.
    pub fn validate(&self) -> Result<()> {
        self.policy()?;
        self.update_rule()?;
        if let Self::Optimistic {
            optimistic_init, ..
        } = *self
            && !optimistic_init.is_finite()
        {
            return Err(BanditError::InvalidInitialValue {
                value: optimistic_init,
            });
        }
        Ok(())
    }

    /// Builds the action policy this strategy selects arms with.
    pub fn policy(&self) -> Result<ActionPolicy> {
        let policy: ActionPolicy = match *self {
            Self::Ucb { c, ucb: true, .. } => Ucb::new(c)?.into(),
            Self::Ucb {
                c,
                ucb: false,
                epsilon,
            } => {
                // Keep rejecting a bad `c` even when it is not used.
                Ucb::new(c)?;
                EpsilonGreedy::new(epsilon)?.into()
            }
            Self::EpsilonGreedy { epsilon }
            | Self::Optimistic { epsilon, .. }
            | Self::Nonstationary { epsilon, .. } => EpsilonGreedy::new(epsilon)?.into(),
        };
        Ok(policy)
    }

    /// Update rule for the value estimator.
    pub fn update_rule(&self) -> Result<UpdateRule> {
        match *self {
            Self::EpsilonGreedy { .. } | Self::Ucb { .. } => Ok(UpdateRule::SampleAverage),
            Self::Optimistic { alpha, .. } => UpdateRule::constant_step(alpha),
            Self::Nonstationary {
                constant_alpha,
                alpha,
                ..
            } => {
                let rule = UpdateRule::constant_step(alpha)?;
                Ok(if constant_alpha {
                    rule
                } else {
                    UpdateRule::SampleAverage
                })
            }
        }
    }

    /// Value every estimate starts from.
    pub fn initial_value(&self) -> f64 {
        match *self {
            Self::Optimistic {
                optimistic_init, ..
            } => optimistic_init,
            _ => 0.0,
        }
    }

    /// Builds a fresh estimator for `k` arms.
    pub fn estimator(&self, k: usize) -> Result<ValueEstimator> {
        ValueEstimator::new(k, self.initial_value(), self.update_rule()?)
    }

    /// Whether true means random-walk after every pull.
    pub fn is_drifting(&self) -> bool {
        matches!(self, Self::Nonstationary { .. })
    }
}

/// Everything needed to build a [`Simulation`](crate::Simulation).
///
/// Serialized as one flat object: the `strategy` tag, its hyperparameters
/// and the trial shape side by side. Unknown keys, and hyperparameters the
/// chosen strategy does not take, fail deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationConfig")]
pub struct SimulationConfig {
    #[serde(flatten)]
    pub strategy: StrategyConfig,
    pub arms: usize,
    pub num_trials: usize,
    pub num_pulls: usize,
    /// Base seed for the per-trial random streams; drawn at random when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StrategyKind {
    EpsilonGreedy,
    Ucb,
    Optimistic,
    Nonstationary,
}

impl StrategyKind {
    /// Hyperparameter keys this strategy takes.
    fn options(self) -> &'static [&'static str] {
        match self {
            Self::EpsilonGreedy => &["epsilon"],
            Self::Ucb => &["c", "ucb", "epsilon"],
            Self::Optimistic => &["optimistic_init", "epsilon", "alpha"],
            Self::Nonstationary => &["constant_alpha", "epsilon", "alpha"],
        }
    }
}

/// Wire form of [`SimulationConfig`]. `#[serde(flatten)]` cannot be combined
/// with `deny_unknown_fields`, so every recognised key is spelled out here.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSimulationConfig {
    strategy: StrategyKind,
    epsilon: Option<f64>,
    c: Option<f64>,
    ucb: Option<bool>,
    optimistic_init: Option<f64>,
    alpha: Option<f64>,
    constant_alpha: Option<bool>,
    #[serde(default = "default_arms")]
    arms: usize,
    #[serde(default = "default_num_trials")]
    num_trials: usize,
    #[serde(default = "default_num_pulls")]
    num_pulls: usize,
    #[serde(default)]
    seed: Option<u64>,
}

impl RawSimulationConfig {
    fn strategy(&self) -> Result<StrategyConfig> {
        let epsilon = self.epsilon.unwrap_or(DEFAULT_EPSILON);
        let alpha = self.alpha.unwrap_or(DEFAULT_STEP_SIZE);

        let strategy = match self.strategy {
            StrategyKind::EpsilonGreedy => StrategyConfig::EpsilonGreedy { epsilon },
            StrategyKind::Ucb => StrategyConfig::Ucb {
                c: self.c.unwrap_or(DEFAULT_EXPLORATION_CONSTANT),
                ucb: self.ucb.unwrap_or(true),
                epsilon,
            },
            StrategyKind::Optimistic => StrategyConfig::Optimistic {
                optimistic_init: self.optimistic_init.unwrap_or(DEFAULT_OPTIMISTIC_INIT),
                epsilon,
                alpha,
            },
            StrategyKind::Nonstationary => StrategyConfig::Nonstationary {
                constant_alpha: self.constant_alpha.unwrap_or(true),
                epsilon,
                alpha,
            },
        };
        let accepted = self.strategy.options();

        let supplied = [
            ("epsilon", self.epsilon.is_some()),
            ("c", self.c.is_some()),
            ("ucb", self.ucb.is_some()),
            ("optimistic_init", self.optimistic_init.is_some()),
            ("alpha", self.alpha.is_some()),
            ("constant_alpha", self.constant_alpha.is_some()),
        ];
        if let Some(&(option, _)) = supplied
            .iter()
            .find(|(option, present)| *present && !accepted.contains(option))
        {
            return Err(BanditError::UnsupportedOption {
                strategy: strategy.name(),
                option,
            });
        }

        Ok(strategy)
    }
}

impl TryFrom<RawSimulationConfig> for SimulationConfig {
    type Error = BanditError;

    fn try_from(raw: RawSimulationConfig) -> Result<Self> {
        Ok(Self {
            strategy: raw.strategy()?,
            arms: raw.arms,
            num_trials: raw.num_trials,
            num_pulls: raw.num_pulls,
            seed: raw.seed,
        })
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyConfig::default(),
            arms: DEFAULT_ARMS,
            num_trials: DEFAULT_NUM_TRIALS,
            num_pulls: DEFAULT_NUM_PULLS,
            seed: None,
        }
    }
}
