//! Error types for the armada library.

use thiserror::Error;

/// Result type alias for bandit operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Configuration errors raised while constructing bandits and simulations.
///
/// Every variant is produced synchronously at construction time. Out-of-range
/// arm indices handed to an already-built bandit are contract violations and
/// panic instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// A bandit needs at least one arm.
    #[error("invalid arm count: expected at least one arm, got {k}")]
    InvalidArmCount { k: usize },

    /// Exploration rate outside `[0, 1]`.
    #[error("invalid epsilon: {epsilon} is not within [0, 1]")]
    InvalidEpsilon { epsilon: f64 },

    /// UCB exploration constant must be finite and strictly positive.
    #[error("invalid exploration constant: {c} must be finite and positive")]
    InvalidExplorationConstant { c: f64 },

    /// Constant step size outside `(0, 1]`.
    #[error("invalid step size: {alpha} is not within (0, 1]")]
    InvalidStepSize { alpha: f64 },

    /// Initial value estimate is NaN or infinite.
    #[error("invalid initial value: {value} is not finite")]
    InvalidInitialValue { value: f64 },

    /// A supplied true mean is NaN or infinite.
    #[error("invalid mean for arm {arm}: {value} is not finite")]
    InvalidMean { arm: usize, value: f64 },

    /// Parts of a bandit disagree on the number of arms.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// A simulation needs at least one trial.
    #[error("invalid trial count: at least one trial is required")]
    InvalidTrialCount,

    /// A simulation needs at least one pull per trial.
    #[error("invalid horizon: at least one pull per trial is required")]
    InvalidHorizon,

    /// A configuration key that the chosen strategy does not take.
    #[error("unsupported option: `{option}` does not apply to strategy `{strategy}`")]
    UnsupportedOption {
        strategy: &'static str,
        option: &'static str,
    },

    /// Builder configuration error.
    #[error("builder error: {message}")]
    BuilderError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BanditError::InvalidArmCount { k: 0 };
        assert_eq!(
            err.to_string(),
            "invalid arm count: expected at least one arm, got 0"
        );

        let err = BanditError::InvalidEpsilon { epsilon: 1.5 };
        assert_eq!(err.to_string(), "invalid epsilon: 1.5 is not within [0, 1]");

        let err = BanditError::InvalidExplorationConstant { c: -1.0 };
        assert_eq!(
            err.to_string(),
            "invalid exploration constant: -1 must be finite and positive"
        );

        let err = BanditError::InvalidMean {
            arm: 3,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "invalid mean for arm 3: NaN is not finite");

        let err = BanditError::BuilderError {
            message: "strategy not specified".to_string(),
        };
        assert_eq!(err.to_string(), "builder error: strategy not specified");

        let err = BanditError::UnsupportedOption {
            strategy: "epsilon_greedy",
            option: "c",
        };
        assert_eq!(
            err.to_string(),
            "unsupported option: `c` does not apply to strategy `epsilon_greedy`"
        );
    }
}
