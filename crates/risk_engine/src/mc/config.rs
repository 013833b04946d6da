//! Simulation configuration.

use super::error::SimulationError;

/// Default number of Monte Carlo trials.
pub const DEFAULT_TRIALS: usize = 1_000;

/// Maximum number of trials allowed.
pub const MAX_TRIALS: usize = 1_000_000;

/// Immutable Monte Carlo configuration.
///
/// Use [`SimulationConfig::builder`] to construct instances; the default
/// configuration runs [`DEFAULT_TRIALS`] trials from seed 0.
///
/// # Examples
///
/// ```
/// use risk_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_trials(10_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    n_trials: usize,
    seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_trials: DEFAULT_TRIALS,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of trials per simulation call.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Optional base seed for reproducibility.
    ///
    /// Trials run on sub-streams seeded `base + trial_index`, so a fixed
    /// seed reproduces results bit-for-bit across thread counts. An unset
    /// seed falls back to 0.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidTrialCount` if `n_trials` is 0 or
    /// exceeds [`MAX_TRIALS`].
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(SimulationError::InvalidTrialCount(self.n_trials));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`] with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_trials: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of trials in [1, [`MAX_TRIALS`]].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidTrialCount` for an out-of-range
    /// trial count.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        let config = SimulationConfig {
            n_trials: self.n_trials.unwrap_or(DEFAULT_TRIALS),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
