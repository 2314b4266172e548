//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds every parameter of the engine and the solver
//! loop.

use super::mutation::{MutationFallback, SwapMutation};
use super::selection::TournamentWindow;
use crate::error::{Result, TspError};

/// Configuration for the evolution engine and solver.
///
/// # Defaults
///
/// ```
/// use u_tsp_ga::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.tournament_size, 5);
/// assert!(config.elitism);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp_ga::ga::{EvolutionConfig, MutationFallback, TournamentWindow};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(100)
///     .with_tournament_size(7)
///     .with_tournament_window(TournamentWindow::Redraw)
///     .with_mutation_rate(0.05)
///     .with_mutation_fallback(MutationFallback::Fail)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionConfig {
    /// Number of tours per generation. Constant for the whole run.
    pub population_size: usize,

    /// Per-position probability of a swap mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of contiguous tours sampled by each tournament.
    pub tournament_size: usize,

    /// What a tournament window does when it runs past the last slot.
    pub tournament_window: TournamentWindow,

    /// Whether the fittest tour is carried unchanged into slot 0.
    pub elitism: bool,

    /// Swaps tried per mutated position before the fallback applies.
    pub max_mutation_attempts: usize,

    /// Outcome for a position whose retry budget ran out.
    pub mutation_fallback: MutationFallback,

    /// Number of generations the solver runs.
    pub max_generations: usize,

    /// Generations without a new best distance before the solver stops.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            mutation_rate: 0.02,
            tournament_size: 5,
            tournament_window: TournamentWindow::default(),
            elitism: true,
            max_mutation_attempts: 1000,
            mutation_fallback: MutationFallback::default(),
            max_generations: 100,
            stagnation_limit: 0,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the tournament window policy.
    pub fn with_tournament_window(mut self, window: TournamentWindow) -> Self {
        self.tournament_window = window;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the mutation retry budget.
    pub fn with_max_mutation_attempts(mut self, n: usize) -> Self {
        self.max_mutation_attempts = n;
        self
    }

    /// Sets the mutation fallback.
    pub fn with_mutation_fallback(mut self, fallback: MutationFallback) -> Self {
        self.mutation_fallback = fallback;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The mutation operator described by this configuration.
    pub fn swap_mutation(&self) -> SwapMutation {
        SwapMutation::new(
            self.mutation_rate,
            self.max_mutation_attempts,
            self.mutation_fallback,
        )
    }

    /// Validates the configuration.
    ///
    /// Returns `InvalidConfiguration` describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::invalid("population_size must be at least 1"));
        }
        if self.tournament_size == 0 {
            return Err(TspError::invalid("tournament_size must be at least 1"));
        }
        if self.tournament_size > self.population_size {
            return Err(TspError::invalid(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid("mutation_rate must be within [0, 1]"));
        }
        if self.max_mutation_attempts == 0 {
            return Err(TspError::invalid("max_mutation_attempts must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(TspError::invalid("max_generations must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 50);
        assert!((config.mutation_rate - 0.02).abs() < 1e-15);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.tournament_window, TournamentWindow::Wrap);
        assert!(config.elitism);
        assert_eq!(config.max_mutation_attempts, 1000);
        assert_eq!(config.mutation_fallback, MutationFallback::Revert);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(200)
            .with_mutation_rate(0.1)
            .with_tournament_size(10)
            .with_tournament_window(TournamentWindow::Redraw)
            .with_elitism(false)
            .with_max_mutation_attempts(50)
            .with_mutation_fallback(MutationFallback::Accept)
            .with_max_generations(1000)
            .with_stagnation_limit(25)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert!((config.mutation_rate - 0.1).abs() < 1e-15);
        assert_eq!(config.tournament_size, 10);
        assert_eq!(config.tournament_window, TournamentWindow::Redraw);
        assert!(!config.elitism);
        assert_eq!(config.max_mutation_attempts, 50);
        assert_eq!(config.mutation_fallback, MutationFallback::Accept);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.stagnation_limit, 25);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_mutation_rate() {
        assert_eq!(EvolutionConfig::default().with_mutation_rate(2.0).mutation_rate, 1.0);
        assert_eq!(EvolutionConfig::default().with_mutation_rate(-1.0).mutation_rate, 0.0);
    }

    #[test]
    fn test_validate_empty_population() {
        let config = EvolutionConfig::default().with_population_size(0);
        assert!(matches!(
            config.validate(),
            Err(TspError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_tournament_larger_than_population() {
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_tournament_size(5);
        assert!(config.validate().is_err());

        let config = config.with_tournament_size(4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = EvolutionConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rate_set_directly() {
        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_attempts_and_generations() {
        assert!(EvolutionConfig::default()
            .with_max_mutation_attempts(0)
            .validate()
            .is_err());
        assert!(EvolutionConfig::default()
            .with_max_generations(0)
            .validate()
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_partial_document() {
        let config: EvolutionConfig = serde_json::from_str(
            r#"{ "population_size": 80, "tournament_window": "Redraw", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.population_size, 80);
        assert_eq!(config.tournament_window, TournamentWindow::Redraw);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tournament_size, 5);
    }
}
