//! Engine configuration.
//!
//! [`NQueensConfig`] holds every parameter that controls the evolutionary
//! loop, including the board dimension.

use super::error::ConfigError;

/// Configuration for the N-Queens genetic algorithm.
///
/// # Defaults
///
/// ```
/// use nqueens_ga::ga::NQueensConfig;
///
/// let config = NQueensConfig::default();
/// assert_eq!(config.dimension, 8);
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.max_generations, 10_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use nqueens_ga::ga::NQueensConfig;
///
/// let config = NQueensConfig::new(12)
///     .with_population_size(200)
///     .with_elite_count(10)
///     .with_elite_crossover_count(40)
///     .with_tournament_size(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NQueensConfig {
    /// Board size N (an N×N board with N queens).
    pub dimension: usize,

    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Generation budget, counting the random generation 0.
    pub max_generations: usize,

    /// Base per-gene mutation probability (0.0–1.0).
    ///
    /// The live rate decays as `mutation_rate * exp(-i / max_generations)`.
    pub mutation_rate: f64,

    /// Base probability of crossing over a pair of parents (0.0–1.0).
    ///
    /// Decays like [`mutation_rate`](Self::mutation_rate).
    pub crossover_rate: f64,

    /// Number of best individuals carried, mutated, into the next generation.
    pub elite_count: usize,

    /// Offspring budget for crossover among elites.
    ///
    /// `elite_crossover_count / 2` pairs are bred, two children each.
    pub elite_crossover_count: usize,

    /// Number of draws per tournament selection.
    pub tournament_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate new individuals in parallel using rayon.
    ///
    /// Only takes effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for NQueensConfig {
    fn default() -> Self {
        Self {
            dimension: 8,
            population_size: 500,
            max_generations: 10_000,
            mutation_rate: 0.0235,
            crossover_rate: 0.85,
            elite_count: 25,
            elite_crossover_count: 125,
            tournament_size: 10,
            seed: None,
            parallel: false,
        }
    }
}

impl NQueensConfig {
    /// Default configuration for an `dimension`×`dimension` board.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Sets the board dimension.
    pub fn with_dimension(mut self, n: usize) -> Self {
        self.dimension = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the base mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the base crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the elite crossover offspring budget.
    pub fn with_elite_crossover_count(mut self, n: usize) -> Self {
        self.elite_crossover_count = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of children bred from elite pairs each generation.
    pub fn elite_offspring(&self) -> usize {
        2 * (self.elite_crossover_count / 2)
    }

    /// Number of children filled in by tournament selection each generation.
    ///
    /// Saturates at zero; [`validate`](Self::validate) rejects configurations
    /// where it would be negative.
    pub fn tournament_offspring(&self) -> usize {
        self.population_size
            .saturating_sub(self.elite_count)
            .saturating_sub(self.elite_offspring())
    }

    /// Live rates for generation `index`: `(mutation, crossover)`.
    ///
    /// Both decay as `base * exp(-index / max_generations)`.
    pub fn rates_at(&self, index: usize) -> (f64, f64) {
        let decay = (-(index as f64) / self.max_generations.max(1) as f64).exp();
        (self.mutation_rate * decay, self.crossover_rate * decay)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.elite_count == 0 {
            return Err(ConfigError::NoElites);
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::TooManyElites {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        let offspring = self.elite_count + self.elite_offspring();
        if offspring > self.population_size {
            return Err(ConfigError::EliteOffspringOverflow {
                offspring,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament);
        }
        if self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentTooLarge {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NQueensConfig::default();
        assert_eq!(config.dimension, 8);
        assert_eq!(config.population_size, 500);
        assert_eq!(config.max_generations, 10_000);
        assert!((config.mutation_rate - 0.0235).abs() < 1e-12);
        assert!((config.crossover_rate - 0.85).abs() < 1e-12);
        assert_eq!(config.elite_count, 25);
        assert_eq!(config.elite_crossover_count, 125);
        assert_eq!(config.tournament_size, 10);
        assert!(config.seed.is_none());
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = NQueensConfig::new(6)
            .with_population_size(100)
            .with_max_generations(300)
            .with_mutation_rate(0.05)
            .with_crossover_rate(0.7)
            .with_elite_count(5)
            .with_elite_crossover_count(20)
            .with_tournament_size(4)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.dimension, 6);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 300);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert!((config.crossover_rate - 0.7).abs() < 1e-12);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.elite_crossover_count, 20);
        assert_eq!(config.tournament_size, 4);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.with_dimension(9).dimension, 9);
    }

    #[test]
    fn test_clamp_rates() {
        let config = NQueensConfig::default()
            .with_mutation_rate(-0.5)
            .with_crossover_rate(2.0);
        assert!((config.mutation_rate - 0.0).abs() < 1e-12);
        assert!((config.crossover_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_offspring_split() {
        let config = NQueensConfig::default();
        assert_eq!(config.elite_offspring(), 124);
        assert_eq!(config.tournament_offspring(), 500 - 25 - 124);
    }

    #[test]
    fn test_rates_decay() {
        let config = NQueensConfig::default().with_max_generations(100);
        let (m0, c0) = config.rates_at(0);
        assert!((m0 - 0.0235).abs() < 1e-12);
        assert!((c0 - 0.85).abs() < 1e-12);

        let (m, c) = config.rates_at(100);
        let e = (-1.0f64).exp();
        assert!((m - 0.0235 * e).abs() < 1e-12);
        assert!((c - 0.85 * e).abs() < 1e-12);
        assert!(config.rates_at(50).0 > m);
    }

    #[test]
    fn test_validate_zero_dimension() {
        let config = NQueensConfig::new(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDimension));
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = NQueensConfig::default().with_population_size(1);
        assert_eq!(config.validate(), Err(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = NQueensConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGenerations));
    }

    #[test]
    fn test_validate_rates() {
        let mut config = NQueensConfig::default();
        config.mutation_rate = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "mutation_rate", .. })
        ));

        let mut config = NQueensConfig::default();
        config.crossover_rate = 5.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "crossover_rate", value: 5.0 })
        );

        let mut config = NQueensConfig::default();
        config.crossover_rate = f64::NEG_INFINITY;
        assert!(config.validate().is_err());

        let mut config = NQueensConfig::default();
        config.mutation_rate = 0.0;
        config.crossover_rate = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_elites() {
        let config = NQueensConfig::default().with_elite_count(0);
        assert_eq!(config.validate(), Err(ConfigError::NoElites));

        let config = NQueensConfig::default()
            .with_population_size(20)
            .with_elite_count(20);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyElites { elite_count: 20, population_size: 20 })
        ));
    }

    #[test]
    fn test_validate_elite_offspring_overflow() {
        let config = NQueensConfig::default()
            .with_population_size(50)
            .with_elite_count(10);
        // 10 + 124 > 50
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EliteOffspringOverflow { offspring: 134, .. })
        ));
    }

    #[test]
    fn test_validate_tournament() {
        let config = NQueensConfig::default().with_tournament_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTournament));

        let config = NQueensConfig::default().with_tournament_size(501);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TournamentTooLarge { .. })
        ));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let err = NQueensConfig::default()
            .with_population_size(20)
            .with_elite_count(25)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "elite_count (25) must be lower than population_size (20)"
        );
    }
}
