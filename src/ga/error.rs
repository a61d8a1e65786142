//! Error types for the N-Queens engine.

/// Invalid [`NQueensConfig`](super::NQueensConfig) parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("dimension must be at least 1")]
    ZeroDimension,
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error("elite_count must be at least 1")]
    NoElites,
    #[error("elite_count ({elite_count}) must be lower than population_size ({population_size})")]
    TooManyElites {
        elite_count: usize,
        population_size: usize,
    },
    #[error(
        "elites plus elite crossover offspring ({offspring}) exceed population_size ({population_size})"
    )]
    EliteOffspringOverflow {
        offspring: usize,
        population_size: usize,
    },
    #[error("{name} must be a finite value in [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("tournament_size must be at least 1")]
    ZeroTournament,
    #[error("tournament_size ({tournament_size}) exceeds population_size ({population_size})")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },
}

/// Errors from reading the published generation history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("generation {index} out of range: {count} published")]
    OutOfRange { index: usize, count: usize },
}
