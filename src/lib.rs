//! N-Queens solver built on a genetic algorithm.
//!
//! Places N queens on an N×N board so that no two attack each other,
//! using elitism, single-point crossover, per-gene mutation and
//! tournament selection with exponentially decaying rates.
//!
//! The run loop is designed to be observed: it appends each finished
//! generation to a lock-guarded history that a renderer or any other
//! consumer can read from another thread while the search continues.
//!
//! ```
//! use nqueens_ga::ga::{fitness, Engine, NQueensConfig};
//!
//! let config = NQueensConfig::new(5)
//!     .with_population_size(60)
//!     .with_elite_count(6)
//!     .with_elite_crossover_count(12)
//!     .with_tournament_size(4)
//!     .with_max_generations(500)
//!     .with_seed(1);
//! let engine = Engine::new(config).unwrap();
//! let outcome = engine.run();
//!
//! if outcome.converged {
//!     let board = engine.best_solution().unwrap();
//!     assert_eq!(fitness(&board), 0.0);
//! }
//! ```

pub mod ga;
