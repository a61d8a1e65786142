//! Genetic algorithm for the N-Queens problem.
//!
//! Each board row holds exactly one queen, so a candidate solution is a
//! vector of column indices ([`Board`]). The [`Engine`] evolves a
//! population of boards until one is conflict-free or the generation
//! budget runs out, publishing every [`Generation`] to a history that
//! other threads can poll while the run is in progress.
//!
//! # Key Types
//!
//! - [`NQueensConfig`]: Algorithm parameters (board size, population, rates)
//! - [`Engine`]: Runs the evolutionary loop and owns the shared history
//! - [`Generation`]: Frozen population with ranking and tournament selection
//! - [`Individual`]: A board with its cached fitness
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and per-gene reset mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Crawford (1992), "Solving the n-queens problem using genetic algorithms"

mod config;
mod engine;
mod error;
mod generation;
pub mod operators;
mod types;

pub use config::NQueensConfig;
pub use engine::{Engine, Phase, RunOutcome};
pub use error::{ConfigError, HistoryError};
pub use generation::Generation;
pub use types::{fitness, render_board, Board, Individual};
