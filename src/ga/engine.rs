//! The N-Queens evolutionary loop and its shared generation history.
//!
//! [`Engine`] runs the generational loop (seed → evolve → converge or
//! exhaust) and appends every finished [`Generation`] to a history that
//! other threads can read while the run is in progress.
//!
//! # Locking
//!
//! One mutex guards the history, the phase and the live rates. The run
//! loop holds it only to append a generation or to take an `Arc` to the
//! previous one; ranking, breeding and evaluation all happen outside it.
//! Published generations are never modified, so readers get cheap shared
//! snapshots.

use super::config::NQueensConfig;
use super::error::{ConfigError, HistoryError};
use super::generation::Generation;
use super::operators::{crossover, mutate, random_board};
use super::types::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tracing::instrument;

/// Where the run loop is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Created, not started.
    Idle,
    /// Building the random generation 0.
    Seeding,
    /// Breeding generations 1 and later.
    Evolving,
    /// A conflict-free board was found.
    Converged,
    /// The generation budget ran out without a solution.
    Exhausted,
}

impl Phase {
    /// Returns `true` for [`Converged`](Phase::Converged) and
    /// [`Exhausted`](Phase::Exhausted).
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Converged | Phase::Exhausted)
    }
}

/// Summary of a finished (or in-progress) run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Whether a conflict-free board was found.
    pub converged: bool,

    /// Number of published generations.
    pub generations: usize,

    /// Best fitness of the last published generation.
    pub best_fitness: f64,
}

/// State shared between the run loop and readers.
#[derive(Debug)]
struct History {
    generations: Vec<Arc<Generation>>,
    phase: Phase,
    mutation_rate: f64,
    crossover_rate: f64,
}

impl History {
    fn outcome(&self) -> RunOutcome {
        RunOutcome {
            converged: self.phase == Phase::Converged,
            generations: self.generations.len(),
            best_fitness: self
                .generations
                .last()
                .map_or(f64::INFINITY, |gen| gen.best_fitness()),
        }
    }
}

/// Genetic algorithm solving the N-Queens problem.
///
/// The engine is single-use: one run per instance. Readers may poll
/// [`generation_count`](Self::generation_count) and
/// [`generation`](Self::generation) from any thread while the run is in
/// progress.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use nqueens_ga::ga::{Engine, NQueensConfig};
///
/// let config = NQueensConfig::new(4)
///     .with_population_size(50)
///     .with_elite_count(5)
///     .with_elite_crossover_count(10)
///     .with_tournament_size(3)
///     .with_max_generations(200)
///     .with_seed(7);
/// let engine = Arc::new(Engine::new(config).unwrap());
///
/// let handle = engine.start();
/// let outcome = handle.join().unwrap();
/// assert!(engine.is_finished());
/// assert_eq!(outcome.generations, engine.generation_count());
/// ```
#[derive(Debug)]
pub struct Engine {
    config: NQueensConfig,
    state: Mutex<History>,
}

impl Engine {
    /// Creates an engine after validating `config`.
    pub fn new(config: NQueensConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = History {
            generations: Vec::with_capacity(config.max_generations.min(1024)),
            phase: Phase::Idle,
            mutation_rate: config.mutation_rate,
            crossover_rate: config.crossover_rate,
        };
        Ok(Self {
            config,
            state: Mutex::new(state),
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &NQueensConfig {
        &self.config
    }

    /// Runs the loop on a new thread and returns immediately.
    ///
    /// The returned handle should be joined by the host before shutdown.
    /// There is no way to stop the run early.
    pub fn start(self: &Arc<Self>) -> JoinHandle<RunOutcome> {
        let engine = Arc::clone(self);
        std::thread::spawn(move || engine.run())
    }

    /// Runs the loop on the current thread until it converges or exhausts
    /// the generation budget.
    ///
    /// Uses [`seed`](NQueensConfig::seed) when set, otherwise entropy.
    pub fn run(&self) -> RunOutcome {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs the loop drawing all randomness from `rng`.
    ///
    /// An engine runs only once. Calling this again, or while another
    /// thread is running it, returns the current outcome without doing
    /// any work.
    #[instrument(level = "debug", skip(self, rng), fields(dimension = self.config.dimension))]
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> RunOutcome {
        {
            let mut state = self.lock();
            if state.phase != Phase::Idle {
                return state.outcome();
            }
            state.phase = Phase::Seeding;
        }

        let config = &self.config;
        tracing::info!(
            dimension = config.dimension,
            population = config.population_size,
            max_generations = config.max_generations,
            "Starting N-Queens run"
        );

        let mut first = Generation::new(0, config.mutation_rate, config.crossover_rate);
        let boards = (0..config.population_size)
            .map(|_| random_board(config.dimension, rng))
            .collect();
        first.add_boards(boards, config.parallel);
        let mut phase = self.publish(first, 0, config.mutation_rate, config.crossover_rate);

        let mut index = 1;
        while !phase.is_terminal() {
            let (mutation_rate, crossover_rate) = config.rates_at(index);
            let previous = {
                let mut state = self.lock();
                state.mutation_rate = mutation_rate;
                state.crossover_rate = crossover_rate;
                state.generations.last().map(Arc::clone)
            };
            let Some(previous) = previous else {
                break;
            };

            let mut next = Generation::new(index, mutation_rate, crossover_rate);
            next.add_boards(
                self.breed(&previous, mutation_rate, crossover_rate, rng),
                config.parallel,
            );
            phase = self.publish(next, index, mutation_rate, crossover_rate);
            index += 1;
        }

        let outcome = self.lock().outcome();
        if outcome.converged {
            tracing::info!(generation = outcome.generations - 1, "Solution found");
        } else {
            tracing::info!(
                generations = outcome.generations,
                best_fitness = outcome.best_fitness,
                "Generation budget exhausted without a solution"
            );
        }
        outcome
    }

    /// Builds the boards of the generation following `previous`.
    ///
    /// Mutated elites come first, then mutated children of random elite
    /// pairs, then mutated children of tournament winners until the
    /// population is full.
    fn breed<R: Rng>(
        &self,
        previous: &Generation,
        mutation_rate: f64,
        crossover_rate: f64,
        rng: &mut R,
    ) -> Vec<Board> {
        let config = &self.config;
        let mut boards = Vec::with_capacity(config.population_size);

        let elites = previous.ranked_top(config.elite_count);
        boards.extend(elites.iter().map(|elite| mutate(elite, mutation_rate, rng)));

        if !elites.is_empty() {
            for _ in 0..config.elite_crossover_count / 2 {
                let a = &elites[rng.random_range(0..elites.len())];
                let b = &elites[rng.random_range(0..elites.len())];
                let (c1, c2) = crossover(a, b, crossover_rate, rng);
                boards.push(mutate(&c1, mutation_rate, rng));
                boards.push(mutate(&c2, mutation_rate, rng));
            }
        }

        while boards.len() < config.population_size {
            let a = previous.tournament_select(config.tournament_size, rng);
            let b = previous.tournament_select(config.tournament_size, rng);
            let (c1, c2) = crossover(&a, &b, crossover_rate, rng);
            boards.push(mutate(&c1, mutation_rate, rng));
            if boards.len() < config.population_size {
                boards.push(mutate(&c2, mutation_rate, rng));
            }
        }

        boards
    }

    /// Appends `generation` and moves to the phase it implies, in one
    /// critical section.
    fn publish(
        &self,
        generation: Generation,
        index: usize,
        mutation_rate: f64,
        crossover_rate: f64,
    ) -> Phase {
        let best = generation.best_fitness();
        let average = generation.average_fitness();
        let phase = if best == 0.0 {
            Phase::Converged
        } else if index + 1 >= self.config.max_generations {
            Phase::Exhausted
        } else {
            Phase::Evolving
        };

        {
            let mut state = self.lock();
            state.generations.push(Arc::new(generation));
            state.phase = phase;
        }

        tracing::debug!(
            generation = index,
            best_fitness = best,
            average_fitness = average,
            mutation_rate,
            crossover_rate,
            "Published generation"
        );
        phase
    }

    /// Number of published generations.
    pub fn generation_count(&self) -> usize {
        self.lock().generations.len()
    }

    /// Snapshot of generation `index`.
    ///
    /// Fails with [`HistoryError::OutOfRange`] if it is not published yet.
    pub fn generation(&self, index: usize) -> Result<Arc<Generation>, HistoryError> {
        let state = self.lock();
        state
            .generations
            .get(index)
            .map(Arc::clone)
            .ok_or(HistoryError::OutOfRange {
                index,
                count: state.generations.len(),
            })
    }

    /// Most recently published generation.
    pub fn latest(&self) -> Option<Arc<Generation>> {
        self.lock().generations.last().map(Arc::clone)
    }

    /// Best board of the most recent generation.
    ///
    /// Once the run has converged this is a solution.
    pub fn best_solution(&self) -> Option<Board> {
        self.latest()?.best().map(|ind| ind.board().to_vec())
    }

    /// Returns `true` once the run has converged or exhausted its budget.
    pub fn is_finished(&self) -> bool {
        self.lock().phase.is_terminal()
    }

    /// Current life-cycle phase.
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Rates in effect for the generation being bred: `(mutation, crossover)`.
    pub fn live_rates(&self) -> (f64, f64) {
        let state = self.lock();
        (state.mutation_rate, state.crossover_rate)
    }

    /// Outcome so far; final once [`is_finished`](Self::is_finished).
    pub fn outcome(&self) -> RunOutcome {
        self.lock().outcome()
    }

    fn lock(&self) -> MutexGuard<'_, History> {
        // Published data is append-only, so a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Generation history lock was poisoned");
            poisoned.into_inner()
        })
    }
}
