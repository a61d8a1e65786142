//! One evolutionary step's population.
//!
//! A [`Generation`] is filled by the engine, then published and never
//! changed again. Ranking is computed lazily on the first query and
//! memoized, so read-only snapshots can be shared between threads.

use super::types::{Board, Individual};
use rand::Rng;
use std::sync::OnceLock;

#[cfg(feature = "parallel")]
use super::types::fitness;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Population produced at one step of the search.
///
/// Individuals are kept in insertion order. The fitness ranking is a
/// separate, cached permutation, so [`individuals`](Self::individuals)
/// always reflects insertion order.
#[derive(Debug, Clone)]
pub struct Generation {
    index: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    individuals: Vec<Individual>,
    ranking: OnceLock<Vec<usize>>,
}

impl Generation {
    /// Creates an empty generation stamped with the rates in effect
    /// when it is produced.
    pub fn new(index: usize, mutation_rate: f64, crossover_rate: f64) -> Self {
        Self {
            index,
            mutation_rate,
            crossover_rate,
            individuals: Vec::new(),
            ranking: OnceLock::new(),
        }
    }

    /// Evaluates `board` and appends it.
    pub fn add_individual(&mut self, board: Board) {
        self.individuals.push(Individual::new(board));
        self.ranking = OnceLock::new();
    }

    /// Evaluates and appends a batch of boards, keeping their order.
    ///
    /// With `parallel` set and the `parallel` feature enabled, fitness is
    /// computed with rayon.
    pub fn add_boards(&mut self, boards: Vec<Board>, parallel: bool) {
        let evaluated: Vec<Individual> = if parallel {
            evaluate_parallel(boards)
        } else {
            boards.into_iter().map(Individual::new).collect()
        };
        self.individuals.extend(evaluated);
        self.ranking = OnceLock::new();
    }

    /// Position of this generation in the run, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Mutation rate in effect when this generation was produced.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Crossover rate in effect when this generation was produced.
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the generation holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Individuals in insertion order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns the `n` best boards, best first.
    ///
    /// Ties keep insertion order. Returns an empty `Vec` when `n` exceeds
    /// the population size.
    pub fn ranked_top(&self, n: usize) -> Vec<Board> {
        if n > self.individuals.len() {
            return Vec::new();
        }
        self.ranking()[..n]
            .iter()
            .map(|&i| self.individuals[i].board().to_vec())
            .collect()
    }

    /// Best individual, or `None` for an empty generation.
    pub fn best(&self) -> Option<&Individual> {
        self.ranking().first().map(|&i| &self.individuals[i])
    }

    /// Arithmetic mean of all fitness values.
    ///
    /// Returns `f64::INFINITY` for an empty generation.
    pub fn average_fitness(&self) -> f64 {
        if self.individuals.is_empty() {
            return f64::INFINITY;
        }
        let sum: f64 = self.individuals.iter().map(Individual::fitness).sum();
        sum / self.individuals.len() as f64
    }

    /// Lowest fitness value.
    ///
    /// Returns `f64::INFINITY` for an empty generation.
    pub fn best_fitness(&self) -> f64 {
        self.individuals
            .iter()
            .map(Individual::fitness)
            .fold(f64::INFINITY, f64::min)
    }

    /// Tournament selection: draws `n` individuals uniformly with
    /// replacement and returns the board of the fittest. The first drawn
    /// wins ties.
    ///
    /// `n == 0` behaves like `n == 1`. Returns an empty board when the
    /// generation is empty.
    ///
    /// # Complexity
    /// O(n) per selection
    pub fn tournament_select<R: Rng>(&self, n: usize, rng: &mut R) -> Board {
        let len = self.individuals.len();
        if len == 0 {
            return Vec::new();
        }

        let mut best_idx = rng.random_range(0..len);
        for _ in 1..n.max(1) {
            let idx = rng.random_range(0..len);
            if self.individuals[idx].fitness() < self.individuals[best_idx].fitness() {
                best_idx = idx;
            }
        }
        self.individuals[best_idx].board().to_vec()
    }

    /// Indices into `individuals`, sorted ascending by fitness.
    fn ranking(&self) -> &[usize] {
        self.ranking.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.individuals.len()).collect();
            // `sort_by` is stable: equal fitness keeps insertion order.
            order.sort_by(|&a, &b| {
                self.individuals[a]
                    .fitness()
                    .partial_cmp(&self.individuals[b].fitness())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            order
        })
    }

    #[cfg(test)]
    fn is_ranked(&self) -> bool {
        self.ranking.get().is_some()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(boards: Vec<Board>) -> Vec<Individual> {
    boards
        .into_par_iter()
        .map(|board| {
            let f = fitness(&board);
            Individual::with_fitness(board, f)
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(boards: Vec<Board>) -> Vec<Individual> {
    boards.into_iter().map(Individual::new).collect()
}
