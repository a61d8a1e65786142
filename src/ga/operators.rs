//! Genetic operators for N-Queens boards.
//!
//! Boards are column-per-row vectors (see [`Board`]), not permutations:
//! any value in `0..n` is allowed in any row, so operators never need a
//! repair step.
//!
//! # Crossover
//!
//! - [`crossover`]: single-point crossover applied with a given probability
//! - [`crossover_at`]: deterministic single-point crossover at a fixed cut
//!
//! # Mutation
//!
//! - [`mutate`]: per-gene uniform reset
//! - [`random_board`]: a fresh uniformly random board

use super::types::Board;
use rand::Rng;

/// A board with every row's column drawn uniformly from `0..n`.
pub fn random_board<R: Rng>(n: usize, rng: &mut R) -> Board {
    (0..n).map(|_| rng.random_range(0..n)).collect()
}

/// Single-point crossover at cut `cut`.
///
/// `child1 = a[..cut] + b[cut..]`, `child2 = b[..cut] + a[cut..]`.
/// Every row of a child comes from exactly one parent, and the two
/// children together hold exactly the genes of both parents.
///
/// # Panics
/// Panics if the parents differ in length or `cut > a.len()`.
pub fn crossover_at(a: &[usize], b: &[usize], cut: usize) -> (Board, Board) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    assert!(cut <= a.len(), "cut point out of range");

    let mut child1 = Vec::with_capacity(a.len());
    child1.extend_from_slice(&a[..cut]);
    child1.extend_from_slice(&b[cut..]);

    let mut child2 = Vec::with_capacity(b.len());
    child2.extend_from_slice(&b[..cut]);
    child2.extend_from_slice(&a[cut..]);

    (child1, child2)
}

/// Single-point crossover performed with probability `rate`.
///
/// When crossover happens, the cut is drawn uniformly from `0..n`. When it
/// does not, both children are verbatim copies of the parents. The decision
/// is made once for the whole board, not per gene.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn crossover<R: Rng>(a: &[usize], b: &[usize], rate: f64, rng: &mut R) -> (Board, Board) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");

    if a.is_empty() || !rng.random_bool(rate.clamp(0.0, 1.0)) {
        return (a.to_vec(), b.to_vec());
    }
    let cut = rng.random_range(0..a.len());
    crossover_at(a, b, cut)
}

/// Returns a copy of `board` where each gene is independently replaced,
/// with probability `rate`, by a uniform draw from `0..n`.
///
/// The draw may reproduce the original value.
pub fn mutate<R: Rng>(board: &[usize], rate: f64, rng: &mut R) -> Board {
    let n = board.len();
    let rate = rate.clamp(0.0, 1.0);
    board
        .iter()
        .map(|&gene| {
            if rng.random_bool(rate) {
                rng.random_range(0..n)
            } else {
                gene
            }
        })
        .collect()
}
