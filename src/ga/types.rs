//! Board encoding and fitness evaluation.
//!
//! A board is encoded as one column index per row, so two queens can never
//! share a row. Only column and diagonal conflicts remain to be scored.

/// Board encoding: `board[row] == column` of the queen placed in `row`.
///
/// Every value is in `0..board.len()`.
pub type Board = Vec<usize>;

/// A candidate board together with its cached fitness.
///
/// Individuals are never mutated once created; crossover and mutation
/// always produce new boards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual {
    board: Board,
    fitness: f64,
}

impl Individual {
    /// Evaluates `board` and wraps it with its fitness.
    pub fn new(board: Board) -> Self {
        let fitness = fitness(&board);
        Self { board, fitness }
    }

    /// Builds an individual from a board whose fitness is already known.
    #[cfg(feature = "parallel")]
    pub(crate) fn with_fitness(board: Board, fitness: f64) -> Self {
        Self { board, fitness }
    }

    /// The column of the queen in each row.
    pub fn board(&self) -> &[usize] {
        &self.board
    }

    /// Cached conflict score. Lower is better, `0.0` is a solution.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns `true` if no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.fitness == 0.0
    }

    /// Consumes the individual, returning its board.
    pub fn into_board(self) -> Board {
        self.board
    }
}

/// Counts pairwise queen conflicts on `board`.
///
/// For every pair of rows `r1 < r2`, one point is added when both queens
/// sit in the same column and one more, independently, when they share a
/// diagonal (`|r1 - r2| == |c1 - c2|`). A pair that satisfies both
/// conditions therefore scores 2.
///
/// Returns `0.0` exactly when the board is a solution.
///
/// # Complexity
/// O(n²)
pub fn fitness(board: &[usize]) -> f64 {
    let n = board.len();
    let mut conflicts = 0u64;
    for r1 in 0..n {
        for r2 in (r1 + 1)..n {
            let (c1, c2) = (board[r1], board[r2]);
            if c1 == c2 {
                conflicts += 1;
            }
            if r2 - r1 == c1.abs_diff(c2) {
                conflicts += 1;
            }
        }
    }
    conflicts as f64
}

/// Renders `board` as a text grid, `Q` for a queen and `.` for an empty
/// square, one line per row.
pub fn render_board(board: &[usize]) -> String {
    let n = board.len();
    let mut out = String::with_capacity(n * (2 * n + 1));
    for &col in board {
        for c in 0..n {
            if c > 0 {
                out.push(' ');
            }
            out.push(if c == col { 'Q' } else { '.' });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Brute-force reference counting over ordered row pairs.
    fn reference_conflicts(board: &[usize]) -> f64 {
        let mut total = 0.0;
        for r1 in 0..board.len() {
            for r2 in 0..board.len() {
                if r1 >= r2 {
                    continue;
                }
                let dr = (r2 as i64 - r1 as i64).abs();
                let dc = (board[r2] as i64 - board[r1] as i64).abs();
                if dc == 0 {
                    total += 1.0;
                }
                if dr == dc {
                    total += 1.0;
                }
            }
        }
        total
    }

    #[test]
    fn test_single_queen() {
        assert_eq!(fitness(&[0]), 0.0);
    }

    #[test]
    fn test_two_queens_exhaustive() {
        // Same column: one point. Adjacent columns: diagonal, one point.
        assert_eq!(fitness(&[0, 0]), 1.0);
        assert_eq!(fitness(&[1, 1]), 1.0);
        assert_eq!(fitness(&[0, 1]), 1.0);
        assert_eq!(fitness(&[1, 0]), 1.0);
    }

    #[test]
    fn test_all_same_column() {
        // Every pair shares a column; adjacent rows are never also diagonal.
        let board = vec![2; 4];
        assert_eq!(fitness(&board), 6.0);
    }

    #[test]
    fn test_main_diagonal() {
        // All 6 pairs on one diagonal.
        assert_eq!(fitness(&[0, 1, 2, 3]), 6.0);
    }

    #[test]
    fn test_known_solutions() {
        assert_eq!(fitness(&[1, 3, 0, 2]), 0.0);
        assert_eq!(fitness(&[2, 0, 3, 1]), 0.0);
        assert_eq!(fitness(&[0, 4, 7, 5, 2, 6, 1, 3]), 0.0);
    }

    #[test]
    fn test_individual_caches_fitness() {
        let ind = Individual::new(vec![0, 1, 2, 3]);
        assert_eq!(ind.fitness(), 6.0);
        assert!(!ind.is_solution());
        assert!(Individual::new(vec![1, 3, 0, 2]).is_solution());
    }

    #[test]
    fn test_render_board() {
        assert_eq!(render_board(&[1, 0]), ". Q\nQ .\n");
        assert_eq!(render_board(&[]), "");
    }

    proptest! {
        #[test]
        fn prop_matches_reference(board in (1usize..9).prop_flat_map(|n| prop::collection::vec(0..n, n))) {
            prop_assert_eq!(fitness(&board), reference_conflicts(&board));
        }

        #[test]
        fn prop_permutation_without_diagonals_is_solution(perm in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle()) {
            let diagonal_free = (0..perm.len()).all(|r1| {
                ((r1 + 1)..perm.len()).all(|r2| r2 - r1 != perm[r1].abs_diff(perm[r2]))
            });
            prop_assert_eq!(fitness(&perm) == 0.0, diagonal_free);
        }
    }
}
