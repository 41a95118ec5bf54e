use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    reels::generate,
    rng::ProvablyFairRng,
    symbols::{Grid, Symbol, COLS, ROWS},
};

/// A payline that paid out: its row index and the symbol filling it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineWin {
    pub line: usize,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinOutcome {
    pub reels: Grid, // column-major, as drawn
    pub rows: Grid,  // row-major, as evaluated
    pub wins: Vec<LineWin>,
    pub winnings: u64,
}

/// Column-major reels to row-major paylines: `out[r][c] = reels[c][r]`.
pub fn transpose(grid: &Grid) -> Grid {
    let mut out = [[Symbol::A; COLS]; ROWS];
    for (c, column) in grid.iter().enumerate() {
        for (r, &symbol) in column.iter().enumerate() {
            out[r][c] = symbol;
        }
    }
    out
}

/// Active lines are always the leading `lines` rows; there are no diagonal
/// or zig-zag paylines. Rows past the grid are ignored.
pub fn winning_lines(rows: &Grid, lines: usize) -> Vec<LineWin> {
    rows.iter()
        .take(lines)
        .enumerate()
        .filter_map(|(line, row)| {
            let first = row[0];
            row.iter()
                .all(|&s| s == first)
                .then_some(LineWin { line, symbol: first })
        })
        .collect()
}

fn line_payout(wins: &[LineWin], bet: u64) -> u64 {
    wins.iter().map(|w| bet * w.symbol.value()).sum()
}

/// Total payout for `bet` per line over the active rows of a row-major grid.
pub fn evaluate(rows: &Grid, bet: u64, lines: usize) -> u64 {
    line_payout(&winning_lines(rows, lines), bet)
}

pub fn spin_once<R: Rng + ?Sized>(rng: &mut R, bet: u64, lines: usize) -> SpinOutcome {
    let reels = generate(rng);
    let rows = transpose(&reels);
    let wins = winning_lines(&rows, lines);
    let winnings = line_payout(&wins, bet);
    SpinOutcome {
        reels,
        rows,
        wins,
        winnings,
    }
}

/// Convenience: perform a spin drawing from the provably-fair stream for these seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    bet: u64,
    lines: usize,
) -> SpinOutcome {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    spin_once(&mut rng.stream(), bet, lines)
}

/// Verify that a given column-major reel grid matches what the seeds would produce.
pub fn verify_reels(server_seed: &str, client_seed: &str, nonce: u64, expected: &Grid) -> bool {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    generate(&mut rng.stream()) == *expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol::*;

    #[test]
    fn test_spin_deterministic() {
        let out1 = spin_with_seeds("server", "client", 1, 1, 3);
        let out2 = spin_with_seeds("server", "client", 1, 1, 3);
        assert_eq!(out1, out2);
        assert_eq!(out1.rows, transpose(&out1.reels));
        assert_eq!(out1.winnings, evaluate(&out1.rows, 1, 3));
    }

    #[test]
    fn spin_winnings_agree_with_evaluate() {
        for nonce in 0..2_000 {
            for lines in 1..=3 {
                let out = spin_with_seeds("server", "client", nonce, 7, lines);
                assert_eq!(out.winnings, evaluate(&out.rows, 7, lines));
                assert_eq!(out.wins, winning_lines(&out.rows, lines));
            }
        }
    }

    #[test]
    fn verify_accepts_own_reels() {
        let out = spin_with_seeds("server", "client", 5, 1, 1);
        assert!(verify_reels("server", "client", 5, &out.reels));

        let mut tampered = out.reels;
        tampered[1][2] = if tampered[1][2] == D { A } else { D };
        assert!(!verify_reels("server", "client", 5, &tampered));
    }

    #[test]
    fn transpose_fixed_example() {
        let reels = [[A, B, C], [D, A, B], [C, D, A]];
        assert_eq!(transpose(&reels), [[A, D, C], [B, A, D], [C, B, A]]);
    }

    #[test]
    fn winning_lines_reports_each_paying_row() {
        let rows = [[D, D, D], [A, B, A], [C, C, C]];
        assert_eq!(
            winning_lines(&rows, 3),
            vec![
                LineWin { line: 0, symbol: D },
                LineWin { line: 2, symbol: C },
            ]
        );
        assert_eq!(winning_lines(&rows, 2), vec![LineWin { line: 0, symbol: D }]);
    }

    #[test]
    fn evaluate_examples() {
        assert_eq!(evaluate(&[[A, A, A], [B, B, B], [C, D, C]], 10, 2), 90);
        assert_eq!(evaluate(&[[A, B, C], [D, A, B], [C, D, A]], 10, 3), 0);
        assert_eq!(evaluate(&[[D, D, D], [D, D, D], [D, D, D]], 7, 3), 42);
    }

    #[test]
    fn lines_beyond_grid_are_ignored() {
        let rows = [[A, A, A], [B, B, B], [C, C, C]];
        assert_eq!(evaluate(&rows, 1, 10), evaluate(&rows, 1, 3));
    }
}
