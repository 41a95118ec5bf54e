use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reelspin_core::{
    evaluate, generate, line_hit_probability, spin_once, spin_with_seeds, theoretical_rtp,
    transpose, Grid, ProvablyFairRng, Symbol, COLS, ROWS,
};

fn sample_grids(n: usize, seed: u64) -> Vec<Grid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| generate(&mut rng)).collect()
}

#[test]
fn generated_grid_shape() {
    for reels in sample_grids(200, 1) {
        assert_eq!(reels.len(), COLS);
        for reel in reels {
            assert_eq!(reel.len(), ROWS);
            for s in reel {
                assert!(Symbol::ALL.contains(&s));
            }
        }
    }
}

#[test]
fn never_three_a_in_one_reel() {
    for reels in sample_grids(20_000, 2) {
        for reel in reels {
            assert!(reel.iter().filter(|&&s| s == Symbol::A).count() <= 2);
        }
    }
}

#[test]
fn symbol_frequencies_track_weights() {
    let grids = sample_grids(30_000, 3);
    let cells = (grids.len() * ROWS * COLS) as f64;
    for s in Symbol::ALL {
        let seen = grids
            .iter()
            .flat_map(|g| g.iter().flatten())
            .filter(|&&x| x == s)
            .count() as f64;
        let expected = f64::from(s.weight()) / 20.0;
        assert!(
            (seen / cells - expected).abs() < 0.01,
            "{s}: observed {} expected {expected}",
            seen / cells
        );
    }
}

#[test]
fn transpose_is_involution() {
    for reels in sample_grids(500, 4) {
        assert_eq!(transpose(&transpose(&reels)), reels);
    }
}

#[test]
fn evaluate_monotonic_in_lines() {
    for reels in sample_grids(2_000, 5) {
        let rows = transpose(&reels);
        let mut last = 0;
        for lines in 1..=3 {
            let won = evaluate(&rows, 3, lines);
            assert!(won >= last);
            last = won;
        }
    }
}

#[test]
fn evaluate_linear_in_bet() {
    use reelspin_core::Symbol::*;
    let rows = [[A, A, A], [C, C, C], [D, D, D]];
    for k in 1..=20u64 {
        for lines in 1..=3 {
            assert_eq!(evaluate(&rows, k * 7, lines), k * evaluate(&rows, 7, lines));
        }
    }
}

#[test]
fn rng_repeatable() {
    let rng1 = ProvablyFairRng::new("s", "c", 42);
    let rng2 = ProvablyFairRng::new("s", "c", 42);
    assert_eq!(generate(&mut rng1.stream()), generate(&mut rng2.stream()));
}

#[test]
fn payout_basic() {
    let out = spin_with_seeds("server", "client", 7, 10, 3);
    assert_eq!(out.winnings % 10, 0);
    assert!(out.winnings <= 3 * 10 * 5);
}

#[test]
fn line_hits_match_probability() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let spins = 100_000;
    let mut hits = [0u32; 4];
    for _ in 0..spins {
        for win in spin_once(&mut rng, 1, 1).wins {
            hits[win.symbol.to_index() as usize] += 1;
        }
    }
    for s in Symbol::ALL {
        let observed = f64::from(hits[s.to_index() as usize]) / spins as f64;
        assert!((observed - line_hit_probability(s)).abs() < 0.005, "{s}: {observed}");
    }
}

#[test]
fn rtp_simulation_converges() {
    let mut total_bet = 0u64;
    let mut total_payout = 0u64;
    for n in 0..100_000u64 {
        let out = spin_with_seeds("server", "client", n, 1, 1);
        total_bet += 1;
        total_payout += out.winnings;
    }
    let rtp = total_payout as f64 / total_bet as f64;
    assert!((rtp - theoretical_rtp()).abs() < 0.02, "rtp {rtp}");
}
