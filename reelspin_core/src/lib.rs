pub mod engine;
pub mod paytable;
pub mod reels;
pub mod rng;
pub mod symbols;

pub use crate::engine::{
    evaluate, spin_once, spin_with_seeds, transpose, verify_reels, winning_lines, LineWin,
    SpinOutcome,
};
pub use crate::paytable::{
    line_hit_probability, pool, pool_size, theoretical_rtp, PaytableEntry, PAYTABLE,
};
pub use crate::reels::generate;
pub use crate::rng::{derive_hash_hex, FairStream, ProvablyFairRng};
pub use crate::symbols::{grid_from_letters, grid_to_letters, Grid, Symbol, COLS, ROWS};
