use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    pub weight: u32,
    pub value: u64,
}

/// Fixed odds and payouts, indexed by `Symbol::to_index`.
pub const PAYTABLE: [PaytableEntry; 4] = [
    PaytableEntry {
        symbol: Symbol::A,
        weight: 2,
        value: 5,
    },
    PaytableEntry {
        symbol: Symbol::B,
        weight: 4,
        value: 4,
    },
    PaytableEntry {
        symbol: Symbol::C,
        weight: 6,
        value: 3,
    },
    PaytableEntry {
        symbol: Symbol::D,
        weight: 8,
        value: 2,
    },
];

pub fn pool_size() -> u32 {
    PAYTABLE.iter().map(|e| e.weight).sum()
}

/// The weighted multiset every column draws from, `weight` copies per symbol.
pub fn pool() -> Vec<Symbol> {
    PAYTABLE
        .iter()
        .flat_map(|e| std::iter::repeat(e.symbol).take(e.weight as usize))
        .collect()
}

/// Chance that a single payline shows three of `symbol`.
///
/// Each cell is `weight / pool` on its own (draws without replacement are
/// exchangeable) and the three cells of a line sit in independent columns.
pub fn line_hit_probability(symbol: Symbol) -> f64 {
    let p = f64::from(symbol.weight()) / f64::from(pool_size());
    p * p * p
}

/// Expected winnings per active line per unit bet.
pub fn theoretical_rtp() -> f64 {
    Symbol::ALL
        .iter()
        .map(|&s| s.value() as f64 * line_hit_probability(s))
        .sum()
}
