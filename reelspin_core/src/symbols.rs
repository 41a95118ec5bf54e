use serde::{Deserialize, Serialize};
use std::fmt;

use crate::paytable::PAYTABLE;

pub const ROWS: usize = 3;
pub const COLS: usize = 3;

/// A 3x3 arrangement of symbols.
///
/// Reels come out of the generator column-major (`grid[col][row]`); after
/// [`crate::engine::transpose`] the same type holds paylines row-major
/// (`grid[row][col]`).
pub type Grid = [[Symbol; ROWS]; COLS];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

    pub fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Symbol::A,
            1 => Symbol::B,
            2 => Symbol::C,
            _ => Symbol::D,
        }
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::A => 0,
            Symbol::B => 1,
            Symbol::C => 2,
            Symbol::D => 3,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Symbol::A),
            'B' => Some(Symbol::B),
            'C' => Some(Symbol::C),
            'D' => Some(Symbol::D),
            _ => None,
        }
    }

    /// Glyph shown on the reels: cherry, lemon, orange, grape.
    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::A => "\u{1F352}",
            Symbol::B => "\u{1F34B}",
            Symbol::C => "\u{1F34A}",
            Symbol::D => "\u{1F347}",
        }
    }

    /// Copies of this symbol in every column's drawing pool.
    pub fn weight(self) -> u32 {
        PAYTABLE[self.to_index() as usize].weight
    }

    /// Payout multiplier per unit bet for a line made entirely of this symbol.
    pub fn value(self) -> u64 {
        PAYTABLE[self.to_index() as usize].value
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Parses nine letters (whitespace, `/` and `,` ignored) into a column-major grid.
pub fn grid_from_letters(s: &str) -> Option<Grid> {
    let symbols: Vec<Symbol> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/' && *c != ',')
        .map(Symbol::from_letter)
        .collect::<Option<_>>()?;
    if symbols.len() != ROWS * COLS {
        return None;
    }
    let mut grid = [[Symbol::A; ROWS]; COLS];
    for (i, symbol) in symbols.into_iter().enumerate() {
        grid[i / ROWS][i % ROWS] = symbol;
    }
    Some(grid)
}

pub fn grid_to_letters(grid: &Grid) -> String {
    grid.iter()
        .map(|line| line.iter().map(|s| s.letter()).collect::<String>())
        .collect::<Vec<_>>()
        .join("/")
}
