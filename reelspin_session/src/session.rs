use chrono::Utc;
use rand::Rng;
use reelspin_core::spin_once;
use tracing::{debug, info};

use crate::{RoundRecord, SessionError, SessionResult, SessionSummary, Wager};

/// One player's balance and round history for the life of the process.
#[derive(Debug, Clone)]
pub struct Session {
    balance: u64,
    history: Vec<RoundRecord>,
    keep_history: bool,
    summary: SessionSummary,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            balance: 0,
            history: Vec::new(),
            keep_history: true,
            summary: SessionSummary::default(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops retaining rounds; `play` still returns each record and the
    /// summary still accumulates.
    pub fn without_history(mut self) -> Self {
        self.keep_history = false;
        self.history = Vec::new();
        self
    }

    pub fn with_balance(amount: u64) -> Self {
        let mut session = Self::new();
        session.balance = amount;
        session.summary.deposited = amount;
        session.summary.balance = amount;
        session
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_broke(&self) -> bool {
        self.balance == 0
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Adds funds and returns the new balance.
    pub fn deposit(&mut self, amount: u64) -> SessionResult<u64> {
        if amount == 0 {
            return Err(SessionError::InvalidDeposit);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(SessionError::Overflow)?;
        self.summary.deposited = self.summary.deposited.saturating_add(amount);
        self.summary.balance = self.balance;
        info!(amount, balance = self.balance, "deposit");
        Ok(self.balance)
    }

    pub fn can_afford(&self, wager: &Wager) -> bool {
        wager.total().map_or(false, |t| t <= self.balance)
    }

    /// Deducts the wager, spins, credits winnings and records the round.
    ///
    /// Nothing changes when the wager is rejected.
    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R, wager: Wager) -> SessionResult<RoundRecord> {
        let total = wager.total()?;
        if total > self.balance {
            return Err(SessionError::InsufficientFunds {
                needed: total,
                available: self.balance,
            });
        }
        let staked = self.balance - total;

        let outcome = spin_once(rng, wager.bet(), usize::from(wager.lines()));
        debug!(rows = ?outcome.rows, "reels stopped");
        self.balance = staked
            .checked_add(outcome.winnings)
            .ok_or(SessionError::Overflow)?;

        let s = &mut self.summary;
        s.rounds += 1;
        s.wagered = s.wagered.saturating_add(total);
        s.won = s.won.saturating_add(outcome.winnings);
        s.biggest_win = s.biggest_win.max(outcome.winnings);
        s.balance = self.balance;

        let record = RoundRecord {
            round: s.rounds,
            ts: Utc::now(),
            bet: wager.bet(),
            lines: wager.lines(),
            reels: outcome.reels,
            rows: outcome.rows,
            wins: outcome.wins,
            winnings: outcome.winnings,
            balance_after: self.balance,
        };
        info!(
            round = record.round,
            wagered = total,
            winnings = record.winnings,
            balance = self.balance,
            "round settled"
        );
        if self.keep_history {
            self.history.push(record.clone());
        }
        Ok(record)
    }
}
