use chrono::{DateTime, Utc};
use reelspin_core::{Grid, LineWin, PAYTABLE, ROWS};
use serde::{Deserialize, Serialize};

pub mod session;

pub use crate::session::Session;

pub const MAX_LINES: u8 = ROWS as u8;

/// A validated stake: `bet` per line on the first `lines` rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "WagerFields")]
pub struct Wager {
    bet: u64,
    lines: u8,
}

#[derive(Deserialize)]
struct WagerFields {
    bet: u64,
    lines: u8,
}

impl TryFrom<WagerFields> for Wager {
    type Error = SessionError;

    fn try_from(fields: WagerFields) -> SessionResult<Self> {
        Wager::new(fields.bet, fields.lines)
    }
}

impl Wager {
    pub fn new(bet: u64, lines: u8) -> SessionResult<Self> {
        if lines == 0 || lines > MAX_LINES {
            return Err(SessionError::InvalidLines { lines });
        }
        if bet == 0 {
            return Err(SessionError::InvalidBet);
        }
        let wager = Self { bet, lines };
        wager.total()?;
        // every active line paying the top symbol must still fit
        let top = PAYTABLE.iter().map(|e| e.value).max().unwrap_or(0);
        bet.checked_mul(top * u64::from(lines))
            .ok_or(SessionError::Overflow)?;
        Ok(wager)
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn lines(&self) -> u8 {
        self.lines
    }

    /// Amount deducted before the spin.
    pub fn total(&self) -> SessionResult<u64> {
        self.bet
            .checked_mul(u64::from(self.lines))
            .ok_or(SessionError::Overflow)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoundRecord {
    pub round: u64,
    pub ts: DateTime<Utc>,
    pub bet: u64,
    pub lines: u8,
    pub reels: Grid,
    pub rows: Grid,
    pub wins: Vec<LineWin>,
    pub winnings: u64,
    pub balance_after: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub rounds: u64,
    pub deposited: u64,
    pub wagered: u64,
    pub won: u64,
    pub biggest_win: u64,
    pub balance: u64,
}

impl SessionSummary {
    /// Return to player over the session; zero before the first round.
    pub fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.won as f64 / self.wagered as f64
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("deposit must be a positive amount")]
    InvalidDeposit,
    #[error("bet must be a positive amount")]
    InvalidBet,
    #[error("number of lines must be between 1 and 3, got {lines}")]
    InvalidLines { lines: u8 },
    #[error("insufficient balance: wager needs {needed}, balance is {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("amount too large")]
    Overflow,
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wager_bounds() {
        assert_eq!(Wager::new(10, 0), Err(SessionError::InvalidLines { lines: 0 }));
        assert_eq!(Wager::new(10, 4), Err(SessionError::InvalidLines { lines: 4 }));
        assert_eq!(Wager::new(0, 2), Err(SessionError::InvalidBet));
        assert_eq!(Wager::new(u64::MAX, 2), Err(SessionError::Overflow));
        assert_eq!(Wager::new(u64::MAX / 10, 3), Err(SessionError::Overflow));
        let w = Wager::new(10, 3).unwrap();
        assert_eq!(w.total(), Ok(30));
    }

    #[test]
    fn deserialized_wagers_are_validated() {
        let w: Wager = serde_json::from_str(r#"{"bet":4,"lines":2}"#).unwrap();
        assert_eq!(w, Wager::new(4, 2).unwrap());

        let err = serde_json::from_str::<Wager>(r#"{"bet":0,"lines":200}"#).unwrap_err();
        assert!(err.to_string().contains("number of lines must be between 1 and 3"));
        assert!(serde_json::from_str::<Wager>(r#"{"bet":0,"lines":1}"#).is_err());

        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(serde_json::from_str::<Wager>(&json).unwrap(), w);
    }

    #[test]
    fn error_messages_are_user_facing() {
        let err = SessionError::InsufficientFunds {
            needed: 30,
            available: 12,
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance: wager needs 30, balance is 12"
        );
        assert_eq!(
            SessionError::InvalidLines { lines: 9 }.to_string(),
            "number of lines must be between 1 and 3, got 9"
        );
    }

    #[test]
    fn summary_rtp() {
        let s = SessionSummary {
            wagered: 200,
            won: 50,
            ..Default::default()
        };
        assert!((s.rtp() - 0.25).abs() < f64::EPSILON);
        assert_eq!(SessionSummary::default().rtp(), 0.0);
    }
}
