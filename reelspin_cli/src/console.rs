use std::io::{self, BufRead, Write};
use std::str::FromStr;

use rand::Rng;
use reelspin_session::{Session, SessionError, Wager, MAX_LINES};
use tracing::warn;

use crate::render::render_rows;

enum BetPrompt {
    Ready(Wager),
    ChangeLines,
    Quit,
}

/// Interactive terminal game over any line-oriented input and output.
///
/// End of input at any prompt ends the game cleanly.
pub struct Game<I, O, R> {
    input: I,
    output: O,
    session: Session,
    rng: R,
    plain: bool,
}

impl<I: BufRead, O: Write, R: Rng> Game<I, O, R> {
    pub fn new(input: I, output: O, session: Session, rng: R, plain: bool) -> Self {
        Self {
            input,
            output,
            session,
            rng,
            plain,
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Welcome to reelspin!")?;
        if self.session.is_broke() && !self.ask_deposit()? {
            return self.farewell();
        }

        loop {
            writeln!(self.output, "Balance: ${}", self.session.balance())?;
            let Some(wager) = self.ask_stake()? else { break };

            let record = match self.session.play(&mut self.rng, wager) {
                Ok(record) => record,
                Err(e) => {
                    self.reject(&e)?;
                    continue;
                }
            };
            write!(
                self.output,
                "{}",
                render_rows(&record.rows, &record.wins, self.plain)
            )?;
            if record.winnings > 0 {
                writeln!(self.output, "You won ${}!", record.winnings)?;
            } else {
                writeln!(self.output, "No win this time.")?;
            }
            writeln!(self.output, "Balance: ${}", self.session.balance())?;

            if self.session.is_broke() {
                writeln!(self.output, "You ran out of money! Deposit more to continue.")?;
                if !self.ask_deposit()? {
                    break;
                }
            }
            if self.ask_yes_no("Play again (y/n)? ")? != Some(true) {
                break;
            }
        }
        self.farewell()
    }

    fn farewell(&mut self) -> anyhow::Result<()> {
        let s = self.session.summary();
        writeln!(
            self.output,
            "Played {} rounds, wagered ${}, won ${}. You leave with ${}.",
            s.rounds,
            s.wagered,
            s.won,
            self.session.balance()
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask<T: FromStr>(&mut self, msg: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(msg)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => {
                    warn!(input = %line, "rejected non-numeric input");
                    writeln!(self.output, "Please enter a whole number.")?;
                }
            }
        }
    }

    fn ask_deposit(&mut self) -> io::Result<bool> {
        loop {
            let Some(amount) = self.ask::<u64>("Enter a deposit amount: ")? else {
                return Ok(false);
            };
            match self.session.deposit(amount) {
                Ok(_) => return Ok(true),
                Err(e) => self.reject(&e)?,
            }
        }
    }

    fn ask_lines(&mut self) -> io::Result<Option<u8>> {
        let msg = format!("Enter the number of lines to bet on (1-{MAX_LINES}): ");
        loop {
            let Some(lines) = self.ask::<u8>(&msg)? else {
                return Ok(None);
            };
            if (1..=MAX_LINES).contains(&lines) {
                return Ok(Some(lines));
            }
            self.reject(&SessionError::InvalidLines { lines })?;
        }
    }

    /// Lines then bet; an unaffordable total goes back to the lines prompt.
    fn ask_stake(&mut self) -> io::Result<Option<Wager>> {
        loop {
            let Some(lines) = self.ask_lines()? else {
                return Ok(None);
            };
            match self.ask_wager(lines)? {
                BetPrompt::Ready(wager) => return Ok(Some(wager)),
                BetPrompt::ChangeLines => continue,
                BetPrompt::Quit => return Ok(None),
            }
        }
    }

    fn ask_wager(&mut self, lines: u8) -> io::Result<BetPrompt> {
        loop {
            let Some(bet) = self.ask::<u64>("Enter the bet per line: ")? else {
                return Ok(BetPrompt::Quit);
            };
            let wager = match Wager::new(bet, lines) {
                Ok(w) => w,
                Err(e) => {
                    self.reject(&e)?;
                    continue;
                }
            };
            if self.session.can_afford(&wager) {
                return Ok(BetPrompt::Ready(wager));
            }
            let err = SessionError::InsufficientFunds {
                needed: bet.saturating_mul(u64::from(lines)),
                available: self.session.balance(),
            };
            self.reject(&err)?;
            return Ok(BetPrompt::ChangeLines);
        }
    }

    fn ask_yes_no(&mut self, msg: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.prompt(msg)? else {
                return Ok(None);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    fn reject(&mut self, err: &SessionError) -> io::Result<()> {
        warn!(%err, "rejected wager input");
        writeln!(self.output, "{err}, try again.")
    }
}
