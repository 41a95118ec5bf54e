use std::io::Write;

use reelspin_core::{grid_to_letters, theoretical_rtp, ProvablyFairRng, Symbol};
use reelspin_session::{RoundRecord, Session, Wager};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub server_seed_hash: String,
    pub rounds: u64,
    pub wagered: u64,
    pub won: u64,
    pub rtp: f64,
    pub theoretical_rtp: f64,
    pub biggest_win: u64,
    /// Paying lines per symbol, in `Symbol::ALL` order.
    pub line_hits: [u64; 4],
}

/// Plays `rounds` rounds, drawing round `n` from the provably-fair stream with nonce `n`.
///
/// Rounds are not retained; each settled record is handed to `on_round` instead.
pub fn simulate<F>(
    server_seed: &str,
    client_seed: &str,
    rounds: u64,
    wager: Wager,
    mut on_round: F,
) -> anyhow::Result<(SimulationReport, Session)>
where
    F: FnMut(&RoundRecord) -> anyhow::Result<()>,
{
    let bankroll = wager
        .total()?
        .checked_mul(rounds)
        .ok_or_else(|| anyhow::anyhow!("bankroll for {rounds} rounds overflows"))?;
    let mut session = Session::with_balance(bankroll).without_history();
    let mut line_hits = [0u64; 4];

    for nonce in 0..rounds {
        let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
        let record = session.play(&mut rng.stream(), wager)?;
        for win in &record.wins {
            line_hits[win.symbol.to_index() as usize] += 1;
        }
        on_round(&record)?;
    }

    let s = session.summary();
    let report = SimulationReport {
        server_seed_hash: reelspin_core::derive_hash_hex(server_seed.as_bytes()),
        rounds: s.rounds,
        wagered: s.wagered,
        won: s.won,
        rtp: s.rtp(),
        theoretical_rtp: theoretical_rtp(),
        biggest_win: s.biggest_win,
        line_hits,
    };
    info!(rounds, rtp = report.rtp, "simulation finished");
    Ok((report, session))
}

pub fn print_report<W: Write>(mut out: W, report: &SimulationReport) -> std::io::Result<()> {
    writeln!(out, "server_seed_hash={}", report.server_seed_hash)?;
    writeln!(
        out,
        "rounds={} wagered={} won={} biggest_win={}",
        report.rounds, report.wagered, report.won, report.biggest_win
    )?;
    writeln!(
        out,
        "rtp={:.4} theoretical={:.4}",
        report.rtp, report.theoretical_rtp
    )?;
    for s in Symbol::ALL {
        writeln!(
            out,
            "  {} x{}: {} line hits",
            s,
            s.value(),
            report.line_hits[s.to_index() as usize]
        )?;
    }
    Ok(())
}

/// CSV export written one round at a time.
pub struct RoundCsv<W: Write> {
    wtr: csv::Writer<W>,
    rows: u64,
}

impl<W: Write> RoundCsv<W> {
    pub fn new(writer: W) -> anyhow::Result<Self> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record([
            "round",
            "ts",
            "bet",
            "lines",
            "reels",
            "rows",
            "winnings",
            "balance_after",
        ])?;
        Ok(Self { wtr, rows: 0 })
    }

    pub fn write(&mut self, r: &RoundRecord) -> anyhow::Result<()> {
        self.wtr.write_record(&[
            r.round.to_string(),
            r.ts.to_rfc3339(),
            r.bet.to_string(),
            r.lines.to_string(),
            grid_to_letters(&r.reels),
            grid_to_letters(&r.rows),
            r.winnings.to_string(),
            r.balance_after.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes and returns the number of rounds written.
    pub fn finish(mut self) -> anyhow::Result<u64> {
        self.wtr.flush()?;
        Ok(self.rows)
    }
}
