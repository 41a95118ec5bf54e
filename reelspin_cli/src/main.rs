use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reelspin_core::{generate, grid_from_letters, grid_to_letters, transpose, ProvablyFairRng};
use reelspin_session::{Session, Wager};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;
mod render;
mod simulate;

use crate::console::Game;
use crate::render::render_rows;
use crate::simulate::RoundCsv;

#[derive(Parser)]
#[command(name = "reelspin", about = "Three-reel, three-line slot machine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log filter directive, e.g. `info` or `reelspin_session=debug`
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play {
        /// Seed for a reproducible session; drawn from entropy when absent
        #[arg(long, env = "REELSPIN_SEED")]
        seed: Option<u64>,
        /// Starting deposit; prompted for when absent
        #[arg(long, env = "REELSPIN_DEPOSIT")]
        deposit: Option<u64>,
        /// Show letters instead of fruit glyphs
        #[arg(long)]
        plain: bool,
    },
    /// Play many rounds on the provably-fair stream and report return to player
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        rounds: u64,
        #[arg(long, default_value_t = 1)]
        bet: u64,
        #[arg(long, default_value_t = 3)]
        lines: u8,
        #[arg(long, env = "REELSPIN_SERVER_SEED", default_value = "reelspin-server-seed")]
        server_seed: String,
        #[arg(long, env = "REELSPIN_CLIENT_SEED", default_value = "reelspin-client-seed")]
        client_seed: String,
        /// Export every round to this CSV path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recompute the reels of one provably-fair round
    Verify {
        #[arg(long, env = "REELSPIN_SERVER_SEED", default_value = "reelspin-server-seed")]
        server_seed: String,
        #[arg(long, env = "REELSPIN_CLIENT_SEED", default_value = "reelspin-client-seed")]
        client_seed: String,
        #[arg(long)]
        nonce: u64,
        /// Column-major reels to check, e.g. ABC/DAB/CDA
        #[arg(long)]
        expected: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Play {
            seed,
            deposit,
            plain,
        } => {
            let rng = match seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_entropy(),
            };
            let mut session = Session::new();
            if let Some(amount) = deposit {
                session.deposit(amount)?;
            }
            info!(?seed, balance = session.balance(), "starting session");
            let stdin = io::stdin();
            let mut game = Game::new(stdin.lock(), io::stdout().lock(), session, rng, plain);
            game.run()?;
        }
        Commands::Simulate {
            rounds,
            bet,
            lines,
            server_seed,
            client_seed,
            csv,
            json,
        } => {
            let wager = Wager::new(bet, lines)?;
            let mut export = match &csv {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    Some(RoundCsv::new(io::BufWriter::new(file))?)
                }
                None => None,
            };
            let (report, _) =
                simulate::simulate(&server_seed, &client_seed, rounds, wager, |record| {
                    match export.as_mut() {
                        Some(out) => out.write(record),
                        None => Ok(()),
                    }
                })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                simulate::print_report(io::stdout().lock(), &report)?;
            }
            if let (Some(out), Some(path)) = (export, csv) {
                let rows = out.finish()?;
                println!("Exported {} rows to {}", rows, path.display());
            }
        }
        Commands::Verify {
            server_seed,
            client_seed,
            nonce,
            expected,
        } => {
            let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
            let reels = generate(&mut rng.stream());
            println!("server_seed_hash={}", rng.server_seed_hash_hex());
            println!("reels={}", grid_to_letters(&reels));
            print!("{}", render_rows(&transpose(&reels), &[], true));
            if let Some(expected) = expected {
                let Some(grid) = grid_from_letters(&expected) else {
                    bail!("expected reels must be nine letters A-D, got {expected:?}");
                };
                if grid != reels {
                    bail!("reels do not match for nonce {nonce}");
                }
                println!("reels match");
            }
        }
    }

    Ok(())
}
