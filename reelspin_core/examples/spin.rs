use reelspin_core::{spin_once, ProvablyFairRng};

fn main() {
    // Example end-to-end spin on all three lines
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let nonce = 1u64;
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    let outcome = spin_once(&mut rng.stream(), 10, 3);
    println!(
        "server_seed_hash={} winnings={} rows={:?}",
        rng.server_seed_hash_hex(),
        outcome.winnings,
        outcome.rows
    );
}
