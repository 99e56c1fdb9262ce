//! PowChain simulator
//!
//! Builds a chain, mines a batch of blocks with random payloads to a single
//! miner account and prints a summary.
//!
//! Usage: `powchain-sim [config.json]`. Environment: `POWCHAIN_BLOCKS`
//! (blocks to mine, default 50), `POWCHAIN_MINER` (miner address),
//! `POWCHAIN_LOG` / `RUST_LOG` (log filter, default `info`).

use powchain::{Blockchain, ChainConfig};
use rand::Rng;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BLOCKS: u64 = 50;
const DEFAULT_MINER: &str = "miner-1";

fn random_payload(rng: &mut impl Rng) -> String {
    let bytes: [u8; 16] = rng.gen();
    format!("Transaction: {}", hex::encode(bytes))
}

fn load_config() -> Result<ChainConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            info!(path = %path, "Loading chain config");
            Ok(ChainConfig::from_json(&json)?)
        }
        None => Ok(ChainConfig {
            difficulty: 5,
            target_time_ms: 2_000,
            initial_reward: 50.0,
            halving_interval: 100,
            ..ChainConfig::default()
        }
        .with_seed_account(DEFAULT_MINER, 0.0)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("POWCHAIN_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let blocks: u64 = std::env::var("POWCHAIN_BLOCKS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_BLOCKS);
    let miner = std::env::var("POWCHAIN_MINER").unwrap_or_else(|_| DEFAULT_MINER.to_string());

    let config = load_config()?;
    let mut chain = Blockchain::new(config)?;
    println!("Blockchain has been initialized!\n{chain}\n");

    let mut rng = rand::thread_rng();
    let started = Instant::now();
    for _ in 0..blocks {
        chain.add_block(random_payload(&mut rng), &miner)?;
    }
    let elapsed = started.elapsed();

    let stats = chain.stats();
    println!("Valid:          {}", chain.is_valid());
    println!("Blocks:         {}", chain.len());
    println!("Tip:            {}", stats.tip_hash);
    println!("Difficulty:     {}", stats.difficulty);
    println!("Reward:         {}", stats.current_reward);
    println!("Average nonce:  {:.1}", stats.average_nonce);
    println!("{miner} balance: {} coins", chain.account_balance(&miner));
    println!("Elapsed:        {:.3} seconds", elapsed.as_secs_f64());

    Ok(())
}
