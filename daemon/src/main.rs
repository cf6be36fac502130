//! granaryd — operator tooling for a granary ledger data directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use granary_ledger::{LedgerConfig, StakingLedger};
use granary_store_lmdb::{stake::DEFAULT_MAP_SIZE, LmdbStakeStore};
use granary_utils::format_duration;

#[derive(Parser)]
#[command(name = "granaryd", about = "granary staking ledger daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GRANARY_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "GRANARY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "GRANARY_LOG_LEVEL")]
    log_level: String,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a data directory seeded with a fresh ledger from the config.
    Init,
    /// Report ledger parameters, authority and outstanding totals.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    granary_utils::init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => {
            let cfg = LedgerConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            tracing::info!("loaded config from {}", path.display());
            cfg
        }
        None => LedgerConfig::default(),
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());

    match cli.command {
        Command::Init => {
            config.validate()?;
            let store = LmdbStakeStore::open(&data_dir, DEFAULT_MAP_SIZE)
                .with_context(|| format!("opening store at {}", data_dir.display()))?;
            let ledger = StakingLedger::new(&config);
            ledger.save_to_store(&store)?;

            tracing::info!(
                "initialized ledger at {} ({} -> {}, rate {}%, cooldown {})",
                data_dir.display(),
                ledger.base_token(),
                ledger.reward_token(),
                ledger.params().annual_rate_pct,
                format_duration(ledger.params().cooldown_secs),
            );
            if ledger.owner().is_none() {
                tracing::warn!("no owner configured — parameters are frozen at their initial values");
            }
        }
        Command::Status => {
            let store = LmdbStakeStore::open(&data_dir, DEFAULT_MAP_SIZE)
                .with_context(|| format!("opening store at {}", data_dir.display()))?;
            let ledger = StakingLedger::load_from_store(&store)?;
            let params = ledger.params();

            println!("ledger at {}", data_dir.display());
            println!("  base token:   {}", ledger.base_token());
            println!("  reward token: {}", ledger.reward_token());
            println!("  annual rate:  {}%", params.annual_rate_pct);
            println!("  cooldown:     {}", format_duration(params.cooldown_secs));
            match ledger.owner() {
                Some(owner) => println!("  owner:        {owner}"),
                None => println!("  owner:        (renounced)"),
            }
            println!("  total staked: {}", ledger.total_staked());

            let mut accounts: Vec<_> = ledger.accounts().collect();
            accounts.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
            println!("  accounts:     {}", accounts.len());
            for (address, state) in accounts {
                let open = state.principal();
                match &state.pending {
                    Some(claim) => println!(
                        "    {address}: open {open}, pending {} (+{} reward, unlocks {})",
                        claim.principal, claim.reward, claim.unlock_at
                    ),
                    None => println!("    {address}: open {open}"),
                }
            }
        }
    }

    Ok(())
}
