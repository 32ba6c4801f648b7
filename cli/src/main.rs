//! booster-traits - command line front end for the reveal engine
//!
//! Runs a simulated reveal with a given seed and prints derived traits:
//!
//! ```text
//! booster-traits derive --seed 1337 --item 0
//! booster-traits derive --seed 0x539 --from 0 --to 99 --json
//! booster-traits tally --generator-seed 42 --from 0 --to 1999
//! ```

use anyhow::{bail, Context, Result};
use booster_traits_core_rs::{
    FundingAccount, Principal, RevealConfig, Seed, SimulatedOracle, TraitRevealer, WordGenerator,
};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ORACLE: &str = "simulated-vrf";

#[derive(Parser, Debug)]
#[command(name = "booster-traits", version, about = "Derive booster traits from a revealed seed")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category of one item or of an inclusive range
    Derive {
        #[command(flatten)]
        reveal: RevealArgs,

        /// Single item id
        #[arg(long, conflicts_with_all = ["from", "to"])]
        item: Option<u64>,

        /// First item id of the range
        #[arg(long, requires = "to")]
        from: Option<u64>,

        /// Last item id of the range (inclusive)
        #[arg(long, requires = "from")]
        to: Option<u64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Count categories over an inclusive range
    Tally {
        #[command(flatten)]
        reveal: RevealArgs,

        #[arg(long)]
        from: u64,

        #[arg(long)]
        to: u64,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RevealArgs {
    /// Revealed seed, decimal or 0x-prefixed hex
    #[arg(long, env = "BOOSTER_SEED", conflicts_with = "generator_seed")]
    seed: Option<String>,

    /// Draw the seed from the deterministic word generator instead
    #[arg(long)]
    generator_seed: Option<u64>,

    /// JSON configuration (weight table, item domain, oracle)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl RevealArgs {
    fn load_config(&self) -> Result<RevealConfig> {
        match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                RevealConfig::from_json_str(&json)
                    .with_context(|| format!("parsing config {}", path.display()))
            }
            None => Ok(RevealConfig::new(Principal::new(DEFAULT_ORACLE))),
        }
    }

    fn seed(&self) -> Result<Seed> {
        match (&self.seed, self.generator_seed) {
            (Some(text), _) => text.parse().context("parsing --seed"),
            (None, Some(generator_seed)) => Ok(WordGenerator::new(generator_seed).next_word()),
            (None, None) => bail!("either --seed or --generator-seed is required"),
        }
    }

    /// Run request + fulfillment against a simulated oracle
    fn reveal(&self) -> Result<TraitRevealer> {
        let config = self.load_config()?;
        let seed = self.seed()?;

        let mut oracle = SimulatedOracle::new(config.oracle.clone(), 0);
        let revealer = TraitRevealer::new(config)?;
        let request_id = revealer.request_randomness(&mut oracle, &mut FundingAccount::default())?;
        oracle.provide(revealer.gate(), request_id, &[seed])?;

        tracing::info!(request_id, %seed, "simulated reveal complete");
        Ok(revealer)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli.command, &mut stdout.lock())
}

fn run(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Derive {
            reveal,
            item,
            from,
            to,
            json,
        } => {
            let revealer = reveal.reveal()?;
            let (from, to) = match (item, from, to) {
                (Some(item), _, _) => (item, item),
                (None, Some(from), Some(to)) => (from, to),
                _ => bail!("pass --item or both --from and --to"),
            };

            let traits = revealer.derive_category_range(from, to)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&traits)?)?;
            } else {
                let table = &revealer.config().weight_table;
                for item in traits {
                    writeln!(
                        out,
                        "{}\t{}\t{}",
                        item.item_id,
                        item.category,
                        table.label_of(item.category).unwrap_or("")
                    )?;
                }
            }
        }
        Command::Tally {
            reveal,
            from,
            to,
            json,
        } => {
            let revealer = reveal.reveal()?;
            let tally = revealer.tally_categories(from, to)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&tally)?)?;
            } else {
                let table = &revealer.config().weight_table;
                for (category, count) in tally.counts() {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{:.2}%",
                        category,
                        table.label_of(*category).unwrap_or(""),
                        count,
                        tally.share(*category) * 100.0
                    )?;
                }
                writeln!(out, "Total: {}", tally.total())?;
            }
        }
    }

    Ok(())
}
